//! Command handlers bridging parsed arguments and the board engine.
//!
//! Each handler converts its CLI wrapper into core parameters, calls the
//! corresponding [`Board`] method, and renders the result through the
//! terminal renderer. Everything the user sees flows through the core
//! display wrappers.

use anyhow::{anyhow, Context, Result};
use pinboard_core::{
    display::{BoardView, CreateResult, DeleteResult, Plans, UpdateResult},
    params::DragEnd,
    Board, CardKey, CardStatus,
};

use crate::args::{CardCommands, PlanCommands, UpdateCardArgs};
use crate::renderer::TerminalRenderer;

/// Command dispatcher holding the board and the output renderer.
pub struct Cli {
    board: Board,
    renderer: TerminalRenderer,
}

impl Cli {
    /// Create a new CLI handler.
    pub fn new(board: Board, renderer: TerminalRenderer) -> Self {
        Self { board, renderer }
    }

    /// Render the derived board, grouped into columns.
    pub fn show_board(&self) -> Result<()> {
        self.renderer.render(&BoardView(self.board.view()).to_string())
    }

    /// Dispatch a `plan` subcommand.
    pub async fn handle_plan_command(&mut self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Add(args) => {
                let plan = self
                    .board
                    .add_plan(args.into())
                    .await
                    .context("Failed to create plan")?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::List(args) => {
                let plans = self.board.plans(&args.into());
                let output = format!("# Plans\n\n{}", Plans(plans));
                self.renderer.render(&output)
            }
            PlanCommands::Show(args) => {
                let plan = self
                    .board
                    .plan(args.id)
                    .ok_or_else(|| anyhow!("Plan {} not found", args.id))?;
                self.renderer.render(&plan.to_string())
            }
            PlanCommands::Complete(args) => {
                let plan = self
                    .board
                    .complete_plan(args.id)
                    .await
                    .context("Failed to complete plan")?;
                let result =
                    UpdateResult::with_changes(plan, vec!["Marked completed".to_string()]);
                self.renderer.render(&result.to_string())
            }
            PlanCommands::Delete(args) => {
                let plan = self
                    .board
                    .plan(args.id)
                    .cloned()
                    .ok_or_else(|| anyhow!("Plan {} not found", args.id))?;
                self.board
                    .delete_plan(args.id)
                    .await
                    .context("Failed to delete plan")?;
                self.renderer.render(&DeleteResult::new(plan).to_string())
            }
        }
    }

    /// Dispatch a `card` subcommand.
    pub async fn handle_card_command(&mut self, command: CardCommands) -> Result<()> {
        match command {
            CardCommands::Add(args) => {
                let card = self
                    .board
                    .add_card(args.into())
                    .await
                    .context("Failed to create card")?;
                self.renderer.render(&CreateResult::new(card).to_string())
            }
            CardCommands::Update(args) => {
                let card = self.edit_card(args).await?;
                self.renderer.render(&UpdateResult::new(card).to_string())
            }
            CardCommands::Delete(args) => {
                let key = parse_key(&args.key)?;
                let card = self
                    .board
                    .card(key)
                    .ok_or_else(|| anyhow!("Card {key} not found"))?;
                self.board
                    .delete_card(key)
                    .await
                    .context("Failed to delete card")?;
                self.renderer.render(&DeleteResult::new(card).to_string())
            }
            CardCommands::Move(args) => {
                let key = parse_key(&args.key)?;
                self.board
                    .handle_drag_end(&DragEnd {
                        card: key,
                        to_status: CardStatus::from_name(&args.status),
                        index: args.index,
                    })
                    .await
                    .context("Failed to move card")?;
                self.show_board()
            }
        }
    }

    /// Apply an `update` command's field changes on top of the current
    /// card state and route the result through the engine. Returns the
    /// surviving card, whose key changes when routing promoted it.
    async fn edit_card(&mut self, args: UpdateCardArgs) -> Result<pinboard_core::KanbanCard> {
        let key = parse_key(&args.key)?;
        let mut card = self
            .board
            .card(key)
            .ok_or_else(|| anyhow!("Card {key} not found"))?;

        if let Some(title) = args.title {
            card.title = title;
        }
        if let Some(description) = args.description {
            card.description = Some(description);
        }
        if let Some(status) = args.status.as_deref() {
            card.status = CardStatus::from_name(status);
        }
        if args.clear_schedule {
            card.start_date = None;
            card.end_date = None;
        } else {
            if let Some(start) = args.start {
                card.start_date = Some(start);
            }
            if let Some(end) = args.end {
                card.end_date = Some(end);
            }
        }

        let key = self
            .board
            .update_card(card)
            .await
            .context("Failed to update card")?;
        self.board
            .card(key)
            .ok_or_else(|| anyhow!("Card {key} not found after update"))
    }
}

fn parse_key(s: &str) -> Result<CardKey> {
    s.parse().map_err(|e| anyhow!("Invalid card key: {e}"))
}
