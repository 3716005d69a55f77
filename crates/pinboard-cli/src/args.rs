//! Command-line argument definitions using clap's derive API.
//!
//! The argument structures here are CLI wrappers around the core parameter
//! types: clap-specific concerns (flags, help text, value parsing) stay in
//! this layer, and each wrapper converts into its interface-agnostic core
//! counterpart via `From` or a small builder method.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use jiff::civil::Date;
use pinboard_core::{
    params::{NewAttachment, NewCard, NewPlan, NewTimeSlot},
    AttachmentKind, CardStatus, CompletionFilter, PlanFilter,
};

/// Main command-line interface for the Pinboard planning tool
///
/// Pinboard keeps one task list visible from two angles: a dated calendar
/// of plans and a kanban board of cards. The two stay in sync; running
/// `pin` with no command renders the board.
#[derive(Parser)]
#[command(version, about, name = "pin")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/pinboard/pinboard.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Pinboard CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Show the board (default)
    #[command(alias = "b")]
    Board,
    /// Manage calendar plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage board cards
    #[command(alias = "c")]
    Card {
        #[command(subcommand)]
        command: CardCommands,
    },
}

/// Operations on calendar plans
#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new plan
    Add(AddPlanArgs),
    /// List plans, optionally filtered by date range
    List(ListPlansArgs),
    /// Show details of a specific plan
    Show(PlanIdArgs),
    /// Mark a plan as completed
    Complete(PlanIdArgs),
    /// Delete a plan
    Delete(PlanIdArgs),
}

/// Operations on board cards
#[derive(Subcommand)]
pub enum CardCommands {
    /// Create a new card
    Add(AddCardArgs),
    /// Edit a card's fields
    Update(UpdateCardArgs),
    /// Delete a card
    Delete(CardKeyArgs),
    /// Move a card to a column position
    Move(MoveCardArgs),
}

/// Create a new plan
#[derive(ClapArgs)]
pub struct AddPlanArgs {
    /// Title of the plan
    pub title: String,
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Date,
    /// Optional description providing more context about the plan
    #[arg(short, long)]
    pub description: Option<String>,
    /// Due date making the plan span a range; excludes time slots
    #[arg(long)]
    pub due: Option<Date>,
    /// Time slot in HH:MM or HH:MM=label form; repeatable
    #[arg(long = "slot", value_parser = parse_slot)]
    pub slots: Vec<NewTimeSlot>,
    /// Link attachment URL; repeatable
    #[arg(long = "link")]
    pub links: Vec<String>,
}

impl From<AddPlanArgs> for NewPlan {
    fn from(val: AddPlanArgs) -> Self {
        NewPlan {
            title: val.title,
            description: val.description,
            date: val.date,
            due_date: val.due,
            time_slots: val.slots,
            attachments: val
                .links
                .into_iter()
                .map(|value| NewAttachment {
                    kind: AttachmentKind::Link,
                    value,
                })
                .collect(),
        }
    }
}

/// List plans, optionally filtered by date range
#[derive(ClapArgs)]
pub struct ListPlansArgs {
    /// Only plans overlapping this date or later
    #[arg(long)]
    pub from: Option<Date>,
    /// Only plans overlapping this date or earlier
    #[arg(long)]
    pub until: Option<Date>,
    /// Only completed plans
    #[arg(long, conflicts_with = "open")]
    pub completed: bool,
    /// Only open plans
    #[arg(long)]
    pub open: bool,
}

impl From<ListPlansArgs> for PlanFilter {
    fn from(val: ListPlansArgs) -> Self {
        PlanFilter {
            from: val.from,
            until: val.until,
            completion: if val.completed {
                Some(CompletionFilter::Completed)
            } else if val.open {
                Some(CompletionFilter::Open)
            } else {
                None
            },
        }
    }
}

/// Identify a plan by id
#[derive(ClapArgs)]
pub struct PlanIdArgs {
    /// Unique identifier of the plan
    pub id: u64,
}

/// Create a new card
#[derive(ClapArgs)]
pub struct AddCardArgs {
    /// Title of the card
    pub title: String,
    /// Optional description providing more context about the card
    #[arg(short, long)]
    pub description: Option<String>,
    /// Destination column; derived from the dates when scheduled
    #[arg(short, long)]
    pub status: Option<String>,
    /// Schedule start date; also creates a linked plan
    #[arg(long)]
    pub start: Option<Date>,
    /// Schedule end date; requires a start date
    #[arg(long)]
    pub end: Option<Date>,
}

impl From<AddCardArgs> for NewCard {
    fn from(val: AddCardArgs) -> Self {
        NewCard {
            title: val.title,
            description: val.description,
            status: val.status.as_deref().map(CardStatus::from_name),
            start_date: val.start,
            end_date: val.end,
        }
    }
}

/// Edit a card's fields
///
/// Unspecified fields keep their current values. Clearing the start date
/// detaches the card from the calendar; on a virtual card this promotes
/// it to a real one.
#[derive(ClapArgs)]
pub struct UpdateCardArgs {
    /// Card key: a numeric id, or plan-<id> for a virtual card
    pub key: String,
    /// New title
    #[arg(short, long)]
    pub title: Option<String>,
    /// New description
    #[arg(short, long)]
    pub description: Option<String>,
    /// New column
    #[arg(short, long)]
    pub status: Option<String>,
    /// New schedule start date
    #[arg(long, conflicts_with = "clear_schedule")]
    pub start: Option<Date>,
    /// New schedule end date
    #[arg(long, conflicts_with = "clear_schedule")]
    pub end: Option<Date>,
    /// Remove the schedule entirely
    #[arg(long)]
    pub clear_schedule: bool,
}

/// Identify a card by key
#[derive(ClapArgs)]
pub struct CardKeyArgs {
    /// Card key: a numeric id, or plan-<id> for a virtual card
    pub key: String,
}

/// Move a card to a column position
#[derive(ClapArgs)]
pub struct MoveCardArgs {
    /// Card key: a numeric id, or plan-<id> for a virtual card
    pub key: String,
    /// Destination column
    pub status: String,
    /// Insertion index within the column, 0 is the top
    #[arg(default_value_t = 0)]
    pub index: usize,
}

fn parse_slot(s: &str) -> Result<NewTimeSlot, String> {
    let (time, description) = match s.split_once('=') {
        Some((time, label)) => (time, Some(label.to_string())),
        None => (s, None),
    };
    let time = time
        .parse()
        .map_err(|e| format!("invalid time '{time}': {e}"))?;
    Ok(NewTimeSlot { time, description })
}
