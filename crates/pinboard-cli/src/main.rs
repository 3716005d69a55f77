//! Pinboard CLI application.
//!
//! Command-line front end for the pinboard planning engine: a calendar of
//! plans and a kanban board of cards kept in sync by the core crate.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use pinboard_core::BoardBuilder;
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let mut board = BoardBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize board")?;

    // Pick up changes made since the snapshot load, e.g. by a concurrent
    // invocation
    board.sync_pending().await;

    let renderer = TerminalRenderer::new(!no_color);
    let mut cli = Cli::new(board, renderer);

    info!("Pinboard started");

    match command {
        Some(Commands::Plan { command }) => cli.handle_plan_command(command).await,
        Some(Commands::Card { command }) => cli.handle_card_command(command).await,
        Some(Commands::Board) | None => cli.show_board(),
    }
}
