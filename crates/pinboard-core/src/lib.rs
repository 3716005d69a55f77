//! Core library for the Pinboard personal planning application.
//!
//! A single task can live as a calendar [`models::Plan`], as a kanban
//! [`models::KanbanCard`], or as both through a plan link. This crate
//! holds the data models, the SQLite-backed remote store client, and the
//! reconciliation engine that keeps the two representations consistent:
//! a unified board view derived from both tables, date-driven column
//! assignment, write routing with virtual-to-real card promotion, and
//! optimistic local mirrors resynchronized through the store's change
//! feed.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use jiff::civil::date;
//! use pinboard_core::{BoardBuilder, params::NewPlan};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut board = BoardBuilder::new()
//!     .with_database_path(Some("pinboard.db"))
//!     .build()
//!     .await?;
//!
//! let plan = board
//!     .add_plan(NewPlan {
//!         title: "Write the report".to_string(),
//!         date: date(2024, 6, 10),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("Created plan: {plan}");
//!
//! // The unscheduled-or-not task shows up on the board either way
//! for card in board.view() {
//!     println!("{} [{}] {}", card.id, card.status, card.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod params;
pub mod store;

// Re-export commonly used types
pub use display::{BoardView, CreateResult, DeleteResult, LocalDateTime, Plans, UpdateResult};
pub use engine::derive::derive_status;
pub use engine::ordering::position_between;
pub use engine::{Board, BoardBuilder};
pub use error::{BoardError, Result};
pub use models::{
    Attachment, AttachmentKind, CardKey, CardStatus, ChecklistItem, Comment, CompletionFilter,
    KanbanCard, Plan, PlanFilter, TimeSlot,
};
pub use params::{DragEnd, NewAttachment, NewCard, NewPlan, NewTimeSlot};
pub use store::Store;
