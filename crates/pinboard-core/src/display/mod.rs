//! Display formatting functions and result types.
//!
//! Presentation stays out of the domain models: this module carries the
//! `Display` implementations and the wrapper types the CLI renders, all
//! producing markdown for rich terminal output.
//!
//! ```text
//! ┌──────────────────┐    ┌──────────────────┐    ┌────────────┐
//! │  Domain Models   │    │ Wrappers & impls │    │  Markdown  │
//! │ (Plan, KanbanCard│───▶│ (BoardView,      │───▶│  (Terminal)│
//! │  CardStatus, …)  │    │  *Result, spans) │    └────────────┘
//! └──────────────────┘    └──────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`board`]: the column-grouped board view and plan listings
//! - [`results`]: operation result types (CreateResult, UpdateResult,
//!   DeleteResult)
//! - [`datetime`]: date, span, and timestamp formatting utilities
//! - [`models`]: Display implementations for domain models

pub mod board;
pub mod datetime;
pub mod models;
pub mod results;

pub use board::{BoardView, Plans};
pub use datetime::{DateSpan, LocalDateTime};
pub use results::{CreateResult, DeleteResult, UpdateResult};
