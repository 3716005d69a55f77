//! Data models for plans and cards.
//!
//! This module contains the core domain models of the board: [`Plan`] for
//! the calendar side, [`KanbanCard`] for the board side, and the child
//! collections both carry. Display implementations live in
//! [`crate::display::models`] to keep data structures separate from
//! presentation.
//!
//! A single logical task can exist as either representation. The
//! [`CardKey`] sum type makes the distinction explicit: `Real` keys name
//! persisted card rows, `Virtual` keys name read-time projections of plans
//! that have no linked card yet.

pub mod attachment;
pub mod card;
pub mod filters;
pub mod key;
pub mod plan;
pub mod status;

#[cfg(test)]
mod tests;

// Re-export all public types at the models level
pub use attachment::{Attachment, AttachmentKind};
pub use card::{ChecklistItem, Comment, KanbanCard};
pub use filters::{CompletionFilter, PlanFilter};
pub use key::CardKey;
pub use plan::{Plan, TimeSlot};
pub use status::CardStatus;
