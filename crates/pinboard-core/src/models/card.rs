//! Kanban card model and its child collections.

use jiff::civil::Date;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Attachment, CardKey, CardStatus, TimeSlot};

/// A task-board item with a column assignment and collaboration data.
///
/// A card whose `linked_plan_id` is set logically represents the same task
/// as that plan; at most one real card may reference a given plan at a
/// time. A card with a [`CardKey::Virtual`] key is a read-time projection
/// synthesized during view derivation and is never written to the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KanbanCard {
    /// Identifier; real cards carry their row id, virtual cards the plan id
    pub id: CardKey,

    /// Title of the card
    pub title: String,

    /// Detailed multi-line description of the card
    pub description: Option<String>,

    /// Column assignment
    #[serde(default)]
    pub status: CardStatus,

    /// Start of the card's schedule; absent for unscheduled cards
    pub start_date: Option<Date>,

    /// End of the card's schedule
    pub end_date: Option<Date>,

    /// Read-only; populated from the linked plan during derivation
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,

    /// Ordered checklist
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,

    /// Ordered comments
    #[serde(default)]
    pub comments: Vec<Comment>,

    /// Attachments owned by the card
    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// Timestamp when the card was created (UTC)
    pub created_at: Timestamp,

    /// Manual ordering within a column (fractional midpoint scheme)
    pub position: Option<f64>,

    /// Back-reference to the plan this card represents
    pub linked_plan_id: Option<u64>,
}

impl KanbanCard {
    /// Whether this card is a plan projection rather than a stored row.
    pub fn is_virtual(&self) -> bool {
        self.id.is_virtual()
    }

    /// Whether this card carries data a plan cannot represent on its own:
    /// a checklist, comments, a manual position, or the terminal completed
    /// column. A virtual card in this state must be promoted to a real one.
    pub fn needs_real_backing(&self) -> bool {
        !self.checklist.is_empty()
            || !self.comments.is_empty()
            || self.position.is_some()
            || self.status == CardStatus::Completed
    }
}

/// An ordered checklist entry on a card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistItem {
    /// Unique identifier for the item
    pub id: u64,

    /// Item text
    pub text: String,

    /// Completion flag
    #[serde(default)]
    pub done: bool,
}

/// An ordered comment on a card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    /// Unique identifier for the comment
    pub id: u64,

    /// Comment text
    pub text: String,

    /// Whether the comment has been marked as handled
    #[serde(default)]
    pub marked_done: bool,

    /// Timestamp when the comment was written (UTC)
    pub created_at: Timestamp,
}
