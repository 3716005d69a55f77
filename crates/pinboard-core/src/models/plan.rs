//! Plan model definition and related functionality.

use jiff::civil::{Date, Time};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Attachment;

/// A schedulable calendar item anchored to a single start date, optionally
/// spanning to a due date.
///
/// A plan is the lightweight representation of a task. When card-only data
/// (checklist, comments, manual ordering) is attached to it, the
/// reconciliation engine promotes it to a real card; until then it surfaces
/// on the board as a virtual card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Title of the plan
    pub title: String,

    /// Detailed multi-line description of the plan
    pub description: Option<String>,

    /// Start date (calendar date, no time component)
    pub date: Date,

    /// Due date; when present the plan spans `date..=due_date`
    pub due_date: Option<Date>,

    /// Ordered time-of-day slots; meaningful only when no due date is set
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,

    /// Attachments owned by the plan
    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// Completion flag
    #[serde(default)]
    pub completed: bool,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,
}

impl Plan {
    /// Whether the plan spans more than its start date.
    pub fn has_due_date(&self) -> bool {
        self.due_date.is_some()
    }

    /// End of the plan's date span (due date when set, else the start date).
    pub fn end_date(&self) -> Date {
        self.due_date.unwrap_or(self.date)
    }
}

/// An ordered time-of-day slot within a single-day plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    /// Unique identifier for the slot
    pub id: u64,

    /// Time of day the slot starts
    pub time: Time,

    /// Short label for the slot
    pub description: Option<String>,
}
