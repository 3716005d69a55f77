//! Parameter structures for board operations
//!
//! Shared parameter structures that can be used across different
//! interfaces (CLI, future HTTP API, etc.) without framework-specific
//! derives. Interface layers convert their own argument types into these
//! via `Into` and call the [`crate::engine::Board`] methods with them.

use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::models::{AttachmentKind, CardKey, CardStatus};

/// Parameters for creating a new plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPlan {
    /// Title of the plan (required)
    pub title: String,
    /// Optional detailed description of the plan
    pub description: Option<String>,
    /// Start date of the plan
    pub date: Date,
    /// Optional due date; makes the plan span `date..=due_date`
    pub due_date: Option<Date>,
    /// Time-of-day slots; only valid without a due date
    #[serde(default)]
    pub time_slots: Vec<NewTimeSlot>,
    /// Attachments to create with the plan
    #[serde(default)]
    pub attachments: Vec<NewAttachment>,
}

impl NewPlan {
    /// Validates the plan invariants before anything is written.
    ///
    /// # Errors
    ///
    /// * `BoardError::InvalidInput` - empty title, a due date before the
    ///   start date, or time slots combined with a due date
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(BoardError::invalid_input("title", "Title must not be empty"));
        }
        if let Some(due) = self.due_date {
            if due < self.date {
                return Err(BoardError::invalid_input(
                    "due_date",
                    format!("Due date {due} is before start date {}", self.date),
                ));
            }
            if !self.time_slots.is_empty() {
                return Err(BoardError::invalid_input(
                    "time_slots",
                    "Time slots cannot be combined with a due date",
                ));
            }
        }
        Ok(())
    }
}

/// A time-of-day slot to create within a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTimeSlot {
    /// Time of day the slot starts
    pub time: Time,
    /// Short label for the slot
    pub description: Option<String>,
}

/// An attachment to create on a plan or card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAttachment {
    /// Whether the value is a URL or a stored-file reference
    pub kind: AttachmentKind,
    /// URL or opaque file reference
    pub value: String,
}

/// Parameters for creating a new card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCard {
    /// Title of the card (required)
    pub title: String,
    /// Optional detailed description of the card
    pub description: Option<String>,
    /// Destination column; defaults to inbox, recomputed from dates when a
    /// schedule is given
    pub status: Option<CardStatus>,
    /// Optional start of the card's schedule
    pub start_date: Option<Date>,
    /// Optional end of the card's schedule; requires a start date
    pub end_date: Option<Date>,
}

impl NewCard {
    /// Validates the card invariants before anything is written.
    ///
    /// # Errors
    ///
    /// * `BoardError::InvalidInput` - empty title, an end date without a
    ///   start date, or an end date before the start date
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(BoardError::invalid_input("title", "Title must not be empty"));
        }
        match (self.start_date, self.end_date) {
            (None, Some(_)) => Err(BoardError::invalid_input(
                "end_date",
                "An end date requires a start date",
            )),
            (Some(start), Some(end)) if end < start => Err(BoardError::invalid_input(
                "end_date",
                format!("End date {end} is before start date {start}"),
            )),
            _ => Ok(()),
        }
    }
}

/// Parameters for a completed drag-and-drop move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragEnd {
    /// The card that was dragged
    pub card: CardKey,
    /// Destination column
    pub to_status: CardStatus,
    /// Insertion index within the destination column (top is 0)
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_new_plan_validate_ok() {
        let params = NewPlan {
            title: "Trip".to_string(),
            date: date(2024, 6, 1),
            due_date: Some(date(2024, 6, 5)),
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_new_plan_validate_empty_title() {
        let params = NewPlan {
            title: "  ".to_string(),
            date: date(2024, 6, 1),
            ..Default::default()
        };
        match params.validate().unwrap_err() {
            BoardError::InvalidInput { field, .. } => assert_eq!(field, "title"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_new_plan_validate_due_before_start() {
        let params = NewPlan {
            title: "Trip".to_string(),
            date: date(2024, 6, 5),
            due_date: Some(date(2024, 6, 1)),
            ..Default::default()
        };
        match params.validate().unwrap_err() {
            BoardError::InvalidInput { field, .. } => assert_eq!(field, "due_date"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_new_plan_validate_slots_exclusive_with_due_date() {
        let params = NewPlan {
            title: "Day".to_string(),
            date: date(2024, 6, 1),
            due_date: Some(date(2024, 6, 2)),
            time_slots: vec![NewTimeSlot::default()],
            ..Default::default()
        };
        match params.validate().unwrap_err() {
            BoardError::InvalidInput { field, .. } => assert_eq!(field, "time_slots"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_new_card_validate_end_requires_start() {
        let params = NewCard {
            title: "Card".to_string(),
            end_date: Some(date(2024, 6, 5)),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_new_card_validate_ordered_dates() {
        let params = NewCard {
            title: "Card".to_string(),
            start_date: Some(date(2024, 6, 5)),
            end_date: Some(date(2024, 6, 1)),
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = NewCard {
            title: "Card".to_string(),
            start_date: Some(date(2024, 6, 1)),
            end_date: Some(date(2024, 6, 5)),
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }
}
