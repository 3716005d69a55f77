//! Display implementations for domain models.
//!
//! Markdown-formatted output for rich terminal display, kept apart from
//! the model definitions. `CardStatus` and `CardKey` already print their
//! wire forms from the models module; everything richer lives here.

use std::fmt;

use super::datetime::{DateSpan, LocalDateTime};
use crate::models::{CardStatus, KanbanCard, Plan, TimeSlot};

/// Column heading with a status icon, for board and card output.
pub fn status_heading(status: &CardStatus) -> String {
    let icon = match status {
        CardStatus::Inbox => "▢",
        CardStatus::Pending => "○",
        CardStatus::InProgress => "◐",
        CardStatus::Completed => "✓",
        CardStatus::Custom(_) => "◇",
    };
    format!("{icon} {status}")
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Date: {}", DateSpan(self.date, self.due_date))?;
        writeln!(f, "- Completed: {}", if self.completed { "yes" } else { "no" })?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if !self.time_slots.is_empty() {
            writeln!(f, "\n## Schedule")?;
            writeln!(f)?;
            for slot in &self.time_slots {
                write!(f, "{slot}")?;
            }
        }

        if !self.attachments.is_empty() {
            writeln!(f, "\n## Attachments")?;
            writeln!(f)?;
            for attachment in &self.attachments {
                writeln!(f, "- [{}] {}", attachment.kind.as_str(), attachment.value)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(desc) => writeln!(f, "- {}: {desc}", self.time.strftime("%H:%M")),
            None => writeln!(f, "- {}", self.time.strftime("%H:%M")),
        }
    }
}

impl fmt::Display for KanbanCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Status: {}", status_heading(&self.status))?;
        if let Some(start) = self.start_date {
            writeln!(f, "- Scheduled: {}", DateSpan(start, self.end_date))?;
        }
        if let Some(plan_id) = self.linked_plan_id {
            writeln!(f, "- Plan: {plan_id}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if !self.time_slots.is_empty() {
            writeln!(f, "\n## Schedule")?;
            writeln!(f)?;
            for slot in &self.time_slots {
                write!(f, "{slot}")?;
            }
        }

        if !self.checklist.is_empty() {
            writeln!(f, "\n## Checklist")?;
            writeln!(f)?;
            for item in &self.checklist {
                let mark = if item.done { "x" } else { " " };
                writeln!(f, "- [{mark}] {}", item.text)?;
            }
        }

        if !self.comments.is_empty() {
            writeln!(f, "\n## Comments")?;
            writeln!(f)?;
            for comment in &self.comments {
                writeln!(
                    f,
                    "- {} ({}){}",
                    comment.text,
                    LocalDateTime(&comment.created_at),
                    if comment.marked_done { " ✓" } else { "" }
                )?;
            }
        }

        if !self.attachments.is_empty() {
            writeln!(f, "\n## Attachments")?;
            writeln!(f)?;
            for attachment in &self.attachments {
                writeln!(f, "- [{}] {}", attachment.kind.as_str(), attachment.value)?;
            }
        }

        Ok(())
    }
}
