//! Column-grouped board view and plan listings.

use std::fmt;

use crate::models::{CardStatus, KanbanCard, Plan};

use super::datetime::DateSpan;
use super::models::status_heading;

/// Newtype wrapper rendering a derived card list as a kanban board.
///
/// Cards are grouped into columns by status. The fixed columns print in
/// board order (inbox, pending, in-progress, completed) and are always
/// shown; custom columns follow in order of first appearance, only when
/// occupied. Within a column cards sort by ascending position, with
/// unpositioned cards last.
pub struct BoardView(pub Vec<KanbanCard>);

impl BoardView {
    /// Check if the board has no cards at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of cards on the board.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The board's columns in render order, each with its cards sorted.
    pub fn columns(&self) -> Vec<(CardStatus, Vec<&KanbanCard>)> {
        let mut order = vec![
            CardStatus::Inbox,
            CardStatus::Pending,
            CardStatus::InProgress,
            CardStatus::Completed,
        ];
        for card in &self.0 {
            if card.status.is_custom() && !order.contains(&card.status) {
                order.push(card.status.clone());
            }
        }

        order
            .into_iter()
            .map(|status| {
                let mut cards: Vec<&KanbanCard> =
                    self.0.iter().filter(|c| c.status == status).collect();
                cards.sort_by(|a, b| {
                    a.position
                        .unwrap_or(f64::MAX)
                        .total_cmp(&b.position.unwrap_or(f64::MAX))
                        .then_with(|| a.created_at.cmp(&b.created_at))
                });
                (status, cards)
            })
            .collect()
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "The board is empty.");
        }

        for (status, cards) in self.columns() {
            writeln!(f, "## {} ({})", status_heading(&status), cards.len())?;
            writeln!(f)?;
            if cards.is_empty() {
                writeln!(f, "*empty*")?;
            }
            for card in cards {
                write!(f, "- **{}** {}", card.id, card.title)?;
                if let Some(start) = card.start_date {
                    write!(f, " ({})", DateSpan(start, card.end_date))?;
                }
                if !card.checklist.is_empty() {
                    let done = card.checklist.iter().filter(|i| i.done).count();
                    write!(f, " [{done}/{}]", card.checklist.len())?;
                }
                writeln!(f)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying plan listings.
///
/// Formats one summary line per plan, sorted by start date, and handles
/// the empty case gracefully.
pub struct Plans(pub Vec<Plan>);

impl Plans {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plans in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Plans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }

        let mut plans: Vec<&Plan> = self.0.iter().collect();
        plans.sort_by_key(|p| (p.date, p.id));

        for plan in plans {
            let mark = if plan.completed { "x" } else { " " };
            write!(
                f,
                "- [{mark}] **{}** {} ({})",
                plan.id,
                plan.title,
                DateSpan(plan.date, plan.due_date)
            )?;
            if !plan.time_slots.is_empty() {
                write!(f, " ⏰{}", plan.time_slots.len())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use jiff::Timestamp;

    use super::*;
    use crate::models::CardKey;

    fn card(id: u64, status: CardStatus, position: Option<f64>) -> KanbanCard {
        KanbanCard {
            id: CardKey::Real(id),
            title: format!("Card {id}"),
            description: None,
            status,
            start_date: None,
            end_date: None,
            time_slots: Vec::new(),
            checklist: Vec::new(),
            comments: Vec::new(),
            attachments: Vec::new(),
            created_at: Timestamp::UNIX_EPOCH,
            position,
            linked_plan_id: None,
        }
    }

    #[test]
    fn test_board_view_empty() {
        let output = BoardView(vec![]).to_string();
        assert_eq!(output, "The board is empty.\n");
    }

    #[test]
    fn test_board_view_column_sorting() {
        let board = BoardView(vec![
            card(1, CardStatus::Inbox, Some(2000.0)),
            card(2, CardStatus::Inbox, Some(500.0)),
            card(3, CardStatus::Inbox, None),
        ]);

        let columns = board.columns();
        let (status, inbox) = &columns[0];
        assert_eq!(*status, CardStatus::Inbox);
        assert_eq!(inbox[0].id, CardKey::Real(2));
        assert_eq!(inbox[1].id, CardKey::Real(1));
        assert_eq!(inbox[2].id, CardKey::Real(3));
    }

    #[test]
    fn test_board_view_custom_column_after_fixed() {
        let board = BoardView(vec![
            card(1, CardStatus::Custom("review".to_string()), None),
            card(2, CardStatus::Completed, None),
        ]);

        let columns = board.columns();
        assert_eq!(columns.len(), 5);
        assert_eq!(columns[4].0, CardStatus::Custom("review".to_string()));
    }

    #[test]
    fn test_plans_listing() {
        let plans = Plans(vec![Plan {
            id: 7,
            title: "Trip".to_string(),
            description: None,
            date: date(2024, 6, 1),
            due_date: Some(date(2024, 6, 5)),
            time_slots: Vec::new(),
            attachments: Vec::new(),
            completed: false,
            created_at: Timestamp::UNIX_EPOCH,
        }]);

        let output = plans.to_string();
        assert!(output.contains("**7** Trip"));
        assert!(output.contains("2024-06-01 → 2024-06-05"));
    }

    #[test]
    fn test_plans_empty() {
        assert_eq!(Plans(vec![]).to_string(), "No plans found.\n");
    }
}
