//! Fractional column positions for drag-and-drop.
//!
//! Cards are ordered within a column by an `f64` position. Dropping a
//! card assigns it the midpoint of its new neighbors' positions, so a
//! move renumbers exactly one card. The gap constant leaves room for
//! many midpoint insertions before positions converge.

use log::warn;

use super::Board;
use crate::error::{BoardError, Result};
use crate::models::KanbanCard;
use crate::params::DragEnd;

/// Base spacing between appended cards.
pub const POSITION_GAP: f64 = 1000.0;

/// Computes the position for a card dropped between two neighbors.
///
/// With no neighbors (empty column) the position is the base gap. At the
/// top of a column it is half the first neighbor's position; at the
/// bottom, the last neighbor's position plus the gap. Between two
/// neighbors it is their arithmetic midpoint.
pub fn position_between(lower: Option<f64>, upper: Option<f64>) -> f64 {
    match (lower, upper) {
        (None, None) => POSITION_GAP,
        (None, Some(upper)) => upper / 2.0,
        (Some(lower), None) => lower + POSITION_GAP,
        (Some(lower), Some(upper)) => (lower + upper) / 2.0,
    }
}

impl Board {
    /// Applies a completed drag-and-drop move: assigns the dragged card
    /// its destination column and a position between its new neighbors,
    /// then routes the edit through [`Board::update_card`].
    ///
    /// A remote failure reverts the dragged card locally and is logged
    /// rather than surfaced; the card snaps back on the next render.
    ///
    /// # Errors
    ///
    /// * `BoardError::CardNotFound` - the dragged key is not in the view
    pub async fn handle_drag_end(&mut self, drag: &DragEnd) -> Result<()> {
        let mut card = self
            .card(drag.card)
            .ok_or(BoardError::CardNotFound { key: drag.card })?;

        let mut column: Vec<KanbanCard> = self
            .view()
            .into_iter()
            .filter(|c| c.status == drag.to_status && c.id != drag.card)
            .collect();
        column.sort_by(|a, b| {
            a.position
                .unwrap_or(f64::MAX)
                .total_cmp(&b.position.unwrap_or(f64::MAX))
        });

        let index = drag.index.min(column.len());
        let lower = index
            .checked_sub(1)
            .and_then(|i| column.get(i))
            .and_then(|c| c.position);
        let upper = column.get(index).and_then(|c| c.position);

        card.status = drag.to_status.clone();
        card.position = Some(position_between(lower, upper));

        if let Err(e) = self.update_card(card).await {
            warn!("drag of card {} failed and was reverted locally: {e}", drag.card);
        }
        Ok(())
    }
}
