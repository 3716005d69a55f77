//! Reconciliation engine for the plan/card board.
//!
//! A single logical task can live as a lightweight calendar [`Plan`], as a
//! richer board [`KanbanCard`], or as both at once through a plan link.
//! This module keeps the two representations consistent. The [`Board`]
//! façade is the only mutation surface the presentation layer may call:
//!
//! ```text
//! ┌──────────────┐    ┌──────────────────┐    ┌──────────────┐
//! │ Presentation │───▶│      Board       │───▶│    Store     │
//! │  (CLI, UI)   │    │ mirrors + derive │    │  (remote DB) │
//! └──────────────┘    │  + write routing │    └──────┬───────┘
//!                     └────────▲─────────┘           │
//!                              └── change feed ──────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: factory for [`Board`] instances (snapshot load + feed
//!   subscription)
//! - [`derive`]: pure derivation of the unified view and of date-based
//!   status
//! - [`routing`]: classification of card edits and the promotion protocol
//! - [`ordering`]: fractional column positions for drag-and-drop
//! - [`refresh`]: mirror bookkeeping, sync states, change-feed consumption
//!
//! ## Consistency model
//!
//! The mirrors are non-authoritative and optimistic: local mutation lands
//! before the remote write is issued, a failed write reverts exactly the
//! record it touched, and change-feed refetches are applied as
//! authoritative snapshots. The ignore set suppresses plans that were
//! deleted locally until the store confirms the delete, which is the only
//! guard against a deleted plan flickering back into the derived view.

use std::collections::{HashMap, HashSet};

use jiff::civil::Date;
use jiff::Zoned;
use tokio::sync::broadcast;

use crate::models::{CardKey, KanbanCard, Plan, PlanFilter};
use crate::store::{ChangeEvent, Store};

pub mod builder;
pub mod derive;
pub mod ordering;
pub mod refresh;
pub mod routing;

#[cfg(test)]
mod tests;

pub use builder::BoardBuilder;

use refresh::{RecordKey, SyncState};

/// Central coordinator between the presentation layer and the remote
/// store.
///
/// Holds the local plan/card mirrors, derives the unified board view, and
/// routes every edit to the record(s) that logically own it. All methods
/// are driven from a single event-handling task; there is no internal
/// locking.
pub struct Board {
    pub(crate) store: Store,
    pub(crate) changes: broadcast::Receiver<ChangeEvent>,
    pub(crate) plans: Vec<Plan>,
    pub(crate) cards: Vec<KanbanCard>,
    pub(crate) ignored_plans: HashSet<u64>,
    pub(crate) sync_states: HashMap<RecordKey, SyncState>,
}

impl Board {
    pub(crate) fn new(
        store: Store,
        changes: broadcast::Receiver<ChangeEvent>,
        plans: Vec<Plan>,
        cards: Vec<KanbanCard>,
    ) -> Self {
        Self {
            store,
            changes,
            plans,
            cards,
            ignored_plans: HashSet::new(),
            sync_states: HashMap::new(),
        }
    }

    /// The derived, de-duplicated board view for the current day: real
    /// cards plus virtual projections of unlinked plans.
    pub fn view(&self) -> Vec<KanbanCard> {
        self.view_on(Self::today())
    }

    /// The derived board view as of a given day.
    pub fn view_on(&self, today: Date) -> Vec<KanbanCard> {
        derive::derive_board(&self.plans, &self.cards, &self.ignored_plans, today)
    }

    /// Plans matching the given filter, for calendar-style listing.
    pub fn plans(&self, filter: &PlanFilter) -> Vec<Plan> {
        self.plans
            .iter()
            .filter(|p| !self.ignored_plans.contains(&p.id) && filter.matches(p))
            .cloned()
            .collect()
    }

    /// Looks up a plan in the mirror by id.
    pub fn plan(&self, id: u64) -> Option<&Plan> {
        if self.ignored_plans.contains(&id) {
            return None;
        }
        self.plans.iter().find(|p| p.id == id)
    }

    /// Looks up an entry of the derived view by key.
    pub fn card(&self, key: CardKey) -> Option<KanbanCard> {
        self.view().into_iter().find(|c| c.id == key)
    }

    /// The real card linked to the given plan, if one exists.
    pub(crate) fn card_for_plan(&self, plan_id: u64) -> Option<&KanbanCard> {
        self.cards
            .iter()
            .find(|c| c.linked_plan_id == Some(plan_id))
    }

    pub(crate) fn today() -> Date {
        Zoned::now().date()
    }
}
