//! Mirror bookkeeping, per-record sync states, and change-feed
//! consumption.
//!
//! Each mirrored record moves through a small state machine relative to
//! the remote store: `Clean` (mirror agrees with the last snapshot),
//! `OptimisticallyModified` (local mutation issued, remote write still in
//! flight; the pre-mutation value is kept for revert), and `Reverting`
//! (the write failed and the prior value is being restored). A change-feed
//! refetch is an authoritative snapshot that resolves every record of the
//! affected table back to `Clean`.

use std::collections::HashSet;

use log::warn;
use tokio::sync::broadcast::error::TryRecvError;

use super::Board;
use crate::models::{CardKey, KanbanCard, Plan};
use crate::store::Table;

/// Identifies a mirrored record for sync-state tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum RecordKey {
    Plan(u64),
    Card(u64),
}

/// Lifecycle of a mirrored record relative to the remote store.
#[derive(Debug, Clone, Default)]
pub(crate) enum SyncState {
    /// Mirror agrees with the last authoritative snapshot
    #[default]
    Clean,
    /// Local mutation applied ahead of the remote write; `prior` is the
    /// pre-mutation value (`None` when the record did not exist yet)
    OptimisticallyModified { prior: Option<MirrorValue> },
    /// The remote write failed and the prior value is being restored
    Reverting,
}

/// Saved pre-mutation value for a mirrored record.
#[derive(Debug, Clone)]
pub(crate) enum MirrorValue {
    Plan(Box<Plan>),
    Card(Box<KanbanCard>),
}

impl Board {
    /// Drains pending change notifications and refetches each affected
    /// table. Returns whether any mirror was refreshed. Refetch failures
    /// are logged and the previous mirror kept; the next notification or
    /// an explicit [`Board::refresh`] will retry.
    pub async fn sync_pending(&mut self) -> bool {
        let mut plans = false;
        let mut cards = false;

        loop {
            match self.changes.try_recv() {
                Ok(event) => match event.table {
                    Table::Plans => plans = true,
                    Table::Cards => cards = true,
                },
                Err(TryRecvError::Lagged(missed)) => {
                    // Notifications were dropped; nothing to do but treat
                    // everything as stale
                    warn!("change feed lagged by {missed} events, refetching both tables");
                    plans = true;
                    cards = true;
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }

        if plans {
            self.refresh_plans().await;
        }
        if cards {
            self.refresh_cards().await;
        }
        plans || cards
    }

    /// Forces a full refetch of both mirrors.
    pub async fn refresh(&mut self) {
        self.refresh_plans().await;
        self.refresh_cards().await;
    }

    async fn refresh_plans(&mut self) {
        match self.store.fetch_plans().await {
            Ok(snapshot) => self.apply_plan_snapshot(snapshot),
            Err(e) => warn!("plan refresh failed, keeping stale mirror: {e}"),
        }
    }

    async fn refresh_cards(&mut self) {
        match self.store.fetch_cards().await {
            Ok(snapshot) => self.apply_card_snapshot(snapshot),
            Err(e) => warn!("card refresh failed, keeping stale mirror: {e}"),
        }
    }

    fn apply_plan_snapshot(&mut self, snapshot: Vec<Plan>) {
        // The snapshot is authoritative: every plan record is Clean again
        self.sync_states
            .retain(|key, _| !matches!(key, RecordKey::Plan(_)));

        // An ignore-set entry is only useful while the deleted plan can
        // still resurface; once the store confirms it gone, drop it
        let present: HashSet<u64> = snapshot.iter().map(|p| p.id).collect();
        self.ignored_plans.retain(|id| present.contains(id));

        self.plans = snapshot;
    }

    fn apply_card_snapshot(&mut self, snapshot: Vec<KanbanCard>) {
        self.sync_states
            .retain(|key, _| !matches!(key, RecordKey::Card(_)));
        self.cards = snapshot;
    }

    /// Optimistically upserts a plan into the mirror ahead of its remote
    /// write, saving the prior value for revert.
    pub(crate) fn stage_plan(&mut self, plan: Plan) {
        let key = RecordKey::Plan(plan.id);
        let prior = self.take_plan(plan.id).map(|p| MirrorValue::Plan(Box::new(p)));
        self.plans.push(plan);
        self.sync_states
            .insert(key, SyncState::OptimisticallyModified { prior });
    }

    /// Optimistically removes a plan from the mirror ahead of its remote
    /// delete.
    pub(crate) fn stage_plan_removal(&mut self, id: u64) {
        let prior = self.take_plan(id).map(|p| MirrorValue::Plan(Box::new(p)));
        self.sync_states
            .insert(RecordKey::Plan(id), SyncState::OptimisticallyModified { prior });
    }

    /// Optimistically upserts a card into the mirror ahead of its remote
    /// write, saving the prior value for revert. Virtual cards never
    /// enter the mirror.
    pub(crate) fn stage_card(&mut self, card: KanbanCard) {
        let CardKey::Real(id) = card.id else {
            return;
        };
        let prior = self.take_card(card.id).map(|c| MirrorValue::Card(Box::new(c)));
        self.cards.push(card);
        self.sync_states
            .insert(RecordKey::Card(id), SyncState::OptimisticallyModified { prior });
    }

    /// Optimistically removes a card from the mirror ahead of its remote
    /// delete.
    pub(crate) fn stage_card_removal(&mut self, id: u64) {
        let prior = self
            .take_card(CardKey::Real(id))
            .map(|c| MirrorValue::Card(Box::new(c)));
        self.sync_states
            .insert(RecordKey::Card(id), SyncState::OptimisticallyModified { prior });
    }

    /// Records a store-confirmed value directly; no revert data needed.
    pub(crate) fn commit_plan(&mut self, plan: Plan) {
        let key = RecordKey::Plan(plan.id);
        self.take_plan(plan.id);
        self.plans.push(plan);
        self.sync_states.remove(&key);
    }

    /// Records a store-confirmed card directly; no revert data needed.
    pub(crate) fn commit_card(&mut self, card: KanbanCard) {
        let CardKey::Real(id) = card.id else {
            return;
        };
        self.take_card(card.id);
        self.cards.push(card);
        self.sync_states.remove(&RecordKey::Card(id));
    }

    /// Marks a record's optimistic mutation as confirmed by the store.
    pub(crate) fn mark_clean(&mut self, key: RecordKey) {
        self.sync_states.remove(&key);
    }

    /// Reverts a single record to its pre-mutation value after a failed
    /// remote write. Only that record is touched; no full resync.
    pub(crate) fn revert_record(&mut self, key: RecordKey) {
        let state = self.sync_states.insert(key, SyncState::Reverting);
        if let Some(SyncState::OptimisticallyModified { prior }) = state {
            match (key, prior) {
                (RecordKey::Plan(_), Some(MirrorValue::Plan(plan))) => {
                    self.take_plan(plan.id);
                    self.plans.push(*plan);
                }
                (RecordKey::Plan(id), _) => {
                    self.take_plan(id);
                }
                (RecordKey::Card(_), Some(MirrorValue::Card(card))) => {
                    self.take_card(card.id);
                    self.cards.push(*card);
                }
                (RecordKey::Card(id), _) => {
                    let _ = self.take_card(CardKey::Real(id));
                }
            }
        }
        self.sync_states.remove(&key);
    }

    fn take_plan(&mut self, id: u64) -> Option<Plan> {
        let idx = self.plans.iter().position(|p| p.id == id)?;
        Some(self.plans.remove(idx))
    }

    fn take_card(&mut self, key: CardKey) -> Option<KanbanCard> {
        let idx = self.cards.iter().position(|c| c.id == key)?;
        Some(self.cards.remove(idx))
    }
}
