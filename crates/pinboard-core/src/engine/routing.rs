//! Classification of card edits and the promotion protocol.
//!
//! Every mutation entry point lives here. A card edit is routed to the
//! record(s) that logically own the changed fields: clearing a schedule
//! tears the plan link down, setting one creates or updates the linked
//! plan, and an edit a virtual card cannot carry promotes it to a real
//! row first. Plan-side writes are never rolled back when a later card
//! write fails; only the failed record is reverted from its saved prior.

use jiff::Timestamp;
use log::warn;

use super::derive::derive_status;
use super::ordering::position_between;
use super::refresh::RecordKey;
use super::Board;
use crate::error::{BoardError, Result};
use crate::models::{Attachment, CardKey, CardStatus, KanbanCard, Plan, TimeSlot};
use crate::params::{NewCard, NewPlan};

impl Board {
    /// Creates a plan and returns the stored record with assigned ids.
    ///
    /// # Errors
    ///
    /// * `BoardError::InvalidInput` - parameter validation failed
    /// * `BoardError::Store` - the remote insert failed
    pub async fn add_plan(&mut self, params: NewPlan) -> Result<Plan> {
        params.validate()?;

        let plan = Plan {
            id: 0,
            title: params.title,
            description: params.description,
            date: params.date,
            due_date: params.due_date,
            time_slots: params
                .time_slots
                .into_iter()
                .map(|s| TimeSlot {
                    id: 0,
                    time: s.time,
                    description: s.description,
                })
                .collect(),
            attachments: params
                .attachments
                .into_iter()
                .map(|a| Attachment {
                    id: 0,
                    kind: a.kind,
                    value: a.value,
                })
                .collect(),
            completed: false,
            created_at: Timestamp::now(),
        };

        let created = self.store.insert_plan(plan).await?;
        self.commit_plan(created.clone());
        Ok(created)
    }

    /// Replaces a plan's fields and child collections.
    ///
    /// The mirror is updated ahead of the remote write; a failed write
    /// reverts the plan record and surfaces the error.
    ///
    /// # Errors
    ///
    /// * `BoardError::PlanNotFound` - no plan with that id in the mirror
    /// * `BoardError::InvalidInput` - date/slot invariants violated
    /// * `BoardError::Store` - the remote update failed
    pub async fn update_plan(&mut self, plan: Plan) -> Result<()> {
        if self.plan(plan.id).is_none() {
            return Err(BoardError::PlanNotFound { id: plan.id });
        }
        if let Some(due) = plan.due_date {
            if due < plan.date {
                return Err(BoardError::invalid_input(
                    "due_date",
                    format!("Due date {due} is before start date {}", plan.date),
                ));
            }
            if !plan.time_slots.is_empty() {
                return Err(BoardError::invalid_input(
                    "time_slots",
                    "Time slots cannot be combined with a due date",
                ));
            }
        }
        self.apply_plan_optimistic(plan).await
    }

    /// Marks a plan completed and returns the updated record.
    ///
    /// # Errors
    ///
    /// * `BoardError::PlanNotFound` - no plan with that id in the mirror
    /// * `BoardError::Store` - the remote update failed
    pub async fn complete_plan(&mut self, id: u64) -> Result<Plan> {
        let mut plan = self
            .plan(id)
            .cloned()
            .ok_or(BoardError::PlanNotFound { id })?;
        plan.completed = true;
        self.apply_plan_optimistic(plan.clone()).await?;
        Ok(plan)
    }

    /// Deletes a plan.
    ///
    /// The id enters the ignore set before the remote delete is issued, so
    /// the plan (and any card linked to it) disappears from the derived
    /// view immediately and cannot flicker back in from a stale snapshot.
    ///
    /// # Errors
    ///
    /// * `BoardError::PlanNotFound` - no plan with that id in the mirror
    /// * `BoardError::Store` - the remote delete failed; the plan is
    ///   restored and un-suppressed
    pub async fn delete_plan(&mut self, id: u64) -> Result<()> {
        if self.plan(id).is_none() {
            return Err(BoardError::PlanNotFound { id });
        }

        self.ignored_plans.insert(id);
        self.stage_plan_removal(id);
        match self.store.delete_plan(id).await {
            Ok(()) => {
                self.mark_clean(RecordKey::Plan(id));
                Ok(())
            }
            Err(e) => {
                self.ignored_plans.remove(&id);
                self.revert_record(RecordKey::Plan(id));
                Err(e)
            }
        }
    }

    /// Creates a real card appended to the bottom of its column.
    ///
    /// A start date also creates a linked plan, so the new task shows up
    /// on the calendar side at once; the column is then derived from the
    /// dates unless an explicitly custom status was requested.
    ///
    /// # Errors
    ///
    /// * `BoardError::InvalidInput` - parameter validation failed
    /// * `BoardError::Store` - a remote insert failed
    pub async fn add_card(&mut self, params: NewCard) -> Result<KanbanCard> {
        params.validate()?;
        let today = Self::today();

        let status = match (params.status, params.start_date) {
            (Some(s), _) if !s.is_date_driven() => s,
            (_, Some(start)) => derive_status(start, params.end_date, false, today),
            (Some(s), None) => s,
            (None, None) => Default::default(),
        };

        let linked_plan_id = match params.start_date {
            Some(start) => {
                let plan = Plan {
                    id: 0,
                    title: params.title.clone(),
                    description: params.description.clone(),
                    date: start,
                    due_date: params.end_date,
                    time_slots: Vec::new(),
                    attachments: Vec::new(),
                    completed: status == CardStatus::Completed,
                    created_at: Timestamp::now(),
                };
                let created = self.store.insert_plan(plan).await?;
                let id = created.id;
                self.commit_plan(created);
                Some(id)
            }
            None => None,
        };

        // Bottom of the destination column
        let lower = self
            .view_on(today)
            .iter()
            .filter(|c| c.status == status)
            .filter_map(|c| c.position)
            .reduce(f64::max);
        let position = position_between(lower, None);

        let card = KanbanCard {
            id: CardKey::Real(0),
            title: params.title,
            description: params.description,
            status,
            start_date: params.start_date,
            end_date: params.end_date,
            time_slots: Vec::new(),
            checklist: Vec::new(),
            comments: Vec::new(),
            attachments: Vec::new(),
            created_at: Timestamp::now(),
            position: Some(position),
            linked_plan_id,
        };

        let created = self.store.insert_card(card).await?;
        self.commit_card(created.clone());
        Ok(created)
    }

    /// Applies an edited card state, routing each changed field to the
    /// record that owns it.
    ///
    /// Four exclusive cases:
    ///
    /// 1. virtual target, schedule cleared: promote to a real card and
    ///    tear the plan down;
    /// 2. real target, schedule cleared: delete the linked plan and clear
    ///    the link;
    /// 3. schedule present: recompute the date-driven status and
    ///    create-or-update the linked plan;
    /// 4. in every case the surviving real card is persisted last, with
    ///    an optimistic mirror update first.
    ///
    /// A failed card persistence reverts the card record only; plan-side
    /// writes that already happened stay.
    ///
    /// Returns the key of the surviving view entry, which differs from the
    /// input key when a virtual card was promoted or redirected.
    ///
    /// # Errors
    ///
    /// * `BoardError::CardNotFound` / `BoardError::PlanNotFound` - the
    ///   target no longer exists in the mirror
    /// * `BoardError::Store` - a remote write failed
    pub async fn update_card(&mut self, desired: KanbanCard) -> Result<CardKey> {
        if let CardKey::Virtual(plan_id) = desired.id {
            return self.route_virtual_update(plan_id, desired).await;
        }

        let current = self
            .cards
            .iter()
            .find(|c| c.id == desired.id)
            .cloned()
            .ok_or(BoardError::CardNotFound { key: desired.id })?;

        let Some(start) = desired.start_date else {
            return self.clear_schedule(current, desired).await;
        };

        let mut card = desired;
        if card.status.is_date_driven() {
            card.status = derive_status(start, card.end_date, false, Self::today());
        }

        match card.linked_plan_id {
            Some(plan_id) => {
                let plan = self
                    .plan(plan_id)
                    .cloned()
                    .ok_or(BoardError::PlanNotFound { id: plan_id })?;
                let updated = plan_with_card_fields(&plan, &card, false);
                self.apply_plan_optimistic(updated).await?;
            }
            None => {
                let plan = Plan {
                    id: 0,
                    title: card.title.clone(),
                    description: card.description.clone(),
                    date: start,
                    due_date: card.end_date,
                    time_slots: Vec::new(),
                    attachments: Vec::new(),
                    completed: card.status == CardStatus::Completed,
                    created_at: Timestamp::now(),
                };
                let created = self.store.insert_plan(plan).await?;
                card.linked_plan_id = Some(created.id);
                self.commit_plan(created);
            }
        }

        let key = card.id;
        self.persist_card(card).await?;
        Ok(key)
    }

    /// Deletes a card. A real card's linked plan is deleted with it; a
    /// virtual key deletes the underlying plan.
    ///
    /// # Errors
    ///
    /// * `BoardError::CardNotFound` / `BoardError::PlanNotFound` - the
    ///   target no longer exists in the mirror
    /// * `BoardError::Store` - the remote card delete failed; a failed
    ///   plan-side delete is logged and the plan stays suppressed
    pub async fn delete_card(&mut self, key: CardKey) -> Result<()> {
        let id = match key {
            CardKey::Virtual(plan_id) => return self.delete_plan(plan_id).await,
            CardKey::Real(id) => id,
        };

        let card = self
            .cards
            .iter()
            .find(|c| c.id == key)
            .cloned()
            .ok_or(BoardError::CardNotFound { key })?;

        self.stage_card_removal(id);
        if let Err(e) = self.store.delete_card(id).await {
            self.revert_record(RecordKey::Card(id));
            return Err(e);
        }
        self.mark_clean(RecordKey::Card(id));

        if let Some(plan_id) = card.linked_plan_id {
            if self.plan(plan_id).is_some() {
                self.teardown_plan(plan_id).await;
            }
        }
        Ok(())
    }

    /// Routes an edit addressed to a virtual card.
    ///
    /// If a real card already references the plan the edit is redirected
    /// to it, so a stale view can never produce a second backing card.
    /// Otherwise: schedule cleared promotes and tears down; an edit the
    /// plan cannot carry promotes while keeping the schedule; anything
    /// else is a plain plan edit.
    async fn route_virtual_update(&mut self, plan_id: u64, desired: KanbanCard) -> Result<CardKey> {
        let plan = self
            .plan(plan_id)
            .cloned()
            .ok_or(BoardError::PlanNotFound { id: plan_id })?;

        if let Some(existing) = self.card_for_plan(plan_id).cloned() {
            let mut redirected = desired;
            redirected.id = existing.id;
            redirected.linked_plan_id = Some(plan_id);
            // Attachments stay plan-owned; the real card keeps its own
            redirected.attachments = existing.attachments;
            if redirected.position.is_none() {
                redirected.position = existing.position;
            }
            return Box::pin(self.update_card(redirected)).await;
        }

        let Some(start) = desired.start_date else {
            return self.promote_and_teardown(plan, desired).await;
        };

        let mut card = desired;
        if card.status.is_date_driven() {
            card.status = derive_status(start, card.end_date, false, Self::today());
        }

        if card.needs_real_backing() {
            // Promotion keeping the schedule: the plan survives, linked
            let mut backing = card.clone();
            backing.linked_plan_id = Some(plan_id);
            backing.attachments = Vec::new();
            backing.time_slots = Vec::new();
            let created = self.store.insert_card(backing).await?;
            let key = created.id;
            self.commit_card(created);

            let updated = plan_with_card_fields(&plan, &card, false);
            self.apply_plan_optimistic(updated).await?;
            return Ok(key);
        }

        // Plain plan edit expressed through the projection; attachments
        // edited on a virtual card belong to the plan
        let updated = plan_with_card_fields(&plan, &card, true);
        self.apply_plan_optimistic(updated).await?;
        Ok(CardKey::Virtual(plan_id))
    }

    /// Case 1: the virtual card's schedule was cleared. The task becomes
    /// a plain board card and the plan is torn down.
    async fn promote_and_teardown(&mut self, plan: Plan, desired: KanbanCard) -> Result<CardKey> {
        let mut card = desired;
        card.start_date = None;
        card.end_date = None;
        card.time_slots = Vec::new();
        card.linked_plan_id = None;

        let created = self.store.insert_card(card).await?;
        let key = created.id;
        self.commit_card(created);

        self.teardown_plan(plan.id).await;
        Ok(key)
    }

    /// Case 2: a real card's schedule was cleared. The linked plan is
    /// deleted and the link removed from the card.
    async fn clear_schedule(&mut self, current: KanbanCard, desired: KanbanCard) -> Result<CardKey> {
        let mut card = desired;
        card.end_date = None;
        card.time_slots = Vec::new();
        card.linked_plan_id = None;

        if let Some(plan_id) = current.linked_plan_id {
            if self.plan(plan_id).is_some() {
                self.teardown_plan(plan_id).await;
            }
        }

        let key = card.id;
        self.persist_card(card).await?;
        Ok(key)
    }

    /// Deletes a plan as the side effect of a card operation.
    ///
    /// The ignore set suppresses the plan regardless of outcome: the card
    /// side of the operation already succeeded, so a failed plan delete is
    /// logged and the stale plan stays hidden until the store confirms it
    /// gone.
    async fn teardown_plan(&mut self, plan_id: u64) {
        self.ignored_plans.insert(plan_id);
        self.stage_plan_removal(plan_id);
        match self.store.delete_plan(plan_id).await {
            Ok(()) => self.mark_clean(RecordKey::Plan(plan_id)),
            Err(e) => {
                warn!("plan {plan_id} could not be deleted during teardown, suppressing locally: {e}");
                self.revert_record(RecordKey::Plan(plan_id));
            }
        }
    }

    /// Writes a card state to the store with the mirror updated ahead of
    /// the write. A failure reverts this card record only.
    pub(crate) async fn persist_card(&mut self, card: KanbanCard) -> Result<()> {
        let CardKey::Real(id) = card.id else {
            return Ok(());
        };
        self.stage_card(card.clone());
        match self.store.update_card(card).await {
            Ok(()) => {
                self.mark_clean(RecordKey::Card(id));
                Ok(())
            }
            Err(e) => {
                self.revert_record(RecordKey::Card(id));
                Err(e)
            }
        }
    }

    /// Writes a plan state to the store with the mirror updated ahead of
    /// the write. A failure reverts this plan record only.
    pub(crate) async fn apply_plan_optimistic(&mut self, plan: Plan) -> Result<()> {
        let id = plan.id;
        self.stage_plan(plan.clone());
        match self.store.update_plan(plan).await {
            Ok(()) => {
                self.mark_clean(RecordKey::Plan(id));
                Ok(())
            }
            Err(e) => {
                self.revert_record(RecordKey::Plan(id));
                Err(e)
            }
        }
    }
}

/// Carries a card's edited fields over to its linked plan.
///
/// Time slots and `created_at` always survive from the existing plan.
/// Attachments move with the card only on the virtual-edit path, where the
/// projection is the plan's editing surface; a real card owns its own.
/// A due date displaces time slots, which cannot coexist with it.
pub(crate) fn plan_with_card_fields(
    existing: &Plan,
    card: &KanbanCard,
    adopt_attachments: bool,
) -> Plan {
    let date = card.start_date.unwrap_or(existing.date);
    Plan {
        id: existing.id,
        title: card.title.clone(),
        description: card.description.clone(),
        date,
        due_date: card.end_date,
        time_slots: if card.end_date.is_some() {
            Vec::new()
        } else {
            existing.time_slots.clone()
        },
        attachments: if adopt_attachments {
            card.attachments.clone()
        } else {
            existing.attachments.clone()
        },
        completed: card.status == CardStatus::Completed,
        created_at: existing.created_at,
    }
}
