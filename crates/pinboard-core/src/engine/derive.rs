//! Pure derivation of the unified board view and of date-based status.
//!
//! Everything here is side-effect free: the functions take the mirrors
//! and a "today" and return values. Re-run on every mirror or ignore-set
//! change; never during it.

use std::collections::HashSet;

use jiff::civil::Date;

use crate::models::{CardKey, CardStatus, KanbanCard, Plan};

/// Computes the column for an item from its date span and completion flag.
///
/// Overdue uses a calendar-day comparison: an item due today is not
/// overdue until the day has fully elapsed. Overdue items stay in the
/// in-progress column rather than being archived out of sight.
pub fn derive_status(date: Date, due_date: Option<Date>, completed: bool, today: Date) -> CardStatus {
    if completed {
        return CardStatus::Completed;
    }

    let start = date;
    let end = due_date.unwrap_or(start);

    if end < today {
        // Overdue but visible
        return CardStatus::InProgress;
    }
    if start <= today && today <= end {
        return CardStatus::InProgress;
    }
    if start > today {
        return CardStatus::Pending;
    }

    // No forward-looking or active date range
    CardStatus::Inbox
}

/// Derives the UI-facing list: real cards plus virtual projections of
/// plans that have no linked real card, de-duplicated by plan id.
///
/// Real cards whose link names a missing or ignored plan are dropped from
/// the view; the link was torn down and the card is not shown until
/// deliberately recreated.
pub fn derive_board(
    plans: &[Plan],
    cards: &[KanbanCard],
    ignored: &HashSet<u64>,
    today: Date,
) -> Vec<KanbanCard> {
    let live: HashSet<u64> = plans
        .iter()
        .map(|p| p.id)
        .filter(|id| !ignored.contains(id))
        .collect();

    let mut view: Vec<KanbanCard> = Vec::with_capacity(cards.len() + plans.len());
    let mut linked: HashSet<u64> = HashSet::new();

    for card in cards {
        match card.linked_plan_id {
            Some(plan_id) => {
                // Torn-down links and duplicate links (at most one real
                // card may reference a plan) are filtered out here
                if live.contains(&plan_id) && linked.insert(plan_id) {
                    view.push(card.clone());
                }
            }
            None => view.push(card.clone()),
        }
    }

    for plan in plans {
        if ignored.contains(&plan.id) {
            continue;
        }
        if linked.contains(&plan.id) {
            if let Some(card) = view
                .iter_mut()
                .find(|c| c.linked_plan_id == Some(plan.id))
            {
                overlay_plan(card, plan, today);
            }
        } else {
            view.push(virtual_card(plan, today));
        }
    }

    view
}

/// Overlays plan-derived fields onto an existing linked card.
///
/// The card keeps the fields it independently owns: a custom or completed
/// status, and a manual position when one is set. Time slots and the
/// schedule always come from the plan.
fn overlay_plan(card: &mut KanbanCard, plan: &Plan, today: Date) {
    card.time_slots = plan.time_slots.clone();
    card.start_date = Some(plan.date);
    card.end_date = plan.due_date;

    if card.status.is_date_driven() {
        card.status = derive_status(plan.date, plan.due_date, plan.completed, today);
    }
}

/// Materializes the card-shaped projection of a plan with no linked real
/// card. Never persisted; synthesized on every derivation pass.
pub fn virtual_card(plan: &Plan, today: Date) -> KanbanCard {
    KanbanCard {
        id: CardKey::Virtual(plan.id),
        title: plan.title.clone(),
        description: plan.description.clone(),
        status: derive_status(plan.date, plan.due_date, plan.completed, today),
        start_date: Some(plan.date),
        end_date: plan.due_date,
        time_slots: plan.time_slots.clone(),
        checklist: Vec::new(),
        comments: Vec::new(),
        attachments: plan.attachments.clone(),
        created_at: plan.created_at,
        position: None,
        linked_plan_id: Some(plan.id),
    }
}
