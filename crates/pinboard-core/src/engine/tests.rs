use std::collections::HashSet;

use jiff::civil::{date, Date};
use jiff::Timestamp;

use super::derive::{derive_board, derive_status, virtual_card};
use super::ordering::position_between;
use super::routing::plan_with_card_fields;
use crate::models::{CardKey, CardStatus, KanbanCard, Plan};

fn plan(id: u64, start: Date, due: Option<Date>) -> Plan {
    Plan {
        id,
        title: format!("Plan {id}"),
        description: None,
        date: start,
        due_date: due,
        time_slots: Vec::new(),
        attachments: Vec::new(),
        completed: false,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

fn card(id: u64, linked_plan_id: Option<u64>) -> KanbanCard {
    KanbanCard {
        id: CardKey::Real(id),
        title: format!("Card {id}"),
        description: None,
        status: CardStatus::Inbox,
        start_date: None,
        end_date: None,
        time_slots: Vec::new(),
        checklist: Vec::new(),
        comments: Vec::new(),
        attachments: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        position: None,
        linked_plan_id,
    }
}

#[test]
fn test_status_starting_today_is_in_progress() {
    let today = date(2024, 6, 10);
    assert_eq!(
        derive_status(date(2024, 6, 10), None, false, today),
        CardStatus::InProgress
    );
}

#[test]
fn test_status_overdue_span_stays_in_progress() {
    // Overdue-but-visible: a span that ended stays in the active column
    let today = date(2024, 6, 10);
    assert_eq!(
        derive_status(date(2024, 6, 1), Some(date(2024, 6, 5)), false, today),
        CardStatus::InProgress
    );
}

#[test]
fn test_status_future_start_is_pending() {
    let today = date(2024, 6, 10);
    assert_eq!(
        derive_status(date(2024, 7, 1), None, false, today),
        CardStatus::Pending
    );
}

#[test]
fn test_status_due_today_not_yet_overdue() {
    let today = date(2024, 6, 10);
    assert_eq!(
        derive_status(date(2024, 6, 1), Some(date(2024, 6, 10)), false, today),
        CardStatus::InProgress
    );
}

#[test]
fn test_status_completed_wins_over_dates() {
    let today = date(2024, 6, 10);
    assert_eq!(
        derive_status(date(2024, 7, 1), None, true, today),
        CardStatus::Completed
    );
}

#[test]
fn test_derive_board_deduplicates_linked_plan() {
    let today = date(2024, 6, 10);
    let plans = vec![plan(1, today, None)];
    let cards = vec![card(10, Some(1))];

    let view = derive_board(&plans, &cards, &HashSet::new(), today);

    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, CardKey::Real(10));
    // Plan-derived fields overlaid onto the linked card
    assert_eq!(view[0].start_date, Some(today));
    assert_eq!(view[0].status, CardStatus::InProgress);
}

#[test]
fn test_derive_board_projects_unlinked_plan() {
    let today = date(2024, 6, 10);
    let plans = vec![plan(1, date(2024, 7, 1), None)];

    let view = derive_board(&plans, &[], &HashSet::new(), today);

    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, CardKey::Virtual(1));
    assert_eq!(view[0].status, CardStatus::Pending);
    assert!(view[0].checklist.is_empty());
    assert!(view[0].position.is_none());
}

#[test]
fn test_derive_board_ignored_plan_suppressed() {
    let today = date(2024, 6, 10);
    let plans = vec![plan(1, today, None), plan(2, today, None)];
    let ignored: HashSet<u64> = [2].into_iter().collect();

    let view = derive_board(&plans, &[], &ignored, today);

    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, CardKey::Virtual(1));
}

#[test]
fn test_derive_board_drops_torn_down_link() {
    // The referenced plan is gone: the card's link was torn down and the
    // card stays out of the view
    let today = date(2024, 6, 10);
    let cards = vec![card(10, Some(99)), card(11, None)];

    let view = derive_board(&[], &cards, &HashSet::new(), today);

    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, CardKey::Real(11));
}

#[test]
fn test_derive_board_one_card_per_plan() {
    let today = date(2024, 6, 10);
    let plans = vec![plan(1, today, None)];
    let cards = vec![card(10, Some(1)), card(11, Some(1))];

    let view = derive_board(&plans, &cards, &HashSet::new(), today);

    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, CardKey::Real(10));
}

#[test]
fn test_derive_board_keeps_custom_status() {
    let today = date(2024, 6, 10);
    let plans = vec![plan(1, today, None)];
    let mut linked = card(10, Some(1));
    linked.status = CardStatus::Custom("col-review".to_string());

    let view = derive_board(&plans, &[linked], &HashSet::new(), today);

    assert_eq!(view[0].status, CardStatus::Custom("col-review".to_string()));
}

#[test]
fn test_position_empty_column() {
    assert_eq!(position_between(None, None), 1000.0);
}

#[test]
fn test_position_above_first() {
    assert_eq!(position_between(None, Some(1000.0)), 500.0);
}

#[test]
fn test_position_append() {
    assert_eq!(position_between(Some(2000.0), None), 3000.0);
}

#[test]
fn test_position_between_neighbors() {
    let p = position_between(Some(1000.0), Some(2000.0));
    assert!(1000.0 < p && p < 2000.0);
    assert_eq!(p, 1500.0);
}

#[test]
fn test_plan_survives_virtual_round_trip() {
    // Editing nothing on the projection must write the same plan back
    let today = date(2024, 6, 10);
    let original = plan(1, date(2024, 6, 1), Some(date(2024, 6, 5)));
    let projection = virtual_card(&original, today);

    let written = plan_with_card_fields(&original, &projection, true);

    assert_eq!(written, original);
}

#[test]
fn test_due_date_displaces_time_slots() {
    let today = date(2024, 6, 10);
    let mut original = plan(1, date(2024, 6, 1), None);
    original.time_slots = vec![crate::models::TimeSlot {
        id: 1,
        time: jiff::civil::time(9, 0, 0, 0),
        description: None,
    }];

    let mut edited = virtual_card(&original, today);
    edited.end_date = Some(date(2024, 6, 5));

    let written = plan_with_card_fields(&original, &edited, true);

    assert_eq!(written.due_date, Some(date(2024, 6, 5)));
    assert!(written.time_slots.is_empty());
}
