//! Tests for the data models.

use jiff::civil::date;
use jiff::Timestamp;

use super::*;

fn plan(id: u64, start: jiff::civil::Date, due: Option<jiff::civil::Date>) -> Plan {
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

fn card(id: CardKey) -> KanbanCard {
    KanbanCard {
        id,
        title: "Card".to_string(),
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
        linked_plan_id: None,
    }
}

#[test]
fn test_card_key_display() {
    assert_eq!(CardKey::Real(42).to_string(), "42");
    assert_eq!(CardKey::Virtual(7).to_string(), "plan-7");
}

#[test]
fn test_card_key_parse_round_trip() {
    let real: CardKey = "42".parse().expect("real key should parse");
    assert_eq!(real, CardKey::Real(42));

    let virt: CardKey = "plan-7".parse().expect("virtual key should parse");
    assert_eq!(virt, CardKey::Virtual(7));
    assert!(virt.is_virtual());
}

#[test]
fn test_card_key_parse_invalid() {
    assert!("".parse::<CardKey>().is_err());
    assert!("plan-".parse::<CardKey>().is_err());
    assert!("card-3".parse::<CardKey>().is_err());
}

#[test]
fn test_card_status_fixed_columns() {
    assert_eq!(CardStatus::from_name("inbox"), CardStatus::Inbox);
    assert_eq!(CardStatus::from_name("in-progress"), CardStatus::InProgress);
    assert_eq!(CardStatus::from_name("inprogress"), CardStatus::InProgress);
    assert_eq!(CardStatus::from_name("completed"), CardStatus::Completed);
    assert_eq!(CardStatus::InProgress.as_str(), "in-progress");
}

#[test]
fn test_card_status_unknown_is_custom_section() {
    let status = CardStatus::from_name("section-backlog");
    assert_eq!(status, CardStatus::Custom("section-backlog".to_string()));
    assert!(status.is_custom());
    assert_eq!(status.as_str(), "section-backlog");
}

#[test]
fn test_card_status_date_driven() {
    assert!(CardStatus::Inbox.is_date_driven());
    assert!(CardStatus::Pending.is_date_driven());
    assert!(CardStatus::InProgress.is_date_driven());
    assert!(!CardStatus::Completed.is_date_driven());
    assert!(!CardStatus::Custom("x".to_string()).is_date_driven());
}

#[test]
fn test_plan_end_date_defaults_to_start() {
    let single = plan(1, date(2024, 6, 10), None);
    assert!(!single.has_due_date());
    assert_eq!(single.end_date(), date(2024, 6, 10));

    let spanning = plan(2, date(2024, 6, 1), Some(date(2024, 6, 5)));
    assert!(spanning.has_due_date());
    assert_eq!(spanning.end_date(), date(2024, 6, 5));
}

#[test]
fn test_plan_filter_span_overlap() {
    let spanning = plan(1, date(2024, 6, 1), Some(date(2024, 6, 5)));

    // Every day within the span matches
    assert!(PlanFilter::on(date(2024, 6, 1)).matches(&spanning));
    assert!(PlanFilter::on(date(2024, 6, 3)).matches(&spanning));
    assert!(PlanFilter::on(date(2024, 6, 5)).matches(&spanning));

    // Days outside do not
    assert!(!PlanFilter::on(date(2024, 5, 31)).matches(&spanning));
    assert!(!PlanFilter::on(date(2024, 6, 6)).matches(&spanning));
}

#[test]
fn test_plan_filter_completion() {
    let mut p = plan(1, date(2024, 6, 1), None);
    p.completed = true;

    let completed_only = PlanFilter {
        completion: Some(CompletionFilter::Completed),
        ..Default::default()
    };
    let open_only = PlanFilter {
        completion: Some(CompletionFilter::Open),
        ..Default::default()
    };

    assert!(completed_only.matches(&p));
    assert!(!open_only.matches(&p));
}

#[test]
fn test_needs_real_backing() {
    let bare = card(CardKey::Virtual(1));
    assert!(!bare.needs_real_backing());

    let mut with_checklist = card(CardKey::Virtual(1));
    with_checklist.checklist.push(ChecklistItem {
        id: 1,
        text: "item".to_string(),
        done: false,
    });
    assert!(with_checklist.needs_real_backing());

    let mut with_comment = card(CardKey::Virtual(1));
    with_comment.comments.push(Comment {
        id: 1,
        text: "note".to_string(),
        marked_done: false,
        created_at: Timestamp::UNIX_EPOCH,
    });
    assert!(with_comment.needs_real_backing());

    let mut positioned = card(CardKey::Virtual(1));
    positioned.position = Some(1000.0);
    assert!(positioned.needs_real_backing());

    let mut completed = card(CardKey::Virtual(1));
    completed.status = CardStatus::Completed;
    assert!(completed.needs_real_backing());
}

#[test]
fn test_card_key_serde_as_string() {
    let json = serde_json::to_string(&CardKey::Virtual(3)).expect("serialize");
    assert_eq!(json, "\"plan-3\"");

    let key: CardKey = serde_json::from_str("\"15\"").expect("deserialize");
    assert_eq!(key, CardKey::Real(15));
}
