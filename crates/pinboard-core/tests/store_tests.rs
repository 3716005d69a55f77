use jiff::civil::{date, time};
use jiff::Timestamp;
use pinboard_core::{
    Attachment, AttachmentKind, BoardError, CardKey, CardStatus, ChecklistItem, Comment,
    KanbanCard, Plan, Store, TimeSlot,
};
use tempfile::TempDir;

fn test_store_path() -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("store_test.db");
    (temp_dir, db_path)
}

fn sample_plan() -> Plan {
    Plan {
        id: 0,
        title: "Conference".to_string(),
        description: Some("Annual developer conference".to_string()),
        date: date(2024, 6, 1),
        due_date: Some(date(2024, 6, 3)),
        time_slots: Vec::new(),
        attachments: vec![Attachment {
            id: 0,
            kind: AttachmentKind::Link,
            value: "https://example.com/schedule".to_string(),
        }],
        completed: false,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

fn sample_card() -> KanbanCard {
    KanbanCard {
        id: CardKey::Real(0),
        title: "Prepare talk".to_string(),
        description: None,
        status: CardStatus::Pending,
        start_date: None,
        end_date: None,
        time_slots: Vec::new(),
        checklist: vec![
            ChecklistItem {
                id: 0,
                text: "Outline".to_string(),
                done: true,
            },
            ChecklistItem {
                id: 0,
                text: "Slides".to_string(),
                done: false,
            },
        ],
        comments: vec![Comment {
            id: 0,
            text: "Aim for 25 minutes".to_string(),
            marked_done: false,
            created_at: Timestamp::UNIX_EPOCH,
        }],
        attachments: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        position: Some(1000.0),
        linked_plan_id: None,
    }
}

#[tokio::test]
async fn test_plan_round_trip_with_children() {
    let (_temp_dir, db_path) = test_store_path();
    let store = Store::open(&db_path).await.expect("Failed to open store");

    let created = store
        .insert_plan(sample_plan())
        .await
        .expect("Insert failed");
    assert!(created.id > 0);
    assert_eq!(created.attachments.len(), 1);
    assert!(created.attachments[0].id > 0);

    let plans = store.fetch_plans().await.expect("Fetch failed");
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].title, "Conference");
    assert_eq!(plans[0].date, date(2024, 6, 1));
    assert_eq!(plans[0].due_date, Some(date(2024, 6, 3)));
    assert_eq!(plans[0].attachments[0].value, "https://example.com/schedule");
}

#[tokio::test]
async fn test_update_plan_replaces_children() {
    let (_temp_dir, db_path) = test_store_path();
    let store = Store::open(&db_path).await.expect("Failed to open store");

    let mut plan = sample_plan();
    plan.due_date = None;
    let mut created = store.insert_plan(plan).await.expect("Insert failed");

    created.title = "Conference (moved)".to_string();
    created.attachments.clear();
    created.time_slots = vec![TimeSlot {
        id: 0,
        time: time(9, 30, 0, 0),
        description: Some("Keynote".to_string()),
    }];
    store
        .update_plan(created.clone())
        .await
        .expect("Update failed");

    let plans = store.fetch_plans().await.expect("Fetch failed");
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].title, "Conference (moved)");
    assert!(plans[0].attachments.is_empty());
    assert_eq!(plans[0].time_slots.len(), 1);
    assert_eq!(plans[0].time_slots[0].time, time(9, 30, 0, 0));
    assert_eq!(
        plans[0].time_slots[0].description.as_deref(),
        Some("Keynote")
    );
}

#[tokio::test]
async fn test_update_missing_plan_fails() {
    let (_temp_dir, db_path) = test_store_path();
    let store = Store::open(&db_path).await.expect("Failed to open store");

    let mut plan = sample_plan();
    plan.id = 4242;
    match store.update_plan(plan).await {
        Err(BoardError::PlanNotFound { id }) => assert_eq!(id, 4242),
        other => panic!("Expected PlanNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_plan_removes_children() {
    let (_temp_dir, db_path) = test_store_path();
    let store = Store::open(&db_path).await.expect("Failed to open store");

    let created = store
        .insert_plan(sample_plan())
        .await
        .expect("Insert failed");
    store.delete_plan(created.id).await.expect("Delete failed");

    assert!(store.fetch_plans().await.expect("Fetch failed").is_empty());

    match store.delete_plan(created.id).await {
        Err(BoardError::PlanNotFound { .. }) => {}
        other => panic!("Expected PlanNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_card_round_trip_with_children() {
    let (_temp_dir, db_path) = test_store_path();
    let store = Store::open(&db_path).await.expect("Failed to open store");

    let created = store
        .insert_card(sample_card())
        .await
        .expect("Insert failed");
    assert!(!created.is_virtual());
    assert_eq!(created.checklist.len(), 2);
    assert!(created.checklist[0].id > 0);

    let cards = store.fetch_cards().await.expect("Fetch failed");
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].title, "Prepare talk");
    assert_eq!(cards[0].status, CardStatus::Pending);
    assert_eq!(cards[0].position, Some(1000.0));
    assert_eq!(cards[0].checklist[0].text, "Outline");
    assert!(cards[0].checklist[0].done);
    assert_eq!(cards[0].comments[0].text, "Aim for 25 minutes");
}

#[tokio::test]
async fn test_update_card_replaces_children() {
    let (_temp_dir, db_path) = test_store_path();
    let store = Store::open(&db_path).await.expect("Failed to open store");

    let mut created = store
        .insert_card(sample_card())
        .await
        .expect("Insert failed");

    created.status = CardStatus::Custom("col-review".to_string());
    created.checklist = vec![ChecklistItem {
        id: 0,
        text: "Rehearse".to_string(),
        done: false,
    }];
    created.comments.clear();
    store
        .update_card(created.clone())
        .await
        .expect("Update failed");

    let cards = store.fetch_cards().await.expect("Fetch failed");
    assert_eq!(cards.len(), 1);
    assert_eq!(
        cards[0].status,
        CardStatus::Custom("col-review".to_string())
    );
    assert_eq!(cards[0].checklist.len(), 1);
    assert_eq!(cards[0].checklist[0].text, "Rehearse");
    assert!(cards[0].comments.is_empty());
}

#[tokio::test]
async fn test_virtual_card_is_rejected() {
    let (_temp_dir, db_path) = test_store_path();
    let store = Store::open(&db_path).await.expect("Failed to open store");

    let mut card = sample_card();
    card.id = CardKey::Virtual(7);
    match store.update_card(card).await {
        Err(BoardError::CardNotFound { key }) => assert_eq!(key, CardKey::Virtual(7)),
        other => panic!("Expected CardNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_mutations_publish_change_events() {
    let (_temp_dir, db_path) = test_store_path();
    let store = Store::open(&db_path).await.expect("Failed to open store");
    let mut changes = store.subscribe();

    store
        .insert_plan(sample_plan())
        .await
        .expect("Insert failed");
    store
        .insert_card(sample_card())
        .await
        .expect("Insert failed");

    let first = changes.recv().await.expect("Missing change event");
    let second = changes.recv().await.expect("Missing change event");
    assert_eq!(first.table, pinboard_core::store::Table::Plans);
    assert_eq!(second.table, pinboard_core::store::Table::Cards);
}

#[tokio::test]
async fn test_store_persists_across_reopen() {
    let (_temp_dir, db_path) = test_store_path();

    {
        let store = Store::open(&db_path).await.expect("Failed to open store");
        store
            .insert_plan(sample_plan())
            .await
            .expect("Insert failed");
    }

    let store = Store::open(&db_path).await.expect("Failed to reopen store");
    let plans = store.fetch_plans().await.expect("Fetch failed");
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].title, "Conference");
}
