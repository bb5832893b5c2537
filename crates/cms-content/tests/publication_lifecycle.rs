//! End-to-end publication lifecycle scenarios against the memory store.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use cms_content::{
    ContentEntity, ContentError, ContentPatch, PublicationStatus, PublicationTracker,
    StatusRecord,
};
use cms_store::{Clock, Filter, ManualClock, MemoryStore, RecordStore, Transaction};
use serde_json::json;
use uuid::Uuid;

struct Harness {
    store: Arc<MemoryStore>,
    clock: Arc<ManualClock>,
    tracker: PublicationTracker<MemoryStore>,
}

fn harness() -> Harness {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 2, 21, 7, 29, 0).unwrap(),
    ));
    let tracker = PublicationTracker::new(store.clone(), clock.clone());
    Harness {
        store,
        clock,
        tracker,
    }
}

async fn stored_status_records(store: &MemoryStore) -> Vec<StatusRecord> {
    let mut tx = store.begin().await.unwrap();
    let records = tx.find_all::<StatusRecord>(&Filter::new()).await.unwrap();
    tx.rollback().await.unwrap();
    records
}

#[tokio::test]
async fn draft_publish_archive_republish_keeps_first_timestamp() {
    let h = harness();
    let content = h
        .tracker
        .create_content(Uuid::now_v7(), "Launch", json!({"body": "hello"}))
        .await
        .unwrap();

    h.tracker.set_status(content.id, "draft").await.unwrap();
    assert!(h.tracker.get_content(content.id).await.unwrap().published_at.is_none());

    h.clock.advance(Duration::hours(1));
    let t1 = h.clock.now();
    h.tracker.set_status(content.id, "published").await.unwrap();
    assert_eq!(
        h.tracker.get_content(content.id).await.unwrap().published_at,
        Some(t1)
    );

    h.clock.advance(Duration::hours(1));
    h.tracker.set_status(content.id, "archived").await.unwrap();
    assert_eq!(
        h.tracker.get_content(content.id).await.unwrap().published_at,
        Some(t1)
    );

    h.clock.advance(Duration::hours(1));
    h.tracker.set_status(content.id, "published").await.unwrap();
    assert_eq!(
        h.tracker.get_content(content.id).await.unwrap().published_at,
        Some(t1)
    );

    let statuses: Vec<_> = h
        .tracker
        .status_history(content.id)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.status)
        .collect();
    assert_eq!(
        statuses,
        vec![
            PublicationStatus::Draft,
            PublicationStatus::Published,
            PublicationStatus::Archived,
            PublicationStatus::Published,
        ]
    );
}

#[tokio::test]
async fn bogus_status_is_rejected_and_nothing_is_written() {
    let h = harness();
    let content = h
        .tracker
        .create_content(Uuid::now_v7(), "Launch", json!({"body": "hello"}))
        .await
        .unwrap();

    let err = h.tracker.set_status(content.id, "bogus").await.unwrap_err();

    assert!(matches!(err, ContentError::Validation(_)));
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
    assert!(stored_status_records(&h.store).await.is_empty());
    assert_eq!(h.tracker.current_status(content.id).await.unwrap(), None);
}

#[tokio::test]
async fn resaving_published_content_does_not_move_timestamp() {
    let h = harness();
    let content = h
        .tracker
        .create_content(Uuid::now_v7(), "Launch", json!({"body": "hello"}))
        .await
        .unwrap();
    h.tracker.set_status(content.id, "published").await.unwrap();
    let first = h.tracker.get_content(content.id).await.unwrap();

    h.clock.advance(Duration::days(2));
    let resaved = h
        .tracker
        .record_status_change(
            first.clone(),
            Some(PublicationStatus::Published),
            PublicationStatus::Published,
        )
        .await
        .unwrap();
    assert_eq!(resaved.published_at, first.published_at);

    let edited = h
        .tracker
        .update_content(
            content.id,
            ContentPatch {
                title: Some("Launch (updated)".to_string()),
                value: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.published_at, first.published_at);
    assert!(edited.updated_at > first.updated_at);
}

#[tokio::test]
async fn record_status_change_stamps_entity_never_published() {
    let h = harness();
    let content = h
        .tracker
        .create_content(Uuid::now_v7(), "Launch", json!({"body": "hello"}))
        .await
        .unwrap();

    // Archived content that was never published gets stamped on its first publish
    h.clock.advance(Duration::minutes(30));
    let published: ContentEntity = h
        .tracker
        .record_status_change(
            content,
            Some(PublicationStatus::Archived),
            PublicationStatus::Published,
        )
        .await
        .unwrap();

    assert_eq!(published.published_at, Some(h.clock.now()));
}

#[tokio::test]
async fn delete_content_removes_only_its_history() {
    let h = harness();
    let space_id = Uuid::now_v7();
    let doomed = h
        .tracker
        .create_content(space_id, "Doomed", json!({"a": 1}))
        .await
        .unwrap();
    let kept = h
        .tracker
        .create_content(space_id, "Kept", json!({"b": 2}))
        .await
        .unwrap();
    h.tracker.set_status(doomed.id, "draft").await.unwrap();
    h.tracker.set_status(doomed.id, "review").await.unwrap();
    h.tracker.set_status(kept.id, "published").await.unwrap();

    h.tracker.delete_content(doomed.id).await.unwrap();

    let remaining = stored_status_records(&h.store).await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].content_id, kept.id);
    assert_eq!(
        h.tracker.current_status(kept.id).await.unwrap(),
        Some(PublicationStatus::Published)
    );
}

#[tokio::test]
async fn status_change_with_outdated_copy_keeps_stamp_and_edits() {
    let h = harness();
    let copy = h
        .tracker
        .create_content(Uuid::now_v7(), "Launch", json!({"body": "hello"}))
        .await
        .unwrap();

    h.clock.advance(Duration::hours(1));
    let t1 = h.clock.now();
    h.tracker.set_status(copy.id, "published").await.unwrap();
    h.tracker
        .update_content(
            copy.id,
            ContentPatch {
                title: Some("Edited".to_string()),
                value: Some(json!({"body": "edited"})),
            },
        )
        .await
        .unwrap();

    // `copy` still has no published_at and the original title
    h.clock.advance(Duration::hours(1));
    h.tracker
        .record_status_change(
            copy.clone(),
            Some(PublicationStatus::Draft),
            PublicationStatus::Published,
        )
        .await
        .unwrap();

    let stored = h.tracker.get_content(copy.id).await.unwrap();
    assert_eq!(stored.published_at, Some(t1));
    assert_eq!(stored.title, "Edited");
    assert_eq!(stored.value, json!({"body": "edited"}));
}
