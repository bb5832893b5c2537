//! In-memory record store
//!
//! This module provides a transactional in-process store. It is suitable for
//! tests, tooling and single-process deployments; production deployments plug
//! a database-backed [`RecordStore`] in its place.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::filter::Filter;
use crate::record::Record;
use crate::store::{RecordStore, Transaction};

/// A stored row: primary key plus serialized record.
#[derive(Debug, Clone)]
struct Row {
    id: Uuid,
    value: Value,
}

/// All tables, keyed by record kind. Rows keep insertion order.
type Tables = HashMap<&'static str, Vec<Row>>;

/// In-memory record store implementation.
///
/// Transactions are fully serialized: [`RecordStore::begin`] waits for the
/// previous transaction to finish, then works on a private copy of the
/// tables. Commit swaps the copy in; rollback or drop throws it away.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    type Tx = MemoryTransaction;

    async fn begin(&self) -> StoreResult<MemoryTransaction> {
        let guard = self.tables.clone().lock_owned().await;
        let working = guard.clone();
        tracing::debug!("Memory transaction started");
        Ok(MemoryTransaction {
            guard: Some(guard),
            working,
        })
    }
}

/// Transaction over a [`MemoryStore`].
///
/// Holds the store lock for its whole lifetime.
pub struct MemoryTransaction {
    guard: Option<OwnedMutexGuard<Tables>>,
    working: Tables,
}

impl std::fmt::Debug for MemoryTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryTransaction")
            .field("open", &self.guard.is_some())
            .finish()
    }
}

impl MemoryTransaction {
    fn table(&self, kind: &'static str) -> &[Row] {
        self.working.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }

    fn decode<R: Record>(row: &Row) -> StoreResult<R> {
        Ok(serde_json::from_value(row.value.clone())?)
    }

    /// Reject `value` if another row (other than `id`) shares a unique key.
    fn check_unique<R: Record>(&self, id: Uuid, value: &Value) -> StoreResult<()> {
        for key in R::unique_keys() {
            let clash = self.table(R::KIND).iter().any(|row| {
                row.id != id && key.iter().all(|field| row.value.get(field) == value.get(field))
            });
            if clash {
                return Err(StoreError::UniqueViolation {
                    kind: R::KIND,
                    fields: key.join(", "),
                });
            }
        }
        Ok(())
    }
}

fn not_found<R: Record>(id: Uuid) -> StoreError {
    StoreError::NotFound {
        kind: R::KIND,
        id: id.to_string(),
    }
}

#[async_trait]
impl Transaction for MemoryTransaction {
    async fn find_one<R: Record>(&mut self, filter: &Filter) -> StoreResult<Option<R>> {
        self.table(R::KIND)
            .iter()
            .find(|row| filter.matches(&row.value))
            .map(|row| Self::decode::<R>(row))
            .transpose()
    }

    async fn find_all<R: Record>(&mut self, filter: &Filter) -> StoreResult<Vec<R>> {
        self.table(R::KIND)
            .iter()
            .filter(|row| filter.matches(&row.value))
            .map(|row| Self::decode::<R>(row))
            .collect()
    }

    async fn create<R: Record>(&mut self, record: R) -> StoreResult<R> {
        let id = record.id();
        if self.table(R::KIND).iter().any(|row| row.id == id) {
            return Err(StoreError::UniqueViolation {
                kind: R::KIND,
                fields: "id".to_string(),
            });
        }

        let value = serde_json::to_value(&record)?;
        self.check_unique::<R>(id, &value)?;

        self.working
            .entry(R::KIND)
            .or_default()
            .push(Row { id, value });
        Ok(record)
    }

    async fn update<R: Record>(&mut self, record: R) -> StoreResult<R> {
        let id = record.id();
        let value = serde_json::to_value(&record)?;
        self.check_unique::<R>(id, &value)?;

        let row = self
            .working
            .get_mut(R::KIND)
            .and_then(|rows| rows.iter_mut().find(|row| row.id == id))
            .ok_or_else(|| not_found::<R>(id))?;
        row.value = value;
        Ok(record)
    }

    async fn delete<R: Record>(&mut self, record: &R) -> StoreResult<()> {
        let id = record.id();
        let rows = self
            .working
            .get_mut(R::KIND)
            .ok_or_else(|| not_found::<R>(id))?;
        let index = rows
            .iter()
            .position(|row| row.id == id)
            .ok_or_else(|| not_found::<R>(id))?;
        rows.remove(index);
        Ok(())
    }

    async fn commit(mut self) -> StoreResult<()> {
        let mut guard = self
            .guard
            .take()
            .ok_or_else(|| StoreError::Backend("transaction already closed".to_string()))?;
        *guard = std::mem::take(&mut self.working);
        tracing::debug!("Memory transaction committed");
        Ok(())
    }

    async fn rollback(mut self) -> StoreResult<()> {
        self.guard.take();
        tracing::debug!("Memory transaction rolled back");
        Ok(())
    }
}

impl Drop for MemoryTransaction {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Memory transaction dropped without commit, discarding writes");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Seat {
        id: Uuid,
        room: String,
        number: u32,
        holder: Option<String>,
    }

    impl Seat {
        fn new(room: &str, number: u32) -> Self {
            Self {
                id: Uuid::now_v7(),
                room: room.to_string(),
                number,
                holder: None,
            }
        }
    }

    impl Record for Seat {
        const KIND: &'static str = "seat";

        fn id(&self) -> Uuid {
            self.id
        }

        fn unique_keys() -> &'static [&'static [&'static str]] {
            &[&["room", "number"]]
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = MemoryStore::new();
        let mut tx = store.begin().await.unwrap();

        let a = tx.create(Seat::new("north", 1)).await.unwrap();
        tx.create(Seat::new("north", 2)).await.unwrap();
        tx.create(Seat::new("south", 1)).await.unwrap();

        let north: Vec<Seat> = tx.find_all(&Filter::new().eq("room", "north")).await.unwrap();
        assert_eq!(north.len(), 2);
        assert_eq!(north[0], a);

        let found: Option<Seat> = tx.get(a.id).await.unwrap();
        assert_eq!(found, Some(a));

        let missing: Option<Seat> = tx.get(Uuid::now_v7()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_commit_publishes_writes() {
        let store = MemoryStore::new();

        let mut tx = store.begin().await.unwrap();
        let seat = tx.create(Seat::new("north", 1)).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = store.begin().await.unwrap();
        let found: Option<Seat> = tx.get(seat.id).await.unwrap();
        assert_eq!(found, Some(seat));
    }

    #[tokio::test]
    async fn test_drop_discards_writes() {
        let store = MemoryStore::new();

        {
            let mut tx = store.begin().await.unwrap();
            tx.create(Seat::new("north", 1)).await.unwrap();
        }

        let mut tx = store.begin().await.unwrap();
        assert_eq!(tx.count::<Seat>(&Filter::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_rollback_discards_writes() {
        let store = MemoryStore::new();

        let mut tx = store.begin().await.unwrap();
        tx.create(Seat::new("north", 1)).await.unwrap();
        tx.rollback().await.unwrap();

        let mut tx = store.begin().await.unwrap();
        assert_eq!(tx.count::<Seat>(&Filter::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unique_key_enforced_on_create_and_update() {
        let store = MemoryStore::new();
        let mut tx = store.begin().await.unwrap();

        tx.create(Seat::new("north", 1)).await.unwrap();
        let err = tx.create(Seat::new("north", 1)).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { kind: "seat", .. }));

        let mut second = tx.create(Seat::new("north", 2)).await.unwrap();
        second.number = 1;
        let err = tx.update(second.clone()).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));

        // Updating a record onto its own key is fine.
        second.number = 2;
        second.holder = Some("ada".to_string());
        tx.update(second).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_record() {
        let store = MemoryStore::new();
        let mut tx = store.begin().await.unwrap();
        let ghost = Seat::new("north", 9);

        let err = tx.update(ghost.clone()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "seat", .. }));

        let err = tx.delete(&ghost).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = MemoryStore::new();
        let mut tx = store.begin().await.unwrap();

        let seat = tx.create(Seat::new("north", 1)).await.unwrap();
        tx.delete(&seat).await.unwrap();

        let found: Option<Seat> = tx.get(seat.id).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_transactions_are_serialized() {
        let store = MemoryStore::new();
        let tx = store.begin().await.unwrap();

        let contender = store.clone();
        let waiting = tokio::spawn(async move { contender.begin().await.map(|_| ()) });

        tokio::task::yield_now().await;
        assert!(!waiting.is_finished());

        drop(tx);
        waiting.await.unwrap().unwrap();
    }
}
