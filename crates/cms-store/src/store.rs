//! Record store and transaction traits
//!
//! Every read and write goes through a [`Transaction`]. A transaction is an
//! atomic scope: its writes become visible together on [`Transaction::commit`],
//! and dropping it without committing discards them.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::filter::Filter;
use crate::record::Record;

/// Record store trait for opening transactions.
///
/// Implementations must serialize conflicting transactions (row or table
/// locking, or an equivalent isolation level) so that concurrent callers
/// never observe a partially applied transaction.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Transaction type produced by this store
    type Tx: Transaction;

    /// Open a new transaction.
    async fn begin(&self) -> StoreResult<Self::Tx>;
}

/// Transaction trait for record operations.
#[async_trait]
pub trait Transaction: Send {
    /// Find the first record (in insertion order) matching the filter.
    async fn find_one<R: Record>(&mut self, filter: &Filter) -> StoreResult<Option<R>>;

    /// Find all records matching the filter, in insertion order.
    async fn find_all<R: Record>(&mut self, filter: &Filter) -> StoreResult<Vec<R>>;

    /// Insert a new record.
    ///
    /// Fails with `UniqueViolation` if the id or a declared unique key is
    /// already taken.
    async fn create<R: Record>(&mut self, record: R) -> StoreResult<R>;

    /// Replace an existing record, matched by id.
    ///
    /// Fails with `NotFound` if no record has this id.
    async fn update<R: Record>(&mut self, record: R) -> StoreResult<R>;

    /// Delete an existing record, matched by id.
    ///
    /// Fails with `NotFound` if no record has this id.
    async fn delete<R: Record>(&mut self, record: &R) -> StoreResult<()>;

    /// Publish all writes of this transaction atomically.
    async fn commit(self) -> StoreResult<()>;

    /// Discard all writes of this transaction.
    async fn rollback(self) -> StoreResult<()>;

    /// Fetch a record by primary key.
    async fn get<R: Record>(&mut self, id: Uuid) -> StoreResult<Option<R>> {
        self.find_one(&Filter::by_id(id)).await
    }

    /// Count records matching the filter.
    async fn count<R: Record>(&mut self, filter: &Filter) -> StoreResult<usize> {
        Ok(self.find_all::<R>(filter).await?.len())
    }
}
