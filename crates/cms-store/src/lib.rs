//! # CMS Store
//!
//! This crate provides the persistence seam for the CMS core crates.
//! Domain services never talk to a database directly; they go through the
//! [`RecordStore`] and [`Transaction`] traits defined here.
//!
//! ## Overview
//!
//! The cms-store crate handles:
//! - **Records**: The [`Record`] trait implemented by every persisted entity
//! - **Filters**: Field-equality queries evaluated against serialized records
//! - **Transactions**: Atomic scopes with commit and rollback-on-drop
//! - **Memory Backend**: A serializable in-process store for tests and tools
//! - **Clock**: Injectable time source for deterministic timestamps
//!
//! ## Architecture
//!
//! ```text
//! MembershipManager / PublicationTracker
//!   └─ RecordStore::begin()
//!        └─ Transaction
//!             ├─ find_one / find_all (Filter)
//!             ├─ create / update / delete
//!             └─ commit | rollback | drop (= rollback)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cms_store::{Filter, MemoryStore, Record, RecordStore, Transaction};
//! use serde::{Deserialize, Serialize};
//! use uuid::Uuid;
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Note {
//!     id: Uuid,
//!     body: String,
//! }
//!
//! impl Record for Note {
//!     const KIND: &'static str = "note";
//!     fn id(&self) -> Uuid {
//!         self.id
//!     }
//! }
//!
//! async fn example() -> cms_store::StoreResult<()> {
//!     let store = MemoryStore::new();
//!     let mut tx = store.begin().await?;
//!     tx.create(Note { id: Uuid::now_v7(), body: "hello".into() }).await?;
//!     let notes: Vec<Note> = tx.find_all(&Filter::new().eq("body", "hello")).await?;
//!     assert_eq!(notes.len(), 1);
//!     tx.commit().await
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `memory` (default): In-memory transactional backend

pub mod clock;
pub mod error;
pub mod filter;
#[cfg(feature = "memory")]
pub mod memory;
pub mod record;
pub mod store;

// Re-export main types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{StoreError, StoreResult};
pub use filter::Filter;
#[cfg(feature = "memory")]
pub use memory::{MemoryStore, MemoryTransaction};
pub use record::Record;
pub use store::{RecordStore, Transaction};
