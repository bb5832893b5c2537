//! # CMS Content
//!
//! This crate provides content entities and their publication lifecycle.
//!
//! ## Overview
//!
//! The cms-content crate handles:
//! - **Content**: Titled JSON payloads belonging to a space
//! - **Status**: Append-only publication status history
//! - **Tracker**: The [`PublicationTracker`] service, which stamps the
//!   first publication time of a content entity
//!
//! ## Lifecycle
//!
//! ```text
//! draft ─→ review ─→ published ─→ archived
//!   ↑                    │ first entry stamps published_at
//!   └────────────────────┘ (any status may follow any other)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use serde_json::json;
//! use uuid::Uuid;
//! use cms_content::{PublicationStatus, PublicationTracker};
//! use cms_store::{MemoryStore, SystemClock};
//!
//! async fn example() -> cms_content::ContentResult<()> {
//!     let tracker = PublicationTracker::new(Arc::new(MemoryStore::new()), Arc::new(SystemClock));
//!
//!     let content = tracker
//!         .create_content(Uuid::now_v7(), "Release notes", json!({"body": "..."}))
//!         .await?;
//!     tracker.set_status(content.id, "draft").await?;
//!     tracker.set_status(content.id, "published").await?;
//!
//!     assert_eq!(
//!         tracker.current_status(content.id).await?,
//!         Some(PublicationStatus::Published)
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! [`ContentConfig::from_env`] reads `CMS_CONTENT_MAX_TITLE_LENGTH` and
//! `CMS_CONTENT_REQUIRE_VALUE`.

pub mod config;
pub mod content;
pub mod error;
pub mod status;
pub mod tracker;

// Re-export main types for convenience
pub use config::{ConfigError, ContentConfig};
pub use content::{ContentEntity, ContentPatch};
pub use error::{ContentError, ContentResult};
pub use status::{validate_status, PublicationStatus, StatusRecord};
pub use tracker::PublicationTracker;
