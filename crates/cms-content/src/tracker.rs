//! Publication lifecycle tracker
//!
//! The tracker owns content entities and their status history, and stamps
//! `published_at` the first time a content entity enters `published`.
//! Stamping is an explicit step of the status change, not a save hook.

use cms_store::{Clock, Filter, RecordStore, Transaction};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::ContentConfig;
use crate::content::{ContentEntity, ContentPatch};
use crate::error::{ContentError, ContentResult};
use crate::status::{validate_status, PublicationStatus, StatusRecord};

/// Service tracking content publication.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use serde_json::json;
/// use uuid::Uuid;
/// use cms_content::PublicationTracker;
/// use cms_store::{MemoryStore, SystemClock};
///
/// async fn example() -> cms_content::ContentResult<()> {
///     let tracker = PublicationTracker::new(Arc::new(MemoryStore::new()), Arc::new(SystemClock));
///
///     let content = tracker
///         .create_content(Uuid::now_v7(), "Launch", json!({"body": "We are live"}))
///         .await?;
///     tracker.set_status(content.id, "published").await?;
///
///     assert!(tracker.get_content(content.id).await?.published_at.is_some());
///     Ok(())
/// }
/// ```
pub struct PublicationTracker<S: RecordStore> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    config: ContentConfig,
}

impl<S: RecordStore> std::fmt::Debug for PublicationTracker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicationTracker")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S: RecordStore> PublicationTracker<S> {
    /// Create a tracker with default configuration.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self::with_config(store, clock, ContentConfig::default())
    }

    /// Create a tracker with explicit configuration.
    pub fn with_config(store: Arc<S>, clock: Arc<dyn Clock>, config: ContentConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    /// Create a content entity in a space.
    ///
    /// # Errors
    ///
    /// `Validation` if the title is too long or the value is required and
    /// empty.
    pub async fn create_content(
        &self,
        space_id: Uuid,
        title: &str,
        value: Value,
    ) -> ContentResult<ContentEntity> {
        let content = ContentEntity::new(space_id, title, value, self.clock.now());
        content.validate(&self.config)?;

        let mut tx = self.store.begin().await?;
        let content = tx.create(content).await?;
        tx.commit().await?;

        tracing::debug!(content_id = %content.id, space_id = %space_id, "Content created");
        Ok(content)
    }

    /// Fetch a content entity.
    pub async fn get_content(&self, content_id: Uuid) -> ContentResult<ContentEntity> {
        let mut tx = self.store.begin().await?;
        let content = require_content(&mut tx, content_id).await?;
        tx.rollback().await?;
        Ok(content)
    }

    /// Update title and/or value. `published_at` is never touched here.
    pub async fn update_content(
        &self,
        content_id: Uuid,
        patch: ContentPatch,
    ) -> ContentResult<ContentEntity> {
        let mut tx = self.store.begin().await?;
        let mut content = require_content(&mut tx, content_id).await?;

        patch.apply(&mut content, self.clock.now());
        content.validate(&self.config)?;
        let content = tx.update(content).await?;
        tx.commit().await?;
        Ok(content)
    }

    /// Delete a content entity together with its status history.
    pub async fn delete_content(&self, content_id: Uuid) -> ContentResult<()> {
        let mut tx = self.store.begin().await?;
        let content = require_content(&mut tx, content_id).await?;

        let history = history(&mut tx, content_id).await?;
        for record in &history {
            tx.delete(record).await?;
        }
        tx.delete(&content).await?;
        tx.commit().await?;

        tracing::info!(
            content_id = %content_id,
            status_records = history.len(),
            "Content deleted"
        );
        Ok(())
    }

    /// Apply the publication rule to a status transition.
    ///
    /// The rule is evaluated against the stored entity, not the caller's
    /// copy. If `new` is `published`, `previous` is not, and the stored
    /// entity has never been published, `published_at` is set to now and
    /// saved. Every other combination performs no write.
    ///
    /// Returns the stored content, updated or not.
    ///
    /// # Errors
    ///
    /// `NotFound` if the content entity no longer exists.
    pub async fn record_status_change(
        &self,
        content: ContentEntity,
        previous: Option<PublicationStatus>,
        new: PublicationStatus,
    ) -> ContentResult<ContentEntity> {
        let mut tx = self.store.begin().await?;
        let mut stored = require_content(&mut tx, content.id).await?;

        if !stored.apply_status_change(previous, new, self.clock.now()) {
            tx.rollback().await?;
            return Ok(stored);
        }
        let stored = tx.update(stored).await?;
        tx.commit().await?;

        log_published(&stored);
        Ok(stored)
    }

    /// Validate `value`, append it to the content's status history and
    /// apply the publication rule, all in one transaction.
    ///
    /// # Errors
    ///
    /// - `Validation` if `value` is not a known status; nothing is written
    /// - `NotFound` if the content entity does not exist
    pub async fn set_status(&self, content_id: Uuid, value: &str) -> ContentResult<StatusRecord> {
        let status = validate_status(value)?;

        let mut tx = self.store.begin().await?;
        let mut content = require_content(&mut tx, content_id).await?;
        let previous = latest(&mut tx, content_id).await?.map(|r| r.status);

        let now = self.clock.now();
        let record = tx.create(StatusRecord::new(content_id, status, now)).await?;
        let published = content.apply_status_change(previous, status, now);
        if published {
            content = tx.update(content).await?;
        }
        tx.commit().await?;

        tracing::info!(
            content_id = %content_id,
            from = previous.map(|s| s.as_str()).unwrap_or("none"),
            to = %status,
            "Publication status changed"
        );
        if published {
            log_published(&content);
        }
        Ok(record)
    }

    /// Current status: the most recent history entry, if any.
    pub async fn current_status(
        &self,
        content_id: Uuid,
    ) -> ContentResult<Option<PublicationStatus>> {
        let mut tx = self.store.begin().await?;
        require_content(&mut tx, content_id).await?;
        let current = latest(&mut tx, content_id).await?.map(|r| r.status);
        tx.rollback().await?;
        Ok(current)
    }

    /// Full status history, oldest first.
    pub async fn status_history(&self, content_id: Uuid) -> ContentResult<Vec<StatusRecord>> {
        let mut tx = self.store.begin().await?;
        require_content(&mut tx, content_id).await?;
        let records = history(&mut tx, content_id).await?;
        tx.rollback().await?;
        Ok(records)
    }
}

async fn require_content<T: Transaction>(tx: &mut T, id: Uuid) -> ContentResult<ContentEntity> {
    tx.get::<ContentEntity>(id)
        .await?
        .ok_or_else(|| ContentError::not_found("Content", id))
}

async fn history<T: Transaction>(
    tx: &mut T,
    content_id: Uuid,
) -> ContentResult<Vec<StatusRecord>> {
    Ok(tx
        .find_all::<StatusRecord>(&Filter::new().eq("content_id", content_id))
        .await?)
}

async fn latest<T: Transaction>(
    tx: &mut T,
    content_id: Uuid,
) -> ContentResult<Option<StatusRecord>> {
    Ok(history(tx, content_id).await?.pop())
}

fn log_published(content: &ContentEntity) {
    if let Some(published_at) = content.published_at {
        tracing::info!(
            content_id = %content.id,
            published_at = %published_at,
            "Content published"
        );
    }
}
