//! Content entity
//!
//! A content entity is an opaque JSON payload with a title, belonging to a
//! space. It carries the first-publication timestamp.

use chrono::{DateTime, Utc};
use cms_store::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::config::ContentConfig;
use crate::error::{ContentError, ContentResult};
use crate::status::PublicationStatus;

/// A publishable content entity.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use serde_json::json;
/// use uuid::Uuid;
/// use cms_content::ContentEntity;
///
/// let content = ContentEntity::new(Uuid::now_v7(), "Hello", json!({"body": "hi"}), Utc::now());
/// assert!(content.published_at.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentEntity {
    /// Unique identifier for the content
    pub id: Uuid,

    /// Space the content belongs to
    pub space_id: Uuid,

    /// Title
    pub title: String,

    /// Opaque structured payload
    pub value: Value,

    /// When the content was created
    pub created_at: DateTime<Utc>,

    /// When the content was last updated
    pub updated_at: DateTime<Utc>,

    /// When the content was first published. Set once, never cleared.
    pub published_at: Option<DateTime<Utc>>,
}

impl ContentEntity {
    /// Creates a new, never-published content entity.
    pub fn new(
        space_id: Uuid,
        title: impl Into<String>,
        value: Value,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            space_id,
            title: title.into(),
            value,
            created_at: now,
            updated_at: now,
            published_at: None,
        }
    }

    /// Stamp `published_at` for a status transition, if this is the first
    /// move into `published`.
    ///
    /// Returns `true` when the timestamp was set.
    pub fn apply_status_change(
        &mut self,
        previous: Option<PublicationStatus>,
        new: PublicationStatus,
        now: DateTime<Utc>,
    ) -> bool {
        let entering_published =
            new.is_published() && previous != Some(PublicationStatus::Published);
        if !entering_published || self.published_at.is_some() {
            return false;
        }
        self.published_at = Some(now);
        self.updated_at = now;
        true
    }

    /// Check the pre-save rules.
    ///
    /// # Errors
    ///
    /// `Validation` if the title is too long, or if `require_value` is on
    /// and the value is null or an empty object.
    pub fn validate(&self, config: &ContentConfig) -> ContentResult<()> {
        if self.title.chars().count() > config.max_title_length {
            return Err(ContentError::Validation(format!(
                "title must be at most {} characters",
                config.max_title_length
            )));
        }
        if config.require_value && is_empty_value(&self.value) {
            return Err(ContentError::Validation("value is required".to_string()));
        }
        Ok(())
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

impl Record for ContentEntity {
    const KIND: &'static str = "content";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Field-by-field update of a content entity.
///
/// `None` leaves the field unchanged. `published_at` is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentPatch {
    /// New title
    pub title: Option<String>,

    /// New value
    pub value: Option<Value>,
}

impl ContentPatch {
    /// Check if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.value.is_none()
    }

    /// Apply the patch, touching `updated_at` when something changed.
    pub fn apply(self, content: &mut ContentEntity, now: DateTime<Utc>) {
        if self.is_empty() {
            return;
        }
        if let Some(title) = self.title {
            content.title = title;
        }
        if let Some(value) = self.value {
            content.value = value;
        }
        content.updated_at = now;
    }
}
