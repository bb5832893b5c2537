//! Publication status
//!
//! A content entity's status is tracked as an append-only history of
//! [`StatusRecord`]s. The current status is the most recently created record.

use chrono::{DateTime, Utc};
use cms_store::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{ContentError, ContentResult};

/// Publication status of a content entity.
///
/// Any status may follow any other; only the first move into
/// [`Published`](PublicationStatus::Published) has a side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    /// Work in progress
    Draft,
    /// Awaiting review
    Review,
    /// Publicly visible
    Published,
    /// Withdrawn from publication
    Archived,
}

impl PublicationStatus {
    /// Parse the stored lowercase form. Matching is exact.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(PublicationStatus::Draft),
            "review" => Some(PublicationStatus::Review),
            "published" => Some(PublicationStatus::Published),
            "archived" => Some(PublicationStatus::Archived),
            _ => None,
        }
    }

    /// Get the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationStatus::Draft => "draft",
            PublicationStatus::Review => "review",
            PublicationStatus::Published => "published",
            PublicationStatus::Archived => "archived",
        }
    }

    /// Check if this is the published status.
    pub fn is_published(&self) -> bool {
        matches!(self, PublicationStatus::Published)
    }
}

impl Default for PublicationStatus {
    fn default() -> Self {
        PublicationStatus::Draft
    }
}

impl fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate an incoming status value.
///
/// # Errors
///
/// `Validation` if the value is empty or not one of `draft`, `review`,
/// `published`, `archived`. Case and surrounding whitespace are significant.
///
/// # Examples
///
/// ```
/// use cms_content::{validate_status, PublicationStatus};
///
/// assert_eq!(validate_status("published").unwrap(), PublicationStatus::Published);
/// assert!(validate_status("Published").is_err());
/// assert!(validate_status("").is_err());
/// ```
pub fn validate_status(value: &str) -> ContentResult<PublicationStatus> {
    if value.is_empty() {
        return Err(ContentError::Validation(
            "publication status must not be empty".to_string(),
        ));
    }
    PublicationStatus::parse(value).ok_or_else(|| {
        ContentError::Validation(format!(
            "invalid publication status '{}', expected one of: draft, review, published, archived",
            value
        ))
    })
}

/// One entry of a content entity's status history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Unique record ID
    pub id: Uuid,

    /// Content entity this status belongs to
    pub content_id: Uuid,

    /// Status value
    pub status: PublicationStatus,

    /// When the status was set
    pub created_at: DateTime<Utc>,

    /// When the record was last updated
    pub updated_at: DateTime<Utc>,
}

impl StatusRecord {
    /// Creates a new status record for `content_id`.
    pub fn new(content_id: Uuid, status: PublicationStatus, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            content_id,
            status,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for StatusRecord {
    const KIND: &'static str = "status_record";

    fn id(&self) -> Uuid {
        self.id
    }
}
