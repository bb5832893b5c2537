//! Space domain model
//!
//! Spaces are content containers owned by an organization. A space always
//! names its organization explicitly; there is no implicit default parent.

use chrono::{DateTime, Utc};
use cms_store::Record;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A content space within an organization.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use uuid::Uuid;
/// use cms_org::Space;
///
/// let org_id = Uuid::now_v7();
/// let space = Space::new(org_id, "Blog", Utc::now());
/// assert_eq!(space.organization_id, org_id);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    /// Unique identifier for the space
    pub id: Uuid,

    /// Owning organization
    pub organization_id: Uuid,

    /// Human-readable name
    pub name: String,

    /// When the space was created
    pub created_at: DateTime<Utc>,

    /// When the space was last updated
    pub updated_at: DateTime<Utc>,
}

impl Space {
    /// Creates a new space inside `organization_id`.
    pub fn new(organization_id: Uuid, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            organization_id,
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for Space {
    const KIND: &'static str = "space";

    fn id(&self) -> Uuid {
        self.id
    }
}
