//! Organization domain models
//!
//! This module provides the core Organization entity for multi-tenant
//! content management. Organizations are the top-level tenant entities
//! that own spaces and members.

use chrono::{DateTime, Utc};
use cms_store::Record;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{OrgError, OrgResult};
use crate::plan::Plan;
use crate::roles::Role;

/// An organization represents a tenant in the multi-tenant system.
///
/// Users can belong to multiple organizations with different roles.
/// Deleting an organization deletes its memberships and spaces.
///
/// # Architecture
///
/// ```text
/// Organization
///   ├─ Members (via Membership, exactly one Owner)
///   ├─ Spaces
///   └─ Plan
/// ```
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use cms_org::{Organization, Plan};
///
/// let org = Organization::new("Acme", Plan::Free, Utc::now());
/// assert_eq!(org.name, "Acme");
/// assert!(org.icon.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier for the organization
    pub id: Uuid,

    /// Human-readable name
    pub name: String,

    /// Icon reference (storage key or URL); file storage is external
    pub icon: Option<String>,

    /// Subscription plan
    pub plan: Plan,

    /// When the current plan took effect
    pub plan_started_at: DateTime<Utc>,

    /// When the plan was last changed, if ever
    pub plan_changed_at: Option<DateTime<Utc>>,

    /// When the organization was created
    pub created_at: DateTime<Utc>,

    /// When the organization was last updated
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    /// Creates a new organization on the given plan.
    ///
    /// # Arguments
    ///
    /// * `name` - The organization name (validated by the manager)
    /// * `plan` - Initial subscription plan
    /// * `now` - Creation timestamp
    pub fn new(name: impl Into<String>, plan: Plan, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            icon: None,
            plan,
            plan_started_at: now,
            plan_changed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Switch to another plan.
    ///
    /// # Returns
    ///
    /// `false` if the organization was already on `plan`, in which case
    /// nothing changes.
    pub fn change_plan(&mut self, plan: Plan, now: DateTime<Utc>) -> bool {
        if self.plan == plan {
            return false;
        }
        self.plan = plan;
        self.plan_started_at = now;
        self.plan_changed_at = Some(now);
        self.updated_at = now;
        true
    }
}

impl Record for Organization {
    const KIND: &'static str = "organization";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Summary of an organization for a user's organization list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationSummary {
    /// Organization ID
    pub id: Uuid,

    /// Organization name
    pub name: String,

    /// Icon reference
    pub icon: Option<String>,

    /// Plan
    pub plan: Plan,

    /// User's role in this organization
    pub user_role: Role,

    /// Number of members
    pub member_count: usize,
}

/// Validate a display name against the configured length limit.
///
/// Names must contain at least one non-whitespace character and at most
/// `max_len` characters.
pub(crate) fn validate_name(field: &str, value: &str, max_len: usize) -> OrgResult<()> {
    if value.trim().is_empty() {
        return Err(OrgError::Validation(format!("{} must not be empty", field)));
    }
    if value.chars().count() > max_len {
        return Err(OrgError::Validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}
