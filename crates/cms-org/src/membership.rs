//! Membership domain models
//!
//! This module provides the membership entity that links users to organizations.
//! A membership carries the user's role within the organization.

use chrono::{DateTime, Utc};
use cms_store::Record;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roles::Role;

/// Organization membership linking a user to an organization.
///
/// At most one membership exists per `(organization_id, user_id)` pair; the
/// pair is declared as a unique key so the record store enforces it too.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use uuid::Uuid;
/// use cms_org::{Membership, Role};
///
/// let org_id = Uuid::now_v7();
/// let user_id = Uuid::now_v7();
/// let membership = Membership::new(org_id, user_id, Role::Admin, Utc::now());
/// assert_eq!(membership.role, Role::Admin);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    /// Unique membership ID
    pub id: Uuid,

    /// Organization ID
    pub organization_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role within the organization
    pub role: Role,

    /// When the user joined
    pub created_at: DateTime<Utc>,

    /// When the membership (role) last changed
    pub updated_at: DateTime<Utc>,
}

impl Membership {
    /// Creates a new organization membership.
    ///
    /// # Arguments
    ///
    /// * `organization_id` - The organization ID
    /// * `user_id` - The user ID
    /// * `role` - The user's role in the organization
    /// * `now` - Creation timestamp
    pub fn new(organization_id: Uuid, user_id: Uuid, role: Role, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            organization_id,
            user_id,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Change the role, touching `updated_at`.
    pub fn set_role(&mut self, role: Role, now: DateTime<Utc>) {
        self.role = role;
        self.updated_at = now;
    }

    /// Check if this membership holds the owner role.
    pub fn is_owner(&self) -> bool {
        self.role.is_owner()
    }
}

impl Record for Membership {
    const KIND: &'static str = "membership";

    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_keys() -> &'static [&'static [&'static str]] {
        &[&["organization_id", "user_id"]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_membership_creation() {
        let org_id = Uuid::now_v7();
        let user_id = Uuid::now_v7();
        let now = Utc::now();
        let membership = Membership::new(org_id, user_id, Role::Member, now);

        assert_eq!(membership.organization_id, org_id);
        assert_eq!(membership.user_id, user_id);
        assert_eq!(membership.role, Role::Member);
        assert_eq!(membership.created_at, now);
        assert!(!membership.is_owner());
    }

    #[test]
    fn test_set_role_touches_updated_at() {
        let now = Utc::now();
        let mut membership = Membership::new(Uuid::now_v7(), Uuid::now_v7(), Role::Member, now);

        let later = now + Duration::minutes(1);
        membership.set_role(Role::Owner, later);

        assert!(membership.is_owner());
        assert_eq!(membership.created_at, now);
        assert_eq!(membership.updated_at, later);
    }

    #[test]
    fn test_pair_is_unique_key() {
        assert_eq!(Membership::unique_keys(), &[&["organization_id", "user_id"][..]]);
    }
}
