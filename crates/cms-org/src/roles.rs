//! Membership roles
//!
//! This module defines the role a user holds inside an organization.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{OrgError, OrgResult};

/// User role within an organization.
///
/// Roles are ordered: Member < Admin < Owner. An organization with members
/// has exactly one Owner once creation or an ownership transfer completes.
///
/// # Examples
///
/// ```
/// use cms_org::Role;
///
/// let role = Role::Admin;
/// assert!(!role.is_owner());
/// assert!(Role::Owner > Role::Admin);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular member
    Member = 1,

    /// Administrator
    Admin = 2,

    /// Organization owner
    Owner = 3,
}

impl Role {
    /// Check if this is the owner role.
    pub fn is_owner(&self) -> bool {
        *self == Role::Owner
    }

    /// Parse role from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(Role)` if valid, `None` otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use cms_org::Role;
    ///
    /// assert_eq!(Role::parse("admin"), Some(Role::Admin));
    /// assert_eq!(Role::parse("OWNER"), Some(Role::Owner));
    /// assert_eq!(Role::parse("viewer"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "member" => Some(Self::Member),
            "admin" => Some(Self::Admin),
            "owner" => Some(Self::Owner),
            _ => None,
        }
    }

    /// Get string representation of the role.
    ///
    /// # Examples
    ///
    /// ```
    /// use cms_org::Role;
    ///
    /// assert_eq!(Role::Admin.as_str(), "admin");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Member
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a caller-supplied role, rejecting anything outside the three roles.
///
/// # Errors
///
/// Returns [`OrgError::Validation`] for empty or unknown values.
///
/// # Examples
///
/// ```
/// use cms_org::roles::parse_role;
/// use cms_org::Role;
///
/// assert_eq!(parse_role("member").unwrap(), Role::Member);
/// assert!(parse_role("").is_err());
/// assert!(parse_role("superuser").is_err());
/// ```
pub fn parse_role(value: &str) -> OrgResult<Role> {
    if value.trim().is_empty() {
        return Err(OrgError::Validation("role is required".to_string()));
    }
    Role::parse(value).ok_or_else(|| {
        OrgError::Validation(format!(
            "invalid role '{}': expected one of owner, admin, member",
            value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_hierarchy() {
        assert!(Role::Owner > Role::Admin);
        assert!(Role::Admin > Role::Member);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("Member"), Some(Role::Member));
        assert_eq!(Role::parse("guest"), None);
    }

    #[test]
    fn test_parse_role_rejects_unknown_and_empty() {
        assert!(matches!(parse_role(""), Err(OrgError::Validation(_))));
        assert!(matches!(parse_role("   "), Err(OrgError::Validation(_))));
        assert!(matches!(parse_role("editor"), Err(OrgError::Validation(_))));
        assert_eq!(parse_role("owner").unwrap(), Role::Owner);
    }

    #[test]
    fn test_role_serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Owner).unwrap(), "\"owner\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
        assert!(serde_json::from_str::<Role>("\"guest\"").is_err());
    }

    #[test]
    fn test_default_role_is_member() {
        assert_eq!(Role::default(), Role::Member);
        assert_eq!(Role::default().to_string(), "member");
    }
}
