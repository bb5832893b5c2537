//! Subscription plans
//!
//! This module defines the plan tiers an organization can be on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subscription plan for an organization.
///
/// # Plan Hierarchy
///
/// - **Free**: Default plan for new organizations
/// - **Standard**: Paid plan for small teams
/// - **Premium**: Paid plan with the highest limits
///
/// # Examples
///
/// ```
/// use cms_org::Plan;
///
/// assert_eq!(Plan::default(), Plan::Free);
/// assert_eq!(Plan::parse("standard"), Some(Plan::Standard));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    /// Free plan
    Free,

    /// Standard paid plan
    Standard,

    /// Premium paid plan
    Premium,
}

impl Plan {
    /// Parse plan from string representation (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "free" => Some(Self::Free),
            "standard" => Some(Self::Standard),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }

    /// Get string representation of the plan.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Standard => "standard",
            Self::Premium => "premium",
        }
    }
}

impl Default for Plan {
    fn default() -> Self {
        Self::Free
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_parse_round_trip_names() {
        for plan in [Plan::Free, Plan::Standard, Plan::Premium] {
            assert_eq!(Plan::parse(plan.as_str()), Some(plan));
        }
        assert_eq!(Plan::parse("PREMIUM"), Some(Plan::Premium));
        assert_eq!(Plan::parse("enterprise"), None);
    }
}
