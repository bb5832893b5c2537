//! # CMS Organization Management
//!
//! This crate provides multi-tenant organization management for the CMS core.
//!
//! ## Overview
//!
//! The cms-org crate handles:
//! - **Organizations**: Top-level tenant entities with a plan and an icon
//! - **Users**: Accounts that join organizations through memberships
//! - **Memberships**: User-organization links carrying a role
//! - **Roles**: Owner, Admin and Member
//! - **Spaces**: Content containers owned by an organization
//! - **Manager**: The [`MembershipManager`] service enforcing the single-owner rule
//!
//! ## Architecture
//!
//! ```text
//! User
//!   └─ Membership (role) ─→ Organization
//!                              ├─ Plan
//!                              └─ Spaces
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cms_org::{MembershipManager, Role};
//! use cms_store::{MemoryStore, SystemClock};
//!
//! async fn example() -> cms_org::OrgResult<()> {
//!     let manager = MembershipManager::new(Arc::new(MemoryStore::new()), Arc::new(SystemClock));
//!
//!     let owner = manager.create_user("owner").await?;
//!     let org = manager.create_organization_with_owner("Acme Corp", owner.id).await?;
//!     let space = manager.create_space(org.id, "Marketing").await?;
//!
//!     assert_eq!(manager.get_role(org.id, owner.id).await?, Role::Owner);
//!     assert_eq!(space.organization_id, org.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! [`OrgConfig::from_env`] reads `CMS_ORG_MAX_NAME_LENGTH` and
//! `CMS_ORG_DEFAULT_PLAN`.

pub mod config;
pub mod error;
pub mod manager;
pub mod membership;
pub mod organization;
pub mod plan;
pub mod roles;
pub mod space;
pub mod user;

// Re-export main types for convenience
pub use config::{ConfigError, OrgConfig};
pub use error::{OrgError, OrgResult};
pub use manager::MembershipManager;
pub use membership::Membership;
pub use organization::{Organization, OrganizationSummary};
pub use plan::Plan;
pub use roles::{parse_role, Role};
pub use space::Space;
pub use user::User;
