//! Membership manager
//!
//! This module provides the service that owns every mutation of the
//! membership table. Going through [`MembershipManager`] is what keeps the
//! ownership invariant: an organization with members has exactly one owner
//! once creation or an ownership transfer has completed.
//!
//! Each public operation runs in a single record-store transaction. An error
//! returns early, the transaction is dropped, and none of its writes become
//! visible.

use cms_store::{Clock, Filter, RecordStore, Transaction};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::OrgConfig;
use crate::error::{OrgError, OrgResult};
use crate::membership::Membership;
use crate::organization::{validate_name, Organization, OrganizationSummary};
use crate::plan::Plan;
use crate::roles::Role;
use crate::space::Space;
use crate::user::User;

/// Service enforcing the organization membership and ownership rules.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use cms_org::{MembershipManager, Role};
/// use cms_store::{MemoryStore, SystemClock};
///
/// async fn example() -> cms_org::OrgResult<()> {
///     let manager = MembershipManager::new(Arc::new(MemoryStore::new()), Arc::new(SystemClock));
///
///     let alice = manager.create_user("alice").await?;
///     let bob = manager.create_user("bob").await?;
///     let org = manager.create_organization_with_owner("Acme", alice.id).await?;
///
///     manager.add_member(org.id, bob.id, Role::Admin).await?;
///     manager.transfer_ownership(org.id, bob.id).await?;
///     assert_eq!(manager.get_role(org.id, alice.id).await?, Role::Member);
///     Ok(())
/// }
/// ```
pub struct MembershipManager<S: RecordStore> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    config: OrgConfig,
}

impl<S: RecordStore> std::fmt::Debug for MembershipManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MembershipManager")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S: RecordStore> MembershipManager<S> {
    /// Create a manager with default configuration.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self::with_config(store, clock, OrgConfig::default())
    }

    /// Create a manager with explicit configuration.
    pub fn with_config(store: Arc<S>, clock: Arc<dyn Clock>, config: OrgConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &OrgConfig {
        &self.config
    }

    /// Create a user.
    ///
    /// # Errors
    ///
    /// `Validation` if the name is empty or too long.
    pub async fn create_user(&self, name: &str) -> OrgResult<User> {
        validate_name("user name", name, self.config.max_name_length)?;

        let mut tx = self.store.begin().await?;
        let user = tx.create(User::new(name, self.clock.now())).await?;
        tx.commit().await?;

        tracing::debug!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Fetch a user.
    pub async fn get_user(&self, user_id: Uuid) -> OrgResult<User> {
        let mut tx = self.store.begin().await?;
        let user = require_user(&mut tx, user_id).await?;
        tx.rollback().await?;
        Ok(user)
    }

    /// Create an organization and make `owner_user_id` its owner.
    ///
    /// The organization and the owner membership are written in one
    /// transaction.
    ///
    /// # Errors
    ///
    /// - `Validation` if the name is empty or too long
    /// - `NotFound` if the owner user does not exist
    pub async fn create_organization_with_owner(
        &self,
        name: &str,
        owner_user_id: Uuid,
    ) -> OrgResult<Organization> {
        validate_name("organization name", name, self.config.max_name_length)?;

        let mut tx = self.store.begin().await?;
        require_user(&mut tx, owner_user_id).await?;

        let now = self.clock.now();
        let organization = tx
            .create(Organization::new(name, self.config.default_plan, now))
            .await?;
        tx.create(Membership::new(organization.id, owner_user_id, Role::Owner, now))
            .await?;
        tx.commit().await?;

        tracing::info!(
            organization_id = %organization.id,
            owner_id = %owner_user_id,
            "Organization created"
        );
        Ok(organization)
    }

    /// Fetch an organization.
    pub async fn get_organization(&self, organization_id: Uuid) -> OrgResult<Organization> {
        let mut tx = self.store.begin().await?;
        let organization = require_organization(&mut tx, organization_id).await?;
        tx.rollback().await?;
        Ok(organization)
    }

    /// Rename an organization.
    pub async fn rename_organization(
        &self,
        organization_id: Uuid,
        name: &str,
    ) -> OrgResult<Organization> {
        validate_name("organization name", name, self.config.max_name_length)?;

        let mut tx = self.store.begin().await?;
        let mut organization = require_organization(&mut tx, organization_id).await?;
        organization.name = name.to_string();
        organization.updated_at = self.clock.now();
        let organization = tx.update(organization).await?;
        tx.commit().await?;
        Ok(organization)
    }

    /// Move an organization to another plan.
    ///
    /// Changing to the current plan is a no-op and leaves the plan
    /// timestamps untouched.
    pub async fn change_plan(&self, organization_id: Uuid, plan: Plan) -> OrgResult<Organization> {
        let mut tx = self.store.begin().await?;
        let mut organization = require_organization(&mut tx, organization_id).await?;

        if organization.change_plan(plan, self.clock.now()) {
            organization = tx.update(organization).await?;
            tx.commit().await?;
            tracing::info!(organization_id = %organization_id, plan = %plan, "Plan changed");
        } else {
            tx.rollback().await?;
        }
        Ok(organization)
    }

    /// Set or clear the organization icon reference.
    pub async fn set_icon(
        &self,
        organization_id: Uuid,
        icon: Option<String>,
    ) -> OrgResult<Organization> {
        let mut tx = self.store.begin().await?;
        let mut organization = require_organization(&mut tx, organization_id).await?;
        organization.icon = icon;
        organization.updated_at = self.clock.now();
        let organization = tx.update(organization).await?;
        tx.commit().await?;
        Ok(organization)
    }

    /// Delete an organization together with its memberships and spaces.
    pub async fn delete_organization(&self, organization_id: Uuid) -> OrgResult<()> {
        let mut tx = self.store.begin().await?;
        let organization = require_organization(&mut tx, organization_id).await?;
        let scope = Filter::new().eq("organization_id", organization_id);

        let memberships: Vec<Membership> = tx.find_all(&scope).await?;
        for membership in &memberships {
            tx.delete(membership).await?;
        }
        let spaces: Vec<Space> = tx.find_all(&scope).await?;
        for space in &spaces {
            tx.delete(space).await?;
        }
        tx.delete(&organization).await?;
        tx.commit().await?;

        tracing::info!(
            organization_id = %organization_id,
            memberships = memberships.len(),
            spaces = spaces.len(),
            "Organization deleted"
        );
        Ok(())
    }

    /// List the organizations a user belongs to, with their role in each.
    pub async fn list_organizations_for_user(
        &self,
        user_id: Uuid,
    ) -> OrgResult<Vec<OrganizationSummary>> {
        let mut tx = self.store.begin().await?;
        require_user(&mut tx, user_id).await?;

        let memberships: Vec<Membership> = tx
            .find_all(&Filter::new().eq("user_id", user_id))
            .await?;

        let mut summaries = Vec::with_capacity(memberships.len());
        for membership in memberships {
            let organization = require_organization(&mut tx, membership.organization_id).await?;
            let member_count = tx
                .count::<Membership>(&Filter::new().eq("organization_id", organization.id))
                .await?;
            summaries.push(OrganizationSummary {
                id: organization.id,
                name: organization.name,
                icon: organization.icon,
                plan: organization.plan,
                user_role: membership.role,
                member_count,
            });
        }
        tx.rollback().await?;
        Ok(summaries)
    }

    /// Add a user to an organization with the given role.
    ///
    /// Adding a second owner here is allowed but logged; use
    /// [`transfer_ownership`](Self::transfer_ownership) to change owners.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the organization or user does not exist
    /// - `Conflict` if the user is already a member
    pub async fn add_member(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
        role: Role,
    ) -> OrgResult<Membership> {
        let mut tx = self.store.begin().await?;
        require_organization(&mut tx, organization_id).await?;
        require_user(&mut tx, user_id).await?;

        if find_membership(&mut tx, organization_id, user_id).await?.is_some() {
            return Err(OrgError::Conflict(format!(
                "user {} is already a member of organization {}",
                user_id, organization_id
            )));
        }

        let membership = tx
            .create(Membership::new(organization_id, user_id, role, self.clock.now()))
            .await?;
        warn_unless_single_owner(&mut tx, organization_id, "add_member").await?;
        tx.commit().await?;

        tracing::info!(
            organization_id = %organization_id,
            user_id = %user_id,
            role = %role,
            "Member added"
        );
        Ok(membership)
    }

    /// Change a member's role in place.
    ///
    /// This does not enforce the single-owner rule; it only logs when the
    /// organization ends up with zero or several owners.
    ///
    /// # Errors
    ///
    /// `NotFound` if the user is not a member.
    pub async fn update_member_role(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
        new_role: Role,
    ) -> OrgResult<Membership> {
        let mut tx = self.store.begin().await?;
        let mut membership = require_membership(&mut tx, organization_id, user_id).await?;
        let previous = membership.role;

        membership.set_role(new_role, self.clock.now());
        let membership = tx.update(membership).await?;
        warn_unless_single_owner(&mut tx, organization_id, "update_member_role").await?;
        tx.commit().await?;

        tracing::info!(
            organization_id = %organization_id,
            user_id = %user_id,
            from = %previous,
            to = %new_role,
            "Member role updated"
        );
        Ok(membership)
    }

    /// Remove a user from an organization.
    ///
    /// Removing the sole owner is permitted and logged.
    ///
    /// # Errors
    ///
    /// `NotFound` if the user is not a member.
    pub async fn remove_member(&self, organization_id: Uuid, user_id: Uuid) -> OrgResult<()> {
        let mut tx = self.store.begin().await?;
        let membership = require_membership(&mut tx, organization_id, user_id).await?;

        tx.delete(&membership).await?;
        warn_unless_single_owner(&mut tx, organization_id, "remove_member").await?;
        tx.commit().await?;

        tracing::info!(
            organization_id = %organization_id,
            user_id = %user_id,
            "Member removed"
        );
        Ok(())
    }

    /// Make `new_owner_user_id` the only owner of the organization.
    ///
    /// Every current owner is demoted to member first, then the new owner's
    /// membership is promoted, or created when the user is not yet a member.
    /// The result is checked before commit: if the organization does not
    /// have exactly one owner the transaction is abandoned.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the organization or user does not exist
    /// - `InvariantViolation` if the post-condition check fails
    pub async fn transfer_ownership(
        &self,
        organization_id: Uuid,
        new_owner_user_id: Uuid,
    ) -> OrgResult<()> {
        let mut tx = self.store.begin().await?;
        require_organization(&mut tx, organization_id).await?;
        require_user(&mut tx, new_owner_user_id).await?;
        let now = self.clock.now();

        let mut demoted = 0usize;
        for mut owner in owners(&mut tx, organization_id).await? {
            if owner.user_id == new_owner_user_id {
                continue;
            }
            owner.set_role(Role::Member, now);
            tx.update(owner).await?;
            demoted += 1;
        }

        match find_membership(&mut tx, organization_id, new_owner_user_id).await? {
            Some(mut membership) if !membership.is_owner() => {
                membership.set_role(Role::Owner, now);
                tx.update(membership).await?;
            }
            Some(_) => {}
            None => {
                tx.create(Membership::new(
                    organization_id,
                    new_owner_user_id,
                    Role::Owner,
                    now,
                ))
                .await?;
            }
        }

        let owner_count = owners(&mut tx, organization_id).await?.len();
        if owner_count != 1 {
            tracing::error!(
                organization_id = %organization_id,
                owner_count,
                "Ownership transfer aborted"
            );
            return Err(OrgError::InvariantViolation(format!(
                "organization {} has {} owners after transfer",
                organization_id, owner_count
            )));
        }
        tx.commit().await?;

        tracing::info!(
            organization_id = %organization_id,
            new_owner_id = %new_owner_user_id,
            demoted,
            "Ownership transferred"
        );
        Ok(())
    }

    /// Get a user's role in an organization.
    ///
    /// # Errors
    ///
    /// `NotFound` if the user is not a member.
    pub async fn get_role(&self, organization_id: Uuid, user_id: Uuid) -> OrgResult<Role> {
        let mut tx = self.store.begin().await?;
        let membership = require_membership(&mut tx, organization_id, user_id).await?;
        tx.rollback().await?;
        Ok(membership.role)
    }

    /// Get the owner membership of an organization.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the organization has no owner
    /// - `InvariantViolation` if it has more than one
    pub async fn owner_of(&self, organization_id: Uuid) -> OrgResult<Membership> {
        let mut tx = self.store.begin().await?;
        let mut current = owners(&mut tx, organization_id).await?;
        tx.rollback().await?;

        match current.len() {
            0 => Err(OrgError::not_found("Owner", organization_id)),
            1 => Ok(current.remove(0)),
            n => Err(OrgError::InvariantViolation(format!(
                "organization {} has {} owners",
                organization_id, n
            ))),
        }
    }

    /// List the memberships of an organization in join order.
    pub async fn list_members(&self, organization_id: Uuid) -> OrgResult<Vec<Membership>> {
        let mut tx = self.store.begin().await?;
        require_organization(&mut tx, organization_id).await?;
        let memberships = tx
            .find_all::<Membership>(&Filter::new().eq("organization_id", organization_id))
            .await?;
        tx.rollback().await?;
        Ok(memberships)
    }

    /// Create a space owned by an organization.
    pub async fn create_space(&self, organization_id: Uuid, name: &str) -> OrgResult<Space> {
        validate_name("space name", name, self.config.max_name_length)?;

        let mut tx = self.store.begin().await?;
        require_organization(&mut tx, organization_id).await?;
        let space = tx
            .create(Space::new(organization_id, name, self.clock.now()))
            .await?;
        tx.commit().await?;
        Ok(space)
    }

    /// List the spaces of an organization.
    pub async fn list_spaces(&self, organization_id: Uuid) -> OrgResult<Vec<Space>> {
        let mut tx = self.store.begin().await?;
        require_organization(&mut tx, organization_id).await?;
        let spaces = tx
            .find_all::<Space>(&Filter::new().eq("organization_id", organization_id))
            .await?;
        tx.rollback().await?;
        Ok(spaces)
    }
}

async fn require_organization<T: Transaction>(tx: &mut T, id: Uuid) -> OrgResult<Organization> {
    tx.get::<Organization>(id)
        .await?
        .ok_or_else(|| OrgError::not_found("Organization", id))
}

async fn require_user<T: Transaction>(tx: &mut T, id: Uuid) -> OrgResult<User> {
    tx.get::<User>(id)
        .await?
        .ok_or_else(|| OrgError::not_found("User", id))
}

async fn find_membership<T: Transaction>(
    tx: &mut T,
    organization_id: Uuid,
    user_id: Uuid,
) -> OrgResult<Option<Membership>> {
    let filter = Filter::new()
        .eq("organization_id", organization_id)
        .eq("user_id", user_id);
    Ok(tx.find_one::<Membership>(&filter).await?)
}

async fn require_membership<T: Transaction>(
    tx: &mut T,
    organization_id: Uuid,
    user_id: Uuid,
) -> OrgResult<Membership> {
    find_membership(tx, organization_id, user_id)
        .await?
        .ok_or_else(|| {
            OrgError::not_found("Membership", format!("{}/{}", organization_id, user_id))
        })
}

async fn owners<T: Transaction>(tx: &mut T, organization_id: Uuid) -> OrgResult<Vec<Membership>> {
    let filter = Filter::new()
        .eq("organization_id", organization_id)
        .eq("role", Role::Owner);
    Ok(tx.find_all::<Membership>(&filter).await?)
}

/// Log when an organization with members no longer has exactly one owner.
async fn warn_unless_single_owner<T: Transaction>(
    tx: &mut T,
    organization_id: Uuid,
    operation: &'static str,
) -> OrgResult<()> {
    let members = tx
        .count::<Membership>(&Filter::new().eq("organization_id", organization_id))
        .await?;
    let owner_count = owners(tx, organization_id).await?.len();
    if members > 0 && owner_count != 1 {
        tracing::warn!(
            organization_id = %organization_id,
            owner_count,
            operation,
            "Organization does not have exactly one owner"
        );
    }
    Ok(())
}
