use std::sync::Arc;

use examboard_core::{AppError, AppResult, OrganizationId, Principal, UserId};
use examboard_domain::{Capability, OrganizationMembership, Role, UserAction};
use tracing::info;

use crate::{AccessGuard, OrganizationMembershipRepository};

/// Organization-tier membership administration.
#[derive(Clone)]
pub struct MembershipService {
    guard: AccessGuard,
    memberships: Arc<dyn OrganizationMembershipRepository>,
}

impl MembershipService {
    /// Creates a service from the access guard and membership store.
    #[must_use]
    pub fn new(guard: AccessGuard, memberships: Arc<dyn OrganizationMembershipRepository>) -> Self {
        Self { guard, memberships }
    }

    /// Lists organization members for administrators.
    pub async fn list_members(
        &self,
        actor: &Principal,
        organization_id: OrganizationId,
    ) -> AppResult<Vec<OrganizationMembership>> {
        self.guard
            .require_organization_access(
                actor,
                organization_id,
                Capability::Users(UserAction::Invite),
            )
            .await?;

        self.memberships
            .list_organization_memberships(organization_id)
            .await
    }

    /// Adds a user to the organization with the given role.
    pub async fn invite_member(
        &self,
        actor: &Principal,
        organization_id: OrganizationId,
        user_id: UserId,
        role: Role,
    ) -> AppResult<OrganizationMembership> {
        self.guard
            .require_organization_access(
                actor,
                organization_id,
                Capability::Users(UserAction::Invite),
            )
            .await?;

        if self
            .memberships
            .find_organization_membership(user_id, organization_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "user '{user_id}' is already a member of organization '{organization_id}'"
            )));
        }

        let membership = OrganizationMembership::new(user_id, organization_id, role);
        self.memberships
            .create_organization_membership(membership.clone())
            .await?;

        info!(
            actor_id = %actor.user_id(),
            %user_id,
            %organization_id,
            role = role.as_str(),
            "organization member invited"
        );
        Ok(membership)
    }

    /// Replaces a member's organization role.
    pub async fn change_member_role(
        &self,
        actor: &Principal,
        organization_id: OrganizationId,
        user_id: UserId,
        role: Role,
    ) -> AppResult<OrganizationMembership> {
        self.guard
            .require_organization_access(
                actor,
                organization_id,
                Capability::Users(UserAction::UpdateRole),
            )
            .await?;

        let current = self.require_member(user_id, organization_id).await?;
        if current.is_admin() && !role.is_admin() {
            self.ensure_other_admin_remains(organization_id).await?;
        }

        self.memberships
            .update_organization_membership_role(user_id, organization_id, role.as_str())
            .await?;

        info!(
            actor_id = %actor.user_id(),
            %user_id,
            %organization_id,
            previous_role = %current.role_name,
            role = role.as_str(),
            "organization member role changed"
        );
        Ok(OrganizationMembership::new(user_id, organization_id, role))
    }

    /// Removes a member from the organization.
    pub async fn remove_member(
        &self,
        actor: &Principal,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> AppResult<()> {
        self.guard
            .require_organization_access(
                actor,
                organization_id,
                Capability::Users(UserAction::Remove),
            )
            .await?;

        let current = self.require_member(user_id, organization_id).await?;
        if current.is_admin() {
            self.ensure_other_admin_remains(organization_id).await?;
        }

        self.memberships
            .delete_organization_membership(user_id, organization_id)
            .await?;

        info!(
            actor_id = %actor.user_id(),
            %user_id,
            %organization_id,
            "organization member removed"
        );
        Ok(())
    }

    async fn require_member(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
    ) -> AppResult<OrganizationMembership> {
        self.memberships
            .find_organization_membership(user_id, organization_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "user '{user_id}' is not a member of organization '{organization_id}'"
                ))
            })
    }

    async fn ensure_other_admin_remains(&self, organization_id: OrganizationId) -> AppResult<()> {
        let admins = self
            .memberships
            .list_organization_memberships(organization_id)
            .await?
            .into_iter()
            .filter(OrganizationMembership::is_admin)
            .count();

        if admins <= 1 {
            return Err(AppError::Forbidden(format!(
                "organization '{organization_id}' must keep at least one admin"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
