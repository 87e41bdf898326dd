use std::sync::Arc;

use examboard_core::{AppError, AppResult, OrganizationId, Principal, ProcedureId};
use examboard_domain::{
    Capability, OrganizationMembership, PermissionMatrix, ProcedureAssignment, Role,
};
use tracing::{debug, warn};

use crate::{OrganizationMembershipRepository, ProcedureAssignmentRepository};

/// Resolved procedure-tier access returned by [`AccessGuard::require_procedure_access`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureAccess {
    /// Organization the procedure belongs to.
    pub organization_id: OrganizationId,
    /// The caller's membership in the owning organization.
    pub membership: OrganizationMembership,
    /// Role name the decision was made with; `admin` for the admin bypass.
    pub procedure_role: String,
    /// Whether access was granted through the organization admin bypass.
    pub is_admin: bool,
    /// The explicit assignment, absent for the admin bypass.
    pub assignment: Option<ProcedureAssignment>,
}

/// Effective procedure-tier permissions for UI capability checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedurePermissions {
    /// Procedure the matrix applies to.
    pub procedure_id: ProcedureId,
    /// Role name the matrix was resolved from.
    pub procedure_role: String,
    /// Whether the caller is an organization admin.
    pub is_admin: bool,
    /// Effective matrix.
    pub permissions: PermissionMatrix,
}

/// Two-tier authorization checks for organization and procedure scoped operations.
///
/// The guard only reads membership data; it never mutates the stores.
#[derive(Clone)]
pub struct AccessGuard {
    memberships: Arc<dyn OrganizationMembershipRepository>,
    procedures: Arc<dyn ProcedureAssignmentRepository>,
}

impl AccessGuard {
    /// Creates a guard over the membership and procedure assignment stores.
    #[must_use]
    pub fn new(
        memberships: Arc<dyn OrganizationMembershipRepository>,
        procedures: Arc<dyn ProcedureAssignmentRepository>,
    ) -> Self {
        Self {
            memberships,
            procedures,
        }
    }

    /// Ensures the principal's organization role grants the capability and
    /// returns the membership it was decided on.
    pub async fn require_organization_access(
        &self,
        principal: &Principal,
        organization_id: OrganizationId,
        capability: Capability,
    ) -> AppResult<OrganizationMembership> {
        let membership = self
            .require_organization_membership(principal, organization_id)
            .await?;

        if !membership.permissions().allows(capability) {
            warn!(
                user_id = %principal.user_id(),
                %organization_id,
                role = %membership.role_name,
                %capability,
                "organization access denied"
            );
            return Err(AppError::Forbidden(format!(
                "missing permission '{capability}' in organization '{organization_id}'"
            )));
        }

        debug!(
            user_id = %principal.user_id(),
            %organization_id,
            %capability,
            "organization access granted"
        );
        Ok(membership)
    }

    /// Returns whether the principal's organization role grants the capability.
    ///
    /// A missing membership is still an error; only the grant itself becomes a boolean.
    pub async fn has_organization_permission(
        &self,
        principal: &Principal,
        organization_id: OrganizationId,
        capability: Capability,
    ) -> AppResult<bool> {
        let membership = self
            .require_organization_membership(principal, organization_id)
            .await?;

        Ok(membership.permissions().allows(capability))
    }

    /// Returns the caller's membership and organization-tier matrix.
    pub async fn organization_permissions(
        &self,
        principal: &Principal,
        organization_id: OrganizationId,
    ) -> AppResult<(OrganizationMembership, PermissionMatrix)> {
        let membership = self
            .require_organization_membership(principal, organization_id)
            .await?;
        let permissions = membership.permissions();

        Ok((membership, permissions))
    }

    /// Ensures the principal may perform the capability within a procedure.
    ///
    /// Membership in the owning organization is required first. Organization
    /// admins then pass unconditionally; everyone else is checked against the
    /// role of their procedure assignment, never their organization role.
    pub async fn require_procedure_access(
        &self,
        principal: &Principal,
        procedure_id: ProcedureId,
        capability: Capability,
    ) -> AppResult<ProcedureAccess> {
        match self.resolve_procedure_scope(principal, procedure_id).await? {
            ProcedureScope::Admin {
                organization_id,
                membership,
            } => {
                debug!(
                    user_id = %principal.user_id(),
                    %procedure_id,
                    %capability,
                    "procedure access granted through organization admin"
                );
                Ok(ProcedureAccess {
                    organization_id,
                    membership,
                    procedure_role: Role::Admin.as_str().to_owned(),
                    is_admin: true,
                    assignment: None,
                })
            }
            ProcedureScope::Assigned {
                organization_id,
                membership,
                assignment,
            } => {
                if !assignment.permissions().allows(capability) {
                    warn!(
                        user_id = %principal.user_id(),
                        %procedure_id,
                        procedure_role = %assignment.role_name,
                        %capability,
                        "procedure access denied"
                    );
                    return Err(AppError::Forbidden(format!(
                        "missing permission '{capability}' in procedure '{procedure_id}'"
                    )));
                }

                debug!(
                    user_id = %principal.user_id(),
                    %procedure_id,
                    procedure_role = %assignment.role_name,
                    %capability,
                    "procedure access granted"
                );
                Ok(ProcedureAccess {
                    organization_id,
                    membership,
                    procedure_role: assignment.role_name.clone(),
                    is_admin: false,
                    assignment: Some(assignment),
                })
            }
        }
    }

    /// Returns the caller's effective procedure-tier matrix.
    pub async fn procedure_permissions(
        &self,
        principal: &Principal,
        procedure_id: ProcedureId,
    ) -> AppResult<ProcedurePermissions> {
        let permissions = match self.resolve_procedure_scope(principal, procedure_id).await? {
            ProcedureScope::Admin { .. } => ProcedurePermissions {
                procedure_id,
                procedure_role: Role::Admin.as_str().to_owned(),
                is_admin: true,
                permissions: Role::Admin.permissions(),
            },
            ProcedureScope::Assigned { assignment, .. } => ProcedurePermissions {
                procedure_id,
                permissions: assignment.permissions(),
                procedure_role: assignment.role_name,
                is_admin: false,
            },
        };

        Ok(permissions)
    }

    async fn require_organization_membership(
        &self,
        principal: &Principal,
        organization_id: OrganizationId,
    ) -> AppResult<OrganizationMembership> {
        let membership = self
            .memberships
            .find_organization_membership(principal.user_id(), organization_id)
            .await?;

        membership.ok_or_else(|| {
            warn!(
                user_id = %principal.user_id(),
                %organization_id,
                "no organization membership"
            );
            AppError::Forbidden(format!(
                "no organization access to organization '{organization_id}'"
            ))
        })
    }

    async fn resolve_procedure_scope(
        &self,
        principal: &Principal,
        procedure_id: ProcedureId,
    ) -> AppResult<ProcedureScope> {
        let organization_id = self
            .procedures
            .find_procedure_owning_organization(procedure_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("procedure '{procedure_id}' not found")))?;

        let membership = self
            .require_organization_membership(principal, organization_id)
            .await?;

        if membership.is_admin() {
            return Ok(ProcedureScope::Admin {
                organization_id,
                membership,
            });
        }

        let assignment = self
            .procedures
            .find_procedure_assignment(principal.user_id(), procedure_id)
            .await?
            .ok_or_else(|| {
                warn!(
                    user_id = %principal.user_id(),
                    %procedure_id,
                    "no procedure assignment"
                );
                AppError::Forbidden(format!(
                    "not assigned to this procedure '{procedure_id}'"
                ))
            })?;

        Ok(ProcedureScope::Assigned {
            organization_id,
            membership,
            assignment,
        })
    }
}

enum ProcedureScope {
    Admin {
        organization_id: OrganizationId,
        membership: OrganizationMembership,
    },
    Assigned {
        organization_id: OrganizationId,
        membership: OrganizationMembership,
        assignment: ProcedureAssignment,
    },
}

#[cfg(test)]
mod tests;
