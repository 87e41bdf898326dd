use std::sync::Arc;

use chrono::Utc;
use examboard_core::{AppError, AppResult, OrganizationId, Principal, ProcedureId, UserId};
use examboard_domain::{
    AssignmentStatus, Capability, OrganizationMembership, ProcedureAction, ProcedureAssignment,
    Role,
};
use tracing::info;

use crate::{AccessGuard, OrganizationMembershipRepository, ProcedureAssignmentRepository};

/// Procedure-tier staff assignment administration and self-service listing.
#[derive(Clone)]
pub struct StaffAssignmentService {
    guard: AccessGuard,
    memberships: Arc<dyn OrganizationMembershipRepository>,
    procedures: Arc<dyn ProcedureAssignmentRepository>,
}

impl StaffAssignmentService {
    /// Creates a service from the access guard and both stores.
    #[must_use]
    pub fn new(
        guard: AccessGuard,
        memberships: Arc<dyn OrganizationMembershipRepository>,
        procedures: Arc<dyn ProcedureAssignmentRepository>,
    ) -> Self {
        Self {
            guard,
            memberships,
            procedures,
        }
    }

    /// Assigns a staff member to a procedure.
    ///
    /// Users outside the owning organization are added to it as `member`
    /// first, so their only authority comes from this assignment.
    pub async fn assign_staff(
        &self,
        actor: &Principal,
        procedure_id: ProcedureId,
        user_id: UserId,
        role: Role,
    ) -> AppResult<ProcedureAssignment> {
        let organization_id = self.require_assign_staff(actor, procedure_id).await?;

        if !role.is_staff() {
            return Err(AppError::Validation(format!(
                "role '{role}' cannot be assigned to a procedure"
            )));
        }

        if self
            .memberships
            .find_organization_membership(user_id, organization_id)
            .await?
            .is_none()
        {
            self.memberships
                .create_organization_membership(OrganizationMembership::new(
                    user_id,
                    organization_id,
                    Role::Member,
                ))
                .await?;
            info!(
                %user_id,
                %organization_id,
                "procedure staff added to organization as member"
            );
        }

        if self
            .procedures
            .find_procedure_assignment(user_id, procedure_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "user '{user_id}' is already assigned to procedure '{procedure_id}'"
            )));
        }

        let assignment = ProcedureAssignment::pending(user_id, procedure_id, role, Utc::now());
        self.procedures
            .create_procedure_assignment(assignment.clone())
            .await?;

        info!(
            actor_id = %actor.user_id(),
            %user_id,
            %procedure_id,
            role = role.as_str(),
            "procedure staff assigned"
        );
        Ok(assignment)
    }

    /// Lists the assignments of a procedure.
    pub async fn list_procedure_assignments(
        &self,
        actor: &Principal,
        procedure_id: ProcedureId,
    ) -> AppResult<Vec<ProcedureAssignment>> {
        self.guard
            .require_procedure_access(
                actor,
                procedure_id,
                Capability::Procedures(ProcedureAction::Read),
            )
            .await?;

        self.procedures
            .list_procedure_assignments(procedure_id)
            .await
    }

    /// Removes a user's assignment from a procedure. The organization
    /// membership is left untouched.
    pub async fn remove_assignment(
        &self,
        actor: &Principal,
        procedure_id: ProcedureId,
        user_id: UserId,
    ) -> AppResult<()> {
        self.require_assign_staff(actor, procedure_id).await?;

        if self
            .procedures
            .find_procedure_assignment(user_id, procedure_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "user '{user_id}' is not assigned to procedure '{procedure_id}'"
            )));
        }

        self.procedures
            .delete_procedure_assignment(user_id, procedure_id)
            .await?;

        info!(
            actor_id = %actor.user_id(),
            %user_id,
            %procedure_id,
            "procedure staff removed"
        );
        Ok(())
    }

    /// Lists the caller's own assignments, newest first.
    pub async fn list_my_assignments(
        &self,
        actor: &Principal,
    ) -> AppResult<Vec<ProcedureAssignment>> {
        self.procedures
            .list_assignments_for_user(actor.user_id())
            .await
    }

    /// Accepts every pending assignment of the caller and returns the
    /// assignments that changed.
    pub async fn accept_pending_assignments(
        &self,
        actor: &Principal,
    ) -> AppResult<Vec<ProcedureAssignment>> {
        let now = Utc::now();
        let pending = self
            .procedures
            .list_assignments_for_user(actor.user_id())
            .await?
            .into_iter()
            .filter(|assignment| assignment.status == AssignmentStatus::Pending);

        let mut accepted = Vec::new();
        for assignment in pending {
            let assignment = assignment.accept(now);
            self.procedures
                .update_procedure_assignment(assignment.clone())
                .await?;
            accepted.push(assignment);
        }

        if !accepted.is_empty() {
            info!(
                user_id = %actor.user_id(),
                count = accepted.len(),
                "pending procedure assignments accepted"
            );
        }
        Ok(accepted)
    }

    async fn require_assign_staff(
        &self,
        actor: &Principal,
        procedure_id: ProcedureId,
    ) -> AppResult<OrganizationId> {
        let organization_id = self
            .procedures
            .find_procedure_owning_organization(procedure_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("procedure '{procedure_id}' not found")))?;

        self.guard
            .require_organization_access(
                actor,
                organization_id,
                Capability::Procedures(ProcedureAction::AssignStaff),
            )
            .await?;

        Ok(organization_id)
    }
}

#[cfg(test)]
mod tests;
