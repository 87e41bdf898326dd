use std::collections::HashMap;

use async_trait::async_trait;
use examboard_application::{OrganizationMembershipRepository, ProcedureAssignmentRepository};
use examboard_core::{AppError, AppResult, OrganizationId, ProcedureId, UserId};
use examboard_domain::{OrganizationMembership, ProcedureAssignment};
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory membership and procedure assignment store.
#[derive(Debug, Default)]
pub struct InMemoryAccessRepository {
    memberships: RwLock<HashMap<(UserId, OrganizationId), OrganizationMembership>>,
    procedures: RwLock<HashMap<ProcedureId, OrganizationId>>,
    assignments: RwLock<HashMap<(UserId, ProcedureId), ProcedureAssignment>>,
}

impl InMemoryAccessRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a procedure under its owning organization.
    ///
    /// Procedures are created by the exam management flows, so this store
    /// exposes registration outside of the access ports.
    pub async fn register_procedure(
        &self,
        procedure_id: ProcedureId,
        organization_id: OrganizationId,
    ) -> AppResult<()> {
        let mut procedures = self.procedures.write().await;

        if let Some(existing) = procedures.get(&procedure_id)
            && *existing != organization_id
        {
            return Err(AppError::Conflict(format!(
                "procedure '{procedure_id}' already belongs to organization '{existing}'"
            )));
        }

        procedures.insert(procedure_id, organization_id);
        debug!(%procedure_id, %organization_id, "procedure registered");
        Ok(())
    }
}

#[async_trait]
impl OrganizationMembershipRepository for InMemoryAccessRepository {
    async fn find_organization_membership(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
    ) -> AppResult<Option<OrganizationMembership>> {
        Ok(self
            .memberships
            .read()
            .await
            .get(&(user_id, organization_id))
            .cloned())
    }

    async fn list_organization_memberships(
        &self,
        organization_id: OrganizationId,
    ) -> AppResult<Vec<OrganizationMembership>> {
        let memberships = self.memberships.read().await;

        let mut values: Vec<OrganizationMembership> = memberships
            .iter()
            .filter_map(|((_, stored_organization_id), membership)| {
                (stored_organization_id == &organization_id).then_some(membership.clone())
            })
            .collect();
        values.sort_by_key(|membership| membership.user_id);

        Ok(values)
    }

    async fn create_organization_membership(
        &self,
        membership: OrganizationMembership,
    ) -> AppResult<()> {
        let key = (membership.user_id, membership.organization_id);
        let mut memberships = self.memberships.write().await;

        if memberships.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "user '{}' is already a member of organization '{}'",
                key.0, key.1
            )));
        }

        memberships.insert(key, membership);
        Ok(())
    }

    async fn update_organization_membership_role(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
        role_name: &str,
    ) -> AppResult<()> {
        let mut memberships = self.memberships.write().await;
        let membership = memberships
            .get_mut(&(user_id, organization_id))
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "user '{user_id}' is not a member of organization '{organization_id}'"
                ))
            })?;

        membership.role_name = role_name.to_owned();
        Ok(())
    }

    async fn delete_organization_membership(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
    ) -> AppResult<()> {
        self.memberships
            .write()
            .await
            .remove(&(user_id, organization_id))
            .map(|_| ())
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "user '{user_id}' is not a member of organization '{organization_id}'"
                ))
            })
    }
}

#[async_trait]
impl ProcedureAssignmentRepository for InMemoryAccessRepository {
    async fn find_procedure_owning_organization(
        &self,
        procedure_id: ProcedureId,
    ) -> AppResult<Option<OrganizationId>> {
        Ok(self.procedures.read().await.get(&procedure_id).copied())
    }

    async fn find_procedure_assignment(
        &self,
        user_id: UserId,
        procedure_id: ProcedureId,
    ) -> AppResult<Option<ProcedureAssignment>> {
        Ok(self
            .assignments
            .read()
            .await
            .get(&(user_id, procedure_id))
            .cloned())
    }

    async fn list_procedure_assignments(
        &self,
        procedure_id: ProcedureId,
    ) -> AppResult<Vec<ProcedureAssignment>> {
        let assignments = self.assignments.read().await;

        let mut values: Vec<ProcedureAssignment> = assignments
            .iter()
            .filter_map(|((_, stored_procedure_id), assignment)| {
                (stored_procedure_id == &procedure_id).then_some(assignment.clone())
            })
            .collect();
        values.sort_by_key(|assignment| (assignment.assigned_at, assignment.user_id));

        Ok(values)
    }

    async fn list_assignments_for_user(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<ProcedureAssignment>> {
        let assignments = self.assignments.read().await;

        let mut values: Vec<ProcedureAssignment> = assignments
            .iter()
            .filter_map(|((stored_user_id, _), assignment)| {
                (stored_user_id == &user_id).then_some(assignment.clone())
            })
            .collect();
        values.sort_by(|left, right| {
            right
                .assigned_at
                .cmp(&left.assigned_at)
                .then_with(|| right.procedure_id.cmp(&left.procedure_id))
        });

        Ok(values)
    }

    async fn create_procedure_assignment(&self, assignment: ProcedureAssignment) -> AppResult<()> {
        let key = (assignment.user_id, assignment.procedure_id);

        if !self.procedures.read().await.contains_key(&key.1) {
            return Err(AppError::NotFound(format!("procedure '{}' not found", key.1)));
        }

        let mut assignments = self.assignments.write().await;
        if assignments.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "user '{}' is already assigned to procedure '{}'",
                key.0, key.1
            )));
        }

        assignments.insert(key, assignment);
        Ok(())
    }

    async fn update_procedure_assignment(&self, assignment: ProcedureAssignment) -> AppResult<()> {
        let key = (assignment.user_id, assignment.procedure_id);
        let mut assignments = self.assignments.write().await;

        let stored = assignments.get_mut(&key).ok_or_else(|| {
            AppError::NotFound(format!(
                "user '{}' is not assigned to procedure '{}'",
                key.0, key.1
            ))
        })?;

        *stored = assignment;
        Ok(())
    }

    async fn delete_procedure_assignment(
        &self,
        user_id: UserId,
        procedure_id: ProcedureId,
    ) -> AppResult<()> {
        self.assignments
            .write()
            .await
            .remove(&(user_id, procedure_id))
            .map(|_| ())
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "user '{user_id}' is not assigned to procedure '{procedure_id}'"
                ))
            })
    }
}
