use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use examboard_core::{AppError, AppResult, OrganizationId, ProcedureId, UserId};
use examboard_domain::{OrganizationMembership, ProcedureAssignment, Role};
use tokio::sync::Mutex;

use crate::{OrganizationMembershipRepository, ProcedureAssignmentRepository};

#[derive(Default)]
pub(crate) struct FakeAccessStore {
    memberships: Mutex<HashMap<(UserId, OrganizationId), OrganizationMembership>>,
    procedures: Mutex<HashMap<ProcedureId, OrganizationId>>,
    assignments: Mutex<HashMap<(UserId, ProcedureId), ProcedureAssignment>>,
}

impl FakeAccessStore {
    pub(crate) async fn with_member(self, user: i64, organization: i64, role: &str) -> Self {
        let membership = OrganizationMembership {
            user_id: UserId::new(user),
            organization_id: OrganizationId::new(organization),
            role_name: role.to_owned(),
        };
        self.memberships
            .lock()
            .await
            .insert((membership.user_id, membership.organization_id), membership);
        self
    }

    pub(crate) async fn with_procedure(self, procedure: i64, organization: i64) -> Self {
        self.procedures
            .lock()
            .await
            .insert(ProcedureId::new(procedure), OrganizationId::new(organization));
        self
    }

    pub(crate) async fn with_assignment(self, user: i64, procedure: i64, role: &str) -> Self {
        let assignment = ProcedureAssignment {
            role_name: role.to_owned(),
            ..ProcedureAssignment::pending(
                UserId::new(user),
                ProcedureId::new(procedure),
                Role::Member,
                Utc::now(),
            )
        };
        self.assignments
            .lock()
            .await
            .insert((assignment.user_id, assignment.procedure_id), assignment);
        self
    }

    pub(crate) async fn membership(
        &self,
        user: i64,
        organization: i64,
    ) -> Option<OrganizationMembership> {
        self.memberships
            .lock()
            .await
            .get(&(UserId::new(user), OrganizationId::new(organization)))
            .cloned()
    }

    pub(crate) async fn assignment(&self, user: i64, procedure: i64) -> Option<ProcedureAssignment> {
        self.assignments
            .lock()
            .await
            .get(&(UserId::new(user), ProcedureId::new(procedure)))
            .cloned()
    }
}

#[async_trait]
impl OrganizationMembershipRepository for FakeAccessStore {
    async fn find_organization_membership(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
    ) -> AppResult<Option<OrganizationMembership>> {
        Ok(self
            .memberships
            .lock()
            .await
            .get(&(user_id, organization_id))
            .cloned())
    }

    async fn list_organization_memberships(
        &self,
        organization_id: OrganizationId,
    ) -> AppResult<Vec<OrganizationMembership>> {
        let mut memberships: Vec<_> = self
            .memberships
            .lock()
            .await
            .values()
            .filter(|membership| membership.organization_id == organization_id)
            .cloned()
            .collect();
        memberships.sort_by_key(|membership| membership.user_id);
        Ok(memberships)
    }

    async fn create_organization_membership(
        &self,
        membership: OrganizationMembership,
    ) -> AppResult<()> {
        let mut memberships = self.memberships.lock().await;
        let key = (membership.user_id, membership.organization_id);
        if memberships.contains_key(&key) {
            return Err(AppError::Conflict("membership already exists".to_owned()));
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
        let mut memberships = self.memberships.lock().await;
        let membership = memberships
            .get_mut(&(user_id, organization_id))
            .ok_or_else(|| AppError::NotFound("membership not found".to_owned()))?;
        membership.role_name = role_name.to_owned();
        Ok(())
    }

    async fn delete_organization_membership(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
    ) -> AppResult<()> {
        self.memberships
            .lock()
            .await
            .remove(&(user_id, organization_id))
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("membership not found".to_owned()))
    }
}

#[async_trait]
impl ProcedureAssignmentRepository for FakeAccessStore {
    async fn find_procedure_owning_organization(
        &self,
        procedure_id: ProcedureId,
    ) -> AppResult<Option<OrganizationId>> {
        Ok(self.procedures.lock().await.get(&procedure_id).copied())
    }

    async fn find_procedure_assignment(
        &self,
        user_id: UserId,
        procedure_id: ProcedureId,
    ) -> AppResult<Option<ProcedureAssignment>> {
        Ok(self
            .assignments
            .lock()
            .await
            .get(&(user_id, procedure_id))
            .cloned())
    }

    async fn list_procedure_assignments(
        &self,
        procedure_id: ProcedureId,
    ) -> AppResult<Vec<ProcedureAssignment>> {
        let mut assignments: Vec<_> = self
            .assignments
            .lock()
            .await
            .values()
            .filter(|assignment| assignment.procedure_id == procedure_id)
            .cloned()
            .collect();
        assignments.sort_by_key(|assignment| (assignment.assigned_at, assignment.user_id));
        Ok(assignments)
    }

    async fn list_assignments_for_user(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<ProcedureAssignment>> {
        let mut assignments: Vec<_> = self
            .assignments
            .lock()
            .await
            .values()
            .filter(|assignment| assignment.user_id == user_id)
            .cloned()
            .collect();
        assignments.sort_by(|left, right| right.assigned_at.cmp(&left.assigned_at));
        Ok(assignments)
    }

    async fn create_procedure_assignment(&self, assignment: ProcedureAssignment) -> AppResult<()> {
        let mut assignments = self.assignments.lock().await;
        let key = (assignment.user_id, assignment.procedure_id);
        if assignments.contains_key(&key) {
            return Err(AppError::Conflict("assignment already exists".to_owned()));
        }
        assignments.insert(key, assignment);
        Ok(())
    }

    async fn update_procedure_assignment(&self, assignment: ProcedureAssignment) -> AppResult<()> {
        let mut assignments = self.assignments.lock().await;
        let key = (assignment.user_id, assignment.procedure_id);
        if !assignments.contains_key(&key) {
            return Err(AppError::NotFound("assignment not found".to_owned()));
        }
        assignments.insert(key, assignment);
        Ok(())
    }

    async fn delete_procedure_assignment(
        &self,
        user_id: UserId,
        procedure_id: ProcedureId,
    ) -> AppResult<()> {
        self.assignments
            .lock()
            .await
            .remove(&(user_id, procedure_id))
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("assignment not found".to_owned()))
    }
}
