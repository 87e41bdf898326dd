use async_trait::async_trait;
use examboard_core::{AppResult, OrganizationId, ProcedureId, UserId};
use examboard_domain::{OrganizationMembership, ProcedureAssignment};

/// Port for organization membership records.
///
/// The access guard only calls [`find_organization_membership`]; the write
/// methods serve membership administration.
///
/// [`find_organization_membership`]: OrganizationMembershipRepository::find_organization_membership
#[async_trait]
pub trait OrganizationMembershipRepository: Send + Sync {
    /// Finds the membership for a user in an organization.
    async fn find_organization_membership(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
    ) -> AppResult<Option<OrganizationMembership>>;

    /// Lists memberships of an organization ordered by user id.
    async fn list_organization_memberships(
        &self,
        organization_id: OrganizationId,
    ) -> AppResult<Vec<OrganizationMembership>>;

    /// Inserts a membership. Fails with `Conflict` when the pair already exists.
    async fn create_organization_membership(
        &self,
        membership: OrganizationMembership,
    ) -> AppResult<()>;

    /// Replaces the role of an existing membership.
    async fn update_organization_membership_role(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
        role_name: &str,
    ) -> AppResult<()>;

    /// Deletes a membership.
    async fn delete_organization_membership(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
    ) -> AppResult<()>;
}

/// Port for procedures and their staff assignments.
#[async_trait]
pub trait ProcedureAssignmentRepository: Send + Sync {
    /// Returns the organization owning a procedure, or `None` when the
    /// procedure does not exist.
    async fn find_procedure_owning_organization(
        &self,
        procedure_id: ProcedureId,
    ) -> AppResult<Option<OrganizationId>>;

    /// Finds the assignment for a user in a procedure.
    async fn find_procedure_assignment(
        &self,
        user_id: UserId,
        procedure_id: ProcedureId,
    ) -> AppResult<Option<ProcedureAssignment>>;

    /// Lists assignments of a procedure ordered by assignment time.
    async fn list_procedure_assignments(
        &self,
        procedure_id: ProcedureId,
    ) -> AppResult<Vec<ProcedureAssignment>>;

    /// Lists assignments of a user, newest first.
    async fn list_assignments_for_user(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<ProcedureAssignment>>;

    /// Inserts an assignment. Fails with `Conflict` when the pair already exists.
    async fn create_procedure_assignment(&self, assignment: ProcedureAssignment) -> AppResult<()>;

    /// Persists status changes of an existing assignment.
    async fn update_procedure_assignment(&self, assignment: ProcedureAssignment) -> AppResult<()>;

    /// Deletes an assignment.
    async fn delete_procedure_assignment(
        &self,
        user_id: UserId,
        procedure_id: ProcedureId,
    ) -> AppResult<()>;
}
