use std::sync::Arc;

use examboard_application::{
    AccessGuard, MembershipService, OrganizationMembershipRepository,
    ProcedureAssignmentRepository, StaffAssignmentService,
};
use examboard_infrastructure::{PostgresMembershipRepository, PostgresProcedureRepository};
use sqlx::PgPool;

use crate::state::AppState;

pub fn build_app_state(pool: PgPool, frontend_url: String) -> AppState {
    let memberships: Arc<dyn OrganizationMembershipRepository> =
        Arc::new(PostgresMembershipRepository::new(pool.clone()));
    let procedures: Arc<dyn ProcedureAssignmentRepository> =
        Arc::new(PostgresProcedureRepository::new(pool));

    let access_guard = AccessGuard::new(memberships.clone(), procedures.clone());
    let membership_service = MembershipService::new(access_guard.clone(), memberships.clone());
    let staff_assignment_service =
        StaffAssignmentService::new(access_guard.clone(), memberships, procedures);

    AppState {
        access_guard,
        membership_service,
        staff_assignment_service,
        frontend_url,
    }
}
