use examboard_application::{AccessGuard, MembershipService, StaffAssignmentService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub access_guard: AccessGuard,
    pub membership_service: MembershipService,
    pub staff_assignment_service: StaffAssignmentService,
    pub frontend_url: String,
}
