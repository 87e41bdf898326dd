mod access;
mod common;

pub use access::{
    AssignStaffRequest, CandidateSessionResponse, InviteMemberRequest, MembershipResponse,
    OrganizationPermissionsResponse, ProcedureAssignmentResponse, ProcedurePermissionsResponse,
    RoleResponse, UpdateMemberRoleRequest,
};
pub use common::{CandidateBindingResponse, HealthResponse, PrincipalResponse};
