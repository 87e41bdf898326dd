use examboard_application::ProcedurePermissions;
use examboard_domain::{OrganizationMembership, PermissionMatrix, ProcedureAssignment, Role};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Assignable procedure role with its UI label.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub name: String,
    pub display_name: String,
}

/// Effective organization-tier permissions of the caller.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/organization-permissions-response.ts"
)]
pub struct OrganizationPermissionsResponse {
    #[ts(type = "number")]
    pub organization_id: i64,
    pub role_name: String,
    pub is_admin: bool,
    #[ts(type = "Record<string, Record<string, boolean>>")]
    pub permissions: PermissionMatrix,
    pub granted: Vec<String>,
}

/// Effective procedure-tier permissions of the caller.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/procedure-permissions-response.ts"
)]
pub struct ProcedurePermissionsResponse {
    #[ts(type = "number")]
    pub procedure_id: i64,
    pub procedure_role: String,
    pub is_admin: bool,
    #[ts(type = "Record<string, Record<string, boolean>>")]
    pub permissions: PermissionMatrix,
    pub granted: Vec<String>,
}

/// API representation of an organization membership.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/membership-response.ts"
)]
pub struct MembershipResponse {
    #[ts(type = "number")]
    pub user_id: i64,
    #[ts(type = "number")]
    pub organization_id: i64,
    pub role_name: String,
    pub role_display_name: Option<String>,
}

/// Incoming payload for organization member invitation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/invite-member-request.ts"
)]
pub struct InviteMemberRequest {
    #[ts(type = "number")]
    pub user_id: i64,
    pub role_name: String,
}

/// Incoming payload for organization role changes.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-member-role-request.ts"
)]
pub struct UpdateMemberRoleRequest {
    pub role_name: String,
}

/// Incoming payload for procedure staff assignment.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assign-staff-request.ts"
)]
pub struct AssignStaffRequest {
    #[ts(type = "number")]
    pub user_id: i64,
    pub role_name: String,
}

/// API representation of a procedure assignment.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/procedure-assignment-response.ts"
)]
pub struct ProcedureAssignmentResponse {
    #[ts(type = "number")]
    pub user_id: i64,
    #[ts(type = "number")]
    pub procedure_id: i64,
    pub role_name: String,
    pub role_display_name: Option<String>,
    pub status: String,
    pub assigned_at: String,
    pub accepted_at: Option<String>,
}

/// Candidate test session scope.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/candidate-session-response.ts"
)]
pub struct CandidateSessionResponse {
    #[ts(type = "number")]
    pub contender_id: i64,
    #[ts(type = "number")]
    pub procedure_id: i64,
}

fn granted_names(permissions: &PermissionMatrix) -> Vec<String> {
    permissions
        .granted()
        .into_iter()
        .map(|capability| capability.to_string())
        .collect()
}

impl From<Role> for RoleResponse {
    fn from(value: Role) -> Self {
        Self {
            name: value.as_str().to_owned(),
            display_name: value.display_name().to_owned(),
        }
    }
}

impl From<(OrganizationMembership, PermissionMatrix)> for OrganizationPermissionsResponse {
    fn from((membership, permissions): (OrganizationMembership, PermissionMatrix)) -> Self {
        Self {
            organization_id: membership.organization_id.get(),
            is_admin: membership.is_admin(),
            role_name: membership.role_name,
            granted: granted_names(&permissions),
            permissions,
        }
    }
}

impl From<ProcedurePermissions> for ProcedurePermissionsResponse {
    fn from(value: ProcedurePermissions) -> Self {
        Self {
            procedure_id: value.procedure_id.get(),
            procedure_role: value.procedure_role,
            is_admin: value.is_admin,
            granted: granted_names(&value.permissions),
            permissions: value.permissions,
        }
    }
}

impl From<OrganizationMembership> for MembershipResponse {
    fn from(value: OrganizationMembership) -> Self {
        Self {
            user_id: value.user_id.get(),
            organization_id: value.organization_id.get(),
            role_display_name: value.role().map(|role| role.display_name().to_owned()),
            role_name: value.role_name,
        }
    }
}

impl From<ProcedureAssignment> for ProcedureAssignmentResponse {
    fn from(value: ProcedureAssignment) -> Self {
        Self {
            user_id: value.user_id.get(),
            procedure_id: value.procedure_id.get(),
            role_display_name: value.role().map(|role| role.display_name().to_owned()),
            role_name: value.role_name,
            status: value.status.as_str().to_owned(),
            assigned_at: value.assigned_at.to_rfc3339(),
            accepted_at: value.accepted_at.map(|accepted_at| accepted_at.to_rfc3339()),
        }
    }
}
