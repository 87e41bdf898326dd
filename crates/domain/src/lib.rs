//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod capability;
mod membership;
mod permission_matrix;
mod role;
mod role_permissions;

pub use capability::{
    Capability, EvaluationAction, ProcedureAction, Resource, StorageAction, SurveyAction,
    TemplateAction, UserAction,
};
pub use membership::{AssignmentStatus, OrganizationMembership, ProcedureAssignment};
pub use permission_matrix::{
    EvaluationGrants, PermissionMatrix, ProcedureGrants, StorageGrants, SurveyGrants,
    TemplateGrants, UserGrants,
};
pub use role::{Role, resolve_permissions};
