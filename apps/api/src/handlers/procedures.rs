use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use examboard_core::{Principal, ProcedureId, UserId};
use examboard_domain::Role;

use crate::dto::{AssignStaffRequest, ProcedureAssignmentResponse, ProcedurePermissionsResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn procedure_permissions_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(procedure_id): Path<ProcedureId>,
) -> ApiResult<Json<ProcedurePermissionsResponse>> {
    let permissions = state
        .access_guard
        .procedure_permissions(&principal, procedure_id)
        .await?;

    Ok(Json(ProcedurePermissionsResponse::from(permissions)))
}

pub async fn list_assignments_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(procedure_id): Path<ProcedureId>,
) -> ApiResult<Json<Vec<ProcedureAssignmentResponse>>> {
    let assignments = state
        .staff_assignment_service
        .list_procedure_assignments(&principal, procedure_id)
        .await?
        .into_iter()
        .map(ProcedureAssignmentResponse::from)
        .collect();

    Ok(Json(assignments))
}

pub async fn assign_staff_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(procedure_id): Path<ProcedureId>,
    Json(payload): Json<AssignStaffRequest>,
) -> ApiResult<(StatusCode, Json<ProcedureAssignmentResponse>)> {
    let role = Role::from_str(payload.role_name.as_str())?;

    let assignment = state
        .staff_assignment_service
        .assign_staff(&principal, procedure_id, UserId::new(payload.user_id), role)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProcedureAssignmentResponse::from(assignment)),
    ))
}

pub async fn remove_assignment_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path((procedure_id, user_id)): Path<(ProcedureId, UserId)>,
) -> ApiResult<StatusCode> {
    state
        .staff_assignment_service
        .remove_assignment(&principal, procedure_id, user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
