use axum::Json;
use axum::extract::{Extension, State};
use examboard_core::Principal;

use crate::dto::ProcedureAssignmentResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn my_procedures_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<Vec<ProcedureAssignmentResponse>>> {
    let assignments = state
        .staff_assignment_service
        .list_my_assignments(&principal)
        .await?
        .into_iter()
        .map(ProcedureAssignmentResponse::from)
        .collect();

    Ok(Json(assignments))
}

/// Called by the frontend right after login.
pub async fn accept_my_procedures_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<Vec<ProcedureAssignmentResponse>>> {
    let accepted = state
        .staff_assignment_service
        .accept_pending_assignments(&principal)
        .await?
        .into_iter()
        .map(ProcedureAssignmentResponse::from)
        .collect();

    Ok(Json(accepted))
}
