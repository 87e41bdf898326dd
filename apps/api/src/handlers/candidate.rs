use axum::Json;
use axum::extract::{Extension, Path};
use examboard_application::require_candidate_procedure;
use examboard_core::{Principal, ProcedureId};

use crate::dto::CandidateSessionResponse;
use crate::error::ApiResult;

pub async fn candidate_session_handler(
    Extension(principal): Extension<Principal>,
    Path(procedure_id): Path<ProcedureId>,
) -> ApiResult<Json<CandidateSessionResponse>> {
    let binding = require_candidate_procedure(&principal, procedure_id)?;

    Ok(Json(CandidateSessionResponse {
        contender_id: binding.contender_id.get(),
        procedure_id: binding.procedure_id.get(),
    }))
}
