use examboard_core::{AppError, AppResult, CandidateBinding, Principal, ProcedureId};
use tracing::warn;

/// Ensures a candidate session addresses only the procedure it was bound to at login.
///
/// This check is independent of the permission matrix and never touches the
/// membership stores.
pub fn require_candidate_procedure(
    principal: &Principal,
    procedure_id: ProcedureId,
) -> AppResult<CandidateBinding> {
    let binding = principal.candidate_binding().ok_or_else(|| {
        warn!(
            user_id = %principal.user_id(),
            %procedure_id,
            "candidate route called without candidate session"
        );
        AppError::Forbidden("candidate session required".to_owned())
    })?;

    if binding.procedure_id != procedure_id {
        warn!(
            user_id = %principal.user_id(),
            %procedure_id,
            bound_procedure_id = %binding.procedure_id,
            "candidate addressed a foreign procedure"
        );
        return Err(AppError::Forbidden(format!(
            "candidate session is not bound to procedure '{procedure_id}'"
        )));
    }

    Ok(binding)
}
