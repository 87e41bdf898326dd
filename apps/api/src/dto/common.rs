use examboard_core::{AuthProvider, CandidateBinding, Principal};
use serde::Serialize;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Candidate session binding.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/candidate-binding-response.ts"
)]
pub struct CandidateBindingResponse {
    #[ts(type = "number")]
    pub contender_id: i64,
    #[ts(type = "number")]
    pub procedure_id: i64,
}

/// API representation of the authenticated principal.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/principal-response.ts"
)]
pub struct PrincipalResponse {
    #[ts(type = "number")]
    pub user_id: i64,
    pub display_name: String,
    pub email: Option<String>,
    pub auth_provider: String,
    pub candidate: Option<CandidateBindingResponse>,
}

impl From<CandidateBinding> for CandidateBindingResponse {
    fn from(value: CandidateBinding) -> Self {
        Self {
            contender_id: value.contender_id.get(),
            procedure_id: value.procedure_id.get(),
        }
    }
}

impl From<&Principal> for PrincipalResponse {
    fn from(value: &Principal) -> Self {
        let auth_provider = match value.auth_provider() {
            AuthProvider::Federated => "federated",
            AuthProvider::Local => "local",
        };

        Self {
            user_id: value.user_id().get(),
            display_name: value.display_name().to_owned(),
            email: value.email().map(ToOwned::to_owned),
            auth_provider: auth_provider.to_owned(),
            candidate: value.candidate_binding().map(CandidateBindingResponse::from),
        }
    }
}
