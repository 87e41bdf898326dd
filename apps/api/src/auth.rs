use axum::Json;
use axum::extract::Extension;
use examboard_core::Principal;

use crate::dto::PrincipalResponse;

/// Session key the identity provider stores the authenticated [`Principal`] under.
pub const SESSION_PRINCIPAL_KEY: &str = "principal";

pub async fn me_handler(Extension(principal): Extension<Principal>) -> Json<PrincipalResponse> {
    Json(PrincipalResponse::from(&principal))
}
