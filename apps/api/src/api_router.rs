use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, post, put};
use examboard_core::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::PostgresStore;

use crate::state::AppState;
use crate::{auth, handlers, middleware};

pub fn build_router(
    app_state: AppState,
    frontend_url: &str,
    session_layer: SessionManagerLayer<PostgresStore>,
) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route("/api/roles", get(handlers::roles::list_staff_roles_handler))
        .route(
            "/api/organizations/{organization_id}/permissions",
            get(handlers::organizations::organization_permissions_handler),
        )
        .route(
            "/api/organizations/{organization_id}/members",
            get(handlers::organizations::list_members_handler)
                .post(handlers::organizations::invite_member_handler),
        )
        .route(
            "/api/organizations/{organization_id}/members/{user_id}",
            put(handlers::organizations::update_member_role_handler)
                .delete(handlers::organizations::remove_member_handler),
        )
        .route(
            "/api/procedures/{procedure_id}/permissions",
            get(handlers::procedures::procedure_permissions_handler),
        )
        .route(
            "/api/procedures/{procedure_id}/assignments",
            get(handlers::procedures::list_assignments_handler)
                .post(handlers::procedures::assign_staff_handler),
        )
        .route(
            "/api/procedures/{procedure_id}/assignments/{user_id}",
            delete(handlers::procedures::remove_assignment_handler),
        )
        .route("/api/me/procedures", get(handlers::me::my_procedures_handler))
        .route(
            "/api/me/procedures/accept",
            post(handlers::me::accept_my_procedures_handler),
        )
        .route(
            "/api/candidate/procedures/{procedure_id}/session",
            get(handlers::candidate::candidate_session_handler),
        )
        .route_layer(from_fn(middleware::require_auth));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(session_layer)
        .layer(build_cors_layer(frontend_url)?)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}

fn build_cors_layer(frontend_url: &str) -> Result<CorsLayer, AppError> {
    Ok(CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(frontend_url)
                .map_err(|error| AppError::Validation(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]))
}
