use axum::Json;
use examboard_domain::Role;

use crate::dto::RoleResponse;

/// Lists the roles an admin may assign to procedure staff.
pub async fn list_staff_roles_handler() -> Json<Vec<RoleResponse>> {
    Json(
        Role::staff_roles()
            .iter()
            .copied()
            .map(RoleResponse::from)
            .collect(),
    )
}
