use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use examboard_core::{OrganizationId, Principal, UserId};
use examboard_domain::Role;

use crate::dto::{
    InviteMemberRequest, MembershipResponse, OrganizationPermissionsResponse,
    UpdateMemberRoleRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn organization_permissions_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(organization_id): Path<OrganizationId>,
) -> ApiResult<Json<OrganizationPermissionsResponse>> {
    let permissions = state
        .access_guard
        .organization_permissions(&principal, organization_id)
        .await?;

    Ok(Json(OrganizationPermissionsResponse::from(permissions)))
}

pub async fn list_members_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(organization_id): Path<OrganizationId>,
) -> ApiResult<Json<Vec<MembershipResponse>>> {
    let members = state
        .membership_service
        .list_members(&principal, organization_id)
        .await?
        .into_iter()
        .map(MembershipResponse::from)
        .collect();

    Ok(Json(members))
}

pub async fn invite_member_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(organization_id): Path<OrganizationId>,
    Json(payload): Json<InviteMemberRequest>,
) -> ApiResult<(StatusCode, Json<MembershipResponse>)> {
    let role = Role::from_str(payload.role_name.as_str())?;

    let membership = state
        .membership_service
        .invite_member(
            &principal,
            organization_id,
            UserId::new(payload.user_id),
            role,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(MembershipResponse::from(membership))))
}

pub async fn update_member_role_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path((organization_id, user_id)): Path<(OrganizationId, UserId)>,
    Json(payload): Json<UpdateMemberRoleRequest>,
) -> ApiResult<Json<MembershipResponse>> {
    let role = Role::from_str(payload.role_name.as_str())?;

    let membership = state
        .membership_service
        .change_member_role(&principal, organization_id, user_id, role)
        .await?;

    Ok(Json(MembershipResponse::from(membership)))
}

pub async fn remove_member_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path((organization_id, user_id)): Path<(OrganizationId, UserId)>,
) -> ApiResult<StatusCode> {
    state
        .membership_service
        .remove_member(&principal, organization_id, user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
