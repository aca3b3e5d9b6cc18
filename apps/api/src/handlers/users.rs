use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, State};
use convoy_core::UserIdentity;
use convoy_domain::UserId;

use crate::dto::{AssignUserRoleRequest, UserPermissionsResponse, UserResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn current_user_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<UserPermissionsResponse>> {
    let permissions = state
        .user_role_service
        .current_user_permissions(&user)
        .await?;

    Ok(Json(UserPermissionsResponse::from(permissions)))
}

pub async fn user_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UserPermissionsResponse>> {
    let user_id = UserId::from_str(user_id.as_str())?;
    let permissions = state
        .user_role_service
        .user_permissions(&user, user_id)
        .await?;

    Ok(Json(UserPermissionsResponse::from(permissions)))
}

pub async fn assign_user_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<String>,
    Json(payload): Json<AssignUserRoleRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = UserId::from_str(user_id.as_str())?;
    let updated = state
        .user_role_service
        .assign_role(&user, user_id, payload.role.as_str())
        .await?;

    Ok(Json(UserResponse::from(updated)))
}
