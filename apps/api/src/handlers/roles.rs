use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use convoy_application::CreateRoleInput;
use convoy_core::UserIdentity;

use crate::dto::{CreateRoleRequest, RoleResponse, UpdateRolePermissionsRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_roles_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .role_service
        .list_roles(&user)
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn get_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(role_name): Path<String>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .role_service
        .get_role(&user, role_name.as_str())
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn create_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleResponse>)> {
    let role = state
        .role_service
        .create_role(
            &user,
            CreateRoleInput {
                name: payload.name,
                display_name: payload.display_name,
                description: payload.description,
                permissions: payload.permissions,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(RoleResponse::from(role))))
}

pub async fn update_role_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(role_name): Path<String>,
    Json(payload): Json<UpdateRolePermissionsRequest>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .role_service
        .update_role_permissions(&user, role_name.as_str(), payload.permissions)
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn delete_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(role_name): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .role_service
        .delete_role(&user, role_name.as_str())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
