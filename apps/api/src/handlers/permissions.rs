use axum::Json;
use axum::extract::State;

use crate::dto::{PermissionStructureResponse, TogglePermissionRequest, TogglePermissionResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn permission_structure_handler(
    State(state): State<AppState>,
) -> Json<PermissionStructureResponse> {
    Json(PermissionStructureResponse::from(
        state.permission_service.permission_structure(),
    ))
}

pub async fn toggle_permission_handler(
    State(state): State<AppState>,
    Json(payload): Json<TogglePermissionRequest>,
) -> ApiResult<Json<TogglePermissionResponse>> {
    let permissions = state
        .permission_service
        .toggle(payload.permission.as_str(), &payload.current_permissions)?;

    Ok(Json(TogglePermissionResponse {
        permissions: permissions.identifiers(),
    }))
}
