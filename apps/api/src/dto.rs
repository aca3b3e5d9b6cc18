use serde::Serialize;
use ts_rs::TS;

mod permissions;
mod roles;
mod users;

pub use permissions::{
    CategoryStructureResponse, GranularGroupResponse, PermissionStructureResponse,
    RoleTemplateResponse, TogglePermissionRequest, TogglePermissionResponse,
};
pub use roles::{CreateRoleRequest, RoleResponse, UpdateRolePermissionsRequest};
pub use users::{AssignUserRoleRequest, UserPermissionsResponse, UserResponse};

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}
