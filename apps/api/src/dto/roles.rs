use convoy_domain::{CustomRole, Role};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for custom role creation.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-role-request.ts"
)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Incoming payload replacing a custom role's permissions.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-role-permissions-request.ts"
)]
pub struct UpdateRolePermissionsRequest {
    pub permissions: Vec<String>,
}

/// API representation of a system or custom role.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub is_custom: bool,
    pub permissions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub updated_at: Option<String>,
}

impl From<Role> for RoleResponse {
    fn from(value: Role) -> Self {
        Self {
            name: value.name().to_owned(),
            display_name: value.display_name().to_owned(),
            description: value.description().to_owned(),
            is_custom: value.is_custom(),
            permissions: value.permissions().identifiers(),
            created_at: value.created_at().map(|timestamp| timestamp.to_rfc3339()),
            updated_at: value.updated_at().map(|timestamp| timestamp.to_rfc3339()),
        }
    }
}

impl From<CustomRole> for RoleResponse {
    fn from(value: CustomRole) -> Self {
        Self::from(Role::Custom(value))
    }
}
