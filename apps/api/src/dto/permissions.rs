use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

mod conversions;

/// Catalog view consumed by the role editor.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/permission-structure-response.ts"
)]
pub struct PermissionStructureResponse {
    pub permission_structure: BTreeMap<String, CategoryStructureResponse>,
    pub role_templates: BTreeMap<String, RoleTemplateResponse>,
    pub block_permissions: BTreeMap<String, String>,
    pub granular_permissions: BTreeMap<String, String>,
}

/// One permission category with its blocks and granular groups.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/category-structure-response.ts"
)]
pub struct CategoryStructureResponse {
    pub name: String,
    pub icon: String,
    pub blocks: Vec<String>,
    pub granular: BTreeMap<String, GranularGroupResponse>,
}

/// Named group of granular permissions.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/granular-group-response.ts"
)]
pub struct GranularGroupResponse {
    pub name: String,
    pub permissions: Vec<String>,
}

/// Summary of a system role template.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/role-template-response.ts"
)]
pub struct RoleTemplateResponse {
    pub name: String,
    pub description: String,
    pub block_permissions: Vec<String>,
    pub granular_permissions: Vec<String>,
}

/// Incoming payload for a single cascade toggle.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/toggle-permission-request.ts"
)]
pub struct TogglePermissionRequest {
    pub permission: String,
    #[serde(default)]
    pub current_permissions: Vec<String>,
}

/// Permission set after a cascade toggle.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/toggle-permission-response.ts"
)]
pub struct TogglePermissionResponse {
    pub permissions: Vec<String>,
}
