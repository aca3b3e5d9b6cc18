use convoy_application::UserPermissions;
use convoy_domain::User;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Effective permissions of a user together with the roles they may assign.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/user-permissions-response.ts"
)]
pub struct UserPermissionsResponse {
    pub user_permissions: Vec<String>,
    pub user_role: String,
    pub assignable_roles: Vec<String>,
}

impl From<UserPermissions> for UserPermissionsResponse {
    fn from(value: UserPermissions) -> Self {
        Self {
            user_permissions: value.permissions.identifiers(),
            user_role: value.role,
            assignable_roles: value.assignable_roles,
        }
    }
}

/// Incoming payload for a user role change.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/assign-user-role-request.ts"
)]
pub struct AssignUserRoleRequest {
    pub role: String,
}

/// API representation of an organization member.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/user-response.ts"
)]
pub struct UserResponse {
    pub id: String,
    pub display_name: String,
    pub organization_role: String,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id().to_string(),
            display_name: value.display_name().to_owned(),
            organization_role: value.organization_role().to_owned(),
        }
    }
}
