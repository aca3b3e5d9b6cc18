use std::sync::Arc;

use convoy_application::{PermissionService, RoleService, UserDirectory, UserRoleService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub permission_service: PermissionService,
    pub role_service: RoleService,
    pub user_role_service: UserRoleService,
    pub user_directory: Arc<dyn UserDirectory>,
}
