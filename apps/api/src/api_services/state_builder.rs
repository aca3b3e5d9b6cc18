use std::sync::Arc;

use convoy_application::{
    AuthorizationService, CustomRoleRepository, PermissionService, RoleService, UserDirectory,
    UserRoleService,
};

use crate::state::AppState;

pub fn build_app_state(
    role_repository: Arc<dyn CustomRoleRepository>,
    user_directory: Arc<dyn UserDirectory>,
) -> AppState {
    let authorization_service = AuthorizationService::new(role_repository.clone());

    AppState {
        permission_service: PermissionService::new(),
        role_service: RoleService::new(authorization_service.clone(), role_repository),
        user_role_service: UserRoleService::new(authorization_service, user_directory.clone()),
        user_directory,
    }
}
