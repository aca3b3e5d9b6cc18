//! Application services and ports.

#![forbid(unsafe_code)]

mod authorization_service;
mod permission_service;
mod role_ports;
mod role_service;
mod user_role_service;

#[cfg(test)]
mod test_fakes;

pub use authorization_service::AuthorizationService;
pub use permission_service::{
    CategoryStructure, GranularGroupStructure, PermissionService, PermissionStructure,
    RoleTemplateSummary,
};
pub use role_ports::{CustomRoleRepository, UserDirectory};
pub use role_service::{CreateRoleInput, RoleService};
pub use user_role_service::{UserPermissions, UserRoleService};
