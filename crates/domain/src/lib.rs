//! Domain entities and invariants of the role and permission engine.

#![forbid(unsafe_code)]

mod authorization;
mod cascade;
pub mod catalog;
mod hierarchy;
mod permission;
mod protection;
mod role;
mod user;

pub use authorization::{
    can_assign_user_roles, can_create_roles, can_delete_roles, can_edit_roles, can_manage_roles,
    can_view_roles, can_view_users, has_permission,
};
pub use cascade::{cascade_closure, toggle_identifier, toggle_permission};
pub use catalog::{CategoryDefinition, GranularGroup, PermissionCatalog};
pub use hierarchy::{assignable_roles, can_assign, can_reassign};
pub use permission::{
    Permission, PermissionAction, PermissionCategory, PermissionScope, PermissionSet,
};
pub use protection::{
    PROTECTED_ROLE_NAMES, assert_creatable, assert_deletable, assert_modifiable,
    is_protected_role,
};
pub use role::{
    ADMIN_ROLE, CustomRole, MANAGER_ROLE, OWNER_ROLE, ROLE_DESCRIPTION_MAX_LENGTH,
    ROLE_DISPLAY_NAME_MAX_LENGTH, ROLE_NAME_MAX_LENGTH, Role, RoleName, RoleTemplate,
    RoleTemplateStore, USER_ROLE, VIEWER_ROLE,
};
pub use user::{User, UserId};
