//! Boolean predicates over a resolved permission set.

use crate::catalog::{
    ORG_ADMIN, ROLES_CREATE, ROLES_DELETE, ROLES_EDIT, ROLES_VIEW, USERS_EDIT, USERS_VIEW,
};
use crate::permission::{Permission, PermissionSet};

/// Returns whether the set holds `permission`.
#[must_use]
pub fn has_permission(permissions: &PermissionSet, permission: Permission) -> bool {
    permissions.contains(permission)
}

/// Returns whether the holder may create custom roles.
#[must_use]
pub fn can_create_roles(permissions: &PermissionSet) -> bool {
    has_permission(permissions, ROLES_CREATE) || has_permission(permissions, ORG_ADMIN)
}

/// Returns whether the holder may edit custom role permissions.
#[must_use]
pub fn can_edit_roles(permissions: &PermissionSet) -> bool {
    has_permission(permissions, ROLES_EDIT) || has_permission(permissions, ORG_ADMIN)
}

/// Returns whether the holder may delete custom roles.
#[must_use]
pub fn can_delete_roles(permissions: &PermissionSet) -> bool {
    has_permission(permissions, ROLES_DELETE) || has_permission(permissions, ORG_ADMIN)
}

/// Returns whether the holder may perform any role management operation.
#[must_use]
pub fn can_manage_roles(permissions: &PermissionSet) -> bool {
    can_create_roles(permissions)
        || can_edit_roles(permissions)
        || has_permission(permissions, ROLES_DELETE)
}

/// Returns whether the holder may list and inspect roles.
#[must_use]
pub fn can_view_roles(permissions: &PermissionSet) -> bool {
    has_permission(permissions, ROLES_VIEW) || can_manage_roles(permissions)
}

/// Returns whether the holder may inspect other users' permissions.
#[must_use]
pub fn can_view_users(permissions: &PermissionSet) -> bool {
    has_permission(permissions, USERS_VIEW) || can_assign_user_roles(permissions)
}

/// Returns whether the holder may change another user's role.
#[must_use]
pub fn can_assign_user_roles(permissions: &PermissionSet) -> bool {
    has_permission(permissions, USERS_EDIT) || has_permission(permissions, ORG_ADMIN)
}

#[cfg(test)]
mod tests {
    use super::{
        can_assign_user_roles, can_create_roles, can_delete_roles, can_edit_roles,
        can_manage_roles, can_view_roles, can_view_users, has_permission,
    };
    use crate::catalog::{
        FLEET_VIEW, ORG_ADMIN, ROLES_DELETE, ROLES_EDIT, ROLES_VIEW, USERS_EDIT, USERS_VIEW,
    };
    use crate::permission::{Permission, PermissionSet};

    fn set_of(permissions: &[Permission]) -> PermissionSet {
        permissions.iter().copied().collect()
    }

    #[test]
    fn org_admin_alone_grants_role_management() {
        let permissions = set_of(&[ORG_ADMIN]);
        assert!(can_create_roles(&permissions));
        assert!(can_edit_roles(&permissions));
        assert!(can_delete_roles(&permissions));
        assert!(can_manage_roles(&permissions));
        assert!(can_assign_user_roles(&permissions));
    }

    #[test]
    fn delete_only_still_counts_as_managing() {
        let permissions = set_of(&[ROLES_DELETE]);
        assert!(!can_create_roles(&permissions));
        assert!(!can_edit_roles(&permissions));
        assert!(can_manage_roles(&permissions));
    }

    #[test]
    fn edit_permission_grants_edit_but_not_create() {
        let permissions = set_of(&[ROLES_EDIT]);
        assert!(can_edit_roles(&permissions));
        assert!(!can_create_roles(&permissions));
    }

    #[test]
    fn viewing_roles_needs_roles_view_or_management() {
        assert!(can_view_roles(&set_of(&[ROLES_VIEW])));
        assert!(can_view_roles(&set_of(&[ROLES_EDIT])));
        assert!(!can_view_roles(&set_of(&[FLEET_VIEW])));
    }

    #[test]
    fn viewing_users_needs_users_view_or_assignment_rights() {
        assert!(can_view_users(&set_of(&[USERS_VIEW])));
        assert!(can_view_users(&set_of(&[USERS_EDIT])));
        assert!(!can_view_users(&set_of(&[ROLES_VIEW])));
    }

    #[test]
    fn empty_set_grants_nothing() {
        let permissions = PermissionSet::new();
        assert!(!has_permission(&permissions, FLEET_VIEW));
        assert!(!can_manage_roles(&permissions));
        assert!(!can_assign_user_roles(&permissions));
    }
}
