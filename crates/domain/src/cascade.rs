//! Permission toggling with block-to-granular cascades.

use std::str::FromStr;

use convoy_core::AppResult;

use crate::catalog::PermissionCatalog;
use crate::permission::{Permission, PermissionSet};

/// Returns the set obtained by toggling `permission` in `current`.
///
/// Enabling a block permission also enables every granular permission it
/// implies. Disabling a block permission removes those granular permissions
/// unless another block permission still active in the set implies them.
#[must_use]
pub fn toggle_permission(permission: Permission, current: &PermissionSet) -> PermissionSet {
    let mut next = current.clone();

    if next.contains(permission) {
        disable(permission, &mut next);
    } else {
        enable(permission, &mut next);
    }

    next
}

/// Parses `identifier` and toggles it in `current`.
///
/// Unknown identifiers fail with `AppError::InvalidPermission`.
pub fn toggle_identifier(identifier: &str, current: &PermissionSet) -> AppResult<PermissionSet> {
    let permission = Permission::from_str(identifier)?;
    Ok(toggle_permission(permission, current))
}

/// Returns `set` extended with every granular permission implied by its blocks.
#[must_use]
pub fn cascade_closure(set: &PermissionSet) -> PermissionSet {
    let mut closed = set.clone();
    for block in set.block_permissions() {
        closed.extend(PermissionCatalog::granular_implied_by(block));
    }
    closed
}

fn enable(permission: Permission, set: &mut PermissionSet) {
    set.insert(permission);

    if permission.is_block() {
        set.extend(PermissionCatalog::granular_implied_by(permission));
    }
}

fn disable(permission: Permission, set: &mut PermissionSet) {
    set.remove(permission);

    if !permission.is_block() {
        return;
    }

    for granular in PermissionCatalog::granular_implied_by(permission) {
        if !set.implies(granular) {
            set.remove(granular);
        }
    }
}
