//! Guards for the reserved owner role.

use convoy_core::{AppResult, ProtectedRoleViolation};

use crate::role::OWNER_ROLE;

/// Role names that can never be modified, deleted or recreated.
pub const PROTECTED_ROLE_NAMES: &[&str] = &[OWNER_ROLE];

/// Returns whether `name` refers to a protected role, ignoring case and
/// surrounding whitespace.
#[must_use]
pub fn is_protected_role(name: &str) -> bool {
    let name = name.trim();
    PROTECTED_ROLE_NAMES
        .iter()
        .any(|protected| protected.eq_ignore_ascii_case(name))
}

/// Fails when the role's permissions or metadata may not change.
pub fn assert_modifiable(name: &str) -> AppResult<()> {
    if is_protected_role(name) {
        return Err(ProtectedRoleViolation::CannotModify(name.trim().to_owned()).into());
    }

    Ok(())
}

/// Fails when the role may not be deleted.
pub fn assert_deletable(name: &str) -> AppResult<()> {
    if is_protected_role(name) {
        return Err(ProtectedRoleViolation::CannotDelete(name.trim().to_owned()).into());
    }

    Ok(())
}

/// Fails when a custom role may not be created under this name.
pub fn assert_creatable(name: &str) -> AppResult<()> {
    if is_protected_role(name) {
        return Err(ProtectedRoleViolation::CannotCreateReserved(name.trim().to_owned()).into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use convoy_core::{AppError, ProtectedRoleViolation};
    use proptest::prelude::*;

    use super::{assert_creatable, assert_deletable, assert_modifiable, is_protected_role};

    #[test]
    fn owner_is_protected_in_any_case() {
        assert!(matches!(
            assert_modifiable("Owner"),
            Err(AppError::ProtectedRole(ProtectedRoleViolation::CannotModify(_)))
        ));
        assert!(matches!(
            assert_deletable("OWNER"),
            Err(AppError::ProtectedRole(ProtectedRoleViolation::CannotDelete(_)))
        ));
        assert!(matches!(
            assert_creatable("owner"),
            Err(AppError::ProtectedRole(
                ProtectedRoleViolation::CannotCreateReserved(_)
            ))
        ));
    }

    #[test]
    fn other_roles_pass_every_guard() {
        for name in ["admin", "dispatcher", "owners", "co-owner"] {
            assert!(assert_modifiable(name).is_ok());
            assert!(assert_deletable(name).is_ok());
            assert!(assert_creatable(name).is_ok());
        }
    }

    #[test]
    fn surrounding_whitespace_does_not_bypass_protection() {
        assert!(is_protected_role("  owner\t"));
    }

    proptest! {
        #[test]
        fn every_casing_of_owner_is_protected(mask in proptest::collection::vec(any::<bool>(), 5)) {
            let name: String = "owner"
                .chars()
                .zip(mask)
                .map(|(character, upper)| {
                    if upper {
                        character.to_ascii_uppercase()
                    } else {
                        character
                    }
                })
                .collect();

            prop_assert!(assert_modifiable(&name).is_err());
            prop_assert!(assert_deletable(&name).is_err());
            prop_assert!(assert_creatable(&name).is_err());
        }
    }
}
