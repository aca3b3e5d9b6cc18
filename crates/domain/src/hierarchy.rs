//! Which roles a role holder may hand out to other users.

use crate::role::{ADMIN_ROLE, OWNER_ROLE, USER_ROLE};

static ROLE_HIERARCHY: &[(&str, &[&str])] = &[
    (OWNER_ROLE, &[ADMIN_ROLE, USER_ROLE]),
    (ADMIN_ROLE, &[USER_ROLE]),
];

/// Returns the roles `acting_role` may assign, in presentation order.
///
/// Roles without an entry assign nothing. The owner role never appears in
/// any entry.
#[must_use]
pub fn assignable_roles(acting_role: &str) -> &'static [&'static str] {
    let acting_role = acting_role.trim();
    ROLE_HIERARCHY
        .iter()
        .find(|(role, _)| role.eq_ignore_ascii_case(acting_role))
        .map_or(&[], |(_, assignable)| *assignable)
}

/// Returns whether `acting_role` may assign `target_role`.
#[must_use]
pub fn can_assign(acting_role: &str, target_role: &str) -> bool {
    let target_role = target_role.trim();
    assignable_roles(acting_role)
        .iter()
        .any(|role| role.eq_ignore_ascii_case(target_role))
}

/// Returns whether `acting_role` may change the role of a user currently
/// holding `current_role`.
///
/// The owner may change any role except its own; everyone else may only
/// change users whose current role they could assign themselves.
#[must_use]
pub fn can_reassign(acting_role: &str, current_role: &str) -> bool {
    if acting_role.trim().eq_ignore_ascii_case(OWNER_ROLE) {
        return !current_role.trim().eq_ignore_ascii_case(OWNER_ROLE);
    }
    can_assign(acting_role, current_role)
}

#[cfg(test)]
mod tests {
    use super::{ROLE_HIERARCHY, assignable_roles, can_assign, can_reassign};
    use crate::role::OWNER_ROLE;

    #[test]
    fn admin_assigns_only_users() {
        assert_eq!(assignable_roles("admin"), ["user"]);
        assert_eq!(assignable_roles("owner"), ["admin", "user"]);
    }

    #[test]
    fn roles_without_entries_assign_nothing() {
        assert!(assignable_roles("user").is_empty());
        assert!(assignable_roles("viewer").is_empty());
        assert!(assignable_roles("dispatcher").is_empty());
    }

    #[test]
    fn owner_is_never_assignable() {
        for (role, _) in ROLE_HIERARCHY {
            assert!(!assignable_roles(role).contains(&OWNER_ROLE));
            assert!(!can_assign(role, "Owner"));
        }
    }

    #[test]
    fn can_assign_ignores_case() {
        assert!(can_assign("Admin", "USER"));
        assert!(!can_assign("admin", "admin"));
    }

    #[test]
    fn admins_cannot_reassign_peers_or_roles_outside_their_entry() {
        assert!(can_reassign("admin", "user"));
        assert!(!can_reassign("admin", "admin"));
        assert!(!can_reassign("admin", "manager"));
        assert!(!can_reassign("admin", "dispatcher"));
        assert!(!can_reassign("user", "user"));
    }

    #[test]
    fn owner_reassigns_everyone_but_owners() {
        assert!(can_reassign("owner", "admin"));
        assert!(can_reassign("Owner", "viewer"));
        assert!(can_reassign("owner", "dispatcher"));
        assert!(!can_reassign("owner", "OWNER"));
    }
}
