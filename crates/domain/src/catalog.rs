//! Static registry of every permission known to Convoy.
//!
//! Block permissions are named `<category prefix>_<action>`. Granular
//! permissions are registered in per-category groups and are linked to blocks
//! through their typed `(category, action)` pair, never through their name.

use crate::permission::{
    Permission, PermissionAction as Action, PermissionCategory as Category,
};

/// View every fleet record.
pub const FLEET_VIEW: Permission = Permission::block(Category::Fleet, Action::View, "fleet_view");
/// Create fleet records.
pub const FLEET_CREATE: Permission =
    Permission::block(Category::Fleet, Action::Create, "fleet_create");
/// Edit fleet records.
pub const FLEET_EDIT: Permission = Permission::block(Category::Fleet, Action::Edit, "fleet_edit");
/// Delete fleet records.
pub const FLEET_DELETE: Permission =
    Permission::block(Category::Fleet, Action::Delete, "fleet_delete");
/// Every fleet action.
pub const FLEET_ADMIN: Permission =
    Permission::block(Category::Fleet, Action::Admin, "fleet_admin");

/// View trailers.
pub const TRAILERS_VIEW: Permission =
    Permission::granular(Category::Fleet, "trailers", Action::View, "trailers_view");
/// Create trailers.
pub const TRAILERS_CREATE: Permission =
    Permission::granular(Category::Fleet, "trailers", Action::Create, "trailers_create");
/// Edit trailers.
pub const TRAILERS_EDIT: Permission =
    Permission::granular(Category::Fleet, "trailers", Action::Edit, "trailers_edit");
/// Delete trailers.
pub const TRAILERS_DELETE: Permission =
    Permission::granular(Category::Fleet, "trailers", Action::Delete, "trailers_delete");
/// View locations.
pub const LOCATIONS_VIEW: Permission =
    Permission::granular(Category::Fleet, "locations", Action::View, "locations_view");
/// Create locations.
pub const LOCATIONS_CREATE: Permission = Permission::granular(
    Category::Fleet,
    "locations",
    Action::Create,
    "locations_create",
);
/// Edit locations.
pub const LOCATIONS_EDIT: Permission =
    Permission::granular(Category::Fleet, "locations", Action::Edit, "locations_edit");
/// Delete locations.
pub const LOCATIONS_DELETE: Permission = Permission::granular(
    Category::Fleet,
    "locations",
    Action::Delete,
    "locations_delete",
);
/// View maintenance records.
pub const MAINTENANCE_VIEW: Permission = Permission::granular(
    Category::Fleet,
    "maintenance",
    Action::View,
    "maintenance_view",
);
/// Create maintenance records.
pub const MAINTENANCE_CREATE: Permission = Permission::granular(
    Category::Fleet,
    "maintenance",
    Action::Create,
    "maintenance_create",
);
/// Edit maintenance records.
pub const MAINTENANCE_EDIT: Permission = Permission::granular(
    Category::Fleet,
    "maintenance",
    Action::Edit,
    "maintenance_edit",
);
/// Delete maintenance records.
pub const MAINTENANCE_DELETE: Permission = Permission::granular(
    Category::Fleet,
    "maintenance",
    Action::Delete,
    "maintenance_delete",
);
/// View notes.
pub const NOTES_VIEW: Permission =
    Permission::granular(Category::Fleet, "notes", Action::View, "notes_view");
/// Create notes.
pub const NOTES_CREATE: Permission =
    Permission::granular(Category::Fleet, "notes", Action::Create, "notes_create");
/// Edit notes.
pub const NOTES_EDIT: Permission =
    Permission::granular(Category::Fleet, "notes", Action::Edit, "notes_edit");
/// Delete notes.
pub const NOTES_DELETE: Permission =
    Permission::granular(Category::Fleet, "notes", Action::Delete, "notes_delete");

/// View organization data.
pub const ORG_VIEW: Permission =
    Permission::block(Category::Organization, Action::View, "org_view");
/// Create organization data.
pub const ORG_CREATE: Permission =
    Permission::block(Category::Organization, Action::Create, "org_create");
/// Edit organization data.
pub const ORG_EDIT: Permission =
    Permission::block(Category::Organization, Action::Edit, "org_edit");
/// Delete organization data.
pub const ORG_DELETE: Permission =
    Permission::block(Category::Organization, Action::Delete, "org_delete");
/// Every organization action.
pub const ORG_ADMIN: Permission =
    Permission::block(Category::Organization, Action::Admin, "org_admin");

/// View users.
pub const USERS_VIEW: Permission =
    Permission::granular(Category::Organization, "users", Action::View, "users_view");
/// Invite users.
pub const USERS_CREATE: Permission = Permission::granular(
    Category::Organization,
    "users",
    Action::Create,
    "users_create",
);
/// Edit users and their role assignment.
pub const USERS_EDIT: Permission =
    Permission::granular(Category::Organization, "users", Action::Edit, "users_edit");
/// Remove users.
pub const USERS_DELETE: Permission = Permission::granular(
    Category::Organization,
    "users",
    Action::Delete,
    "users_delete",
);
/// View roles.
pub const ROLES_VIEW: Permission =
    Permission::granular(Category::Organization, "roles", Action::View, "roles_view");
/// Create custom roles.
pub const ROLES_CREATE: Permission = Permission::granular(
    Category::Organization,
    "roles",
    Action::Create,
    "roles_create",
);
/// Edit custom role permissions.
pub const ROLES_EDIT: Permission =
    Permission::granular(Category::Organization, "roles", Action::Edit, "roles_edit");
/// Delete custom roles.
pub const ROLES_DELETE: Permission = Permission::granular(
    Category::Organization,
    "roles",
    Action::Delete,
    "roles_delete",
);
/// View organization settings.
pub const SETTINGS_VIEW: Permission = Permission::granular(
    Category::Organization,
    "settings",
    Action::View,
    "settings_view",
);
/// Edit organization settings.
pub const SETTINGS_EDIT: Permission = Permission::granular(
    Category::Organization,
    "settings",
    Action::Edit,
    "settings_edit",
);
/// View GPS provider connections.
pub const PROVIDERS_VIEW: Permission = Permission::granular(
    Category::Organization,
    "providers",
    Action::View,
    "providers_view",
);
/// Edit GPS provider connections.
pub const PROVIDERS_EDIT: Permission = Permission::granular(
    Category::Organization,
    "providers",
    Action::Edit,
    "providers_edit",
);
/// Trigger a GPS provider synchronization.
pub const PROVIDERS_SYNC: Permission = Permission::granular(
    Category::Organization,
    "providers",
    Action::Other("sync"),
    "providers_sync",
);

/// View analytics.
pub const ANALYTICS_VIEW: Permission =
    Permission::block(Category::Analytics, Action::View, "analytics_view");
/// Export analytics data.
pub const ANALYTICS_EXPORT: Permission =
    Permission::block(Category::Analytics, Action::Export, "analytics_export");
/// Every analytics action.
pub const ANALYTICS_ADMIN: Permission =
    Permission::block(Category::Analytics, Action::Admin, "analytics_admin");

/// View reports.
pub const REPORTS_VIEW: Permission =
    Permission::granular(Category::Analytics, "reports", Action::View, "reports_view");
/// Export reports.
pub const REPORTS_EXPORT: Permission = Permission::granular(
    Category::Analytics,
    "reports",
    Action::Export,
    "reports_export",
);
/// View dashboards.
pub const DASHBOARDS_VIEW: Permission = Permission::granular(
    Category::Analytics,
    "dashboards",
    Action::View,
    "dashboards_view",
);
/// Edit dashboard layouts.
pub const DASHBOARDS_EDIT: Permission = Permission::granular(
    Category::Analytics,
    "dashboards",
    Action::Edit,
    "dashboards_edit",
);

/// View utilities.
pub const UTILITIES_VIEW: Permission =
    Permission::block(Category::Utilities, Action::View, "utilities_view");
/// Run utilities that create data.
pub const UTILITIES_CREATE: Permission =
    Permission::block(Category::Utilities, Action::Create, "utilities_create");
/// Every utilities action.
pub const UTILITIES_ADMIN: Permission =
    Permission::block(Category::Utilities, Action::Admin, "utilities_admin");

/// View import history.
pub const IMPORTS_VIEW: Permission =
    Permission::granular(Category::Utilities, "imports", Action::View, "imports_view");
/// Run bulk imports.
pub const IMPORTS_CREATE: Permission = Permission::granular(
    Category::Utilities,
    "imports",
    Action::Create,
    "imports_create",
);
/// View export history.
pub const EXPORTS_VIEW: Permission =
    Permission::granular(Category::Utilities, "exports", Action::View, "exports_view");
/// Run bulk exports.
pub const EXPORTS_CREATE: Permission = Permission::granular(
    Category::Utilities,
    "exports",
    Action::Create,
    "exports_create",
);

/// Named set of granular permissions for one entity type.
#[derive(Debug)]
pub struct GranularGroup {
    key: &'static str,
    name: &'static str,
    permissions: &'static [Permission],
}

impl GranularGroup {
    /// Returns the stable group key.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Returns the human-readable group name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the permissions registered in the group.
    #[must_use]
    pub fn permissions(&self) -> &'static [Permission] {
        self.permissions
    }
}

/// Block permissions and granular groups of one category.
#[derive(Debug)]
pub struct CategoryDefinition {
    category: Category,
    blocks: &'static [Permission],
    groups: &'static [GranularGroup],
}

impl CategoryDefinition {
    /// Returns the category.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns the block permissions.
    #[must_use]
    pub fn blocks(&self) -> &'static [Permission] {
        self.blocks
    }

    /// Returns the granular groups.
    #[must_use]
    pub fn groups(&self) -> &'static [GranularGroup] {
        self.groups
    }

    fn permissions(&self) -> impl Iterator<Item = Permission> + '_ {
        self.blocks.iter().copied().chain(
            self.groups
                .iter()
                .flat_map(|group| group.permissions.iter().copied()),
        )
    }
}

static FLEET_CATEGORY: CategoryDefinition = CategoryDefinition {
    category: Category::Fleet,
    blocks: &[FLEET_VIEW, FLEET_CREATE, FLEET_EDIT, FLEET_DELETE, FLEET_ADMIN],
    groups: &[
        GranularGroup {
            key: "trailers",
            name: "Trailers",
            permissions: &[TRAILERS_VIEW, TRAILERS_CREATE, TRAILERS_EDIT, TRAILERS_DELETE],
        },
        GranularGroup {
            key: "locations",
            name: "Locations",
            permissions: &[
                LOCATIONS_VIEW,
                LOCATIONS_CREATE,
                LOCATIONS_EDIT,
                LOCATIONS_DELETE,
            ],
        },
        GranularGroup {
            key: "maintenance",
            name: "Maintenance",
            permissions: &[
                MAINTENANCE_VIEW,
                MAINTENANCE_CREATE,
                MAINTENANCE_EDIT,
                MAINTENANCE_DELETE,
            ],
        },
        GranularGroup {
            key: "notes",
            name: "Notes",
            permissions: &[NOTES_VIEW, NOTES_CREATE, NOTES_EDIT, NOTES_DELETE],
        },
    ],
};

static ORGANIZATION_CATEGORY: CategoryDefinition = CategoryDefinition {
    category: Category::Organization,
    blocks: &[ORG_VIEW, ORG_CREATE, ORG_EDIT, ORG_DELETE, ORG_ADMIN],
    groups: &[
        GranularGroup {
            key: "users",
            name: "Users",
            permissions: &[USERS_VIEW, USERS_CREATE, USERS_EDIT, USERS_DELETE],
        },
        GranularGroup {
            key: "roles",
            name: "Roles",
            permissions: &[ROLES_VIEW, ROLES_CREATE, ROLES_EDIT, ROLES_DELETE],
        },
        GranularGroup {
            key: "settings",
            name: "Settings",
            permissions: &[SETTINGS_VIEW, SETTINGS_EDIT],
        },
        GranularGroup {
            key: "providers",
            name: "GPS Providers",
            permissions: &[PROVIDERS_VIEW, PROVIDERS_EDIT, PROVIDERS_SYNC],
        },
    ],
};

static ANALYTICS_CATEGORY: CategoryDefinition = CategoryDefinition {
    category: Category::Analytics,
    blocks: &[ANALYTICS_VIEW, ANALYTICS_EXPORT, ANALYTICS_ADMIN],
    groups: &[
        GranularGroup {
            key: "reports",
            name: "Reports",
            permissions: &[REPORTS_VIEW, REPORTS_EXPORT],
        },
        GranularGroup {
            key: "dashboards",
            name: "Dashboards",
            permissions: &[DASHBOARDS_VIEW, DASHBOARDS_EDIT],
        },
    ],
};

static UTILITIES_CATEGORY: CategoryDefinition = CategoryDefinition {
    category: Category::Utilities,
    blocks: &[UTILITIES_VIEW, UTILITIES_CREATE, UTILITIES_ADMIN],
    groups: &[
        GranularGroup {
            key: "imports",
            name: "Imports",
            permissions: &[IMPORTS_VIEW, IMPORTS_CREATE],
        },
        GranularGroup {
            key: "exports",
            name: "Exports",
            permissions: &[EXPORTS_VIEW, EXPORTS_CREATE],
        },
    ],
};

static CATEGORIES: [&CategoryDefinition; 4] = [
    &FLEET_CATEGORY,
    &ORGANIZATION_CATEGORY,
    &ANALYTICS_CATEGORY,
    &UTILITIES_CATEGORY,
];

/// Read-only lookup table over the permission registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionCatalog;

impl PermissionCatalog {
    /// Returns every category definition in display order.
    #[must_use]
    pub fn categories() -> &'static [&'static CategoryDefinition] {
        &CATEGORIES
    }

    /// Returns the definition of one category.
    #[must_use]
    pub fn category(category: Category) -> &'static CategoryDefinition {
        match category {
            Category::Fleet => &FLEET_CATEGORY,
            Category::Organization => &ORGANIZATION_CATEGORY,
            Category::Analytics => &ANALYTICS_CATEGORY,
            Category::Utilities => &UTILITIES_CATEGORY,
        }
    }

    /// Returns the block permissions of a category.
    #[must_use]
    pub fn block_permissions_of(category: Category) -> &'static [Permission] {
        Self::category(category).blocks
    }

    /// Returns the granular groups of a category.
    #[must_use]
    pub fn granular_groups_of(category: Category) -> &'static [GranularGroup] {
        Self::category(category).groups
    }

    /// Iterates every registered permission.
    pub fn all_permissions() -> impl Iterator<Item = Permission> {
        CATEGORIES
            .iter()
            .flat_map(|definition| definition.permissions())
    }

    /// Resolves an identifier to its permission.
    #[must_use]
    pub fn lookup(identifier: &str) -> Option<Permission> {
        Self::all_permissions().find(|permission| permission.as_str() == identifier)
    }

    /// Returns whether the identifier is registered.
    #[must_use]
    pub fn is_known(identifier: &str) -> bool {
        Self::lookup(identifier).is_some()
    }

    /// Iterates the granular permissions enabled together with `block`.
    ///
    /// Yields nothing when `block` is itself granular.
    pub fn granular_implied_by(block: Permission) -> impl Iterator<Item = Permission> {
        Self::category(block.category())
            .groups
            .iter()
            .flat_map(|group| group.permissions.iter().copied())
            .filter(move |granular| block.implies(granular))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{
        ANALYTICS_EXPORT, FLEET_ADMIN, FLEET_VIEW, LOCATIONS_VIEW, MAINTENANCE_VIEW, NOTES_VIEW,
        ORG_ADMIN, PROVIDERS_SYNC, PermissionCatalog, REPORTS_EXPORT, TRAILERS_VIEW, USERS_VIEW,
    };
    use crate::permission::{PermissionAction, PermissionCategory};

    #[test]
    fn identifiers_are_globally_unique() {
        let mut seen = HashSet::new();
        for permission in PermissionCatalog::all_permissions() {
            assert!(
                seen.insert(permission.as_str()),
                "duplicate identifier {}",
                permission.as_str()
            );
        }
    }

    #[test]
    fn every_permission_is_listed_under_its_own_category() {
        for definition in PermissionCatalog::categories() {
            for block in definition.blocks() {
                assert!(block.is_block());
                assert_eq!(block.category(), definition.category());
            }
            for group in definition.groups() {
                for granular in group.permissions() {
                    assert!(!granular.is_block());
                    assert_eq!(granular.category(), definition.category());
                    assert_eq!(granular.granular_group(), Some(group.key()));
                }
            }
        }
    }

    #[test]
    fn block_identifiers_follow_prefix_and_action() {
        for category in PermissionCategory::all() {
            for block in PermissionCatalog::block_permissions_of(*category) {
                assert_eq!(
                    block.as_str(),
                    format!(
                        "{}_{}",
                        category.identifier_prefix(),
                        block.action().as_str()
                    )
                );
            }
        }
    }

    #[test]
    fn lookup_resolves_known_identifiers_only() {
        assert_eq!(PermissionCatalog::lookup("trailers_view"), Some(TRAILERS_VIEW));
        assert!(PermissionCatalog::is_known("org_admin"));
        assert!(!PermissionCatalog::is_known("fleet_teleport"));
        assert!(!PermissionCatalog::is_known(""));
    }

    #[test]
    fn fleet_view_maps_to_view_granular_permissions() {
        let implied = PermissionCatalog::granular_implied_by(FLEET_VIEW).collect::<Vec<_>>();
        assert_eq!(
            implied,
            vec![TRAILERS_VIEW, LOCATIONS_VIEW, MAINTENANCE_VIEW, NOTES_VIEW]
        );
    }

    #[test]
    fn admin_blocks_map_to_every_granular_permission_of_the_category() {
        assert_eq!(PermissionCatalog::granular_implied_by(FLEET_ADMIN).count(), 16);
        assert!(
            PermissionCatalog::granular_implied_by(ORG_ADMIN)
                .any(|permission| permission == PROVIDERS_SYNC)
        );
        assert!(
            !PermissionCatalog::granular_implied_by(FLEET_ADMIN)
                .any(|permission| permission == USERS_VIEW)
        );
    }

    #[test]
    fn custom_actions_are_only_reachable_through_admin() {
        assert_eq!(PROVIDERS_SYNC.action(), PermissionAction::Other("sync"));
        for block in PermissionCatalog::block_permissions_of(PermissionCategory::Organization) {
            let implies_sync = block.implies(&PROVIDERS_SYNC);
            assert_eq!(implies_sync, block.action() == PermissionAction::Admin);
        }
    }

    #[test]
    fn export_block_maps_to_export_granular_permissions() {
        let implied =
            PermissionCatalog::granular_implied_by(ANALYTICS_EXPORT).collect::<Vec<_>>();
        assert_eq!(implied, vec![REPORTS_EXPORT]);
    }

    #[test]
    fn granular_permissions_imply_nothing() {
        assert_eq!(PermissionCatalog::granular_implied_by(TRAILERS_VIEW).count(), 0);
    }
}
