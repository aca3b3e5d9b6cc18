use std::collections::BTreeMap;

use convoy_core::AppResult;
use convoy_domain::{
    Permission, PermissionCatalog, PermissionSet, RoleTemplateStore, toggle_identifier,
};

/// Granular group projection inside a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GranularGroupStructure {
    /// Stable group key, for example `trailers`.
    pub key: String,
    /// Human-readable group name.
    pub name: String,
    /// Permission identifiers in the group.
    pub permissions: Vec<String>,
}

/// Category projection for permission editors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStructure {
    /// Stable category key.
    pub key: String,
    /// Human-readable category name.
    pub name: String,
    /// Icon key.
    pub icon: String,
    /// Block permission identifiers.
    pub blocks: Vec<String>,
    /// Granular groups in display order.
    pub granular: Vec<GranularGroupStructure>,
}

/// System role projection with its effective permissions split by scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTemplateSummary {
    /// Stable role name.
    pub key: String,
    /// Human-readable role name.
    pub name: String,
    /// Role description.
    pub description: String,
    /// Block permission identifiers.
    pub block_permissions: Vec<String>,
    /// Granular permission identifiers.
    pub granular_permissions: Vec<String>,
}

/// Full permission catalog and template listing consumed by role editors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionStructure {
    /// Categories in display order.
    pub categories: Vec<CategoryStructure>,
    /// System role templates in hierarchy order.
    pub role_templates: Vec<RoleTemplateSummary>,
    /// Constant-style key to block permission identifier.
    pub block_permissions: BTreeMap<String, String>,
    /// Constant-style key to granular permission identifier.
    pub granular_permissions: BTreeMap<String, String>,
}

/// Application service exposing the catalog and the cascade toggle.
#[derive(Clone, Default)]
pub struct PermissionService;

impl PermissionService {
    /// Creates a new permission service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Builds the permission structure from the static catalog.
    #[must_use]
    pub fn permission_structure(&self) -> PermissionStructure {
        let categories = PermissionCatalog::categories()
            .iter()
            .map(|definition| {
                let category = definition.category();
                CategoryStructure {
                    key: category.as_str().to_owned(),
                    name: category.display_name().to_owned(),
                    icon: category.icon().to_owned(),
                    blocks: identifiers(definition.blocks().iter().copied()),
                    granular: definition
                        .groups()
                        .iter()
                        .map(|group| GranularGroupStructure {
                            key: group.key().to_owned(),
                            name: group.name().to_owned(),
                            permissions: identifiers(group.permissions().iter().copied()),
                        })
                        .collect(),
                }
            })
            .collect();

        let role_templates = RoleTemplateStore::all()
            .iter()
            .map(|template| RoleTemplateSummary {
                key: template.name().to_owned(),
                name: template.display_name().to_owned(),
                description: template.description().to_owned(),
                block_permissions: identifiers(template.block_permissions()),
                granular_permissions: identifiers(template.granular_permissions()),
            })
            .collect();

        let (blocks, granular): (Vec<Permission>, Vec<Permission>) =
            PermissionCatalog::all_permissions().partition(Permission::is_block);

        PermissionStructure {
            categories,
            role_templates,
            block_permissions: constant_keys(blocks),
            granular_permissions: constant_keys(granular),
        }
    }

    /// Toggles one identifier in an in-progress permission set.
    ///
    /// Every identifier must be known to the catalog.
    pub fn toggle(&self, identifier: &str, current: &[String]) -> AppResult<PermissionSet> {
        let current = PermissionSet::from_identifiers(current)?;
        toggle_identifier(identifier, &current)
    }
}

fn identifiers(permissions: impl IntoIterator<Item = Permission>) -> Vec<String> {
    permissions
        .into_iter()
        .map(|permission| permission.as_str().to_owned())
        .collect()
}

fn constant_keys(permissions: Vec<Permission>) -> BTreeMap<String, String> {
    permissions
        .into_iter()
        .map(|permission| {
            (
                permission.as_str().to_ascii_uppercase(),
                permission.as_str().to_owned(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use convoy_core::AppError;
    use convoy_domain::catalog::{FLEET_VIEW, TRAILERS_VIEW};

    use super::PermissionService;

    #[test]
    fn structure_lists_categories_and_groups_in_order() {
        let structure = PermissionService::new().permission_structure();

        let keys: Vec<&str> = structure
            .categories
            .iter()
            .map(|category| category.key.as_str())
            .collect();
        assert_eq!(keys, ["fleet", "organization", "analytics", "utilities"]);

        let fleet = &structure.categories[0];
        assert_eq!(fleet.name, "Fleet Management");
        assert_eq!(fleet.icon, "truck");
        assert_eq!(
            fleet.blocks,
            [
                "fleet_view",
                "fleet_create",
                "fleet_edit",
                "fleet_delete",
                "fleet_admin"
            ]
        );
        let groups: Vec<&str> = fleet.granular.iter().map(|group| group.key.as_str()).collect();
        assert_eq!(groups, ["trailers", "locations", "maintenance", "notes"]);
    }

    #[test]
    fn structure_exposes_templates_and_constant_maps() {
        let structure = PermissionService::new().permission_structure();

        assert_eq!(structure.role_templates.len(), 5);
        let viewer = structure
            .role_templates
            .iter()
            .find(|template| template.key == "viewer");
        assert!(matches!(
            viewer,
            Some(template) if template.block_permissions == ["analytics_view", "fleet_view"]
        ));

        assert_eq!(
            structure.block_permissions.get("FLEET_VIEW").map(String::as_str),
            Some("fleet_view")
        );
        assert_eq!(
            structure
                .granular_permissions
                .get("PROVIDERS_SYNC")
                .map(String::as_str),
            Some("providers_sync")
        );
        assert!(!structure.block_permissions.contains_key("TRAILERS_VIEW"));
    }

    #[test]
    fn toggle_applies_cascade_to_transport_values() {
        let next = PermissionService::new().toggle("fleet_view", &[]);
        assert!(matches!(next, Ok(set) if set.contains(FLEET_VIEW) && set.contains(TRAILERS_VIEW)));
    }

    #[test]
    fn toggle_rejects_unknown_values_in_current_set() {
        let result = PermissionService::new().toggle("fleet_view", &["ghost_view".to_owned()]);
        assert!(matches!(result, Err(AppError::InvalidPermission(value)) if value == "ghost_view"));
    }
}
