use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use convoy_core::{AppError, AppResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::PermissionCatalog;

/// Functional area that owns a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionCategory {
    /// Trailers, locations, maintenance and notes.
    Fleet,
    /// Users, roles, settings and GPS providers.
    Organization,
    /// Reports and dashboards.
    Analytics,
    /// Bulk import and export tooling.
    Utilities,
}

impl PermissionCategory {
    /// Returns all categories in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[PermissionCategory] = &[
            PermissionCategory::Fleet,
            PermissionCategory::Organization,
            PermissionCategory::Analytics,
            PermissionCategory::Utilities,
        ];

        ALL
    }

    /// Returns the stable category key.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fleet => "fleet",
            Self::Organization => "organization",
            Self::Analytics => "analytics",
            Self::Utilities => "utilities",
        }
    }

    /// Returns the prefix used by block permission identifiers.
    #[must_use]
    pub fn identifier_prefix(&self) -> &'static str {
        match self {
            Self::Fleet => "fleet",
            Self::Organization => "org",
            Self::Analytics => "analytics",
            Self::Utilities => "utilities",
        }
    }

    /// Returns the human-readable category name.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Fleet => "Fleet Management",
            Self::Organization => "Organization",
            Self::Analytics => "Analytics & Reports",
            Self::Utilities => "Utilities",
        }
    }

    /// Returns the icon key rendered next to the category.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Fleet => "truck",
            Self::Organization => "building",
            Self::Analytics => "chart-bar",
            Self::Utilities => "wrench",
        }
    }
}

impl FromStr for PermissionCategory {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "fleet" => Ok(Self::Fleet),
            "organization" => Ok(Self::Organization),
            "analytics" => Ok(Self::Analytics),
            "utilities" => Ok(Self::Utilities),
            _ => Err(AppError::Validation(format!(
                "unknown permission category '{value}'"
            ))),
        }
    }
}

/// Operation a permission allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PermissionAction {
    /// Read access.
    View,
    /// Create access.
    Create,
    /// Update access.
    Edit,
    /// Delete access.
    Delete,
    /// Every action in the category.
    Admin,
    /// Data export.
    Export,
    /// Action specific to one granular group.
    Other(&'static str),
}

impl PermissionAction {
    /// Returns the stable action key.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Admin => "admin",
            Self::Export => "export",
            Self::Other(name) => name,
        }
    }
}

/// Whether a permission covers a whole category action or one entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionScope {
    /// Coarse permission such as `fleet_view`.
    Block,
    /// Fine permission registered in a named granular group.
    Granular {
        /// Group key, for example `trailers`.
        group: &'static str,
    },
}

/// A permission registered in the catalog.
///
/// Values are only constructed by the catalog, so every `Permission` in the
/// program refers to a known identifier. Equality and ordering use the
/// identifier.
#[derive(Debug, Clone, Copy)]
pub struct Permission {
    identifier: &'static str,
    category: PermissionCategory,
    action: PermissionAction,
    scope: PermissionScope,
}

impl Permission {
    pub(crate) const fn block(
        category: PermissionCategory,
        action: PermissionAction,
        identifier: &'static str,
    ) -> Self {
        Self {
            identifier,
            category,
            action,
            scope: PermissionScope::Block,
        }
    }

    pub(crate) const fn granular(
        category: PermissionCategory,
        group: &'static str,
        action: PermissionAction,
        identifier: &'static str,
    ) -> Self {
        Self {
            identifier,
            category,
            action,
            scope: PermissionScope::Granular { group },
        }
    }

    /// Returns the stable identifier, e.g. `trailers_view`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.identifier
    }

    /// Returns the owning category.
    #[must_use]
    pub fn category(&self) -> PermissionCategory {
        self.category
    }

    /// Returns the action the permission allows.
    #[must_use]
    pub fn action(&self) -> PermissionAction {
        self.action
    }

    /// Returns the permission scope.
    #[must_use]
    pub fn scope(&self) -> PermissionScope {
        self.scope
    }

    /// Returns whether this is a block permission.
    #[must_use]
    pub fn is_block(&self) -> bool {
        matches!(self.scope, PermissionScope::Block)
    }

    /// Returns the granular group key for granular permissions.
    #[must_use]
    pub fn granular_group(&self) -> Option<&'static str> {
        match self.scope {
            PermissionScope::Block => None,
            PermissionScope::Granular { group } => Some(group),
        }
    }

    /// Returns whether enabling this block permission enables `other`.
    ///
    /// `admin` blocks imply every granular permission of their category; all
    /// other blocks imply the granular permissions sharing their action.
    #[must_use]
    pub fn implies(&self, other: &Permission) -> bool {
        self.is_block()
            && !other.is_block()
            && self.category == other.category
            && (self.action == PermissionAction::Admin || self.action == other.action)
    }

    /// Parses a transport value into a permission.
    pub fn from_transport(value: &str) -> AppResult<Self> {
        Self::from_str(value)
    }
}

impl PartialEq for Permission {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for Permission {}

impl Hash for Permission {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

impl PartialOrd for Permission {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Permission {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identifier.cmp(other.identifier)
    }
}

impl Display for Permission {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.identifier)
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        PermissionCatalog::lookup(value.trim())
            .ok_or_else(|| AppError::InvalidPermission(value.to_owned()))
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.identifier)
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::from_str(value.as_str()).map_err(serde::de::Error::custom)
    }
}

/// Ordered set of catalog permissions held by a role or a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Creates a set holding every catalog permission.
    #[must_use]
    pub fn all() -> Self {
        PermissionCatalog::all_permissions().collect()
    }

    /// Parses transport identifiers, failing on the first unknown value.
    pub fn from_identifiers<I, S>(values: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .map(|value| Permission::from_str(value.as_ref()))
            .collect()
    }

    /// Returns whether the permission is present.
    #[must_use]
    pub fn contains(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    /// Adds a permission, returning whether it was newly inserted.
    pub fn insert(&mut self, permission: Permission) -> bool {
        self.0.insert(permission)
    }

    /// Removes a permission, returning whether it was present.
    pub fn remove(&mut self, permission: Permission) -> bool {
        self.0.remove(&permission)
    }

    /// Returns the number of permissions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates permissions in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().copied()
    }

    /// Iterates block permissions in identifier order.
    pub fn block_permissions(&self) -> impl Iterator<Item = Permission> + '_ {
        self.iter().filter(Permission::is_block)
    }

    /// Iterates granular permissions in identifier order.
    pub fn granular_permissions(&self) -> impl Iterator<Item = Permission> + '_ {
        self.iter().filter(|permission| !permission.is_block())
    }

    /// Returns whether any block permission in the set implies `granular`.
    #[must_use]
    pub fn implies(&self, granular: Permission) -> bool {
        self.0.iter().any(|active| active.implies(&granular))
    }

    /// Returns the transport identifiers in identifier order.
    #[must_use]
    pub fn identifiers(&self) -> Vec<String> {
        self.iter()
            .map(|permission| permission.as_str().to_owned())
            .collect()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Permission> for PermissionSet {
    fn extend<T: IntoIterator<Item = Permission>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use convoy_core::AppError;

    use super::{Permission, PermissionCategory, PermissionSet};
    use crate::catalog::{FLEET_ADMIN, FLEET_VIEW, NOTES_EDIT, TRAILERS_VIEW, USERS_VIEW};

    #[test]
    fn permission_roundtrip_storage_value() {
        let restored = Permission::from_str(TRAILERS_VIEW.as_str());
        assert!(matches!(restored, Ok(permission) if permission == TRAILERS_VIEW));
    }

    #[test]
    fn unknown_permission_is_rejected() {
        let parsed = Permission::from_str("trailers_teleport");
        assert!(matches!(parsed, Err(AppError::InvalidPermission(value)) if value == "trailers_teleport"));
    }

    #[test]
    fn block_implies_only_matching_action_in_same_category() {
        assert!(FLEET_VIEW.implies(&TRAILERS_VIEW));
        assert!(!FLEET_VIEW.implies(&NOTES_EDIT));
        assert!(!FLEET_VIEW.implies(&USERS_VIEW));
        assert!(FLEET_ADMIN.implies(&NOTES_EDIT));
        assert!(!TRAILERS_VIEW.implies(&TRAILERS_VIEW));
    }

    #[test]
    fn permission_set_serializes_as_sorted_identifiers() {
        let set: PermissionSet = [TRAILERS_VIEW, FLEET_VIEW].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap_or_default();
        assert_eq!(json, r#"["fleet_view","trailers_view"]"#);
    }

    #[test]
    fn permission_set_deserialization_rejects_unknown_identifiers() {
        let parsed = serde_json::from_str::<PermissionSet>(r#"["fleet_view","fleet_fly"]"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn from_identifiers_reports_first_unknown_value() {
        let parsed = PermissionSet::from_identifiers(["fleet_view", "bogus", "also_bogus"]);
        assert!(matches!(parsed, Err(AppError::InvalidPermission(value)) if value == "bogus"));
    }

    #[test]
    fn category_parses_stable_keys() {
        for category in PermissionCategory::all() {
            let parsed = PermissionCategory::from_str(category.as_str());
            assert!(matches!(parsed, Ok(value) if value == *category));
        }
    }
}
