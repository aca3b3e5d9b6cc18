//! System role templates and tenant-defined custom roles.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use convoy_core::{AppError, AppResult, NonEmptyString, TenantId};
use serde::{Deserialize, Serialize};

use crate::cascade::cascade_closure;
use crate::catalog::{
    ANALYTICS_ADMIN, ANALYTICS_EXPORT, ANALYTICS_VIEW, FLEET_ADMIN, FLEET_CREATE, FLEET_DELETE,
    FLEET_EDIT, FLEET_VIEW, ORG_CREATE, ORG_DELETE, ORG_EDIT, ORG_VIEW, UTILITIES_ADMIN,
    UTILITIES_CREATE, UTILITIES_VIEW,
};
use crate::permission::{Permission, PermissionSet};

/// Name of the reserved owner role.
pub const OWNER_ROLE: &str = "owner";
/// Name of the administrator system role.
pub const ADMIN_ROLE: &str = "admin";
/// Name of the manager system role.
pub const MANAGER_ROLE: &str = "manager";
/// Name of the standard user system role.
pub const USER_ROLE: &str = "user";
/// Name of the read-only system role.
pub const VIEWER_ROLE: &str = "viewer";

/// Maximum length of a role name.
pub const ROLE_NAME_MAX_LENGTH: usize = 64;
/// Maximum length of a role display name.
pub const ROLE_DISPLAY_NAME_MAX_LENGTH: usize = 100;
/// Maximum length of a role description.
pub const ROLE_DESCRIPTION_MAX_LENGTH: usize = 500;

/// Validated, normalized role name.
///
/// Names are trimmed and lowercased and may contain ASCII letters, digits,
/// `_` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName(String);

impl RoleName {
    /// Creates a normalized role name.
    pub fn new(value: impl AsRef<str>) -> AppResult<Self> {
        let normalized = value.as_ref().trim().to_lowercase();

        if normalized.is_empty() {
            return Err(AppError::Validation(
                "role name must not be empty".to_owned(),
            ));
        }

        if normalized.chars().count() > ROLE_NAME_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "role name must not exceed {ROLE_NAME_MAX_LENGTH} characters"
            )));
        }

        if !normalized.chars().all(|character| {
            character.is_ascii_lowercase()
                || character.is_ascii_digit()
                || matches!(character, '_' | '-')
        }) {
            return Err(AppError::Validation(format!(
                "role name '{normalized}' may only contain letters, digits, '_' and '-'"
            )));
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Derives a title-cased display name, e.g. `night_dispatch` → `Night Dispatch`.
    #[must_use]
    pub fn default_display_name(&self) -> String {
        self.0
            .split(['_', '-'])
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut characters = word.chars();
                match characters.next() {
                    Some(first) => first.to_uppercase().chain(characters).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl TryFrom<String> for RoleName {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoleName> for String {
    fn from(value: RoleName) -> Self {
        value.0
    }
}

impl Display for RoleName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Immutable system role bound to a fixed permission bundle.
///
/// Templates are declared as block bundles only, so their effective set is
/// always the cascade closure of those blocks and round-trips through
/// [`crate::toggle_permission`].
#[derive(Debug)]
pub struct RoleTemplate {
    name: &'static str,
    display_name: &'static str,
    description: &'static str,
    grants_all: bool,
    blocks: &'static [Permission],
}

impl RoleTemplate {
    /// Returns the stable role name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the human-readable role name.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Returns the role description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Returns the effective permission set.
    #[must_use]
    pub fn permissions(&self) -> PermissionSet {
        if self.grants_all {
            return PermissionSet::all();
        }

        let declared = self.blocks.iter().copied().collect::<PermissionSet>();
        cascade_closure(&declared)
    }

    /// Returns the block permissions of the effective set.
    #[must_use]
    pub fn block_permissions(&self) -> Vec<Permission> {
        self.permissions().block_permissions().collect()
    }

    /// Returns the granular permissions of the effective set.
    #[must_use]
    pub fn granular_permissions(&self) -> Vec<Permission> {
        self.permissions().granular_permissions().collect()
    }
}

static ROLE_TEMPLATES: [RoleTemplate; 5] = [
    RoleTemplate {
        name: OWNER_ROLE,
        display_name: "Owner",
        description: "Full control of the organization, including every permission",
        grants_all: true,
        blocks: &[],
    },
    RoleTemplate {
        name: ADMIN_ROLE,
        display_name: "Administrator",
        description: "Manages the fleet, users, custom roles, analytics and utilities",
        grants_all: false,
        blocks: &[
            FLEET_VIEW,
            FLEET_CREATE,
            FLEET_EDIT,
            FLEET_DELETE,
            FLEET_ADMIN,
            ORG_VIEW,
            ORG_CREATE,
            ORG_EDIT,
            ORG_DELETE,
            ANALYTICS_VIEW,
            ANALYTICS_EXPORT,
            ANALYTICS_ADMIN,
            UTILITIES_VIEW,
            UTILITIES_CREATE,
            UTILITIES_ADMIN,
        ],
    },
    RoleTemplate {
        name: MANAGER_ROLE,
        display_name: "Fleet Manager",
        description: "Runs day-to-day fleet operations and reporting",
        grants_all: false,
        blocks: &[
            FLEET_VIEW,
            FLEET_CREATE,
            FLEET_EDIT,
            ORG_VIEW,
            ANALYTICS_VIEW,
            ANALYTICS_EXPORT,
            UTILITIES_VIEW,
        ],
    },
    RoleTemplate {
        name: USER_ROLE,
        display_name: "User",
        description: "Works with fleet records and views analytics",
        grants_all: false,
        blocks: &[FLEET_VIEW, FLEET_CREATE, FLEET_EDIT, ANALYTICS_VIEW],
    },
    RoleTemplate {
        name: VIEWER_ROLE,
        display_name: "Viewer",
        description: "Read-only access to fleet records and analytics",
        grants_all: false,
        blocks: &[FLEET_VIEW, ANALYTICS_VIEW],
    },
];

/// Read-only registry of the system role templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleTemplateStore;

impl RoleTemplateStore {
    /// Returns every system role in hierarchy order.
    #[must_use]
    pub fn all() -> &'static [RoleTemplate] {
        &ROLE_TEMPLATES
    }

    /// Finds a system role by name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn get(name: &str) -> Option<&'static RoleTemplate> {
        let name = name.trim();
        ROLE_TEMPLATES
            .iter()
            .find(|template| template.name.eq_ignore_ascii_case(name))
    }

    /// Returns whether the name belongs to a system role.
    #[must_use]
    pub fn is_template_name(name: &str) -> bool {
        Self::get(name).is_some()
    }
}

/// Role defined by a tenant with an editable permission set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomRole {
    tenant_id: TenantId,
    name: RoleName,
    display_name: NonEmptyString,
    description: String,
    permissions: PermissionSet,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CustomRole {
    /// Creates a new custom role, validating display name and description.
    pub fn new(
        tenant_id: TenantId,
        name: RoleName,
        display_name: Option<String>,
        description: Option<String>,
        permissions: PermissionSet,
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        let display_name = display_name
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| name.default_display_name());

        if display_name.chars().count() > ROLE_DISPLAY_NAME_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "role display name must not exceed {ROLE_DISPLAY_NAME_MAX_LENGTH} characters"
            )));
        }

        let description = description
            .map(|value| value.trim().to_owned())
            .unwrap_or_default();

        if description.chars().count() > ROLE_DESCRIPTION_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "role description must not exceed {ROLE_DESCRIPTION_MAX_LENGTH} characters"
            )));
        }

        Ok(Self {
            tenant_id,
            name,
            display_name: NonEmptyString::new(display_name)?,
            description,
            permissions,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a role from persisted values.
    pub fn from_storage(
        tenant_id: TenantId,
        name: RoleName,
        display_name: String,
        description: String,
        permissions: PermissionSet,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            tenant_id,
            name,
            display_name: NonEmptyString::new(display_name)?,
            description,
            permissions,
            created_at,
            updated_at,
        })
    }

    /// Returns the role with a replaced permission set.
    #[must_use]
    pub fn with_permissions(self, permissions: PermissionSet, now: DateTime<Utc>) -> Self {
        Self {
            permissions,
            updated_at: now,
            ..self
        }
    }

    /// Returns the owning tenant.
    #[must_use]
    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    /// Returns the role name.
    #[must_use]
    pub fn name(&self) -> &RoleName {
        &self.name
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the permission set.
    #[must_use]
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// A role as seen by callers: a system template or a tenant role.
#[derive(Debug, Clone)]
pub enum Role {
    /// Built-in template.
    System(&'static RoleTemplate),
    /// Tenant-defined role.
    Custom(CustomRole),
}

impl Role {
    /// Returns the role name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::System(template) => template.name(),
            Self::Custom(role) => role.name().as_str(),
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::System(template) => template.display_name(),
            Self::Custom(role) => role.display_name(),
        }
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::System(template) => template.description(),
            Self::Custom(role) => role.description(),
        }
    }

    /// Returns whether the role is tenant-defined.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Returns the effective permission set.
    #[must_use]
    pub fn permissions(&self) -> PermissionSet {
        match self {
            Self::System(template) => template.permissions(),
            Self::Custom(role) => role.permissions().clone(),
        }
    }

    /// Returns the creation timestamp of tenant roles.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::System(_) => None,
            Self::Custom(role) => Some(role.created_at()),
        }
    }

    /// Returns the last update timestamp of tenant roles.
    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::System(_) => None,
            Self::Custom(role) => Some(role.updated_at()),
        }
    }
}
