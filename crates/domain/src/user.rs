//! Organization members and their assigned role.

use std::str::FromStr;

use convoy_core::{AppError, AppResult, TenantId, UserIdentity};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for UserId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| AppError::Validation(format!("invalid user id '{value}'")))
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Member of a tenant organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    tenant_id: TenantId,
    display_name: String,
    organization_role: String,
}

impl User {
    /// Creates a user; the role name is normalized to lowercase.
    pub fn new(
        id: UserId,
        tenant_id: TenantId,
        display_name: impl Into<String>,
        organization_role: impl AsRef<str>,
    ) -> AppResult<Self> {
        let organization_role = organization_role.as_ref().trim().to_lowercase();
        if organization_role.is_empty() {
            return Err(AppError::Validation(
                "organization role must not be empty".to_owned(),
            ));
        }

        Ok(Self {
            id,
            tenant_id,
            display_name: display_name.into(),
            organization_role,
        })
    }

    /// Returns the user id.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the owning tenant.
    #[must_use]
    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the assigned role name.
    #[must_use]
    pub fn organization_role(&self) -> &str {
        self.organization_role.as_str()
    }

    /// Returns the user with a different role.
    pub fn with_role(self, organization_role: impl AsRef<str>) -> AppResult<Self> {
        Self::new(self.id, self.tenant_id, self.display_name, organization_role)
    }

    /// Builds the request identity for this user.
    #[must_use]
    pub fn identity(&self) -> UserIdentity {
        UserIdentity::new(
            self.id.to_string(),
            self.display_name.clone(),
            self.tenant_id.clone(),
            self.organization_role.clone(),
        )
    }
}
