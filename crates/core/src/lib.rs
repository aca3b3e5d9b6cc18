//! Shared primitives for all Rust crates in Convoy.

#![forbid(unsafe_code)]

/// Authentication primitives shared across services.
pub mod auth;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::UserIdentity;

/// Result type used across Convoy crates.
pub type AppResult<T> = Result<T, AppError>;

/// Maximum accepted length of a tenant identifier.
pub const TENANT_ID_MAX_LENGTH: usize = 64;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Tenant identifier used as the partition key for every persisted resource.
///
/// Carriers are keyed by their regulatory identifier (for example a USDOT
/// number such as `DOT123456`), so the value is an opaque validated string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);

impl TenantId {
    /// Creates a validated tenant identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "tenant id must not be empty".to_owned(),
            ));
        }

        if trimmed.len() > TENANT_ID_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "tenant id must not exceed {TENANT_ID_MAX_LENGTH} characters"
            )));
        }

        if !trimmed
            .chars()
            .all(|character| character.is_ascii_alphanumeric() || matches!(character, '-' | '_'))
        {
            return Err(AppError::Validation(format!(
                "tenant id '{trimmed}' may only contain ASCII letters, digits, '-' and '_'"
            )));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for TenantId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TenantId> for String {
    fn from(value: TenantId) -> Self {
        value.0
    }
}

impl Display for TenantId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Rules guarding the reserved owner role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtectedRoleViolation {
    /// The role's permissions or metadata may not change.
    #[error("the '{0}' role is protected and cannot be modified")]
    CannotModify(String),

    /// The role may not be removed.
    #[error("the '{0}' role is protected and cannot be deleted")]
    CannotDelete(String),

    /// A custom role may not reuse the reserved name.
    #[error("'{0}' is a reserved role name and cannot be created")]
    CannotCreateReserved(String),
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Permission identifier is not registered in the catalog.
    #[error("invalid permission: '{0}' is not a known permission")]
    InvalidPermission(String),

    /// Operation targets the reserved owner role.
    #[error("protected role: {0}")]
    ProtectedRole(#[from] ProtectedRoleViolation),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// User is not authenticated or not allowed to access a resource.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// User is authenticated but lacks the permission required by the operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::{AppError, NonEmptyString, ProtectedRoleViolation, TenantId};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("   ");
        assert!(result.is_err());
    }

    #[test]
    fn tenant_id_accepts_dot_numbers_and_trims() {
        let tenant_id = TenantId::new("  DOT123456 ");
        assert!(tenant_id.is_ok());
        assert_eq!(
            tenant_id.map(|value| value.to_string()).unwrap_or_default(),
            "DOT123456"
        );
    }

    #[test]
    fn tenant_id_rejects_invalid_characters() {
        assert!(TenantId::new("DOT 123").is_err());
        assert!(TenantId::new("").is_err());
        assert!(TenantId::new("a".repeat(65)).is_err());
    }

    #[test]
    fn protected_role_violation_converts_into_app_error() {
        let error: AppError = ProtectedRoleViolation::CannotDelete("owner".to_owned()).into();
        assert_eq!(
            error.to_string(),
            "protected role: the 'owner' role is protected and cannot be deleted"
        );
    }
}
