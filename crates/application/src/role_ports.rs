use async_trait::async_trait;
use chrono::{DateTime, Utc};

use convoy_core::{AppResult, TenantId};
use convoy_domain::{CustomRole, PermissionSet, RoleName, User, UserId};

/// Repository port for tenant-defined roles.
#[async_trait]
pub trait CustomRoleRepository: Send + Sync {
    /// Lists the tenant's custom roles sorted by name.
    async fn list_roles(&self, tenant_id: &TenantId) -> AppResult<Vec<CustomRole>>;

    /// Finds one custom role by name.
    async fn find_role(
        &self,
        tenant_id: &TenantId,
        name: &RoleName,
    ) -> AppResult<Option<CustomRole>>;

    /// Persists a new custom role.
    ///
    /// Fails with `AppError::Conflict` when `(tenant_id, name)` already exists.
    /// The uniqueness check must be atomic with the insert.
    async fn create_role(&self, role: CustomRole) -> AppResult<CustomRole>;

    /// Replaces a custom role's permission set.
    ///
    /// Fails with `AppError::NotFound` when the role does not exist.
    async fn update_role_permissions(
        &self,
        tenant_id: &TenantId,
        name: &RoleName,
        permissions: PermissionSet,
        updated_at: DateTime<Utc>,
    ) -> AppResult<CustomRole>;

    /// Deletes a custom role.
    ///
    /// Fails with `AppError::NotFound` when the role does not exist.
    async fn delete_role(&self, tenant_id: &TenantId, name: &RoleName) -> AppResult<()>;
}

/// Repository port for organization members.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user in tenant scope.
    async fn find_user(&self, tenant_id: &TenantId, user_id: UserId) -> AppResult<Option<User>>;

    /// Inserts or replaces a user record.
    ///
    /// A user id already stored under another tenant fails with
    /// `AppError::Conflict`; users never move between tenants.
    async fn save_user(&self, user: User) -> AppResult<User>;

    /// Changes the role name assigned to a user.
    ///
    /// Fails with `AppError::NotFound` when the user does not exist in the tenant.
    async fn update_user_role(
        &self,
        tenant_id: &TenantId,
        user_id: UserId,
        role_name: &str,
    ) -> AppResult<User>;
}
