use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use convoy_application::CustomRoleRepository;
use convoy_core::{AppError, AppResult, TenantId};
use convoy_domain::{CustomRole, PermissionSet, RoleName};
use tokio::sync::RwLock;

/// In-memory custom role repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryCustomRoleRepository {
    roles: RwLock<HashMap<(TenantId, RoleName), CustomRole>>,
}

impl InMemoryCustomRoleRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            roles: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl CustomRoleRepository for InMemoryCustomRoleRepository {
    async fn list_roles(&self, tenant_id: &TenantId) -> AppResult<Vec<CustomRole>> {
        let roles = self.roles.read().await;

        let mut values: Vec<CustomRole> = roles
            .iter()
            .filter_map(|((stored_tenant_id, _), role)| {
                (stored_tenant_id == tenant_id).then_some(role.clone())
            })
            .collect();
        values.sort_by(|left, right| left.name().cmp(right.name()));

        Ok(values)
    }

    async fn find_role(
        &self,
        tenant_id: &TenantId,
        name: &RoleName,
    ) -> AppResult<Option<CustomRole>> {
        Ok(self
            .roles
            .read()
            .await
            .get(&(tenant_id.clone(), name.clone()))
            .cloned())
    }

    async fn create_role(&self, role: CustomRole) -> AppResult<CustomRole> {
        let key = (role.tenant_id().clone(), role.name().clone());
        let mut roles = self.roles.write().await;

        if roles.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists for tenant '{}'",
                key.1, key.0
            )));
        }

        roles.insert(key, role.clone());
        Ok(role)
    }

    async fn update_role_permissions(
        &self,
        tenant_id: &TenantId,
        name: &RoleName,
        permissions: PermissionSet,
        updated_at: DateTime<Utc>,
    ) -> AppResult<CustomRole> {
        let key = (tenant_id.clone(), name.clone());
        let mut roles = self.roles.write().await;

        let Some(existing) = roles.remove(&key) else {
            return Err(AppError::NotFound(format!(
                "role '{name}' does not exist for tenant '{tenant_id}'"
            )));
        };

        let updated = existing.with_permissions(permissions, updated_at);
        roles.insert(key, updated.clone());
        Ok(updated)
    }

    async fn delete_role(&self, tenant_id: &TenantId, name: &RoleName) -> AppResult<()> {
        self.roles
            .write()
            .await
            .remove(&(tenant_id.clone(), name.clone()))
            .map(|_| ())
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "role '{name}' does not exist for tenant '{tenant_id}'"
                ))
            })
    }
}
