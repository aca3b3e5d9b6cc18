use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use convoy_core::{AppError, AppResult, TenantId, UserIdentity};
use convoy_domain::{CustomRole, PermissionSet, RoleName, User, UserId};

use crate::{CustomRoleRepository, UserDirectory};

pub(crate) fn tenant(value: &str) -> TenantId {
    TenantId::new(value).unwrap_or_else(|_| panic!("invalid tenant id '{value}'"))
}

pub(crate) fn actor(tenant_id: &str, role: &str) -> UserIdentity {
    UserIdentity::new(
        format!("{role}-subject"),
        format!("{role} user"),
        tenant(tenant_id),
        role,
    )
}

pub(crate) fn custom_role(tenant_id: &str, name: &str, permissions: PermissionSet) -> CustomRole {
    let name = RoleName::new(name).unwrap_or_else(|_| panic!("invalid role name '{name}'"));
    CustomRole::new(tenant(tenant_id), name, None, None, permissions, Utc::now())
        .unwrap_or_else(|_| panic!("invalid custom role"))
}

#[derive(Default)]
pub(crate) struct FakeCustomRoleRepository {
    roles: Mutex<Vec<CustomRole>>,
}

impl FakeCustomRoleRepository {
    pub(crate) fn with_roles(roles: Vec<CustomRole>) -> Self {
        Self {
            roles: Mutex::new(roles),
        }
    }

    pub(crate) async fn stored_roles(&self) -> Vec<CustomRole> {
        self.roles.lock().await.clone()
    }
}

#[async_trait]
impl CustomRoleRepository for FakeCustomRoleRepository {
    async fn list_roles(&self, tenant_id: &TenantId) -> AppResult<Vec<CustomRole>> {
        let mut roles: Vec<CustomRole> = self
            .roles
            .lock()
            .await
            .iter()
            .filter(|role| role.tenant_id() == tenant_id)
            .cloned()
            .collect();
        roles.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(roles)
    }

    async fn find_role(
        &self,
        tenant_id: &TenantId,
        name: &RoleName,
    ) -> AppResult<Option<CustomRole>> {
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .find(|role| role.tenant_id() == tenant_id && role.name() == name)
            .cloned())
    }

    async fn create_role(&self, role: CustomRole) -> AppResult<CustomRole> {
        let mut roles = self.roles.lock().await;
        if roles
            .iter()
            .any(|stored| stored.tenant_id() == role.tenant_id() && stored.name() == role.name())
        {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists",
                role.name()
            )));
        }

        roles.push(role.clone());
        Ok(role)
    }

    async fn update_role_permissions(
        &self,
        tenant_id: &TenantId,
        name: &RoleName,
        permissions: PermissionSet,
        updated_at: DateTime<Utc>,
    ) -> AppResult<CustomRole> {
        let mut roles = self.roles.lock().await;
        let Some(index) = roles
            .iter()
            .position(|role| role.tenant_id() == tenant_id && role.name() == name)
        else {
            return Err(AppError::NotFound(format!("role '{name}' does not exist")));
        };

        let updated = roles.remove(index).with_permissions(permissions, updated_at);
        roles.push(updated.clone());
        Ok(updated)
    }

    async fn delete_role(&self, tenant_id: &TenantId, name: &RoleName) -> AppResult<()> {
        let mut roles = self.roles.lock().await;
        let before = roles.len();
        roles.retain(|role| !(role.tenant_id() == tenant_id && role.name() == name));

        if roles.len() == before {
            return Err(AppError::NotFound(format!("role '{name}' does not exist")));
        }

        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeUserDirectory {
    users: Mutex<Vec<User>>,
}

impl FakeUserDirectory {
    pub(crate) fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }
}

#[async_trait]
impl UserDirectory for FakeUserDirectory {
    async fn find_user(&self, tenant_id: &TenantId, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.tenant_id() == tenant_id && user.id() == user_id)
            .cloned())
    }

    async fn save_user(&self, user: User) -> AppResult<User> {
        let mut users = self.users.lock().await;
        if users
            .iter()
            .any(|stored| stored.id() == user.id() && stored.tenant_id() != user.tenant_id())
        {
            return Err(AppError::Conflict(format!(
                "user '{}' belongs to another tenant",
                user.id()
            )));
        }
        users.retain(|stored| stored.id() != user.id());
        users.push(user.clone());
        Ok(user)
    }

    async fn update_user_role(
        &self,
        tenant_id: &TenantId,
        user_id: UserId,
        role_name: &str,
    ) -> AppResult<User> {
        let mut users = self.users.lock().await;
        let Some(index) = users
            .iter()
            .position(|user| user.tenant_id() == tenant_id && user.id() == user_id)
        else {
            return Err(AppError::NotFound(format!("user '{user_id}' does not exist")));
        };

        let updated = users.remove(index).with_role(role_name)?;
        users.push(updated.clone());
        Ok(updated)
    }
}
