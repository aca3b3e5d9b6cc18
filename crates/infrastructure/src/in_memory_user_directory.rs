use std::collections::HashMap;

use async_trait::async_trait;
use convoy_application::UserDirectory;
use convoy_core::{AppError, AppResult, TenantId};
use convoy_domain::{User, UserId};
use tokio::sync::RwLock;

/// In-memory user directory implementation.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_user(&self, tenant_id: &TenantId, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .get(&user_id)
            .filter(|user| user.tenant_id() == tenant_id)
            .cloned())
    }

    async fn save_user(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users
            .get(&user.id())
            .is_some_and(|stored| stored.tenant_id() != user.tenant_id())
        {
            return Err(AppError::Conflict(format!(
                "user '{}' belongs to another tenant",
                user.id()
            )));
        }

        users.insert(user.id(), user.clone());
        Ok(user)
    }

    async fn update_user_role(
        &self,
        tenant_id: &TenantId,
        user_id: UserId,
        role_name: &str,
    ) -> AppResult<User> {
        let mut users = self.users.write().await;

        let Some(existing) = users
            .get(&user_id)
            .filter(|user| user.tenant_id() == tenant_id)
            .cloned()
        else {
            return Err(AppError::NotFound(format!(
                "user '{user_id}' does not exist for tenant '{tenant_id}'"
            )));
        };

        let updated = existing.with_role(role_name)?;
        users.insert(user_id, updated.clone());
        Ok(updated)
    }
}
