use std::sync::Arc;

use convoy_core::{AppError, AppResult, TenantId, UserIdentity};
use convoy_domain::{
    PermissionSet, Role, RoleName, RoleTemplateStore, can_assign_user_roles, can_create_roles,
    can_delete_roles, can_edit_roles, can_view_roles, can_view_users,
};
use tracing::warn;

use crate::CustomRoleRepository;

/// Application service resolving roles into permission sets and gating
/// role-management operations.
#[derive(Clone)]
pub struct AuthorizationService {
    role_repository: Arc<dyn CustomRoleRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a role repository.
    #[must_use]
    pub fn new(role_repository: Arc<dyn CustomRoleRepository>) -> Self {
        Self { role_repository }
    }

    /// Resolves a role name: system templates first, then tenant roles.
    pub async fn resolve_role(
        &self,
        tenant_id: &TenantId,
        role_name: &str,
    ) -> AppResult<Option<Role>> {
        if let Some(template) = RoleTemplateStore::get(role_name) {
            return Ok(Some(Role::System(template)));
        }

        let Ok(name) = RoleName::new(role_name) else {
            return Ok(None);
        };

        Ok(self
            .role_repository
            .find_role(tenant_id, &name)
            .await?
            .map(Role::Custom))
    }

    /// Returns the permission set granted by `role_name`.
    ///
    /// Unknown roles, including deleted custom roles, grant nothing.
    pub async fn permissions_for_role(
        &self,
        tenant_id: &TenantId,
        role_name: &str,
    ) -> AppResult<PermissionSet> {
        match self.resolve_role(tenant_id, role_name).await? {
            Some(role) => Ok(role.permissions()),
            None => {
                warn!(
                    tenant_id = %tenant_id,
                    role = role_name,
                    "role could not be resolved, granting no permissions"
                );
                Ok(PermissionSet::new())
            }
        }
    }

    /// Returns the actor's effective permission set.
    pub async fn permissions_for(&self, actor: &UserIdentity) -> AppResult<PermissionSet> {
        self.permissions_for_role(actor.tenant_id(), actor.organization_role())
            .await
    }

    /// Ensures the actor may list and inspect roles.
    pub async fn require_role_view(&self, actor: &UserIdentity) -> AppResult<()> {
        self.require(actor, "view roles", can_view_roles).await
    }

    /// Ensures the actor may create custom roles.
    pub async fn require_role_create(&self, actor: &UserIdentity) -> AppResult<()> {
        self.require(actor, "create roles", can_create_roles).await
    }

    /// Ensures the actor may edit custom role permissions.
    pub async fn require_role_edit(&self, actor: &UserIdentity) -> AppResult<()> {
        self.require(actor, "edit roles", can_edit_roles).await
    }

    /// Ensures the actor may delete custom roles.
    pub async fn require_role_delete(&self, actor: &UserIdentity) -> AppResult<()> {
        self.require(actor, "delete roles", can_delete_roles).await
    }

    /// Ensures the actor may inspect other users' permissions.
    pub async fn require_user_view(&self, actor: &UserIdentity) -> AppResult<()> {
        self.require(actor, "view users", can_view_users).await
    }

    /// Ensures the actor may change other users' roles.
    pub async fn require_user_role_assignment(&self, actor: &UserIdentity) -> AppResult<()> {
        self.require(actor, "assign user roles", can_assign_user_roles)
            .await
    }

    async fn require(
        &self,
        actor: &UserIdentity,
        operation: &str,
        predicate: fn(&PermissionSet) -> bool,
    ) -> AppResult<()> {
        let permissions = self.permissions_for(actor).await?;
        if predicate(&permissions) {
            return Ok(());
        }

        warn!(
            tenant_id = %actor.tenant_id(),
            subject = actor.subject(),
            role = actor.organization_role(),
            operation,
            "authorization denied"
        );

        Err(AppError::Forbidden(format!(
            "subject '{}' with role '{}' is not allowed to {operation} in tenant '{}'",
            actor.subject(),
            actor.organization_role(),
            actor.tenant_id()
        )))
    }
}
