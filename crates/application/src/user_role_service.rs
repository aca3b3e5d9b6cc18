use std::sync::Arc;

use tracing::{info, warn};

use convoy_core::{AppError, AppResult, UserIdentity};
use convoy_domain::{
    PermissionSet, User, UserId, assignable_roles, can_assign, can_reassign, is_protected_role,
};

use crate::{AuthorizationService, UserDirectory};

/// Effective permissions of one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPermissions {
    /// Resolved permission set.
    pub permissions: PermissionSet,
    /// Assigned role name.
    pub role: String,
    /// Roles this user may assign to others.
    pub assignable_roles: Vec<String>,
}

/// Application service for reading and changing user role assignments.
#[derive(Clone)]
pub struct UserRoleService {
    authorization_service: AuthorizationService,
    user_directory: Arc<dyn UserDirectory>,
}

impl UserRoleService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        user_directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            authorization_service,
            user_directory,
        }
    }

    /// Returns the actor's own effective permissions.
    pub async fn current_user_permissions(
        &self,
        actor: &UserIdentity,
    ) -> AppResult<UserPermissions> {
        self.permissions_for_role(actor, actor.organization_role())
            .await
    }

    /// Returns another user's effective permissions in the actor's tenant.
    pub async fn user_permissions(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
    ) -> AppResult<UserPermissions> {
        if actor.subject() != user_id.to_string() {
            self.authorization_service.require_user_view(actor).await?;
        }

        let user = self.find_user(actor, user_id).await?;
        self.permissions_for_role(actor, user.organization_role())
            .await
    }

    /// Assigns a role to a user in the actor's tenant.
    ///
    /// The role must appear in the actor role's hierarchy entry, and so must
    /// the user's current role unless the actor is the owner. The owner role
    /// can neither be assigned nor taken away.
    pub async fn assign_role(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
        role_name: &str,
    ) -> AppResult<User> {
        self.authorization_service
            .require_user_role_assignment(actor)
            .await?;

        let role_name = role_name.trim().to_lowercase();
        if is_protected_role(&role_name) {
            return Err(AppError::Forbidden(format!(
                "the '{role_name}' role cannot be assigned"
            )));
        }

        if !can_assign(actor.organization_role(), &role_name) {
            warn!(
                tenant_id = %actor.tenant_id(),
                subject = actor.subject(),
                role = actor.organization_role(),
                target_role = role_name.as_str(),
                "role assignment outside hierarchy denied"
            );
            return Err(AppError::Forbidden(format!(
                "role '{}' may not assign role '{role_name}'",
                actor.organization_role()
            )));
        }

        let user = self.find_user(actor, user_id).await?;
        if is_protected_role(user.organization_role()) {
            return Err(AppError::Forbidden(format!(
                "the role of user '{user_id}' is protected and cannot be changed"
            )));
        }

        if !can_reassign(actor.organization_role(), user.organization_role()) {
            warn!(
                tenant_id = %actor.tenant_id(),
                subject = actor.subject(),
                role = actor.organization_role(),
                user_id = %user_id,
                current_role = user.organization_role(),
                "role change of user outside hierarchy denied"
            );
            return Err(AppError::Forbidden(format!(
                "role '{}' may not change the role of a user holding '{}'",
                actor.organization_role(),
                user.organization_role()
            )));
        }

        let updated = self
            .user_directory
            .update_user_role(actor.tenant_id(), user_id, &role_name)
            .await?;

        info!(
            tenant_id = %actor.tenant_id(),
            subject = actor.subject(),
            user_id = %user_id,
            previous_role = user.organization_role(),
            role = updated.organization_role(),
            "user role assigned"
        );

        Ok(updated)
    }

    async fn find_user(&self, actor: &UserIdentity, user_id: UserId) -> AppResult<User> {
        self.user_directory
            .find_user(actor.tenant_id(), user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))
    }

    async fn permissions_for_role(
        &self,
        actor: &UserIdentity,
        role_name: &str,
    ) -> AppResult<UserPermissions> {
        let permissions = self
            .authorization_service
            .permissions_for_role(actor.tenant_id(), role_name)
            .await?;

        Ok(UserPermissions {
            permissions,
            role: role_name.to_owned(),
            assignable_roles: assignable_roles(role_name)
                .iter()
                .map(|role| (*role).to_owned())
                .collect(),
        })
    }
}
