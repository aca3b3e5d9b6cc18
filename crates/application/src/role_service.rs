use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use convoy_core::{AppError, AppResult, UserIdentity};
use convoy_domain::{
    CustomRole, PermissionSet, Role, RoleName, RoleTemplateStore, assert_creatable,
    assert_deletable, assert_modifiable, cascade_closure,
};

use crate::{AuthorizationService, CustomRoleRepository};

/// Input payload for creating custom roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleInput {
    /// Role name, unique in tenant scope.
    pub name: String,
    /// Optional display name; derived from the name when absent.
    pub display_name: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Permission identifiers to grant.
    pub permissions: Vec<String>,
}

/// Application service for listing and managing tenant roles.
#[derive(Clone)]
pub struct RoleService {
    authorization_service: AuthorizationService,
    repository: Arc<dyn CustomRoleRepository>,
}

impl RoleService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        repository: Arc<dyn CustomRoleRepository>,
    ) -> Self {
        Self {
            authorization_service,
            repository,
        }
    }

    /// Lists system roles followed by the actor tenant's custom roles.
    pub async fn list_roles(&self, actor: &UserIdentity) -> AppResult<Vec<Role>> {
        self.authorization_service.require_role_view(actor).await?;

        let custom_roles = self.repository.list_roles(actor.tenant_id()).await?;

        Ok(RoleTemplateStore::all()
            .iter()
            .map(Role::System)
            .chain(custom_roles.into_iter().map(Role::Custom))
            .collect())
    }

    /// Returns one role visible to the actor's tenant.
    pub async fn get_role(&self, actor: &UserIdentity, name: &str) -> AppResult<Role> {
        self.authorization_service.require_role_view(actor).await?;

        self.authorization_service
            .resolve_role(actor.tenant_id(), name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{}' does not exist", name.trim())))
    }

    /// Creates a custom role in the actor's tenant.
    ///
    /// Permission identifiers are validated against the catalog and the stored
    /// set is closed under block cascades.
    pub async fn create_role(
        &self,
        actor: &UserIdentity,
        input: CreateRoleInput,
    ) -> AppResult<CustomRole> {
        assert_creatable(&input.name)?;
        self.authorization_service.require_role_create(actor).await?;

        let name = RoleName::new(&input.name)?;
        if RoleTemplateStore::is_template_name(name.as_str()) {
            return Err(AppError::Conflict(format!(
                "role '{name}' is a system role and cannot be redefined"
            )));
        }

        let permissions = normalized_permissions(&input.permissions)?;
        let role = CustomRole::new(
            actor.tenant_id().clone(),
            name,
            input.display_name,
            input.description,
            permissions,
            Utc::now(),
        )?;

        let role = self.repository.create_role(role).await?;

        info!(
            tenant_id = %actor.tenant_id(),
            subject = actor.subject(),
            role = role.name().as_str(),
            permissions = role.permissions().len(),
            "custom role created"
        );

        Ok(role)
    }

    /// Replaces the permission set of a custom role.
    pub async fn update_role_permissions(
        &self,
        actor: &UserIdentity,
        name: &str,
        permissions: Vec<String>,
    ) -> AppResult<CustomRole> {
        assert_modifiable(name)?;
        self.authorization_service.require_role_edit(actor).await?;

        let name = custom_role_name(name)?;
        let permissions = normalized_permissions(&permissions)?;

        let role = self
            .repository
            .update_role_permissions(actor.tenant_id(), &name, permissions, Utc::now())
            .await?;

        info!(
            tenant_id = %actor.tenant_id(),
            subject = actor.subject(),
            role = role.name().as_str(),
            permissions = role.permissions().len(),
            "custom role permissions updated"
        );

        Ok(role)
    }

    /// Deletes a custom role.
    ///
    /// Users still holding the role resolve to an empty permission set.
    pub async fn delete_role(&self, actor: &UserIdentity, name: &str) -> AppResult<()> {
        assert_deletable(name)?;
        self.authorization_service.require_role_delete(actor).await?;

        let name = custom_role_name(name)?;
        self.repository
            .delete_role(actor.tenant_id(), &name)
            .await?;

        info!(
            tenant_id = %actor.tenant_id(),
            subject = actor.subject(),
            role = name.as_str(),
            "custom role deleted"
        );

        Ok(())
    }
}

fn custom_role_name(name: &str) -> AppResult<RoleName> {
    let name = RoleName::new(name)?;
    if RoleTemplateStore::is_template_name(name.as_str()) {
        return Err(AppError::Validation(format!(
            "system role '{name}' is read-only"
        )));
    }

    Ok(name)
}

fn normalized_permissions(identifiers: &[String]) -> AppResult<PermissionSet> {
    let permissions = PermissionSet::from_identifiers(identifiers)?;
    Ok(cascade_closure(&permissions))
}
