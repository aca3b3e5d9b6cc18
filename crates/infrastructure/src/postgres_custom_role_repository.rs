use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use convoy_application::CustomRoleRepository;
use convoy_core::{AppError, AppResult, TenantId};
use convoy_domain::{CustomRole, Permission, PermissionSet, RoleName};

/// PostgreSQL-backed repository for tenant custom roles.
#[derive(Clone)]
pub struct PostgresCustomRoleRepository {
    pool: PgPool,
}

impl PostgresCustomRoleRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CustomRoleRow {
    role_id: uuid::Uuid,
    tenant_id: String,
    name: String,
    display_name: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    permission: Option<String>,
}

#[derive(Debug, FromRow)]
struct UpdatedRoleRow {
    role_id: uuid::Uuid,
    display_name: String,
    description: String,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl CustomRoleRepository for PostgresCustomRoleRepository {
    async fn list_roles(&self, tenant_id: &TenantId) -> AppResult<Vec<CustomRole>> {
        let rows = sqlx::query_as::<_, CustomRoleRow>(
            r#"
            SELECT
                roles.id AS role_id,
                roles.tenant_id,
                roles.name,
                roles.display_name,
                roles.description,
                roles.created_at,
                roles.updated_at,
                permissions.permission
            FROM custom_roles AS roles
            LEFT JOIN custom_role_permissions AS permissions
                ON permissions.role_id = roles.id
            WHERE roles.tenant_id = $1
            ORDER BY roles.name, permissions.permission
            "#,
        )
        .bind(tenant_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list custom roles: {error}")))?;

        aggregate_roles(rows)
    }

    async fn find_role(
        &self,
        tenant_id: &TenantId,
        name: &RoleName,
    ) -> AppResult<Option<CustomRole>> {
        let rows = sqlx::query_as::<_, CustomRoleRow>(
            r#"
            SELECT
                roles.id AS role_id,
                roles.tenant_id,
                roles.name,
                roles.display_name,
                roles.description,
                roles.created_at,
                roles.updated_at,
                permissions.permission
            FROM custom_roles AS roles
            LEFT JOIN custom_role_permissions AS permissions
                ON permissions.role_id = roles.id
            WHERE roles.tenant_id = $1 AND roles.name = $2
            ORDER BY permissions.permission
            "#,
        )
        .bind(tenant_id.as_str())
        .bind(name.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find custom role: {error}")))?;

        Ok(aggregate_roles(rows)?.into_iter().next())
    }

    async fn create_role(&self, role: CustomRole) -> AppResult<CustomRole> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        let role_id = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            INSERT INTO custom_roles (tenant_id, name, display_name, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(role.tenant_id().as_str())
        .bind(role.name().as_str())
        .bind(role.display_name())
        .bind(role.description())
        .bind(role.created_at())
        .bind(role.updated_at())
        .fetch_one(&mut *transaction)
        .await
        .map_err(|error| map_role_conflict(error, role.name()))?;

        insert_permissions(&mut transaction, role_id, role.permissions()).await?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(role)
    }

    async fn update_role_permissions(
        &self,
        tenant_id: &TenantId,
        name: &RoleName,
        permissions: PermissionSet,
        updated_at: DateTime<Utc>,
    ) -> AppResult<CustomRole> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        let row = sqlx::query_as::<_, UpdatedRoleRow>(
            r#"
            UPDATE custom_roles
            SET updated_at = $3
            WHERE tenant_id = $1 AND name = $2
            RETURNING id AS role_id, display_name, description, created_at
            "#,
        )
        .bind(tenant_id.as_str())
        .bind(name.as_str())
        .bind(updated_at)
        .fetch_optional(&mut *transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update custom role: {error}")))?
        .ok_or_else(|| AppError::NotFound(format!("role '{name}' does not exist")))?;

        sqlx::query(
            r#"
            DELETE FROM custom_role_permissions
            WHERE role_id = $1
            "#,
        )
        .bind(row.role_id)
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to clear custom role permissions: {error}"))
        })?;

        insert_permissions(&mut transaction, row.role_id, &permissions).await?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        CustomRole::from_storage(
            tenant_id.clone(),
            name.clone(),
            row.display_name,
            row.description,
            permissions,
            row.created_at,
            updated_at,
        )
    }

    async fn delete_role(&self, tenant_id: &TenantId, name: &RoleName) -> AppResult<()> {
        let rows_affected = sqlx::query(
            r#"
            DELETE FROM custom_roles
            WHERE tenant_id = $1 AND name = $2
            "#,
        )
        .bind(tenant_id.as_str())
        .bind(name.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete custom role: {error}")))?
        .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::NotFound(format!("role '{name}' does not exist")));
        }

        Ok(())
    }
}

async fn insert_permissions(
    transaction: &mut Transaction<'_, Postgres>,
    role_id: uuid::Uuid,
    permissions: &PermissionSet,
) -> AppResult<()> {
    for permission in permissions.iter() {
        sqlx::query(
            r#"
            INSERT INTO custom_role_permissions (role_id, permission)
            VALUES ($1, $2)
            ON CONFLICT (role_id, permission) DO NOTHING
            "#,
        )
        .bind(role_id)
        .bind(permission.as_str())
        .execute(&mut **transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist custom role permissions: {error}"))
        })?;
    }

    Ok(())
}

fn aggregate_roles(rows: Vec<CustomRoleRow>) -> AppResult<Vec<CustomRole>> {
    let mut roles: Vec<(uuid::Uuid, CustomRoleRow, PermissionSet)> = Vec::new();

    for mut row in rows {
        let permission = row.permission.take();

        let index = match roles.iter().position(|(role_id, _, _)| *role_id == row.role_id) {
            Some(index) => index,
            None => {
                roles.push((row.role_id, row, PermissionSet::new()));
                roles.len() - 1
            }
        };

        if let Some(permission_value) = permission {
            let (_, stored_row, permissions) = &mut roles[index];
            let permission = Permission::from_str(permission_value.as_str()).map_err(|error| {
                AppError::Internal(format!(
                    "invalid stored permission '{}' for role '{}' in tenant '{}': {error}",
                    permission_value, stored_row.name, stored_row.tenant_id
                ))
            })?;
            permissions.insert(permission);
        }
    }

    roles
        .into_iter()
        .map(|(_, row, permissions)| role_from_row(row, permissions))
        .collect()
}

fn role_from_row(row: CustomRoleRow, permissions: PermissionSet) -> AppResult<CustomRole> {
    let tenant_id = TenantId::new(row.tenant_id).map_err(|error| {
        AppError::Internal(format!("invalid stored tenant id for custom role: {error}"))
    })?;
    let name = RoleName::new(row.name.as_str()).map_err(|error| {
        AppError::Internal(format!("invalid stored role name '{}': {error}", row.name))
    })?;

    CustomRole::from_storage(
        tenant_id,
        name,
        row.display_name,
        row.description,
        permissions,
        row.created_at,
        row.updated_at,
    )
}

fn map_role_conflict(error: sqlx::Error, role_name: &RoleName) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(format!("role '{role_name}' already exists"));
    }

    AppError::Internal(format!("failed to create custom role: {error}"))
}
