use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use convoy_application::UserDirectory;
use convoy_core::{AppError, AppResult, TenantId};
use convoy_domain::{User, UserId};

/// PostgreSQL-backed directory of organization users.
#[derive(Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    /// Creates a directory with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: uuid::Uuid,
    tenant_id: String,
    display_name: String,
    organization_role: String,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let tenant_id = TenantId::new(row.tenant_id).map_err(|error| {
            AppError::Internal(format!("invalid stored tenant id for user '{}': {error}", row.id))
        })?;

        User::new(
            UserId::from_uuid(row.id),
            tenant_id,
            row.display_name,
            row.organization_role,
        )
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_user(&self, tenant_id: &TenantId, user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, tenant_id, display_name, organization_role
            FROM organization_users
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant_id.as_str())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user: {error}")))?;

        row.map(User::try_from).transpose()
    }

    async fn save_user(&self, user: User) -> AppResult<User> {
        let saved = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            INSERT INTO organization_users (id, tenant_id, display_name, organization_role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET display_name = EXCLUDED.display_name,
                organization_role = EXCLUDED.organization_role,
                updated_at = now()
            WHERE organization_users.tenant_id = EXCLUDED.tenant_id
            RETURNING id
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.tenant_id().as_str())
        .bind(user.display_name())
        .bind(user.organization_role())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to save user: {error}")))?;

        if saved.is_none() {
            return Err(AppError::Conflict(format!(
                "user '{}' belongs to another tenant",
                user.id()
            )));
        }

        Ok(user)
    }

    async fn update_user_role(
        &self,
        tenant_id: &TenantId,
        user_id: UserId,
        role_name: &str,
    ) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE organization_users
            SET organization_role = $3, updated_at = now()
            WHERE tenant_id = $1 AND id = $2
            RETURNING id, tenant_id, display_name, organization_role
            "#,
        )
        .bind(tenant_id.as_str())
        .bind(user_id.as_uuid())
        .bind(role_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update user role: {error}")))?
        .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))?;

        User::try_from(row)
    }
}
