//! Convoy role and permission API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dev_seed;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use convoy_application::{CustomRoleRepository, UserDirectory};
use convoy_core::AppError;
use convoy_infrastructure::{
    InMemoryCustomRoleRepository, InMemoryUserDirectory, PostgresCustomRoleRepository,
    PostgresUserDirectory,
};
use tracing::info;

use crate::api_config::{ApiConfig, StorageBackend, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let (role_repository, user_directory) = match &config.storage_backend {
        StorageBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = api_services::connect_and_migrate(database_url, *max_connections).await?;

            if config.migrate_only {
                info!("database migrations applied successfully");
                return Ok(());
            }

            let role_repository: Arc<dyn CustomRoleRepository> =
                Arc::new(PostgresCustomRoleRepository::new(pool.clone()));
            let user_directory: Arc<dyn UserDirectory> =
                Arc::new(PostgresUserDirectory::new(pool));
            (role_repository, user_directory)
        }
        StorageBackend::Memory => {
            info!("using in-memory storage; data is lost on shutdown");
            let role_repository: Arc<dyn CustomRoleRepository> =
                Arc::new(InMemoryCustomRoleRepository::new());
            let user_directory: Arc<dyn UserDirectory> = Arc::new(InMemoryUserDirectory::new());
            (role_repository, user_directory)
        }
    };

    if let Some(tenant_id) = &config.dev_seed_tenant_id {
        dev_seed::run(user_directory.as_ref(), tenant_id).await?;
    }

    let app_state = api_services::build_app_state(role_repository, user_directory);
    let app = api_router::build_router(app_state, &config.frontend_url)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind {address}: {error}")))?;

    info!(%address, "convoy-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("server error: {error}")))
}
