use std::str::FromStr;

use convoy_application::UserDirectory;
use convoy_core::{AppResult, TenantId};
use convoy_domain::{ADMIN_ROLE, OWNER_ROLE, USER_ROLE, User, UserId, VIEWER_ROLE};
use tracing::info;

const DEV_SEED_OWNER_USER_ID: &str = "a2c8ea5f-4f39-4724-97f5-932f97f54f76";
const DEV_SEED_ADMIN_USER_ID: &str = "96d11e90-7403-4654-9727-cb1043f8bd31";
const DEV_SEED_DRIVER_USER_ID: &str = "3f0b7c52-5d0e-4a57-9a51-2f6e0d6c1b84";
const DEV_SEED_AUDITOR_USER_ID: &str = "c7d1e4a9-8b3f-4e12-a6c0-5f9b2d7e3a10";

const DEV_SEED_USERS: &[(&str, &str, &str)] = &[
    (DEV_SEED_OWNER_USER_ID, "Fleet Owner", OWNER_ROLE),
    (DEV_SEED_ADMIN_USER_ID, "Office Administrator", ADMIN_ROLE),
    (DEV_SEED_DRIVER_USER_ID, "Lead Driver", USER_ROLE),
    (DEV_SEED_AUDITOR_USER_ID, "Compliance Auditor", VIEWER_ROLE),
];

/// Upserts a fixed set of organization members for local development.
pub async fn run(user_directory: &dyn UserDirectory, tenant_id: &TenantId) -> AppResult<()> {
    for (user_id, display_name, role) in DEV_SEED_USERS {
        let user = User::new(
            UserId::from_str(user_id)?,
            tenant_id.clone(),
            *display_name,
            role,
        )?;
        user_directory.save_user(user).await?;

        info!(
            tenant_id = %tenant_id,
            user_id = *user_id,
            role = *role,
            "seeded development user"
        );
    }

    Ok(())
}
