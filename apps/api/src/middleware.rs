use std::str::FromStr;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use convoy_core::{AppError, TenantId};
use convoy_domain::UserId;
use tracing::warn;

use crate::error::ApiResult;
use crate::state::AppState;

/// Header carrying the caller's tenant, set by the upstream authentication proxy.
pub const TENANT_HEADER: &str = "x-convoy-tenant";
/// Header carrying the caller's user id, set by the upstream authentication proxy.
pub const USER_HEADER: &str = "x-convoy-user";

pub async fn require_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let tenant_id = TenantId::new(required_header(request.headers(), TENANT_HEADER)?)
        .map_err(|_| AppError::Unauthorized("invalid tenant header".to_owned()))?;
    let user_id = UserId::from_str(required_header(request.headers(), USER_HEADER)?)
        .map_err(|_| AppError::Unauthorized("invalid user header".to_owned()))?;

    let Some(user) = state.user_directory.find_user(&tenant_id, user_id).await? else {
        warn!(tenant_id = %tenant_id, user_id = %user_id, "unknown identity rejected");
        return Err(AppError::Unauthorized("authentication required".to_owned()).into());
    };

    request.extensions_mut().insert(user.identity());
    Ok(next.run(request).await)
}

fn required_header<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, AppError> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))
}
