use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use convoy_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

#[cfg(test)]
mod tests;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route(
            "/api/permissions/structure",
            get(handlers::permissions::permission_structure_handler),
        )
        .route(
            "/api/permissions/toggle",
            post(handlers::permissions::toggle_permission_handler),
        )
        .route(
            "/api/roles",
            get(handlers::roles::list_roles_handler).post(handlers::roles::create_role_handler),
        )
        .route(
            "/api/roles/{role_name}",
            get(handlers::roles::get_role_handler).delete(handlers::roles::delete_role_handler),
        )
        .route(
            "/api/roles/{role_name}/permissions",
            put(handlers::roles::update_role_permissions_handler),
        )
        .route(
            "/api/users/me/permissions",
            get(handlers::users::current_user_permissions_handler),
        )
        .route(
            "/api/users/{user_id}/permissions",
            get(handlers::users::user_permissions_handler),
        )
        .route(
            "/api/users/{user_id}/role",
            put(handlers::users::assign_user_role_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_identity,
        ));

    let cors_layer = cors::build_cors_layer(frontend_url)?;

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
