use std::sync::Arc;

use axum::Router;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use convoy_application::UserDirectory;
use convoy_core::TenantId;
use convoy_domain::{User, UserId};
use convoy_infrastructure::{InMemoryCustomRoleRepository, InMemoryUserDirectory};
use serde_json::{Value, json};
use tower::util::ServiceExt; // for oneshot

use crate::api_services::build_app_state;
use crate::middleware::{TENANT_HEADER, USER_HEADER};

use super::build_router;

struct TestApp {
    router: Router,
    tenant_id: TenantId,
    owner: UserId,
    admin: UserId,
    member: UserId,
    viewer: UserId,
}

impl TestApp {
    async fn new() -> Self {
        let tenant_id = TenantId::new("DOT123456").unwrap_or_else(|_| panic!("tenant id"));
        let user_directory = Arc::new(InMemoryUserDirectory::new());

        let owner = seed_user(user_directory.as_ref(), &tenant_id, "Fleet Owner", "owner").await;
        let admin = seed_user(user_directory.as_ref(), &tenant_id, "Dispatch Lead", "admin").await;
        let member = seed_user(user_directory.as_ref(), &tenant_id, "Driver", "user").await;
        let viewer = seed_user(user_directory.as_ref(), &tenant_id, "Auditor", "viewer").await;

        let state = build_app_state(Arc::new(InMemoryCustomRoleRepository::new()), user_directory);
        let router = build_router(state, "http://localhost:3000")
            .unwrap_or_else(|error| panic!("router should build: {error}"));

        Self {
            router,
            tenant_id,
            owner,
            admin,
            member,
            viewer,
        }
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        acting_user: Option<UserId>,
        payload: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user_id) = acting_user {
            builder = builder
                .header(TENANT_HEADER, self.tenant_id.as_str())
                .header(USER_HEADER, user_id.to_string());
        }

        let body = match payload {
            Some(payload) => {
                builder = builder.header("content-type", "application/json");
                Body::from(payload.to_string())
            }
            None => Body::empty(),
        };

        let request = builder
            .body(body)
            .unwrap_or_else(|error| panic!("request should build: {error}"));
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|error| panic!("router should respond: {error}"));

        let status = response.status();
        let bytes = body::to_bytes(response.into_body(), 10_485_760)
            .await
            .unwrap_or_else(|error| panic!("body should be readable: {error}"));
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, value)
    }
}

async fn seed_user(
    user_directory: &dyn UserDirectory,
    tenant_id: &TenantId,
    display_name: &str,
    role: &str,
) -> UserId {
    let user = User::new(UserId::new(), tenant_id.clone(), display_name, role)
        .unwrap_or_else(|_| panic!("user should be valid"));
    let user_id = user.id();
    user_directory
        .save_user(user)
        .await
        .unwrap_or_else(|_| panic!("user should be saved"));

    user_id
}

fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new().await;

    let (status, body) = app.send("GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn protected_routes_require_a_known_identity() {
    let app = TestApp::new().await;

    let (status, _) = app.send("GET", "/api/roles", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.send("GET", "/api/roles", Some(UserId::new()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "unauthorized: authentication required");
}

#[tokio::test]
async fn permission_structure_uses_camel_case_shape() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send("GET", "/api/permissions/structure", Some(app.viewer), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["permissionStructure"]["fleet"]["icon"], "truck");
    assert_eq!(body["roleTemplates"]["admin"]["name"], "Administrator");
    assert_eq!(body["blockPermissions"]["FLEET_VIEW"], "fleet_view");
    assert!(body["roleTemplates"]["user"]["granularPermissions"].is_array());
}

#[tokio::test]
async fn toggle_applies_block_cascade() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            "POST",
            "/api/permissions/toggle",
            Some(app.member),
            Some(json!({ "permission": "fleet_view", "currentPermissions": [] })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let mut permissions = strings(&body["permissions"]);
    permissions.sort();
    assert_eq!(
        permissions,
        [
            "fleet_view",
            "locations_view",
            "maintenance_view",
            "notes_view",
            "trailers_view"
        ]
    );

    let (status, body) = app
        .send(
            "POST",
            "/api/permissions/toggle",
            Some(app.member),
            Some(json!({ "permission": "fleet_teleport", "currentPermissions": [] })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn owner_creates_lists_and_deletes_custom_role() {
    let app = TestApp::new().await;
    let payload = json!({
        "name": "dispatcher",
        "description": "Dispatch desk",
        "permissions": ["fleet_view"]
    });

    let (status, body) = app
        .send("POST", "/api/roles", Some(app.owner), Some(payload.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "dispatcher");
    assert_eq!(body["displayName"], "Dispatcher");
    assert_eq!(body["isCustom"], true);
    assert!(body["createdAt"].is_string());
    assert!(strings(&body["permissions"]).contains(&"trailers_view".to_owned()));

    let (status, _) = app
        .send("POST", "/api/roles", Some(app.owner), Some(payload))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app.send("GET", "/api/roles", Some(app.admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let roles = body.as_array().cloned().unwrap_or_default();
    assert_eq!(roles.len(), 6);
    assert_eq!(roles[0]["name"], "owner");
    assert!(roles[0].get("createdAt").is_none());
    assert_eq!(roles[5]["name"], "dispatcher");

    let (status, _) = app
        .send("DELETE", "/api/roles/dispatcher", Some(app.owner), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .send("GET", "/api/roles/dispatcher", Some(app.owner), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn role_mutations_map_errors_to_statuses() {
    let app = TestApp::new().await;

    let (status, _) = app
        .send(
            "POST",
            "/api/roles",
            Some(app.viewer),
            Some(json!({ "name": "dispatcher", "permissions": [] })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            "POST",
            "/api/roles",
            Some(app.owner),
            Some(json!({ "name": "dispatcher", "permissions": ["fleet_fly"] })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(
            "PUT",
            "/api/roles/Owner/permissions",
            Some(app.owner),
            Some(json!({ "permissions": [] })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["message"].is_string());

    let (status, _) = app
        .send("DELETE", "/api/roles/OWNER", Some(app.owner), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            "PUT",
            "/api/roles/ghost/permissions",
            Some(app.owner),
            Some(json!({ "permissions": ["fleet_view"] })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_permissions_report_role_and_assignable_roles() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send("GET", "/api/users/me/permissions", Some(app.admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userRole"], "admin");
    assert_eq!(strings(&body["assignableRoles"]), ["user"]);
    assert!(strings(&body["userPermissions"]).contains(&"users_edit".to_owned()));

    let member_uri = format!("/api/users/{}/permissions", app.member);
    let (status, body) = app.send("GET", &member_uri, Some(app.owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userRole"], "user");
    assert!(strings(&body["assignableRoles"]).is_empty());

    let admin_uri = format!("/api/users/{}/permissions", app.admin);
    let (status, _) = app.send("GET", &admin_uri, Some(app.member), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send("GET", "/api/users/not-a-uuid/permissions", Some(app.owner), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn role_assignment_follows_hierarchy() {
    let app = TestApp::new().await;
    let viewer_uri = format!("/api/users/{}/role", app.viewer);
    let member_uri = format!("/api/users/{}/role", app.member);
    let admin_uri = format!("/api/users/{}/role", app.admin);

    let (status, _) = app
        .send("PUT", &viewer_uri, Some(app.admin), Some(json!({ "role": "user" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send("PUT", &viewer_uri, Some(app.owner), Some(json!({ "role": "user" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["organizationRole"], "user");

    let (status, _) = app
        .send("PUT", &member_uri, Some(app.admin), Some(json!({ "role": "admin" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send("PUT", &member_uri, Some(app.admin), Some(json!({ "role": "user" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["organizationRole"], "user");

    let (status, _) = app
        .send("PUT", &admin_uri, Some(app.admin), Some(json!({ "role": "user" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send("PUT", &viewer_uri, Some(app.owner), Some(json!({ "role": "owner" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let owner_uri = format!("/api/users/{}/role", app.owner);
    let (status, _) = app
        .send("PUT", &owner_uri, Some(app.owner), Some(json!({ "role": "user" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
