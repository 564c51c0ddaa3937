//! Shared test harness
//!
//! Spins up server state over an embedded database in a temp dir and
//! drives the full router (middleware included) without a network socket.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, Response, StatusCode, header, request};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use tracker_server::api;
use tracker_server::core::{Config, ServerState};
use tracker_server::db::models::{Role, UserCreate};
use tracker_server::db::repository::UserRepository;

pub const TEST_SECRET: &str = "integration-test-secret-key-0123456789abcdef";

/// Fresh server state over an embedded database in a temp dir.
/// Keep the returned TempDir alive for the duration of the test.
pub async fn test_state() -> (ServerState, TempDir) {
    let tmp = TempDir::new().expect("create temp dir");
    let config = Config::with_overrides(tmp.path().to_string_lossy(), 0, TEST_SECRET);
    let state = ServerState::initialize(&config)
        .await
        .expect("initialize state");
    (state, tmp)
}

/// The full application, identical to what the server binds
pub fn app(state: &ServerState) -> Router {
    api::build_app(state).with_state(state.clone())
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("send request")
}

fn authorized(builder: request::Builder, token: Option<&str>) -> request::Builder {
    match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    authorized(Request::builder().method("GET").uri(uri), token)
        .body(Body::empty())
        .expect("build request")
}

pub fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    authorized(Request::builder().method("POST").uri(uri), token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

pub fn put_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    authorized(Request::builder().method("PUT").uri(uri), token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse json body")
}

/// Register a user through the API, asserting success
pub async fn register(
    app: &Router,
    name: &str,
    email: &str,
    password: &str,
    role: Option<&str>,
) -> Value {
    let mut body = json!({ "name": name, "email": email, "password": password });
    if let Some(role) = role {
        body["role"] = json!(role);
    }
    let response = send(app, post_json("/api/auth/register", None, &body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Log in through the API and return the token
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let body = json!({ "email": email, "password": password });
    let response = send(app, post_json("/api/auth/login", None, &body)).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}

/// Admin token via the register API
pub async fn admin_token(app: &Router) -> String {
    let body = register(app, "Admin User", "admin@test.dev", "password123", Some("admin")).await;
    body["token"].as_str().expect("admin token").to_string()
}

/// Create an employee record as admin, returning its id
pub async fn create_employee(app: &Router, admin_token: &str, name: &str) -> String {
    let response = send(
        app,
        post_json("/api/employees", Some(admin_token), &json!({ "name": name })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"]
        .as_str()
        .expect("employee id")
        .to_string()
}

/// Create a task as admin, returning the response body
pub async fn create_task(
    app: &Router,
    admin_token: &str,
    title: &str,
    employee_id: &str,
    status: Option<&str>,
) -> Value {
    let mut body = json!({ "title": title, "employeeId": employee_id });
    if let Some(status) = status {
        body["status"] = json!(status);
    }
    let response = send(app, post_json("/api/tasks", Some(admin_token), &body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Employee-role user linked to an employee record. Registration does not
/// link accounts, so this goes through the repository, then logs in
/// through the API.
pub async fn linked_employee_token(
    app: &Router,
    state: &ServerState,
    email: &str,
    employee_id: &str,
) -> String {
    let repo = UserRepository::new(state.get_db());
    repo.create(UserCreate {
        name: email.to_string(),
        email: email.to_string(),
        password: "password123".into(),
        role: Role::Employee,
        employee: Some(employee_id.parse().expect("parse employee id")),
    })
    .await
    .expect("create linked user");
    login(app, email, "password123").await
}
