//! End-to-end authentication flow over the HTTP app: register, login,
//! me, logout, and token revocation.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use simitra_api::{app::create_app, config::Config};

fn test_config() -> Config {
    Config::load_for_test(&[("database.url", "unused-in-tests")]).expect("test config")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn test_register_login_me_logout_flow() {
    let Some(pool) = common::maybe_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let app = create_app(test_config(), pool);
    let suffix = common::unique_suffix();
    let username = format!("petugas{}", suffix);
    let email = format!("petugas{}@test.local", suffix);

    // register issues a token immediately
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({"username": username, "email": email, "password": "rahasia-123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["user"]["username"], username.as_str());
    let register_token = body["data"]["token"].as_str().unwrap().to_string();

    // login by username identifier issues a second token
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"identifier": username, "password": "rahasia-123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let login_token = body_json(response).await["data"]["token"]
        .as_str()
        .unwrap()
        .to_string();
    assert_ne!(register_token, login_token);

    // login by email works too
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"identifier": email, "password": "rahasia-123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // me with the login token
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/auth/me", Some(&login_token), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["role"], "user");

    // logout revokes only the presented token
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/logout",
            Some(&login_token),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/auth/me", Some(&login_token), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // the register-time session is still alive
    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/auth/me",
            Some(&register_token),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let Some(pool) = common::maybe_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let app = create_app(test_config(), pool);
    let suffix = common::unique_suffix();
    let username = format!("dobel{}", suffix);

    let payload = json!({
        "username": username,
        "email": format!("dobel{}@test.local", suffix),
        "password": "rahasia-123",
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/auth/register", None, payload.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let mut second = payload;
    second["email"] = json!(format!("lain{}@test.local", suffix));
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/auth/register", None, second))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_validation_errors_are_422_with_field_map() {
    let Some(pool) = common::maybe_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let app = create_app(test_config(), pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({"username": "ab", "email": "bukan-email", "password": "x"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert!(body["errors"]["username"].is_array());
    assert!(body["errors"]["email"].is_array());
    assert!(body["errors"]["password"].is_array());
}

#[tokio::test]
async fn test_protected_route_without_token_is_401() {
    let Some(pool) = common::maybe_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let app = create_app(test_config(), pool);
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/mitra")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
