// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Login, bearer token validation and the admin role gate, driven through
//! the HTTP router.

mod common;

use agenthub_core::domain::auth::TokenIssuer;
use agenthub_core::infrastructure::JwtTokenService;
use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;

use common::{TestApp, ADMIN_PASSWORD, ADMIN_USERNAME};

#[tokio::test]
async fn test_health_needs_no_token() -> Result<()> {
    let app = TestApp::new().await?;
    let (status, body) = app.call(Method::GET, "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    Ok(())
}

#[tokio::test]
async fn test_login_then_users_me() -> Result<()> {
    let app = TestApp::new().await?;
    let (status, body) = app.login(ADMIN_USERNAME, ADMIN_PASSWORD).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    let token = body["access_token"].as_str().unwrap_or_default().to_string();

    let (status, me) = app.call(Method::GET, "/users/me", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], ADMIN_USERNAME);
    assert_eq!(me["role"], "admin");
    assert_eq!(me["user_id"], 1);
    Ok(())
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() -> Result<()> {
    let app = TestApp::new().await?;
    let (status, body) = app.login(ADMIN_USERNAME, "wrong").await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Incorrect username or password");

    let (status, _) = app.login("nobody", ADMIN_PASSWORD).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_missing_header_is_not_authenticated() -> Result<()> {
    let app = TestApp::new().await?;
    let (status, body) = app.call(Method::GET, "/agents", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Not authenticated");

    let request = Request::builder()
        .method(Method::GET)
        .uri("/roles")
        .header(header::AUTHORIZATION, "Basic YWRtaW46YWRtaW4=")
        .body(Body::empty())?;
    let (status, body) = app.send(request).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Not authenticated");
    Ok(())
}

#[tokio::test]
async fn test_unauthorized_response_carries_bearer_challenge() -> Result<()> {
    let app = TestApp::new().await?;
    let request = common::json_request(Method::GET, "/metrics", Some("garbage"), None)?;
    let response = tower::ServiceExt::oneshot(app.router.clone(), request).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
    Ok(())
}

#[tokio::test]
async fn test_expired_token_is_rejected() -> Result<()> {
    let app = TestApp::new().await?;
    let expired = app.issue(ADMIN_USERNAME, chrono::Duration::seconds(-5))?;
    let (status, body) = app.call(Method::GET, "/users/me", Some(&expired), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid token");
    Ok(())
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() -> Result<()> {
    let app = TestApp::new().await?;
    let forged = JwtTokenService::new("some-other-secret")
        .issue(ADMIN_USERNAME, chrono::Duration::minutes(5))
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let (status, body) = app.call(Method::GET, "/users/me", Some(&forged), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid token");
    Ok(())
}

#[tokio::test]
async fn test_token_for_unknown_subject_is_rejected() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.issue("ghost", chrono::Duration::minutes(5))?;
    let (status, body) = app.call(Method::GET, "/roles", Some(&token), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid token");
    Ok(())
}

#[tokio::test]
async fn test_roles_listing() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.admin_token().await?;
    let (status, body) = app.call(Method::GET, "/roles", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"role_id": 1, "role_name": "user"},
            {"role_id": 2, "role_name": "admin"}
        ])
    );
    Ok(())
}

#[tokio::test]
async fn test_admin_creates_user_who_can_log_in() -> Result<()> {
    let app = TestApp::new().await?;
    let admin = app.admin_token().await?;
    let (status, body) = app
        .call(
            Method::POST,
            "/users",
            Some(&admin),
            Some(json!({"username": "alice", "password": "s3cret", "role_id": 1})),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User created");
    assert_eq!(body["user_id"], 2);

    let alice = app.token_for("alice", "s3cret").await?;
    let (_, me) = app.call(Method::GET, "/users/me", Some(&alice), None).await?;
    assert_eq!(me["role"], "user");
    Ok(())
}

#[tokio::test]
async fn test_duplicate_username_conflicts() -> Result<()> {
    let app = TestApp::new().await?;
    let admin = app.admin_token().await?;
    let (status, body) = app
        .call(
            Method::POST,
            "/users",
            Some(&admin),
            Some(json!({"username": ADMIN_USERNAME, "password": "x", "role_id": 1})),
        )
        .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "Username already exists");
    Ok(())
}

#[tokio::test]
async fn test_non_admin_cannot_manage_users() -> Result<()> {
    let app = TestApp::new().await?;
    let admin = app.admin_token().await?;
    let bob = app.user_token(&admin, "bob").await?;

    let (status, body) = app
        .call(
            Method::POST,
            "/users",
            Some(&bob),
            Some(json!({"username": "mallory", "password": "x", "role_id": 2})),
        )
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Admin access required");

    // The rejected create left no trace.
    let (status, _) = app.login("mallory", "x").await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .call(
            Method::PUT,
            "/users/1",
            Some(&bob),
            Some(json!({"username": "bob2", "password": "x", "role_id": 2})),
        )
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn test_update_user_and_stale_token() -> Result<()> {
    let app = TestApp::new().await?;
    let admin = app.admin_token().await?;
    let carol = app.user_token(&admin, "carol").await?;

    let (status, body) = app
        .call(
            Method::PUT,
            "/users/2",
            Some(&admin),
            Some(json!({"username": "caroline", "password": "new", "role_id": 2})),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User updated");

    // The old token names a subject that no longer exists.
    let (status, _) = app.call(Method::GET, "/users/me", Some(&carol), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let caroline = app.token_for("caroline", "new").await?;
    let (_, me) = app.call(Method::GET, "/users/me", Some(&caroline), None).await?;
    assert_eq!(me["role"], "admin");

    let (status, body) = app
        .call(
            Method::PUT,
            "/users/99",
            Some(&admin),
            Some(json!({"username": "nobody", "password": "x", "role_id": 1})),
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");

    let (status, _) = app
        .call(
            Method::PUT,
            "/users/2",
            Some(&admin),
            Some(json!({"username": ADMIN_USERNAME, "password": "x", "role_id": 1})),
        )
        .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn test_unknown_role_id_is_unprocessable() -> Result<()> {
    let app = TestApp::new().await?;
    let admin = app.admin_token().await?;
    let (status, _) = app
        .call(
            Method::POST,
            "/users",
            Some(&admin),
            Some(json!({"username": "dave", "password": "x", "role_id": 7})),
        )
        .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}
