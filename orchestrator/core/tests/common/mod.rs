// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

#![allow(dead_code)]

use std::sync::Arc;

use agenthub_core::application::repository_factory::create_repositories;
use agenthub_core::application::Services;
use agenthub_core::domain::auth::TokenIssuer;
use agenthub_core::domain::repository::StorageBackend;
use agenthub_core::infrastructure::{ActivityLog, JwtTokenService};
use agenthub_core::presentation::{app, AppState};
use anyhow::{anyhow, Result};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "agenthub-integration-test-secret";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-password";

pub struct TestApp {
    pub router: Router,
    pub tokens: Arc<JwtTokenService>,
}

impl TestApp {
    pub async fn new() -> Result<Self> {
        let tokens = Arc::new(JwtTokenService::new(TEST_SECRET));
        let services = Services::new(
            create_repositories(&StorageBackend::InMemory),
            tokens.clone(),
            chrono::Duration::minutes(30),
            Arc::new(ActivityLog::new(100)),
        );
        services
            .auth
            .bootstrap_admin(ADMIN_USERNAME, ADMIN_PASSWORD)
            .await
            .map_err(|err| anyhow!("bootstrap failed: {err}"))?;
        let router = app(Arc::new(AppState::new(services)));
        Ok(Self { router, tokens })
    }

    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        Ok((status, body))
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        self.send(json_request(method, uri, token, body)?).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(StatusCode, Value)> {
        let form = format!("username={}&password={}", username, password);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/auth/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))?;
        self.send(request).await
    }

    pub async fn admin_token(&self) -> Result<String> {
        self.token_for(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    pub async fn token_for(&self, username: &str, password: &str) -> Result<String> {
        let (status, body) = self.login(username, password).await?;
        if status != StatusCode::OK {
            return Err(anyhow!("login for {username} failed with {status}: {body}"));
        }
        body["access_token"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("login response has no access_token: {body}"))
    }

    /// Create a plain user through the API and log in as them.
    pub async fn user_token(&self, admin_token: &str, username: &str) -> Result<String> {
        let (status, body) = self
            .call(
                Method::POST,
                "/users",
                Some(admin_token),
                Some(serde_json::json!({"username": username, "password": "pw", "role_id": 1})),
            )
            .await?;
        if status != StatusCode::OK {
            return Err(anyhow!("create user failed with {status}: {body}"));
        }
        self.token_for(username, "pw").await
    }

    pub fn issue(&self, subject: &str, ttl: chrono::Duration) -> Result<String> {
        self.tokens
            .issue(subject, ttl)
            .map_err(|err| anyhow!("issue failed: {err}"))
    }

    /// Register an agent and return its id.
    pub async fn register_agent(&self, token: &str, status: &str) -> Result<u64> {
        let (code, body) = self
            .call(
                Method::POST,
                "/agents",
                Some(token),
                Some(serde_json::json!({
                    "agent_type": "BDI",
                    "status": status,
                    "priority_level": 2,
                    "configuration": {"goal": "explore"}
                })),
            )
            .await?;
        if code != StatusCode::OK {
            return Err(anyhow!("register agent failed with {code}: {body}"));
        }
        body["agent_id"]
            .as_u64()
            .ok_or_else(|| anyhow!("no agent_id in {body}"))
    }
}

pub fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<Request<Body>> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };
    Ok(request)
}
