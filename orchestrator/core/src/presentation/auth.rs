// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Bearer token extraction for protected routes.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use std::sync::Arc;

use crate::domain::auth::{AuthError, Principal};
use crate::presentation::api::AppState;
use crate::presentation::error::ApiError;

/// The authenticated caller. Adding this to a handler's arguments makes the
/// route require a valid `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

/// Pull the token out of an `Authorization` header value. The scheme is
/// matched case-insensitively.
pub fn extract_bearer_token(header_value: Option<&str>) -> Result<&str, AuthError> {
    let raw = header_value.ok_or(AuthError::NotAuthenticated)?.trim();
    let Some((scheme, token)) = raw.split_once(' ') else {
        return Err(AuthError::NotAuthenticated);
    };
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::NotAuthenticated);
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::NotAuthenticated);
    }
    Ok(token)
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let token = extract_bearer_token(header)?;
        let principal = state.services.auth.authenticate(token).await?;
        Ok(CurrentUser(principal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token(Some("Bearer abc.def")), Ok("abc.def"));
        assert_eq!(extract_bearer_token(Some("bearer  abc ")), Ok("abc"));
        assert_eq!(extract_bearer_token(None), Err(AuthError::NotAuthenticated));
        assert_eq!(extract_bearer_token(Some("Basic Zm9vOmJhcg==")), Err(AuthError::NotAuthenticated));
        assert_eq!(extract_bearer_token(Some("Bearer")), Err(AuthError::NotAuthenticated));
        assert_eq!(extract_bearer_token(Some("Bearer   ")), Err(AuthError::NotAuthenticated));
    }
}
