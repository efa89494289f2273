// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # Authentication Model
//!
//! Bearer tokens are stateless: a [`TokenClaims`] set signed with the
//! process secret. Nothing is stored at issuance and nothing can be revoked;
//! a token dies only by expiry, or when its subject disappears from the
//! credential store.
//!
//! ```text
//! POST /auth/login ─▶ AuthService::login ─▶ TokenIssuer::issue(sub, ttl)
//! Authorization: Bearer … ─▶ TokenIssuer::verify ─▶ UserRepository::find_by_username
//!                                                   └─ Principal
//! ```
//!
//! [`TokenIssuer`] is the seam between this model and the JWT library; the
//! infrastructure implementation lives in
//! [`crate::infrastructure::jwt::JwtTokenService`].

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::user::{Role, User, UserId};

/// Claim set embedded in every bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Username of the token holder.
    pub sub: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Absolute expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Signs and verifies bearer tokens.
pub trait TokenIssuer: Send + Sync {
    /// Produce a signed token for `subject` that expires `ttl` from now.
    fn issue(&self, subject: &str, ttl: Duration) -> Result<String, AuthError>;

    /// Check signature and expiry. Every failure collapses to
    /// [`AuthError::InvalidToken`].
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No usable `Authorization: Bearer` header.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Bad signature, expired, malformed, or unknown subject.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Admin access required")]
    Forbidden,

    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// The authenticated caller behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
}

impl Principal {
    /// Role gate for admin-only operations.
    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }
}
