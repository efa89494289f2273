// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Login, token resolution and admin-gated user management.

use chrono::Duration;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::auth::{AuthError, Principal, TokenIssuer};
use crate::domain::repository::{RepositoryError, UserRepository};
use crate::domain::system::{ActivityRecorder, LogLevel};
use crate::domain::user::{Role, User, UserCredentials, UserId};

pub const USER_NOT_FOUND: &str = "User not found";
pub const USERNAME_TAKEN: &str = "Username already exists";

/// A freshly issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: &'static str,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenIssuer>,
    token_ttl: Duration,
    activity: Arc<dyn ActivityRecorder>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenIssuer>,
        token_ttl: Duration,
        activity: Arc<dyn ActivityRecorder>,
    ) -> Self {
        Self {
            users,
            tokens,
            token_ttl,
            activity,
        }
    }

    /// Exchange credentials for a token. Unknown user and wrong password
    /// are indistinguishable to the caller.
    pub async fn login(&self, username: &str, password: &str) -> ServiceResult<AccessToken> {
        let user = self.users.find_by_username(username).await?;
        let Some(user) = user.filter(|u| u.password_matches(password)) else {
            self.activity
                .record(LogLevel::Warn, format!("Failed login attempt for user '{}'", username));
            return Err(AuthError::InvalidCredentials.into());
        };

        let access_token = self.tokens.issue(&user.username, self.token_ttl)?;
        info!("User '{}' logged in", user.username);
        Ok(AccessToken {
            access_token,
            token_type: "bearer",
        })
    }

    /// Resolve a bearer token to the user it names. The subject must still
    /// exist in the credential store.
    pub async fn authenticate(&self, token: &str) -> ServiceResult<Principal> {
        let claims = self.tokens.verify(token)?;
        match self.users.find_by_username(&claims.sub).await? {
            Some(user) => Ok(Principal::from(&user)),
            None => {
                warn!("Token subject '{}' is not a known user", claims.sub);
                Err(AuthError::InvalidToken.into())
            }
        }
    }

    pub async fn create_user(&self, caller: &Principal, credentials: UserCredentials) -> ServiceResult<User> {
        caller.require_admin()?;
        let user = self.users.insert(credentials).await.map_err(username_conflict)?;
        self.activity.record(
            LogLevel::Info,
            format!("User {} '{}' created by '{}' with role {}", user.id, user.username, caller.username, user.role),
        );
        Ok(user)
    }

    /// Replace a user's username, password and role wholesale.
    pub async fn update_user(
        &self,
        caller: &Principal,
        id: UserId,
        credentials: UserCredentials,
    ) -> ServiceResult<User> {
        caller.require_admin()?;
        let user = self
            .users
            .replace(id, credentials)
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound(_) => ServiceError::not_found(USER_NOT_FOUND),
                other => username_conflict(other),
            })?;
        self.activity.record(
            LogLevel::Info,
            format!("User {} updated by '{}'", user.id, caller.username),
        );
        Ok(user)
    }

    /// Ensure the configured administrator exists. An existing account with
    /// that name is left untouched.
    pub async fn bootstrap_admin(&self, username: &str, password: &str) -> ServiceResult<()> {
        if self.users.find_by_username(username).await?.is_some() {
            return Ok(());
        }
        let credentials = UserCredentials::new(username, password, Role::Admin.role_id())?;
        let user = self.users.insert(credentials).await.map_err(username_conflict)?;
        info!("Bootstrap administrator '{}' created with id {}", user.username, user.id);
        Ok(())
    }

    pub fn roles(&self) -> &'static [Role] {
        &Role::ALL
    }
}

fn username_conflict(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::Conflict(_) => ServiceError::Conflict(USERNAME_TAKEN.to_string()),
        other => other.into(),
    }
}
