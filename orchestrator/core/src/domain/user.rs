// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # User Aggregate (Credential Store record)
//!
//! Usernames are unique and case-sensitive. Passwords are stored as given;
//! there is no hashing because the store never outlives the process.
//!
//! Roles travel over the wire as numeric `role_id`s:
//!
//! | role_id | Role |
//! |---------|------|
//! | 1 | `user` |
//! | 2 | `admin` |

use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::User, Role::Admin];

    pub fn from_role_id(role_id: u8) -> Result<Self, ValidationError> {
        match role_id {
            1 => Ok(Role::User),
            2 => Ok(Role::Admin),
            other => Err(ValidationError::UnknownRole(other)),
        }
    }

    pub fn role_id(self) -> u8 {
        match self {
            Role::User => 1,
            Role::Admin => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validated credentials for creating or replacing a user.
#[derive(Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl UserCredentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        role_id: u8,
    ) -> Result<Self, ValidationError> {
        let username = username.into();
        let password = password.into();
        if username.is_empty() {
            return Err(ValidationError::Empty { field: "username" });
        }
        if password.is_empty() {
            return Err(ValidationError::Empty { field: "password" });
        }
        Ok(Self {
            username,
            password,
            role: Role::from_role_id(role_id)?,
        })
    }
}

impl fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    password: String,
    pub role: Role,
}

impl User {
    pub fn new(id: UserId, credentials: UserCredentials) -> Self {
        Self {
            id,
            username: credentials.username,
            password: credentials.password,
            role: credentials.role,
        }
    }

    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password.as_bytes().ct_eq(candidate.as_bytes()).into()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
