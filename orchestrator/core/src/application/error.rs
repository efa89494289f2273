// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

use crate::domain::auth::AuthError;
use crate::domain::repository::RepositoryError;
use crate::domain::validation::ValidationError;

/// Failure of an application use case. Each variant maps to one HTTP status
/// at the presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// Referenced record is absent. Carries the caller-facing detail.
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(detail: impl Into<String>) -> Self {
        ServiceError::NotFound(detail.into())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => ServiceError::NotFound(what),
            RepositoryError::Conflict(what) => ServiceError::Conflict(what),
        }
    }
}

/// Maps a repository `NotFound` to the given caller-facing detail and
/// everything else through the default conversion.
pub(crate) fn not_found_as(detail: &'static str) -> impl FnOnce(RepositoryError) -> ServiceError {
    move |err| match err {
        RepositoryError::NotFound(_) => ServiceError::not_found(detail),
        other => other.into(),
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
