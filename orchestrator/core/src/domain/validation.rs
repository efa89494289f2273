// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Field-level validation failures raised while building domain records.
//! The presentation layer maps every variant to HTTP 422.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    #[error("{field} must be a JSON object")]
    NotAnObject { field: &'static str },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("Unknown role_id: {0}")]
    UnknownRole(u8),
}
