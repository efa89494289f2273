// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # Presentation Layer (`agenthub-core`)
//!
//! HTTP surface that translates requests into application service calls.
//! No business logic lives here; all real work is delegated to
//! `crate::application`.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Axum router, request bodies and response views |
//! | [`auth`] | `CurrentUser` bearer token extractor |
//! | [`error`] | `ApiError` and the `{"detail": ...}` error body |

pub mod api;
pub mod auth;
pub mod error;

pub use api::{app, AppState};
