// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0
//! AgentHub core
//!
//! Agent registry, messaging, tasks, coordination, integrations and the
//! bearer-token auth layer behind the AgentHub HTTP API.
//!
//! # Architecture
//!
//! - **domain:** records, validation, repository and token traits
//! - **application:** use-case services over the repository traits
//! - **infrastructure:** in-memory repositories, JWT signing, activity log
//! - **presentation:** axum router

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;
