// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Domain Layer
//!
//! Aggregates, value objects and the repository/token seams they depend on.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Pure types and invariants; no I/O

pub mod agent;
pub mod auth;
pub mod coordination;
pub mod integration;
pub mod message;
pub mod repository;
pub mod server_config;
pub mod system;
pub mod task;
pub mod user;
pub mod validation;
