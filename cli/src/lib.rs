// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0
//! AgentHub CLI library - exposes testable components
//!
//! # Architecture
//!
//! - **Layer:** Interface / Presentation Layer
//! - **Purpose:** Command handlers and HTTP server startup for the `agenthub` binary

pub mod commands;
pub mod server;
