// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the AgentHub CLI

pub mod config;
pub mod token;

pub use self::config::ConfigCommand;
pub use self::token::TokenCommand;
