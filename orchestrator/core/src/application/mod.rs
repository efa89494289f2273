// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

pub mod agent;
pub mod auth;
pub mod coordination;
pub mod error;
pub mod integration;
pub mod lifecycle;
pub mod messaging;
pub mod repository_factory;
pub mod services;
pub mod system;
pub mod task;

pub use agent::AgentLifecycleService;
pub use error::{ServiceError, ServiceResult};
pub use services::Services;
