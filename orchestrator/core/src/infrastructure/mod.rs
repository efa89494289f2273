// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

pub mod activity_log;
pub mod jwt;
pub mod repositories;

pub use activity_log::ActivityLog;
pub use jwt::JwtTokenService;
