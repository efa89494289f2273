// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

use std::sync::Arc;

use crate::application::error::ServiceResult;
use crate::domain::repository::AgentRepository;
use crate::domain::system::{ActivityRecorder, LogEntry, SystemMetrics};

/// Host resource figures are simulated; the agent count is every registered agent.
const SIMULATED_CPU_USAGE: f64 = 45.5;
const SIMULATED_MEMORY_USAGE_MB: f64 = 2048.0;

pub struct SystemService {
    agents: Arc<dyn AgentRepository>,
    activity: Arc<dyn ActivityRecorder>,
}

impl SystemService {
    pub fn new(agents: Arc<dyn AgentRepository>, activity: Arc<dyn ActivityRecorder>) -> Self {
        Self { agents, activity }
    }

    pub fn logs(&self) -> Vec<LogEntry> {
        self.activity.recent()
    }

    pub async fn metrics(&self) -> ServiceResult<SystemMetrics> {
        let active_agents = self.agents.list_all().await?.len();
        Ok(SystemMetrics {
            cpu_usage: SIMULATED_CPU_USAGE,
            memory_usage: SIMULATED_MEMORY_USAGE_MB,
            active_agents,
        })
    }
}
