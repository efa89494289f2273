// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::application::agent::{AgentLifecycleService, AGENT_NOT_FOUND};
use crate::application::error::{not_found_as, ServiceError, ServiceResult};
use crate::domain::agent::{Agent, AgentId, AgentMetric, NewAgent};
use crate::domain::repository::AgentRepository;
use crate::domain::system::{ActivityRecorder, LogLevel};

/// Simulated resource figures reported for every agent. Nothing is measured.
const SIMULATED_CPU_PERCENT: f64 = 75.5;
const SIMULATED_MEMORY_MB: f64 = 512.0;

pub struct StandardAgentLifecycleService {
    repository: Arc<dyn AgentRepository>,
    activity: Arc<dyn ActivityRecorder>,
}

impl StandardAgentLifecycleService {
    pub fn new(repository: Arc<dyn AgentRepository>, activity: Arc<dyn ActivityRecorder>) -> Self {
        Self {
            repository,
            activity,
        }
    }

    /// Load, mutate and write back one agent.
    async fn modify(&self, id: AgentId, change: impl FnOnce(&mut Agent) -> ServiceResult<()> + Send) -> ServiceResult<Agent> {
        let mut agent = self.get_agent(id).await?;
        change(&mut agent)?;
        self.repository
            .update(&agent)
            .await
            .map_err(not_found_as(AGENT_NOT_FOUND))?;
        Ok(agent)
    }
}

#[async_trait]
impl AgentLifecycleService for StandardAgentLifecycleService {
    async fn register_agent(&self, agent: NewAgent) -> ServiceResult<Agent> {
        let agent = self.repository.insert(agent).await?;
        self.activity.record(
            LogLevel::Info,
            format!("Agent {} registered (type={}, status={})", agent.id, agent.agent_type, agent.status),
        );
        Ok(agent)
    }

    async fn get_agent(&self, id: AgentId) -> ServiceResult<Agent> {
        debug!("Looking up agent {}", id);
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(AGENT_NOT_FOUND))
    }

    async fn list_agents(&self) -> ServiceResult<Vec<Agent>> {
        Ok(self.repository.list_all().await?)
    }

    async fn start_agent(&self, id: AgentId) -> ServiceResult<Agent> {
        let agent = self
            .modify(id, |agent| {
                agent.start();
                Ok(())
            })
            .await?;
        self.activity.record(LogLevel::Info, format!("Agent {} started", id));
        Ok(agent)
    }

    async fn stop_agent(&self, id: AgentId) -> ServiceResult<Agent> {
        let agent = self
            .modify(id, |agent| {
                agent.stop();
                Ok(())
            })
            .await?;
        self.activity.record(LogLevel::Info, format!("Agent {} stopped", id));
        Ok(agent)
    }

    async fn restart_agent(&self, id: AgentId) -> ServiceResult<Agent> {
        let agent = self
            .modify(id, |agent| {
                agent.restart();
                Ok(())
            })
            .await?;
        self.activity.record(LogLevel::Info, format!("Agent {} restarted", id));
        Ok(agent)
    }

    async fn delete_agent(&self, id: AgentId) -> ServiceResult<()> {
        self.repository
            .delete(id)
            .await
            .map_err(not_found_as(AGENT_NOT_FOUND))?;
        self.activity.record(LogLevel::Info, format!("Agent {} deleted", id));
        Ok(())
    }

    async fn update_configuration(&self, id: AgentId, configuration: Value) -> ServiceResult<Agent> {
        let agent = self
            .modify(id, |agent| Ok(agent.replace_configuration(configuration)?))
            .await?;
        self.activity.record(LogLevel::Info, format!("Agent {} configuration updated", id));
        Ok(agent)
    }

    async fn agent_metrics(&self, id: AgentId) -> ServiceResult<Vec<AgentMetric>> {
        self.get_agent(id).await?;
        Ok(vec![
            AgentMetric::new("CPU", SIMULATED_CPU_PERCENT),
            AgentMetric::new("Memory", SIMULATED_MEMORY_MB),
        ])
    }
}
