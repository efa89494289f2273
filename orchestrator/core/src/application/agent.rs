// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use serde_json::Value;

use crate::application::error::ServiceResult;
use crate::domain::agent::{Agent, AgentId, AgentMetric, NewAgent};

pub const AGENT_NOT_FOUND: &str = "Agent not found";

/// Registration and lifecycle of simulated agents.
#[async_trait]
pub trait AgentLifecycleService: Send + Sync {
    async fn register_agent(&self, agent: NewAgent) -> ServiceResult<Agent>;
    async fn get_agent(&self, id: AgentId) -> ServiceResult<Agent>;
    async fn list_agents(&self) -> ServiceResult<Vec<Agent>>;
    async fn start_agent(&self, id: AgentId) -> ServiceResult<Agent>;
    async fn stop_agent(&self, id: AgentId) -> ServiceResult<Agent>;
    async fn restart_agent(&self, id: AgentId) -> ServiceResult<Agent>;
    async fn delete_agent(&self, id: AgentId) -> ServiceResult<()>;
    async fn update_configuration(&self, id: AgentId, configuration: Value) -> ServiceResult<Agent>;
    async fn agent_metrics(&self, id: AgentId) -> ServiceResult<Vec<AgentMetric>>;
}
