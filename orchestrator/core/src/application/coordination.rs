// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

use std::sync::Arc;

use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::coordination::{Coordination, CoordinationId, NewCoordination};
use crate::domain::repository::{AgentRepository, CoordinationRepository};
use crate::domain::system::{ActivityRecorder, LogLevel};

pub const COORDINATION_NOT_FOUND: &str = "Coordination not found";

pub struct CoordinationService {
    agents: Arc<dyn AgentRepository>,
    coordinations: Arc<dyn CoordinationRepository>,
    activity: Arc<dyn ActivityRecorder>,
}

impl CoordinationService {
    pub fn new(
        agents: Arc<dyn AgentRepository>,
        coordinations: Arc<dyn CoordinationRepository>,
        activity: Arc<dyn ActivityRecorder>,
    ) -> Self {
        Self {
            agents,
            coordinations,
            activity,
        }
    }

    /// Fails on the first listed agent that does not exist, in request order.
    pub async fn initiate(&self, request: NewCoordination) -> ServiceResult<Coordination> {
        for agent_id in &request.agents {
            if !self.agents.exists(*agent_id).await? {
                return Err(ServiceError::not_found(format!("Agent {} not found", agent_id)));
            }
        }
        let coordination = self.coordinations.insert(request).await?;
        self.activity.record(
            LogLevel::Info,
            format!(
                "Coordination {} initiated: {} across {} agent(s)",
                coordination.id,
                coordination.action,
                coordination.agents.len()
            ),
        );
        Ok(coordination)
    }

    pub async fn get(&self, id: CoordinationId) -> ServiceResult<Coordination> {
        self.coordinations
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(COORDINATION_NOT_FOUND))
    }
}
