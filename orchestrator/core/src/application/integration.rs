// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

use std::sync::Arc;

use crate::application::error::{not_found_as, ServiceError, ServiceResult};
use crate::domain::integration::{IntegrationId, IntegrationSummary, NewIntegration};
use crate::domain::repository::IntegrationRepository;
use crate::domain::system::{ActivityRecorder, LogLevel};

pub const INTEGRATION_NOT_FOUND: &str = "Integration not found";

/// External system integrations. Reads only ever return
/// [`IntegrationSummary`], so stored credentials stay inside the process.
pub struct IntegrationService {
    integrations: Arc<dyn IntegrationRepository>,
    activity: Arc<dyn ActivityRecorder>,
}

impl IntegrationService {
    pub fn new(integrations: Arc<dyn IntegrationRepository>, activity: Arc<dyn ActivityRecorder>) -> Self {
        Self {
            integrations,
            activity,
        }
    }

    pub async fn add(&self, integration: NewIntegration) -> ServiceResult<IntegrationSummary> {
        let integration = self.integrations.insert(integration).await?;
        self.activity.record(
            LogLevel::Info,
            format!("Integration {} added for {}", integration.id, integration.system_name),
        );
        Ok(integration.summary())
    }

    pub async fn list(&self) -> ServiceResult<Vec<IntegrationSummary>> {
        Ok(self
            .integrations
            .list_all()
            .await?
            .iter()
            .map(|i| i.summary())
            .collect())
    }

    pub async fn get(&self, id: IntegrationId) -> ServiceResult<IntegrationSummary> {
        self.integrations
            .find_by_id(id)
            .await?
            .map(|i| i.summary())
            .ok_or_else(|| ServiceError::not_found(INTEGRATION_NOT_FOUND))
    }

    pub async fn delete(&self, id: IntegrationId) -> ServiceResult<()> {
        self.integrations
            .delete(id)
            .await
            .map_err(not_found_as(INTEGRATION_NOT_FOUND))?;
        self.activity.record(LogLevel::Info, format!("Integration {} deleted", id));
        Ok(())
    }
}
