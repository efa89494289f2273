// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Wires repositories, the token service and the activity log into the
//! full set of application services.

use std::sync::Arc;
use tracing::{info, warn};

use crate::application::agent::AgentLifecycleService;
use crate::application::auth::AuthService;
use crate::application::coordination::CoordinationService;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::integration::IntegrationService;
use crate::application::lifecycle::StandardAgentLifecycleService;
use crate::application::messaging::MessagingService;
use crate::application::repository_factory::{create_repositories, Repositories};
use crate::application::system::SystemService;
use crate::application::task::TaskService;
use crate::domain::auth::TokenIssuer;
use crate::domain::server_config::ServerConfig;
use crate::domain::system::ActivityRecorder;
use crate::infrastructure::activity_log::ActivityLog;
use crate::infrastructure::jwt::JwtTokenService;

pub struct Services {
    pub agents: Arc<dyn AgentLifecycleService>,
    pub messaging: MessagingService,
    pub tasks: TaskService,
    pub coordination: CoordinationService,
    pub integrations: IntegrationService,
    pub auth: AuthService,
    pub system: SystemService,
}

impl Services {
    pub fn new(
        repositories: Repositories,
        tokens: Arc<dyn TokenIssuer>,
        token_ttl: chrono::Duration,
        activity: Arc<dyn ActivityRecorder>,
    ) -> Self {
        let Repositories {
            agents,
            tasks,
            messages,
            integrations,
            coordinations,
            users,
        } = repositories;

        Self {
            agents: Arc::new(StandardAgentLifecycleService::new(agents.clone(), activity.clone())),
            messaging: MessagingService::new(agents.clone(), messages, activity.clone()),
            tasks: TaskService::new(agents.clone(), tasks, activity.clone()),
            coordination: CoordinationService::new(agents.clone(), coordinations, activity.clone()),
            integrations: IntegrationService::new(integrations, activity.clone()),
            auth: AuthService::new(users, tokens, token_ttl, activity.clone()),
            system: SystemService::new(agents, activity),
        }
    }

    /// Build every service from a loaded configuration and create the
    /// bootstrap administrator if one is configured. A missing signing
    /// secret is replaced by a random one.
    pub async fn from_config(config: &ServerConfig) -> ServiceResult<Self> {
        let mut config = config.clone();
        if config.ensure_secret_key() {
            warn!("No auth.secret_key configured; generated a random one. Tokens will not survive a restart.");
        }
        let secret = config.spec.auth.secret_key.clone().unwrap_or_default();

        let token_ttl = config
            .spec
            .auth
            .token_ttl()
            .map_err(|e| ServiceError::Internal(format!("Invalid auth configuration: {}", e)))?;

        let backend = config.spec.storage.backend();
        info!("Using {:?} storage backend", backend);

        let services = Self::new(
            create_repositories(&backend),
            Arc::new(JwtTokenService::new(&secret)),
            token_ttl,
            Arc::new(ActivityLog::new(config.spec.activity_log.capacity)),
        );

        match &config.spec.auth.bootstrap_admin {
            Some(admin) => services.auth.bootstrap_admin(&admin.username, &admin.password).await?,
            None => warn!("No bootstrap administrator configured; no one can log in until a user exists."),
        }

        Ok(services)
    }
}
