// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Repository Factory - Application Layer
//!
//! Creates concrete repository implementations for the configured storage
//! backend. The domain layer only defines the traits; this is the one place
//! that names the infrastructure types.

use std::sync::Arc;

use crate::domain::repository::{
    AgentRepository, CoordinationRepository, IntegrationRepository, MessageRepository,
    StorageBackend, TaskRepository, UserRepository,
};
use crate::infrastructure::repositories::{
    InMemoryAgentRepository, InMemoryCoordinationRepository, InMemoryIntegrationRepository,
    InMemoryMessageRepository, InMemoryTaskRepository, InMemoryUserRepository,
};

/// One instance of every registry, shared by all services.
#[derive(Clone)]
pub struct Repositories {
    pub agents: Arc<dyn AgentRepository>,
    pub tasks: Arc<dyn TaskRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub integrations: Arc<dyn IntegrationRepository>,
    pub coordinations: Arc<dyn CoordinationRepository>,
    pub users: Arc<dyn UserRepository>,
}

/// Creates an AgentRepository implementation based on the configured backend
pub fn create_agent_repository(backend: &StorageBackend) -> Arc<dyn AgentRepository> {
    match backend {
        StorageBackend::InMemory => Arc::new(InMemoryAgentRepository::new()),
    }
}

/// Creates a TaskRepository implementation based on the configured backend
pub fn create_task_repository(backend: &StorageBackend) -> Arc<dyn TaskRepository> {
    match backend {
        StorageBackend::InMemory => Arc::new(InMemoryTaskRepository::new()),
    }
}

/// Creates a MessageRepository implementation based on the configured backend
pub fn create_message_repository(backend: &StorageBackend) -> Arc<dyn MessageRepository> {
    match backend {
        StorageBackend::InMemory => Arc::new(InMemoryMessageRepository::new()),
    }
}

/// Creates an IntegrationRepository implementation based on the configured backend
pub fn create_integration_repository(backend: &StorageBackend) -> Arc<dyn IntegrationRepository> {
    match backend {
        StorageBackend::InMemory => Arc::new(InMemoryIntegrationRepository::new()),
    }
}

/// Creates a CoordinationRepository implementation based on the configured backend
pub fn create_coordination_repository(backend: &StorageBackend) -> Arc<dyn CoordinationRepository> {
    match backend {
        StorageBackend::InMemory => Arc::new(InMemoryCoordinationRepository::new()),
    }
}

/// Creates a UserRepository implementation based on the configured backend
pub fn create_user_repository(backend: &StorageBackend) -> Arc<dyn UserRepository> {
    match backend {
        StorageBackend::InMemory => Arc::new(InMemoryUserRepository::new()),
    }
}

pub fn create_repositories(backend: &StorageBackend) -> Repositories {
    Repositories {
        agents: create_agent_repository(backend),
        tasks: create_task_repository(backend),
        messages: create_message_repository(backend),
        integrations: create_integration_repository(backend),
        coordinations: create_coordination_repository(backend),
        users: create_user_repository(backend),
    }
}
