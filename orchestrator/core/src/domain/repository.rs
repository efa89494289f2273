// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Repository Interfaces
//!
//! Persistence contracts for each aggregate root: one repository per
//! aggregate, interface defined here, implemented in
//! `crate::infrastructure::repositories`.
//!
//! | Trait | Aggregate | Implementations |
//! |-------|-----------|----------------|
//! | `AgentRepository` | `Agent` | `InMemoryAgentRepository` |
//! | `TaskRepository` | `Task` | `InMemoryTaskRepository` |
//! | `MessageRepository` | `Message` | `InMemoryMessageRepository` |
//! | `IntegrationRepository` | `Integration` | `InMemoryIntegrationRepository` |
//! | `CoordinationRepository` | `Coordination` | `InMemoryCoordinationRepository` |
//! | `UserRepository` | `User` | `InMemoryUserRepository` |
//!
//! ## Identity
//!
//! Repositories own id allocation. `insert` takes the validated input, draws
//! the next value from a per-repository monotonic counter and stores the
//! record in one step. Ids are never derived from the collection size and
//! never reused after a delete.
//!
//! ## Referential integrity
//!
//! None. Cross-aggregate existence checks (a task's agent, a message's
//! sender and receiver) belong to the application services and hold only at
//! write time.

use async_trait::async_trait;

use crate::domain::agent::{Agent, AgentId, NewAgent};
use crate::domain::coordination::{Coordination, CoordinationId, NewCoordination};
use crate::domain::integration::{Integration, IntegrationId, NewIntegration};
use crate::domain::message::{Message, MessageId, NewMessage};
use crate::domain::task::{NewTask, Task, TaskId};
use crate::domain::user::{User, UserCredentials, UserId};

/// Storage backend for pluggable persistence
#[derive(Debug, Clone, Default)]
pub enum StorageBackend {
    #[default]
    InMemory,
}

#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Allocate an id and store the agent.
    async fn insert(&self, agent: NewAgent) -> Result<Agent, RepositoryError>;

    async fn find_by_id(&self, id: AgentId) -> Result<Option<Agent>, RepositoryError>;

    /// All agents, ascending by id.
    async fn list_all(&self) -> Result<Vec<Agent>, RepositoryError>;

    /// Overwrite an existing agent. Fails with `NotFound` if it was deleted.
    async fn update(&self, agent: &Agent) -> Result<(), RepositoryError>;

    async fn delete(&self, id: AgentId) -> Result<(), RepositoryError>;

    async fn exists(&self, id: AgentId) -> Result<bool, RepositoryError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn insert(&self, task: NewTask) -> Result<Task, RepositoryError>;

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, RepositoryError>;

    async fn update(&self, task: &Task) -> Result<(), RepositoryError>;

    async fn delete(&self, id: TaskId) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn insert(&self, message: NewMessage) -> Result<Message, RepositoryError>;

    /// Messages sent or received by `agent_id`, ascending by id.
    async fn find_by_agent(&self, agent_id: AgentId) -> Result<Vec<Message>, RepositoryError>;

    async fn delete(&self, id: MessageId) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait IntegrationRepository: Send + Sync {
    async fn insert(&self, integration: NewIntegration) -> Result<Integration, RepositoryError>;

    async fn find_by_id(&self, id: IntegrationId) -> Result<Option<Integration>, RepositoryError>;

    async fn list_all(&self) -> Result<Vec<Integration>, RepositoryError>;

    async fn delete(&self, id: IntegrationId) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait CoordinationRepository: Send + Sync {
    async fn insert(&self, coordination: NewCoordination) -> Result<Coordination, RepositoryError>;

    async fn find_by_id(&self, id: CoordinationId) -> Result<Option<Coordination>, RepositoryError>;
}

/// The credential store.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user. Fails with `Conflict` if the username is taken.
    async fn insert(&self, credentials: UserCredentials) -> Result<User, RepositoryError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// Replace username, password and role of an existing user.
    ///
    /// Fails with `NotFound` for an unknown id and `Conflict` if the new
    /// username belongs to a different user.
    async fn replace(&self, id: UserId, credentials: UserCredentials) -> Result<User, RepositoryError>;

    async fn count(&self) -> Result<usize, RepositoryError>;
}

/// Repository errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}
