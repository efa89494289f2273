// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Repository Implementations
//!
//! In-memory implementations of the repository abstractions defined in
//! [`crate::domain::repository`].
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Persist and retrieve domain aggregates
//! - **Pattern:** Repository (DDD), Adapter (Hexagonal Architecture)
//!
//! # Concurrency
//!
//! Each repository wraps one [`Table`]: a `BTreeMap` plus the next id,
//! both behind a single `parking_lot::RwLock`. Id allocation and insert
//! happen under the same write guard, so concurrent creates never see the
//! same id. Listing order is ascending id because the map is ordered.
//!
//! Everything is lost when the process exits.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::agent::{Agent, AgentId, NewAgent};
use crate::domain::coordination::{Coordination, CoordinationId, NewCoordination};
use crate::domain::integration::{Integration, IntegrationId, NewIntegration};
use crate::domain::message::{Message, MessageId, NewMessage};
use crate::domain::repository::{
    AgentRepository, CoordinationRepository, IntegrationRepository, MessageRepository,
    RepositoryError, TaskRepository, UserRepository,
};
use crate::domain::task::{NewTask, Task, TaskId};
use crate::domain::user::{User, UserCredentials, UserId};

struct TableInner<V> {
    next_id: u64,
    rows: BTreeMap<u64, V>,
}

/// Ordered map with its own monotonic id counter, starting at 1.
pub struct Table<V> {
    inner: Arc<RwLock<TableInner<V>>>,
}

impl<V> Clone for Table<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Default for Table<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Table<V> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(TableInner {
                next_id: 1,
                rows: BTreeMap::new(),
            })),
        }
    }

    pub fn remove(&self, id: u64) -> Option<V> {
        self.inner.write().rows.remove(&id)
    }
}

impl<V: Clone> Table<V> {
    /// Allocate the next id, build the row from it and store it.
    pub fn insert_with(&self, build: impl FnOnce(u64) -> V) -> V {
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;
        let row = build(id);
        inner.rows.insert(id, row.clone());
        row
    }

    pub fn get(&self, id: u64) -> Option<V> {
        self.inner.read().rows.get(&id).cloned()
    }

    /// Overwrite an existing row. Returns `false` when `id` is absent.
    pub fn replace(&self, id: u64, row: V) -> bool {
        let mut inner = self.inner.write();
        match inner.rows.get_mut(&id) {
            Some(slot) => {
                *slot = row;
                true
            }
            None => false,
        }
    }

    pub fn values(&self) -> Vec<V> {
        self.inner.read().rows.values().cloned().collect()
    }

    pub fn filter(&self, predicate: impl Fn(&V) -> bool) -> Vec<V> {
        self.inner
            .read()
            .rows
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }
}

fn not_found(kind: &str, id: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::NotFound(format!("{} {}", kind, id))
}

#[derive(Clone, Default)]
pub struct InMemoryAgentRepository {
    agents: Table<Agent>,
}

impl InMemoryAgentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AgentRepository for InMemoryAgentRepository {
    async fn insert(&self, agent: NewAgent) -> Result<Agent, RepositoryError> {
        Ok(self.agents.insert_with(|id| Agent::new(AgentId(id), agent)))
    }

    async fn find_by_id(&self, id: AgentId) -> Result<Option<Agent>, RepositoryError> {
        Ok(self.agents.get(id.0))
    }

    async fn list_all(&self) -> Result<Vec<Agent>, RepositoryError> {
        Ok(self.agents.values())
    }

    async fn update(&self, agent: &Agent) -> Result<(), RepositoryError> {
        if self.agents.replace(agent.id.0, agent.clone()) {
            Ok(())
        } else {
            Err(not_found("agent", agent.id))
        }
    }

    async fn delete(&self, id: AgentId) -> Result<(), RepositoryError> {
        self.agents
            .remove(id.0)
            .map(|_| ())
            .ok_or_else(|| not_found("agent", id))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Table<Task>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: NewTask) -> Result<Task, RepositoryError> {
        Ok(self.tasks.insert_with(|id| Task::new(TaskId(id), task)))
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, RepositoryError> {
        Ok(self.tasks.get(id.0))
    }

    async fn update(&self, task: &Task) -> Result<(), RepositoryError> {
        if self.tasks.replace(task.id.0, task.clone()) {
            Ok(())
        } else {
            Err(not_found("task", task.id))
        }
    }

    async fn delete(&self, id: TaskId) -> Result<(), RepositoryError> {
        self.tasks
            .remove(id.0)
            .map(|_| ())
            .ok_or_else(|| not_found("task", id))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryMessageRepository {
    messages: Table<Message>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn insert(&self, message: NewMessage) -> Result<Message, RepositoryError> {
        Ok(self.messages.insert_with(|id| Message::new(MessageId(id), message)))
    }

    async fn find_by_agent(&self, agent_id: AgentId) -> Result<Vec<Message>, RepositoryError> {
        Ok(self.messages.filter(|m| m.involves(agent_id)))
    }

    async fn delete(&self, id: MessageId) -> Result<(), RepositoryError> {
        self.messages
            .remove(id.0)
            .map(|_| ())
            .ok_or_else(|| not_found("message", id))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryIntegrationRepository {
    integrations: Table<Integration>,
}

impl InMemoryIntegrationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IntegrationRepository for InMemoryIntegrationRepository {
    async fn insert(&self, integration: NewIntegration) -> Result<Integration, RepositoryError> {
        Ok(self
            .integrations
            .insert_with(|id| Integration::new(IntegrationId(id), integration)))
    }

    async fn find_by_id(&self, id: IntegrationId) -> Result<Option<Integration>, RepositoryError> {
        Ok(self.integrations.get(id.0))
    }

    async fn list_all(&self) -> Result<Vec<Integration>, RepositoryError> {
        Ok(self.integrations.values())
    }

    async fn delete(&self, id: IntegrationId) -> Result<(), RepositoryError> {
        self.integrations
            .remove(id.0)
            .map(|_| ())
            .ok_or_else(|| not_found("integration", id))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryCoordinationRepository {
    coordinations: Table<Coordination>,
}

impl InMemoryCoordinationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CoordinationRepository for InMemoryCoordinationRepository {
    async fn insert(&self, coordination: NewCoordination) -> Result<Coordination, RepositoryError> {
        Ok(self
            .coordinations
            .insert_with(|id| Coordination::new(CoordinationId(id), coordination)))
    }

    async fn find_by_id(&self, id: CoordinationId) -> Result<Option<Coordination>, RepositoryError> {
        Ok(self.coordinations.get(id.0))
    }
}

struct UserTable {
    next_id: u64,
    by_id: BTreeMap<u64, User>,
}

/// Credential store. Users are keyed by id; username uniqueness is checked
/// under the same write guard as the insert or rename.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<UserTable>>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(UserTable {
                next_id: 1,
                by_id: BTreeMap::new(),
            })),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, credentials: UserCredentials) -> Result<User, RepositoryError> {
        let mut users = self.users.write();
        if users
            .by_id
            .values()
            .any(|u| u.username == credentials.username)
        {
            return Err(RepositoryError::Conflict(format!(
                "username {} already exists",
                credentials.username
            )));
        }
        let id = users.next_id;
        users.next_id += 1;
        let user = User::new(UserId(id), credentials);
        users.by_id.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .read()
            .by_id
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn replace(&self, id: UserId, credentials: UserCredentials) -> Result<User, RepositoryError> {
        let mut users = self.users.write();
        if !users.by_id.contains_key(&id.0) {
            return Err(not_found("user", id));
        }
        if users
            .by_id
            .values()
            .any(|u| u.id != id && u.username == credentials.username)
        {
            return Err(RepositoryError::Conflict(format!(
                "username {} already exists",
                credentials.username
            )));
        }
        let user = User::new(id, credentials);
        users.by_id.insert(id.0, user.clone());
        Ok(user)
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.users.read().by_id.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::agent::AgentStatus;
    use serde_json::json;

    fn new_agent() -> NewAgent {
        NewAgent::new("ML", AgentStatus::Active, 1, json!({})).unwrap()
    }

    #[tokio::test]
    async fn test_agent_ids_are_not_reused_after_delete() {
        let repo = InMemoryAgentRepository::new();
        let a = repo.insert(new_agent()).await.unwrap();
        let b = repo.insert(new_agent()).await.unwrap();
        assert_eq!(a.id, AgentId(1));
        assert_eq!(b.id, AgentId(2));

        repo.delete(a.id).await.unwrap();
        let c = repo.insert(new_agent()).await.unwrap();
        assert_eq!(c.id, AgentId(3));
        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let repo = InMemoryAgentRepository::new();
        let agent = repo.insert(new_agent()).await.unwrap();
        assert!(repo.delete(agent.id).await.is_ok());
        assert!(matches!(
            repo.delete(agent.id).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_of_deleted_agent_is_not_found() {
        let repo = InMemoryAgentRepository::new();
        let mut agent = repo.insert(new_agent()).await.unwrap();
        repo.delete(agent.id).await.unwrap();
        agent.stop();
        assert!(matches!(
            repo.update(&agent).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(repo.find_by_id(agent.id).await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_get_distinct_ids() {
        let repo = InMemoryAgentRepository::new();
        let mut handles = Vec::new();
        for _ in 0..64 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move { repo.insert(new_agent()).await.unwrap().id }));
        }
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 64);
    }

    #[tokio::test]
    async fn test_messages_found_for_sender_and_receiver() {
        let repo = InMemoryMessageRepository::new();
        repo.insert(NewMessage {
            sender_id: AgentId(1),
            receiver_id: AgentId(2),
            content: "hello".to_string(),
        })
        .await
        .unwrap();
        repo.insert(NewMessage {
            sender_id: AgentId(3),
            receiver_id: AgentId(4),
            content: "unrelated".to_string(),
        })
        .await
        .unwrap();

        assert_eq!(repo.find_by_agent(AgentId(1)).await.unwrap().len(), 1);
        assert_eq!(repo.find_by_agent(AgentId(2)).await.unwrap().len(), 1);
        assert!(repo.find_by_agent(AgentId(5)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_user_insert_rejects_duplicate_username() {
        let repo = InMemoryUserRepository::new();
        repo.insert(UserCredentials::new("alice", "pw", 1).unwrap())
            .await
            .unwrap();
        let err = repo
            .insert(UserCredentials::new("alice", "other", 2).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(repo.count().await.unwrap(), 1);

        // Case-sensitive.
        assert!(repo
            .insert(UserCredentials::new("Alice", "pw", 1).unwrap())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_user_replace() {
        let repo = InMemoryUserRepository::new();
        let alice = repo
            .insert(UserCredentials::new("alice", "pw", 1).unwrap())
            .await
            .unwrap();
        repo.insert(UserCredentials::new("bob", "pw", 1).unwrap())
            .await
            .unwrap();

        let renamed = repo
            .replace(alice.id, UserCredentials::new("carol", "new", 2).unwrap())
            .await
            .unwrap();
        assert_eq!(renamed.id, alice.id);
        assert!(renamed.password_matches("new"));
        assert!(repo.find_by_username("alice").await.unwrap().is_none());

        let clash = repo
            .replace(alice.id, UserCredentials::new("bob", "x", 1).unwrap())
            .await;
        assert!(matches!(clash, Err(RepositoryError::Conflict(_))));

        // Keeping one's own username is not a conflict.
        assert!(repo
            .replace(alice.id, UserCredentials::new("carol", "y", 1).unwrap())
            .await
            .is_ok());

        let missing = repo
            .replace(UserId(99), UserCredentials::new("zed", "x", 1).unwrap())
            .await;
        assert!(matches!(missing, Err(RepositoryError::NotFound(_))));
    }
}
