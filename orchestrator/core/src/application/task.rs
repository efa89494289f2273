// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

use std::sync::Arc;

use crate::application::agent::AGENT_NOT_FOUND;
use crate::application::error::{not_found_as, ServiceError, ServiceResult};
use crate::domain::repository::{AgentRepository, TaskRepository};
use crate::domain::system::{ActivityRecorder, LogLevel};
use crate::domain::task::{NewTask, Task, TaskId, TaskStatus};

pub const TASK_NOT_FOUND: &str = "Task not found";

pub struct TaskService {
    agents: Arc<dyn AgentRepository>,
    tasks: Arc<dyn TaskRepository>,
    activity: Arc<dyn ActivityRecorder>,
}

impl TaskService {
    pub fn new(
        agents: Arc<dyn AgentRepository>,
        tasks: Arc<dyn TaskRepository>,
        activity: Arc<dyn ActivityRecorder>,
    ) -> Self {
        Self {
            agents,
            tasks,
            activity,
        }
    }

    /// The assigned agent must exist now; later deletion leaves the task
    /// pointing at nothing.
    pub async fn create(&self, task: NewTask) -> ServiceResult<Task> {
        if !self.agents.exists(task.assigned_agent_id).await? {
            return Err(ServiceError::not_found(AGENT_NOT_FOUND));
        }
        let task = self.tasks.insert(task).await?;
        self.activity.record(
            LogLevel::Info,
            format!("Task {} created for agent {}", task.id, task.assigned_agent_id),
        );
        Ok(task)
    }

    pub async fn get(&self, id: TaskId) -> ServiceResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(TASK_NOT_FOUND))
    }

    /// Any status may follow any other.
    pub async fn update_status(&self, id: TaskId, status: TaskStatus) -> ServiceResult<Task> {
        let mut task = self.get(id).await?;
        task.status = status;
        self.tasks
            .update(&task)
            .await
            .map_err(not_found_as(TASK_NOT_FOUND))?;
        self.activity
            .record(LogLevel::Info, format!("Task {} status set to {:?}", id, status));
        Ok(task)
    }

    pub async fn delete(&self, id: TaskId) -> ServiceResult<()> {
        self.tasks
            .delete(id)
            .await
            .map_err(not_found_as(TASK_NOT_FOUND))?;
        self.activity.record(LogLevel::Info, format!("Task {} deleted", id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::agent::{AgentId, AgentStatus, NewAgent};
    use crate::infrastructure::activity_log::ActivityLog;
    use crate::infrastructure::repositories::{InMemoryAgentRepository, InMemoryTaskRepository};
    use chrono::{Duration, Utc};
    use serde_json::json;

    async fn setup() -> (TaskService, AgentId) {
        let agents = Arc::new(InMemoryAgentRepository::new());
        let agent = agents
            .insert(NewAgent::new("ML", AgentStatus::Active, 1, json!({})).unwrap())
            .await
            .unwrap();
        let service = TaskService::new(
            agents,
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(ActivityLog::new(10)),
        );
        (service, agent.id)
    }

    fn new_task(agent: AgentId) -> NewTask {
        NewTask::new(3, agent, Utc::now() + Duration::days(1), TaskStatus::Pending).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (service, agent) = setup().await;
        let task = service.create(new_task(agent)).await.unwrap();
        let fetched = service.get(task.id).await.unwrap();
        assert_eq!(fetched, task);
        assert_eq!(fetched.assigned_agent_id, agent);
    }

    #[tokio::test]
    async fn test_create_for_unknown_agent() {
        let (service, _) = setup().await;
        let err = service.create(new_task(AgentId(77))).await.unwrap_err();
        assert_eq!(err, ServiceError::not_found(AGENT_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_status_moves_freely() {
        let (service, agent) = setup().await;
        let task = service.create(new_task(agent)).await.unwrap();
        service.update_status(task.id, TaskStatus::Completed).await.unwrap();
        let back = service.update_status(task.id, TaskStatus::Pending).await.unwrap();
        assert_eq!(back.status, TaskStatus::Pending);
        assert_eq!(service.get(task.id).await.unwrap().status, TaskStatus::Pending);
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let (service, agent) = setup().await;
        let task = service.create(new_task(agent)).await.unwrap();
        service.delete(task.id).await.unwrap();
        assert_eq!(
            service.get(task.id).await.unwrap_err(),
            ServiceError::not_found(TASK_NOT_FOUND)
        );
        assert_eq!(
            service.delete(task.id).await.unwrap_err(),
            ServiceError::not_found(TASK_NOT_FOUND)
        );
    }
}
