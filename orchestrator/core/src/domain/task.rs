// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Task records assigned to agents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::agent::AgentId;
use crate::domain::validation::ValidationError;

pub const TASK_PRIORITY_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub priority: u8,
    pub assigned_agent_id: AgentId,
    pub deadline: DateTime<Utc>,
    pub status: TaskStatus,
}

impl NewTask {
    pub fn new(
        priority: u8,
        assigned_agent_id: AgentId,
        deadline: DateTime<Utc>,
        status: TaskStatus,
    ) -> Result<Self, ValidationError> {
        if !TASK_PRIORITY_RANGE.contains(&priority) {
            return Err(ValidationError::OutOfRange {
                field: "priority",
                min: i64::from(*TASK_PRIORITY_RANGE.start()),
                max: i64::from(*TASK_PRIORITY_RANGE.end()),
            });
        }
        Ok(Self {
            priority,
            assigned_agent_id,
            deadline,
            status,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub priority: u8,
    pub assigned_agent_id: AgentId,
    pub deadline: DateTime<Utc>,
    pub status: TaskStatus,
}

impl Task {
    pub fn new(id: TaskId, new: NewTask) -> Self {
        Self {
            id,
            priority: new.priority,
            assigned_agent_id: new.assigned_agent_id,
            deadline: new.deadline,
            status: new.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_bounds() {
        let deadline = Utc::now();
        assert!(NewTask::new(0, AgentId(1), deadline, TaskStatus::Pending).is_err());
        assert!(NewTask::new(6, AgentId(1), deadline, TaskStatus::Pending).is_err());
        assert!(NewTask::new(5, AgentId(1), deadline, TaskStatus::Pending).is_ok());
    }

    #[test]
    fn test_in_progress_wire_name() {
        assert_eq!(
            serde_json::to_value(TaskStatus::InProgress).unwrap(),
            json!("in_progress")
        );
    }
}
