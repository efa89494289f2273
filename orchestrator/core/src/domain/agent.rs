// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # Agent Aggregate
//!
//! A simulated agent record: type, status, priority and a free-form JSON
//! configuration. Agents never execute anything; lifecycle operations only
//! flip [`AgentStatus`] and refresh the heartbeat.
//!
//! Status changes carry no transition validation. Any status may be set from
//! any other status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::domain::validation::ValidationError;

/// Maximum length of [`Agent::agent_type`], in characters.
pub const MAX_AGENT_TYPE_LEN: usize = 255;

/// Inclusive bounds for [`Agent::priority_level`].
pub const PRIORITY_LEVEL_RANGE: std::ops::RangeInclusive<u8> = 1..=3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Active,
    Stopped,
    Paused,
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AgentStatus::Active => "active",
            AgentStatus::Stopped => "stopped",
            AgentStatus::Paused => "paused",
        };
        f.write_str(s)
    }
}

/// Validated input for registering an agent. Built with [`NewAgent::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewAgent {
    pub agent_type: String,
    pub status: AgentStatus,
    pub priority_level: u8,
    pub configuration: Map<String, Value>,
}

impl NewAgent {
    pub fn new(
        agent_type: impl Into<String>,
        status: AgentStatus,
        priority_level: u8,
        configuration: Value,
    ) -> Result<Self, ValidationError> {
        let agent_type = agent_type.into();
        if agent_type.chars().count() > MAX_AGENT_TYPE_LEN {
            return Err(ValidationError::TooLong {
                field: "agent_type",
                max: MAX_AGENT_TYPE_LEN,
            });
        }
        if !PRIORITY_LEVEL_RANGE.contains(&priority_level) {
            return Err(ValidationError::OutOfRange {
                field: "priority_level",
                min: i64::from(*PRIORITY_LEVEL_RANGE.start()),
                max: i64::from(*PRIORITY_LEVEL_RANGE.end()),
            });
        }
        let configuration = into_object(configuration)?;

        Ok(Self {
            agent_type,
            status,
            priority_level,
            configuration,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub agent_type: String,
    pub status: AgentStatus,
    pub priority_level: u8,
    pub configuration: Map<String, Value>,
    pub last_heartbeat: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Agent {
    pub fn new(id: AgentId, new: NewAgent) -> Self {
        let now = Utc::now();
        Self {
            id,
            agent_type: new.agent_type,
            status: new.status,
            priority_level: new.priority_level,
            configuration: new.configuration,
            last_heartbeat: now,
            created_at: now,
        }
    }

    /// Marks the agent active and refreshes its heartbeat.
    pub fn start(&mut self) {
        self.status = AgentStatus::Active;
        self.heartbeat();
    }

    /// Marks the agent stopped. The heartbeat is left untouched.
    pub fn stop(&mut self) {
        self.status = AgentStatus::Stopped;
    }

    /// Same observable effect as [`Agent::start`]; kept separate so callers
    /// and the activity log can tell the two apart.
    pub fn restart(&mut self) {
        self.status = AgentStatus::Active;
        self.heartbeat();
    }

    pub fn heartbeat(&mut self) {
        self.last_heartbeat = Utc::now();
    }

    /// Replaces the whole configuration object.
    pub fn replace_configuration(&mut self, configuration: Value) -> Result<(), ValidationError> {
        self.configuration = into_object(configuration)?;
        Ok(())
    }
}

/// A single synthetic performance sample reported for an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMetric {
    pub metric_type: String,
    pub value: f64,
}

impl AgentMetric {
    pub fn new(metric_type: impl Into<String>, value: f64) -> Self {
        Self {
            metric_type: metric_type.into(),
            value,
        }
    }
}

fn into_object(value: Value) -> Result<Map<String, Value>, ValidationError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ValidationError::NotAnObject {
            field: "configuration",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> NewAgent {
        NewAgent::new(
            "ML",
            AgentStatus::Paused,
            2,
            json!({"model": "neural_network", "params": {"learning_rate": 0.01}}),
        )
        .unwrap()
    }

    #[test]
    fn test_new_agent_rejects_priority_out_of_range() {
        assert!(NewAgent::new("ML", AgentStatus::Active, 0, json!({})).is_err());
        assert!(NewAgent::new("ML", AgentStatus::Active, 4, json!({})).is_err());
        assert!(NewAgent::new("ML", AgentStatus::Active, 3, json!({})).is_ok());
    }

    #[test]
    fn test_new_agent_rejects_long_type() {
        let long = "x".repeat(MAX_AGENT_TYPE_LEN + 1);
        let err = NewAgent::new(long, AgentStatus::Active, 1, json!({})).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooLong {
                field: "agent_type",
                max: MAX_AGENT_TYPE_LEN
            }
        );
    }

    #[test]
    fn test_new_agent_rejects_non_object_configuration() {
        assert!(NewAgent::new("BDI", AgentStatus::Active, 1, json!([1, 2])).is_err());
        assert!(NewAgent::new("BDI", AgentStatus::Active, 1, json!("x")).is_err());
    }

    #[test]
    fn test_lifecycle_sets_status_unconditionally() {
        let mut agent = Agent::new(AgentId(1), sample());
        assert_eq!(agent.status, AgentStatus::Paused);

        agent.stop();
        assert_eq!(agent.status, AgentStatus::Stopped);
        agent.stop();
        assert_eq!(agent.status, AgentStatus::Stopped);

        let before = agent.last_heartbeat;
        agent.restart();
        assert_eq!(agent.status, AgentStatus::Active);
        assert!(agent.last_heartbeat >= before);
    }

    #[test]
    fn test_replace_configuration() {
        let mut agent = Agent::new(AgentId(1), sample());
        agent.replace_configuration(json!({"model": "tree"})).unwrap();
        assert_eq!(agent.configuration.get("model"), Some(&json!("tree")));
        assert!(agent.configuration.get("params").is_none());
        assert!(agent.replace_configuration(json!(null)).is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(AgentStatus::Active).unwrap(), json!("active"));
        let status: AgentStatus = serde_json::from_value(json!("paused")).unwrap();
        assert_eq!(status, AgentStatus::Paused);
    }
}
