// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Coordination requests across a group of agents. Recorded only; nothing
//! acts on them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::agent::AgentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoordinationId(pub u64);

impl fmt::Display for CoordinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCoordination {
    pub agents: Vec<AgentId>,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordination {
    pub id: CoordinationId,
    pub agents: Vec<AgentId>,
    pub action: String,
    pub created_at: DateTime<Utc>,
}

impl Coordination {
    pub fn new(id: CoordinationId, new: NewCoordination) -> Self {
        Self {
            id,
            agents: new.agents,
            action: new.action,
            created_at: Utc::now(),
        }
    }
}
