// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

// Activity Log - bounded in-memory trail behind GET /logs
//
// Holds the most recent `capacity` entries; older ones are dropped.
// Every entry is also emitted through `tracing` at the matching level so the
// process log and the API view stay in step.

use chrono::Utc;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::system::{ActivityRecorder, LogEntry, LogLevel};

#[derive(Clone)]
pub struct ActivityLog {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity.min(1024)))),
            capacity,
        }
    }
}

impl ActivityRecorder for ActivityLog {
    fn record(&self, level: LogLevel, message: String) {
        match level {
            LogLevel::Info => info!(target: "agenthub::activity", "{}", message),
            LogLevel::Warn => warn!(target: "agenthub::activity", "{}", message),
            LogLevel::Error => error!(target: "agenthub::activity", "{}", message),
        }

        let mut entries = self.entries.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(LogEntry {
            timestamp: Utc::now(),
            level,
            message,
        });
    }

    fn recent(&self) -> Vec<LogEntry> {
        self.entries.lock().iter().cloned().collect()
    }
}
