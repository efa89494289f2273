// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Agent-to-agent messaging use cases.
//!
//! Both endpoints must exist when a message is sent. Nothing is checked
//! afterwards: deleting an agent keeps its messages.

use std::sync::Arc;

use crate::application::agent::AGENT_NOT_FOUND;
use crate::application::error::{not_found_as, ServiceError, ServiceResult};
use crate::domain::agent::AgentId;
use crate::domain::message::{Message, MessageId, NewMessage};
use crate::domain::repository::{AgentRepository, MessageRepository};
use crate::domain::system::{ActivityRecorder, LogLevel};

pub const SENDER_OR_RECEIVER_NOT_FOUND: &str = "Sender or receiver not found";
pub const MESSAGE_NOT_FOUND: &str = "Message not found";

pub struct MessagingService {
    agents: Arc<dyn AgentRepository>,
    messages: Arc<dyn MessageRepository>,
    activity: Arc<dyn ActivityRecorder>,
}

impl MessagingService {
    pub fn new(
        agents: Arc<dyn AgentRepository>,
        messages: Arc<dyn MessageRepository>,
        activity: Arc<dyn ActivityRecorder>,
    ) -> Self {
        Self {
            agents,
            messages,
            activity,
        }
    }

    pub async fn send(&self, message: NewMessage) -> ServiceResult<Message> {
        if !self.agents.exists(message.sender_id).await?
            || !self.agents.exists(message.receiver_id).await?
        {
            return Err(ServiceError::not_found(SENDER_OR_RECEIVER_NOT_FOUND));
        }
        let message = self.messages.insert(message).await?;
        self.activity.record(
            LogLevel::Info,
            format!(
                "Message {} sent from agent {} to agent {}",
                message.id, message.sender_id, message.receiver_id
            ),
        );
        Ok(message)
    }

    /// Every message the agent sent or received, oldest first.
    pub async fn list_for_agent(&self, agent_id: AgentId) -> ServiceResult<Vec<Message>> {
        if !self.agents.exists(agent_id).await? {
            return Err(ServiceError::not_found(AGENT_NOT_FOUND));
        }
        Ok(self.messages.find_by_agent(agent_id).await?)
    }

    pub async fn delete(&self, id: MessageId) -> ServiceResult<()> {
        self.messages
            .delete(id)
            .await
            .map_err(not_found_as(MESSAGE_NOT_FOUND))?;
        self.activity.record(LogLevel::Info, format!("Message {} deleted", id));
        Ok(())
    }
}
