// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

//! HTTP routes. Every route except `/health` and `/auth/login` takes a
//! [`CurrentUser`] and therefore requires a bearer token.

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Form, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;

use crate::application::Services;
use crate::domain::agent::{Agent, AgentId, AgentMetric, AgentStatus, NewAgent};
use crate::domain::coordination::{Coordination, CoordinationId, NewCoordination};
use crate::domain::integration::{IntegrationId, IntegrationSummary, NewIntegration};
use crate::domain::message::{Message, MessageId, NewMessage};
use crate::domain::system::{LogEntry, SystemMetrics};
use crate::domain::task::{NewTask, Task, TaskId, TaskStatus};
use crate::domain::user::{UserCredentials, UserId};
use crate::presentation::auth::CurrentUser;
use crate::presentation::error::ApiResult;

pub struct AppState {
    pub services: Services,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            start_time: Instant::now(),
        }
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(login))
        .route("/users/me", get(current_user))
        .route("/users", post(create_user))
        .route("/users/{user_id}", put(update_user))
        .route("/roles", get(list_roles))
        .route("/agents", post(register_agent).get(list_agents))
        .route("/agents/{agent_id}", get(get_agent).delete(delete_agent))
        .route("/agents/{agent_id}/start", post(start_agent))
        .route("/agents/{agent_id}/stop", post(stop_agent))
        .route("/agents/{agent_id}/restart", post(restart_agent))
        .route("/agents/{agent_id}/status", get(agent_status))
        .route("/agents/{agent_id}/metrics", get(agent_metrics))
        .route("/agents/{agent_id}/config", put(update_agent_config))
        .route("/messages", post(send_message))
        .route("/messages/{agent_id}", get(agent_messages))
        .route("/messages/by-id/{message_id}", delete(delete_message))
        .route("/tasks", post(create_task))
        .route("/tasks/{task_id}", get(get_task).delete(delete_task))
        .route("/tasks/{task_id}/status", put(update_task_status))
        .route("/coordination", post(initiate_coordination))
        .route("/coordination/{coordination_id}", get(get_coordination))
        .route("/integrations", post(add_integration).get(list_integrations))
        .route(
            "/integrations/{integration_id}",
            get(get_integration).delete(delete_integration),
        )
        .route("/logs", get(system_logs))
        .route("/metrics", get(system_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub username: String,
    pub password: String,
    pub role_id: u8,
}

#[derive(Debug, Deserialize)]
pub struct RegisterAgentRequest {
    pub agent_type: String,
    pub status: AgentStatus,
    pub priority_level: u8,
    pub configuration: Value,
}

#[derive(Debug, Deserialize)]
pub struct ConfigurationUpdate {
    pub configuration: Value,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub sender_id: AgentId,
    pub receiver_id: AgentId,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub priority: u8,
    pub assigned_agent_id: AgentId,
    pub deadline: DateTime<Utc>,
    pub status: TaskStatus,
}

#[derive(Debug, Deserialize)]
pub struct TaskStatusUpdate {
    pub status: TaskStatus,
}

#[derive(Debug, Deserialize)]
pub struct CoordinationRequest {
    pub agents: Vec<AgentId>,
    pub action: String,
}

#[derive(Debug, Deserialize)]
pub struct IntegrationRequest {
    pub system_name: String,
    pub api_url: String,
    pub auth_details: Value,
}

// ---------------------------------------------------------------------------
// Response views
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub user_id: UserId,
    pub username: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct RoleView {
    pub role_id: u8,
    pub role_name: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AgentView {
    pub agent_id: AgentId,
    pub agent_type: String,
    pub status: AgentStatus,
    pub priority_level: u8,
    pub configuration: Map<String, Value>,
    pub last_heartbeat: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<Agent> for AgentView {
    fn from(agent: Agent) -> Self {
        Self {
            agent_id: agent.id,
            agent_type: agent.agent_type,
            status: agent.status,
            priority_level: agent.priority_level,
            configuration: agent.configuration,
            last_heartbeat: agent.last_heartbeat,
            created_at: agent.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AgentStatusView {
    pub agent_id: AgentId,
    pub status: AgentStatus,
    pub last_heartbeat: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AgentMetricsView {
    pub agent_id: AgentId,
    pub metrics: Vec<AgentMetric>,
}

#[derive(Debug, Serialize)]
pub struct MessageView {
    pub message_id: MessageId,
    pub sender_id: AgentId,
    pub receiver_id: AgentId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl From<Message> for MessageView {
    fn from(message: Message) -> Self {
        Self {
            message_id: message.id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            content: message.content,
            timestamp: message.timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageListView {
    pub agent_id: AgentId,
    pub messages: Vec<MessageView>,
}

#[derive(Debug, Serialize)]
pub struct TaskView {
    pub task_id: TaskId,
    pub priority: u8,
    pub assigned_agent_id: AgentId,
    pub deadline: DateTime<Utc>,
    pub status: TaskStatus,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        Self {
            task_id: task.id,
            priority: task.priority,
            assigned_agent_id: task.assigned_agent_id,
            deadline: task.deadline,
            status: task.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CoordinationView {
    pub coordination_id: CoordinationId,
    pub agents: Vec<AgentId>,
    pub action: String,
    pub created_at: DateTime<Utc>,
}

impl From<Coordination> for CoordinationView {
    fn from(coordination: Coordination) -> Self {
        Self {
            coordination_id: coordination.id,
            agents: coordination.agents,
            action: coordination.action,
            created_at: coordination.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "uptime_seconds": state.start_time.elapsed().as_secs(),
    }))
}

async fn login(State(state): State<Arc<AppState>>, Form(form): Form<LoginForm>) -> ApiResult<Json<TokenResponse>> {
    let token = state.services.auth.login(&form.username, &form.password).await?;
    Ok(Json(TokenResponse {
        access_token: token.access_token,
        token_type: token.token_type,
    }))
}

async fn current_user(CurrentUser(principal): CurrentUser) -> Json<UserInfo> {
    Json(UserInfo {
        user_id: principal.user_id,
        username: principal.username,
        role: principal.role.to_string(),
    })
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    CurrentUser(principal): CurrentUser,
    Json(body): Json<UserRequest>,
) -> ApiResult<Json<Value>> {
    // Role gate first: a non-admin sending a bad role_id gets 403, not 422.
    principal.require_admin()?;
    let credentials = UserCredentials::new(body.username, body.password, body.role_id)?;
    let user = state.services.auth.create_user(&principal, credentials).await?;
    Ok(Json(json!({ "user_id": user.id, "message": "User created" })))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    CurrentUser(principal): CurrentUser,
    Path(user_id): Path<u64>,
    Json(body): Json<UserRequest>,
) -> ApiResult<Json<Value>> {
    principal.require_admin()?;
    let credentials = UserCredentials::new(body.username, body.password, body.role_id)?;
    let user = state
        .services
        .auth
        .update_user(&principal, UserId(user_id), credentials)
        .await?;
    Ok(Json(json!({ "user_id": user.id, "message": "User updated" })))
}

async fn list_roles(State(state): State<Arc<AppState>>, _user: CurrentUser) -> Json<Vec<RoleView>> {
    let roles = state
        .services
        .auth
        .roles()
        .iter()
        .map(|role| RoleView {
            role_id: role.role_id(),
            role_name: role.name(),
        })
        .collect();
    Json(roles)
}

async fn register_agent(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Json(body): Json<RegisterAgentRequest>,
) -> ApiResult<Json<Value>> {
    let new_agent = NewAgent::new(body.agent_type, body.status, body.priority_level, body.configuration)?;
    let agent = state.services.agents.register_agent(new_agent).await?;
    Ok(Json(json!({ "agent_id": agent.id, "message": "Agent registered successfully" })))
}

async fn list_agents(State(state): State<Arc<AppState>>, _user: CurrentUser) -> ApiResult<Json<Vec<AgentView>>> {
    let agents = state.services.agents.list_agents().await?;
    Ok(Json(agents.into_iter().map(AgentView::from).collect()))
}

async fn get_agent(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(agent_id): Path<u64>,
) -> ApiResult<Json<AgentView>> {
    let agent = state.services.agents.get_agent(AgentId(agent_id)).await?;
    Ok(Json(agent.into()))
}

async fn delete_agent(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(agent_id): Path<u64>,
) -> ApiResult<Json<Value>> {
    state.services.agents.delete_agent(AgentId(agent_id)).await?;
    Ok(Json(json!({ "agent_id": agent_id, "message": "Agent deleted successfully" })))
}

async fn start_agent(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(agent_id): Path<u64>,
) -> ApiResult<Json<Value>> {
    state.services.agents.start_agent(AgentId(agent_id)).await?;
    Ok(Json(json!({ "agent_id": agent_id, "message": "Agent started successfully" })))
}

async fn stop_agent(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(agent_id): Path<u64>,
) -> ApiResult<Json<Value>> {
    state.services.agents.stop_agent(AgentId(agent_id)).await?;
    Ok(Json(json!({ "agent_id": agent_id, "message": "Agent stopped successfully" })))
}

async fn restart_agent(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(agent_id): Path<u64>,
) -> ApiResult<Json<Value>> {
    state.services.agents.restart_agent(AgentId(agent_id)).await?;
    Ok(Json(json!({ "agent_id": agent_id, "message": "Agent restarted successfully" })))
}

async fn agent_status(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(agent_id): Path<u64>,
) -> ApiResult<Json<AgentStatusView>> {
    let agent = state.services.agents.get_agent(AgentId(agent_id)).await?;
    Ok(Json(AgentStatusView {
        agent_id: agent.id,
        status: agent.status,
        last_heartbeat: agent.last_heartbeat,
    }))
}

async fn agent_metrics(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(agent_id): Path<u64>,
) -> ApiResult<Json<AgentMetricsView>> {
    let agent_id = AgentId(agent_id);
    let metrics = state.services.agents.agent_metrics(agent_id).await?;
    Ok(Json(AgentMetricsView { agent_id, metrics }))
}

async fn update_agent_config(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(agent_id): Path<u64>,
    Json(body): Json<ConfigurationUpdate>,
) -> ApiResult<Json<Value>> {
    state
        .services
        .agents
        .update_configuration(AgentId(agent_id), body.configuration)
        .await?;
    Ok(Json(json!({ "agent_id": agent_id, "message": "Configuration updated" })))
}

async fn send_message(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Json(body): Json<SendMessageRequest>,
) -> ApiResult<Json<Value>> {
    let message = state
        .services
        .messaging
        .send(NewMessage {
            sender_id: body.sender_id,
            receiver_id: body.receiver_id,
            content: body.content,
        })
        .await?;
    Ok(Json(json!({ "message_id": message.id, "timestamp": message.timestamp })))
}

async fn agent_messages(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(agent_id): Path<u64>,
) -> ApiResult<Json<MessageListView>> {
    let agent_id = AgentId(agent_id);
    let messages = state.services.messaging.list_for_agent(agent_id).await?;
    Ok(Json(MessageListView {
        agent_id,
        messages: messages.into_iter().map(MessageView::from).collect(),
    }))
}

async fn delete_message(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(message_id): Path<u64>,
) -> ApiResult<Json<Value>> {
    state.services.messaging.delete(MessageId(message_id)).await?;
    Ok(Json(json!({ "message_id": message_id, "message": "Message deleted" })))
}

async fn create_task(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Json(body): Json<CreateTaskRequest>,
) -> ApiResult<Json<Value>> {
    let new_task = NewTask::new(body.priority, body.assigned_agent_id, body.deadline, body.status)?;
    let task = state.services.tasks.create(new_task).await?;
    Ok(Json(json!({ "task_id": task.id, "message": "Task created successfully" })))
}

async fn get_task(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(task_id): Path<u64>,
) -> ApiResult<Json<TaskView>> {
    let task = state.services.tasks.get(TaskId(task_id)).await?;
    Ok(Json(task.into()))
}

async fn update_task_status(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(task_id): Path<u64>,
    Json(body): Json<TaskStatusUpdate>,
) -> ApiResult<Json<Value>> {
    state.services.tasks.update_status(TaskId(task_id), body.status).await?;
    Ok(Json(json!({ "task_id": task_id, "message": "Task status updated" })))
}

async fn delete_task(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(task_id): Path<u64>,
) -> ApiResult<Json<Value>> {
    state.services.tasks.delete(TaskId(task_id)).await?;
    Ok(Json(json!({ "task_id": task_id, "message": "Task deleted" })))
}

async fn initiate_coordination(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Json(body): Json<CoordinationRequest>,
) -> ApiResult<Json<Value>> {
    let coordination = state
        .services
        .coordination
        .initiate(NewCoordination {
            agents: body.agents,
            action: body.action,
        })
        .await?;
    Ok(Json(json!({ "coordination_id": coordination.id, "message": "Coordination initiated" })))
}

async fn get_coordination(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(coordination_id): Path<u64>,
) -> ApiResult<Json<CoordinationView>> {
    let coordination = state
        .services
        .coordination
        .get(CoordinationId(coordination_id))
        .await?;
    Ok(Json(coordination.into()))
}

async fn add_integration(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Json(body): Json<IntegrationRequest>,
) -> ApiResult<Json<Value>> {
    let new_integration = NewIntegration::new(body.system_name, body.api_url, body.auth_details)?;
    let integration = state.services.integrations.add(new_integration).await?;
    Ok(Json(json!({ "integration_id": integration.integration_id, "message": "Integration added" })))
}

async fn list_integrations(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
) -> ApiResult<Json<Vec<IntegrationSummary>>> {
    Ok(Json(state.services.integrations.list().await?))
}

async fn get_integration(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(integration_id): Path<u64>,
) -> ApiResult<Json<IntegrationSummary>> {
    let integration = state
        .services
        .integrations
        .get(IntegrationId(integration_id))
        .await?;
    Ok(Json(integration))
}

async fn delete_integration(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(integration_id): Path<u64>,
) -> ApiResult<Json<Value>> {
    state
        .services
        .integrations
        .delete(IntegrationId(integration_id))
        .await?;
    Ok(Json(json!({ "integration_id": integration_id, "message": "Integration deleted" })))
}

async fn system_logs(State(state): State<Arc<AppState>>, _user: CurrentUser) -> Json<Vec<LogEntry>> {
    Json(state.services.system.logs())
}

async fn system_metrics(State(state): State<Arc<AppState>>, _user: CurrentUser) -> ApiResult<Json<SystemMetrics>> {
    Ok(Json(state.services.system.metrics().await?))
}
