// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

// Server Configuration Types
//
// Kubernetes-style manifest (apiVersion/kind/metadata/spec) covering:
// - HTTP bind address
// - Token signing (secret, algorithm, lifetime)
// - Bootstrap administrator account
// - Storage backend and activity log sizing

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::repository::StorageBackend;

pub const API_VERSION: &str = "agenthub/v1";
pub const KIND: &str = "ServerConfig";

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "AGENTHUB_CONFIG_PATH";

/// Longest accepted token lifetime: one year.
pub const MAX_TOKEN_TTL_MINUTES: i64 = 60 * 24 * 365;

/// Token lifetime for `minutes`, bounded to `1..=MAX_TOKEN_TTL_MINUTES`.
pub fn token_ttl_minutes(minutes: i64) -> anyhow::Result<chrono::Duration> {
    if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&minutes) {
        anyhow::bail!(
            "token lifetime must be between 1 and {} minutes, got {}",
            MAX_TOKEN_TTL_MINUTES,
            minutes
        );
    }
    chrono::Duration::try_minutes(minutes)
        .ok_or_else(|| anyhow::anyhow!("token lifetime of {} minutes is out of range", minutes))
}

/// Top-level server configuration manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfigManifest {
    /// API version (must be "agenthub/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "ServerConfig")
    pub kind: String,

    pub metadata: ManifestMetadata,

    #[serde(default)]
    pub spec: ServerConfigSpec,
}

/// Alias used by callers that only care about the loaded config.
pub type ServerConfig = ServerConfigManifest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    /// Human-readable server name
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfigSpec {
    #[serde(default)]
    pub server: HttpConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub activity_log: ActivityLogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl HttpConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret. When absent a random one is generated at startup and
    /// every token dies with the process.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    #[serde(default = "default_token_ttl_minutes")]
    pub access_token_expire_minutes: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: None,
            algorithm: default_algorithm(),
            access_token_expire_minutes: default_token_ttl_minutes(),
            bootstrap_admin: None,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("algorithm", &self.algorithm)
            .field("access_token_expire_minutes", &self.access_token_expire_minutes)
            .field("bootstrap_admin", &self.bootstrap_admin)
            .finish()
    }
}

impl AuthConfig {
    pub fn token_ttl(&self) -> anyhow::Result<chrono::Duration> {
        token_ttl_minutes(self.access_token_expire_minutes)
    }
}

/// Administrator created in the credential store at startup, so that the
/// first login is possible.
#[derive(Clone, Serialize, Deserialize)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackendKind {
    #[default]
    InMemory,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackendKind,
}

impl StorageConfig {
    pub fn backend(&self) -> StorageBackend {
        match self.backend {
            StorageBackendKind::InMemory => StorageBackend::InMemory,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogConfig {
    #[serde(default = "default_activity_log_capacity")]
    pub capacity: usize,
}

impl Default for ActivityLogConfig {
    fn default() -> Self {
        Self {
            capacity: default_activity_log_capacity(),
        }
    }
}

impl Default for ServerConfigManifest {
    fn default() -> Self {
        let hostname = hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or_else(|| "agenthub".to_string());

        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ManifestMetadata {
                name: hostname,
                version: Some("1.0.0".to_string()),
                labels: None,
            },
            spec: ServerConfigSpec::default(),
        }
    }
}

impl ServerConfigManifest {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Discover configuration file using precedence order
    /// 1. AGENTHUB_CONFIG_PATH environment variable
    /// 2. ./agenthub-config.yaml (working directory)
    /// 3. ~/.agenthub/config.yaml (user home)
    /// 4. /etc/agenthub/config.yaml (system, Unix only)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./agenthub-config.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".agenthub").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        #[cfg(unix)]
        {
            let system_config = PathBuf::from("/etc/agenthub/config.yaml");
            if system_config.exists() {
                return Some(system_config);
            }
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit path must exist and parse.
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path)
                .map_err(|e| anyhow::anyhow!("Failed to load config at {:?}: {}", path, e))?;
            config.apply_env_overrides();
            return Ok(config);
        }

        if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            let mut config = Self::from_yaml_file(config_path)?;
            config.apply_env_overrides();
            Ok(config)
        } else {
            tracing::warn!("No configuration file found in standard locations. Using defaults.");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup. Unparseable values are
    /// logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(secret) = lookup("AGENTHUB_SECRET_KEY") {
            tracing::info!("Environment override: AGENTHUB_SECRET_KEY=<redacted>");
            self.spec.auth.secret_key = Some(secret);
        }

        if let Some(val) = lookup("AGENTHUB_TOKEN_TTL_MINUTES") {
            match val.parse::<i64>() {
                Ok(minutes) => {
                    tracing::info!("Environment override: AGENTHUB_TOKEN_TTL_MINUTES={}", minutes);
                    self.spec.auth.access_token_expire_minutes = minutes;
                }
                Err(_) => tracing::warn!(
                    "Invalid value for AGENTHUB_TOKEN_TTL_MINUTES: '{}'. Expected an integer. Ignoring.",
                    val
                ),
            }
        }

        match (lookup("AGENTHUB_ADMIN_USERNAME"), lookup("AGENTHUB_ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => {
                tracing::info!("Environment override: AGENTHUB_ADMIN_USERNAME={}", username);
                self.spec.auth.bootstrap_admin = Some(BootstrapAdmin { username, password });
            }
            (Some(_), None) | (None, Some(_)) => tracing::warn!(
                "AGENTHUB_ADMIN_USERNAME and AGENTHUB_ADMIN_PASSWORD must be set together. Ignoring."
            ),
            (None, None) => {}
        }

        if let Some(host) = lookup("AGENTHUB_HOST") {
            tracing::info!("Environment override: AGENTHUB_HOST={}", host);
            self.spec.server.host = host;
        }

        if let Some(val) = lookup("AGENTHUB_PORT") {
            match val.parse::<u16>() {
                Ok(port) => {
                    tracing::info!("Environment override: AGENTHUB_PORT={}", port);
                    self.spec.server.port = port;
                }
                Err(_) => tracing::warn!(
                    "Invalid value for AGENTHUB_PORT: '{}'. Expected a port number. Ignoring.",
                    val
                ),
            }
        }
    }

    /// Fill in a random 256-bit hex secret when none is configured.
    /// Returns `true` if one was generated.
    pub fn ensure_secret_key(&mut self) -> bool {
        if self.spec.auth.secret_key.is_some() {
            return false;
        }
        let mut bytes = [0u8; 32];
        rand::rng().fill(&mut bytes);
        self.spec.auth.secret_key = Some(hex::encode(bytes));
        true
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != API_VERSION {
            anyhow::bail!(
                "Invalid apiVersion: '{}'. Must be '{}'",
                self.api_version,
                API_VERSION
            );
        }

        if self.kind != KIND {
            anyhow::bail!("Invalid kind: '{}'. Must be '{}'", self.kind, KIND);
        }

        if self.metadata.name.is_empty() {
            anyhow::bail!("metadata.name cannot be empty");
        }

        if self.spec.server.host.is_empty() {
            anyhow::bail!("spec.server.host cannot be empty");
        }

        let auth = &self.spec.auth;
        if auth.algorithm != "HS256" {
            anyhow::bail!(
                "Unsupported spec.auth.algorithm: '{}'. Only 'HS256' is supported",
                auth.algorithm
            );
        }

        if let Some(secret) = &auth.secret_key {
            if secret.is_empty() {
                anyhow::bail!("spec.auth.secret_key cannot be empty when set");
            }
        }

        auth.token_ttl()
            .map_err(|e| anyhow::anyhow!("spec.auth.access_token_expire_minutes: {}", e))?;

        if let Some(admin) = &auth.bootstrap_admin {
            if admin.username.is_empty() || admin.password.is_empty() {
                anyhow::bail!("spec.auth.bootstrap_admin requires a username and a password");
            }
        }

        if self.spec.activity_log.capacity == 0 {
            anyhow::bail!("spec.activity_log.capacity must be at least 1");
        }

        Ok(())
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_token_ttl_minutes() -> i64 {
    60
}

fn default_activity_log_capacity() -> usize {
    1000
}
