// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Bearer token commands
//!
//! Commands: issue

use anyhow::{anyhow, Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use agenthub_core::domain::auth::TokenIssuer;
use agenthub_core::domain::server_config::{token_ttl_minutes, ServerConfig};
use agenthub_core::infrastructure::JwtTokenService;

#[derive(Subcommand)]
pub enum TokenCommand {
    /// Sign a bearer token with the configured secret
    Issue {
        /// Username to put in the token's subject
        #[arg(long)]
        subject: String,

        /// Lifetime in minutes (default: spec.auth.access_token_expire_minutes)
        #[arg(long)]
        ttl_minutes: Option<i64>,
    },
}

pub async fn handle_command(command: TokenCommand, config_override: Option<PathBuf>) -> Result<()> {
    match command {
        TokenCommand::Issue {
            subject,
            ttl_minutes,
        } => {
            let config = ServerConfig::load_or_default(config_override)
                .context("Failed to load configuration")?;
            let token = issue(&config, &subject, ttl_minutes)?;
            eprintln!(
                "{}",
                format!("✓ Token issued for '{}'", subject).green()
            );
            println!("{}", token);
            Ok(())
        }
    }
}

/// Sign a token for `subject`. Requires a configured secret: a token signed
/// with a throwaway secret would be useless to any running server.
pub fn issue(config: &ServerConfig, subject: &str, ttl_minutes: Option<i64>) -> Result<String> {
    let secret = config
        .spec
        .auth
        .secret_key
        .as_deref()
        .ok_or_else(|| anyhow!("No spec.auth.secret_key configured (set it or AGENTHUB_SECRET_KEY)"))?;

    let ttl = match ttl_minutes {
        Some(minutes) => token_ttl_minutes(minutes).context("Invalid --ttl-minutes")?,
        None => config
            .spec
            .auth
            .token_ttl()
            .context("Invalid spec.auth.access_token_expire_minutes")?,
    };

    JwtTokenService::new(secret)
        .issue(subject, ttl)
        .map_err(|e| anyhow!("Failed to sign token: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_requires_secret() {
        let config = ServerConfig::default();
        assert!(issue(&config, "admin", None).is_err());
    }

    #[test]
    fn test_issued_token_verifies_with_same_secret() {
        let mut config = ServerConfig::default();
        config.spec.auth.secret_key = Some("cli-test-secret".to_string());

        let token = issue(&config, "admin", Some(5)).unwrap();
        let claims = JwtTokenService::new("cli-test-secret").verify(&token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.exp - claims.iat, 300);

        assert!(issue(&config, "admin", Some(0)).is_err());
    }

    #[test]
    fn test_issue_rejects_oversized_lifetimes() {
        let mut config = ServerConfig::default();
        config.spec.auth.secret_key = Some("cli-test-secret".to_string());

        assert!(issue(&config, "admin", Some(i64::MAX)).is_err());
        assert!(issue(&config, "admin", Some(1_000_000_000_000)).is_err());

        config.spec.auth.access_token_expire_minutes = i64::MAX;
        assert!(issue(&config, "admin", None).is_err());
    }
}
