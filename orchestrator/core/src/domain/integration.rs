// Copyright (c) 2026 AgentHub Contributors
// SPDX-License-Identifier: AGPL-3.0

//! External system integrations.
//!
//! `auth_details` is stored as given and never leaves the process: every
//! outward view goes through [`IntegrationSummary`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntegrationId(pub u64);

impl fmt::Display for IntegrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewIntegration {
    pub system_name: String,
    pub api_url: String,
    pub auth_details: Map<String, Value>,
}

impl NewIntegration {
    pub fn new(
        system_name: impl Into<String>,
        api_url: impl Into<String>,
        auth_details: Value,
    ) -> Result<Self, ValidationError> {
        let Value::Object(auth_details) = auth_details else {
            return Err(ValidationError::NotAnObject {
                field: "auth_details",
            });
        };
        Ok(Self {
            system_name: system_name.into(),
            api_url: api_url.into(),
            auth_details,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Integration {
    pub id: IntegrationId,
    pub system_name: String,
    pub api_url: String,
    pub auth_details: Map<String, Value>,
}

impl Integration {
    pub fn new(id: IntegrationId, new: NewIntegration) -> Self {
        Self {
            id,
            system_name: new.system_name,
            api_url: new.api_url,
            auth_details: new.auth_details,
        }
    }

    pub fn summary(&self) -> IntegrationSummary {
        IntegrationSummary {
            integration_id: self.id,
            system_name: self.system_name.clone(),
            api_url: self.api_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationSummary {
    pub integration_id: IntegrationId,
    pub system_name: String,
    pub api_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_drops_auth_details() {
        let new = NewIntegration::new("CRM", "https://crm.example.com/api", json!({"token": "s3cret"}))
            .unwrap();
        let integration = Integration::new(IntegrationId(7), new);
        let rendered = serde_json::to_string(&integration.summary()).unwrap();
        assert!(rendered.contains("CRM"));
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    fn test_auth_details_must_be_object() {
        assert!(NewIntegration::new("CRM", "https://crm", json!("token")).is_err());
    }
}
