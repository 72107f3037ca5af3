//! Expected-set specs and templates
//!
//! A spec says which items (webapp paths for a Tomcat role, service
//! profiles for a Docker server) must exist. EXPLICIT specs carry their own
//! items; TEMPLATE specs point at a shared, admin-managed template.

use super::common::TomcatRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpectedSetMode {
    /// Not yet chosen; never persisted
    #[default]
    Unconfigured,
    Explicit,
    Template,
}

impl ExpectedSetMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpectedSetMode::Unconfigured => "UNCONFIGURED",
            ExpectedSetMode::Explicit => "EXPLICIT",
            ExpectedSetMode::Template => "TEMPLATE",
        }
    }
}

impl fmt::Display for ExpectedSetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpectedSetTemplateKind {
    TomcatWebappPath,
    DockerServiceProfile,
}

impl ExpectedSetTemplateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpectedSetTemplateKind::TomcatWebappPath => "TOMCAT_WEBAPP_PATH",
            ExpectedSetTemplateKind::DockerServiceProfile => "DOCKER_SERVICE_PROFILE",
        }
    }
}

impl fmt::Display for ExpectedSetTemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedSetTemplate {
    pub id: Uuid,
    pub kind: ExpectedSetTemplateKind,
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TomcatExpectedWebappsSpec {
    pub server_id: Uuid,
    pub role: TomcatRole,
    #[serde(default)]
    pub mode: ExpectedSetMode,
    #[serde(default)]
    pub template_id: Option<Uuid>,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerExpectedServicesSpec {
    pub server_id: Uuid,
    #[serde(default)]
    pub mode: ExpectedSetMode,
    #[serde(default)]
    pub template_id: Option<Uuid>,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Shared surface of Tomcat and Docker specs
pub trait ExpectedSetSpec {
    /// Template kind a TEMPLATE spec of this type must reference
    const TEMPLATE_KIND: ExpectedSetTemplateKind;

    fn server_id(&self) -> Uuid;
    fn role(&self) -> Option<TomcatRole>;
    fn mode(&self) -> ExpectedSetMode;
    fn template_id(&self) -> Option<Uuid>;
    fn items(&self) -> &[String];

    /// `serverId` or `serverId/ROLE`, used in messages and duplicate checks
    fn key(&self) -> String {
        match self.role() {
            Some(role) => format!("{}/{}", self.server_id(), role),
            None => self.server_id().to_string(),
        }
    }

    /// Copy of this spec with mode, template and items replaced
    fn rebuilt(&self, mode: ExpectedSetMode, template_id: Option<Uuid>, items: Vec<String>) -> Self
    where
        Self: Sized;
}

impl ExpectedSetSpec for TomcatExpectedWebappsSpec {
    const TEMPLATE_KIND: ExpectedSetTemplateKind = ExpectedSetTemplateKind::TomcatWebappPath;

    fn server_id(&self) -> Uuid {
        self.server_id
    }

    fn role(&self) -> Option<TomcatRole> {
        Some(self.role)
    }

    fn mode(&self) -> ExpectedSetMode {
        self.mode
    }

    fn template_id(&self) -> Option<Uuid> {
        self.template_id
    }

    fn items(&self) -> &[String] {
        &self.items
    }

    fn rebuilt(&self, mode: ExpectedSetMode, template_id: Option<Uuid>, items: Vec<String>) -> Self {
        Self {
            server_id: self.server_id,
            role: self.role,
            mode,
            template_id,
            items,
        }
    }
}

impl ExpectedSetSpec for DockerExpectedServicesSpec {
    const TEMPLATE_KIND: ExpectedSetTemplateKind = ExpectedSetTemplateKind::DockerServiceProfile;

    fn server_id(&self) -> Uuid {
        self.server_id
    }

    fn role(&self) -> Option<TomcatRole> {
        None
    }

    fn mode(&self) -> ExpectedSetMode {
        self.mode
    }

    fn template_id(&self) -> Option<Uuid> {
        self.template_id
    }

    fn items(&self) -> &[String] {
        &self.items
    }

    fn rebuilt(&self, mode: ExpectedSetMode, template_id: Option<Uuid>, items: Vec<String>) -> Self {
        Self {
            server_id: self.server_id,
            mode,
            template_id,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_defaults_to_unconfigured() {
        let spec: DockerExpectedServicesSpec =
            serde_json::from_str(r#"{"serverId": "0e6f5b52-8a64-4a0e-b9b5-6c9a3b1b2c3d"}"#).unwrap();

        assert_eq!(spec.mode, ExpectedSetMode::Unconfigured);
        assert!(spec.items.is_empty());
        assert_eq!(spec.key(), "0e6f5b52-8a64-4a0e-b9b5-6c9a3b1b2c3d");
    }

    #[test]
    fn test_tomcat_key_includes_role() {
        let spec = TomcatExpectedWebappsSpec {
            server_id: Uuid::nil(),
            role: TomcatRole::Auth,
            mode: ExpectedSetMode::Explicit,
            template_id: None,
            items: vec!["/login".into()],
        };
        assert!(spec.key().ends_with("/AUTH"));
    }

    #[test]
    fn test_spec_serializes_null_template() {
        let spec = DockerExpectedServicesSpec {
            server_id: Uuid::nil(),
            mode: ExpectedSetMode::Explicit,
            template_id: None,
            items: vec!["payments".into()],
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["mode"], "EXPLICIT");
        assert!(json["templateId"].is_null());
    }
}
