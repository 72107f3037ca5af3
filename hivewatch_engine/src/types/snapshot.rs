//! Engine input: everything known about an environment at one instant

use super::expected::{DockerExpectedServicesSpec, ExpectedSetTemplate, TomcatExpectedWebappsSpec};
use super::target::{ActuatorTarget, Server, TomcatTarget};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentSnapshot {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub servers: Vec<Server>,
    #[serde(default)]
    pub tomcat_targets: Vec<TomcatTarget>,
    #[serde(default)]
    pub actuator_targets: Vec<ActuatorTarget>,
    #[serde(default)]
    pub tomcat_expected_specs: Vec<TomcatExpectedWebappsSpec>,
    #[serde(default)]
    pub docker_expected_specs: Vec<DockerExpectedServicesSpec>,
    #[serde(default)]
    pub templates: Vec<ExpectedSetTemplate>,
}

impl EnvironmentSnapshot {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            servers: Vec::new(),
            tomcat_targets: Vec::new(),
            actuator_targets: Vec::new(),
            tomcat_expected_specs: Vec::new(),
            docker_expected_specs: Vec::new(),
            templates: Vec::new(),
        }
    }

    /// Display name of a server; falls back to the name carried by a target
    pub fn server_name(&self, server_id: Uuid) -> String {
        self.servers
            .iter()
            .find(|s| s.id == server_id)
            .map(|s| s.name.clone())
            .or_else(|| {
                self.tomcat_targets
                    .iter()
                    .find(|t| t.server_id == server_id)
                    .map(|t| t.server_name.clone())
            })
            .or_else(|| {
                self.actuator_targets
                    .iter()
                    .find(|t| t.server_id == server_id)
                    .map(|t| t.server_name.clone())
            })
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// Input document for a dashboard evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardInput {
    #[serde(default)]
    pub environments: Vec<EnvironmentSnapshot>,
}

impl DashboardInput {
    pub fn environment(&self, id: Uuid) -> Option<&EnvironmentSnapshot> {
        self.environments.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_snapshot() {
        let input: DashboardInput = serde_json::from_str(
            r#"{"environments": [{"id": "9b2c3d4e-0000-4000-8000-000000000001", "name": "qa"}]}"#,
        )
        .unwrap();

        let env = &input.environments[0];
        assert!(env.tomcat_targets.is_empty());
        assert!(input.environment(env.id).is_some());
        assert!(input.environment(Uuid::nil()).is_none());
    }

    #[test]
    fn test_server_name_fallback() {
        let env = EnvironmentSnapshot::new(Uuid::nil(), "qa");
        assert_eq!(env.server_name(Uuid::nil()), "Unknown");
    }
}
