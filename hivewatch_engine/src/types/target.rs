//! Servers and scannable targets

use super::common::TomcatRole;
use super::state::{ActuatorTargetState, TomcatTargetState};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub id: Uuid,
    pub environment_id: Uuid,
    pub name: String,
}

/// One Tomcat role on a server, with its latest scan if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TomcatTarget {
    pub id: Uuid,
    pub server_id: Uuid,
    pub server_name: String,
    pub role: TomcatRole,
    pub base_url: String,
    pub port: u16,
    #[serde(default)]
    pub connect_timeout_ms: Option<u32>,
    #[serde(default)]
    pub request_timeout_ms: Option<u32>,
    #[serde(default)]
    pub state: Option<TomcatTargetState>,
}

/// One Spring Boot actuator endpoint; `profile` names the Docker service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActuatorTarget {
    pub id: Uuid,
    pub server_id: Uuid,
    pub server_name: String,
    pub role: TomcatRole,
    pub profile: String,
    pub base_url: String,
    pub port: u16,
    #[serde(default)]
    pub connect_timeout_ms: Option<u32>,
    #[serde(default)]
    pub request_timeout_ms: Option<u32>,
    #[serde(default)]
    pub state: Option<ActuatorTargetState>,
}

impl ActuatorTarget {
    /// Profile as used for column matching
    pub fn profile_key(&self) -> &str {
        self.profile.trim()
    }
}
