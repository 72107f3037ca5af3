//! Pluggable source for the independent resources of one environment

use super::cancellation::CancellationToken;
use crate::types::{
    ActuatorTarget, DashboardInput, DockerExpectedServicesSpec, ExpectedSetTemplate, Server,
    TomcatExpectedWebappsSpec, TomcatTarget,
};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Servers,
    TomcatTargets,
    ActuatorTargets,
    TomcatSpecs,
    DockerSpecs,
    Templates,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Servers,
        ResourceKind::TomcatTargets,
        ResourceKind::ActuatorTargets,
        ResourceKind::TomcatSpecs,
        ResourceKind::DockerSpecs,
        ResourceKind::Templates,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Servers => "servers",
            ResourceKind::TomcatTargets => "tomcat-targets",
            ResourceKind::ActuatorTargets => "actuator-targets",
            ResourceKind::TomcatSpecs => "tomcat-specs",
            ResourceKind::DockerSpecs => "docker-specs",
            ResourceKind::Templates => "templates",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("Fetch of {resource} cancelled")]
    Cancelled { resource: ResourceKind },

    #[error("Failed to load {resource}: {message}")]
    Failed {
        resource: ResourceKind,
        message: String,
    },

    #[error("Environment not found: {environment_id}")]
    UnknownEnvironment { environment_id: Uuid },
}

impl FetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled { .. })
    }
}

/// One method per resource. Implementations should honor `token` and return
/// [`FetchError::Cancelled`] once it is set.
pub trait EnvironmentSource: Send + Sync {
    fn servers(&self, environment_id: Uuid, token: &CancellationToken) -> Result<Vec<Server>, FetchError>;

    fn tomcat_targets(
        &self,
        environment_id: Uuid,
        token: &CancellationToken,
    ) -> Result<Vec<TomcatTarget>, FetchError>;

    fn actuator_targets(
        &self,
        environment_id: Uuid,
        token: &CancellationToken,
    ) -> Result<Vec<ActuatorTarget>, FetchError>;

    fn tomcat_specs(
        &self,
        environment_id: Uuid,
        token: &CancellationToken,
    ) -> Result<Vec<TomcatExpectedWebappsSpec>, FetchError>;

    fn docker_specs(
        &self,
        environment_id: Uuid,
        token: &CancellationToken,
    ) -> Result<Vec<DockerExpectedServicesSpec>, FetchError>;

    fn templates(
        &self,
        environment_id: Uuid,
        token: &CancellationToken,
    ) -> Result<Vec<ExpectedSetTemplate>, FetchError>;
}

/// Serves resources out of an already loaded snapshot file
pub struct SnapshotSource {
    input: DashboardInput,
}

impl SnapshotSource {
    pub fn new(input: DashboardInput) -> Self {
        Self { input }
    }

    fn pick<T, F>(
        &self,
        environment_id: Uuid,
        resource: ResourceKind,
        token: &CancellationToken,
        f: F,
    ) -> Result<Vec<T>, FetchError>
    where
        T: Clone,
        F: FnOnce(&crate::types::EnvironmentSnapshot) -> &Vec<T>,
    {
        token.check(resource)?;
        self.input
            .environment(environment_id)
            .map(|env| f(env).clone())
            .ok_or(FetchError::UnknownEnvironment { environment_id })
    }
}

impl EnvironmentSource for SnapshotSource {
    fn servers(&self, environment_id: Uuid, token: &CancellationToken) -> Result<Vec<Server>, FetchError> {
        self.pick(environment_id, ResourceKind::Servers, token, |env| &env.servers)
    }

    fn tomcat_targets(
        &self,
        environment_id: Uuid,
        token: &CancellationToken,
    ) -> Result<Vec<TomcatTarget>, FetchError> {
        self.pick(environment_id, ResourceKind::TomcatTargets, token, |env| {
            &env.tomcat_targets
        })
    }

    fn actuator_targets(
        &self,
        environment_id: Uuid,
        token: &CancellationToken,
    ) -> Result<Vec<ActuatorTarget>, FetchError> {
        self.pick(environment_id, ResourceKind::ActuatorTargets, token, |env| {
            &env.actuator_targets
        })
    }

    fn tomcat_specs(
        &self,
        environment_id: Uuid,
        token: &CancellationToken,
    ) -> Result<Vec<TomcatExpectedWebappsSpec>, FetchError> {
        self.pick(environment_id, ResourceKind::TomcatSpecs, token, |env| {
            &env.tomcat_expected_specs
        })
    }

    fn docker_specs(
        &self,
        environment_id: Uuid,
        token: &CancellationToken,
    ) -> Result<Vec<DockerExpectedServicesSpec>, FetchError> {
        self.pick(environment_id, ResourceKind::DockerSpecs, token, |env| {
            &env.docker_expected_specs
        })
    }

    fn templates(
        &self,
        environment_id: Uuid,
        token: &CancellationToken,
    ) -> Result<Vec<ExpectedSetTemplate>, FetchError> {
        self.pick(environment_id, ResourceKind::Templates, token, |env| &env.templates)
    }
}
