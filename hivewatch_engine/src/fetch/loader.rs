//! Parallel loading of an environment's resources and per-section evaluation
//! over whatever has arrived

use super::cancellation::CancellationToken;
use super::load_state::LoadState;
use super::source::{EnvironmentSource, FetchError, ResourceKind};
use super::tracker::RequestTracker;
use crate::config::EngineConfig;
use crate::evaluation::SectionEvaluator;
use crate::expected::ExpectedSetResolver;
use crate::logging::codes;
use crate::results::{DashboardGenerator, EnvironmentBlock, EnvironmentStatus, Section};
use crate::types::{
    ActuatorTarget, DockerExpectedServicesSpec, EnvironmentSnapshot, ExpectedSetTemplate, Server,
    TomcatExpectedWebappsSpec, TomcatTarget,
};
use crate::log_success;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::thread::{self, ScopedJoinHandle};
use uuid::Uuid;

/// Load states for one environment, one per independent resource
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentView {
    pub id: Uuid,
    pub name: String,
    pub servers: LoadState<Vec<Server>>,
    pub tomcat_targets: LoadState<Vec<TomcatTarget>>,
    pub actuator_targets: LoadState<Vec<ActuatorTarget>>,
    pub tomcat_specs: LoadState<Vec<TomcatExpectedWebappsSpec>>,
    pub docker_specs: LoadState<Vec<DockerExpectedServicesSpec>>,
    pub templates: LoadState<Vec<ExpectedSetTemplate>>,
    /// Typed error behind each resource currently in the error state
    pub failures: BTreeMap<ResourceKind, FetchError>,
}

impl EnvironmentView {
    /// Resources the decision status depends on
    pub const STATUS_RESOURCES: [ResourceKind; 3] = [
        ResourceKind::Servers,
        ResourceKind::TomcatTargets,
        ResourceKind::ActuatorTargets,
    ];

    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            servers: LoadState::Loading,
            tomcat_targets: LoadState::Loading,
            actuator_targets: LoadState::Loading,
            tomcat_specs: LoadState::Loading,
            docker_specs: LoadState::Loading,
            templates: LoadState::Loading,
            failures: BTreeMap::new(),
        }
    }

    /// First recorded failure among `resources`, in the given order
    pub fn failure_among(&self, resources: &[ResourceKind]) -> Option<&FetchError> {
        resources.iter().find_map(|r| self.failures.get(r))
    }

    /// Targets and servers only; enough for the decision
    fn targets(&self) -> LoadState<EnvironmentSnapshot> {
        self.servers
            .as_ref()
            .zip(self.tomcat_targets.as_ref())
            .zip(self.actuator_targets.as_ref())
            .map(|((servers, tomcats), actuators)| {
                let mut env = EnvironmentSnapshot::new(self.id, self.name.clone());
                env.servers = servers.clone();
                env.tomcat_targets = tomcats.clone();
                env.actuator_targets = actuators.clone();
                env
            })
    }

    /// Every resource, assembled into a snapshot
    pub fn snapshot(&self) -> LoadState<EnvironmentSnapshot> {
        self.targets()
            .zip(self.tomcat_specs.as_ref())
            .zip(self.docker_specs.as_ref())
            .zip(self.templates.as_ref())
            .map(|(((mut env, tomcat_specs), docker_specs), templates)| {
                env.tomcat_expected_specs = tomcat_specs.clone();
                env.docker_expected_specs = docker_specs.clone();
                env.templates = templates.clone();
                env
            })
    }

    /// Decision status; independent of specs and templates
    pub fn status(&self, config: &EngineConfig, now: DateTime<Utc>) -> LoadState<EnvironmentStatus> {
        self.targets()
            .map(|env| DashboardGenerator::new(config).environment_status(&env, now))
    }

    pub fn tomcat_section(&self, config: &EngineConfig) -> LoadState<Section> {
        self.targets()
            .zip(self.tomcat_specs.as_ref())
            .zip(self.templates.as_ref())
            .map(|((mut env, specs), templates)| {
                env.tomcat_expected_specs = specs.clone();
                let resolver = ExpectedSetResolver::new(templates);
                SectionEvaluator::new(&config.evaluation).tomcat_section(&env, &resolver)
            })
    }

    pub fn docker_section(&self, config: &EngineConfig) -> LoadState<Section> {
        self.targets()
            .zip(self.docker_specs.as_ref())
            .zip(self.templates.as_ref())
            .map(|((mut env, specs), templates)| {
                env.docker_expected_specs = specs.clone();
                let resolver = ExpectedSetResolver::new(templates);
                SectionEvaluator::new(&config.evaluation).docker_section(&env, &resolver)
            })
    }

    pub fn block(&self, config: &EngineConfig, now: DateTime<Utc>) -> LoadState<EnvironmentBlock> {
        self.snapshot()
            .map(|env| DashboardGenerator::new(config).environment_block(&env, now))
    }

    fn states(&self) -> [(ResourceKind, bool, bool); 6] {
        [
            (ResourceKind::Servers, self.servers.is_ready(), self.servers.error().is_some()),
            (
                ResourceKind::TomcatTargets,
                self.tomcat_targets.is_ready(),
                self.tomcat_targets.error().is_some(),
            ),
            (
                ResourceKind::ActuatorTargets,
                self.actuator_targets.is_ready(),
                self.actuator_targets.error().is_some(),
            ),
            (
                ResourceKind::TomcatSpecs,
                self.tomcat_specs.is_ready(),
                self.tomcat_specs.error().is_some(),
            ),
            (
                ResourceKind::DockerSpecs,
                self.docker_specs.is_ready(),
                self.docker_specs.error().is_some(),
            ),
            (ResourceKind::Templates, self.templates.is_ready(), self.templates.error().is_some()),
        ]
    }

    /// Resources that ended in an error
    pub fn failed_resources(&self) -> Vec<ResourceKind> {
        self.states()
            .iter()
            .filter(|(_, _, failed)| *failed)
            .map(|(resource, _, _)| *resource)
            .collect()
    }

    pub fn ready_count(&self) -> usize {
        self.states().iter().filter(|(_, ready, _)| *ready).count()
    }
}

/// Fetches the six resources of an environment concurrently through a source
pub struct EnvironmentLoader<'s, S: EnvironmentSource + ?Sized> {
    source: &'s S,
    tracker: RequestTracker,
}

impl<'s, S: EnvironmentSource + ?Sized> EnvironmentLoader<'s, S> {
    pub fn new(source: &'s S) -> Self {
        Self {
            source,
            tracker: RequestTracker::new(),
        }
    }

    pub fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    /// Cancel every in-flight fetch
    pub fn cancel(&self) {
        self.tracker.cancel_all();
    }

    pub fn load(&self, environment_id: Uuid, name: &str) -> EnvironmentView {
        let mut view = EnvironmentView::new(environment_id, name);
        let source = self.source;

        thread::scope(|scope| {
            let servers = scope.spawn(|| {
                self.fetch(ResourceKind::Servers, |t| source.servers(environment_id, t))
            });
            let tomcat_targets = scope.spawn(|| {
                self.fetch(ResourceKind::TomcatTargets, |t| {
                    source.tomcat_targets(environment_id, t)
                })
            });
            let actuator_targets = scope.spawn(|| {
                self.fetch(ResourceKind::ActuatorTargets, |t| {
                    source.actuator_targets(environment_id, t)
                })
            });
            let tomcat_specs = scope.spawn(|| {
                self.fetch(ResourceKind::TomcatSpecs, |t| source.tomcat_specs(environment_id, t))
            });
            let docker_specs = scope.spawn(|| {
                self.fetch(ResourceKind::DockerSpecs, |t| source.docker_specs(environment_id, t))
            });
            let templates = scope.spawn(|| {
                self.fetch(ResourceKind::Templates, |t| source.templates(environment_id, t))
            });

            settle(
                &mut view.servers,
                &mut view.failures,
                servers,
                ResourceKind::Servers,
            );
            settle(
                &mut view.tomcat_targets,
                &mut view.failures,
                tomcat_targets,
                ResourceKind::TomcatTargets,
            );
            settle(
                &mut view.actuator_targets,
                &mut view.failures,
                actuator_targets,
                ResourceKind::ActuatorTargets,
            );
            settle(
                &mut view.tomcat_specs,
                &mut view.failures,
                tomcat_specs,
                ResourceKind::TomcatSpecs,
            );
            settle(
                &mut view.docker_specs,
                &mut view.failures,
                docker_specs,
                ResourceKind::DockerSpecs,
            );
            settle(
                &mut view.templates,
                &mut view.failures,
                templates,
                ResourceKind::Templates,
            );
        });

        log_success!(
            codes::success::RESOURCES_LOADED,
            "Environment resources loaded",
            "environment" => view.name,
            "ready" => view.ready_count(),
            "failed" => view.failed_resources().len()
        );
        view
    }

    /// Re-fetch one resource, e.g. after expected sets were saved
    pub fn refresh(&self, view: &mut EnvironmentView, resource: ResourceKind) {
        let id = view.id;
        let source = self.source;
        let failures = &mut view.failures;
        match resource {
            ResourceKind::Servers => apply(
                &mut view.servers,
                failures,
                resource,
                self.fetch(resource, |t| source.servers(id, t)),
            ),
            ResourceKind::TomcatTargets => apply(
                &mut view.tomcat_targets,
                failures,
                resource,
                self.fetch(resource, |t| source.tomcat_targets(id, t)),
            ),
            ResourceKind::ActuatorTargets => apply(
                &mut view.actuator_targets,
                failures,
                resource,
                self.fetch(resource, |t| source.actuator_targets(id, t)),
            ),
            ResourceKind::TomcatSpecs => apply(
                &mut view.tomcat_specs,
                failures,
                resource,
                self.fetch(resource, |t| source.tomcat_specs(id, t)),
            ),
            ResourceKind::DockerSpecs => apply(
                &mut view.docker_specs,
                failures,
                resource,
                self.fetch(resource, |t| source.docker_specs(id, t)),
            ),
            ResourceKind::Templates => apply(
                &mut view.templates,
                failures,
                resource,
                self.fetch(resource, |t| source.templates(id, t)),
            ),
        }
    }

    fn fetch<T, F>(&self, resource: ResourceKind, f: F) -> Fetched<T>
    where
        F: FnOnce(&CancellationToken) -> Result<T, FetchError>,
    {
        let ticket = self.tracker.begin(resource);
        let result = f(&ticket.token);
        let failure = result.as_ref().err().cloned();
        Fetched {
            state: self.tracker.complete(&ticket, result),
            failure,
        }
    }
}

/// Next state of a resource plus the typed error behind it, if any
struct Fetched<T> {
    state: Option<LoadState<T>>,
    failure: Option<FetchError>,
}

fn apply<T>(
    state: &mut LoadState<T>,
    failures: &mut BTreeMap<ResourceKind, FetchError>,
    resource: ResourceKind,
    next: Fetched<T>,
) {
    let Some(next_state) = next.state else {
        return;
    };
    match (&next_state, next.failure) {
        (LoadState::Error(_), Some(failure)) => {
            failures.insert(resource, failure);
        }
        _ => {
            failures.remove(&resource);
        }
    }
    *state = next_state;
}

fn settle<T>(
    state: &mut LoadState<T>,
    failures: &mut BTreeMap<ResourceKind, FetchError>,
    handle: ScopedJoinHandle<'_, Fetched<T>>,
    resource: ResourceKind,
) {
    match handle.join() {
        Ok(next) => apply(state, failures, resource, next),
        Err(_) => {
            let failure = FetchError::Failed {
                resource,
                message: "loader panicked".to_string(),
            };
            *state = LoadState::Error(failure.to_string());
            failures.insert(resource, failure);
        }
    }
}
