//! # Snapshot Processor
//!
//! Entry point for evaluating snapshot documents: reads input, runs the
//! generator and validates expected-set spec documents.

use crate::api::errors::ProcessorError;
use crate::config::EngineConfig;
use crate::expected::{ExpectedSetError, SpecValidator};
use crate::fetch::{EnvironmentLoader, EnvironmentSource, EnvironmentView, LoadState, SnapshotSource};
use crate::logging::codes;
use crate::results::{Dashboard, DashboardGenerator, EnvironmentStatus};
use crate::types::{
    DashboardInput, DockerExpectedServicesSpec, ExpectedSetSpec, ExpectedSetTemplate, Session,
    TomcatExpectedWebappsSpec,
};
use crate::{log_error, log_info};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

/// Expected-set specs submitted for validation, with the template catalog
/// they may reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecDocument {
    #[serde(default)]
    pub templates: Vec<ExpectedSetTemplate>,
    #[serde(default)]
    pub tomcat_specs: Vec<TomcatExpectedWebappsSpec>,
    #[serde(default)]
    pub docker_specs: Vec<DockerExpectedServicesSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecRejection {
    pub key: String,
    pub reason: String,
}

/// Outcome of validating a [`SpecDocument`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecValidationReport {
    pub accepted: Vec<String>,
    pub rejected: Vec<SpecRejection>,
}

impl SpecValidationReport {
    pub fn is_valid(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Create a summary string for logging or display
    pub fn summary(&self) -> String {
        format!("{} accepted, {} rejected", self.accepted.len(), self.rejected.len())
    }
}

/// Evaluates snapshot documents on behalf of one caller
pub struct SnapshotProcessor {
    config: EngineConfig,
    session: Session,
}

impl SnapshotProcessor {
    /// Processor acting as an administrator
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            session: Session::admin("hivewatch"),
        }
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn load_input(&self, path: &Path) -> Result<DashboardInput, ProcessorError> {
        let content = read_file(path)?;
        self.parse_input(&content).inspect_err(|e| {
            log_error!(
                codes::input::SNAPSHOT_PARSE_FAILED,
                "Snapshot document rejected",
                "path" => path.display(),
                "error" => e
            );
        })
    }

    pub fn parse_input(&self, content: &str) -> Result<DashboardInput, ProcessorError> {
        let input: DashboardInput = serde_json::from_str(content)?;
        log_info!(
            "Snapshot loaded",
            "environments" => input.environments.len()
        );
        Ok(input)
    }

    pub fn load_specs(&self, path: &Path) -> Result<SpecDocument, ProcessorError> {
        let content = read_file(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn dashboard(&self, input: &DashboardInput, now: DateTime<Utc>) -> Dashboard {
        DashboardGenerator::new(&self.config).dashboard(input, &self.session, now)
    }

    /// Status of one environment, loaded through the fetch pipeline so that
    /// only targets and servers need to be present
    pub fn status(
        &self,
        input: &DashboardInput,
        environment_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<EnvironmentStatus, ProcessorError> {
        let env = input
            .environment(environment_id)
            .filter(|env| self.session.can_see(env.id))
            .ok_or_else(|| {
                log_error!(
                    codes::input::UNKNOWN_ENVIRONMENT,
                    "Environment not in snapshot",
                    "environment_id" => environment_id
                );
                ProcessorError::UnknownEnvironment { environment_id }
            })?;

        let source = SnapshotSource::new(input.clone());
        self.status_from(&source, env.id, &env.name, now)
    }

    /// Decision status for an environment loaded through any source. A
    /// failed target fetch surfaces as [`ProcessorError::Fetch`]
    pub fn status_from<S: EnvironmentSource + ?Sized>(
        &self,
        source: &S,
        environment_id: Uuid,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<EnvironmentStatus, ProcessorError> {
        let view = EnvironmentLoader::new(source).load(environment_id, name);

        match view.status(&self.config, now) {
            LoadState::Ready(status) => Ok(status),
            LoadState::Error(reason) => {
                match view.failure_among(&EnvironmentView::STATUS_RESOURCES) {
                    Some(failure) => Err(failure.clone().into()),
                    None => Err(ProcessorError::Incomplete { reason }),
                }
            }
            LoadState::Loading => Err(ProcessorError::Incomplete {
                reason: "targets are still loading".to_string(),
            }),
        }
    }

    /// Validate every spec in the document as a save would, without storing
    pub fn validate_specs(&self, document: &SpecDocument) -> Result<SpecValidationReport, ProcessorError> {
        let mut validator = SpecValidator::new(&self.config.evaluation)?;
        // without a catalog, template references are only checked for presence
        if !document.templates.is_empty() {
            validator = validator.with_templates(&document.templates);
        }
        let mut report = SpecValidationReport::default();

        check_specs(&validator, &document.tomcat_specs, &mut report);
        check_specs(&validator, &document.docker_specs, &mut report);

        log_info!(
            "Expected-set specs validated",
            "accepted" => report.accepted.len(),
            "rejected" => report.rejected.len()
        );
        Ok(report)
    }
}

fn check_specs<S: ExpectedSetSpec>(
    validator: &SpecValidator<'_>,
    specs: &[S],
    report: &mut SpecValidationReport,
) {
    let mut seen = HashSet::new();
    for spec in specs {
        let key = spec.key();
        let outcome = if seen.insert(key.clone()) {
            validator.prepare_for_save(spec).map(|_| ())
        } else {
            Err(ExpectedSetError::DuplicateSpec { key: key.clone() })
        };

        match outcome {
            Ok(()) => report.accepted.push(key),
            Err(e) => report.rejected.push(SpecRejection {
                key,
                reason: e.to_string(),
            }),
        }
    }
}

fn read_file(path: &Path) -> Result<String, ProcessorError> {
    if !path.exists() {
        return Err(ProcessorError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    std::fs::read_to_string(path).map_err(|source| {
        log_error!(
            codes::input::SNAPSHOT_READ_FAILED,
            "Failed to read input file",
            "path" => path.display()
        );
        ProcessorError::Io {
            path: path.display().to_string(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{CancellationToken, FetchError, ResourceKind};
    use crate::types::{
        ActuatorTarget, EnvironmentSnapshot, ExpectedSetMode, Server, TomcatRole, TomcatTarget,
    };
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn input() -> DashboardInput {
        let mut env = EnvironmentSnapshot::new(Uuid::from_u128(1), "prod");
        env.tomcat_targets.push(TomcatTarget {
            id: Uuid::from_u128(2),
            server_id: Uuid::from_u128(3),
            server_name: "app-01".into(),
            role: TomcatRole::Payments,
            base_url: "http://app-01".into(),
            port: 8080,
            connect_timeout_ms: Some(2000),
            request_timeout_ms: Some(5000),
            state: None,
        });
        DashboardInput {
            environments: vec![env, EnvironmentSnapshot::new(Uuid::from_u128(4), "dev")],
        }
    }

    #[test]
    fn test_load_input_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&input()).unwrap()).unwrap();

        let processor = SnapshotProcessor::new(EngineConfig::default());
        let loaded = processor.load_input(file.path()).unwrap();
        assert_eq!(loaded, input());
    }

    #[test]
    fn test_load_input_errors() {
        let processor = SnapshotProcessor::new(EngineConfig::default());
        assert_matches!(
            processor.load_input(Path::new("/nonexistent/snapshot.json")),
            Err(ProcessorError::FileNotFound { .. })
        );

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"environments\": 3}}").unwrap();
        assert_matches!(processor.load_input(file.path()), Err(ProcessorError::Json(_)));
    }

    #[test]
    fn test_status() {
        let processor = SnapshotProcessor::new(EngineConfig::default());
        let status = processor
            .status(&input(), Uuid::from_u128(1), Utc::now())
            .unwrap();
        assert_eq!(status.environment_name, "prod");
        assert_eq!(status.issues.len(), 1);
        assert_eq!(status.issues[0].label, "Tomcat payments");

        assert_matches!(
            processor.status(&input(), Uuid::from_u128(99), Utc::now()),
            Err(ProcessorError::UnknownEnvironment { .. })
        );
    }

    /// Serves the snapshot except for servers, which answer 503
    struct ServersDown(SnapshotSource);

    impl EnvironmentSource for ServersDown {
        fn servers(&self, _: Uuid, _: &CancellationToken) -> Result<Vec<Server>, FetchError> {
            Err(FetchError::Failed {
                resource: ResourceKind::Servers,
                message: "HTTP 503".into(),
            })
        }

        fn tomcat_targets(&self, id: Uuid, t: &CancellationToken) -> Result<Vec<TomcatTarget>, FetchError> {
            self.0.tomcat_targets(id, t)
        }

        fn actuator_targets(
            &self,
            id: Uuid,
            t: &CancellationToken,
        ) -> Result<Vec<ActuatorTarget>, FetchError> {
            self.0.actuator_targets(id, t)
        }

        fn tomcat_specs(
            &self,
            id: Uuid,
            t: &CancellationToken,
        ) -> Result<Vec<TomcatExpectedWebappsSpec>, FetchError> {
            self.0.tomcat_specs(id, t)
        }

        fn docker_specs(
            &self,
            id: Uuid,
            t: &CancellationToken,
        ) -> Result<Vec<DockerExpectedServicesSpec>, FetchError> {
            self.0.docker_specs(id, t)
        }

        fn templates(&self, id: Uuid, t: &CancellationToken) -> Result<Vec<ExpectedSetTemplate>, FetchError> {
            self.0.templates(id, t)
        }
    }

    #[test]
    fn test_status_surfaces_fetch_failure() {
        let processor = SnapshotProcessor::new(EngineConfig::default());
        let source = ServersDown(SnapshotSource::new(input()));

        let err = processor
            .status_from(&source, Uuid::from_u128(1), "prod", Utc::now())
            .unwrap_err();
        assert_matches!(
            err,
            ProcessorError::Fetch(FetchError::Failed {
                resource: ResourceKind::Servers,
                ..
            })
        );
        assert_eq!(err.user_message(), "Loading failed: Failed to load servers: HTTP 503");
        assert!(!err.is_recoverable());

        let healthy = SnapshotSource::new(input());
        assert!(processor
            .status_from(&healthy, Uuid::from_u128(1), "prod", Utc::now())
            .is_ok());
    }

    #[test]
    fn test_status_respects_session() {
        let processor = SnapshotProcessor::new(EngineConfig::default())
            .with_session(Session::user("ops", [Uuid::from_u128(4)]));

        assert!(processor.status(&input(), Uuid::from_u128(4), Utc::now()).is_ok());
        assert_matches!(
            processor.status(&input(), Uuid::from_u128(1), Utc::now()),
            Err(ProcessorError::UnknownEnvironment { .. })
        );
        assert_eq!(processor.dashboard(&input(), Utc::now()).environments.len(), 1);
    }

    #[test]
    fn test_validate_specs() {
        let server = Uuid::from_u128(3);
        let spec = |mode, items: &[&str]| TomcatExpectedWebappsSpec {
            server_id: server,
            role: TomcatRole::Auth,
            mode,
            template_id: None,
            items: items.iter().map(|s| s.to_string()).collect(),
        };
        let document = SpecDocument {
            templates: vec![],
            tomcat_specs: vec![
                spec(ExpectedSetMode::Explicit, &["/auth"]),
                spec(ExpectedSetMode::Explicit, &["/auth"]),
            ],
            docker_specs: vec![DockerExpectedServicesSpec {
                server_id: server,
                mode: ExpectedSetMode::Unconfigured,
                template_id: None,
                items: vec![],
            }],
        };

        let processor = SnapshotProcessor::new(EngineConfig::default());
        let report = processor.validate_specs(&document).unwrap();

        assert!(!report.is_valid());
        assert_eq!(report.accepted.len(), 1);
        assert_eq!(report.rejected.len(), 2);
        assert!(report.rejected[0].reason.starts_with("Duplicate expected set"));
        assert!(report.rejected[1].reason.contains("mode must be EXPLICIT or TEMPLATE"));
        assert_eq!(report.summary(), "1 accepted, 2 rejected");
    }
}
