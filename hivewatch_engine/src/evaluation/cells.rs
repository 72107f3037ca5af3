//! Cell evaluation for one target in one column

use super::consistency::{reduce_values, Reduction};
use crate::config::EvaluationConfig;
use crate::results::Cell;
use crate::types::{ActuatorTarget, ScanSnapshot, TomcatRole, TomcatTarget, Webapp};
use std::collections::HashSet;

/// Evaluates Tomcat role cells and Docker service cells
pub struct CellEvaluator<'a> {
    config: &'a EvaluationConfig,
}

impl<'a> CellEvaluator<'a> {
    pub fn new(config: &'a EvaluationConfig) -> Self {
        Self { config }
    }

    /// Cell for one server × Tomcat role
    ///
    /// `expected` holds the resolved expected webapp paths for this role;
    /// an empty slice disables the missing-webapp check.
    pub fn tomcat_role_cell(
        &self,
        role: TomcatRole,
        target: Option<&TomcatTarget>,
        expected: &[String],
    ) -> Cell {
        let Some(target) = target else {
            return Cell::error(format!("Missing target: {}", role));
        };
        let Some(state) = &target.state else {
            return Cell::unknown();
        };
        if state.is_error() {
            return Cell::error(state.cell_failure());
        }

        let deployed: Vec<&Webapp> = state
            .webapps
            .iter()
            .filter(|w| !self.config.is_built_in(w.path.trim()))
            .collect();

        if !expected.is_empty() {
            let present: HashSet<&str> = deployed
                .iter()
                .map(|w| w.path.trim())
                .filter(|p| !p.is_empty())
                .collect();
            let mut missing: Vec<&str> = expected
                .iter()
                .map(|p| p.as_str())
                .filter(|p| !present.contains(p))
                .collect();
            if !missing.is_empty() {
                missing.sort_by_key(|p| p.to_lowercase());
                return Cell::error(format!(
                    "Missing expected webapps: {}",
                    self.preview(&missing)
                ));
            }
        }

        if deployed.is_empty() {
            return Cell::unknown();
        }

        let unversioned: Vec<&str> = deployed
            .iter()
            .filter(|w| w.reported_version().is_none())
            .map(|w| display_name(w))
            .collect();
        if !unversioned.is_empty() {
            return Cell::error(format!(
                "Missing webapp versions: {}",
                self.preview(&unversioned)
            ));
        }

        match reduce_values(deployed.iter().map(|w| w.reported_version())) {
            Reduction::Uniform(version) => Cell::ok(version),
            Reduction::Divergent(versions) => {
                Cell::error(format!("Multiple webapp versions: {}", versions.join(", ")))
            }
            Reduction::Empty => Cell::unknown(),
        }
    }

    /// Cell for one server × Docker profile column
    pub fn docker_service_cell(
        &self,
        profile: &str,
        target: Option<&ActuatorTarget>,
        expected: bool,
    ) -> Cell {
        let Some(target) = target else {
            return if expected {
                Cell::error(format!("Missing service: {}", profile))
            } else {
                Cell::unknown()
            };
        };
        let Some(state) = &target.state else {
            return Cell::unknown();
        };
        if state.is_error() {
            return Cell::error(state.cell_failure());
        }

        let health = state.health_status.as_deref().map(str::trim).unwrap_or("");
        if !health.eq_ignore_ascii_case("UP") {
            let shown = if health.is_empty() { "UNKNOWN" } else { health };
            return Cell::error(format!("{} is {}", profile, shown));
        }

        let app_name = state
            .app_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        match state
            .build_version
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            Some(version) => Cell::ok(version).with_title(app_name),
            None => Cell::unknown().with_title(app_name),
        }
    }

    fn preview(&self, names: &[&str]) -> String {
        names
            .iter()
            .take(self.config.preview_limit)
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn display_name(webapp: &Webapp) -> &str {
    let name = webapp.name.trim();
    if name.is_empty() {
        webapp.path.trim()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::CellStatus;
    use crate::types::{
        ActuatorTargetState, ScanErrorKind, ScanOutcomeKind, TomcatTargetState,
    };
    use chrono::Utc;
    use uuid::Uuid;

    fn webapp(path: &str, version: Option<&str>) -> Webapp {
        Webapp {
            path: path.to_string(),
            name: path.trim_start_matches('/').to_string(),
            version: version.map(str::to_string),
        }
    }

    fn tomcat(state: Option<TomcatTargetState>) -> TomcatTarget {
        TomcatTarget {
            id: Uuid::new_v4(),
            server_id: Uuid::new_v4(),
            server_name: "app-01".into(),
            role: TomcatRole::Payments,
            base_url: "http://app-01".into(),
            port: 8080,
            connect_timeout_ms: None,
            request_timeout_ms: None,
            state,
        }
    }

    fn scanned(webapps: Vec<Webapp>) -> Option<TomcatTargetState> {
        Some(TomcatTargetState {
            scanned_at: Utc::now(),
            outcome_kind: ScanOutcomeKind::Success,
            error_kind: None,
            error_message: None,
            tomcat_version: Some("10.1.18".into()),
            java_version: None,
            os: None,
            webapps,
        })
    }

    fn actuator(state: Option<ActuatorTargetState>) -> ActuatorTarget {
        ActuatorTarget {
            id: Uuid::new_v4(),
            server_id: Uuid::new_v4(),
            server_name: "swarm-01".into(),
            role: TomcatRole::Payments,
            profile: "payments".into(),
            base_url: "http://swarm-01".into(),
            port: 9000,
            connect_timeout_ms: None,
            request_timeout_ms: None,
            state,
        }
    }

    fn healthy(health: Option<&str>, version: Option<&str>) -> Option<ActuatorTargetState> {
        Some(ActuatorTargetState {
            scanned_at: Utc::now(),
            outcome_kind: ScanOutcomeKind::Success,
            error_kind: None,
            error_message: None,
            health_status: health.map(str::to_string),
            app_name: Some("payments-api".into()),
            build_version: version.map(str::to_string),
            cpu_usage: None,
            memory_used_bytes: None,
        })
    }

    fn evaluate_tomcat(target: Option<&TomcatTarget>, expected: &[String]) -> Cell {
        let config = EvaluationConfig::default();
        CellEvaluator::new(&config).tomcat_role_cell(TomcatRole::Payments, target, expected)
    }

    fn evaluate_docker(target: Option<&ActuatorTarget>, expected: bool) -> Cell {
        let config = EvaluationConfig::default();
        CellEvaluator::new(&config).docker_service_cell("payments", target, expected)
    }

    #[test]
    fn test_missing_target() {
        let cell = evaluate_tomcat(None, &[]);
        assert_eq!(cell, Cell::error("Missing target: PAYMENTS"));
    }

    #[test]
    fn test_never_scanned_is_unknown() {
        let target = tomcat(None);
        assert_eq!(evaluate_tomcat(Some(&target), &[]), Cell::unknown());
        // no state still wins over an expected set
        assert_eq!(
            evaluate_tomcat(Some(&target), &["/pay".to_string()]),
            Cell::unknown()
        );
    }

    #[test]
    fn test_scan_error_surfaced_verbatim() {
        let mut state = scanned(vec![]).unwrap();
        state.outcome_kind = ScanOutcomeKind::Error;
        state.error_kind = Some(ScanErrorKind::Auth);
        state.error_message = Some("401 Unauthorized".into());
        let target = tomcat(Some(state));

        assert_eq!(
            evaluate_tomcat(Some(&target), &[]),
            Cell::error("AUTH: 401 Unauthorized")
        );
    }

    #[test]
    fn test_built_in_webapps_ignored() {
        let target = tomcat(scanned(vec![
            webapp("/pay", Some("1.2")),
            webapp("/manager", None),
            webapp("/docs", Some("9.9")),
        ]));
        assert_eq!(evaluate_tomcat(Some(&target), &[]), Cell::ok("1.2"));
    }

    #[test]
    fn test_only_built_ins_is_unknown() {
        let target = tomcat(scanned(vec![webapp("/", None), webapp("/examples", Some("1"))]));
        assert_eq!(evaluate_tomcat(Some(&target), &[]), Cell::unknown());
    }

    #[test]
    fn test_multiple_versions() {
        let target = tomcat(scanned(vec![
            webapp("/pay", Some("1.2")),
            webapp("/refund", Some("1.3")),
            webapp("/ledger", Some("1.2")),
        ]));
        assert_eq!(
            evaluate_tomcat(Some(&target), &[]),
            Cell::error("Multiple webapp versions: 1.2, 1.3")
        );
    }

    #[test]
    fn test_missing_versions_capped() {
        let apps = (1..=8)
            .map(|i| webapp(&format!("/app{}", i), None))
            .collect();
        let target = tomcat(scanned(apps));

        let cell = evaluate_tomcat(Some(&target), &[]);
        assert_eq!(
            cell.title.as_deref(),
            Some("Missing webapp versions: app1, app2, app3, app4, app5, app6")
        );
    }

    #[test]
    fn test_missing_expected_webapps_sorted() {
        let target = tomcat(scanned(vec![webapp("/pay", Some("1.2"))]));
        let expected = vec![
            "/pay".to_string(),
            "/Zeta".to_string(),
            "/alpha".to_string(),
        ];

        assert_eq!(
            evaluate_tomcat(Some(&target), &expected),
            Cell::error("Missing expected webapps: /alpha, /Zeta")
        );
    }

    #[test]
    fn test_expected_webapps_present() {
        let target = tomcat(scanned(vec![webapp("/pay", Some("1.2"))]));
        assert_eq!(
            evaluate_tomcat(Some(&target), &["/pay".to_string()]),
            Cell::ok("1.2")
        );
    }

    #[test]
    fn test_docker_missing_service() {
        assert_eq!(
            evaluate_docker(None, true),
            Cell::error("Missing service: payments")
        );
        assert_eq!(evaluate_docker(None, false), Cell::unknown());
    }

    #[test]
    fn test_docker_health_down() {
        let target = actuator(healthy(Some("DOWN"), Some("3.1.0")));
        assert_eq!(
            evaluate_docker(Some(&target), true),
            Cell::error("payments is DOWN")
        );

        let target = actuator(healthy(None, Some("3.1.0")));
        assert_eq!(
            evaluate_docker(Some(&target), true),
            Cell::error("payments is UNKNOWN")
        );
    }

    #[test]
    fn test_docker_health_case_insensitive() {
        let target = actuator(healthy(Some(" up "), Some(" 3.1.0 ")));
        let cell = evaluate_docker(Some(&target), false);

        assert_eq!(cell.status, CellStatus::Ok);
        assert_eq!(cell.text.as_deref(), Some("3.1.0"));
        assert_eq!(cell.title.as_deref(), Some("payments-api"));
    }

    #[test]
    fn test_docker_without_version() {
        let target = actuator(healthy(Some("UP"), None));
        let cell = evaluate_docker(Some(&target), false);

        assert_eq!(cell.status, CellStatus::Unknown);
        assert_eq!(cell.title.as_deref(), Some("payments-api"));
    }

    #[test]
    fn test_docker_scan_error_fallbacks() {
        let mut state = healthy(None, None).unwrap();
        state.outcome_kind = ScanOutcomeKind::Error;
        let target = actuator(Some(state));

        assert_eq!(
            evaluate_docker(Some(&target), true),
            Cell::error("UNKNOWN: Request failed")
        );
    }
}
