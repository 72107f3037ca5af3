//! Environment decision: flat issue list and verdict
//!
//! Every configured target contributes at most one issue. Tomcat targets
//! report only missing or failed scans; actuator targets additionally report
//! health and resource pressure against [`ThresholdConfig`].

use super::severity::{escalate, tally};
use crate::config::ThresholdConfig;
use crate::results::{DecisionIssue, DecisionIssueKind, DecisionVerdict};
use crate::types::{ActuatorTarget, ActuatorTargetState, EnvironmentSnapshot, ScanSnapshot, TomcatTarget};

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionEvaluation {
    pub verdict: DecisionVerdict,
    pub issues: Vec<DecisionIssue>,
    pub block_issues: usize,
    pub warn_issues: usize,
    pub unknown_issues: usize,
}

impl DecisionEvaluation {
    /// Fold issues into the verdict and per-severity counts
    pub fn from_issues(issues: Vec<DecisionIssue>) -> Self {
        let counts = tally(
            issues.iter().map(|i| i.severity),
            &[DecisionVerdict::Block, DecisionVerdict::Warn, DecisionVerdict::Unknown],
        );
        Self {
            verdict: escalate(issues.iter().map(|i| i.severity), DecisionVerdict::Ok),
            block_issues: counts[0],
            warn_issues: counts[1],
            unknown_issues: counts[2],
            issues,
        }
    }
}

pub struct DecisionEngine<'a> {
    thresholds: &'a ThresholdConfig,
}

impl<'a> DecisionEngine<'a> {
    pub fn new(thresholds: &'a ThresholdConfig) -> Self {
        Self { thresholds }
    }

    /// Tomcat issues first, then actuator issues, each in input order
    pub fn evaluate(&self, env: &EnvironmentSnapshot) -> DecisionEvaluation {
        let tomcat_issues = env
            .tomcat_targets
            .iter()
            .filter_map(|t| self.tomcat_issue(env, t));
        let actuator_issues = env
            .actuator_targets
            .iter()
            .filter_map(|t| self.actuator_issue(env, t));

        DecisionEvaluation::from_issues(tomcat_issues.chain(actuator_issues).collect())
    }

    fn tomcat_issue(&self, env: &EnvironmentSnapshot, target: &TomcatTarget) -> Option<DecisionIssue> {
        let (severity, message) = match &target.state {
            None => (DecisionVerdict::Unknown, "Not scanned".to_string()),
            Some(state) if state.is_error() => (DecisionVerdict::Block, state.issue_failure()),
            Some(_) => return None,
        };

        Some(DecisionIssue {
            severity,
            kind: DecisionIssueKind::TomcatTarget,
            target_id: target.id,
            server_name: env.server_name(target.server_id),
            role: target.role,
            label: format!("Tomcat {}", target.role.as_lowercase()),
            message,
        })
    }

    fn actuator_issue(&self, env: &EnvironmentSnapshot, target: &ActuatorTarget) -> Option<DecisionIssue> {
        let (severity, message) = match &target.state {
            None => (DecisionVerdict::Unknown, "Not scanned".to_string()),
            Some(state) if state.is_error() => (DecisionVerdict::Block, state.issue_failure()),
            Some(state) => self.assess_runtime(state)?,
        };

        Some(DecisionIssue {
            severity,
            kind: DecisionIssueKind::ActuatorTarget,
            target_id: target.id,
            server_name: env.server_name(target.server_id),
            role: target.role,
            label: format!("Microservice {}", target.profile),
            message,
        })
    }

    /// Health, CPU and memory findings for a successful scan
    fn assess_runtime(&self, state: &ActuatorTargetState) -> Option<(DecisionVerdict, String)> {
        let mut findings: Vec<(DecisionVerdict, String)> = Vec::new();

        let health = state.health_status.as_deref().map(str::trim).unwrap_or("");
        if !health.eq_ignore_ascii_case("UP") {
            let shown = if health.is_empty() {
                "UNKNOWN".to_string()
            } else {
                health.to_uppercase()
            };
            findings.push((DecisionVerdict::Block, format!("health={}", shown)));
        }

        if let Some(cpu) = state.cpu_usage {
            let level = self.level(cpu, self.thresholds.cpu_warn, self.thresholds.cpu_block);
            push_finding(&mut findings, level, || format!("cpu={}", format_percent(cpu)));
        }

        if let Some(memory) = state.memory_used_bytes {
            let level = self.level(
                memory as f64,
                self.thresholds.memory_warn_bytes as f64,
                self.thresholds.memory_block_bytes as f64,
            );
            push_finding(&mut findings, level, || format!("memory={}", format_bytes(memory)));
        }

        if findings.is_empty() {
            return None;
        }

        let severity = escalate(findings.iter().map(|(level, _)| *level), DecisionVerdict::Ok);
        let parts = findings
            .into_iter()
            .map(|(_, part)| part)
            .collect::<Vec<_>>()
            .join(", ");
        let message = match state.app_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            Some(app) => format!("{} · {}", app, parts),
            None => parts,
        };

        Some((severity, message))
    }

    fn level(&self, value: f64, warn: f64, block: f64) -> Option<DecisionVerdict> {
        if value >= block {
            Some(DecisionVerdict::Block)
        } else if value >= warn {
            Some(DecisionVerdict::Warn)
        } else {
            None
        }
    }
}

/// A WARN finding adds nothing once the target is already blocked
fn push_finding<F>(findings: &mut Vec<(DecisionVerdict, String)>, level: Option<DecisionVerdict>, part: F)
where
    F: FnOnce() -> String,
{
    let Some(level) = level else {
        return;
    };
    let blocked = findings.iter().any(|(l, _)| *l == DecisionVerdict::Block);
    if level == DecisionVerdict::Warn && blocked {
        return;
    }
    findings.push((level, part()));
}

/// Ratio as a percentage with one decimal: `0.923` → `92.3%`
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", (ratio * 1000.0).round() / 10.0)
}

/// Whole MiB below 1 GiB, otherwise GiB with one decimal
pub fn format_bytes(bytes: u64) -> String {
    let mib = bytes as f64 / (1024.0 * 1024.0);
    if mib < 1024.0 {
        format!("{}MB", mib.round() as u64)
    } else {
        format!("{:.1}GB", (mib / 1024.0 * 10.0).round() / 10.0)
    }
}
