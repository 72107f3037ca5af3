//! # Dashboard Generator
//!
//! Runs the evaluators over environment snapshots and assembles the wire
//! types served by the dashboard and status endpoints.

use crate::config::EngineConfig;
use crate::evaluation::decision::{DecisionEngine, DecisionEvaluation};
use crate::evaluation::sections::{group_summary, newest_scan, SectionEvaluator};
use crate::expected::ExpectedSetResolver;
use crate::logging::{codes, with_environment_context};
use crate::results::{
    Dashboard, DecisionVerdict, EnvironmentBlock, EnvironmentStatus, EnvironmentSummary, RowStatus,
};
use crate::types::{DashboardInput, EnvironmentSnapshot, Session};
use crate::{log_debug, log_success};
use chrono::{DateTime, Utc};

/// Builds dashboards and environment statuses from snapshots
pub struct DashboardGenerator<'a> {
    config: &'a EngineConfig,
}

impl<'a> DashboardGenerator<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Every environment `session` may see, sorted by name
    pub fn dashboard(&self, input: &DashboardInput, session: &Session, now: DateTime<Utc>) -> Dashboard {
        let mut environments: Vec<EnvironmentBlock> = input
            .environments
            .iter()
            .filter(|env| session.can_see(env.id))
            .map(|env| self.environment_block(env, now))
            .collect();
        environments.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        let dashboard = Dashboard { environments };
        let stats = DashboardStatistics::from_dashboard(&dashboard);
        log_success!(
            codes::success::DASHBOARD_EVALUATED,
            "Dashboard evaluated",
            "environments" => stats.environments,
            "rows" => stats.rows,
            "blocked" => stats.blocked_environments
        );
        dashboard
    }

    /// Summary plus Tomcats, Docker and AWS sections for one environment
    pub fn environment_block(&self, env: &EnvironmentSnapshot, now: DateTime<Utc>) -> EnvironmentBlock {
        with_environment_context(&env.name, || {
            let resolver = ExpectedSetResolver::for_environment(env);
            let sections = SectionEvaluator::new(&self.config.evaluation);

            let tomcat_section = sections.tomcat_section(env, &resolver);
            let docker_section = sections.docker_section(env, &resolver);
            let aws_section = sections.aws_section();

            let tomcats = group_summary(
                &tomcat_section,
                env.tomcat_targets.len(),
                newest_scan(env.tomcat_targets.iter().map(|t| t.state.as_ref())),
            );
            let docker = group_summary(
                &docker_section,
                env.actuator_targets.len(),
                newest_scan(env.actuator_targets.iter().map(|t| t.state.as_ref())),
            );
            let aws = group_summary(&aws_section, 0, None);

            let decision = self.decide(env);
            log_debug!(
                "Environment evaluated",
                "tomcats" => format!("{:?}", tomcats.status),
                "docker" => format!("{:?}", docker.status),
                "verdict" => decision.verdict
            );

            EnvironmentBlock {
                id: env.id,
                name: env.name.clone(),
                summary: EnvironmentSummary {
                    tomcats,
                    docker,
                    aws,
                    verdict: decision.verdict,
                    block_issues: decision.block_issues,
                    warn_issues: decision.warn_issues,
                    unknown_issues: decision.unknown_issues,
                    evaluated_at: now,
                },
                sections: vec![tomcat_section, docker_section, aws_section],
            }
        })
    }

    /// Verdict over every issue; the returned list is capped at `max_issues`
    pub fn environment_status(&self, env: &EnvironmentSnapshot, now: DateTime<Utc>) -> EnvironmentStatus {
        let mut decision = self.decide(env);
        decision.issues.truncate(self.config.status.max_issues);

        log_success!(
            codes::success::STATUS_EVALUATED,
            "Environment status evaluated",
            "environment" => env.name,
            "verdict" => decision.verdict,
            "issues" => decision.issues.len()
        );

        EnvironmentStatus {
            environment_id: env.id,
            environment_name: env.name.clone(),
            verdict: decision.verdict,
            evaluated_at: now,
            issues: decision.issues,
        }
    }

    pub fn decide(&self, env: &EnvironmentSnapshot) -> DecisionEvaluation {
        DecisionEngine::new(&self.config.thresholds).evaluate(env)
    }
}

/// Counts logged after a dashboard evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStatistics {
    pub environments: usize,
    pub rows: usize,
    pub blocked_rows: usize,
    pub blocked_environments: usize,
}

impl DashboardStatistics {
    pub fn from_dashboard(dashboard: &Dashboard) -> Self {
        let mut stats = Self {
            environments: dashboard.environments.len(),
            ..Self::default()
        };
        for env in &dashboard.environments {
            if env.summary.verdict == DecisionVerdict::Block {
                stats.blocked_environments += 1;
            }
            for section in &env.sections {
                stats.rows += section.rows.len();
                stats.blocked_rows += section
                    .rows
                    .iter()
                    .filter(|r| r.status == RowStatus::Block)
                    .count();
            }
        }
        stats
    }
}
