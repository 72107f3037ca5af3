//! Section building and group rollups for one environment

use super::cells::CellEvaluator;
use super::consistency::consistency_cell;
use super::rows::{build_row, sort_rows};
use super::severity::escalate;
use crate::config::EvaluationConfig;
use crate::expected::ExpectedSetResolver;
use crate::results::{Column, GroupSummary, Row, RowStatus, Section, SectionKind};
use crate::types::{
    ActuatorTarget, EnvironmentSnapshot, ScanSnapshot, TomcatRole, TomcatTarget, TomcatTargetState,
};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};
use uuid::Uuid;

pub const TOMCATS_TITLE: &str = "Tomcats";
pub const DOCKER_TITLE: &str = "Docker Swarm";
pub const AWS_TITLE: &str = "AWS (placeholder)";

pub struct SectionEvaluator<'a> {
    config: &'a EvaluationConfig,
    cells: CellEvaluator<'a>,
}

impl<'a> SectionEvaluator<'a> {
    pub fn new(config: &'a EvaluationConfig) -> Self {
        Self {
            config,
            cells: CellEvaluator::new(config),
        }
    }

    /// One row per server with Tomcat targets: a cell per role, then the
    /// Tomcat, Java and OS consistency cells
    pub fn tomcat_section(&self, env: &EnvironmentSnapshot, resolver: &ExpectedSetResolver<'_>) -> Section {
        let mut columns: Vec<Column> = TomcatRole::COLUMN_ORDER
            .iter()
            .map(|role| Column::new(role.as_str(), title_case(role.as_lowercase())))
            .collect();
        columns.push(Column::new("TOMCAT", "Tomcat"));
        columns.push(Column::new("JAVA", "Java"));
        columns.push(Column::new("OS", "OS"));

        // a later target for the same server and role replaces an earlier one
        let mut by_server: BTreeMap<Uuid, HashMap<TomcatRole, &TomcatTarget>> = BTreeMap::new();
        for target in &env.tomcat_targets {
            by_server
                .entry(target.server_id)
                .or_default()
                .insert(target.role, target);
        }

        let mut rows: Vec<Row> = by_server
            .into_iter()
            .map(|(server_id, by_role)| {
                let mut cells: Vec<_> = TomcatRole::COLUMN_ORDER
                    .iter()
                    .map(|role| {
                        let expected =
                            resolver.tomcat_webapps(&env.tomcat_expected_specs, server_id, *role);
                        self.cells
                            .tomcat_role_cell(*role, by_role.get(role).copied(), &expected)
                    })
                    .collect();

                let states: Vec<Option<&TomcatTargetState>> = TomcatRole::COLUMN_ORDER
                    .iter()
                    .map(|role| by_role.get(role).and_then(|t| t.state.as_ref()))
                    .collect();
                cells.push(consistency_cell(
                    states.iter().map(|s| s.and_then(|s| s.tomcat_version.as_deref())),
                ));
                cells.push(consistency_cell(
                    states.iter().map(|s| s.and_then(|s| s.java_version.as_deref())),
                ));
                cells.push(consistency_cell(
                    states.iter().map(|s| s.and_then(|s| s.os.as_deref())),
                ));

                build_row(server_id, env.server_name(server_id), None, cells)
            })
            .collect();

        sort_rows(&mut rows);
        Section {
            kind: SectionKind::Tomcats,
            title: TOMCATS_TITLE.to_string(),
            columns,
            rows,
        }
    }

    /// One row per server with actuator targets, one column per profile
    /// deployed or expected anywhere in the environment
    pub fn docker_section(&self, env: &EnvironmentSnapshot, resolver: &ExpectedSetResolver<'_>) -> Section {
        if env.actuator_targets.is_empty() {
            return Section {
                kind: SectionKind::Docker,
                title: DOCKER_TITLE.to_string(),
                columns: Vec::new(),
                rows: Vec::new(),
            };
        }

        let mut by_server: BTreeMap<Uuid, HashMap<&str, &ActuatorTarget>> = BTreeMap::new();
        let mut profiles: Vec<String> = Vec::new();
        for target in &env.actuator_targets {
            by_server
                .entry(target.server_id)
                .or_default()
                .insert(target.profile_key(), target);
            profiles.push(target.profile_key().to_string());
        }

        let expected_by_server: HashMap<Uuid, HashSet<String>> = by_server
            .keys()
            .map(|server_id| {
                let expected = resolver.docker_services(&env.docker_expected_specs, *server_id);
                profiles.extend(expected.iter().cloned());
                (*server_id, expected.into_iter().collect())
            })
            .collect();

        let profiles = self.order_profiles(profiles);
        let columns = profiles.iter().map(|p| Column::new(p.as_str(), p.as_str())).collect();

        let mut rows: Vec<Row> = by_server
            .into_iter()
            .map(|(server_id, by_profile)| {
                let expected = expected_by_server.get(&server_id);
                let cells = profiles
                    .iter()
                    .map(|profile| {
                        let is_expected = expected.is_some_and(|set| set.contains(profile));
                        self.cells.docker_service_cell(
                            profile,
                            by_profile.get(profile.as_str()).copied(),
                            is_expected,
                        )
                    })
                    .collect();
                let link = format!("/dashboard/docker/{}/{}", env.id, server_id);
                build_row(server_id, env.server_name(server_id), Some(link), cells)
            })
            .collect();

        sort_rows(&mut rows);
        Section {
            kind: SectionKind::Docker,
            title: DOCKER_TITLE.to_string(),
            columns,
            rows,
        }
    }

    pub fn aws_section(&self) -> Section {
        Section {
            kind: SectionKind::Aws,
            title: AWS_TITLE.to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Pinned profiles first in configured order, then case-insensitive
    fn order_profiles(&self, profiles: Vec<String>) -> Vec<String> {
        let mut unique: Vec<String> = Vec::new();
        for profile in profiles {
            if !unique.contains(&profile) {
                unique.push(profile);
            }
        }

        let pinned = &self.config.docker_profile_order;
        unique.sort_by_cached_key(|p| {
            (
                pinned.iter().position(|o| o == p).unwrap_or(usize::MAX),
                p.to_lowercase(),
                p.clone(),
            )
        });
        unique
    }
}

/// Rollup of a section: severity fold over its rows, UNKNOWN when empty
pub fn group_summary(
    section: &Section,
    targets: usize,
    last_scan_at: Option<DateTime<Utc>>,
) -> GroupSummary {
    GroupSummary {
        status: escalate(section.rows.iter().map(|r| r.status), RowStatus::Unknown),
        targets,
        last_scan_at,
    }
}

/// Newest scan time among `states`
pub fn newest_scan<'s, S, I>(states: I) -> Option<DateTime<Utc>>
where
    S: ScanSnapshot + 's,
    I: IntoIterator<Item = Option<&'s S>>,
{
    states.into_iter().flatten().map(|s| s.scanned_at()).max()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
