//! # Evaluation Result Types
//!
//! Wire types emitted by the engine. Field names serialize in camelCase and
//! enums as SCREAMING_SNAKE_CASE so the JSON matches what the dashboard and
//! status endpoints serve. Absent optional fields serialize as `null`.
//!
//! Status enums declare their variants in ascending severity, so the derived
//! `Ord` is the escalation order used by every aggregation level.

use crate::types::TomcatRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a single cell: `OK < UNKNOWN < ERROR`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellStatus {
    Ok,
    Unknown,
    Error,
}

/// Status of a row or technology group: `OK < UNKNOWN < BLOCK`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowStatus {
    Ok,
    Unknown,
    Block,
}

/// Group summaries use the row scale
pub type GroupStatus = RowStatus;

impl From<CellStatus> for RowStatus {
    fn from(status: CellStatus) -> Self {
        match status {
            CellStatus::Ok => RowStatus::Ok,
            CellStatus::Unknown => RowStatus::Unknown,
            CellStatus::Error => RowStatus::Block,
        }
    }
}

/// Environment verdict and issue severity: `OK < UNKNOWN < WARN < BLOCK`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionVerdict {
    Ok,
    Unknown,
    Warn,
    Block,
}

impl DecisionVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionVerdict::Ok => "OK",
            DecisionVerdict::Unknown => "UNKNOWN",
            DecisionVerdict::Warn => "WARN",
            DecisionVerdict::Block => "BLOCK",
        }
    }
}

impl std::fmt::Display for DecisionVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Smallest unit of rendered status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub status: CellStatus,

    /// Display value when OK (a version, an OS string)
    pub text: Option<String>,

    /// Diagnostic when ERROR; the app name on Docker cells
    pub title: Option<String>,
}

impl Cell {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            status: CellStatus::Ok,
            text: Some(text.into()),
            title: None,
        }
    }

    pub fn unknown() -> Self {
        Self {
            status: CellStatus::Unknown,
            text: None,
            title: None,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            status: CellStatus::Error,
            text: None,
            title: Some(title.into()),
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub key: String,
    pub label: String,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// One server within a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Server id
    pub id: Uuid,

    /// Server name
    pub label: String,

    /// Drill-down route, Docker rows only
    pub link: Option<String>,

    /// One cell per section column, in column order
    pub cells: Vec<Cell>,

    pub status: RowStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionKind {
    Tomcats,
    Docker,
    Aws,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub kind: SectionKind,
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

/// Per-technology rollup shown in the environment header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub status: GroupStatus,

    /// Configured targets in the group
    pub targets: usize,

    /// Newest `scannedAt` among the group's targets
    pub last_scan_at: Option<DateTime<Utc>>,
}

impl GroupSummary {
    /// Nothing configured is not verified-healthy
    pub fn unconfigured() -> Self {
        Self {
            status: RowStatus::Unknown,
            targets: 0,
            last_scan_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentSummary {
    pub tomcats: GroupSummary,
    pub docker: GroupSummary,
    pub aws: GroupSummary,
    pub verdict: DecisionVerdict,
    pub block_issues: usize,
    pub warn_issues: usize,
    pub unknown_issues: usize,
    pub evaluated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionIssueKind {
    TomcatTarget,
    ActuatorTarget,
}

/// One concrete problem contributing to a verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionIssue {
    pub severity: DecisionVerdict,
    pub kind: DecisionIssueKind,
    pub target_id: Uuid,
    pub server_name: String,
    pub role: TomcatRole,
    pub label: String,
    pub message: String,
}

/// One environment on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentBlock {
    pub id: Uuid,
    pub name: String,
    pub summary: EnvironmentSummary,
    /// Tomcats, Docker, AWS in that order
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Sorted by environment name
    pub environments: Vec<EnvironmentBlock>,
}

/// Flat verdict for a single environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentStatus {
    pub environment_id: Uuid,
    pub environment_name: String,
    pub verdict: DecisionVerdict,
    pub evaluated_at: DateTime<Utc>,
    pub issues: Vec<DecisionIssue>,
}
