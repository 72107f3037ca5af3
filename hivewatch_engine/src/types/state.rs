//! Scan results produced by the external scanner
//!
//! A state is either a success carrying a payload or an error carrying a
//! kind and message. A target with no state has never been scanned.

use super::common::{ScanErrorKind, ScanOutcomeKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One deployed webapp as reported by the Tomcat manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webapp {
    pub path: String,
    pub name: String,
    pub version: Option<String>,
}

impl Webapp {
    /// Trimmed version, `None` when absent or blank
    pub fn reported_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TomcatTargetState {
    pub scanned_at: DateTime<Utc>,
    pub outcome_kind: ScanOutcomeKind,
    #[serde(default)]
    pub error_kind: Option<ScanErrorKind>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub tomcat_version: Option<String>,
    #[serde(default)]
    pub java_version: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub webapps: Vec<Webapp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActuatorTargetState {
    pub scanned_at: DateTime<Utc>,
    pub outcome_kind: ScanOutcomeKind,
    #[serde(default)]
    pub error_kind: Option<ScanErrorKind>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub health_status: Option<String>,
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub build_version: Option<String>,
    /// Process CPU as a ratio in 0..1
    #[serde(default)]
    pub cpu_usage: Option<f64>,
    #[serde(default)]
    pub memory_used_bytes: Option<u64>,
}

/// Common view over both scan state kinds
pub trait ScanSnapshot {
    fn scanned_at(&self) -> DateTime<Utc>;
    fn outcome_kind(&self) -> ScanOutcomeKind;
    fn error_kind(&self) -> Option<ScanErrorKind>;
    fn error_message(&self) -> Option<&str>;

    fn is_error(&self) -> bool {
        self.outcome_kind() == ScanOutcomeKind::Error
    }

    /// `"<kind>: <message>"` as shown in a cell
    fn cell_failure(&self) -> String {
        format_failure(self.error_kind(), self.error_message(), "UNKNOWN", "Request failed")
    }

    /// `"<kind>: <message>"` as carried by a decision issue
    fn issue_failure(&self) -> String {
        format_failure(self.error_kind(), self.error_message(), "ERROR", "Unknown error")
    }
}

fn format_failure(
    kind: Option<ScanErrorKind>,
    message: Option<&str>,
    kind_fallback: &str,
    message_fallback: &str,
) -> String {
    let kind = kind.map(|k| k.as_str()).unwrap_or(kind_fallback);
    let message = message
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(message_fallback);
    format!("{}: {}", kind, message)
}

macro_rules! impl_scan_snapshot {
    ($state:ty) => {
        impl ScanSnapshot for $state {
            fn scanned_at(&self) -> DateTime<Utc> {
                self.scanned_at
            }

            fn outcome_kind(&self) -> ScanOutcomeKind {
                self.outcome_kind
            }

            fn error_kind(&self) -> Option<ScanErrorKind> {
                self.error_kind
            }

            fn error_message(&self) -> Option<&str> {
                self.error_message.as_deref()
            }
        }
    };
}

impl_scan_snapshot!(TomcatTargetState);
impl_scan_snapshot!(ActuatorTargetState);
