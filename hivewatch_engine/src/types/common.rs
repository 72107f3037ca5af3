//! Enumerations shared by targets, scan states and results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a Tomcat instance plays on its server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TomcatRole {
    Payments,
    Services,
    Auth,
}

impl TomcatRole {
    /// Column order of the Tomcat section
    pub const COLUMN_ORDER: [TomcatRole; 3] =
        [TomcatRole::Services, TomcatRole::Auth, TomcatRole::Payments];

    pub fn as_str(&self) -> &'static str {
        match self {
            TomcatRole::Payments => "PAYMENTS",
            TomcatRole::Services => "SERVICES",
            TomcatRole::Auth => "AUTH",
        }
    }

    pub fn as_lowercase(&self) -> &'static str {
        match self {
            TomcatRole::Payments => "payments",
            TomcatRole::Services => "services",
            TomcatRole::Auth => "auth",
        }
    }
}

impl fmt::Display for TomcatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a scan reached the target and parsed its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanOutcomeKind {
    Success,
    Error,
}

/// Failure category reported by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanErrorKind {
    Auth,
    Connectivity,
    Timeout,
    Http,
    Parse,
    Unknown,
}

impl ScanErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanErrorKind::Auth => "AUTH",
            ScanErrorKind::Connectivity => "CONNECTIVITY",
            ScanErrorKind::Timeout => "TIMEOUT",
            ScanErrorKind::Http => "HTTP",
            ScanErrorKind::Parse => "PARSE",
            ScanErrorKind::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
