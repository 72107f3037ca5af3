//! Default values for [`super::EngineConfig`]

/// Paths every Tomcat ships with; never part of a role cell
pub const BUILT_IN_WEBAPPS: [&str; 5] = ["/", "/manager", "/host-manager", "/docs", "/examples"];

/// Names shown before a list in a cell message is truncated
pub const PREVIEW_LIMIT: usize = 6;

/// Docker columns that lead the section, in this order
pub const DOCKER_PROFILE_ORDER: [&str; 3] = ["payments", "services", "auth"];

/// Issues returned by an environment status query
pub const MAX_ISSUES: usize = 50;

pub const CPU_WARN: f64 = 0.75;
pub const CPU_BLOCK: f64 = 0.90;

/// 900 MiB
pub const MEMORY_WARN_BYTES: u64 = 900 * 1024 * 1024;
/// 1500 MiB
pub const MEMORY_BLOCK_BYTES: u64 = 1500 * 1024 * 1024;
