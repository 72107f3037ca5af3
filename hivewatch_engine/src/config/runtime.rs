// RUNTIME OVERRIDES (environment variables)

use super::{ConfigError, EngineConfig};

pub const ENV_MAX_ISSUES: &str = "HIVEWATCH_MAX_ISSUES";
pub const ENV_PREVIEW_LIMIT: &str = "HIVEWATCH_PREVIEW_LIMIT";
pub const ENV_LOG_LEVEL: &str = "HIVEWATCH_LOG_LEVEL";
pub const ENV_STRUCTURED_LOGS: &str = "HIVEWATCH_STRUCTURED_LOGS";
pub const ENV_CPU_WARN: &str = "HIVEWATCH_CPU_WARN";
pub const ENV_CPU_BLOCK: &str = "HIVEWATCH_CPU_BLOCK";

/// Overlay set variables onto `config`; unset variables leave it untouched
pub fn apply_overrides<F>(config: &mut EngineConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = parse_var::<usize, _>(&lookup, ENV_MAX_ISSUES)? {
        config.status.max_issues = value;
    }
    if let Some(value) = parse_var::<usize, _>(&lookup, ENV_PREVIEW_LIMIT)? {
        config.evaluation.preview_limit = value;
    }
    if let Some(value) = lookup(ENV_LOG_LEVEL) {
        config.logging.level = value.trim().to_string();
    }
    if let Some(value) = parse_var::<bool, _>(&lookup, ENV_STRUCTURED_LOGS)? {
        config.logging.structured = value;
    }
    if let Some(value) = parse_var::<f64, _>(&lookup, ENV_CPU_WARN)? {
        config.thresholds.cpu_warn = value;
    }
    if let Some(value) = parse_var::<f64, _>(&lookup, ENV_CPU_BLOCK)? {
        config.thresholds.cpu_block = value;
    }
    Ok(())
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                key: key.to_string(),
                reason: format!("cannot parse '{}'", raw),
            }),
    }
}
