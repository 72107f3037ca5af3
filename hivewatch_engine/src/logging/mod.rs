//! Global logging module for the HiveWatch engine
//!
//! Coded events routed through one process-wide [`LoggingService`]. Before
//! the service is initialized every event still reaches the `log` facade, so
//! library users that only install `env_logger` see engine output too.

pub mod codes;
pub mod events;
pub mod macros;
pub mod service;

use crate::config::LoggingConfig;
use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{FacadeLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static ENVIRONMENT_CONTEXT: RefCell<Option<String>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging from the `[logging]` configuration table
pub fn init_global_logging(config: &LoggingConfig) -> Result<(), String> {
    let service = Arc::new(LoggingService::with_config(config));

    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized")?;

    service.log_event(
        LogEvent::success(
            codes::success::SYSTEM_INITIALIZATION_COMPLETED,
            "Global logging system initialized",
        )
        .with_context("level", config.min_level().as_str())
        .with_context("structured", &config.structured.to_string()),
    );

    Ok(())
}

/// Initialize with custom service (primarily for testing)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// ENVIRONMENT CONTEXT
// ============================================================================

/// Run `f` with every event on this thread tagged `environment=<name>`
pub fn with_environment_context<F, R>(environment: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = ENVIRONMENT_CONTEXT.with(|ctx| ctx.replace(Some(environment.to_string())));
    let result = f();
    ENVIRONMENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = previous;
    });
    result
}

pub fn current_environment_context() -> Option<String> {
    ENVIRONMENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Attach context pairs and the thread's environment, then dispatch
pub fn dispatch(mut event: LogEvent, context: Vec<(&str, &str)>) {
    for (key, value) in context {
        event = event.with_context(key, value);
    }

    if let Some(environment) = current_environment_context() {
        event = event.with_context("environment", &environment);
    }

    match try_get_global_logger() {
        Some(logger) => logger.log_event(event),
        None => service::forward_to_facade(&event),
    }
}

pub fn log_error_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::error(code, message), context);
}

pub fn log_warning_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::warning_with_code(code, message), context);
}

pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::success(code, message), context);
}

pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::info(message), context);
}

pub fn log_debug_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::debug(message), context);
}
