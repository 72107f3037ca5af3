//! # HiveWatch Engine
//!
//! Status aggregation and decision engine. Folds per-target scan snapshots
//! into cells, rows, sections and one verdict per environment.

pub mod api;
pub mod config;
pub mod evaluation;
pub mod expected;
pub mod fetch;
#[macro_use]
pub mod logging;
pub mod results;
pub mod types;

// Re-export key types for library consumers
pub use api::{ProcessorError, SnapshotProcessor};
pub use config::{ConfigError, EngineConfig};
pub use results::{Dashboard, DashboardGenerator, EnvironmentStatus};

pub mod prelude {
    pub use crate::api::{
        ProcessorError, SnapshotProcessor, SpecDocument, SpecValidationReport,
    };
    pub use crate::config::{ConfigError, EngineConfig};
    pub use crate::evaluation::{DecisionEngine, SectionEvaluator};
    pub use crate::expected::{ExpectedSetError, ExpectedSetResolver, ExpectedSetService};
    pub use crate::fetch::{
        CancellationToken, EnvironmentLoader, EnvironmentSource, EnvironmentView, FetchError,
        LoadState,
    };
    pub use crate::results::{
        Cell, CellStatus, Dashboard, DashboardGenerator, DecisionIssue, DecisionVerdict,
        EnvironmentStatus, RowStatus, Section,
    };
    pub use crate::types::{DashboardInput, EnvironmentSnapshot, Session, TomcatRole};
}
