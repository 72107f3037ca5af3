//! Input data model: targets, scan states, expected sets and snapshots

pub mod common;
pub mod expected;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod target;

pub use common::{ScanErrorKind, ScanOutcomeKind, TomcatRole};
pub use expected::{
    DockerExpectedServicesSpec, ExpectedSetMode, ExpectedSetSpec, ExpectedSetTemplate,
    ExpectedSetTemplateKind, TomcatExpectedWebappsSpec,
};
pub use session::{HiveWatchRole, Session};
pub use snapshot::{DashboardInput, EnvironmentSnapshot};
pub use state::{ActuatorTargetState, ScanSnapshot, TomcatTargetState, Webapp};
pub use target::{ActuatorTarget, Server, TomcatTarget};
