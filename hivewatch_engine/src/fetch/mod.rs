//! # Input Acquisition
//!
//! Plumbing between a resource source and the pure evaluators:
//! - [`LoadState`] - loading, ready or error per resource
//! - [`CancellationToken`] - shared flag checked by sources
//! - [`RequestTracker`] - generations so superseded responses are dropped
//! - [`EnvironmentLoader`] - parallel fetch of one environment's resources
//! - [`EnvironmentView`] - per-section evaluation over ready resources

pub mod cancellation;
pub mod load_state;
pub mod loader;
pub mod source;
pub mod tracker;

pub use cancellation::CancellationToken;
pub use load_state::LoadState;
pub use loader::{EnvironmentLoader, EnvironmentView};
pub use source::{EnvironmentSource, FetchError, ResourceKind, SnapshotSource};
pub use tracker::{RequestTicket, RequestTracker};
