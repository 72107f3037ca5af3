//! # Evaluation Results Module
//!
//! Wire types produced by the engine and the generator that assembles them.
//!
//! ## Core Types
//! - [`Dashboard`] - every visible environment with summary and sections
//! - [`EnvironmentStatus`] - flat verdict and issues for one environment
//! - [`Cell`], [`Row`], [`Section`] - the rendered grid
//! - [`GroupSummary`], [`EnvironmentSummary`] - rollups per technology and environment

pub mod generator;
pub mod types;

pub use generator::{DashboardGenerator, DashboardStatistics};
pub use types::*;
