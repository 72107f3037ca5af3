//! Pure evaluation: cells, consistency, rows, sections and the decision
//!
//! Nothing here performs I/O. Every function is a projection of the snapshot
//! it is given.

pub mod cells;
pub mod consistency;
pub mod decision;
pub mod rows;
pub mod sections;
pub mod severity;

pub use cells::CellEvaluator;
pub use consistency::{consistency_cell, reduce_values, Reduction};
pub use decision::{DecisionEngine, DecisionEvaluation};
pub use rows::row_status;
pub use sections::SectionEvaluator;
pub use severity::{escalate, Severity};
