//! Expected sets: resolution for evaluation, validation before save

pub mod error;
pub mod resolver;
pub mod store;
pub mod validation;

pub use error::ExpectedSetError;
pub use resolver::ExpectedSetResolver;
pub use store::{ExpectedSetService, ExpectedSetStore, MemoryExpectedSetStore};
pub use validation::{normalize_items, SpecValidator, PROFILE_PATTERN};
