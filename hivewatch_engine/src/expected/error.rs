//! Expected-set validation errors

use crate::types::{ExpectedSetMode, ExpectedSetTemplateKind};
use thiserror::Error;
use uuid::Uuid;

/// Reasons a spec is refused before it reaches the store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpectedSetError {
    #[error("Expected set {key}: mode must be EXPLICIT or TEMPLATE")]
    Unconfigured { key: String },

    #[error("Expected set {key}: EXPLICIT mode requires at least one item")]
    EmptyItems { key: String },

    #[error("Expected set {key}: templateId must be null in {mode} mode")]
    TemplateIdNotAllowed { key: String, mode: ExpectedSetMode },

    #[error("Expected set {key}: TEMPLATE mode requires templateId")]
    MissingTemplateId { key: String },

    #[error("Expected set {key}: template {template_id} not found")]
    TemplateNotFound { key: String, template_id: Uuid },

    #[error("Expected set {key}: template kind must be {expected}, found {actual}")]
    TemplateKindMismatch {
        key: String,
        expected: ExpectedSetTemplateKind,
        actual: ExpectedSetTemplateKind,
    },

    #[error("Expected set {key}: webapp path must start with '/': {path}")]
    InvalidPath { key: String, path: String },

    #[error("Expected set {key}: built-in webapp path not allowed: {path}")]
    BuiltInPath { key: String, path: String },

    #[error("Expected set {key}: invalid service profile: {profile}")]
    InvalidProfile { key: String, profile: String },

    #[error("Duplicate expected set for {key}")]
    DuplicateSpec { key: String },

    #[error("User '{username}' may not change expected sets")]
    PermissionDenied { username: String },

    #[error("Expected-set store failed: {0}")]
    Store(String),

    #[error("Invalid validation pattern: {0}")]
    Pattern(String),
}

impl ExpectedSetError {
    /// Whether the caller can fix the input and retry
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            ExpectedSetError::Store(_)
                | ExpectedSetError::Pattern(_)
                | ExpectedSetError::PermissionDenied { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_message() {
        let err = ExpectedSetError::Unconfigured {
            key: "srv".into(),
        };
        assert!(err.to_string().contains("must be EXPLICIT or TEMPLATE"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_store_failure_not_validation() {
        assert!(!ExpectedSetError::Store("disk full".into()).is_validation());
    }
}
