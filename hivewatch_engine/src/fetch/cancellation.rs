//! Cancellation flag shared by every fetch of one request

use super::source::{FetchError, ResourceKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag; clones observe the same flag
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Checkpoint for sources between blocking steps
    pub fn check(&self, resource: ResourceKind) -> Result<(), FetchError> {
        if self.is_cancelled() {
            Err(FetchError::Cancelled { resource })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_clones_share_flag() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(clone.check(ResourceKind::Servers).is_ok());

        token.cancel();
        assert!(clone.is_cancelled());
        assert_matches!(
            clone.check(ResourceKind::Servers),
            Err(FetchError::Cancelled {
                resource: ResourceKind::Servers
            })
        );
    }
}
