//! Cooperative cancellation by generation counter

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{CrackboxError, ErrorCategory, ErrorKind, Result};

/// Snapshot of a shared generation counter.
///
/// The token is live while the counter still holds the value it was issued
/// with. Bumping the counter cancels every outstanding token at once.
#[derive(Debug, Clone)]
pub struct CancelToken {
    generation: Arc<AtomicU64>,
    issued: u64,
}

impl CancelToken {
    /// A token that is never cancelled.
    pub fn never() -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            issued: 0,
        }
    }

    /// Advances `generation`, cancelling older tokens, and returns a token
    /// for the new generation.
    pub fn advance(generation: &Arc<AtomicU64>) -> Self {
        let issued = generation.fetch_add(1, Ordering::SeqCst) + 1;
        Self {
            generation: Arc::clone(generation),
            issued,
        }
    }

    pub fn generation(&self) -> u64 {
        self.issued
    }

    pub fn is_cancelled(&self) -> bool {
        self.generation.load(Ordering::SeqCst) != self.issued
    }

    /// Fails with [`ErrorKind::JobSuperseded`] once cancelled.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(CrackboxError::with_kind(
                ErrorCategory::User,
                ErrorKind::JobSuperseded,
                format!("crack job {} was superseded by a newer job", self.issued),
            ));
        }
        Ok(())
    }
}
