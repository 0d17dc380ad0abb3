use std::error::Error as StdError;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCategory {
    /// Any failure that cannot be confidently attributed to any other error
    /// category in this enum.
    ///
    /// Use of Internal is never a guarantee that the error is not caused by
    /// the user, merely that the code cannot tell.
    Internal,

    /// The user provided an invalid key or input, or asked for something the
    /// engine cannot do.
    User,
}

/// Fine-grained condition flags for consumers that want to branch on error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The key violates its cipher's validity constraint (non-coprime
    /// coefficient, singular Hill matrix, empty keyword, short pad, ...).
    InvalidKey,
    /// The text or job request is malformed (empty ciphertext, unparsable key
    /// text, wrong cipher family for a product leg).
    InvalidInput,
    /// The cipher has no tractable key space to search.
    UnsupportedOperation,
    /// A running crack job was displaced by a newer submission.
    JobSuperseded,
    /// Unexpected state reached inside the engine.
    EngineFault,
    /// Interaction with the filesystem, stdin/stdout, or other I/O failed.
    Io,
}

#[derive(Debug, Error)]
#[error("{msg}")]
pub struct CrackboxError {
    /// Broad error category, always provided.
    pub category: ErrorCategory,
    /// Optional specific condition tag. Any code consuming errors MUST handle
    /// the absence of a defined kind.
    pub kind: Option<ErrorKind>,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    msg: String,
}

impl CrackboxError {
    /// Creates a new error with a required category and display message.
    pub fn new(category: ErrorCategory, msg: impl Into<String>) -> Self {
        Self {
            category,
            kind: None,
            source: None,
            msg: msg.into(),
        }
    }

    /// Creates a new error that also tags the failure with a kind.
    pub fn with_kind(category: ErrorCategory, kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            category,
            kind: Some(kind),
            source: None,
            msg: msg.into(),
        }
    }

    /// Creates a new error that retains the originating source error.
    pub fn with_source(
        category: ErrorCategory,
        msg: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            category,
            kind: None,
            source: Some(Box::new(source)),
            msg: msg.into(),
        }
    }

    /// Creates a new error that carries both a kind tag and the originating source error.
    pub fn with_kind_and_source(
        category: ErrorCategory,
        kind: ErrorKind,
        msg: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            category,
            kind: Some(kind),
            source: Some(Box::new(source)),
            msg: msg.into(),
        }
    }

    /// Shorthand for the most common failure: a key that fails validation.
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorCategory::User, ErrorKind::InvalidKey, msg)
    }

    /// Shorthand for malformed text or job input.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorCategory::User, ErrorKind::InvalidInput, msg)
    }

    /// Shorthand for internal engine faults.
    pub fn engine_fault(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorCategory::Internal, ErrorKind::EngineFault, msg)
    }

    /// The user-facing message carried by the error.
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Returns the preserved source error if present.
    pub fn source_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    /// Wraps the current error with a higher-level message while preserving the original as source.
    pub fn with_context(self, msg: impl Into<String>) -> Self {
        let category = self.category;
        let kind = self.kind;
        Self {
            category,
            kind,
            source: Some(Box::new(self)),
            msg: msg.into(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CrackboxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context_keeps_kind_and_source() {
        let err = CrackboxError::invalid_key("multiplier 13 is not coprime with 26");
        let wrapped = err.with_context("encode failed");

        assert_eq!(wrapped.kind, Some(ErrorKind::InvalidKey));
        assert_eq!(wrapped.category, ErrorCategory::User);
        assert_eq!(wrapped.to_string(), "encode failed");
        let source = wrapped.source_error().expect("source retained");
        assert_eq!(source.to_string(), "multiplier 13 is not coprime with 26");
    }

    #[test]
    fn test_engine_fault_is_internal() {
        let err = CrackboxError::engine_fault("worker vanished");
        assert_eq!(err.category, ErrorCategory::Internal);
        assert_eq!(err.kind, Some(ErrorKind::EngineFault));
        assert_eq!(err.message(), "worker vanished");
    }
}
