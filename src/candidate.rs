//! Decoding candidates produced by key search

use crate::cipher::CipherKey;

/// One decoding attempt.
///
/// Search strategies create candidates with a zero score; the scorer fills
/// `score` and `confidence` exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateResult {
    /// `None` for an explanatory sentinel that carries no decoding.
    pub key: Option<CipherKey>,
    pub key_display: String,
    pub plaintext: String,
    /// Composite English-likeness in `[0, 1]`.
    pub score: f64,
    /// `round(score * 100)`.
    pub confidence: u8,
}

impl CandidateResult {
    pub fn new(key: CipherKey, plaintext: String) -> Self {
        Self {
            key_display: key.to_string(),
            key: Some(key),
            plaintext,
            score: 0.0,
            confidence: 0,
        }
    }

    /// A result that explains why no search was attempted.
    pub fn sentinel(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: None,
            key_display: label.into(),
            plaintext: message.into(),
            score: 0.0,
            confidence: 0,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.key.is_none()
    }
}

/// The first `n` entries of a ranked list.
pub fn leading(results: &[CandidateResult], n: usize) -> &[CandidateResult] {
    &results[..n.min(results.len())]
}
