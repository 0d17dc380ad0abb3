//! Engine tunables

/// Limits used by key search and job orchestration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Candidates delivered after ranking.
    pub max_results: usize,
    /// How many top candidates callers highlight.
    pub leading_candidates: usize,
    pub rail_fence_max_rails: usize,
    pub keyless_max_columns: usize,
    pub vigenere_max_key_len: usize,
    /// Key lengths kept after IC ranking.
    pub vigenere_lengths_kept: usize,
    pub hill_max_candidates: usize,
    /// Upper bound (inclusive) of each Hill coefficient tried in the sweep.
    pub hill_coefficient_max: i64,
    /// Candidates decoded between cancellation checks.
    pub cancel_check_interval: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_results: 50,
            leading_candidates: 5,
            rail_fence_max_rails: 20,
            keyless_max_columns: 10,
            vigenere_max_key_len: 15,
            vigenere_lengths_kept: 5,
            hill_max_candidates: 100,
            hill_coefficient_max: 9,
            cancel_check_interval: 64,
        }
    }
}

impl EngineConfig {
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_leading_candidates(mut self, leading: usize) -> Self {
        self.leading_candidates = leading;
        self
    }

    pub fn with_hill_max_candidates(mut self, max: usize) -> Self {
        self.hill_max_candidates = max;
        self
    }

    pub fn with_vigenere_max_key_len(mut self, max: usize) -> Self {
        self.vigenere_max_key_len = max;
        self
    }
}
