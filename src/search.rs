//! Key-search strategies
//!
//! Each cipher gets one of four strategies:
//! - exhaustive enumeration (Additive, Multiplicative, Affine, Autokey, Rail
//!   fence, Keyless transposition);
//! - IC-guided reduction (Vigenère);
//! - dictionary attack over curated keywords or matrices (Playfair, Columnar,
//!   Double transposition, Hill, Product);
//! - a single explanatory sentinel for ciphers with no tractable key space.
//!
//! Every strategy returns an unscored list in enumeration order.

use std::fmt;

use tracing::{debug, trace};

use crate::alphabet::{self, from_index, indices, letters_only};
use crate::analysis::rank_key_lengths;
use crate::cancel::CancelToken;
use crate::candidate::CandidateResult;
use crate::cipher::{CipherKey, CipherType, HillMatrix, ProductOptions, hill};
use crate::config::EngineConfig;
use crate::error::{CrackboxError, ErrorCategory, ErrorKind, Result};

/// Keywords tried by the Playfair, Columnar and Double transposition attacks.
pub const CANDIDATE_KEYWORDS: &[&str] = &[
    "KEY", "SECRET", "CIPHER", "CRYPTO", "CRYPTOGRAPHY", "PASSWORD", "MONARCHY", "PLAYFAIR",
    "PLAYFAIREXAMPLE", "ZEBRA", "ZEBRAS", "LEMON", "GERMAN", "SECURITY", "HIDDEN", "ENIGMA",
    "CODE", "MESSAGE", "QUEEN", "KING", "WORLD", "HELLO", "ALPHA", "BRAVO", "CHARLIE", "DELTA",
    "ORANGE", "APPLE", "TIGER", "DRAGON",
];

/// Textbook Hill matrices tried before the coefficient sweep.
pub const CANDIDATE_HILL_MATRICES: &[HillMatrix] = &[
    [[3, 3], [2, 5]],
    [[5, 8], [17, 3]],
    [[9, 4], [5, 7]],
    [[2, 3], [3, 6]],
    [[7, 8], [11, 11]],
    [[11, 8], [3, 7]],
];

/// The most frequent English letter, used to peak-fit Vigenère shifts.
const PEAK_LETTER: i64 = 4;

/// Non-classical selections the engine recognizes but never attacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModernScheme {
    Rsa,
    Des,
    Aes,
    Merkle,
}

impl ModernScheme {
    pub fn name(self) -> &'static str {
        match self {
            ModernScheme::Rsa => "RSA",
            ModernScheme::Des => "DES",
            ModernScheme::Aes => "AES",
            ModernScheme::Merkle => "Merkle tree",
        }
    }
}

/// What a crack job asks to break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrackTarget {
    Cipher(CipherType),
    Modern(ModernScheme),
}

impl From<CipherType> for CrackTarget {
    fn from(cipher: CipherType) -> Self {
        CrackTarget::Cipher(cipher)
    }
}

impl fmt::Display for CrackTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrackTarget::Cipher(cipher) => write!(f, "{}", cipher),
            CrackTarget::Modern(scheme) => f.write_str(scheme.name()),
        }
    }
}

impl std::str::FromStr for CrackTarget {
    type Err = CrackboxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rsa" => Ok(CrackTarget::Modern(ModernScheme::Rsa)),
            "des" => Ok(CrackTarget::Modern(ModernScheme::Des)),
            "aes" => Ok(CrackTarget::Modern(ModernScheme::Aes)),
            "merkle" => Ok(CrackTarget::Modern(ModernScheme::Merkle)),
            _ => s.parse::<CipherType>().map(CrackTarget::Cipher),
        }
    }
}

/// How a cipher's key space is covered.
enum KeySpace {
    Keys(Vec<CipherKey>),
    VigenereHeuristic,
    NotSearchable(String),
}

/// Runs key search for one job.
pub struct KeySearch<'a> {
    config: &'a EngineConfig,
    cancel: &'a CancelToken,
}

impl<'a> KeySearch<'a> {
    pub fn new(config: &'a EngineConfig, cancel: &'a CancelToken) -> Self {
        Self { config, cancel }
    }

    /// Unscored candidates for `ciphertext`, in enumeration order.
    pub fn run(
        &self,
        target: CrackTarget,
        ciphertext: &str,
        options: &ProductOptions,
    ) -> Result<Vec<CandidateResult>> {
        let cipher = match target {
            CrackTarget::Modern(scheme) => {
                return Ok(vec![CandidateResult::sentinel(
                    scheme.name(),
                    format!(
                        "{} is a modern scheme; brute-force recovery is outside the reach of this engine.",
                        scheme.name()
                    ),
                )]);
            }
            CrackTarget::Cipher(cipher) => cipher,
        };

        if letters_only(ciphertext).is_empty() {
            return Err(CrackboxError::invalid_input("ciphertext contains no letters"));
        }

        let candidates = if cipher == CipherType::Product {
            self.product(ciphertext, options)?
        } else {
            self.single(cipher, ciphertext)?
        };
        debug!(cipher = %cipher, candidates = candidates.len(), "key search finished");
        Ok(candidates)
    }

    fn single(&self, cipher: CipherType, ciphertext: &str) -> Result<Vec<CandidateResult>> {
        match self.key_space(cipher, ciphertext) {
            KeySpace::Keys(keys) => self.decode_all(keys, ciphertext),
            KeySpace::VigenereHeuristic => self.vigenere(ciphertext),
            KeySpace::NotSearchable(message) => {
                Ok(vec![CandidateResult::sentinel(cipher.name(), message)])
            }
        }
    }

    fn key_space(&self, cipher: CipherType, ciphertext: &str) -> KeySpace {
        let letter_count = letters_only(ciphertext).len();
        match cipher {
            CipherType::Additive => KeySpace::Keys((0..26).map(CipherKey::Additive).collect()),
            CipherType::Multiplicative => KeySpace::Keys(
                alphabet::valid_multiplicative_keys()
                    .iter()
                    .map(|&k| CipherKey::Multiplicative(k))
                    .collect(),
            ),
            CipherType::Affine => KeySpace::Keys(
                alphabet::valid_multiplicative_keys()
                    .iter()
                    .flat_map(|&a| (0..26).map(move |b| CipherKey::Affine { a, b }))
                    .collect(),
            ),
            CipherType::Autokey => KeySpace::Keys((0..26).map(CipherKey::Autokey).collect()),
            CipherType::RailFence => KeySpace::Keys(
                (2..=self.config.rail_fence_max_rails.min(letter_count))
                    .map(CipherKey::RailFence)
                    .collect(),
            ),
            CipherType::KeylessTransposition => KeySpace::Keys(
                (2..=self.config.keyless_max_columns.min(letter_count))
                    .map(CipherKey::KeylessTransposition)
                    .collect(),
            ),
            CipherType::Playfair => KeySpace::Keys(
                CANDIDATE_KEYWORDS
                    .iter()
                    .map(|w| CipherKey::Playfair(w.to_string()))
                    .collect(),
            ),
            CipherType::Columnar => KeySpace::Keys(
                CANDIDATE_KEYWORDS
                    .iter()
                    .map(|w| CipherKey::Columnar(w.to_string()))
                    .collect(),
            ),
            CipherType::DoubleTransposition => KeySpace::Keys(
                CANDIDATE_KEYWORDS
                    .iter()
                    .flat_map(|first| {
                        CANDIDATE_KEYWORDS.iter().map(move |second| {
                            CipherKey::DoubleTransposition(first.to_string(), second.to_string())
                        })
                    })
                    .collect(),
            ),
            CipherType::Hill => KeySpace::Keys(
                hill_candidates(self.config)
                    .into_iter()
                    .map(CipherKey::Hill)
                    .collect(),
            ),
            CipherType::Vigenere => KeySpace::VigenereHeuristic,
            CipherType::Monoalphabetic => KeySpace::NotSearchable(
                "Monoalphabetic substitution has 26! (about 4 x 10^26) keys, far too many to \
                 enumerate. Use the letter-frequency analysis to map cipher letters by hand."
                    .to_string(),
            ),
            CipherType::Vernam => KeySpace::NotSearchable(
                "A one-time pad keyed with truly random letters as long as the message cannot \
                 be broken: every plaintext of this length is equally likely."
                    .to_string(),
            ),
            CipherType::Product => KeySpace::NotSearchable(
                "product ciphers are searched leg by leg".to_string(),
            ),
        }
    }

    fn checkpoint(&self, done: usize) -> Result<()> {
        if done % self.config.cancel_check_interval.max(1) == 0 {
            self.cancel.check()?;
        }
        Ok(())
    }

    fn decode_all(&self, keys: Vec<CipherKey>, ciphertext: &str) -> Result<Vec<CandidateResult>> {
        let mut out = Vec::with_capacity(keys.len());
        for (i, key) in keys.into_iter().enumerate() {
            self.checkpoint(i)?;
            let plaintext = key.decode(ciphertext)?;
            out.push(CandidateResult::new(key, plaintext));
        }
        Ok(out)
    }

    /// Ranks key lengths by IC, then peak-fits each key letter to E.
    fn vigenere(&self, ciphertext: &str) -> Result<Vec<CandidateResult>> {
        let letters = indices(ciphertext);
        let estimates = rank_key_lengths(ciphertext, self.config.vigenere_max_key_len);
        let mut out = Vec::new();
        for estimate in estimates.into_iter().take(self.config.vigenere_lengths_kept) {
            self.cancel.check()?;
            let key = recover_vigenere_key(&letters, estimate.length);
            trace!(
                length = estimate.length,
                average_ic = estimate.average_ic,
                key = %key,
                "vigenere key length candidate"
            );
            let key = CipherKey::Vigenere(key);
            let plaintext = key.decode(ciphertext)?;
            out.push(CandidateResult::new(key, plaintext));
        }
        Ok(out)
    }

    /// For each transposition key, undo the transposition and search the
    /// substitution leg on the result.
    fn product(&self, ciphertext: &str, options: &ProductOptions) -> Result<Vec<CandidateResult>> {
        let (sub_type, trans_type) = options.legs().map_err(|e| {
            CrackboxError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::EngineFault,
                format!("malformed product cipher options: {}", e),
                e,
            )
        })?;

        let trans_keys = match self.key_space(trans_type, ciphertext) {
            KeySpace::Keys(keys) => keys,
            _ => {
                return Err(CrackboxError::engine_fault(format!(
                    "{} has no enumerable key space",
                    trans_type
                )));
            }
        };

        let mut out = Vec::new();
        for trans_key in trans_keys {
            self.cancel.check()?;
            let intermediate = trans_key.decode(ciphertext)?;
            let legs = match self.key_space(sub_type, &intermediate) {
                KeySpace::Keys(keys) => self.decode_all(keys, &intermediate)?,
                KeySpace::VigenereHeuristic => self.vigenere(&intermediate)?,
                KeySpace::NotSearchable(message) => {
                    return Ok(vec![CandidateResult::sentinel(
                        format!("{} + {}", sub_type, trans_type),
                        message,
                    )]);
                }
            };
            for leg in legs {
                let Some(sub_key) = leg.key else { continue };
                let key = CipherKey::Product {
                    substitution: Box::new(sub_key),
                    transposition: Box::new(trans_key.clone()),
                };
                out.push(CandidateResult::new(key, leg.plaintext));
            }
        }
        Ok(out)
    }
}

/// Recovers one Vigenère key of `length` letters: for every position, the
/// shift that turns the most letters of that subsequence into E.
pub fn recover_vigenere_key(letters: &[i64], length: usize) -> String {
    (0..length)
        .map(|offset| {
            let mut counts = [0usize; 26];
            for &c in letters.iter().skip(offset).step_by(length) {
                counts[c as usize] += 1;
            }
            let mut best_shift = 0i64;
            let mut best_count = 0usize;
            for shift in 0..26i64 {
                let count = counts[(PEAK_LETTER + shift).rem_euclid(26) as usize];
                if count > best_count {
                    best_count = count;
                    best_shift = shift;
                }
            }
            from_index(best_shift)
        })
        .collect()
}

/// Textbook matrices, then a sweep over coefficients `0..=hill_coefficient_max`,
/// keeping invertible matrices until `hill_max_candidates` are collected.
pub fn hill_candidates(config: &EngineConfig) -> Vec<HillMatrix> {
    let limit = config.hill_max_candidates;
    let mut out: Vec<HillMatrix> = Vec::new();
    let push = |m: HillMatrix, out: &mut Vec<HillMatrix>| {
        if out.len() < limit && hill::is_invertible(&m) && !out.contains(&m) {
            out.push(m);
        }
    };
    for m in CANDIDATE_HILL_MATRICES {
        push(*m, &mut out);
    }
    let max = config.hill_coefficient_max;
    'sweep: for a in 0..=max {
        for b in 0..=max {
            for c in 0..=max {
                for d in 0..=max {
                    if out.len() >= limit {
                        break 'sweep;
                    }
                    push([[a, b], [c, d]], &mut out);
                }
            }
        }
    }
    trace!(count = out.len(), "hill candidate matrices");
    out
}

/// Searches with the default configuration and no cancellation.
pub fn brute_force(cipher: CipherType, ciphertext: &str) -> Result<Vec<CandidateResult>> {
    let config = EngineConfig::default();
    let cancel = CancelToken::never();
    KeySearch::new(&config, &cancel).run(cipher.into(), ciphertext, &ProductOptions::default())
}
