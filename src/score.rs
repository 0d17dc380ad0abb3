//! English-likeness scoring of decoded text
//!
//! Four independent signals, each in `[0, 1]`:
//! - dictionary coverage, weighted by word length (capped at 8);
//! - letter-frequency fit, `max(0, 1 - chi2 / 2)` against English unigrams;
//! - bigram hit rate over overlapping 2-letter windows;
//! - trigram hit rate over overlapping 3-letter windows.
//!
//! They combine as `0.50 d + 0.25 f + 0.15 b + 0.10 t`.

use tracing::trace;

use crate::alphabet::{letters_only, to_index};
use crate::candidate::CandidateResult;
use crate::corpus::{
    ENGLISH_FREQUENCIES, LONGEST_WORD, is_common_bigram, is_common_trigram, is_common_word,
};

pub const DICTIONARY_WEIGHT: f64 = 0.50;
pub const FREQUENCY_WEIGHT: f64 = 0.25;
pub const BIGRAM_WEIGHT: f64 = 0.15;
pub const TRIGRAM_WEIGHT: f64 = 0.10;

/// Per-word weight cap.
const MAX_WORD_WEIGHT: usize = 8;

/// Shortest word the no-whitespace scan will match.
const MIN_SCAN_WORD: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub dictionary: f64,
    pub frequency: f64,
    pub bigram: f64,
    pub trigram: f64,
    pub composite: f64,
}

impl ScoreBreakdown {
    pub fn confidence(&self) -> u8 {
        confidence(self.composite)
    }
}

pub fn confidence(composite: f64) -> u8 {
    (composite * 100.0).round().clamp(0.0, 100.0) as u8
}

pub fn score_text(text: &str) -> ScoreBreakdown {
    let upper = text.to_ascii_uppercase();
    let letters = letters_only(&upper);
    let dictionary = dictionary_score(&upper);
    let frequency = frequency_score(&letters);
    let bigram = ngram_score(&letters, 2, is_common_bigram);
    let trigram = ngram_score(&letters, 3, is_common_trigram);
    let composite = DICTIONARY_WEIGHT * dictionary
        + FREQUENCY_WEIGHT * frequency
        + BIGRAM_WEIGHT * bigram
        + TRIGRAM_WEIGHT * trigram;
    ScoreBreakdown {
        dictionary,
        frequency,
        bigram,
        trigram,
        composite,
    }
}

fn word_weight(len: usize) -> usize {
    len.min(MAX_WORD_WEIGHT)
}

/// Weighted share of the text made of common words.
///
/// Text with whitespace is split into words. Text without whitespace is
/// scanned left to right for the longest common word at each position;
/// unmatched letters count one unit of weight each.
pub fn dictionary_score(text: &str) -> f64 {
    let text = text.trim().to_ascii_uppercase();
    let (found, total) = if text.contains(char::is_whitespace) {
        split_coverage(&text)
    } else {
        scan_coverage(&letters_only(&text))
    };
    if total == 0 {
        0.0
    } else {
        found as f64 / total as f64
    }
}

fn split_coverage(text: &str) -> (usize, usize) {
    let mut found = 0;
    let mut total = 0;
    for word in text.split_whitespace().map(letters_only) {
        if word.is_empty() {
            continue;
        }
        let weight = word_weight(word.len());
        total += weight;
        if is_common_word(&word) {
            found += weight;
        }
    }
    (found, total)
}

fn scan_coverage(letters: &str) -> (usize, usize) {
    let n = letters.len();
    let mut found = 0;
    let mut total = 0;
    let mut i = 0;
    while i < n {
        let longest = LONGEST_WORD.min(n - i);
        let matched = (MIN_SCAN_WORD..=longest)
            .rev()
            .find(|&len| is_common_word(&letters[i..i + len]));
        match matched {
            Some(len) => {
                let weight = word_weight(len);
                found += weight;
                total += weight;
                i += len;
            }
            None => {
                total += 1;
                i += 1;
            }
        }
    }
    (found, total)
}

/// `max(0, 1 - chi2 / 2)` between observed and English letter proportions.
pub fn frequency_score(text: &str) -> f64 {
    let mut counts = [0usize; 26];
    let mut n = 0usize;
    for c in text.chars() {
        if let Some(idx) = to_index(c.to_ascii_uppercase()) {
            counts[idx as usize] += 1;
            n += 1;
        }
    }
    if n == 0 {
        return 0.0;
    }
    let chi_squared: f64 = counts
        .iter()
        .zip(ENGLISH_FREQUENCIES.iter())
        .map(|(&count, &expected)| {
            let observed = count as f64 / n as f64;
            (observed - expected).powi(2) / expected
        })
        .sum();
    (1.0 - chi_squared / 2.0).max(0.0)
}

/// Fraction of overlapping `size`-letter windows accepted by `is_common`.
fn ngram_score(letters: &str, size: usize, is_common: fn(&str) -> bool) -> f64 {
    if letters.len() < size {
        return 0.0;
    }
    let windows = letters.len() - size + 1;
    let hits = (0..windows)
        .filter(|&i| is_common(&letters[i..i + size]))
        .count();
    hits as f64 / windows as f64
}

pub fn bigram_score(text: &str) -> f64 {
    ngram_score(&letters_only(text), 2, is_common_bigram)
}

pub fn trigram_score(text: &str) -> f64 {
    ngram_score(&letters_only(text), 3, is_common_trigram)
}

/// Fills `score` and `confidence` on every candidate. Sentinels keep zero.
pub fn score_candidates(candidates: &mut [CandidateResult]) {
    for candidate in candidates.iter_mut() {
        if candidate.is_sentinel() {
            continue;
        }
        let breakdown = score_text(&candidate.plaintext);
        candidate.score = breakdown.composite;
        candidate.confidence = breakdown.confidence();
    }
    trace!(count = candidates.len(), "scored candidates");
}

/// Stable sort, best first. Ties keep enumeration order.
pub fn sort_by_score(candidates: &mut [CandidateResult]) {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Scores, sorts and truncates to `limit`.
pub fn rank(mut candidates: Vec<CandidateResult>, limit: usize) -> Vec<CandidateResult> {
    score_candidates(&mut candidates);
    sort_by_score(&mut candidates);
    candidates.truncate(limit);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::CipherKey;

    const ENGLISH: &str = "THIS IS A SECRET MESSAGE THAT WE WILL SEND TO YOU AT NIGHT";

    #[test]
    fn test_dictionary_split_mode() {
        assert_eq!(dictionary_score(ENGLISH), 1.0);
        assert_eq!(dictionary_score("XQZT VVKP"), 0.0);
        // THE (3) found, QWERTYUIOP capped at 8 missing
        let score = dictionary_score("THE QWERTYUIOP");
        assert!((score - 3.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_dictionary_scan_mode() {
        let joined = ENGLISH.replace(' ', "");
        assert!(dictionary_score(&joined) > 0.8, "{}", dictionary_score(&joined));
        assert!(dictionary_score("QXZVKJQXZV") < 0.2);
        assert_eq!(dictionary_score(""), 0.0);
    }

    #[test]
    fn test_frequency_score_range() {
        let english = frequency_score(ENGLISH);
        let skewed = frequency_score("ZZZZZZZZZZQQQQQQQQ");
        assert!(english > 0.5, "english = {}", english);
        assert_eq!(skewed, 0.0);
        assert_eq!(frequency_score("   "), 0.0);
    }

    #[test]
    fn test_ngram_scores() {
        assert_eq!(bigram_score("THE"), 1.0);
        assert_eq!(trigram_score("THE"), 1.0);
        assert_eq!(bigram_score("QZ"), 0.0);
        assert_eq!(trigram_score("AB"), 0.0);
    }

    #[test]
    fn test_composite_weights() {
        let b = score_text(ENGLISH);
        let expected = 0.5 * b.dictionary + 0.25 * b.frequency + 0.15 * b.bigram + 0.1 * b.trigram;
        assert!((b.composite - expected).abs() < 1e-12);
        assert_eq!(b.confidence(), (expected * 100.0).round() as u8);
    }

    #[test]
    fn test_genuine_plaintext_ranks_first() {
        let mut candidates: Vec<CandidateResult> = (0..26)
            .map(|k| {
                let key = CipherKey::Additive(k);
                let text = key.decode(&CipherKey::Additive(11).encode(ENGLISH).unwrap()).unwrap();
                CandidateResult::new(key, text)
            })
            .collect();
        candidates = rank(candidates, 50);
        assert_eq!(candidates[0].key, Some(CipherKey::Additive(11)));
        assert_eq!(candidates[0].plaintext, ENGLISH);
        assert!(candidates[0].confidence > candidates[1].confidence);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mut candidates: Vec<CandidateResult> = (0..5)
            .map(|k| CandidateResult::new(CipherKey::RailFence(k + 2), "QQQQ".into()))
            .collect();
        score_candidates(&mut candidates);
        sort_by_score(&mut candidates);
        let rails: Vec<String> = candidates.iter().map(|c| c.key_display.clone()).collect();
        assert_eq!(rails, ["rails=2", "rails=3", "rails=4", "rails=5", "rails=6"]);
    }

    #[test]
    fn test_sentinel_passes_through() {
        let sentinel = CandidateResult::sentinel("Monoalphabetic", "26! keys; not searchable");
        let ranked = rank(vec![sentinel.clone()], 50);
        assert_eq!(ranked, vec![sentinel]);
    }
}
