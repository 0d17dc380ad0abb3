//! Letter statistics and Index of Coincidence

use std::fmt;

use crate::alphabet::{from_index, indices};
use crate::corpus::ENGLISH_IC;

/// Letter statistics of a text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStats {
    pub counts: [usize; 26],
    pub total_letters: usize,
    pub index_of_coincidence: f64,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        let letters = indices(text);
        let counts = letter_counts(&letters);
        Self {
            counts,
            total_letters: letters.len(),
            index_of_coincidence: ic_from_counts(&counts, letters.len()),
        }
    }

    /// Relative frequency of each letter; all zero for an empty text.
    pub fn frequencies(&self) -> [f64; 26] {
        let mut out = [0.0; 26];
        if self.total_letters > 0 {
            for (slot, &count) in out.iter_mut().zip(self.counts.iter()) {
                *slot = count as f64 / self.total_letters as f64;
            }
        }
        out
    }

    /// Letters ordered by descending count, ties alphabetical.
    pub fn most_frequent(&self) -> Vec<(char, usize)> {
        let mut letters: Vec<(char, usize)> = self
            .counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(i, count)| (from_index(i as i64), *count))
            .collect();
        letters.sort_by(|a, b| b.1.cmp(&a.1));
        letters
    }
}

impl fmt::Display for TextStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "letters: {}", self.total_letters)?;
        writeln!(
            f,
            "index of coincidence: {:.4} (English ~{:.3})",
            self.index_of_coincidence, ENGLISH_IC
        )?;
        let freqs = self.frequencies();
        for (letter, count) in self.most_frequent() {
            let idx = (letter as u8 - b'A') as usize;
            writeln!(f, "{} {:>5} {:>6.2}%", letter, count, freqs[idx] * 100.0)?;
        }
        Ok(())
    }
}

fn letter_counts(letters: &[i64]) -> [usize; 26] {
    let mut counts = [0usize; 26];
    for &idx in letters {
        counts[idx as usize] += 1;
    }
    counts
}

fn ic_from_counts(counts: &[usize; 26], n: usize) -> f64 {
    if n < 2 {
        return 0.0;
    }
    let matches: usize = counts.iter().map(|&f| f * f.saturating_sub(1)).sum();
    matches as f64 / (n * (n - 1)) as f64
}

/// `IC(s) = Σ f_i (f_i - 1) / (n (n - 1))` over letter ordinals.
pub fn index_of_coincidence(letters: &[i64]) -> f64 {
    ic_from_counts(&letter_counts(letters), letters.len())
}

/// Splits `letters` into `period` interleaved subsequences.
pub fn interleave(letters: &[i64], period: usize) -> Vec<Vec<i64>> {
    let mut columns = vec![Vec::with_capacity(letters.len() / period.max(1) + 1); period];
    for (i, &idx) in letters.iter().enumerate() {
        columns[i % period].push(idx);
    }
    columns
}

/// A candidate polyalphabetic period and its average subsequence IC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyLengthEstimate {
    pub length: usize,
    pub average_ic: f64,
}

impl KeyLengthEstimate {
    pub fn distance_from_english(&self) -> f64 {
        (self.average_ic - ENGLISH_IC).abs()
    }
}

/// Ranks periods `1..=max_len` (bounded by the letter count) by how close
/// their average subsequence IC is to English, closest first. Ties keep the
/// shorter period first.
pub fn rank_key_lengths(text: &str, max_len: usize) -> Vec<KeyLengthEstimate> {
    let letters = indices(text);
    let upper = max_len.min(letters.len());
    let mut estimates: Vec<KeyLengthEstimate> = (1..=upper)
        .map(|length| {
            let columns = interleave(&letters, length);
            let total: f64 = columns.iter().map(|c| index_of_coincidence(c)).sum();
            KeyLengthEstimate {
                length,
                average_ic: total / length as f64,
            }
        })
        .collect();
    estimates.sort_by(|a, b| {
        a.distance_from_english()
            .total_cmp(&b.distance_from_english())
    });
    estimates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ic_simple() {
        // AABB: (2*1 + 2*1) / (4*3)
        assert!((index_of_coincidence(&[0, 0, 1, 1]) - 4.0 / 12.0).abs() < 1e-12);
        assert_eq!(index_of_coincidence(&[0]), 0.0);
        assert_eq!(index_of_coincidence(&[]), 0.0);
    }

    #[test]
    fn test_stats() {
        let stats = TextStats::of("Hello, world");
        assert_eq!(stats.total_letters, 10);
        assert_eq!(stats.counts[11], 3);
        assert_eq!(stats.most_frequent()[0], ('L', 3));
        assert!((stats.frequencies()[14] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_interleave() {
        let columns = interleave(&[0, 1, 2, 3, 4], 2);
        assert_eq!(columns, vec![vec![0, 2, 4], vec![1, 3]]);
    }

    #[test]
    fn test_rank_key_lengths_bounded_by_text() {
        let ranked = rank_key_lengths("ABC", 15);
        assert_eq!(ranked.len(), 3);
        assert!(rank_key_lengths("", 15).is_empty());
    }
}
