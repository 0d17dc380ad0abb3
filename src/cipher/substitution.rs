//! Keyword-seeded monoalphabetic substitution
//!
//! The cipher alphabet is the keyword's unique letters followed by the rest
//! of the alphabet in order. Spaces pass through.

use crate::alphabet::{LETTERS, letters_only, normalize, to_index};
use crate::error::{CrackboxError, Result};

pub fn validate(keyword: &str) -> Result<()> {
    if letters_only(keyword).is_empty() {
        return Err(CrackboxError::invalid_key(
            "substitution keyword must contain at least one letter",
        ));
    }
    Ok(())
}

/// Cipher alphabet for `keyword`: entry `i` is the substitute for letter `i`.
pub fn cipher_alphabet(keyword: &str) -> Result<[char; 26]> {
    validate(keyword)?;
    let mut table = ['A'; 26];
    let mut seen = [false; 26];
    let mut filled = 0;
    for c in letters_only(keyword).chars().chain(LETTERS.iter().map(|b| *b as char)) {
        let Some(idx) = to_index(c) else { continue };
        if !seen[idx as usize] {
            seen[idx as usize] = true;
            table[filled] = c;
            filled += 1;
        }
    }
    check_permutation(&table)?;
    Ok(table)
}

/// Fails unless every letter appears exactly once.
pub fn check_permutation(table: &[char; 26]) -> Result<()> {
    let mut seen = [false; 26];
    for &c in table {
        match to_index(c) {
            Some(idx) if !seen[idx as usize] => seen[idx as usize] = true,
            _ => {
                return Err(CrackboxError::invalid_key(format!(
                    "substitution alphabet {} is not a permutation of A-Z",
                    table.iter().collect::<String>()
                )));
            }
        }
    }
    Ok(())
}

fn inverse(table: &[char; 26]) -> [char; 26] {
    let mut inv = ['A'; 26];
    for (plain, &cipher) in table.iter().enumerate() {
        if let Some(idx) = to_index(cipher) {
            inv[idx as usize] = LETTERS[plain] as char;
        }
    }
    inv
}

fn lookup(text: &str, table: &[char; 26]) -> String {
    normalize(text)
        .chars()
        .map(|c| match to_index(c) {
            Some(idx) => table[idx as usize],
            None => c,
        })
        .collect()
}

pub fn encode(plaintext: &str, keyword: &str) -> Result<String> {
    let table = cipher_alphabet(keyword)?;
    Ok(lookup(plaintext, &table))
}

pub fn decode(ciphertext: &str, keyword: &str) -> Result<String> {
    let table = cipher_alphabet(keyword)?;
    Ok(lookup(ciphertext, &inverse(&table)))
}
