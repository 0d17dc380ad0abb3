//! Vigenère, Autokey and Vernam ciphers
//!
//! These operate on the space-stripped letter stream.

use rand::Rng;

use crate::alphabet::{from_index, indices};
use crate::error::{CrackboxError, Result};

pub fn validate_vigenere(key: &str) -> Result<()> {
    if indices(key).is_empty() {
        return Err(CrackboxError::invalid_key("Vigenere key must contain at least one letter"));
    }
    Ok(())
}

pub fn validate_autokey(seed: i64) -> Result<()> {
    if !(0..=25).contains(&seed) {
        return Err(CrackboxError::invalid_key(format!(
            "autokey seed {} is outside 0..=25",
            seed
        )));
    }
    Ok(())
}

pub fn validate_vernam_pad(pad: &str) -> Result<()> {
    if indices(pad).is_empty() {
        return Err(CrackboxError::invalid_key("one-time pad must contain at least one letter"));
    }
    Ok(())
}

fn vigenere_apply(text: &str, key: &str, sign: i64) -> Result<String> {
    validate_vigenere(key)?;
    let shifts = indices(key);
    Ok(indices(text)
        .into_iter()
        .zip(shifts.iter().cycle())
        .map(|(p, k)| from_index(p + sign * k))
        .collect())
}

/// `c_i = p_i + k_(i mod len(key)) mod 26` over the space-stripped text.
pub fn vigenere_encode(plaintext: &str, key: &str) -> Result<String> {
    vigenere_apply(plaintext, key, 1)
}

pub fn vigenere_decode(ciphertext: &str, key: &str) -> Result<String> {
    vigenere_apply(ciphertext, key, -1)
}

/// First shift is the seed; each later shift is the previous plaintext letter.
pub fn autokey_encode(plaintext: &str, seed: i64) -> Result<String> {
    validate_autokey(seed)?;
    Ok(indices(plaintext)
        .into_iter()
        .scan(seed, |shift, p| {
            let c = from_index(p + *shift);
            *shift = p;
            Some(c)
        })
        .collect())
}

/// Sequential inverse of [`autokey_encode`]: each recovered letter keys the next.
pub fn autokey_decode(ciphertext: &str, seed: i64) -> Result<String> {
    validate_autokey(seed)?;
    Ok(indices(ciphertext)
        .into_iter()
        .scan(seed, |shift, c| {
            let p = ((c - *shift) % 26 + 26) % 26;
            *shift = p;
            Some(from_index(p))
        })
        .collect())
}

fn vernam_apply(text: &str, pad: &str, sign: i64) -> Result<String> {
    validate_vernam_pad(pad)?;
    let letters = indices(text);
    let pad = indices(pad);
    if pad.len() < letters.len() {
        return Err(CrackboxError::invalid_key(format!(
            "one-time pad has {} letters but the text needs {}",
            pad.len(),
            letters.len()
        )));
    }
    Ok(letters
        .into_iter()
        .zip(pad)
        .map(|(t, k)| from_index(t + sign * k))
        .collect())
}

/// Letter-wise `c = p + k mod 26`; the pad must be at least as long as the text.
pub fn vernam_encode(plaintext: &str, pad: &str) -> Result<String> {
    vernam_apply(plaintext, pad, 1)
}

pub fn vernam_decode(ciphertext: &str, pad: &str) -> Result<String> {
    vernam_apply(ciphertext, pad, -1)
}

/// A uniformly random pad of `len` letters.
pub fn random_vernam_key<R: Rng + ?Sized>(len: usize, rng: &mut R) -> String {
    (0..len).map(|_| from_index(rng.gen_range(0..26))).collect()
}
