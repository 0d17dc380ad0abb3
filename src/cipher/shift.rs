//! Additive, Multiplicative and Affine ciphers
//!
//! All three map each letter independently and pass spaces through.

use crate::alphabet::{self, from_index, is_valid_multiplier, mod_inverse26, normalize, to_index};
use crate::error::{CrackboxError, Result};

pub fn validate_additive(k: i64) -> Result<()> {
    if !(0..=25).contains(&k) {
        return Err(CrackboxError::invalid_key(format!(
            "additive key {} is outside 0..=25",
            k
        )));
    }
    Ok(())
}

pub fn validate_multiplicative(k: i64) -> Result<()> {
    if !(1..=25).contains(&k) {
        return Err(CrackboxError::invalid_key(format!(
            "multiplier {} is outside 1..=25",
            k
        )));
    }
    if !is_valid_multiplier(k) {
        return Err(CrackboxError::invalid_key(format!(
            "multiplier {} is not coprime with 26",
            k
        )));
    }
    Ok(())
}

pub fn validate_affine(a: i64, b: i64) -> Result<()> {
    if !(1..=25).contains(&a) {
        return Err(CrackboxError::invalid_key(format!(
            "affine coefficient a={} is outside 1..=25",
            a
        )));
    }
    if !is_valid_multiplier(a) {
        return Err(CrackboxError::invalid_key(format!(
            "affine coefficient a={} is not coprime with 26",
            a
        )));
    }
    if !(0..=25).contains(&b) {
        return Err(CrackboxError::invalid_key(format!(
            "affine coefficient b={} is outside 0..=25",
            b
        )));
    }
    Ok(())
}

/// Applies `f` to every letter ordinal of the normalized text, keeping spaces.
fn map_letters(text: &str, f: impl Fn(i64) -> i64) -> String {
    normalize(text)
        .chars()
        .map(|c| match to_index(c) {
            Some(p) => from_index(f(p)),
            None => c,
        })
        .collect()
}

/// `c = p + k mod 26`.
pub fn additive_encode(plaintext: &str, k: i64) -> Result<String> {
    validate_additive(k)?;
    Ok(map_letters(plaintext, |p| p + k))
}

pub fn additive_decode(ciphertext: &str, k: i64) -> Result<String> {
    validate_additive(k)?;
    Ok(map_letters(ciphertext, |c| c - k))
}

/// `c = p * k mod 26`.
pub fn multiplicative_encode(plaintext: &str, k: i64) -> Result<String> {
    validate_multiplicative(k)?;
    Ok(map_letters(plaintext, |p| p * k))
}

pub fn multiplicative_decode(ciphertext: &str, k: i64) -> Result<String> {
    let inverse = inverse_of(k)?;
    Ok(map_letters(ciphertext, |c| c * inverse))
}

/// `c = a * p + b mod 26`.
pub fn affine_encode(plaintext: &str, a: i64, b: i64) -> Result<String> {
    validate_affine(a, b)?;
    Ok(map_letters(plaintext, |p| a * p + b))
}

/// `p = a⁻¹ * (c - b) mod 26`.
pub fn affine_decode(ciphertext: &str, a: i64, b: i64) -> Result<String> {
    validate_affine(a, b)?;
    let inverse = inverse_of(a)?;
    Ok(map_letters(ciphertext, |c| inverse * (c - b)))
}

fn inverse_of(k: i64) -> Result<i64> {
    mod_inverse26(k).ok_or_else(|| {
        CrackboxError::invalid_key(format!("{} has no inverse modulo {}", k, alphabet::ALPHABET_LEN))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_additive_known() {
        assert_eq!(additive_encode("HELLO WORLD", 3).unwrap(), "KHOOR ZRUOG");
        assert_eq!(additive_decode("KHOOR ZRUOG", 3).unwrap(), "HELLO WORLD");
        assert_eq!(additive_encode("xyz", 3).unwrap(), "ABC");
    }

    #[test]
    fn test_additive_rejects_out_of_range() {
        let err = additive_encode("ABC", 26).expect_err("k=26 is invalid");
        assert_eq!(err.kind, Some(ErrorKind::InvalidKey));
        assert!(additive_decode("ABC", -1).is_err());
    }

    #[test]
    fn test_multiplicative_roundtrip_all_keys() {
        let text = "THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG";
        for &k in alphabet::valid_multiplicative_keys() {
            let ct = multiplicative_encode(text, k).unwrap();
            assert_eq!(multiplicative_decode(&ct, k).unwrap(), text);
        }
    }

    #[test]
    fn test_multiplicative_fails_closed() {
        let err = multiplicative_encode("HELLO", 13).expect_err("13 shares a factor with 26");
        assert_eq!(err.kind, Some(ErrorKind::InvalidKey));
        let err = multiplicative_decode("HELLO", 2).expect_err("2 shares a factor with 26");
        assert_eq!(err.kind, Some(ErrorKind::InvalidKey));
    }

    #[test]
    fn test_affine_known() {
        // a=5, b=8: A->I, F->H
        assert_eq!(affine_encode("AFFINE CIPHER", 5, 8).unwrap(), "IHHWVC SWFRCP");
        assert_eq!(affine_decode("IHHWVC SWFRCP", 5, 8).unwrap(), "AFFINE CIPHER");
    }

    #[test]
    fn test_affine_rejects_bad_coefficients() {
        assert!(affine_encode("ABC", 4, 1).is_err());
        assert!(affine_encode("ABC", 5, 26).is_err());
        assert!(affine_decode("ABC", 13, 0).is_err());
    }

    #[test]
    fn test_huge_coprime_keys_rejected() {
        // Coprime with 26, so only the range check stops the multiply.
        let k = 2_600_000_000_000_000_001;
        let err = multiplicative_encode("HELLO", k).expect_err("k out of range");
        assert_eq!(err.kind, Some(ErrorKind::InvalidKey));
        let err = multiplicative_decode("HELLO", -25).expect_err("negative k");
        assert_eq!(err.kind, Some(ErrorKind::InvalidKey));
        let err = affine_encode("HELLO", k, 3).expect_err("a out of range");
        assert_eq!(err.kind, Some(ErrorKind::InvalidKey));
        let err = affine_decode("HELLO", i64::MIN, 3).expect_err("a out of range");
        assert_eq!(err.kind, Some(ErrorKind::InvalidKey));
        assert!(affine_encode("HELLO", 5, i64::MAX).is_err());
    }
}
