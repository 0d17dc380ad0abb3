//! Product cipher: one substitution leg followed by one transposition leg

use crate::alphabet::letters_only;
use crate::cipher::transposition::lcm;
use crate::cipher::{CipherFamily, CipherKey, CipherType};
use crate::error::{CrackboxError, Result};

const FILLER: char = 'X';

/// Leg selection for product-cipher keys and crack jobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductOptions {
    pub sub_type: Option<CipherType>,
    pub trans_type: Option<CipherType>,
}

impl ProductOptions {
    pub fn new(sub_type: CipherType, trans_type: CipherType) -> Self {
        Self {
            sub_type: Some(sub_type),
            trans_type: Some(trans_type),
        }
    }

    /// Both legs, checked for the right family.
    pub fn legs(&self) -> Result<(CipherType, CipherType)> {
        let (Some(sub_type), Some(trans_type)) = (self.sub_type, self.trans_type) else {
            return Err(CrackboxError::invalid_input(
                "product cipher needs both a substitution and a transposition cipher",
            ));
        };
        check_family(sub_type, CipherFamily::Substitution)?;
        check_family(trans_type, CipherFamily::Transposition)?;
        Ok((sub_type, trans_type))
    }
}

fn check_family(cipher: CipherType, expected: CipherFamily) -> Result<()> {
    if cipher.family() != expected {
        return Err(CrackboxError::invalid_input(format!(
            "{} cannot be used as the {} leg of a product cipher",
            cipher,
            match expected {
                CipherFamily::Substitution => "substitution",
                CipherFamily::Transposition => "transposition",
                CipherFamily::Product => "product",
            }
        )));
    }
    Ok(())
}

pub fn validate_legs(substitution: &CipherKey, transposition: &CipherKey) -> Result<()> {
    if substitution.cipher_type().family() != CipherFamily::Substitution {
        return Err(CrackboxError::invalid_key(format!(
            "{} key cannot fill the substitution leg",
            substitution.cipher_type()
        )));
    }
    if transposition.cipher_type().family() != CipherFamily::Transposition {
        return Err(CrackboxError::invalid_key(format!(
            "{} key cannot fill the transposition leg",
            transposition.cipher_type()
        )));
    }
    substitution.validate()?;
    transposition.validate()
}

/// Letters each leg consumes at a time. Input of a multiple of this length
/// passes through a leg without gaining filler.
fn block_len(key: &CipherKey) -> usize {
    match key {
        CipherKey::Playfair(_) | CipherKey::Hill(_) => 2,
        CipherKey::Columnar(k) => letters_only(k).len(),
        CipherKey::KeylessTransposition(columns) => *columns,
        CipherKey::DoubleTransposition(a, b) => {
            lcm(letters_only(a).len(), letters_only(b).len())
        }
        _ => 1,
    }
}

/// Substitution first, then transposition. The letters are padded with X to
/// fill both legs' blocks before either leg runs, so all filler passes
/// through the substitution and decode gives it back as X.
pub fn encode(plaintext: &str, substitution: &CipherKey, transposition: &CipherKey) -> Result<String> {
    validate_legs(substitution, transposition)?;
    let block = lcm(block_len(substitution), block_len(transposition)).max(1);
    let mut letters = letters_only(plaintext);
    let padded_len = letters.len().div_ceil(block) * block;
    letters.extend(std::iter::repeat_n(FILLER, padded_len - letters.len()));

    let substituted = substitution.encode(&letters)?;
    transposition.encode(&substituted)
}

/// Undo the transposition first, then the substitution.
pub fn decode(ciphertext: &str, substitution: &CipherKey, transposition: &CipherKey) -> Result<String> {
    validate_legs(substitution, transposition)?;
    let untransposed = transposition.decode(ciphertext)?;
    substitution.decode(&untransposed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_composition_order() {
        let sub = CipherKey::Additive(3);
        let trans = CipherKey::RailFence(3);
        let ct = encode("WEAREDISCOVERED", &sub, &trans).unwrap();
        let expected = trans.encode(&sub.encode("WEAREDISCOVERED").unwrap()).unwrap();
        assert_eq!(ct, expected);
        assert_eq!(decode(&ct, &sub, &trans).unwrap(), "WEAREDISCOVERED");
    }

    #[test]
    fn test_affine_columnar_roundtrip() {
        let sub = CipherKey::Affine { a: 5, b: 8 };
        let trans = CipherKey::Columnar("ZEBRAS".into());
        let ct = encode("DEFENDTHEEASTWALL", &sub, &trans).unwrap();
        assert_eq!(decode(&ct, &sub, &trans).unwrap(), "DEFENDTHEEASTWALLX");
    }

    #[test]
    fn test_vernam_with_padding_transposition() {
        let trans = CipherKey::Columnar("AB".into());
        // Three letters pad to four, so a three-letter pad is too short.
        let err = encode("ABC", &CipherKey::Vernam("KEY".into()), &trans)
            .expect_err("pad shorter than padded text");
        assert_eq!(err.kind, Some(ErrorKind::InvalidKey));

        let sub = CipherKey::Vernam("KEYS".into());
        let ct = encode("ABC", &sub, &trans).unwrap();
        assert_eq!(ct, "KAFP");
        assert_eq!(decode(&ct, &sub, &trans).unwrap(), "ABCX");
    }

    #[test]
    fn test_hill_with_double_transposition() {
        let sub = CipherKey::Hill([[3, 3], [2, 5]]);
        let trans = CipherKey::DoubleTransposition("ABC".into(), "ABC".into());
        // lcm(2, 3) = 6
        let ct = encode("ATTACK AT", &sub, &trans).unwrap();
        assert_eq!(ct.len(), 12);
        assert_eq!(decode(&ct, &sub, &trans).unwrap(), "ATTACKATXXXX");
    }

    #[test]
    fn test_swapped_legs_rejected() {
        let err = encode("HELLO", &CipherKey::RailFence(3), &CipherKey::Additive(3))
            .expect_err("legs swapped");
        assert_eq!(err.kind, Some(ErrorKind::InvalidKey));
    }

    #[test]
    fn test_invalid_leg_key_rejected() {
        let err = decode("HELLO", &CipherKey::Multiplicative(2), &CipherKey::RailFence(3))
            .expect_err("bad multiplier");
        assert_eq!(err.kind, Some(ErrorKind::InvalidKey));
    }

    #[test]
    fn test_options_legs() {
        let opts = ProductOptions::new(CipherType::Vigenere, CipherType::KeylessTransposition);
        assert_eq!(
            opts.legs().unwrap(),
            (CipherType::Vigenere, CipherType::KeylessTransposition)
        );
        let bad = ProductOptions::new(CipherType::Columnar, CipherType::RailFence);
        assert_eq!(bad.legs().unwrap_err().kind, Some(ErrorKind::InvalidInput));
        assert!(ProductOptions::default().legs().is_err());
    }
}
