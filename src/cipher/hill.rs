//! 2x2 Hill cipher
//!
//! Plaintext letters are taken two at a time as column vectors and multiplied
//! by the key matrix mod 26. Decoding needs the matrix inverse mod 26, which
//! exists only when the determinant is coprime with 26.

use rand::Rng;

use crate::alphabet::{from_index, indices, mod_inverse26};
use crate::error::{CrackboxError, Result};

/// Row-major 2x2 matrix `[[a, b], [c, d]]`.
pub type HillMatrix = [[i64; 2]; 2];

const FILLER: i64 = 23; // X

/// Determinant reduced into `0..26`. Entries are reduced first, so any
/// matrix is safe to pass.
pub fn determinant(m: &HillMatrix) -> i64 {
    let [[a, b], [c, d]] = m.map(|row| row.map(|v| v.rem_euclid(26)));
    (a * d - b * c).rem_euclid(26)
}

pub fn is_invertible(m: &HillMatrix) -> bool {
    mod_inverse26(determinant(m)).is_some()
}

pub fn validate(m: &HillMatrix) -> Result<()> {
    if let Some(v) = m.iter().flatten().find(|v| !(0..=25).contains(*v)) {
        return Err(CrackboxError::invalid_key(format!(
            "Hill matrix entry {} is outside 0..=25",
            v
        )));
    }
    if !is_invertible(m) {
        return Err(CrackboxError::invalid_key(format!(
            "Hill matrix [[{},{}],[{},{}]] is not invertible mod 26 (determinant {})",
            m[0][0],
            m[0][1],
            m[1][0],
            m[1][1],
            determinant(m)
        )));
    }
    Ok(())
}

/// Inverse via the adjugate scaled by the determinant's inverse.
pub fn inverse(m: &HillMatrix) -> Result<HillMatrix> {
    validate(m)?;
    let det_inv = mod_inverse26(determinant(m))
        .ok_or_else(|| CrackboxError::invalid_key("Hill determinant has no inverse mod 26"))?;
    let [[a, b], [c, d]] = *m;
    Ok([
        [(d * det_inv).rem_euclid(26), (-b * det_inv).rem_euclid(26)],
        [(-c * det_inv).rem_euclid(26), (a * det_inv).rem_euclid(26)],
    ])
}

fn multiply(text: &str, m: &HillMatrix) -> String {
    let mut letters = indices(text);
    if letters.len() % 2 == 1 {
        letters.push(FILLER);
    }
    let mut out = String::with_capacity(letters.len());
    for pair in letters.chunks_exact(2) {
        let (p0, p1) = (pair[0], pair[1]);
        out.push(from_index(m[0][0] * p0 + m[0][1] * p1));
        out.push(from_index(m[1][0] * p0 + m[1][1] * p1));
    }
    out
}

/// Odd-length input is padded with X.
pub fn encode(plaintext: &str, m: &HillMatrix) -> Result<String> {
    validate(m)?;
    Ok(multiply(plaintext, m))
}

pub fn decode(ciphertext: &str, m: &HillMatrix) -> Result<String> {
    let inv = inverse(m)?;
    Ok(multiply(ciphertext, &inv))
}

pub fn random_matrix<R: Rng + ?Sized>(rng: &mut R) -> HillMatrix {
    loop {
        let m = [
            [rng.gen_range(0..26), rng.gen_range(0..26)],
            [rng.gen_range(0..26), rng.gen_range(0..26)],
        ];
        if is_invertible(&m) {
            return m;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_inverse_identity() {
        let m = [[3, 3], [2, 5]];
        let inv = inverse(&m).unwrap();
        assert_eq!(inv, [[15, 17], [20, 9]]);
        for row in 0..2 {
            for col in 0..2 {
                let v = (m[row][0] * inv[0][col] + m[row][1] * inv[1][col]).rem_euclid(26);
                assert_eq!(v, if row == col { 1 } else { 0 });
            }
        }
    }

    #[test]
    fn test_known_vector() {
        // HE -> (7,4): 3*7+3*4=33=7 H, 2*7+5*4=34=8 I
        assert_eq!(encode("HE", &[[3, 3], [2, 5]]).unwrap(), "HI");
        let ct = encode("HELP", &[[3, 3], [2, 5]]).unwrap();
        assert_eq!(ct, "HIAT");
        assert_eq!(decode(&ct, &[[3, 3], [2, 5]]).unwrap(), "HELP");
    }

    #[test]
    fn test_odd_length_padded() {
        let ct = encode("CAT", &[[3, 3], [2, 5]]).unwrap();
        assert_eq!(ct.len(), 4);
        assert_eq!(decode(&ct, &[[3, 3], [2, 5]]).unwrap(), "CATX");
    }

    #[test]
    fn test_singular_matrix_fails_closed() {
        // det = 2*4 - 2*3 = 2, shares a factor with 26
        let err = decode("HIAT", &[[2, 2], [3, 4]]).expect_err("singular");
        assert_eq!(err.kind, Some(ErrorKind::InvalidKey));
        // det = 13
        assert!(encode("HELP", &[[1, 0], [0, 13]]).is_err());
    }

    #[test]
    fn test_out_of_range_entries_rejected() {
        // Invertible once reduced, but the raw products would overflow.
        let huge = [[i64::MAX / 2, 0], [0, 1]];
        assert!(is_invertible(&huge));
        let err = encode("HELLO", &huge).expect_err("entry out of range");
        assert_eq!(err.kind, Some(ErrorKind::InvalidKey));
        let err = decode("HELLO", &[[3, 3], [2, -21]]).expect_err("negative entry");
        assert_eq!(err.kind, Some(ErrorKind::InvalidKey));
        assert_eq!(determinant(&[[i64::MIN, 1], [1, i64::MAX]]), (18 * 7 - 1) % 26);
    }
}
