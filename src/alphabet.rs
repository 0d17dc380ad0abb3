//! Alphabet arithmetic over the 26 uppercase Latin letters
//!
//! All cipher arithmetic is performed mod 26. Every shift or sum is
//! normalized through [`from_index`], which maps any integer (including
//! negatives) back into `A..=Z`.

/// Size of the working alphabet.
pub const ALPHABET_LEN: i64 = 26;

/// The alphabet in index order.
pub const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Multipliers in `1..=25` that are coprime with 26.
pub const MULTIPLICATIVE_KEYS: [i64; 12] = [1, 3, 5, 7, 9, 11, 15, 17, 19, 21, 23, 25];

/// Ordinal of an uppercase letter, `A` = 0.
///
/// Returns `None` for anything outside `A..=Z`.
pub fn to_index(ch: char) -> Option<i64> {
    if ch.is_ascii_uppercase() {
        Some(ch as i64 - 'A' as i64)
    } else {
        None
    }
}

/// Letter for any integer, reduced with the canonical modulo rule.
pub fn from_index(n: i64) -> char {
    let idx = ((n % ALPHABET_LEN) + ALPHABET_LEN) % ALPHABET_LEN;
    LETTERS[idx as usize] as char
}

/// Shifts `ch` by `by` positions, wrapping around the alphabet.
///
/// Characters outside `A..=Z` are returned unchanged.
pub fn shift(ch: char, by: i64) -> char {
    match to_index(ch) {
        Some(idx) => from_index(idx + by),
        None => ch,
    }
}

pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    // Only gcd(i64::MIN, 0) and gcd(i64::MIN, i64::MIN) exceed i64::MAX.
    i64::try_from(a).unwrap_or(i64::MIN)
}

/// Multiplicative inverse of `k` modulo `m`.
///
/// Returns the unique `x` in `[1, m)` with `k * x ≡ 1 (mod m)`, or `None`
/// when `gcd(k, m) != 1`.
pub fn mod_inverse(k: i64, m: i64) -> Option<i64> {
    if m <= 1 || gcd(k, m) != 1 {
        return None;
    }
    let k = ((k % m) + m) % m;
    (1..m).find(|x| (k * x) % m == 1)
}

/// Multiplicative inverse modulo 26.
pub fn mod_inverse26(k: i64) -> Option<i64> {
    mod_inverse(k, ALPHABET_LEN)
}

/// The 12 multipliers coprime with 26.
pub fn valid_multiplicative_keys() -> &'static [i64] {
    &MULTIPLICATIVE_KEYS
}

pub fn is_valid_multiplier(k: i64) -> bool {
    gcd(k.rem_euclid(ALPHABET_LEN), ALPHABET_LEN) == 1
}

/// Uppercases `text` and drops everything outside `[A-Z ]`.
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| c.is_ascii_uppercase() || *c == ' ')
        .collect()
}

/// Uppercases `text` and keeps only `A..=Z`.
pub fn letters_only(text: &str) -> String {
    text.chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| c.is_ascii_uppercase())
        .collect()
}

/// Letter ordinals of `text`, skipping everything that is not `A..=Z`
/// after uppercasing.
pub fn indices(text: &str) -> Vec<i64> {
    text.chars()
        .filter_map(|c| to_index(c.to_ascii_uppercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_negative() {
        assert_eq!(from_index(-1), 'Z');
        assert_eq!(from_index(-26), 'A');
        assert_eq!(from_index(-27), 'Z');
        assert_eq!(from_index(52), 'A');
        assert_eq!(from_index(29), 'D');
    }

    #[test]
    fn test_to_index() {
        assert_eq!(to_index('A'), Some(0));
        assert_eq!(to_index('Z'), Some(25));
        assert_eq!(to_index('a'), None);
        assert_eq!(to_index(' '), None);
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(26, 13), 13);
        assert_eq!(gcd(7, 26), 1);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(gcd(-4, 26), 2);
        assert_eq!(gcd(i64::MIN, 26), 2);
        assert_eq!(gcd(i64::MIN, 0), i64::MIN);
    }

    #[test]
    fn test_multiplier_check_handles_extreme_values() {
        assert!(!is_valid_multiplier(i64::MIN));
        assert!(is_valid_multiplier(i64::MAX));
        assert!(is_valid_multiplier(-1));
        assert!(!is_valid_multiplier(26));
    }

    #[test]
    fn test_mod_inverse() {
        assert_eq!(mod_inverse26(3), Some(9));
        assert_eq!(mod_inverse26(5), Some(21));
        assert_eq!(mod_inverse26(25), Some(25));
        assert_eq!(mod_inverse26(13), None);
        assert_eq!(mod_inverse26(2), None);
        assert_eq!(mod_inverse26(-1), Some(25));
    }

    #[test]
    fn test_every_valid_multiplier_has_inverse() {
        assert_eq!(valid_multiplicative_keys().len(), 12);
        for &k in valid_multiplicative_keys() {
            let inv = mod_inverse26(k).unwrap();
            assert_eq!((k * inv) % 26, 1, "k={}", k);
        }
        let coprime: Vec<i64> = (1..26).filter(|&k| is_valid_multiplier(k)).collect();
        assert_eq!(coprime, MULTIPLICATIVE_KEYS.to_vec());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Hello, World! 42"), "HELLO WORLD ");
        assert_eq!(letters_only("Hello, World! 42"), "HELLOWORLD");
    }

    #[test]
    fn test_shift_passes_through_spaces() {
        assert_eq!(shift('Y', 3), 'B');
        assert_eq!(shift(' ', 3), ' ');
        assert_eq!(shift('A', -1), 'Z');
    }
}
