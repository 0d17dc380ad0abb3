//! Transposition ciphers: Rail fence, Columnar, Double and Keyless
//!
//! All four permute the space-stripped letter stream. Columnar, Double and
//! Keyless pad the plaintext with X to fill a rectangle; their decoders also
//! accept ragged (unpadded) ciphertext and invert it exactly.

use crate::alphabet::{gcd, letters_only};
use crate::error::{CrackboxError, Result};

const FILLER: char = 'X';

/// Widest keyless grid accepted. Encoding pads a single row out to this many
/// letters.
pub const MAX_KEYLESS_COLUMNS: usize = 1 << 16;

pub fn validate_rails(rails: usize) -> Result<()> {
    if rails < 2 {
        return Err(CrackboxError::invalid_key(format!(
            "rail fence needs at least 2 rails, got {}",
            rails
        )));
    }
    Ok(())
}

pub fn validate_columns(columns: usize) -> Result<()> {
    if columns < 2 {
        return Err(CrackboxError::invalid_key(format!(
            "keyless transposition needs at least 2 columns, got {}",
            columns
        )));
    }
    if columns > MAX_KEYLESS_COLUMNS {
        return Err(CrackboxError::invalid_key(format!(
            "keyless transposition allows at most {} columns, got {}",
            MAX_KEYLESS_COLUMNS, columns
        )));
    }
    Ok(())
}

pub fn validate_keyword(key: &str) -> Result<()> {
    if letters_only(key).is_empty() {
        return Err(CrackboxError::invalid_key(
            "transposition keyword must contain at least one letter",
        ));
    }
    Ok(())
}

/// Rail index for each of `len` positions along the zigzag.
fn zigzag(len: usize, rails: usize) -> Vec<usize> {
    let mut pattern = Vec::with_capacity(len);
    let mut rail = 0usize;
    let mut down = true;
    for _ in 0..len {
        pattern.push(rail);
        if rail == 0 {
            down = true;
        } else if rail == rails - 1 {
            down = false;
        }
        if down {
            rail += 1;
        } else {
            rail -= 1;
        }
    }
    pattern
}

/// Rails past the letter count are never visited, so the fence is the same
/// with at most `len` rails.
fn effective_rails(rails: usize, len: usize) -> usize {
    rails.min(len.max(2))
}

pub fn rail_fence_encode(plaintext: &str, rails: usize) -> Result<String> {
    validate_rails(rails)?;
    let letters: Vec<char> = letters_only(plaintext).chars().collect();
    let rails = effective_rails(rails, letters.len());
    let pattern = zigzag(letters.len(), rails);
    let mut out = String::with_capacity(letters.len());
    for rail in 0..rails {
        out.extend(
            letters
                .iter()
                .zip(&pattern)
                .filter(|(_, r)| **r == rail)
                .map(|(c, _)| *c),
        );
    }
    Ok(out)
}

/// Replays the zigzag to size each rail, slices the ciphertext into rails,
/// then replays it again to interleave.
pub fn rail_fence_decode(ciphertext: &str, rails: usize) -> Result<String> {
    validate_rails(rails)?;
    let letters: Vec<char> = letters_only(ciphertext).chars().collect();
    let rails = effective_rails(rails, letters.len());
    let pattern = zigzag(letters.len(), rails);

    let mut lengths = vec![0usize; rails];
    for &rail in &pattern {
        lengths[rail] += 1;
    }
    let mut slices = Vec::with_capacity(rails);
    let mut start = 0;
    for len in lengths {
        slices.push(letters[start..start + len].iter());
        start += len;
    }

    let mut out = String::with_capacity(letters.len());
    for rail in pattern {
        if let Some(c) = slices[rail].next() {
            out.push(*c);
        }
    }
    Ok(out)
}

/// Reading order of key columns: alphabetical by key letter, ties by position.
pub fn column_order(key: &str) -> Vec<usize> {
    let key: Vec<char> = letters_only(key).chars().collect();
    let mut order: Vec<usize> = (0..key.len()).collect();
    order.sort_by_key(|&i| key[i]);
    order
}

/// Writes row-major into `order.len()` columns (padding with X) and reads
/// columns out in `order`.
fn transpose_encode(letters: &[char], order: &[usize]) -> String {
    let cols = order.len();
    if letters.is_empty() || cols == 0 {
        return String::new();
    }
    let rows = letters.len().div_ceil(cols);
    let mut grid = letters.to_vec();
    grid.resize(rows * cols, FILLER);

    let mut out = String::with_capacity(grid.len());
    for &col in order {
        for row in 0..rows {
            out.push(grid[row * cols + col]);
        }
    }
    out
}

/// Inverse of [`transpose_encode`]. When the length is not a multiple of the
/// column count, the leftmost `len % cols` columns are the long ones.
fn transpose_decode(letters: &[char], order: &[usize]) -> String {
    let cols = order.len();
    let n = letters.len();
    if n == 0 || cols == 0 {
        return String::new();
    }
    let rows = n.div_ceil(cols);
    let long_columns = n % cols;
    let column_len = |col: usize| {
        if long_columns == 0 || col < long_columns {
            rows
        } else {
            rows - 1
        }
    };

    let empty: &[char] = &[];
    let mut columns = vec![empty; cols];
    let mut start = 0;
    for &col in order {
        let len = column_len(col);
        columns[col] = &letters[start..start + len];
        start += len;
    }

    let mut out = String::with_capacity(n);
    for row in 0..rows {
        for column in &columns {
            if let Some(c) = column.get(row) {
                out.push(*c);
            }
        }
    }
    out
}

pub fn columnar_encode(plaintext: &str, key: &str) -> Result<String> {
    validate_keyword(key)?;
    let letters: Vec<char> = letters_only(plaintext).chars().collect();
    Ok(transpose_encode(&letters, &column_order(key)))
}

pub fn columnar_decode(ciphertext: &str, key: &str) -> Result<String> {
    validate_keyword(key)?;
    let letters: Vec<char> = letters_only(ciphertext).chars().collect();
    Ok(transpose_decode(&letters, &column_order(key)))
}

/// Two columnar passes. The plaintext is padded up front to a multiple of
/// both key lengths so neither pass adds padding of its own.
pub fn double_encode(plaintext: &str, first: &str, second: &str) -> Result<String> {
    validate_keyword(first)?;
    validate_keyword(second)?;
    let (first, second) = (column_order(first), column_order(second));
    let block = lcm(first.len(), second.len());

    let mut letters: Vec<char> = letters_only(plaintext).chars().collect();
    if !letters.is_empty() {
        letters.resize(letters.len().div_ceil(block) * block, FILLER);
    }
    let once: Vec<char> = transpose_encode(&letters, &first).chars().collect();
    Ok(transpose_encode(&once, &second))
}

/// Undoes the second key, then the first.
pub fn double_decode(ciphertext: &str, first: &str, second: &str) -> Result<String> {
    validate_keyword(first)?;
    validate_keyword(second)?;
    let letters: Vec<char> = letters_only(ciphertext).chars().collect();
    let once: Vec<char> = transpose_decode(&letters, &column_order(second))
        .chars()
        .collect();
    Ok(transpose_decode(&once, &column_order(first)))
}

/// Row-major into `columns` columns, read column-major.
pub fn keyless_encode(plaintext: &str, columns: usize) -> Result<String> {
    validate_columns(columns)?;
    let letters: Vec<char> = letters_only(plaintext).chars().collect();
    let order: Vec<usize> = (0..columns).collect();
    Ok(transpose_encode(&letters, &order))
}

pub fn keyless_decode(ciphertext: &str, columns: usize) -> Result<String> {
    validate_columns(columns)?;
    let letters: Vec<char> = letters_only(ciphertext).chars().collect();
    let order: Vec<usize> = (0..columns).collect();
    Ok(transpose_decode(&letters, &order))
}

/// Block length of a double transposition with key lengths `a` and `b`.
pub fn lcm(a: usize, b: usize) -> usize {
    let g = gcd(a as i64, b as i64) as usize;
    if g == 0 { 0 } else { a / g * b }
}
