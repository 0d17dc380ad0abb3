//! Playfair digraph cipher over a 5x5 key square (J folded into I)

use crate::alphabet::{letters_only, to_index};
use crate::error::{CrackboxError, Result};

const SIDE: usize = 5;
const FILLER: char = 'X';

/// A 5x5 key square plus a reverse lookup from letter to (row, column).
#[derive(Debug, Clone)]
pub struct KeySquare {
    cells: [char; SIDE * SIDE],
    positions: [(usize, usize); 26],
}

impl KeySquare {
    /// Unique letters of the keyword, then the rest of the alphabet, without J.
    pub fn new(keyword: &str) -> Result<Self> {
        validate(keyword)?;
        let mut cells = ['A'; SIDE * SIDE];
        let mut positions = [(0, 0); 26];
        let mut seen = [false; 26];
        let mut filled = 0;

        let candidates = letters_only(keyword)
            .chars()
            .chain('A'..='Z')
            .map(fold_j)
            .collect::<Vec<_>>();
        for c in candidates {
            let Some(idx) = to_index(c) else { continue };
            let idx = idx as usize;
            if seen[idx] {
                continue;
            }
            seen[idx] = true;
            cells[filled] = c;
            positions[idx] = (filled / SIDE, filled % SIDE);
            filled += 1;
        }
        if filled != SIDE * SIDE {
            return Err(CrackboxError::engine_fault(format!(
                "Playfair square filled {} of 25 cells",
                filled
            )));
        }
        // J shares I's cell.
        positions[9] = positions[8];

        Ok(Self { cells, positions })
    }

    pub fn rows(&self) -> [[char; SIDE]; SIDE] {
        let mut rows = [['A'; SIDE]; SIDE];
        for (i, c) in self.cells.iter().enumerate() {
            rows[i / SIDE][i % SIDE] = *c;
        }
        rows
    }

    fn position(&self, c: char) -> (usize, usize) {
        let idx = to_index(c).unwrap_or(0) as usize;
        self.positions[idx]
    }

    fn at(&self, row: usize, col: usize) -> char {
        self.cells[row * SIDE + col]
    }

    /// Substitutes one digraph; `step` is 1 to encode and SIDE-1 to decode.
    fn substitute(&self, a: char, b: char, step: usize) -> (char, char) {
        let (ra, ca) = self.position(a);
        let (rb, cb) = self.position(b);
        if ra == rb {
            (self.at(ra, (ca + step) % SIDE), self.at(rb, (cb + step) % SIDE))
        } else if ca == cb {
            (self.at((ra + step) % SIDE, ca), self.at((rb + step) % SIDE, cb))
        } else {
            (self.at(ra, cb), self.at(rb, ca))
        }
    }
}

pub fn validate(keyword: &str) -> Result<()> {
    if letters_only(keyword).is_empty() {
        return Err(CrackboxError::invalid_key("Playfair keyword must contain at least one letter"));
    }
    Ok(())
}

fn fold_j(c: char) -> char {
    if c == 'J' { 'I' } else { c }
}

/// Splits plaintext into digraphs, separating doubled letters with X and
/// padding an odd tail with X.
pub fn digraphs(plaintext: &str) -> Vec<(char, char)> {
    let letters: Vec<char> = letters_only(plaintext).chars().map(fold_j).collect();
    let mut pairs = Vec::with_capacity(letters.len() / 2 + 1);
    let mut i = 0;
    while i < letters.len() {
        let a = letters[i];
        match letters.get(i + 1) {
            Some(&b) if b != a => {
                pairs.push((a, b));
                i += 2;
            }
            _ => {
                pairs.push((a, FILLER));
                i += 1;
            }
        }
    }
    pairs
}

fn apply(pairs: Vec<(char, char)>, keyword: &str, step: usize) -> Result<String> {
    let square = KeySquare::new(keyword)?;
    let mut out = String::with_capacity(pairs.len() * 2);
    for (a, b) in pairs {
        let (x, y) = square.substitute(a, b, step);
        out.push(x);
        out.push(y);
    }
    Ok(out)
}

pub fn encode(plaintext: &str, keyword: &str) -> Result<String> {
    apply(digraphs(plaintext), keyword, 1)
}

/// Mirrors the encode rules (shift left/up). An odd trailing letter is
/// padded with X.
pub fn decode(ciphertext: &str, keyword: &str) -> Result<String> {
    let letters: Vec<char> = letters_only(ciphertext).chars().map(fold_j).collect();
    let pairs = letters
        .chunks(2)
        .map(|pair| (pair[0], pair.get(1).copied().unwrap_or(FILLER)))
        .collect();
    apply(pairs, keyword, SIDE - 1)
}
