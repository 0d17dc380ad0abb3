//! Classical cipher transforms
//!
//! Every cipher is reachable through one closed [`CipherType`] tag and one
//! [`CipherKey`] variant per family. [`CipherKey::encode`] and
//! [`CipherKey::decode`] validate the key before touching the text, so an
//! invalid key fails closed with [`ErrorKind::InvalidKey`] and never yields
//! partial output.
//!
//! Space handling follows two families:
//! - Additive, Multiplicative, Affine and Monoalphabetic keep spaces verbatim.
//! - Every other cipher strips spaces and operates on the letter stream.
//!
//! [`ErrorKind::InvalidKey`]: crate::error::ErrorKind::InvalidKey

pub mod hill;
pub mod playfair;
pub mod polyalpha;
pub mod product;
pub mod shift;
pub mod substitution;
pub mod transposition;

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::alphabet::{self, MULTIPLICATIVE_KEYS};
use crate::error::{CrackboxError, Result};
pub use hill::HillMatrix;
pub use product::ProductOptions;

/// Every supported cipher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherType {
    Additive,
    Multiplicative,
    Affine,
    Vigenere,
    Autokey,
    Playfair,
    Hill,
    RailFence,
    Columnar,
    DoubleTransposition,
    Monoalphabetic,
    Vernam,
    KeylessTransposition,
    Product,
}

/// Which leg of a product cipher a cipher may fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherFamily {
    Substitution,
    Transposition,
    Product,
}

impl CipherType {
    pub const ALL: [CipherType; 14] = [
        CipherType::Additive,
        CipherType::Multiplicative,
        CipherType::Affine,
        CipherType::Vigenere,
        CipherType::Autokey,
        CipherType::Playfair,
        CipherType::Hill,
        CipherType::RailFence,
        CipherType::Columnar,
        CipherType::DoubleTransposition,
        CipherType::Monoalphabetic,
        CipherType::Vernam,
        CipherType::KeylessTransposition,
        CipherType::Product,
    ];

    pub fn family(self) -> CipherFamily {
        match self {
            CipherType::Additive
            | CipherType::Multiplicative
            | CipherType::Affine
            | CipherType::Vigenere
            | CipherType::Autokey
            | CipherType::Playfair
            | CipherType::Hill
            | CipherType::Monoalphabetic
            | CipherType::Vernam => CipherFamily::Substitution,
            CipherType::RailFence
            | CipherType::Columnar
            | CipherType::DoubleTransposition
            | CipherType::KeylessTransposition => CipherFamily::Transposition,
            CipherType::Product => CipherFamily::Product,
        }
    }

    /// Whether the cipher keeps literal spaces instead of stripping them.
    pub fn preserves_spaces(self) -> bool {
        matches!(
            self,
            CipherType::Additive
                | CipherType::Multiplicative
                | CipherType::Affine
                | CipherType::Monoalphabetic
        )
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            CipherType::Additive => "Additive",
            CipherType::Multiplicative => "Multiplicative",
            CipherType::Affine => "Affine",
            CipherType::Vigenere => "Vigenere",
            CipherType::Autokey => "Autokey",
            CipherType::Playfair => "Playfair",
            CipherType::Hill => "Hill",
            CipherType::RailFence => "Rail fence",
            CipherType::Columnar => "Columnar transposition",
            CipherType::DoubleTransposition => "Double transposition",
            CipherType::Monoalphabetic => "Monoalphabetic",
            CipherType::Vernam => "Vernam",
            CipherType::KeylessTransposition => "Keyless transposition",
            CipherType::Product => "Product",
        }
    }
}

impl fmt::Display for CipherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CipherType {
    type Err = CrackboxError;

    fn from_str(s: &str) -> Result<Self> {
        let canonical: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let cipher = match canonical.as_str() {
            "additive" | "caesar" | "shift" => CipherType::Additive,
            "multiplicative" => CipherType::Multiplicative,
            "affine" => CipherType::Affine,
            "vigenere" => CipherType::Vigenere,
            "autokey" => CipherType::Autokey,
            "playfair" => CipherType::Playfair,
            "hill" => CipherType::Hill,
            "railfence" | "rail" => CipherType::RailFence,
            "columnar" | "columnartransposition" => CipherType::Columnar,
            "double" | "doubletransposition" => CipherType::DoubleTransposition,
            "monoalphabetic" | "substitution" => CipherType::Monoalphabetic,
            "vernam" | "otp" | "onetimepad" => CipherType::Vernam,
            "keyless" | "keylesstransposition" => CipherType::KeylessTransposition,
            "product" => CipherType::Product,
            _ => {
                return Err(CrackboxError::invalid_input(format!(
                    "unknown cipher type: {}",
                    s
                )));
            }
        };
        Ok(cipher)
    }
}

/// A key for one cipher family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CipherKey {
    Additive(i64),
    Multiplicative(i64),
    Affine { a: i64, b: i64 },
    Vigenere(String),
    /// Seed shift for the first letter.
    Autokey(i64),
    Playfair(String),
    Hill(HillMatrix),
    RailFence(usize),
    Columnar(String),
    DoubleTransposition(String, String),
    /// Keyword seeding the substitution alphabet.
    Monoalphabetic(String),
    Vernam(String),
    KeylessTransposition(usize),
    Product {
        substitution: Box<CipherKey>,
        transposition: Box<CipherKey>,
    },
}

impl CipherKey {
    pub fn cipher_type(&self) -> CipherType {
        match self {
            CipherKey::Additive(_) => CipherType::Additive,
            CipherKey::Multiplicative(_) => CipherType::Multiplicative,
            CipherKey::Affine { .. } => CipherType::Affine,
            CipherKey::Vigenere(_) => CipherType::Vigenere,
            CipherKey::Autokey(_) => CipherType::Autokey,
            CipherKey::Playfair(_) => CipherType::Playfair,
            CipherKey::Hill(_) => CipherType::Hill,
            CipherKey::RailFence(_) => CipherType::RailFence,
            CipherKey::Columnar(_) => CipherType::Columnar,
            CipherKey::DoubleTransposition(..) => CipherType::DoubleTransposition,
            CipherKey::Monoalphabetic(_) => CipherType::Monoalphabetic,
            CipherKey::Vernam(_) => CipherType::Vernam,
            CipherKey::KeylessTransposition(_) => CipherType::KeylessTransposition,
            CipherKey::Product { .. } => CipherType::Product,
        }
    }

    /// Builds a product key, checking that each leg fills the right slot.
    pub fn product(substitution: CipherKey, transposition: CipherKey) -> Result<CipherKey> {
        let key = CipherKey::Product {
            substitution: Box::new(substitution),
            transposition: Box::new(transposition),
        };
        key.validate()?;
        Ok(key)
    }

    /// Checks the key against its cipher's validity constraint.
    ///
    /// The Vernam length requirement depends on the text and is checked by
    /// encode/decode before any letter is produced.
    pub fn validate(&self) -> Result<()> {
        match self {
            CipherKey::Additive(k) => shift::validate_additive(*k),
            CipherKey::Multiplicative(k) => shift::validate_multiplicative(*k),
            CipherKey::Affine { a, b } => shift::validate_affine(*a, *b),
            CipherKey::Vigenere(key) => polyalpha::validate_vigenere(key),
            CipherKey::Autokey(seed) => polyalpha::validate_autokey(*seed),
            CipherKey::Playfair(keyword) => playfair::validate(keyword),
            CipherKey::Hill(m) => hill::validate(m),
            CipherKey::RailFence(rails) => transposition::validate_rails(*rails),
            CipherKey::Columnar(key) => transposition::validate_keyword(key),
            CipherKey::DoubleTransposition(first, second) => {
                transposition::validate_keyword(first)?;
                transposition::validate_keyword(second)
            }
            CipherKey::Monoalphabetic(keyword) => substitution::validate(keyword),
            CipherKey::Vernam(pad) => polyalpha::validate_vernam_pad(pad),
            CipherKey::KeylessTransposition(columns) => transposition::validate_columns(*columns),
            CipherKey::Product {
                substitution,
                transposition,
            } => product::validate_legs(substitution, transposition),
        }
    }

    pub fn encode(&self, plaintext: &str) -> Result<String> {
        self.validate()?;
        match self {
            CipherKey::Additive(k) => shift::additive_encode(plaintext, *k),
            CipherKey::Multiplicative(k) => shift::multiplicative_encode(plaintext, *k),
            CipherKey::Affine { a, b } => shift::affine_encode(plaintext, *a, *b),
            CipherKey::Vigenere(key) => polyalpha::vigenere_encode(plaintext, key),
            CipherKey::Autokey(seed) => polyalpha::autokey_encode(plaintext, *seed),
            CipherKey::Playfair(keyword) => playfair::encode(plaintext, keyword),
            CipherKey::Hill(m) => hill::encode(plaintext, m),
            CipherKey::RailFence(rails) => transposition::rail_fence_encode(plaintext, *rails),
            CipherKey::Columnar(key) => transposition::columnar_encode(plaintext, key),
            CipherKey::DoubleTransposition(first, second) => {
                transposition::double_encode(plaintext, first, second)
            }
            CipherKey::Monoalphabetic(keyword) => substitution::encode(plaintext, keyword),
            CipherKey::Vernam(pad) => polyalpha::vernam_encode(plaintext, pad),
            CipherKey::KeylessTransposition(columns) => {
                transposition::keyless_encode(plaintext, *columns)
            }
            CipherKey::Product {
                substitution,
                transposition,
            } => product::encode(plaintext, substitution, transposition),
        }
    }

    pub fn decode(&self, ciphertext: &str) -> Result<String> {
        self.validate()?;
        match self {
            CipherKey::Additive(k) => shift::additive_decode(ciphertext, *k),
            CipherKey::Multiplicative(k) => shift::multiplicative_decode(ciphertext, *k),
            CipherKey::Affine { a, b } => shift::affine_decode(ciphertext, *a, *b),
            CipherKey::Vigenere(key) => polyalpha::vigenere_decode(ciphertext, key),
            CipherKey::Autokey(seed) => polyalpha::autokey_decode(ciphertext, *seed),
            CipherKey::Playfair(keyword) => playfair::decode(ciphertext, keyword),
            CipherKey::Hill(m) => hill::decode(ciphertext, m),
            CipherKey::RailFence(rails) => transposition::rail_fence_decode(ciphertext, *rails),
            CipherKey::Columnar(key) => transposition::columnar_decode(ciphertext, key),
            CipherKey::DoubleTransposition(first, second) => {
                transposition::double_decode(ciphertext, first, second)
            }
            CipherKey::Monoalphabetic(keyword) => substitution::decode(ciphertext, keyword),
            CipherKey::Vernam(pad) => polyalpha::vernam_decode(ciphertext, pad),
            CipherKey::KeylessTransposition(columns) => {
                transposition::keyless_decode(ciphertext, *columns)
            }
            CipherKey::Product {
                substitution,
                transposition,
            } => product::decode(ciphertext, substitution, transposition),
        }
    }

    /// Parses the textual key forms accepted on the command line.
    ///
    /// | cipher | form |
    /// |---|---|
    /// | Additive, Multiplicative, Autokey | `3` |
    /// | Affine | `5,8` |
    /// | Hill | `3,3,2,5` (row-major) |
    /// | Rail fence, Keyless | `3` |
    /// | Double transposition | `ZEBRA,LEMON` |
    /// | Product | `<substitution key>;<transposition key>` |
    /// | everything else | a keyword |
    pub fn parse(cipher: CipherType, text: &str, options: &ProductOptions) -> Result<CipherKey> {
        let text = text.trim();
        let key = match cipher {
            CipherType::Additive => CipherKey::Additive(parse_int(text, cipher)?),
            CipherType::Multiplicative => CipherKey::Multiplicative(parse_int(text, cipher)?),
            CipherType::Autokey => CipherKey::Autokey(parse_int(text, cipher)?),
            CipherType::Affine => {
                let parts = parse_int_list(text, cipher)?;
                match parts.as_slice() {
                    [a, b] => CipherKey::Affine { a: *a, b: *b },
                    _ => return Err(malformed(cipher, text, "expected two numbers a,b")),
                }
            }
            CipherType::Hill => {
                let parts = parse_int_list(text, cipher)?;
                match parts.as_slice() {
                    [a, b, c, d] => CipherKey::Hill([[*a, *b], [*c, *d]]),
                    _ => return Err(malformed(cipher, text, "expected four numbers a,b,c,d")),
                }
            }
            CipherType::RailFence => CipherKey::RailFence(parse_count(text, cipher)?),
            CipherType::KeylessTransposition => {
                CipherKey::KeylessTransposition(parse_count(text, cipher)?)
            }
            CipherType::Vigenere => CipherKey::Vigenere(alphabet::letters_only(text)),
            CipherType::Playfair => CipherKey::Playfair(alphabet::letters_only(text)),
            CipherType::Columnar => CipherKey::Columnar(alphabet::letters_only(text)),
            CipherType::Monoalphabetic => CipherKey::Monoalphabetic(alphabet::letters_only(text)),
            CipherType::Vernam => CipherKey::Vernam(alphabet::letters_only(text)),
            CipherType::DoubleTransposition => match text.split_once(',') {
                Some((first, second)) => CipherKey::DoubleTransposition(
                    alphabet::letters_only(first),
                    alphabet::letters_only(second),
                ),
                None => return Err(malformed(cipher, text, "expected two keywords FIRST,SECOND")),
            },
            CipherType::Product => {
                let (sub_type, trans_type) = options.legs()?;
                let (sub_text, trans_text) = text.split_once(';').ok_or_else(|| {
                    malformed(cipher, text, "expected <substitution key>;<transposition key>")
                })?;
                let substitution = CipherKey::parse(sub_type, sub_text, options)?;
                let transposition = CipherKey::parse(trans_type, trans_text, options)?;
                CipherKey::Product {
                    substitution: Box::new(substitution),
                    transposition: Box::new(transposition),
                }
            }
        };
        key.validate()?;
        Ok(key)
    }

    /// Renders the key in the form [`CipherKey::parse`] accepts.
    pub fn to_key_text(&self) -> String {
        match self {
            CipherKey::Additive(k) | CipherKey::Multiplicative(k) | CipherKey::Autokey(k) => {
                k.to_string()
            }
            CipherKey::Affine { a, b } => format!("{},{}", a, b),
            CipherKey::Hill(m) => format!("{},{},{},{}", m[0][0], m[0][1], m[1][0], m[1][1]),
            CipherKey::RailFence(n) | CipherKey::KeylessTransposition(n) => n.to_string(),
            CipherKey::Vigenere(word)
            | CipherKey::Playfair(word)
            | CipherKey::Columnar(word)
            | CipherKey::Monoalphabetic(word)
            | CipherKey::Vernam(word) => word.clone(),
            CipherKey::DoubleTransposition(first, second) => format!("{},{}", first, second),
            CipherKey::Product {
                substitution,
                transposition,
            } => format!("{};{}", substitution.to_key_text(), transposition.to_key_text()),
        }
    }

    /// Draws a random valid key.
    ///
    /// `length` is the letter count of the text the key will be used on; only
    /// Vernam needs it.
    pub fn random<R: Rng + ?Sized>(
        cipher: CipherType,
        options: &ProductOptions,
        length: usize,
        rng: &mut R,
    ) -> Result<CipherKey> {
        let key = match cipher {
            CipherType::Additive => CipherKey::Additive(rng.gen_range(0..26)),
            CipherType::Multiplicative => CipherKey::Multiplicative(random_multiplier(rng)),
            CipherType::Affine => CipherKey::Affine {
                a: random_multiplier(rng),
                b: rng.gen_range(0..26),
            },
            CipherType::Vigenere => CipherKey::Vigenere(random_word(rng, 3, 8)),
            CipherType::Autokey => CipherKey::Autokey(rng.gen_range(0..26)),
            CipherType::Playfair => CipherKey::Playfair(random_word(rng, 5, 9)),
            CipherType::Hill => CipherKey::Hill(hill::random_matrix(rng)),
            CipherType::RailFence => CipherKey::RailFence(rng.gen_range(2..=6)),
            CipherType::Columnar => CipherKey::Columnar(random_word(rng, 4, 8)),
            CipherType::DoubleTransposition => {
                CipherKey::DoubleTransposition(random_word(rng, 4, 8), random_word(rng, 4, 8))
            }
            CipherType::Monoalphabetic => {
                let mut letters = alphabet::LETTERS.to_vec();
                letters.shuffle(rng);
                CipherKey::Monoalphabetic(letters.into_iter().map(char::from).collect())
            }
            CipherType::Vernam => CipherKey::Vernam(polyalpha::random_vernam_key(length.max(1), rng)),
            CipherType::KeylessTransposition => {
                CipherKey::KeylessTransposition(rng.gen_range(2..=8))
            }
            CipherType::Product => {
                let (sub_type, trans_type) = options.legs()?;
                CipherKey::Product {
                    substitution: Box::new(CipherKey::random(sub_type, options, length, rng)?),
                    transposition: Box::new(CipherKey::random(trans_type, options, length, rng)?),
                }
            }
        };
        key.validate()?;
        Ok(key)
    }
}

impl fmt::Display for CipherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherKey::Additive(k) | CipherKey::Multiplicative(k) => write!(f, "k={}", k),
            CipherKey::Affine { a, b } => write!(f, "a={}, b={}", a, b),
            CipherKey::Vigenere(key) | CipherKey::Columnar(key) | CipherKey::Vernam(key) => {
                write!(f, "key={}", key)
            }
            CipherKey::Autokey(seed) => write!(f, "seed={}", seed),
            CipherKey::Playfair(keyword) | CipherKey::Monoalphabetic(keyword) => {
                write!(f, "keyword={}", keyword)
            }
            CipherKey::Hill(m) => write!(f, "[[{},{}],[{},{}]]", m[0][0], m[0][1], m[1][0], m[1][1]),
            CipherKey::RailFence(rails) => write!(f, "rails={}", rails),
            CipherKey::DoubleTransposition(first, second) => {
                write!(f, "keys={}/{}", first, second)
            }
            CipherKey::KeylessTransposition(columns) => write!(f, "columns={}", columns),
            CipherKey::Product {
                substitution,
                transposition,
            } => write!(
                f,
                "{} {} + {} {}",
                substitution.cipher_type(),
                substitution,
                transposition.cipher_type(),
                transposition
            ),
        }
    }
}

/// Encodes `plaintext` with `key`, which must belong to `cipher`.
pub fn encode(cipher: CipherType, plaintext: &str, key: &CipherKey) -> Result<String> {
    check_cipher(cipher, key)?;
    key.encode(plaintext)
}

/// Decodes `ciphertext` with `key`, which must belong to `cipher`.
pub fn decode(cipher: CipherType, ciphertext: &str, key: &CipherKey) -> Result<String> {
    check_cipher(cipher, key)?;
    key.decode(ciphertext)
}

fn check_cipher(cipher: CipherType, key: &CipherKey) -> Result<()> {
    if key.cipher_type() != cipher {
        return Err(CrackboxError::invalid_key(format!(
            "{} key cannot be used with the {} cipher",
            key.cipher_type(),
            cipher
        )));
    }
    Ok(())
}

fn malformed(cipher: CipherType, text: &str, hint: &str) -> CrackboxError {
    CrackboxError::invalid_key(format!(
        "malformed {} key {:?}: {}",
        cipher.name(),
        text,
        hint
    ))
}

fn parse_int(text: &str, cipher: CipherType) -> Result<i64> {
    text.parse::<i64>()
        .map_err(|_| malformed(cipher, text, "expected an integer"))
}

fn parse_count(text: &str, cipher: CipherType) -> Result<usize> {
    text.parse::<usize>()
        .map_err(|_| malformed(cipher, text, "expected a positive integer"))
}

fn parse_int_list(text: &str, cipher: CipherType) -> Result<Vec<i64>> {
    text.split(',')
        .map(|part| parse_int(part.trim(), cipher))
        .collect()
}

fn random_multiplier<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    MULTIPLICATIVE_KEYS[rng.gen_range(0..MULTIPLICATIVE_KEYS.len())]
}

fn random_word<R: Rng + ?Sized>(rng: &mut R, min_len: usize, max_len: usize) -> String {
    let len = rng.gen_range(min_len..=max_len);
    (0..len)
        .map(|_| alphabet::from_index(rng.gen_range(0..26)))
        .collect()
}
