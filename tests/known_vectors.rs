//! Known-answer vectors for every cipher with a deterministic key form

use crackbox::{CipherKey, CipherType, ProductOptions, decode, encode};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct KnownVector {
    cipher: String,
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    trans: Option<String>,
    key: String,
    plaintext: String,
    ciphertext: String,
    /// Expected decode output when it differs from `plaintext` (stripped
    /// spaces, padding).
    #[serde(default)]
    decoded: Option<String>,
    comment: String,
}

fn load_known_vectors() -> serde_json::Result<Vec<KnownVector>> {
    let json_data = include_str!("../testdata/known-vectors.json");
    serde_json::from_str(json_data)
}

fn parse_cipher(name: &str) -> CipherType {
    name.parse()
        .unwrap_or_else(|e| panic!("bad cipher name {:?}: {}", name, e))
}

#[test]
fn test_known_vectors() {
    let vectors = load_known_vectors().expect("failed to load known vectors");
    println!("Testing {} known vectors", vectors.len());

    let mut failed = 0;
    for (i, vector) in vectors.iter().enumerate() {
        let cipher = parse_cipher(&vector.cipher);
        let options = ProductOptions {
            sub_type: vector.sub.as_deref().map(parse_cipher),
            trans_type: vector.trans.as_deref().map(parse_cipher),
        };
        let key = match CipherKey::parse(cipher, &vector.key, &options) {
            Ok(key) => key,
            Err(e) => {
                eprintln!("Vector {}: FAILED to parse key - {}", i, e);
                eprintln!("  Comment: {}", vector.comment);
                failed += 1;
                continue;
            }
        };

        let encoded = encode(cipher, &vector.plaintext, &key).expect("encode");
        if encoded != vector.ciphertext {
            eprintln!("Vector {}: FAILED - ciphertext mismatch", i);
            eprintln!("  Comment: {}", vector.comment);
            eprintln!("  Expected: {}", vector.ciphertext);
            eprintln!("  Actual:   {}", encoded);
            failed += 1;
            continue;
        }

        let expected = vector
            .decoded
            .clone()
            .unwrap_or_else(|| vector.plaintext.to_ascii_uppercase());
        let decoded = decode(cipher, &vector.ciphertext, &key).expect("decode");
        if decoded != expected {
            eprintln!("Vector {}: FAILED - plaintext mismatch", i);
            eprintln!("  Comment: {}", vector.comment);
            eprintln!("  Expected: {}", expected);
            eprintln!("  Actual:   {}", decoded);
            failed += 1;
        }
    }

    assert_eq!(failed, 0, "{} of {} known vectors failed", failed, vectors.len());
}

#[test]
fn test_every_cipher_has_a_vector() {
    let vectors = load_known_vectors().expect("failed to load known vectors");
    let covered: Vec<CipherType> = vectors.iter().map(|v| parse_cipher(&v.cipher)).collect();
    for cipher in CipherType::ALL {
        assert!(covered.contains(&cipher), "no known vector for {}", cipher);
    }
}

#[test]
fn test_decode_with_wrong_key_type_fails() {
    let err = decode(CipherType::Hill, "HIAT", &CipherKey::Additive(3)).expect_err("wrong type");
    assert_eq!(err.kind, Some(crackbox::ErrorKind::InvalidKey));
}

#[test]
fn test_non_invertible_hill_fails_closed() {
    for m in [[[2, 4], [6, 8]], [[13, 0], [0, 1]], [[1, 2], [2, 4]]] {
        let err = decode(CipherType::Hill, "HIAT", &CipherKey::Hill(m)).expect_err("singular");
        assert_eq!(err.kind, Some(crackbox::ErrorKind::InvalidKey));
    }
}
