//! Crackbox - classical cipher toolkit
//!
//! Encodes and decodes fourteen classical ciphers and recovers plaintext from
//! ciphertext by searching each cipher's key space and ranking every decoding
//! by how much it reads like English.
//!
//! ```no_run
//! use crackbox::{CipherType, CrackEngine, CrackJob};
//!
//! let mut engine = CrackEngine::default();
//! engine.submit(CrackJob::new(CipherType::Additive, "KHOOR ZRUOG"))?;
//! let results = engine.wait(|_| {})?;
//! assert_eq!(results[0].plaintext, "HELLO WORLD");
//! # Ok::<(), crackbox::CrackboxError>(())
//! ```

#![forbid(unsafe_code)]

pub mod alphabet;
pub mod analysis;
pub mod cancel;
pub mod candidate;
pub mod cipher;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod file_ops;
pub mod key_source;
pub mod score;
pub mod search;

pub use candidate::{CandidateResult, leading};
pub use cipher::{CipherFamily, CipherKey, CipherType, ProductOptions, decode, encode};
pub use config::EngineConfig;
pub use engine::{CrackEngine, CrackJob, JobState, JobUpdate};
pub use error::{CrackboxError, ErrorCategory, ErrorKind, Result};
pub use search::{CrackTarget, ModernScheme, brute_force};
