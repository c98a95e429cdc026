//! # Cipherkey Core
//!
//! Key material for the AES, ChaCha20 and DES ciphers of a remote
//! encryption service.
//!
//! This crate provides:
//! - Base64 key codec
//! - Random key generation with an injectable entropy source
//! - Deterministic text-to-key normalization
//! - Key validation with per-algorithm verdicts
//!
//! Every operation is a stateless function. Nothing here encrypts data or
//! stores keys.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod algorithm;
pub mod codec;
pub mod error;
pub mod generator;
pub mod keys;
pub mod normalizer;
pub mod random;
pub mod resolve;
pub mod validator;

pub use algorithm::{AesKeySize, Algorithm, FoldStrategy};
pub use error::KeyError;
pub use generator::{generate_key, generate_key_with, GeneratedKey};
pub use keys::{EncodedKey, KeyBuffer};
pub use normalizer::normalize;
pub use random::{EntropyQuality, EntropySource, FallbackEntropy, SystemEntropy};
pub use resolve::{resolve_key, KeySource, ResolvedKey};
pub use validator::{
    is_valid_key, key_size_bits, validate, validation_message, KeyVerdict, VerdictKind,
};
