//! Key validation.
//!
//! Validation runs on every edit of a key field, so nothing here returns an
//! error: undecodable or mis-sized keys are reported as values.

use serde::Serialize;

use crate::algorithm::Algorithm;
use crate::codec;

/// Outcome class of a validation, for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictKind {
    /// No key was entered.
    Required,
    /// The key is usable.
    Valid,
    /// The key decodes but has the wrong length.
    WrongLength,
    /// The key is not Base64.
    BadFormat,
    /// The algorithm tag is not supported.
    UnknownAlgorithm,
}

/// Result of validating a key for an algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyVerdict {
    /// Blank input.
    Required,
    /// Usable key of `bits` bits.
    Valid {
        /// Algorithm the key was checked against.
        algorithm: Algorithm,
        /// Decoded key size in bits.
        bits: usize,
    },
    /// Decodes to `bits` bits, which the algorithm does not accept.
    WrongLength {
        /// Algorithm the key was checked against.
        algorithm: Algorithm,
        /// Decoded key size in bits.
        bits: usize,
    },
    /// Not decodable as Base64.
    BadFormat {
        /// Algorithm the key was checked against.
        algorithm: Algorithm,
    },
    /// Algorithm tag outside the supported set.
    UnknownAlgorithm(String),
}

impl KeyVerdict {
    /// Returns the outcome class.
    pub fn kind(&self) -> VerdictKind {
        match self {
            Self::Required => VerdictKind::Required,
            Self::Valid { .. } => VerdictKind::Valid,
            Self::WrongLength { .. } => VerdictKind::WrongLength,
            Self::BadFormat { .. } => VerdictKind::BadFormat,
            Self::UnknownAlgorithm(_) => VerdictKind::UnknownAlgorithm,
        }
    }

    /// Returns true for a usable key.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for KeyVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => f.write_str("Key is required"),
            Self::UnknownAlgorithm(_) => f.write_str("Unknown algorithm"),

            Self::Valid {
                algorithm: Algorithm::Aes,
                bits,
            } => write!(f, "Valid AES-{bits} key"),
            Self::Valid {
                algorithm: Algorithm::Des,
                ..
            } => f.write_str("Valid DES key"),
            Self::Valid {
                algorithm: Algorithm::ChaCha20,
                ..
            } => f.write_str("Valid ChaCha20 key (256-bit)"),

            // AES does not tell format and length problems apart.
            Self::WrongLength {
                algorithm: Algorithm::Aes,
                ..
            }
            | Self::BadFormat {
                algorithm: Algorithm::Aes,
            } => f.write_str("Invalid AES key. Please use a Base64-encoded key or generate one."),

            Self::WrongLength {
                algorithm: Algorithm::Des,
                ..
            } => f.write_str("DES key must be exactly 8 bytes (64 bits) when Base64 decoded"),
            Self::BadFormat {
                algorithm: Algorithm::Des,
            } => f.write_str("Invalid DES key format. Please use a Base64-encoded 8-byte key."),

            Self::WrongLength {
                algorithm: Algorithm::ChaCha20,
                ..
            } => f.write_str(
                "ChaCha20 key must be exactly 32 bytes (256 bits) when Base64 decoded",
            ),
            Self::BadFormat {
                algorithm: Algorithm::ChaCha20,
            } => f.write_str(
                "Invalid ChaCha20 key format. Please use a Base64-encoded 32-byte key.",
            ),
        }
    }
}

/// Returns true if `text` decodes to a key the algorithm accepts.
///
/// `None` applies the AES rule (16, 24 or 32 bytes).
pub fn is_valid_key(text: &str, algorithm: Option<Algorithm>) -> bool {
    let algorithm = algorithm.unwrap_or(Algorithm::Aes);
    match codec::decode(text) {
        Ok(bytes) => algorithm.accepts_len(bytes.len()),
        Err(_) => false,
    }
}

/// Returns the decoded key size in bits, or `None` if `text` is not Base64.
pub fn key_size_bits(text: &str) -> Option<usize> {
    codec::decode(text).ok().map(|bytes| bytes.len() * 8)
}

/// Validates `text` against an algorithm given by its wire tag.
///
/// Blank text is reported as required before the tag is looked at.
pub fn validation_message(algorithm: &str, text: &str) -> KeyVerdict {
    if text.trim().is_empty() {
        return KeyVerdict::Required;
    }

    match algorithm.parse::<Algorithm>() {
        Ok(algorithm) => validate(algorithm, text),
        Err(_) => KeyVerdict::UnknownAlgorithm(algorithm.to_string()),
    }
}

/// Validates `text` as a key for `algorithm`.
pub fn validate(algorithm: Algorithm, text: &str) -> KeyVerdict {
    if text.trim().is_empty() {
        return KeyVerdict::Required;
    }

    let bytes = match codec::decode(text) {
        Ok(bytes) => bytes,
        Err(_) => return KeyVerdict::BadFormat { algorithm },
    };
    let bits = bytes.len() * 8;

    if algorithm.accepts_len(bytes.len()) {
        KeyVerdict::Valid { algorithm, bits }
    } else {
        KeyVerdict::WrongLength { algorithm, bits }
    }
}
