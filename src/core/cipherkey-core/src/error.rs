//! Key material error types.

use thiserror::Error;

/// Errors that can occur while producing or decoding key material.
#[derive(Debug, Error)]
pub enum KeyError {
    /// Text is not decodable as Base64.
    #[error("invalid key format: {0}")]
    Format(#[from] base64::DecodeError),

    /// Algorithm tag outside the supported set.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// AES bit strength other than 128, 192 or 256.
    #[error("unsupported AES key size: {0} bits (expected 128, 192 or 256)")]
    UnsupportedKeySize(u16),
}
