//! # Cipherkey Client
//!
//! Sends messages and keys to the remote encryption service.
//!
//! Key-field input is resolved with [`cipherkey_core::resolve_key`] before
//! it leaves the process, so the service always receives a key of the exact
//! length it expects for the chosen algorithm.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod types;

pub use config::ClientConfig;
pub use error::ClientError;
pub use http::HttpEncryptionService;
pub use service::EncryptionService;
pub use types::{DecryptedMessage, DecryptionRequest, EncryptedMessage, EncryptionRequest};

use cipherkey_core::{resolve_key, Algorithm, KeySource};
use tracing::info;

/// Encrypts `message` with a key or password typed by the user.
///
/// # Errors
///
/// Returns [`ClientError::Key`] for an unsupported AES strength, or any
/// error from the service.
pub async fn encrypt_message<S>(
    service: &S,
    algorithm: Algorithm,
    key_input: &str,
    bits: Option<u16>,
    message: &str,
    title: Option<&str>,
) -> Result<EncryptedMessage, ClientError>
where
    S: EncryptionService + ?Sized,
{
    let resolved = resolve_key(algorithm, key_input, bits)?;
    if resolved.source == KeySource::Normalized {
        info!(%algorithm, "key input treated as a password");
    }

    let request = EncryptionRequest {
        message: message.to_string(),
        algorithm,
        key: resolved.key,
        title: title.map(str::to_string),
    };

    service.encrypt(&request).await
}

/// Decrypts a stored message with a key or password typed by the user.
///
/// `algorithm` must be the one the message was encrypted with; it decides
/// how a password is normalized.
///
/// # Errors
///
/// Returns [`ClientError::Key`] for an unsupported AES strength, or any
/// error from the service.
pub async fn decrypt_message<S>(
    service: &S,
    algorithm: Algorithm,
    key_input: &str,
    bits: Option<u16>,
    message_id: i64,
) -> Result<DecryptedMessage, ClientError>
where
    S: EncryptionService + ?Sized,
{
    let resolved = resolve_key(algorithm, key_input, bits)?;
    if resolved.source == KeySource::Normalized {
        info!(%algorithm, message_id, "key input treated as a password");
    }

    let request = DecryptionRequest {
        message_id,
        key: resolved.key,
    };

    service.decrypt(&request).await
}
