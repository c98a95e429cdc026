//! Wire types of the encryption service API.

use cipherkey_core::{Algorithm, EncodedKey};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/encrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionRequest {
    /// Plaintext to encrypt.
    pub message: String,
    /// Cipher to use.
    pub algorithm: Algorithm,
    /// Key sized for `algorithm`.
    pub key: EncodedKey,
    /// Optional title stored with the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Body of `POST /api/decrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptionRequest {
    /// Id of the stored message.
    pub message_id: i64,
    /// Key sized for the message's algorithm.
    pub key: EncodedKey,
}

/// A message stored by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedMessage {
    /// Message id.
    pub id: i64,
    /// Title, if one was given.
    #[serde(default)]
    pub title: Option<String>,
    /// Base64 ciphertext.
    pub encrypted_content: String,
    /// Cipher used.
    pub algorithm: Algorithm,
    /// Creation timestamp as sent by the service.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response of `POST /api/decrypt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptedMessage {
    /// Recovered plaintext.
    pub decrypted_message: String,
}

/// Error body returned on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}
