//! Encryption service trait definition.

use async_trait::async_trait;

use crate::error::ClientError;
use crate::types::{DecryptedMessage, DecryptionRequest, EncryptedMessage, EncryptionRequest};

/// A remote service that encrypts and decrypts with caller-supplied keys.
#[async_trait]
pub trait EncryptionService: Send + Sync {
    /// Encrypts and stores a message.
    async fn encrypt(&self, request: &EncryptionRequest) -> Result<EncryptedMessage, ClientError>;

    /// Decrypts a stored message.
    async fn decrypt(&self, request: &DecryptionRequest)
        -> Result<DecryptedMessage, ClientError>;
}
