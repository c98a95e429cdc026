//! Key buffers and their encoded form, zeroized on drop.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::codec;
use crate::error::KeyError;

/// Raw key bytes.
///
/// Built by the generator or normalizer and never modified afterwards.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeyBuffer {
    bytes: Vec<u8>,
}

impl KeyBuffer {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Copies raw bytes into a key buffer.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }

    /// Returns the raw key bytes.
    ///
    /// Use with caution - the returned slice is not zeroized automatically.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true for a zero-length buffer.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Length in bits.
    pub fn bits(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Encodes the buffer as Base64.
    pub fn encode(&self) -> EncodedKey {
        EncodedKey(codec::encode(&self.bytes))
    }
}

impl std::fmt::Debug for KeyBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyBuffer")
            .field("len", &self.bytes.len())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Base64 text of a key buffer, as handed to callers and the remote service.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedKey(String);

impl EncodedKey {
    /// Wraps text that is already known to be canonical Base64.
    pub(crate) fn from_canonical(text: String) -> Self {
        Self(text)
    }

    /// Returns the Base64 text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes back into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Format`] if the text was not produced by this
    /// crate and does not decode.
    pub fn decode(&self) -> Result<KeyBuffer, KeyError> {
        let bytes = codec::decode(&self.0)?;
        Ok(KeyBuffer::from_bytes(&bytes))
    }
}

impl AsRef<str> for EncodedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for EncodedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("EncodedKey").field(&"[REDACTED]").finish()
    }
}
