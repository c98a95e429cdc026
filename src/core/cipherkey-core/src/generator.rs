//! Random key generation.

use tracing::debug;

use crate::algorithm::Algorithm;
use crate::error::KeyError;
use crate::keys::{EncodedKey, KeyBuffer};
use crate::random::{EntropyQuality, EntropySource, SystemEntropy};

/// A freshly generated key together with the quality of its randomness.
#[derive(Debug, Clone)]
#[must_use]
pub struct GeneratedKey {
    /// Base64-encoded key.
    pub key: EncodedKey,
    /// Quality of the random bytes behind `key`.
    pub entropy: EntropyQuality,
}

impl GeneratedKey {
    /// Returns true if the key came from the non-cryptographic fallback.
    pub fn is_degraded(&self) -> bool {
        self.entropy == EntropyQuality::Degraded
    }
}

/// Generates a random key for `algorithm` from the operating system CSPRNG.
///
/// `bits` selects the AES strength (128, 192 or 256, default 256) and is
/// ignored for ChaCha20 and DES.
///
/// # Errors
///
/// Returns [`KeyError::UnsupportedKeySize`] for an unsupported AES strength.
pub fn generate_key(algorithm: Algorithm, bits: Option<u16>) -> Result<GeneratedKey, KeyError> {
    generate_key_with(&mut SystemEntropy::default(), algorithm, bits)
}

/// Generates a random key for `algorithm` from the given entropy source.
///
/// # Errors
///
/// Returns [`KeyError::UnsupportedKeySize`] for an unsupported AES strength.
pub fn generate_key_with<S>(
    source: &mut S,
    algorithm: Algorithm,
    bits: Option<u16>,
) -> Result<GeneratedKey, KeyError>
where
    S: EntropySource + ?Sized,
{
    let len = algorithm.key_len(bits)?;

    let mut bytes = vec![0u8; len];
    let entropy = source.fill(&mut bytes);
    let buffer = KeyBuffer::new(bytes);

    debug!(%algorithm, bits = buffer.bits(), ?entropy, "generated key");

    Ok(GeneratedKey {
        key: buffer.encode(),
        entropy,
    })
}
