//! Choosing between a typed key and a typed password.
//!
//! A key field accepts either Base64 key material or a free-text password.
//! The validator decides which one it is; passwords are normalized.

use tracing::debug;

use crate::algorithm::Algorithm;
use crate::codec;
use crate::error::KeyError;
use crate::keys::EncodedKey;
use crate::normalizer::normalize;
use crate::validator::is_valid_key;

/// Where a resolved key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// The input already was a valid key.
    Provided,
    /// The input was treated as a password and normalized.
    Normalized,
}

/// A key ready to be sent to the encryption service.
#[derive(Debug, Clone)]
pub struct ResolvedKey {
    /// Canonical Base64 key.
    pub key: EncodedKey,
    /// How `key` was obtained.
    pub source: KeySource,
}

/// Turns key-field input into a key usable with `algorithm`.
///
/// Input that [`is_valid_key`] accepts is kept and re-serialized in
/// canonical form. Anything else goes through [`normalize`], with `bits`
/// selecting the AES strength. A valid AES key of any accepted size is kept
/// even if `bits` asks for another.
///
/// # Errors
///
/// Returns [`KeyError::UnsupportedKeySize`] when normalization is needed and
/// `bits` is not a supported AES strength.
pub fn resolve_key(
    algorithm: Algorithm,
    input: &str,
    bits: Option<u16>,
) -> Result<ResolvedKey, KeyError> {
    if is_valid_key(input, Some(algorithm)) {
        let canonical = codec::canonicalize(input)?;
        debug!(%algorithm, "using provided key");
        return Ok(ResolvedKey {
            key: EncodedKey::from_canonical(canonical),
            source: KeySource::Provided,
        });
    }

    debug!(%algorithm, "input is not a valid key, normalizing");
    Ok(ResolvedKey {
        key: normalize(algorithm, input, bits)?,
        source: KeySource::Normalized,
    })
}
