//! Deterministic text-to-key conversion.
//!
//! Turns a memorable password into a key of the exact length an algorithm
//! needs, so the same text always yields the same key. This is byte fitting,
//! not a key derivation function: there is no salt and no work factor, and
//! short or empty passwords give weak keys. An empty password becomes an
//! all-zero key. Both behaviors are kept because data already encrypted
//! under these keys must stay decryptable; moving to a real KDF needs a
//! versioned migration, not a silent change here.

use tracing::debug;

use crate::algorithm::{Algorithm, FoldStrategy};
use crate::error::KeyError;
use crate::keys::{EncodedKey, KeyBuffer};

/// Converts `text` into a Base64 key sized for `algorithm`.
///
/// `bits` selects the AES strength (default 256) and is ignored for
/// ChaCha20 and DES. Normalizing the returned Base64 again gives a
/// different key; check it with the validator first.
///
/// # Errors
///
/// Returns [`KeyError::UnsupportedKeySize`] for an unsupported AES strength.
pub fn normalize(algorithm: Algorithm, text: &str, bits: Option<u16>) -> Result<EncodedKey, KeyError> {
    let len = algorithm.key_len(bits)?;
    let strategy = algorithm.fold_strategy();
    let key = fit_bytes(strategy, text.as_bytes(), len);

    debug!(
        %algorithm,
        input_len = text.len(),
        key_len = len,
        ?strategy,
        "normalized text into key"
    );

    Ok(key.encode())
}

/// Fits `src` into exactly `len` bytes.
///
/// Empty input gives zeros, shorter input repeats, input of the right
/// length is copied, longer input is reduced with `strategy`. A zero `len`
/// gives an empty buffer.
pub fn fit_bytes(strategy: FoldStrategy, src: &[u8], len: usize) -> KeyBuffer {
    let mut out = vec![0u8; len];
    let n = src.len();

    if n == 0 || len == 0 {
        return KeyBuffer::new(out);
    }

    if n == len {
        out.copy_from_slice(src);
    } else if n < len {
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = src[i % n];
        }
    } else {
        match strategy {
            FoldStrategy::Truncate => out.copy_from_slice(&src[..len]),
            FoldStrategy::XorFold => {
                for (i, byte) in src.iter().enumerate() {
                    out[i % len] ^= byte;
                }
            },
        }
    }

    KeyBuffer::new(out)
}
