//! Base64 key codec.
//!
//! Keys cross every boundary as standard-alphabet, padded Base64 text.
//! Decoding is slightly more forgiving than encoding: ASCII whitespace is
//! stripped and trailing `=` padding may be omitted, the way browsers'
//! `atob` accepts it. Wrong padding, foreign characters and non-canonical
//! trailing bits are still rejected, so every accepted text decodes to
//! exactly one byte sequence.

use base64::{
    alphabet,
    engine::{general_purpose::STANDARD, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use zeroize::Zeroizing;

use crate::error::KeyError;

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encodes bytes as padded standard Base64 with no line wrapping.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes Base64 text into raw bytes.
///
/// ASCII whitespace anywhere in `text` is ignored.
///
/// # Errors
///
/// Returns [`KeyError::Format`] if the remaining text is not valid Base64.
pub fn decode(text: &str) -> Result<Zeroizing<Vec<u8>>, KeyError> {
    let compact: Zeroizing<String> =
        Zeroizing::new(text.chars().filter(|c| !c.is_ascii_whitespace()).collect());

    Ok(Zeroizing::new(LENIENT.decode(compact.as_bytes())?))
}

/// Re-serializes decodable text in the codec's canonical form.
///
/// # Errors
///
/// Returns [`KeyError::Format`] if `text` does not decode.
pub fn canonicalize(text: &str) -> Result<String, KeyError> {
    let bytes = decode(text)?;
    Ok(encode(&bytes))
}
