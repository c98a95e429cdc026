//! Supported ciphers and their key length rules.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KeyError;

/// Key size of a DES key in bytes.
pub const DES_KEY_SIZE: usize = 8;

/// Key size of a ChaCha20 key in bytes.
pub const CHACHA20_KEY_SIZE: usize = 32;

/// Key sizes accepted for AES, in bytes.
pub const AES_KEY_SIZES: [usize; 3] = [16, 24, 32];

/// Ciphers the remote encryption service understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// AES with a 128, 192 or 256-bit key.
    #[serde(rename = "AES")]
    Aes,
    /// ChaCha20 stream cipher with a 256-bit key.
    #[serde(rename = "CHACHA20")]
    ChaCha20,
    /// Legacy DES with a 64-bit key.
    #[serde(rename = "DES")]
    Des,
}

/// How over-length text is squeezed into a key buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldStrategy {
    /// Keep the leading bytes and drop the rest.
    Truncate,
    /// XOR every byte into position `i mod len`.
    XorFold,
}

impl Algorithm {
    /// All supported algorithms.
    pub const ALL: [Algorithm; 3] = [Algorithm::Aes, Algorithm::ChaCha20, Algorithm::Des];

    /// Returns the wire tag (`AES`, `CHACHA20`, `DES`).
    pub fn tag(self) -> &'static str {
        match self {
            Self::Aes => "AES",
            Self::ChaCha20 => "CHACHA20",
            Self::Des => "DES",
        }
    }

    /// Returns the required key length in bytes.
    ///
    /// `bits` selects the AES strength and defaults to 256. ChaCha20 and DES
    /// have a fixed size and ignore it.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::UnsupportedKeySize`] for an AES strength other
    /// than 128, 192 or 256.
    pub fn key_len(self, bits: Option<u16>) -> Result<usize, KeyError> {
        match self {
            Self::Aes => {
                let size = match bits {
                    Some(bits) => AesKeySize::try_from(bits)?,
                    None => AesKeySize::default(),
                };
                Ok(size.bytes())
            },
            Self::ChaCha20 => Ok(CHACHA20_KEY_SIZE),
            Self::Des => Ok(DES_KEY_SIZE),
        }
    }

    /// Returns true if a decoded key of `len` bytes is usable with this algorithm.
    pub fn accepts_len(self, len: usize) -> bool {
        match self {
            Self::Aes => AES_KEY_SIZES.contains(&len),
            Self::ChaCha20 => len == CHACHA20_KEY_SIZE,
            Self::Des => len == DES_KEY_SIZE,
        }
    }

    /// Returns the strategy used when normalizing text longer than the key.
    ///
    /// DES folds, AES and ChaCha20 truncate. Keys already derived under these
    /// rules must keep decrypting, so the two are never merged.
    pub fn fold_strategy(self) -> FoldStrategy {
        match self {
            Self::Aes => FoldStrategy::Truncate,
            Self::ChaCha20 => FoldStrategy::Truncate,
            Self::Des => FoldStrategy::XorFold,
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Algorithm {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| KeyError::UnsupportedAlgorithm(s.to_string()))
    }
}

/// AES key strengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AesKeySize {
    /// 128-bit key (16 bytes).
    Aes128,
    /// 192-bit key (24 bytes).
    Aes192,
    /// 256-bit key (32 bytes).
    #[default]
    Aes256,
}

impl AesKeySize {
    /// Key length in bytes.
    pub fn bytes(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }

    /// Key length in bits.
    pub fn bits(self) -> u16 {
        match self {
            Self::Aes128 => 128,
            Self::Aes192 => 192,
            Self::Aes256 => 256,
        }
    }
}

impl TryFrom<u16> for AesKeySize {
    type Error = KeyError;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        match bits {
            128 => Ok(Self::Aes128),
            192 => Ok(Self::Aes192),
            256 => Ok(Self::Aes256),
            other => Err(KeyError::UnsupportedKeySize(other)),
        }
    }
}
