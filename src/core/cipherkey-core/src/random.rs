//! Entropy sources for key generation.
//!
//! Production code draws from the operating system's CSPRNG. If that source
//! fails, bytes come from a time-seeded generator instead and the result is
//! flagged [`EntropyQuality::Degraded`] so the caller can react.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::{rngs::OsRng, rngs::StdRng, CryptoRng, RngCore, SeedableRng};
use tracing::warn;

/// Whether generated bytes came from a cryptographically secure source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyQuality {
    /// Bytes came from a cryptographically secure source.
    Secure,
    /// The secure source was unavailable; bytes are predictable.
    Degraded,
}

/// A source of random bytes for key generation.
pub trait EntropySource {
    /// Fills `dest` entirely and reports the quality of the bytes written.
    fn fill(&mut self, dest: &mut [u8]) -> EntropyQuality;
}

/// Cryptographic RNG with a non-cryptographic fallback.
#[derive(Debug, Clone, Default)]
pub struct FallbackEntropy<R> {
    primary: R,
}

/// The operating system CSPRNG with fallback.
pub type SystemEntropy = FallbackEntropy<OsRng>;

impl<R> FallbackEntropy<R>
where
    R: RngCore + CryptoRng,
{
    /// Wraps a cryptographic RNG.
    pub fn new(primary: R) -> Self {
        Self { primary }
    }
}

impl<R> EntropySource for FallbackEntropy<R>
where
    R: RngCore + CryptoRng,
{
    fn fill(&mut self, dest: &mut [u8]) -> EntropyQuality {
        match self.primary.try_fill_bytes(dest) {
            Ok(()) => EntropyQuality::Secure,
            Err(err) => {
                warn!(
                    error = %err,
                    "secure random source unavailable, generated key is not cryptographically secure"
                );
                fill_insecure(dest);
                EntropyQuality::Degraded
            },
        }
    }
}

static FALLBACK_CALLS: AtomicU64 = AtomicU64::new(0);

/// Fills `dest` from a generator seeded with the clock, process id and a
/// call counter. Never used when the OS source works.
fn fill_insecure(dest: &mut [u8]) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let call = FALLBACK_CALLS.fetch_add(1, Ordering::Relaxed);
    let seed = nanos
        ^ u64::from(std::process::id()).rotate_left(32)
        ^ call.wrapping_mul(0x9E37_79B9_7F4A_7C15);

    StdRng::seed_from_u64(seed).fill_bytes(dest);
}
