//! ASCII uppercasing on the widest vector unit the CPU offers.
//!
//! ```
//! assert_eq!(simd_upcase::upcase(b"abcXYZ123"), b"ABCXYZ123");
//! println!("running on {}", simd_upcase::instruction_set());
//! ```
//!
//! The process-wide functions use a dispatcher built on first use. Build an
//! [`Upcaser`] directly to cap the tier or supply a different fallback for
//! non-ASCII input.

mod core;
mod dispatch;
mod errors;
mod features;

pub mod bench;
pub mod simd;

use std::collections::TryReserveError;
use std::sync::OnceLock;

pub use crate::core::config::{BenchSettings, DispatchSettings, LogSettings, Settings};
pub use crate::core::tier::Tier;
pub use dispatch::{Fallback, Upcaser, unicode_fallback};
pub use errors::{ConfigError, TierUnavailableError, UnknownTierError};
pub use features::CapabilityFlags;
pub use simd::upcase_with_tier;

static DEFAULT_UPCASER: OnceLock<Upcaser> = OnceLock::new();

/// The process-wide dispatcher, detected on first call.
pub fn default_upcaser() -> &'static Upcaser {
    DEFAULT_UPCASER.get_or_init(Upcaser::detect)
}

/// Uppercases `input` with the process-wide dispatcher.
pub fn upcase(input: &[u8]) -> Vec<u8> {
    default_upcaser().upcase(input)
}

/// Like [`upcase`], reporting allocation failure instead of aborting.
pub fn try_upcase(input: &[u8]) -> Result<Vec<u8>, TryReserveError> {
    default_upcaser().try_upcase(input)
}

/// Instruction set the process-wide dispatcher uses:
/// `"AVX2"`, `"AVX"`, `"SSE2"` (`"NEON"` on aarch64) or `"DEFAULT"`.
pub fn instruction_set() -> &'static str {
    default_upcaser().instruction_set()
}

#[cfg(test)]
mod tests;
