//! ASCII check and tier dispatch.
//!
//! An [`Upcaser`] is built once from a [`CapabilityFlags`] value, picks its
//! kernel at construction and is then reused for every call. Input holding
//! any byte above 0x7F never reaches a kernel; it is handed whole to the
//! configured [`Fallback`].

use crate::core::tier::Tier;
use crate::errors::TierUnavailableError;
use crate::features::CapabilityFlags;
use crate::simd;
use std::collections::TryReserveError;

/// Generic uppercase routine used for input that is not pure ASCII.
pub type Fallback = fn(&[u8]) -> Vec<u8>;

/// Default fallback: Unicode uppercasing for valid UTF-8.
///
/// Unicode uppercasing can change the byte length (`"ß"` becomes `"SS"`).
/// Bytes that are not valid UTF-8 cannot be case mapped, so such input only
/// has its ASCII letters uppercased and every other byte kept as is.
pub fn unicode_fallback(input: &[u8]) -> Vec<u8> {
    match std::str::from_utf8(input) {
        Ok(text) => text.to_uppercase().into_bytes(),
        Err(_) => input.to_ascii_uppercase(),
    }
}

/// Uppercases byte strings with the fastest kernel the host allows.
#[derive(Debug, Clone, Copy)]
pub struct Upcaser {
    capabilities: CapabilityFlags,
    tier: Tier,
    fallback: Fallback,
}

impl Default for Upcaser {
    fn default() -> Self {
        Self::detect()
    }
}

impl Upcaser {
    /// Dispatcher for the running CPU.
    pub fn detect() -> Self {
        Self::with_capabilities(CapabilityFlags::detect())
    }

    /// Dispatcher for an explicit capability set.
    ///
    /// The set is intersected with the detected host capabilities, so it can
    /// lower the selected tier but never enable an instruction set the CPU
    /// lacks.
    pub fn with_capabilities(capabilities: CapabilityFlags) -> Self {
        let capabilities = capabilities.intersect(CapabilityFlags::detect());
        let tier = capabilities.best_tier();
        tracing::debug!(tier = tier.label(), "selected upcase kernel");

        Upcaser {
            capabilities,
            tier,
            fallback: unicode_fallback,
        }
    }

    /// Dispatcher pinned to one tier.
    pub fn with_tier(tier: Tier) -> Result<Self, TierUnavailableError> {
        let host = CapabilityFlags::detect();
        if !host.supports(tier) {
            return Err(TierUnavailableError::new(tier.label(), host.instruction_set()));
        }

        let mut upcaser = Self::with_capabilities(host.capped(tier));
        upcaser.tier = tier;
        Ok(upcaser)
    }

    /// Replaces the routine used for non-ASCII input.
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn capabilities(&self) -> CapabilityFlags {
        self.capabilities
    }

    /// Tier every ASCII call runs on.
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Label of the best tier in the held capability set:
    /// `"AVX2"`, `"AVX"`, `"SSE2"` (`"NEON"` on aarch64) or `"DEFAULT"`.
    pub fn instruction_set(&self) -> &'static str {
        self.capabilities.instruction_set()
    }

    /// Uppercases `input` into a new buffer of the same length.
    ///
    /// Input containing a byte above 0x7F is passed whole to the fallback and
    /// its result returned unchanged.
    pub fn upcase(&self, input: &[u8]) -> Vec<u8> {
        if !input.is_ascii() {
            tracing::trace!(len = input.len(), "non-ascii input, delegating to fallback");
            return (self.fallback)(input);
        }

        // SAFETY: `tier` never exceeds the detected host capabilities
        unsafe { simd::upcase_validated(input, self.tier) }
    }

    /// Like [`Upcaser::upcase`], but returns an error instead of aborting
    /// when the output buffer cannot be allocated.
    ///
    /// The fallback path allocates on its own terms and is not covered.
    pub fn try_upcase(&self, input: &[u8]) -> Result<Vec<u8>, TryReserveError> {
        if !input.is_ascii() {
            return Ok((self.fallback)(input));
        }

        // SAFETY: `tier` never exceeds the detected host capabilities
        unsafe { simd::try_upcase_validated(input, self.tier) }
    }

    /// Uppercases a string slice.
    pub fn upcase_str(&self, input: &str) -> String {
        let bytes = self.upcase(input.as_bytes());
        // Both paths preserve UTF-8: kernels only touch ASCII letters and
        // the fallback's output is produced from `str` data
        String::from_utf8(bytes)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
    }
}
