//! SIMD-accelerated uppercasing kernels
//!
//! This module provides the platform-specific kernels for each [`Tier`] and
//! the single place where a tier is turned into a kernel call. Runtime CPU
//! feature detection (see [`CapabilityFlags`]) decides which tiers may run.

use crate::core::tier::Tier;
use crate::features::CapabilityFlags;
use std::collections::TryReserveError;

pub mod scalar;

#[cfg(target_arch = "x86_64")]
mod x86_64;

#[cfg(target_arch = "aarch64")]
mod aarch64;

/// Calculate number of full blocks and remainder offset
///
/// Returns (num_full_blocks, simd_processed_bytes). Shared by every vector
/// kernel; the bytes past `simd_processed_bytes` go to the scalar tail.
#[inline(always)]
#[cfg_attr(
    not(any(target_arch = "x86_64", target_arch = "aarch64")),
    allow(dead_code)
)]
pub(crate) fn calculate_blocks(data_len: usize, block_size: usize) -> (usize, usize) {
    let num_blocks = data_len / block_size;
    let simd_bytes = num_blocks * block_size;
    (num_blocks, simd_bytes)
}

/// Runs the kernel for `tier` over all of `input`, appending exactly
/// `input.len()` bytes to an empty `output`.
///
/// # Safety
/// `tier` must be supported by the running CPU, and `output` must be empty
/// with capacity for at least `input.len()` bytes.
unsafe fn run_kernel(input: &[u8], tier: Tier, output: &mut Vec<u8>) {
    let len = input.len();
    debug_assert!(output.is_empty() && output.capacity() >= len);

    let dst = &mut output.spare_capacity_mut()[..len];

    match tier {
        Tier::Scalar => scalar::upcase_scalar(input, dst),
        #[cfg(target_arch = "x86_64")]
        Tier::Narrow => unsafe { x86_64::upcase_sse2(input, dst) },
        #[cfg(target_arch = "x86_64")]
        Tier::Wide => unsafe { x86_64::upcase_avx(input, dst) },
        #[cfg(target_arch = "x86_64")]
        Tier::WideExtended => unsafe { x86_64::upcase_avx2(input, dst) },
        #[cfg(target_arch = "aarch64")]
        Tier::Narrow => unsafe { aarch64::upcase_neon(input, dst) },
        #[allow(unreachable_patterns)]
        _ => scalar::upcase_scalar(input, dst),
    }

    // SAFETY: every kernel writes all `len` bytes of `dst`
    unsafe { output.set_len(len) };
}

/// Uppercases `input` with a tier the caller has already validated.
///
/// # Safety
/// `tier` must be supported by the running CPU.
pub(crate) unsafe fn upcase_validated(input: &[u8], tier: Tier) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len());
    unsafe { run_kernel(input, tier, &mut output) };
    output
}

/// Like [`upcase_validated`] but reports allocation failure.
///
/// # Safety
/// `tier` must be supported by the running CPU.
pub(crate) unsafe fn try_upcase_validated(
    input: &[u8],
    tier: Tier,
) -> Result<Vec<u8>, TryReserveError> {
    let mut output = Vec::new();
    output.try_reserve_exact(input.len())?;
    unsafe { run_kernel(input, tier, &mut output) };
    Ok(output)
}

/// Runs one specific kernel regardless of which tier would be selected.
///
/// There is no ASCII check here: every kernel leaves bytes outside
/// `'a'..='z'` untouched, including bytes >= 0x80. Returns `None` if the
/// running CPU cannot execute `tier`.
pub fn upcase_with_tier(input: &[u8], tier: Tier) -> Option<Vec<u8>> {
    if !CapabilityFlags::detect().supports(tier) {
        return None;
    }

    // SAFETY: support was just checked against the detected capabilities
    Some(unsafe { upcase_validated(input, tier) })
}
