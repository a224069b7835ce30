//! aarch64 SIMD implementation
//!
//! NEON serves the 16-byte tier. It has native unsigned byte compares, so the
//! range test is `'a' <= chunk <= 'z'` directly.

use crate::simd::{self, scalar};
use std::mem::MaybeUninit;

/// NEON uppercasing, 16-byte chunks with a scalar tail
///
/// # Safety
/// The CPU must support NEON and `dst` must be as long as `src`.
#[target_feature(enable = "neon")]
pub(crate) unsafe fn upcase_neon(src: &[u8], dst: &mut [MaybeUninit<u8>]) {
    unsafe {
        use std::arch::aarch64::*;

        const BLOCK_SIZE: usize = 16;

        debug_assert_eq!(src.len(), dst.len());

        let (num_rounds, simd_bytes) = simd::calculate_blocks(src.len(), BLOCK_SIZE);

        let lower_a = vdupq_n_u8(b'a');
        let lower_z = vdupq_n_u8(b'z');
        let case_diff = vdupq_n_u8(scalar::CASE_DIFF);

        let mut offset = 0;
        for _ in 0..num_rounds {
            let chunk = vld1q_u8(src.as_ptr().add(offset));

            let mask = vandq_u8(vcgeq_u8(chunk, lower_a), vcleq_u8(chunk, lower_z));
            let upper = vsubq_u8(chunk, vandq_u8(mask, case_diff));

            vst1q_u8(dst.as_mut_ptr().add(offset) as *mut u8, upper);
            offset += BLOCK_SIZE;
        }

        scalar::upcase_scalar(&src[simd_bytes..], &mut dst[simd_bytes..]);
    }
}
