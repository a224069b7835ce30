//! SSE2 kernel: 16 bytes per iteration

use super::common;
use crate::simd::{self, scalar};
use std::mem::MaybeUninit;

/// SSE2 uppercasing
///
/// Algorithm per 16-byte chunk:
/// 1. `ge_a = chunk > 'a' - 1`, `le_z = chunk < 'z' + 1`
/// 2. `mask = ge_a & le_z`
/// 3. `chunk - (mask & 32)`
///
/// Remainder bytes go through the scalar kernel.
///
/// # Safety
/// The CPU must support SSE2 and `dst` must be as long as `src`.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn upcase_sse2(src: &[u8], dst: &mut [MaybeUninit<u8>]) {
    unsafe {
        use std::arch::x86_64::*;

        const BLOCK_SIZE: usize = 16;

        debug_assert_eq!(src.len(), dst.len());

        let (num_rounds, simd_bytes) = simd::calculate_blocks(src.len(), BLOCK_SIZE);

        let below_a = _mm_set1_epi8(common::BELOW_LOWER_A);
        let above_z = _mm_set1_epi8(common::ABOVE_LOWER_Z);
        let case_diff = _mm_set1_epi8(common::CASE_DIFF);

        let mut offset = 0;
        for _ in 0..num_rounds {
            let chunk = _mm_loadu_si128(src.as_ptr().add(offset) as *const __m128i);

            let ge_a = _mm_cmpgt_epi8(chunk, below_a);
            let le_z = _mm_cmplt_epi8(chunk, above_z);
            let mask = _mm_and_si128(ge_a, le_z);
            let upper = _mm_sub_epi8(chunk, _mm_and_si128(mask, case_diff));

            _mm_storeu_si128(dst.as_mut_ptr().add(offset) as *mut __m128i, upper);
            offset += BLOCK_SIZE;
        }

        scalar::upcase_scalar(&src[simd_bytes..], &mut dst[simd_bytes..]);
    }
}
