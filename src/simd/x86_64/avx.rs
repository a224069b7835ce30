//! AVX kernel: 32 bytes per iteration, one chunk at a time
//!
//! AVX has 256-bit loads and stores but no 256-bit byte compares (those
//! arrived with AVX2). Each chunk is therefore loaded whole, split into its
//! two 128-bit halves for the VEX-encoded compare/and/sub, rejoined and
//! stored whole.

use super::common;
use crate::simd::{self, scalar};
use std::arch::x86_64::*;
use std::mem::MaybeUninit;

/// Range mask and subtract on one 128-bit half
#[inline]
#[target_feature(enable = "avx")]
#[allow(unused_unsafe)]
unsafe fn upcase_half(
    chunk: __m128i,
    below_a: __m128i,
    above_z: __m128i,
    case_diff: __m128i,
) -> __m128i {
    unsafe {
        let ge_a = _mm_cmpgt_epi8(chunk, below_a);
        let le_z = _mm_cmplt_epi8(chunk, above_z);
        let mask = _mm_and_si128(ge_a, le_z);
        _mm_sub_epi8(chunk, _mm_and_si128(mask, case_diff))
    }
}

/// AVX uppercasing, 32-byte chunks with a scalar tail
///
/// # Safety
/// The CPU must support AVX and `dst` must be as long as `src`.
#[target_feature(enable = "avx")]
pub(crate) unsafe fn upcase_avx(src: &[u8], dst: &mut [MaybeUninit<u8>]) {
    unsafe {
        const BLOCK_SIZE: usize = 32;

        debug_assert_eq!(src.len(), dst.len());

        let (num_rounds, simd_bytes) = simd::calculate_blocks(src.len(), BLOCK_SIZE);

        let below_a = _mm_set1_epi8(common::BELOW_LOWER_A);
        let above_z = _mm_set1_epi8(common::ABOVE_LOWER_Z);
        let case_diff = _mm_set1_epi8(common::CASE_DIFF);

        let mut offset = 0;
        for _ in 0..num_rounds {
            let chunk = _mm256_loadu_si256(src.as_ptr().add(offset) as *const __m256i);

            let lo = upcase_half(_mm256_castsi256_si128(chunk), below_a, above_z, case_diff);
            let hi = upcase_half(
                _mm256_extractf128_si256::<1>(chunk),
                below_a,
                above_z,
                case_diff,
            );

            _mm256_storeu_si256(
                dst.as_mut_ptr().add(offset) as *mut __m256i,
                _mm256_set_m128i(hi, lo),
            );
            offset += BLOCK_SIZE;
        }

        scalar::upcase_scalar(&src[simd_bytes..], &mut dst[simd_bytes..]);
    }
}
