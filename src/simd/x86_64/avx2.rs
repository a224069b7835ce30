//! AVX2 kernel: 64 bytes per iteration as two independent 32-byte lanes
//!
//! The two lanes share no data, so their compare/and/sub chains can issue in
//! parallel.

use super::common;
use crate::simd::{self, scalar};
use std::mem::MaybeUninit;

/// AVX2 uppercasing
///
/// # Safety
/// The CPU must support AVX2 and `dst` must be as long as `src`.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn upcase_avx2(src: &[u8], dst: &mut [MaybeUninit<u8>]) {
    unsafe {
        use std::arch::x86_64::*;

        const LANE: usize = 32;
        const BLOCK_SIZE: usize = 2 * LANE;

        debug_assert_eq!(src.len(), dst.len());

        let (num_rounds, simd_bytes) = simd::calculate_blocks(src.len(), BLOCK_SIZE);

        let below_a = _mm256_set1_epi8(common::BELOW_LOWER_A);
        let above_z = _mm256_set1_epi8(common::ABOVE_LOWER_Z);
        let case_diff = _mm256_set1_epi8(common::CASE_DIFF);

        let mut offset = 0;
        for _ in 0..num_rounds {
            let in_ptr = src.as_ptr().add(offset);
            let chunk1 = _mm256_loadu_si256(in_ptr as *const __m256i);
            let chunk2 = _mm256_loadu_si256(in_ptr.add(LANE) as *const __m256i);

            let mask1 = _mm256_and_si256(
                _mm256_cmpgt_epi8(chunk1, below_a),
                _mm256_cmpgt_epi8(above_z, chunk1),
            );
            let mask2 = _mm256_and_si256(
                _mm256_cmpgt_epi8(chunk2, below_a),
                _mm256_cmpgt_epi8(above_z, chunk2),
            );

            let upper1 = _mm256_sub_epi8(chunk1, _mm256_and_si256(mask1, case_diff));
            let upper2 = _mm256_sub_epi8(chunk2, _mm256_and_si256(mask2, case_diff));

            let out_ptr = dst.as_mut_ptr().add(offset);
            _mm256_storeu_si256(out_ptr as *mut __m256i, upper1);
            _mm256_storeu_si256(out_ptr.add(LANE) as *mut __m256i, upper2);
            offset += BLOCK_SIZE;
        }

        scalar::upcase_scalar(&src[simd_bytes..], &mut dst[simd_bytes..]);
    }
}
