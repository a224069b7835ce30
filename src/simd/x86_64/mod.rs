//! x86_64 SIMD implementations
//!
//! One kernel per tier: SSE2 (16-byte), AVX (32-byte) and AVX2 (2x32-byte).
//! Every kernel hands its remainder to the scalar loop.

pub(crate) mod common;
mod avx;
mod avx2;
mod sse2;

pub(crate) use avx::upcase_avx;
pub(crate) use avx2::upcase_avx2;
pub(crate) use sse2::upcase_sse2;
