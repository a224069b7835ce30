//! Shared constants and helpers for the x86_64 kernels
//!
//! The range test uses signed byte compares (the only kind SSE2/AVX2 offer).
//! Bytes >= 0x80 are negative as `i8`, so they can never be greater than
//! `'a' - 1` and always fall outside the mask.

/// One below `'a'`, for `chunk > 'a' - 1`
pub const BELOW_LOWER_A: i8 = (b'a' - 1) as i8;

/// One above `'z'`, for `'z' + 1 > chunk`
pub const ABOVE_LOWER_Z: i8 = (b'z' + 1) as i8;

/// Subtracted from every masked lane
pub const CASE_DIFF: i8 = super::super::scalar::CASE_DIFF as i8;
