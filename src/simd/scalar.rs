//! Byte-at-a-time uppercasing.
//!
//! This is both the lowest tier and the remainder handler for every vector
//! kernel, so it writes into the same uninitialized output slice the vector
//! loops use.

use std::mem::MaybeUninit;

/// Distance between a lowercase ASCII letter and its uppercase form.
pub const CASE_DIFF: u8 = b'a' - b'A';

/// Uppercases one byte if it lies in `'a'..='z'`, otherwise returns it unchanged.
#[inline(always)]
pub fn upcase_byte(byte: u8) -> u8 {
    if (b'a'..=b'z').contains(&byte) {
        byte - CASE_DIFF
    } else {
        byte
    }
}

/// Writes the uppercased form of `src` into `dst`.
///
/// Both slices must have the same length; nothing outside `dst` is touched.
#[inline]
pub fn upcase_scalar(src: &[u8], dst: &mut [MaybeUninit<u8>]) {
    debug_assert_eq!(src.len(), dst.len());

    for (slot, &byte) in dst.iter_mut().zip(src) {
        slot.write(upcase_byte(byte));
    }
}
