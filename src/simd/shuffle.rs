//! Whole-lane shifts by a runtime amount
//!
//! Hardware byte shifts only take immediates and (on AVX2) do not cross the
//! 128-bit halves, so an arbitrary shift goes through memory: the register is
//! written into the middle third of a zeroed buffer three registers wide and
//! read back at an offset. Every call owns its buffer.

use super::lane::Lane;
use super::width::Width;

/// Move every lane `amount` positions towards higher indices.
///
/// Negative amounts move towards lower indices. Vacated lanes are zero, and
/// amounts of `LANES` or more in either direction clear the register.
#[inline]
pub(crate) fn shift_lanes<E: Lane, W: Width>(bytes: &W::Bytes, amount: isize) -> W::Bytes {
    let lanes = (W::BYTES / E::SIZE) as isize;
    let amount = amount.clamp(-lanes, lanes);
    if amount == 0 {
        return *bytes;
    }

    let mut scratch = W::scratch();
    let buffer = scratch.as_mut();
    buffer[W::BYTES..2 * W::BYTES].copy_from_slice(bytes.as_ref());

    // amount is within ±lanes, so start stays within [0, 2 * BYTES]
    let start = (W::BYTES as isize - amount * E::SIZE as isize) as usize;
    let mut out = W::Bytes::default();
    out.as_mut().copy_from_slice(&buffer[start..start + W::BYTES]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::width::{lanes, lanes_mut, Bytes16, Bytes32, W128, W256};

    fn iota16() -> Bytes16 {
        let mut bytes = Bytes16::ZERO;
        for (i, lane) in lanes_mut::<u8, W128>(&mut bytes).iter_mut().enumerate() {
            *lane = i as u8 + 1;
        }
        bytes
    }

    #[test]
    fn test_shift_towards_higher_lanes() {
        let shifted = shift_lanes::<u8, W128>(&iota16(), 3);
        assert_eq!(&shifted.0[..4], &[0, 0, 0, 1]);
        assert_eq!(shifted.0[15], 13);
    }

    #[test]
    fn test_negative_amount_reverses() {
        let shifted = shift_lanes::<u8, W128>(&iota16(), -3);
        assert_eq!(shifted.0[0], 4);
        assert_eq!(shifted.0[12], 16);
        assert_eq!(&shifted.0[13..], &[0, 0, 0]);
    }

    #[test]
    fn test_shift_moves_whole_lanes() {
        let mut bytes = Bytes32::ZERO;
        lanes_mut::<u64, W256>(&mut bytes).copy_from_slice(&[1, 2, 3, 4]);
        let shifted = shift_lanes::<u64, W256>(&bytes, 1);
        assert_eq!(lanes::<u64, W256>(&shifted), &[0, 1, 2, 3]);
        let shifted = shift_lanes::<u64, W256>(&bytes, -2);
        assert_eq!(lanes::<u64, W256>(&shifted), &[3, 4, 0, 0]);
    }

    #[test]
    fn test_out_of_range_clears() {
        assert_eq!(shift_lanes::<u8, W128>(&iota16(), 16), Bytes16::ZERO);
        assert_eq!(shift_lanes::<u8, W128>(&iota16(), isize::MIN), Bytes16::ZERO);
        assert_eq!(shift_lanes::<u8, W128>(&iota16(), 0), iota16());
    }
}
