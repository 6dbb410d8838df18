//! Comparison bitmasks
//!
//! Lane comparisons produce a bitmask rather than a boolean, because callers
//! such as substring search need to know which lanes matched. [`LaneMask`]
//! keeps the raw bits and the register's full mask side by side, so "any lane"
//! and "all lanes" are named predicates instead of magic constants at every
//! call site.

use std::fmt;

/// Bit-per-lane (or bit-per-byte) result of a register comparison.
///
/// For 1- and 2-byte lanes the hardware reports one bit per byte, so a 2-byte
/// lane sets two adjacent bits. For 4- and 8-byte lanes there is one bit per
/// lane. [`LaneMask::full`] is always the value produced when every lane
/// matches.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LaneMask {
    bits: u32,
    full: u32,
}

impl LaneMask {
    /// Wrap raw comparison bits.
    #[inline(always)]
    pub const fn new(bits: u32, full: u32) -> Self {
        debug_assert!(bits & !full == 0, "comparison bits outside the register mask");
        Self { bits, full }
    }

    /// The raw bitmask
    #[inline(always)]
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// The bitmask produced when every lane matches
    #[inline(always)]
    pub const fn full(self) -> u32 {
        self.full
    }

    /// At least one lane matched
    #[inline(always)]
    pub const fn any(self) -> bool {
        self.bits != 0
    }

    /// Every lane matched
    #[inline(always)]
    pub const fn all(self) -> bool {
        self.bits == self.full
    }

    /// No lane matched
    #[inline(always)]
    pub const fn none(self) -> bool {
        self.bits == 0
    }

    /// Number of set bits
    #[inline(always)]
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    /// Position of the lowest set bit
    #[inline(always)]
    pub const fn first(self) -> Option<u32> {
        if self.bits == 0 {
            None
        } else {
            Some(self.bits.trailing_zeros())
        }
    }
}

impl fmt::Debug for LaneMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LaneMask({:#b} of {:#b})", self.bits, self.full)
    }
}

impl fmt::Binary for LaneMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.bits, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        let full = 0xFFFF;
        assert!(LaneMask::new(full, full).all());
        assert!(LaneMask::new(1, full).any());
        assert!(!LaneMask::new(1, full).all());
        assert!(LaneMask::new(0, full).none());
        assert_eq!(LaneMask::new(0b1011, full).count(), 3);
    }

    #[test]
    fn test_first() {
        assert_eq!(LaneMask::new(0b1000, 0xF).first(), Some(3));
        assert_eq!(LaneMask::new(0, 0xF).first(), None);
    }

    #[test]
    fn test_formatting() {
        let mask = LaneMask::new(0b101, 0b111);
        assert_eq!(format!("{:b}", mask), "101");
        assert!(format!("{:?}", mask).contains("0b101"));
    }
}
