//! Per-(lane, width) kernel table
//!
//! Every register operation that depends on the lane type goes through
//! [`Kernel`]. There is exactly one implementation per `(lane type, width)`
//! pair, chosen at compile time from the target features:
//!
//! | width | `avx2` | `sse4.1` | otherwise |
//! |-------|--------|----------|-----------|
//! | `W256` | `avx2` kernels | portable | portable |
//! | `W128` | `sse41` kernels | `sse41` kernels | portable |
//!
//! The trait's provided methods are the portable kernels; hardware modules
//! override them where an instruction exists and inherit the rest. Enabling the
//! `portable` cargo feature forces the portable table everywhere.

use super::lane::{Lane, SignedLane};
use super::width::Width;
use std::fmt;

mod portable;

#[cfg(all(target_arch = "x86_64", target_feature = "avx2", not(feature = "portable")))]
mod avx2;

#[cfg(all(target_arch = "x86_64", target_feature = "sse4.1", not(feature = "portable")))]
mod sse41;

/// Kernel family compiled for a register width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Lane loops the compiler is free to vectorize
    Portable,
    /// SSE4.1 intrinsics (128-bit)
    Sse41,
    /// AVX2 intrinsics (256-bit)
    Avx2,
}

impl Backend {
    /// Short lowercase name, used in logs
    pub fn name(self) -> &'static str {
        match self {
            Self::Portable => "portable",
            Self::Sse41 => "sse4.1",
            Self::Avx2 => "avx2",
        }
    }

    /// Whether hardware intrinsics back this width
    pub fn is_native(self) -> bool {
        !matches!(self, Self::Portable)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lane-wise comparison predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compare {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
}

/// Bits a comparison can set for the given register and lane size.
///
/// Lanes of one or two bytes report one bit per byte, wider lanes one bit per
/// lane.
pub const fn comparison_mask(width_bytes: usize, lane_size: usize) -> u32 {
    let bits = if lane_size <= 2 {
        width_bytes
    } else {
        width_bytes / lane_size
    };
    if bits >= 32 {
        u32::MAX
    } else {
        (1u32 << bits) - 1
    }
}

/// Lane-type dependent operations on register storage of width `W`.
///
/// Comparison results come in two steps, mirroring the hardware: `compare`
/// yields a mask register (all bits set in matching lanes), `movemask`
/// compresses it to [`comparison_mask`] bits.
pub trait Kernel<W: Width>: Lane {
    /// Lane-wise addition
    #[inline(always)]
    fn add(a: &W::Bytes, b: &W::Bytes) -> W::Bytes {
        portable::map2::<Self, W>(a, b, Self::lane_add)
    }

    /// Lane-wise subtraction
    #[inline(always)]
    fn sub(a: &W::Bytes, b: &W::Bytes) -> W::Bytes {
        portable::map2::<Self, W>(a, b, Self::lane_sub)
    }

    /// Lane-wise multiplication
    #[inline(always)]
    fn mul(a: &W::Bytes, b: &W::Bytes) -> W::Bytes {
        portable::map2::<Self, W>(a, b, Self::lane_mul)
    }

    /// Lane-wise division
    #[inline(always)]
    fn div(a: &W::Bytes, b: &W::Bytes) -> W::Bytes {
        portable::map2::<Self, W>(a, b, Self::lane_div)
    }

    /// Lane-wise minimum
    #[inline(always)]
    fn min(a: &W::Bytes, b: &W::Bytes) -> W::Bytes {
        portable::map2::<Self, W>(a, b, Self::lane_min)
    }

    /// Lane-wise maximum
    #[inline(always)]
    fn max(a: &W::Bytes, b: &W::Bytes) -> W::Bytes {
        portable::map2::<Self, W>(a, b, Self::lane_max)
    }

    /// Mask register of lanes satisfying `op`
    #[inline(always)]
    fn compare(op: Compare, a: &W::Bytes, b: &W::Bytes) -> W::Bytes {
        portable::compare::<Self, W>(op, a, b)
    }

    /// Compress a mask register into a bitmask
    #[inline(always)]
    fn movemask(mask: &W::Bytes) -> u32 {
        portable::movemask::<Self, W>(mask)
    }
}

/// Absolute value kernel, only for lanes that have one.
pub trait AbsKernel<W: Width>: Kernel<W> + SignedLane {
    /// Lane-wise absolute value
    #[inline(always)]
    fn abs(a: &W::Bytes) -> W::Bytes {
        portable::map1::<Self, W>(a, Self::lane_abs)
    }
}

macro_rules! portable_kernels {
    ($width:ty: $($lane:ty),*) => {$(
        impl Kernel<$width> for $lane {}
    )*};
}

macro_rules! portable_abs_kernels {
    ($width:ty: $($lane:ty),*) => {$(
        impl AbsKernel<$width> for $lane {}
    )*};
}

#[cfg(not(all(target_arch = "x86_64", target_feature = "sse4.1", not(feature = "portable"))))]
portable_kernels!(super::width::W128: u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);
#[cfg(not(all(target_arch = "x86_64", target_feature = "sse4.1", not(feature = "portable"))))]
portable_abs_kernels!(super::width::W128: i8, i16, i32, i64, f32, f64);

// SSE4.1 has no 64-bit signed compare, so 64-bit lanes stay portable there.
#[cfg(all(target_arch = "x86_64", target_feature = "sse4.1", not(feature = "portable")))]
portable_kernels!(super::width::W128: u64, i64);
#[cfg(all(target_arch = "x86_64", target_feature = "sse4.1", not(feature = "portable")))]
portable_abs_kernels!(super::width::W128: i64);

#[cfg(not(all(target_arch = "x86_64", target_feature = "avx2", not(feature = "portable"))))]
portable_kernels!(super::width::W256: u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);
#[cfg(not(all(target_arch = "x86_64", target_feature = "avx2", not(feature = "portable"))))]
portable_abs_kernels!(super::width::W256: i8, i16, i32, i64, f32, f64);
