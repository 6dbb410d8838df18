//! # Hardware Vector Registers
//!
//! Typed wrappers over 128- and 256-bit vector registers:
//!
//! - [`VectorRegister<E, W>`]: lanes of `E` in a register of width `W`
//! - [`Kernel`]: per (lane type, width) operation table, SSE4.1/AVX2 when the
//!   build targets them and portable lane loops otherwise
//! - [`LaneMask`]: comparison results as bitmasks with named predicates
//!
//! ## Example
//!
//! ```
//! use lanestr::simd::{U8x32, Width, W256};
//!
//! let spaces = U8x32::splat(b' ');
//! let mut text = U8x32::zero();
//! text.as_lanes_mut()[..5].copy_from_slice(b"a b c");
//!
//! let hits = text.simd_eq(spaces);
//! assert_eq!(hits.count(), 2);
//! assert_eq!(hits.first(), Some(1));
//! println!("256-bit kernels: {}", W256::BACKEND);
//! ```

pub mod kernel;
pub mod lane;
pub mod mask;
pub mod register;
mod shuffle;
pub mod width;

pub use kernel::{comparison_mask, AbsKernel, Backend, Compare, Kernel};
pub use lane::{Lane, SignedLane};
pub use mask::LaneMask;
pub use register::{
    F32x4, F32x8, F64x2, F64x4, I16x16, I16x8, I32x4, I32x8, I64x2, I64x4, I8x16, I8x32, U16x16,
    U16x8, U32x4, U32x8, U64x2, U64x4, U8x16, U8x32, VectorRegister,
};
pub use width::{Bytes16, Bytes32, Width, W128, W256};

/// Kernel backends compiled into this build, as `(register bits, backend)`.
pub fn compiled_backends() -> [(usize, Backend); 2] {
    [(W128::BYTES * 8, W128::BACKEND), (W256::BYTES * 8, W256::BACKEND)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiled_backends() {
        let backends = compiled_backends();
        assert_eq!(backends[0].0, 128);
        assert_eq!(backends[1].0, 256);
        if cfg!(feature = "portable") {
            assert!(backends.iter().all(|(_, backend)| !backend.is_native()));
        }
    }

    #[test]
    fn test_backend_matches_target() {
        let avx2 = cfg!(all(target_arch = "x86_64", target_feature = "avx2", not(feature = "portable")));
        assert_eq!(W256::BACKEND == Backend::Avx2, avx2);
        let sse41 =
            cfg!(all(target_arch = "x86_64", target_feature = "sse4.1", not(feature = "portable")));
        assert_eq!(W128::BACKEND == Backend::Sse41, sse41);
    }
}
