//! # lanestr: Register-Width Vectors and Vectorized Short Strings
//!
//! This crate provides a thin, typed layer over 128- and 256-bit hardware
//! vector registers, and a fixed-capacity string built on top of it whose
//! operations are whole-register arithmetic and bitmask logic.
//!
//! ## Key Features
//!
//! - **Typed Registers**: [`VectorRegister<E, W>`](simd::VectorRegister) for
//!   every integer and float lane type, with operators and lane comparisons
//! - **Compile-time Kernels**: SSE4.1 and AVX2 when the build targets them,
//!   portable lane loops everywhere else
//! - **Bitmask Comparisons**: [`LaneMask`](simd::LaneMask) with `any`/`all`
//!   instead of magic constants
//! - **Short Strings**: [`FixedStr`] holds up to 31 bytes in one 32-byte,
//!   32-aligned register with O(1) length, equality and concatenation
//! - **Explicit Overflow**: truncating operations report a [`Fit`], checked
//!   variants return errors
//!
//! ## Quick Start
//!
//! ```rust
//! use lanestr::simd::{F32x8, U16x8};
//! use lanestr::{fixed_str, FixedStr};
//!
//! // Lane arithmetic
//! let v = F32x8::splat(1.5) * F32x8::splat(2.0);
//! assert!(v.simd_eq(F32x8::splat(3.0)).all());
//!
//! // Lane shifts move towards higher indices
//! let w = U16x8::from_array([1, 2, 3, 4, 5, 6, 7, 8]) << 2;
//! assert_eq!(w.as_lanes(), &[0, 0, 1, 2, 3, 4, 5, 6]);
//!
//! // Register-backed strings
//! let mut s: FixedStr = "hello".parse().unwrap();
//! let _ = s.append(&fixed_str!(" world"));
//! assert!(s.contains(&fixed_str!("lo w")));
//! assert_eq!(s.to_ascii_uppercase(), "HELLO WORLD");
//! ```

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod config;
pub mod error;
pub mod simd;
pub mod string;
pub mod system;

// Re-export core types
pub use config::{Config, SimdConfig};
pub use error::{LaneStrError, Result};
pub use simd::{Backend, LaneMask, VectorRegister};
pub use string::{FixedStr, Fit};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Check if hardware kernels back the 256-bit registers in this build
pub fn has_simd_support() -> bool {
    <simd::W256 as simd::Width>::BACKEND.is_native()
}

/// Initialize the library with the default configuration.
///
/// Logs the compiled kernel backends. Calling it is optional.
pub fn init() {
    // The default configuration always validates
    let _ = init_with_config(&SimdConfig::default());
}

/// Validate and apply `config`, then log the compiled kernel backends.
pub fn init_with_config(config: &SimdConfig) -> Result<()> {
    config.validate()?;
    config.apply();

    log::debug!("Initializing lanestr v{}", VERSION);
    for (bits, backend) in simd::compiled_backends() {
        log::debug!("{}-bit registers use {} kernels", bits, backend);
    }
    for (bits, compiled, available) in system::cpu_features().unused_backends() {
        log::info!(
            "{}-bit registers use {} kernels but this CPU supports {}; rebuild with the matching target-feature to use it",
            bits,
            compiled,
            available
        );
    }
    Ok(())
}
