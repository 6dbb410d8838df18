//! Fixed-capacity strings backed by vector registers
//!
//! Strings short enough to fit a register are handled with whole-register
//! arithmetic instead of byte loops.

mod fixed_str;

pub use fixed_str::{FixedStr, Fit};
