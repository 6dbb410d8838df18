//! # System Integration Utilities
//!
//! Runtime CPU feature detection, used to compare what the running CPU offers
//! against the kernels compiled into this build.

pub mod cpu_features;

pub use cpu_features::{cpu_features, CpuFeatures};
