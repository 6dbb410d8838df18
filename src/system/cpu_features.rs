//! # CPU Feature Detection
//!
//! Runtime report of the vector extensions the running CPU supports. The
//! kernels themselves are chosen at compile time; this report lets [`init`]
//! point out when a build leaves hardware unused.
//!
//! [`init`]: crate::init

use crate::simd::{Backend, Width, W128, W256};
use std::sync::OnceLock;

/// Vector extensions available on the running CPU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuFeatures {
    /// CPU supports SSE2
    pub has_sse2: bool,
    /// CPU supports SSE4.1
    pub has_sse41: bool,
    /// CPU supports SSE4.2
    pub has_sse42: bool,
    /// CPU supports AVX2
    pub has_avx2: bool,
    /// CPU supports POPCNT
    pub has_popcnt: bool,
    /// CPU supports AVX-512F
    pub has_avx512f: bool,
    /// CPU supports NEON
    pub has_neon: bool,
}

impl CpuFeatures {
    /// Detect available CPU features
    #[cfg(target_arch = "x86_64")]
    pub fn detect() -> Self {
        Self {
            has_sse2: is_x86_feature_detected!("sse2"),
            has_sse41: is_x86_feature_detected!("sse4.1"),
            has_sse42: is_x86_feature_detected!("sse4.2"),
            has_avx2: is_x86_feature_detected!("avx2"),
            has_popcnt: is_x86_feature_detected!("popcnt"),
            has_avx512f: is_x86_feature_detected!("avx512f"),
            has_neon: false,
        }
    }

    /// Detect available CPU features
    #[cfg(target_arch = "aarch64")]
    pub fn detect() -> Self {
        Self {
            has_neon: std::arch::is_aarch64_feature_detected!("neon"),
            ..Self::default()
        }
    }

    /// Detect available CPU features
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    pub fn detect() -> Self {
        Self::default()
    }

    /// Best kernel backend this CPU could run for 128-bit registers
    pub fn best_w128_backend(&self) -> Backend {
        if self.has_sse41 {
            Backend::Sse41
        } else {
            Backend::Portable
        }
    }

    /// Best kernel backend this CPU could run for 256-bit registers
    pub fn best_w256_backend(&self) -> Backend {
        if self.has_avx2 {
            Backend::Avx2
        } else {
            Backend::Portable
        }
    }

    /// Widths for which the CPU supports a better backend than the build
    /// uses, as `(register bits, compiled, available)`.
    pub fn unused_backends(&self) -> Vec<(usize, Backend, Backend)> {
        let candidates = [
            (W128::BYTES * 8, W128::BACKEND, self.best_w128_backend()),
            (W256::BYTES * 8, W256::BACKEND, self.best_w256_backend()),
        ];
        candidates
            .into_iter()
            .filter(|(_, compiled, available)| !compiled.is_native() && available.is_native())
            .collect()
    }
}

static CPU_FEATURES: OnceLock<CpuFeatures> = OnceLock::new();

/// Get the CPU feature set (detected once on first call)
pub fn cpu_features() -> &'static CpuFeatures {
    CPU_FEATURES.get_or_init(CpuFeatures::detect)
}
