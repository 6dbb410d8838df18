//! SIMD backend and diagnostics configuration.

use super::{parse_env_bool, Config};
use crate::error::{LaneStrError, Result};
use crate::simd::{compiled_backends, Width, W256};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

static REPORT_TRUNCATION: AtomicBool = AtomicBool::new(false);

/// Whether truncating string operations should log a warning.
#[inline]
pub(crate) fn report_truncation() -> bool {
    REPORT_TRUNCATION.load(Ordering::Relaxed)
}

/// SIMD configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimdConfig {
    /// Fail validation when the 256-bit registers run on portable kernels
    pub require_native_backend: bool,
    /// Log a warning whenever an append, prepend or construction truncates
    pub report_truncation: bool,
}

impl Default for SimdConfig {
    fn default() -> Self {
        Self {
            require_native_backend: false,
            report_truncation: false,
        }
    }
}

impl SimdConfig {
    /// Make this configuration the process-wide one.
    ///
    /// Only `report_truncation` has process-wide effect.
    pub fn apply(&self) {
        REPORT_TRUNCATION.store(self.report_truncation, Ordering::Relaxed);
    }
}

impl Config for SimdConfig {
    fn validate(&self) -> Result<()> {
        if self.require_native_backend && !W256::BACKEND.is_native() {
            let compiled = compiled_backends()
                .iter()
                .map(|(bits, backend)| format!("{}-bit: {}", bits, backend))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(LaneStrError::configuration(format!(
                "native SIMD backend required but this build uses portable kernels ({})",
                compiled
            )));
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.require_native_backend = parse_env_bool(
            &format!("{}SIMD_REQUIRE_NATIVE", prefix),
            config.require_native_backend,
        );
        config.report_truncation = parse_env_bool(
            &format!("{}SIMD_REPORT_TRUNCATION", prefix),
            config.report_truncation,
        );
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self {
            require_native_backend: false,
            report_truncation: false,
        }
    }

    fn memory_preset() -> Self {
        Self {
            require_native_backend: false,
            report_truncation: true,
        }
    }

    fn realtime_preset() -> Self {
        Self {
            require_native_backend: false,
            report_truncation: false,
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            LaneStrError::configuration(format!("Failed to serialize SIMD config: {}", e))
        })?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            LaneStrError::configuration(format!("Failed to parse SIMD config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}
