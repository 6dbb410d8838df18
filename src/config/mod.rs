//! Configuration APIs for lanestr
//!
//! The vector types themselves take no configuration: kernels are fixed at
//! compile time. What can be configured is how the crate reports on itself,
//! namely whether a portable build is acceptable and whether truncating string
//! operations are logged.
//!
//! # Configuration Traits
//!
//! The [`Config`] trait provides validation, environment initialization,
//! presets and file persistence for every configuration type.
//!
//! # Preset Configurations
//!
//! ```rust
//! use lanestr::config::{Config, SimdConfig};
//!
//! // Log every truncation, accept any backend
//! let config = SimdConfig::memory_preset();
//! assert!(config.report_truncation);
//!
//! // Quiet hot paths
//! let config = SimdConfig::realtime_preset();
//! assert!(!config.report_truncation);
//! ```
//!
//! # Environment Initialization
//!
//! ```rust
//! use lanestr::config::{Config, SimdConfig};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads LANESTR_SIMD_REQUIRE_NATIVE and LANESTR_SIMD_REPORT_TRUNCATION
//! let config = SimdConfig::from_env()?;
//!
//! // Same variables under a custom prefix, e.g. MYAPP_SIMD_REQUIRE_NATIVE
//! let config = SimdConfig::from_env_with_prefix("MYAPP_")?;
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use std::env;
use std::fmt;
use std::path::Path;

pub mod simd;


pub use simd::SimdConfig;

/// Common configuration trait providing validation, environment initialization,
/// and preset management functionality.
pub trait Config: Clone + fmt::Debug {
    /// Validate the configuration for correctness and consistency.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the configuration is valid, `Err` with details if invalid.
    fn validate(&self) -> Result<()>;

    /// Initialize configuration from environment variables.
    ///
    /// Environment variables use the format `LANESTR_{COMPONENT}_{FIELD}`, for
    /// example `LANESTR_SIMD_REPORT_TRUNCATION=1`.
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix("LANESTR_")
    }

    /// Initialize configuration from environment variables with a custom prefix.
    ///
    /// # Arguments
    ///
    /// * `prefix` - The environment variable prefix to use
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Preset for maximum throughput.
    fn performance_preset() -> Self;

    /// Preset favoring diagnostics over speed.
    fn memory_preset() -> Self;

    /// Preset for latency-sensitive code paths.
    fn realtime_preset() -> Self;

    /// Balanced preset, the default configuration.
    fn balanced_preset() -> Self
    where
        Self: Default,
    {
        Self::default()
    }

    /// Save configuration to a file as JSON.
    ///
    /// # Arguments
    ///
    /// * `path` - The file path to save the configuration to
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Load and validate a configuration saved with [`Config::save_to_file`].
    ///
    /// # Arguments
    ///
    /// * `path` - The file path to load the configuration from
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

/// Utility function to parse boolean environment variable.
///
/// Accepts: "true", "1", "yes", "on" (case-insensitive) as true,
/// everything else as false.
///
/// # Arguments
///
/// * `var_name` - The environment variable name
/// * `default` - The default value if the environment variable is not set
pub fn parse_env_bool(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .map(|s| {
            let s = s.to_lowercase();
            matches!(s.as_str(), "true" | "1" | "yes" | "on")
        })
        .unwrap_or(default)
}
