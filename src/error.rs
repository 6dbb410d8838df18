//! Error handling for the lanestr library
//!
//! Vector operations never fail at runtime; errors only arise at the edges where
//! external data enters a [`FixedStr`](crate::FixedStr) or where configuration
//! is loaded.

use thiserror::Error;

/// Main error type for the lanestr library
#[derive(Error, Debug)]
pub enum LaneStrError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input does not fit into the fixed capacity
    #[error("Capacity exceeded: {len} bytes do not fit into capacity {capacity}")]
    CapacityExceeded {
        /// Number of bytes that were offered
        len: usize,
        /// Number of bytes that fit
        capacity: usize,
    },

    /// Input contains a NUL byte before its end
    #[error("Interior NUL byte at position {position}")]
    InteriorNul {
        /// Offset of the first NUL byte
        position: usize,
    },

    /// A register does not follow the zero padding layout
    #[error("Invalid padding: non-zero byte in lane {lane} after the terminator")]
    InvalidPadding {
        /// First lane that breaks the layout
        lane: usize,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl LaneStrError {
    /// Create a capacity exceeded error
    pub fn capacity_exceeded(len: usize, capacity: usize) -> Self {
        Self::CapacityExceeded { len, capacity }
    }

    /// Create an interior NUL error
    pub fn interior_nul(position: usize) -> Self {
        Self::InteriorNul { position }
    }

    /// Create an invalid padding error
    pub fn invalid_padding(lane: usize) -> Self {
        Self::InvalidPadding { lane }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Check if retrying with different input can succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::CapacityExceeded { .. } => true,
            Self::InteriorNul { .. } => false,
            Self::InvalidPadding { .. } => false,
            Self::Configuration { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::CapacityExceeded { .. } => "capacity",
            Self::InteriorNul { .. } => "data",
            Self::InvalidPadding { .. } => "layout",
            Self::Configuration { .. } => "config",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, LaneStrError>;

/// Assert that `len` bytes fit into `capacity`
#[inline]
pub fn check_capacity(len: usize, capacity: usize) -> Result<()> {
    if len > capacity {
        Err(LaneStrError::capacity_exceeded(len, capacity))
    } else {
        Ok(())
    }
}
