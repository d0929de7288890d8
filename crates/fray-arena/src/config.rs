//! Arena configuration parameters.

use std::error::Error;
use std::fmt;

/// Configuration for a battle arena.
///
/// Validated at construction; all values are immutable afterwards. The
/// seed drives the spawn-position RNG: identical seeds and identical
/// call sequences produce identical battles, which is the only source
/// of nondeterminism in the simulation.
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    /// Arena width in world units. Positions clamp to `[0, width]`.
    pub width: f64,
    /// Arena height in world units. Positions clamp to `[0, height]`.
    pub height: f64,
    /// Seed for the spawn-position RNG.
    pub seed: u64,
}

impl ArenaConfig {
    /// Default arena width.
    pub const DEFAULT_WIDTH: f64 = 400.0;

    /// Default arena height.
    pub const DEFAULT_HEIGHT: f64 = 400.0;

    /// Create a config with the given size and a zero seed.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            seed: 0,
        }
    }

    /// Replace the spawn seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check that both dimensions are finite and positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidSize { axis, value });
            }
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

/// Error returned when an [`ArenaConfig`] fails validation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// A dimension is non-finite, zero, or negative.
    InvalidSize {
        /// Which axis was rejected.
        axis: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { axis, value } => {
                write!(f, "arena {axis} must be finite and positive, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}
