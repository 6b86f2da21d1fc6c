//! Startup configuration for the smoothing controller.
//!
//! Initial values carry the same bounds as the runtime command: target
//! frequencies must be non-negative, damping ratios must lie in `[0, 1]`.
//!
//! # Example
//!
//! ```rust
//! use smooth_axis::{SmoothingConfig, SmootherVariant};
//!
//! let config = SmoothingConfig::default()
//!     .with_smoother(SmootherVariant::AccelForm)
//!     .with_target_freq_x(40.0)
//!     .with_target_freq_y(35.0)
//!     .with_damping_ratio_x(0.1);
//! assert!(config.validate().is_ok());
//! ```

use crate::catalog::SmootherVariant;
use crate::controller::{validate_damping_ratio, validate_target_freq, SmoothingError};

/// Initial smoothing parameters, applied at bind time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmoothingConfig {
    /// Smoother variant for both axes.
    pub smoother: SmootherVariant,
    /// X target resonant frequency, Hz (0 disables X filtering).
    pub target_freq_x: f64,
    /// Y target resonant frequency, Hz (0 disables Y filtering).
    pub target_freq_y: f64,
    /// X damping ratio (`0..=1`).
    pub damping_ratio_x: f64,
    /// Y damping ratio (`0..=1`).
    pub damping_ratio_y: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            smoother: SmootherVariant::default(),
            target_freq_x: 0.0,
            target_freq_y: 0.0,
            damping_ratio_x: 0.0,
            damping_ratio_y: 0.0,
        }
    }
}

impl SmoothingConfig {
    /// Set the smoother variant.
    pub fn with_smoother(mut self, smoother: SmootherVariant) -> Self {
        self.smoother = smoother;
        self
    }

    /// Set the X target frequency.
    pub fn with_target_freq_x(mut self, freq: f64) -> Self {
        self.target_freq_x = freq;
        self
    }

    /// Set the Y target frequency.
    pub fn with_target_freq_y(mut self, freq: f64) -> Self {
        self.target_freq_y = freq;
        self
    }

    /// Set the X damping ratio.
    pub fn with_damping_ratio_x(mut self, ratio: f64) -> Self {
        self.damping_ratio_x = ratio;
        self
    }

    /// Set the Y damping ratio.
    pub fn with_damping_ratio_y(mut self, ratio: f64) -> Self {
        self.damping_ratio_y = ratio;
        self
    }

    /// Check all values against the command bounds.
    pub fn validate(&self) -> Result<(), SmoothingError> {
        validate_target_freq("target_freq_x", self.target_freq_x)?;
        validate_target_freq("target_freq_y", self.target_freq_y)?;
        validate_damping_ratio("damping_ratio_x", self.damping_ratio_x)?;
        validate_damping_ratio("damping_ratio_y", self.damping_ratio_y)?;
        Ok(())
    }
}
