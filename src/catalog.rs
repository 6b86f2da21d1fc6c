//! Catalog of smoother variants and their step-generation windows.
//!
//! A smoother is selected by name at runtime (`SMOOTHER=di`), so the catalog
//! pairs a closed [`SmootherVariant`] enumeration with a static name table.
//! The only numeric contract this crate relies on is
//! [`half_smooth_time`]: the duration into the future (and symmetric
//! history) the filter must read trajectory samples for, derived from the
//! target resonant frequency and damping ratio.
//!
//! # Example
//!
//! ```rust
//! use smooth_axis::{half_smooth_time, SmootherVariant};
//!
//! let variant = SmootherVariant::from_name("di").unwrap();
//! let hst = half_smooth_time(variant, 40.0, 0.1);
//! assert!(hst > 0.0);
//!
//! // A zero target frequency disables filtering entirely.
//! assert_eq!(half_smooth_time(variant, 0.0, 0.1), 0.0);
//! ```

/// One smoothing algorithm family among a fixed enumerated set.
///
/// The identity of a variant is immutable; parameters (frequency, damping)
/// are carried separately in [`AxisFilterState`](crate::AxisFilterState).
///
/// # Naming
///
/// Variants are selectable by the names in the table below, matched
/// case-insensitively by [`from_name`](Self::from_name):
///
/// | Name | Variant | Window (periods of the target frequency) |
/// |------|---------|------------------------------------------|
/// | `si` | [`SingleImpulse`](Self::SingleImpulse) | 0.5 |
/// | `di` | [`DoubleImpulse`](Self::DoubleImpulse) | 0.75 |
/// | `position` | [`PositionForm`](Self::PositionForm) | 1.0 |
/// | `accel` | [`AccelForm`](Self::AccelForm) | 1.25 |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SmootherVariant {
    /// Single-impulse smoother: shortest window, least vibration rejection.
    SingleImpulse,
    /// Double-impulse smoother. Default, matching the usual accuracy /
    /// smoothing trade-off.
    #[default]
    DoubleImpulse,
    /// Position-form smoother: smooths the position signal directly.
    PositionForm,
    /// Acceleration-form smoother: widest window, targets acceleration
    /// excitation.
    AccelForm,
}

impl SmootherVariant {
    /// Every selectable variant, in name-table order.
    pub const ALL: [SmootherVariant; 4] = [
        SmootherVariant::SingleImpulse,
        SmootherVariant::DoubleImpulse,
        SmootherVariant::PositionForm,
        SmootherVariant::AccelForm,
    ];

    /// Returns the variant's selectable name.
    ///
    /// This is the name echoed in command confirmations, not the Rust
    /// identifier.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            SmootherVariant::SingleImpulse => "si",
            SmootherVariant::DoubleImpulse => "di",
            SmootherVariant::PositionForm => "position",
            SmootherVariant::AccelForm => "accel",
        }
    }

    /// Look up a variant by name.
    ///
    /// Input is trimmed and case-insensitive. An unknown name returns
    /// `None`; callers treat that as a validation error, never a runtime
    /// lookup failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use smooth_axis::SmootherVariant;
    ///
    /// assert_eq!(SmootherVariant::from_name("di"), Some(SmootherVariant::DoubleImpulse));
    /// assert_eq!(SmootherVariant::from_name("  ACCEL "), Some(SmootherVariant::AccelForm));
    /// assert_eq!(SmootherVariant::from_name("zvq"), None);
    /// ```
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "si" => Some(SmootherVariant::SingleImpulse),
            "di" => Some(SmootherVariant::DoubleImpulse),
            "position" => Some(SmootherVariant::PositionForm),
            "accel" => Some(SmootherVariant::AccelForm),
            _ => None,
        }
    }

    /// Window width as a multiple of the target period.
    const fn window_periods(&self) -> f64 {
        match self {
            SmootherVariant::SingleImpulse => 0.5,
            SmootherVariant::DoubleImpulse => 0.75,
            SmootherVariant::PositionForm => 1.0,
            SmootherVariant::AccelForm => 1.25,
        }
    }
}

// Higher damping ratios widen the effective impulse train.
const DAMPING_WIDENING: f64 = 0.5;

/// Half the smoothing window required by `variant` at the given physical
/// parameters, in seconds.
///
/// Pure and deterministic, total for all `target_freq >= 0` and
/// `damping_ratio` in `[0, 1]`. Returns `0.0` when `target_freq == 0`
/// (filtering disabled). Range validation is the caller's responsibility.
pub fn half_smooth_time(variant: SmootherVariant, target_freq: f64, damping_ratio: f64) -> f64 {
    if target_freq <= 0.0 {
        return 0.0;
    }
    let period = 1.0 / target_freq;
    variant.window_periods() * period * (1.0 + DAMPING_WIDENING * damping_ratio)
}
