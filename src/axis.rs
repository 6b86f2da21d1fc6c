//! Per-axis filter state and its atomically-swappable publication slot.
//!
//! The command context and the real-time step-generation context share
//! filter parameters, but a step-generation reader must never observe a
//! torn combination (new frequency with old damping). Each axis therefore
//! publishes a complete immutable [`AxisFilterState`] snapshot through an
//! [`AxisSlot`]; writers replace the whole snapshot in one pointer swap and
//! readers clone the `Arc` under a lock held only for that swap, never
//! across the planner negotiation.

use std::sync::{Arc, RwLock};

use crate::catalog::{half_smooth_time, SmootherVariant};

/// A Cartesian motion axis served by the smoothing filter family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
}

impl Axis {
    /// Returns the axis as a lowercase string.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

/// Immutable per-axis filter parameters.
///
/// The derived `half_smooth_time` is private and only ever produced by
/// [`compute`](Self::compute), so the invariant
/// `half_smooth_time == catalog::half_smooth_time(variant, freq, damping)`
/// holds for every value of this type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisFilterState {
    /// Active smoother variant.
    pub variant: SmootherVariant,
    /// Target resonant frequency in Hz (`>= 0`; `0` disables filtering).
    pub target_freq: f64,
    /// Damping ratio of the targeted resonance (`0..=1`).
    pub damping_ratio: f64,
    half_smooth_time: f64,
}

impl AxisFilterState {
    /// Build a state, deriving the half-smooth-time from the catalog.
    ///
    /// Range validation happens before this point (config load or command
    /// validation); `compute` is total for any `target_freq >= 0` and
    /// `damping_ratio` in `[0, 1]`.
    pub fn compute(variant: SmootherVariant, target_freq: f64, damping_ratio: f64) -> Self {
        Self {
            variant,
            target_freq,
            damping_ratio,
            half_smooth_time: half_smooth_time(variant, target_freq, damping_ratio),
        }
    }

    /// A state with filtering disabled (`target_freq = 0`, window 0).
    pub fn disabled(variant: SmootherVariant) -> Self {
        Self::compute(variant, 0.0, 0.0)
    }

    /// The derived half-smooth-time in seconds.
    #[inline]
    pub fn half_smooth_time(&self) -> f64 {
        self.half_smooth_time
    }
}

impl Default for AxisFilterState {
    fn default() -> Self {
        Self::disabled(SmootherVariant::default())
    }
}

/// Shared holder for one axis's published snapshot.
///
/// Cloned `Arc<AxisSlot>` handles are held by every
/// [`PositionSource::Filtered`](crate::PositionSource) wrapper on that
/// axis; the controller swaps in new snapshots after the scan-window
/// negotiation succeeds.
#[derive(Debug)]
pub struct AxisSlot {
    inner: RwLock<Arc<AxisFilterState>>,
}

impl AxisSlot {
    /// Create a slot publishing the given initial state.
    pub fn new(state: AxisFilterState) -> Self {
        Self {
            inner: RwLock::new(Arc::new(state)),
        }
    }

    /// Current snapshot. The returned `Arc` stays valid (and complete)
    /// even if a new snapshot is published while the caller still holds it.
    pub fn load(&self) -> Arc<AxisFilterState> {
        match self.inner.read() {
            Ok(guard) => Arc::clone(&guard),
            // A poisoned lock still holds a complete snapshot.
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Publish a new snapshot, replacing the previous one atomically.
    pub fn store(&self, state: AxisFilterState) {
        let next = Arc::new(state);
        match self.inner.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }
}

/// The X/Y slot pair owned by the controller.
#[derive(Debug)]
pub struct AxisSlots {
    x: Arc<AxisSlot>,
    y: Arc<AxisSlot>,
}

impl AxisSlots {
    /// Create both slots from initial states.
    pub fn new(x: AxisFilterState, y: AxisFilterState) -> Self {
        Self {
            x: Arc::new(AxisSlot::new(x)),
            y: Arc::new(AxisSlot::new(y)),
        }
    }

    /// Shared handle to one axis's slot, for wrapping into a stepper's
    /// position source.
    pub fn slot(&self, axis: Axis) -> Arc<AxisSlot> {
        match axis {
            Axis::X => Arc::clone(&self.x),
            Axis::Y => Arc::clone(&self.y),
        }
    }

    /// Current snapshot for one axis.
    pub fn load(&self, axis: Axis) -> Arc<AxisFilterState> {
        self.slot_ref(axis).load()
    }

    /// Publish a new snapshot for one axis.
    pub fn store(&self, axis: Axis, state: AxisFilterState) {
        self.slot_ref(axis).store(state);
    }

    /// The scan window currently implied by both published snapshots:
    /// `max(hst_x, hst_y)`, never a sum, since both axes read from the same
    /// buffered timeline.
    pub fn required_window(&self) -> f64 {
        self.load(Axis::X)
            .half_smooth_time()
            .max(self.load(Axis::Y).half_smooth_time())
    }

    fn slot_ref(&self, axis: Axis) -> &AxisSlot {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}

impl Default for AxisSlots {
    fn default() -> Self {
        Self::new(AxisFilterState::default(), AxisFilterState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn axis_as_str() {
        assert_eq!(Axis::X.as_str(), "x");
        assert_eq!(Axis::Y.as_str(), "y");
    }

    #[test]
    fn state_derives_half_smooth_time() {
        let state = AxisFilterState::compute(SmootherVariant::DoubleImpulse, 40.0, 0.1);
        assert_eq!(
            state.half_smooth_time(),
            catalog::half_smooth_time(SmootherVariant::DoubleImpulse, 40.0, 0.1)
        );
    }

    #[test]
    fn disabled_state_has_zero_window() {
        let state = AxisFilterState::disabled(SmootherVariant::AccelForm);
        assert_eq!(state.target_freq, 0.0);
        assert_eq!(state.half_smooth_time(), 0.0);
    }

    #[test]
    fn slot_swap_replaces_whole_snapshot() {
        let slot = AxisSlot::new(AxisFilterState::disabled(SmootherVariant::DoubleImpulse));
        let before = slot.load();

        slot.store(AxisFilterState::compute(
            SmootherVariant::PositionForm,
            50.0,
            0.2,
        ));
        let after = slot.load();

        // Old snapshot unchanged, new snapshot complete.
        assert_eq!(before.target_freq, 0.0);
        assert_eq!(after.variant, SmootherVariant::PositionForm);
        assert_eq!(after.target_freq, 50.0);
        assert_eq!(after.damping_ratio, 0.2);
    }

    #[test]
    fn in_flight_snapshot_survives_swap() {
        let slot = AxisSlot::new(AxisFilterState::compute(
            SmootherVariant::DoubleImpulse,
            40.0,
            0.1,
        ));
        let held = slot.load();
        slot.store(AxisFilterState::disabled(SmootherVariant::DoubleImpulse));

        // A query that began before the swap keeps the previous complete
        // parameters.
        assert_eq!(held.target_freq, 40.0);
        assert_eq!(held.damping_ratio, 0.1);
    }

    #[test]
    fn required_window_takes_max_not_sum() {
        let slots = AxisSlots::default();
        slots.store(
            Axis::X,
            AxisFilterState::compute(SmootherVariant::DoubleImpulse, 40.0, 0.0),
        );
        slots.store(
            Axis::Y,
            AxisFilterState::compute(SmootherVariant::DoubleImpulse, 20.0, 0.0),
        );

        let hst_x = slots.load(Axis::X).half_smooth_time();
        let hst_y = slots.load(Axis::Y).half_smooth_time();
        assert_eq!(slots.required_window(), hst_x.max(hst_y));
        assert!(slots.required_window() < hst_x + hst_y);
    }
}
