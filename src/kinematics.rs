//! Position sources: native stepper kinematics and the filtering decorator.
//!
//! Each stepper computes its position from buffered trajectory data through
//! a [`PositionSource`]. Attaching the smoother replaces the stepper's
//! `Native` source with a `Filtered` wrapper by value; the wrapped native
//! kinematics travels inside the wrapper and comes back out on detach, so
//! there is never a shared mutable object graph to keep consistent.
//!
//! The filtered query at time `t` reads trajectory samples only inside
//! `[t - hst, t + hst]` where `hst` is the published half-smooth-time for
//! the stepper's axis. A zero `hst` short-circuits to the native value, so
//! a disabled filter is an exact passthrough.

use std::sync::Arc;

use crate::axis::{Axis, AxisSlot};

/// Buffered trajectory sampling, as guaranteed by the motion planner.
///
/// The planner materializes axis positions for a window around "now"; the
/// scan-window protocol (see [`ScanWindowCoordinator`]) ensures that window
/// always covers every filtered query this crate issues.
///
/// [`ScanWindowCoordinator`]: crate::ScanWindowCoordinator
pub trait AxisMotion {
    /// Trajectory position of `axis` at time `t` (seconds), in mm.
    fn axis_position(&self, axis: Axis, t: f64) -> f64;
}

/// The unfiltered mapping from trajectory to stepper position.
///
/// For the Cartesian stepper family served here the mapping is the axis
/// coordinate itself, optionally scaled by a drive ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NativeKinematics {
    axis: Axis,
    drive_ratio: f64,
}

impl NativeKinematics {
    /// Native kinematics for a directly driven axis.
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            drive_ratio: 1.0,
        }
    }

    /// Apply a drive ratio (e.g. geared axes).
    pub fn with_drive_ratio(mut self, ratio: f64) -> Self {
        self.drive_ratio = ratio;
        self
    }

    /// The motion axis this kinematics reads.
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Stepper position at time `t`.
    pub fn position(&self, motion: &dyn AxisMotion, t: f64) -> f64 {
        self.from_coordinate(motion.axis_position(self.axis, t))
    }

    /// Map an axis coordinate to a stepper position.
    #[inline]
    pub fn from_coordinate(&self, coord: f64) -> f64 {
        self.drive_ratio * coord
    }
}

/// A stepper's position function: either the native kinematics or the
/// native kinematics behind the smoothing filter.
///
/// Swapping between the two is a value replacement performed by
/// [`StepperFilterBinding`](crate::StepperFilterBinding).
#[derive(Clone, Debug)]
pub enum PositionSource {
    /// Unfiltered native kinematics.
    Native(NativeKinematics),
    /// Native kinematics fed with smoothed axis coordinates.
    Filtered {
        /// The wrapped native kinematics, returned on detach.
        inner: NativeKinematics,
        /// Shared read handle to the axis's published filter snapshot.
        state: Arc<AxisSlot>,
    },
}

impl PositionSource {
    /// Stepper position at time `t`.
    ///
    /// The filtered path loads one complete parameter snapshot per query;
    /// a swap published mid-stream is picked up by the next query.
    pub fn position(&self, motion: &dyn AxisMotion, t: f64) -> f64 {
        match self {
            PositionSource::Native(native) => native.position(motion, t),
            PositionSource::Filtered { inner, state } => {
                let snapshot = state.load();
                let hst = snapshot.half_smooth_time();
                if hst == 0.0 {
                    return inner.position(motion, t);
                }
                let coord = smoothed_axis_position(motion, inner.axis(), t, hst);
                inner.from_coordinate(coord)
            }
        }
    }

    /// Whether the filtering decorator is installed.
    pub fn is_filtered(&self) -> bool {
        matches!(self, PositionSource::Filtered { .. })
    }
}

// Evaluation grid for the windowed average. Even, so the center sample
// lands exactly on the query time.
const SMOOTH_INTERVALS: usize = 16;

/// Normalized time-weighted average of the axis position over
/// `[t - hst, t + hst]`.
///
/// Symmetric triangular weights on a uniform grid: exact identity for
/// constant-velocity motion, and never samples outside the window the
/// planner has guaranteed.
fn smoothed_axis_position(motion: &dyn AxisMotion, axis: Axis, t: f64, hst: f64) -> f64 {
    let dt = 2.0 * hst / SMOOTH_INTERVALS as f64;
    let mut area = 0.0;
    let mut norm = 0.0;
    for i in 0..=SMOOTH_INTERVALS {
        let offset = i as f64 * dt - hst;
        // Triangle weight, zero at the window edges.
        let weight = hst - offset.abs();
        if weight <= 0.0 {
            continue;
        }
        area += weight * motion.axis_position(axis, t + offset);
        norm += weight;
    }
    area / norm
}
