//! Stepper abstraction: axis identity and the kinematics swap point.

use crate::axis::Axis;
use crate::kinematics::{AxisMotion, PositionSource};

/// A stepper whose position function can be decorated.
///
/// The stepper owns its [`PositionSource`] exclusively; installing or
/// removing the filter is a value swap through
/// [`take_kinematics`](Self::take_kinematics) /
/// [`set_kinematics`](Self::set_kinematics), performed only by
/// [`StepperFilterBinding`](crate::StepperFilterBinding) — all-or-nothing
/// per stepper.
pub trait Stepper {
    /// Stable stepper name for diagnostics ("stepper_x", ...).
    fn name(&self) -> &str;

    /// The Cartesian axis this stepper's motion decomposes onto, or `None`
    /// when the stepper cannot be served by this filter family (e.g.
    /// non-Cartesian kinematics).
    fn motion_axis(&self) -> Option<Axis>;

    /// Remove and return the current position source.
    fn take_kinematics(&mut self) -> PositionSource;

    /// Install a position source.
    fn set_kinematics(&mut self, source: PositionSource);

    /// Borrow the current position source.
    fn kinematics(&self) -> &PositionSource;

    /// Stepper position at time `t`, through whatever source is installed.
    fn position(&self, motion: &dyn AxisMotion, t: f64) -> f64 {
        self.kinematics().position(motion, t)
    }
}
