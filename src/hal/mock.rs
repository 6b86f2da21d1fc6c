//! Mock implementations for testing without a motion system.
//!
//! This module provides test doubles for the planner and stepper traits
//! plus a deterministic trajectory source, enabling the full controller
//! protocol to run on the desktop.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockPlanner`] | [`MotionPlanner`] | Records extend/shrink calls, optional capacity limit |
//! | [`MockStepper`] | [`Stepper`] | Swappable kinematics for attach/detach tests |
//! | [`MockMotion`] | [`AxisMotion`] | Constant-acceleration trajectory per axis |
//!
//! # Example
//!
//! ```rust
//! use smooth_axis::hal::mock::{MockMotion, MockPlanner, MockStepper};
//! use smooth_axis::traits::{MotionPlanner, Stepper};
//! use smooth_axis::Axis;
//!
//! let stepper = MockStepper::cartesian("stepper_x", Axis::X);
//! let motion = MockMotion::new().with_axis(Axis::X, 0.0, 50.0, 0.0);
//! assert_eq!(stepper.position(&motion, 0.5), 25.0);
//!
//! let mut planner = MockPlanner::new().with_capacity(0.25);
//! assert!(planner.extend_lookahead(0.5).is_err());
//! assert_eq!(planner.horizon, 0.0);
//! ```
//!
//! [`MotionPlanner`]: crate::traits::MotionPlanner
//! [`Stepper`]: crate::traits::Stepper
//! [`AxisMotion`]: crate::AxisMotion

use crate::axis::Axis;
use crate::kinematics::{AxisMotion, NativeKinematics, PositionSource};
use crate::traits::{MotionPlanner, Stepper};

// ============================================================================
// Planner Mock
// ============================================================================

/// Horizon extension refused: the requested total would exceed the
/// configured buffer capacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LookaheadFull {
    /// The total horizon the extension would have required.
    pub requested: f64,
    /// The configured capacity limit.
    pub capacity: f64,
}

/// Mock motion planner for testing.
///
/// Honors every extension unless a capacity limit is set, and records all
/// calls for verification. Use the public fields to inspect state after
/// test operations.
///
/// # Example
///
/// ```rust
/// use smooth_axis::hal::mock::MockPlanner;
/// use smooth_axis::traits::MotionPlanner;
///
/// let mut planner = MockPlanner::new();
/// planner.extend_lookahead(0.25).unwrap();
/// planner.note_desired_shrink(0.125);
///
/// assert_eq!(planner.horizon, 0.25);
/// assert_eq!(planner.extend_calls, vec![0.25]);
/// assert_eq!(planner.shrink_notes, vec![0.125]);
/// ```
#[derive(Debug, Default)]
pub struct MockPlanner {
    /// The horizon currently honored, in seconds. Shrink notes do not
    /// reduce it; a real planner reclaims at leisure and so does this one
    /// (never).
    pub horizon: f64,
    /// Deltas of every honored extension, in call order.
    pub extend_calls: Vec<f64>,
    /// Deltas of every shrink note, in call order.
    pub shrink_notes: Vec<f64>,
    /// Maximum total horizon this planner will honor; `None` is unlimited.
    pub capacity: Option<f64>,
}

impl MockPlanner {
    /// Creates an unlimited planner with a zero horizon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the total horizon; extensions past it are refused.
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

impl MotionPlanner for MockPlanner {
    type Error = LookaheadFull;

    fn extend_lookahead(&mut self, delta: f64) -> Result<(), LookaheadFull> {
        let requested = self.horizon + delta;
        if let Some(capacity) = self.capacity {
            if requested > capacity {
                return Err(LookaheadFull {
                    requested,
                    capacity,
                });
            }
        }
        self.horizon = requested;
        self.extend_calls.push(delta);
        Ok(())
    }

    fn note_desired_shrink(&mut self, delta: f64) {
        self.shrink_notes.push(delta);
    }
}

// ============================================================================
// Stepper Mock
// ============================================================================

/// Mock stepper for testing attach, detach and position queries.
///
/// Built either as a Cartesian stepper whose motion decomposes onto one
/// axis, or as an unsupported stepper that the binding must skip.
#[derive(Debug)]
pub struct MockStepper {
    name: String,
    motion_axis: Option<Axis>,
    kinematics: PositionSource,
}

impl MockStepper {
    /// A stepper driving the given Cartesian axis, starting native.
    pub fn cartesian(name: &str, axis: Axis) -> Self {
        Self {
            name: name.to_string(),
            motion_axis: Some(axis),
            kinematics: PositionSource::Native(NativeKinematics::new(axis)),
        }
    }

    /// A stepper the smoother cannot serve (no single-axis decomposition).
    pub fn unsupported(name: &str) -> Self {
        Self {
            name: name.to_string(),
            motion_axis: None,
            kinematics: PositionSource::Native(NativeKinematics::new(Axis::X)),
        }
    }
}

impl Stepper for MockStepper {
    fn name(&self) -> &str {
        &self.name
    }

    fn motion_axis(&self) -> Option<Axis> {
        self.motion_axis
    }

    fn take_kinematics(&mut self) -> PositionSource {
        // Placeholder source; the caller installs a real one right after.
        let placeholder = PositionSource::Native(NativeKinematics::new(
            self.motion_axis.unwrap_or(Axis::X),
        ));
        core::mem::replace(&mut self.kinematics, placeholder)
    }

    fn set_kinematics(&mut self, source: PositionSource) {
        self.kinematics = source;
    }

    fn kinematics(&self) -> &PositionSource {
        &self.kinematics
    }
}

// ============================================================================
// Trajectory Mock
// ============================================================================

#[derive(Clone, Copy, Debug, Default)]
struct MotionProfile {
    start: f64,
    velocity: f64,
    accel: f64,
}

impl MotionProfile {
    fn at(&self, t: f64) -> f64 {
        self.start + self.velocity * t + 0.5 * self.accel * t * t
    }
}

/// Deterministic trajectory source: one constant-acceleration profile per
/// axis. Unconfigured axes hold position zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockMotion {
    x: MotionProfile,
    y: MotionProfile,
}

impl MockMotion {
    /// Creates a trajectory with every axis at rest at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one axis to `start + velocity * t + accel * t^2 / 2`.
    pub fn with_axis(mut self, axis: Axis, start: f64, velocity: f64, accel: f64) -> Self {
        let profile = MotionProfile {
            start,
            velocity,
            accel,
        };
        match axis {
            Axis::X => self.x = profile,
            Axis::Y => self.y = profile,
        }
        self
    }
}

impl AxisMotion for MockMotion {
    fn axis_position(&self, axis: Axis, t: f64) -> f64 {
        match axis {
            Axis::X => self.x.at(t),
            Axis::Y => self.y.at(t),
        }
    }
}
