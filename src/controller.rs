//! The smoothing controller: binds steppers, owns the per-axis filter
//! state, and mediates every parameter change through the scan-window
//! coordinator.
//!
//! # Lifecycle
//!
//! Two-phase initialization: [`SmoothingController::new`] validates the
//! startup configuration, then [`bind`](SmoothingController::bind) is
//! called once the motion system and its steppers exist. Parameter changes
//! arrive as [`SmoothAxisCommand`]s; shutdown restores every stepper's
//! native kinematics.
//!
//! # State machine
//!
//! ```text
//! Uninitialized --bind(ok)-------> Bound
//! Uninitialized --bind(rejected)-> Disabled   (passthrough, retryable)
//! Bound    --apply_command(ok)---> Bound
//! Bound    --apply_command(err)--> Bound      (prior parameters retained)
//! Disabled --apply_command(ok)---> Bound
//! any      --shutdown------------> Uninitialized
//! ```
//!
//! # Example
//!
//! ```rust
//! use smooth_axis::{
//!     hal::mock::{MockPlanner, MockStepper},
//!     Axis, SmoothAxisCommand, SmoothingConfig, SmoothingController,
//! };
//!
//! let config = SmoothingConfig::default();
//! let mut controller = SmoothingController::new(MockPlanner::new(), config).unwrap();
//!
//! let mut steppers = vec![
//!     MockStepper::cartesian("stepper_x", Axis::X),
//!     MockStepper::cartesian("stepper_y", Axis::Y),
//! ];
//! controller.bind(&mut steppers);
//!
//! let cmd = SmoothAxisCommand::parse(
//!     "SET_SMOOTH_AXIS SMOOTHER=di TARGET_FREQ_X=40 DAMPING_RATIO_X=0.1",
//! ).unwrap();
//! let confirmation = controller.apply_command(&cmd).unwrap();
//! assert!(confirmation.contains("target_freq_x:40.000000000"));
//! ```

use crate::axis::{Axis, AxisFilterState, AxisSlots};
use crate::binding::StepperFilterBinding;
use crate::catalog::SmootherVariant;
use crate::commands::SmoothAxisCommand;
use crate::config::SmoothingConfig;
use crate::traits::{MotionPlanner, Stepper};
use crate::window::ScanWindowCoordinator;
use std::sync::Arc;

/// Controller lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    /// Constructed but not yet bound to steppers.
    Uninitialized,
    /// Bound; filter parameters are live.
    Bound,
    /// Bound, but the initial window proposal was rejected: both axis
    /// slots are zeroed so every filtered query is an exact passthrough.
    /// A later successful parameter command leaves this state.
    Disabled,
}

/// Errors surfaced to the command issuer. None is fatal; every failure
/// path leaves the previous consistent configuration in place.
#[derive(Clone, Debug, PartialEq)]
pub enum SmoothingError {
    /// An out-of-range numeric input; the command was rejected with no
    /// side effects.
    InvalidParameter {
        /// The offending parameter.
        key: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The requested smoother name is not in the catalog.
    UnknownSmoother(String),
    /// The planner could not grow its lookahead buffer; the parameter
    /// change was rejected atomically.
    WindowExtensionRejected,
    /// A command arrived before `bind`.
    NotBound,
}

impl core::fmt::Display for SmoothingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SmoothingError::InvalidParameter { key, value } => {
                write!(f, "parameter '{key}' out of range: {value}")
            }
            SmoothingError::UnknownSmoother(name) => {
                write!(f, "smoother '{name}' is not supported")
            }
            SmoothingError::WindowExtensionRejected => {
                write!(f, "planner rejected the lookahead window extension")
            }
            SmoothingError::NotBound => {
                write!(f, "smoothing controller is not bound to a motion system")
            }
        }
    }
}

impl std::error::Error for SmoothingError {}

pub(crate) fn validate_target_freq(key: &'static str, value: f64) -> Result<(), SmoothingError> {
    // `!(..)` also rejects NaN.
    if !(value >= 0.0) {
        return Err(SmoothingError::InvalidParameter { key, value });
    }
    Ok(())
}

pub(crate) fn validate_damping_ratio(key: &'static str, value: f64) -> Result<(), SmoothingError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SmoothingError::InvalidParameter { key, value });
    }
    Ok(())
}

/// Coordinates runtime-adjustable motion smoothing across both axes.
///
/// Owns the planner handle, the published per-axis filter snapshots and
/// the per-stepper bindings. All parameter changes flow through
/// [`apply_command`](Self::apply_command), which never lets new
/// parameters become visible before the planner honors the window they
/// require.
///
/// # Type Parameter
///
/// - `P`: the motion planner ([`MotionPlanner`] trait). Its error type
///   only needs `Debug` for logging; the rejection is reported to the
///   issuer as [`SmoothingError::WindowExtensionRejected`].
pub struct SmoothingController<P: MotionPlanner> {
    planner: P,
    config: SmoothingConfig,
    slots: AxisSlots,
    bindings: Vec<StepperFilterBinding>,
    coordinator: ScanWindowCoordinator,
    state: ControllerState,
}

impl<P: MotionPlanner> SmoothingController<P>
where
    P::Error: core::fmt::Debug,
{
    /// Validate `config` and construct an unbound controller.
    pub fn new(planner: P, config: SmoothingConfig) -> Result<Self, SmoothingError> {
        config.validate()?;
        let disabled = AxisFilterState::disabled(config.smoother);
        Ok(Self {
            planner,
            config,
            slots: AxisSlots::new(disabled, disabled),
            bindings: Vec::new(),
            coordinator: ScanWindowCoordinator::new(),
            state: ControllerState::Uninitialized,
        })
    }

    /// Attach every eligible stepper and activate the configured
    /// parameters. Call once the motion system exists.
    ///
    /// Steppers whose kinematics cannot be wrapped are skipped with a
    /// warning and keep their native behavior (soft fallback). If the
    /// planner rejects the initial window the controller logs, stays in
    /// passthrough and enters [`ControllerState::Disabled`]; a later
    /// successful parameter command retries activation.
    ///
    /// Returns the number of steppers attached.
    pub fn bind<S: Stepper>(&mut self, steppers: &mut [S]) -> usize {
        if self.state != ControllerState::Uninitialized {
            log::warn!("smoothing controller already bound; ignoring bind request");
            return self.bindings.len();
        }

        for stepper in steppers.iter_mut() {
            match StepperFilterBinding::attach(stepper, &self.slots) {
                Ok(binding) => self.bindings.push(binding),
                Err(err) => {
                    log::warn!(
                        "skipping stepper '{}': {} (keeps native kinematics)",
                        stepper.name(),
                        err
                    );
                }
            }
        }

        let initial_x = AxisFilterState::compute(
            self.config.smoother,
            self.config.target_freq_x,
            self.config.damping_ratio_x,
        );
        let initial_y = AxisFilterState::compute(
            self.config.smoother,
            self.config.target_freq_y,
            self.config.damping_ratio_y,
        );
        match self.commit(initial_x, initial_y) {
            Ok(()) => self.state = ControllerState::Bound,
            Err(err) => {
                log::warn!("initial smoothing window rejected ({err}); falling back to passthrough");
                self.state = ControllerState::Disabled;
            }
        }
        self.bindings.len()
    }

    /// Apply a `SET_SMOOTH_AXIS` command.
    ///
    /// Omitted parameters keep their current values; `_XY` pair keys win
    /// for both axes. All provided values are range-validated before any
    /// state changes or planner calls. On success returns the
    /// human-readable confirmation echoing the active smoother name and
    /// all four parameters now in effect.
    pub fn apply_command(&mut self, cmd: &SmoothAxisCommand) -> Result<String, SmoothingError> {
        if self.state == ControllerState::Uninitialized {
            return Err(SmoothingError::NotBound);
        }

        // Validate every provided value before touching anything.
        if let Some(v) = cmd.target_freq_x {
            validate_target_freq("TARGET_FREQ_X", v)?;
        }
        if let Some(v) = cmd.target_freq_y {
            validate_target_freq("TARGET_FREQ_Y", v)?;
        }
        if let Some(v) = cmd.target_freq_xy {
            validate_target_freq("TARGET_FREQ_XY", v)?;
        }
        if let Some(v) = cmd.damping_ratio_x {
            validate_damping_ratio("DAMPING_RATIO_X", v)?;
        }
        if let Some(v) = cmd.damping_ratio_y {
            validate_damping_ratio("DAMPING_RATIO_Y", v)?;
        }
        if let Some(v) = cmd.damping_ratio_xy {
            validate_damping_ratio("DAMPING_RATIO_XY", v)?;
        }

        let cur_x = self.slots.load(Axis::X);
        let cur_y = self.slots.load(Axis::Y);

        let variant = match &cmd.smoother {
            Some(name) => SmootherVariant::from_name(name)
                .ok_or_else(|| SmoothingError::UnknownSmoother(name.clone()))?,
            None => cur_x.variant,
        };
        let freq_x = cmd
            .target_freq_xy
            .or(cmd.target_freq_x)
            .unwrap_or(cur_x.target_freq);
        let freq_y = cmd
            .target_freq_xy
            .or(cmd.target_freq_y)
            .unwrap_or(cur_y.target_freq);
        let damping_x = cmd
            .damping_ratio_xy
            .or(cmd.damping_ratio_x)
            .unwrap_or(cur_x.damping_ratio);
        let damping_y = cmd
            .damping_ratio_xy
            .or(cmd.damping_ratio_y)
            .unwrap_or(cur_y.damping_ratio);

        let new_x = AxisFilterState::compute(variant, freq_x, damping_x);
        let new_y = AxisFilterState::compute(variant, freq_y, damping_y);
        self.commit(new_x, new_y)?;
        self.state = ControllerState::Bound;

        let confirmation = format!(
            "smoother:{} target_freq_x:{:.9} target_freq_y:{:.9} \
             damping_ratio_x:{:.9} damping_ratio_y:{:.9}",
            variant.as_str(),
            freq_x,
            freq_y,
            damping_x,
            damping_y
        );
        log::info!("{confirmation}");
        Ok(confirmation)
    }

    /// Detach every binding, restore native kinematics and release the
    /// scan window. The controller returns to `Uninitialized` and may be
    /// bound again.
    pub fn shutdown<S: Stepper>(&mut self, steppers: &mut [S]) {
        for binding in self.bindings.drain(..) {
            if let Some(stepper) = steppers
                .iter_mut()
                .find(|s| s.name() == binding.stepper_name())
            {
                binding.detach(stepper);
            }
        }
        // Shrinking to zero never calls extend_lookahead, so this cannot
        // fail.
        let _ = self.coordinator.propose(&mut self.planner, 0.0);
        let disabled = AxisFilterState::disabled(self.config.smoother);
        self.slots.store(Axis::X, disabled);
        self.slots.store(Axis::Y, disabled);
        self.state = ControllerState::Uninitialized;
    }

    /// Negotiate the window for a candidate state pair, then publish both
    /// snapshots. Ordering: extension first, snapshots after; a rejected
    /// extension commits nothing.
    fn commit(
        &mut self,
        new_x: AxisFilterState,
        new_y: AxisFilterState,
    ) -> Result<(), SmoothingError> {
        let new_window = new_x.half_smooth_time().max(new_y.half_smooth_time());
        self.coordinator
            .propose(&mut self.planner, new_window)
            .map_err(|err| {
                log::warn!("lookahead extension rejected by planner: {err:?}");
                SmoothingError::WindowExtensionRejected
            })?;
        self.slots.store(Axis::X, new_x);
        self.slots.store(Axis::Y, new_y);
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// The published snapshot for one axis.
    pub fn axis_state(&self, axis: Axis) -> Arc<AxisFilterState> {
        self.slots.load(axis)
    }

    /// The committed extra-lookahead window in seconds.
    pub fn scan_window(&self) -> f64 {
        self.coordinator.window()
    }

    /// Bindings currently attached.
    pub fn bindings(&self) -> &[StepperFilterBinding] {
        &self.bindings
    }

    /// Borrow the planner (e.g. to inspect a mock in tests).
    pub fn planner(&self) -> &P {
        &self.planner
    }

    /// Mutably borrow the planner.
    pub fn planner_mut(&mut self) -> &mut P {
        &mut self.planner
    }
}
