//! Per-stepper filter binding: attach, update, detach.
//!
//! A binding records that one stepper's native kinematics has been wrapped
//! into a [`PositionSource::Filtered`] decorator sharing the axis's
//! published filter snapshot. Attachment is all-or-nothing: when it fails,
//! the stepper is left exactly as it was found.

use std::sync::Arc;

use crate::axis::{Axis, AxisFilterState, AxisSlot, AxisSlots};
use crate::kinematics::PositionSource;
use crate::traits::Stepper;

/// Why a stepper could not be wrapped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachError {
    /// The stepper's motion axis cannot be served by this filter family
    /// (non-Cartesian kinematics). The stepper keeps its native behavior.
    UnsupportedAxis,
    /// The stepper's position source is already a filter decorator.
    AlreadyFiltered,
}

impl core::fmt::Display for AttachError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AttachError::UnsupportedAxis => write!(f, "stepper axis unsupported by smoother"),
            AttachError::AlreadyFiltered => write!(f, "stepper kinematics already filtered"),
        }
    }
}

/// Record of one wrapped stepper.
#[derive(Debug)]
pub struct StepperFilterBinding {
    stepper_name: String,
    axis: Axis,
    state: Arc<AxisSlot>,
}

impl StepperFilterBinding {
    /// Wrap `stepper`'s native kinematics with the filter for its axis.
    ///
    /// Fails with [`AttachError::UnsupportedAxis`] for steppers outside
    /// the X/Y decomposition and [`AttachError::AlreadyFiltered`] for a
    /// double attach; in both cases the stepper's position source is
    /// exactly what it was before the call.
    pub fn attach<S: Stepper>(stepper: &mut S, slots: &AxisSlots) -> Result<Self, AttachError> {
        let axis = stepper.motion_axis().ok_or(AttachError::UnsupportedAxis)?;
        let native = match stepper.take_kinematics() {
            PositionSource::Native(native) => native,
            filtered @ PositionSource::Filtered { .. } => {
                stepper.set_kinematics(filtered);
                return Err(AttachError::AlreadyFiltered);
            }
        };
        let state = slots.slot(axis);
        stepper.set_kinematics(PositionSource::Filtered {
            inner: native,
            state: Arc::clone(&state),
        });
        Ok(Self {
            stepper_name: stepper.name().to_string(),
            axis,
            state,
        })
    }

    /// Publish new filter parameters for this binding's axis.
    ///
    /// Replaces the snapshot in place without re-wrapping; a query already
    /// holding the previous snapshot completes with the previous complete
    /// parameters. The half-smooth-time the planner honors must have been
    /// negotiated through the scan-window coordinator before this call.
    pub fn update(&self, state: AxisFilterState) {
        self.state.store(state);
    }

    /// Restore the stepper's original kinematics.
    ///
    /// Ownership of the native kinematics returns to the stepper; later
    /// queries are bit-for-bit what they would have been had the filter
    /// never been attached.
    pub fn detach<S: Stepper>(self, stepper: &mut S) {
        match stepper.take_kinematics() {
            PositionSource::Filtered { inner, .. } => {
                stepper.set_kinematics(PositionSource::Native(inner));
            }
            // Already native; nothing was wrapped.
            native @ PositionSource::Native(_) => stepper.set_kinematics(native),
        }
    }

    /// Name of the wrapped stepper.
    pub fn stepper_name(&self) -> &str {
        &self.stepper_name
    }

    /// The axis whose filter snapshot this binding reads.
    pub fn axis(&self) -> Axis {
        self.axis
    }
}
