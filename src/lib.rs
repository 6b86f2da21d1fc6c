//! # smooth-axis
//!
//! Runtime-adjustable motion smoothing for Cartesian stepper systems:
//! decorator kinematics plus lookahead-window coordination with the motion
//! planner.
//!
//! ## Features
//!
//! - **Decorator kinematics**: wrap a stepper's native position function
//!   with a windowed smoothing filter, detachable bit-for-bit
//! - **Runtime retuning**: `SET_SMOOTH_AXIS` changes smoother and per-axis
//!   parameters without pausing motion
//! - **Torn-read-free publication**: each axis publishes one immutable
//!   parameter snapshot, swapped whole
//! - **Window protocol**: the planner's lookahead horizon grows *before*
//!   wider parameters commit and shrinks only advisorily, so step
//!   generation never scans past buffered trajectory
//! - **Soft degradation**: unsupported steppers and rejected window
//!   extensions are skipped or refused without faulting the machine
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without a motion
//! system:
//!
//! - `traits` - Planner and stepper abstractions
//! - `catalog` - Smoother variants and their window arithmetic
//! - `axis` - Per-axis filter state and its publication slot
//! - `kinematics` - Native and filtered position sources
//! - `binding` - Per-stepper attach/update/detach
//! - `window` - Scan-window negotiation with the planner
//! - `controller` - Lifecycle, command application, shutdown
//! - `commands` - The `SET_SMOOTH_AXIS` line parser
//! - `hal` - Mock implementations for testing
//!
//! ## Example
//!
//! ```rust
//! use smooth_axis::{
//!     hal::mock::{MockPlanner, MockStepper},
//!     Axis, SmoothAxisCommand, SmoothingConfig, SmoothingController,
//! };
//!
//! // Create the controller and bind it to the machine's steppers.
//! let mut controller =
//!     SmoothingController::new(MockPlanner::new(), SmoothingConfig::default()).unwrap();
//! let mut steppers = vec![
//!     MockStepper::cartesian("stepper_x", Axis::X),
//!     MockStepper::cartesian("stepper_y", Axis::Y),
//! ];
//! controller.bind(&mut steppers);
//!
//! // Retune at runtime.
//! let cmd = SmoothAxisCommand::parse(
//!     "SET_SMOOTH_AXIS SMOOTHER=di TARGET_FREQ_XY=45 DAMPING_RATIO_XY=0.1",
//! ).unwrap();
//! let confirmation = controller.apply_command(&cmd).unwrap();
//! assert!(confirmation.contains("smoother:di"));
//!
//! // Restore native kinematics.
//! controller.shutdown(&mut steppers);
//! ```

#![warn(missing_docs)]

/// Per-axis filter state and its atomically-swappable publication slot.
pub mod axis;
/// Per-stepper filter binding: attach, update, detach.
pub mod binding;
/// The smoother catalog and half-smooth-time arithmetic.
pub mod catalog;
/// The `SET_SMOOTH_AXIS` command and its line parser.
pub mod commands;
/// Startup configuration for the smoothing controller.
pub mod config;
/// The smoothing controller: lifecycle, commands, shutdown.
pub mod controller;
/// Mock collaborator implementations for testing.
pub mod hal;
/// Native and filtered position sources.
pub mod kinematics;
/// Collaborator traits: motion planner and stepper.
pub mod traits;
/// Scan-window coordination with the motion planner.
pub mod window;

/// JSON message types for remote smoothing control (serde-based).
#[cfg(feature = "serde")]
pub mod messages;

// Re-exports for convenience
pub use axis::{Axis, AxisFilterState, AxisSlot, AxisSlots};
pub use binding::{AttachError, StepperFilterBinding};
pub use catalog::{half_smooth_time, SmootherVariant};
pub use commands::{CommandParseError, SmoothAxisCommand, COMMAND_NAME};
pub use config::SmoothingConfig;
pub use controller::{ControllerState, SmoothingController, SmoothingError};
pub use kinematics::{AxisMotion, NativeKinematics, PositionSource};
pub use traits::{MotionPlanner, Stepper};
pub use window::ScanWindowCoordinator;

// Message re-exports (for HTTP/MQTT frontends)
#[cfg(feature = "serde")]
pub use messages::SetSmoothAxisRequest;

#[cfg(feature = "serde-json-core")]
pub use messages::parse_smooth_axis_request;
