//! Collaborator interfaces consumed by the smoothing coordinator.
//!
//! The motion planner and the stepper abstraction live outside this crate;
//! these traits specify exactly what the coordination protocol needs from
//! them and nothing more.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`MotionPlanner`] | Lookahead-horizon extend/shrink contract |
//! | [`Stepper`] | Kinematics swap point and axis identification |
//!
//! For testing, use the mock implementations from [`crate::hal::mock`].

mod planner;
mod stepper;

pub use planner::MotionPlanner;
pub use stepper::Stepper;
