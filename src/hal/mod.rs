//! Collaborator implementations behind [`crate::traits`].
//!
//! The real planner and steppers belong to the host motion system; this
//! crate ships only the `mock` implementations used for desktop testing
//! and the demo binary.

pub mod mock;

pub use mock::*;
