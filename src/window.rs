//! Scan-window coordination with the motion planner.
//!
//! Filter evaluation for a timestamp needs trajectory data slightly ahead
//! of "now", so the planner must keep an extra lookahead window
//! materialized. Growing that window is a *prerequisite* for committing
//! wider filter parameters; shrinking it is freedom the planner may take
//! at leisure. [`ScanWindowCoordinator::propose`] enforces that ordering.

use crate::traits::MotionPlanner;

/// Owns the committed extra-lookahead window and mediates changes with the
/// planner.
///
/// The committed window is always the *maximum* half-smooth-time across
/// axes, never a sum: both axes' filters read from the same shared
/// buffered timeline.
#[derive(Debug, Default)]
pub struct ScanWindowCoordinator {
    window: f64,
}

impl ScanWindowCoordinator {
    /// A coordinator with no window committed.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently committed window in seconds.
    pub fn window(&self) -> f64 {
        self.window
    }

    /// Negotiate a window change with the planner.
    ///
    /// - Growing: `extend_lookahead` must succeed *before* the new window
    ///   is committed; on `Err` nothing changes and the caller must not
    ///   commit the filter parameters that required the growth.
    /// - Shrinking: committed immediately, then reported to the planner as
    ///   an advisory shrink (over-provisioning is harmless, premature
    ///   under-provisioning is a correctness violation).
    /// - Equal: trivially succeeds with no planner call.
    pub fn propose<P: MotionPlanner>(
        &mut self,
        planner: &mut P,
        new_window: f64,
    ) -> Result<(), P::Error> {
        let old_window = self.window;
        if new_window > old_window {
            planner.extend_lookahead(new_window - old_window)?;
            self.window = new_window;
        } else if new_window < old_window {
            self.window = new_window;
            planner.note_desired_shrink(old_window - new_window);
        }
        Ok(())
    }
}
