//! Motion planner lookahead contract.

/// The single contract this crate needs from the motion planner: extend or
/// (advisorily) shrink the step-generation scan window.
///
/// # Ordering
///
/// [`extend_lookahead`](Self::extend_lookahead) is called *before* new
/// filter parameters become visible to the step-generation context, and
/// must not return `Ok` until the larger horizon is honored. Shrinks are
/// never required: the planner may reclaim buffer after a grace period or
/// keep over-provisioning indefinitely.
///
/// # Implementation Notes
///
/// - The acknowledgment is expected to be fast and synchronous within the
///   same process; this crate never calls the planner from the real-time
///   step-generation path.
/// - `delta` values are strictly positive seconds.
pub trait MotionPlanner {
    /// Error type for a refused horizon extension (e.g. insufficient
    /// buffer capacity).
    type Error;

    /// Grow the lookahead horizon by `delta` seconds.
    ///
    /// On `Err` the previous horizon must remain honored; the caller
    /// commits nothing.
    fn extend_lookahead(&mut self, delta: f64) -> Result<(), Self::Error>;

    /// Advise the planner that `delta` seconds of horizon are no longer
    /// required. Purely advisory; the planner decides when (or whether)
    /// to reclaim.
    fn note_desired_shrink(&mut self, delta: f64);
}
