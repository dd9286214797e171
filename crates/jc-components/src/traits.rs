//! Core traits for stage models.

/// A stage of the turbojet flow path.
///
/// Stages are deterministic functions of their inlet state, their own
/// parameters and a read-only gas model, which makes them safe to share
/// across threads evaluating independent operating points.
pub trait Stage: Send + Sync {
    /// Stage name for logging and error reports.
    fn name(&self) -> &'static str;

    /// Isentropic (or combustion) efficiency, if the stage has one.
    fn efficiency(&self) -> Option<f64> {
        None
    }
}
