//! Conversion drivers: one image to one clip, and whole-batch runs.

/// Whole-batch execution with per-image error tolerance.
pub mod batch;
/// Single image to single clip conversion.
pub mod clip;
