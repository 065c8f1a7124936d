//! Motion effects: kinds, sample schedules, and the per-frame transform.

/// Motion kind enum, token resolution, and effect sequencing.
pub mod kind;
/// Sample schedule arithmetic.
pub mod plan;
/// Crop-window computation and bilinear resampling.
pub mod transform;
