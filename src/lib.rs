//! stillmotion turns folders of still images into short video clips by
//! synthesizing per-frame camera motion (zoom, pan, panoramic sweep) and
//! streaming the frames into an encoding sink.
//!
//! The public API is batch-oriented:
//!
//! - Load an input set with [`assets::decode::load_dir`]
//! - Describe the run with [`BatchOptions`] and a [`MotionScript`]
//! - Either run it inline with [`convert::batch::run_batch`], or submit it to
//!   a [`JobRegistry`] and poll [`JobRegistry::get`] for progress
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Input collaborator: directory scan + still decoding.
pub mod assets;
/// Conversion drivers.
pub mod convert;
/// Encoding sinks.
pub mod encode;
/// Core value types and errors.
pub mod foundation;
/// Asynchronous job layer.
pub mod jobs;
/// Motion effects and frame synthesis.
pub mod motion;

pub use crate::convert::batch::{BatchOptions, BatchReport, ImageFailure, OutputInfo};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::foundation::core::{Canvas, Frame, Quality, SourceImage};
pub use crate::foundation::error::{Error, Result};
pub use crate::jobs::registry::{BatchRequest, JobId, JobRegistry, JobSnapshot, JobState};
pub use crate::motion::kind::{MotionKind, MotionScript};
