use std::path::PathBuf;
use std::time::Instant;

use crate::assets::decode::ImageEntry;
use crate::convert::clip::convert_image;
use crate::encode::sink::FrameSink;
use crate::foundation::core::Canvas;
use crate::foundation::error::{Error, Result};
use crate::motion::kind::MotionScript;

/// Parameters shared by every clip of one batch run.
#[derive(Clone, Debug)]
pub struct BatchOptions {
    /// Output canvas, fixed for the whole run.
    pub canvas: Canvas,
    /// Motion effect(s) applied to every clip.
    pub script: MotionScript,
    /// Clip duration in seconds.
    pub duration_secs: f64,
    /// Clip frame rate.
    pub fps: f64,
}

/// Descriptor of one successfully produced clip.
#[derive(Clone, Debug, serde::Serialize)]
pub struct OutputInfo {
    /// Output file path.
    pub path: PathBuf,
    /// Output file name.
    pub filename: String,
    /// Rendered resolution, `WIDTHxHEIGHT`.
    pub resolution: String,
    /// Clip frame rate.
    pub fps: f64,
    /// Clip duration in seconds.
    pub duration_secs: f64,
    /// Frames written to the sink.
    pub frames: u64,
    /// Motion tokens applied, in play order.
    pub motion: Vec<String>,
}

/// One recorded per-image failure, kept in input order.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ImageFailure {
    /// Position of the image in the input set.
    pub index: usize,
    /// Display name of the failed image.
    pub name: String,
    /// Failure text, verbatim.
    pub error: String,
}

/// Outcome of one batch run: successes and failures, both in input order.
///
/// A batch is never all-or-nothing; a run with failures still reports every
/// clip that succeeded.
#[derive(Clone, Debug, serde::Serialize)]
pub struct BatchReport {
    /// Descriptors of the produced clips.
    pub outputs: Vec<OutputInfo>,
    /// Per-image failures.
    pub failures: Vec<ImageFailure>,
    /// Number of images in the input set.
    pub images_total: usize,
    /// Wall-clock processing time in seconds.
    pub processing_secs: f64,
}

/// Convert every entry of an input set, strictly in input order.
///
/// `open_sink` is called once per image with its name and returns the output
/// path plus a fresh sink. Per-image errors (decode, sink open/write, render
/// parameters) are recorded and the run proceeds to the next image; the
/// partial output file of a failed clip is removed best-effort, since the
/// conversion itself never truncates a sink. Only an empty input set fails
/// the run as a whole.
///
/// `on_progress` receives the overall batch completion in percent,
/// `(completed_images + current_image_fraction) / images_total * 100`,
/// monotonically non-decreasing, reaching 100 with the last image.
pub fn run_batch(
    entries: &[ImageEntry],
    options: &BatchOptions,
    mut open_sink: impl FnMut(&str) -> Result<(PathBuf, Box<dyn FrameSink>)>,
    mut on_progress: impl FnMut(f64),
) -> Result<BatchReport> {
    if entries.is_empty() {
        return Err(Error::EmptyInputSet);
    }

    let started = Instant::now();
    let total = entries.len();
    let mut outputs = Vec::new();
    let mut failures = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let image = match &entry.image {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(image = %entry.name, error = %e, "skipping undecodable image");
                failures.push(ImageFailure {
                    index,
                    name: entry.name.clone(),
                    error: e.to_string(),
                });
                on_progress(done_fraction(index + 1, total));
                continue;
            }
        };

        let (path, mut sink) = match open_sink(&entry.name) {
            Ok(opened) => opened,
            Err(e) => {
                tracing::warn!(image = %entry.name, error = %e, "could not open output sink");
                failures.push(ImageFailure {
                    index,
                    name: entry.name.clone(),
                    error: e.to_string(),
                });
                on_progress(done_fraction(index + 1, total));
                continue;
            }
        };

        let converted = convert_image(
            image,
            options.canvas,
            &options.script,
            options.duration_secs,
            options.fps,
            sink.as_mut(),
            |done, frames| {
                let fraction = done as f64 / frames as f64;
                on_progress((index as f64 + fraction) / total as f64 * 100.0);
            },
        );

        match converted {
            Ok(frames) => {
                tracing::info!(image = %entry.name, out = %path.display(), frames, "clip written");
                outputs.push(OutputInfo {
                    filename: path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    path,
                    resolution: options.canvas.to_string(),
                    fps: options.fps,
                    duration_secs: options.duration_secs,
                    frames,
                    motion: options.script.tokens().iter().map(|t| t.to_string()).collect(),
                });
            }
            Err(e) => {
                tracing::warn!(image = %entry.name, error = %e, "clip failed");
                failures.push(ImageFailure {
                    index,
                    name: entry.name.clone(),
                    error: e.to_string(),
                });
                discard_partial(&path);
                on_progress(done_fraction(index + 1, total));
            }
        }
    }

    Ok(BatchReport {
        outputs,
        failures,
        images_total: total,
        processing_secs: started.elapsed().as_secs_f64(),
    })
}

fn done_fraction(completed: usize, total: usize) -> f64 {
    completed as f64 / total as f64 * 100.0
}

/// Partial output of a failed clip is invalid; the conversion never truncates
/// a sink, so the file is dropped here.
fn discard_partial(path: &std::path::Path) {
    if let Err(e) = std::fs::remove_file(path)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        tracing::warn!(path = %path.display(), error = %e, "could not remove partial output");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/convert/batch.rs"]
mod tests;
