use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, SourceImage};
use crate::foundation::error::{Error, Result};
use crate::motion::kind::MotionScript;
use crate::motion::plan::sample_schedule;
use crate::motion::transform;

/// Convert one image into one clip, streaming frames into `sink` in schedule
/// order and reporting `(frames_done, frames_total)` after each append.
///
/// The image is validated before the sink is touched, so a rejected image
/// never leaves partial output behind. A sink failure at frame `i` surfaces
/// as [`Error::SinkWrite`] carrying `i` and halts the conversion; discarding
/// whatever was already written is the caller's responsibility. The function
/// holds no state across calls and is restartable from scratch.
///
/// Returns the number of frames written.
#[tracing::instrument(skip(image, script, sink, on_progress))]
pub fn convert_image(
    image: &SourceImage,
    canvas: Canvas,
    script: &MotionScript,
    duration_secs: f64,
    fps: f64,
    sink: &mut dyn FrameSink,
    mut on_progress: impl FnMut(u64, u64),
) -> Result<u64> {
    if image.data.is_empty() {
        return Err(Error::invalid_image("source image has no pixel data"));
    }

    let schedule = sample_schedule(duration_secs, fps)?;
    let total = schedule.len() as u64;

    sink.begin(SinkConfig { canvas, fps })?;
    for index in 0..total {
        // The script refines the schedule: which kind is in play at this
        // index, and its segment-local time (equal to the schedule entry for
        // single-kind scripts).
        let (kind, t) = script.sample(index, total);
        let frame = transform::render(image, canvas, kind, t);
        sink.append(index, &frame)?;
        on_progress(index + 1, total);
    }
    sink.end()?;

    tracing::debug!(frames = total, "clip complete");
    Ok(total)
}
