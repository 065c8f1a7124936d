use crate::foundation::error::{Error, Result};

/// Number of frames a clip of `duration_secs` at `fps` contains.
///
/// Rounded to the nearest frame, never less than one.
pub fn frame_count(duration_secs: f64, fps: f64) -> Result<u64> {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return Err(Error::invalid_parameter(format!(
            "duration must be a positive number of seconds, got {duration_secs}"
        )));
    }
    if !fps.is_finite() || fps <= 0.0 {
        return Err(Error::invalid_parameter(format!(
            "fps must be a positive rate, got {fps}"
        )));
    }
    Ok(((duration_secs * fps).round() as u64).max(1))
}

/// Produce the ordered normalized sample times for one clip.
///
/// The schedule has `max(1, round(duration_secs * fps))` entries, starts at
/// `0.0`, and ends at `1.0` whenever it is longer than one frame. Entries are
/// evenly spaced and monotonically non-decreasing.
pub fn sample_schedule(duration_secs: f64, fps: f64) -> Result<Vec<f64>> {
    let count = frame_count(duration_secs, fps)?;
    if count == 1 {
        return Ok(vec![0.0]);
    }
    let last = (count - 1) as f64;
    Ok((0..count).map(|i| i as f64 / last).collect())
}

#[cfg(test)]
#[path = "../../tests/unit/motion/plan.rs"]
mod tests;
