use crate::foundation::core::{Canvas, Frame};
use crate::foundation::error::{Error, Result};

/// Configuration provided to a [`FrameSink`] at the start of one clip.
#[derive(Debug, Clone, Copy)]
pub struct SinkConfig {
    /// Output frame size; every appended frame must match it exactly.
    pub canvas: Canvas,
    /// Output frames-per-second.
    pub fps: f64,
}

/// Sink contract for consuming rendered frames in clip order.
///
/// Ordering contract: `append` is called with strictly increasing 0-based
/// frame indices; frames appended in order are encoded in that same order.
/// This is the only ordering guarantee video encoding requires.
pub trait FrameSink: Send {
    /// Called once before any frames are appended.
    fn begin(&mut self, cfg: SinkConfig) -> Result<()>;
    /// Append one frame in strictly increasing clip order.
    fn append(&mut self, index: u64, frame: &Frame) -> Result<()>;
    /// Called once after the last frame; finalizes the output.
    fn end(&mut self) -> Result<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, Frame)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames, in append order.
    pub fn frames(&self) -> &[(u64, Frame)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> Result<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn append(&mut self, index: u64, frame: &Frame) -> Result<()> {
        if let Some((last, _)) = self.frames.last()
            && index <= *last
        {
            return Err(Error::sink_write(index, "out-of-order frame index"));
        }
        self.frames.push((index, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        Ok(())
    }
}
