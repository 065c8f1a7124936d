use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::Frame;
use crate::foundation::error::{Error, Result};

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
}

impl FfmpegSinkOpts {
    /// Create options for outputting an MP4 to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw RGBA frames to stdin.
///
/// Output is H.264/yuv420p MP4 with `+faststart`. Frames are treated as
/// opaque; alpha bytes are passed through and discarded by the yuv420p
/// conversion.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    cfg: Option<SinkConfig>,
    frame_bytes: usize,
    next_index: u64,
}

impl FfmpegSink {
    /// Create a new sink that streams into `ffmpeg`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            cfg: None,
            frame_bytes: 0,
            next_index: 0,
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> Result<()> {
        if !cfg.fps.is_finite() || cfg.fps <= 0.0 {
            return Err(Error::invalid_parameter("ffmpeg sink fps must be positive"));
        }
        if cfg.canvas.width == 0 || cfg.canvas.height == 0 {
            return Err(Error::invalid_parameter(
                "ffmpeg sink width/height must be non-zero",
            ));
        }
        if !cfg.canvas.width.is_multiple_of(2) || !cfg.canvas.height.is_multiple_of(2) {
            return Err(Error::invalid_parameter(
                "ffmpeg sink width/height must be even (required for yuv420p mp4 output)",
            ));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(Error::invalid_parameter(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(Error::sink_write(
                0,
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if self.opts.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.canvas.width, cfg.canvas.height),
            "-r",
            &format!("{}", cfg.fps),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]);
        cmd.arg(&self.opts.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            Error::sink_write(
                0,
                format!("failed to spawn ffmpeg (is it installed and on PATH?): {e}"),
            )
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::sink_write(0, "failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::sink_write(0, "failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        self.frame_bytes = cfg.canvas.pixel_count() * 4;
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.next_index = 0;
        Ok(())
    }

    fn append(&mut self, index: u64, frame: &Frame) -> Result<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| Error::sink_write(index, "ffmpeg sink not started"))?;
        if index < self.next_index {
            return Err(Error::sink_write(
                index,
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        self.next_index = index + 1;

        if frame.width != cfg.canvas.width || frame.height != cfg.canvas.height {
            return Err(Error::sink_write(
                index,
                format!(
                    "frame size mismatch: got {}x{}, expected {}",
                    frame.width, frame.height, cfg.canvas
                ),
            ));
        }
        if frame.data.len() != self.frame_bytes {
            return Err(Error::sink_write(
                index,
                "frame buffer size mismatch with width*height*4",
            ));
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(Error::sink_write(index, "ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        stdin
            .write_all(&frame.data)
            .map_err(|e| Error::sink_write(index, format!("failed to write frame to ffmpeg stdin: {e}")))
    }

    fn end(&mut self) -> Result<()> {
        let at = self.next_index;
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| Error::sink_write(at, "ffmpeg sink not started"))?;

        let status = child
            .wait()
            .map_err(|e| Error::sink_write(at, format!("failed to wait for ffmpeg to finish: {e}")))?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| Error::sink_write(at, "ffmpeg stderr drain thread panicked"))?
                .map_err(|e| Error::sink_write(at, format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(Error::sink_write(
                at,
                format!("ffmpeg exited with status {status}: {}", stderr.trim()),
            ));
        }

        self.cfg = None;
        Ok(())
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
