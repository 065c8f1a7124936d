/// Convenience result type used across stillmotion.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Rejected duration, frame rate, or sink configuration values.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A motion token that does not name a built-in effect.
    #[error("unknown motion kind '{0}'")]
    UnknownMotionKind(String),

    /// A source file that could not be decoded into a usable pixel buffer.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// A frame append the video sink refused or lost.
    #[error("sink write failed at frame {frame}: {message}")]
    SinkWrite {
        /// 0-based index of the frame whose append failed.
        frame: u64,
        /// Underlying sink/encoder failure text.
        message: String,
    },

    /// A batch submitted with no input images. Fatal to the whole job.
    #[error("input set is empty")]
    EmptyInputSet,

    /// A job id the registry has never issued.
    #[error("unknown job '{0}'")]
    UnknownJob(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Build an [`Error::InvalidParameter`] value.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Build an [`Error::InvalidImage`] value.
    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImage(msg.into())
    }

    /// Build an [`Error::SinkWrite`] value for the given frame index.
    pub fn sink_write(frame: u64, msg: impl Into<String>) -> Self {
        Self::SinkWrite {
            frame,
            message: msg.into(),
        }
    }

    /// Build an [`Error::UnknownJob`] value.
    pub fn unknown_job(id: impl Into<String>) -> Self {
        Self::UnknownJob(id.into())
    }

    /// `true` when this error is tolerated per image by the batch runner
    /// rather than failing the whole job.
    pub fn is_per_image(&self) -> bool {
        matches!(
            self,
            Self::InvalidImage(_) | Self::SinkWrite { .. } | Self::InvalidParameter(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
