use crate::foundation::error::{Error, Result};

/// Output canvas dimensions in pixels.
///
/// A canvas is fixed for an entire batch run: every frame produced for that
/// run has exactly this size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_parameter(
                "canvas width/height must be non-zero",
            ));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels on the canvas.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Named output resolution presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Quality {
    /// 3840x2160.
    Uhd4K,
    /// 1920x1080.
    Hd1080,
    /// 1280x720.
    Hd720,
    /// 854x480.
    Sd480,
    /// 640x360.
    Sd360,
}

impl Quality {
    /// All presets in descending resolution order.
    pub const ALL: [Quality; 5] = [
        Quality::Uhd4K,
        Quality::Hd1080,
        Quality::Hd720,
        Quality::Sd480,
        Quality::Sd360,
    ];

    /// Resolve a preset token such as `"1080p"`. Case-insensitive.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "4k" => Some(Self::Uhd4K),
            "1080p" => Some(Self::Hd1080),
            "720p" => Some(Self::Hd720),
            "480p" => Some(Self::Sd480),
            "360p" => Some(Self::Sd360),
            _ => None,
        }
    }

    /// Stable token used in output file names and CLI listings.
    pub fn token(self) -> &'static str {
        match self {
            Self::Uhd4K => "4K",
            Self::Hd1080 => "1080p",
            Self::Hd720 => "720p",
            Self::Sd480 => "480p",
            Self::Sd360 => "360p",
        }
    }

    /// Canvas this preset renders to.
    ///
    /// All presets are even in both dimensions (yuv420p encoding requires it).
    pub fn canvas(self) -> Canvas {
        let (width, height) = match self {
            Self::Uhd4K => (3840, 2160),
            Self::Hd1080 => (1920, 1080),
            Self::Hd720 => (1280, 720),
            Self::Sd480 => (854, 480),
            Self::Sd360 => (640, 360),
        };
        Canvas { width, height }
    }
}

/// An immutable, already-decoded source still as RGBA8 pixels.
///
/// Loaded once per input file and owned by the conversion that consumes it.
#[derive(Clone, Debug)]
pub struct SourceImage {
    /// Source width in pixels.
    pub width: u32,
    /// Source height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl SourceImage {
    /// Wrap a raw RGBA8 buffer, validating dimensions against its length.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_image("source image has zero dimension"));
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(Error::invalid_image(format!(
                "source buffer is {} bytes, expected {expected} for {width}x{height} rgba8",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

/// One rendered output frame as RGBA8 pixels, exactly canvas-sized.
///
/// Frames are written once to a sink and not retained by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}
