use crate::foundation::error::{Error, Result};

/// One style of simulated camera movement applied across a clip's frames.
///
/// Every kind reduces to a crop window over the source image as a function of
/// normalized time; adding a kind means adding one variant and one window
/// function, without touching the existing ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionKind {
    /// Static full-image window for every frame.
    None,
    /// Gentle zoom to 1.15x with a small circular pan.
    Subtle,
    /// Classic cinema zoom to 1.3x with a sinusoidal pan.
    KenBurns,
    /// Continuous left-to-right sweep over the horizontally tiled image.
    #[serde(rename = "360-pan")]
    Pan360,
    /// Strong centered zoom from 1.0x to 2.0x.
    ZoomIn,
    /// Centered zoom from 1.2x back to 1.0x.
    ZoomOut,
}

impl MotionKind {
    /// Every built-in kind, in listing order.
    pub const ALL: [MotionKind; 6] = [
        MotionKind::None,
        MotionKind::Subtle,
        MotionKind::KenBurns,
        MotionKind::Pan360,
        MotionKind::ZoomIn,
        MotionKind::ZoomOut,
    ];

    /// Resolve a motion token such as `"ken-burns"`.
    ///
    /// The boundary is expected to present only valid tokens, but resolution
    /// still validates defensively.
    pub fn parse(token: &str) -> Result<Self> {
        match token {
            "none" => Ok(Self::None),
            "subtle" => Ok(Self::Subtle),
            "ken-burns" => Ok(Self::KenBurns),
            "360-pan" => Ok(Self::Pan360),
            "zoom-in" => Ok(Self::ZoomIn),
            "zoom-out" => Ok(Self::ZoomOut),
            _ => Err(Error::UnknownMotionKind(token.to_owned())),
        }
    }

    /// Stable token used in requests and output file names.
    pub fn token(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Subtle => "subtle",
            Self::KenBurns => "ken-burns",
            Self::Pan360 => "360-pan",
            Self::ZoomIn => "zoom-in",
            Self::ZoomOut => "zoom-out",
        }
    }

    /// Human-readable label for listings.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "No Motion (Static)",
            Self::Subtle => "Subtle (Gentle Zoom + Pan)",
            Self::KenBurns => "Ken Burns (Classic Cinema Zoom)",
            Self::Pan360 => "360\u{b0} Panoramic Pan",
            Self::ZoomIn => "Zoom In (Strong)",
            Self::ZoomOut => "Zoom Out",
        }
    }
}

/// Maximum number of effects one clip may chain.
pub const MAX_SCRIPT_LEN: usize = 3;

/// An ordered sequence of motion kinds applied over equal time segments of
/// one clip.
///
/// A single-kind script plays that effect across the whole clip; a multi-kind
/// script splits the frame count evenly and restarts normalized time at each
/// segment boundary.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MotionScript(Vec<MotionKind>);

impl MotionScript {
    /// Build a script from 1 to [`MAX_SCRIPT_LEN`] kinds.
    pub fn new(kinds: Vec<MotionKind>) -> Result<Self> {
        if kinds.is_empty() {
            return Err(Error::invalid_parameter(
                "motion script needs at least one kind",
            ));
        }
        if kinds.len() > MAX_SCRIPT_LEN {
            return Err(Error::invalid_parameter(format!(
                "motion script supports at most {MAX_SCRIPT_LEN} kinds, got {}",
                kinds.len()
            )));
        }
        Ok(Self(kinds))
    }

    /// Build a single-kind script.
    pub fn single(kind: MotionKind) -> Self {
        Self(vec![kind])
    }

    /// Resolve raw tokens into a script.
    pub fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let kinds = tokens
            .iter()
            .map(|t| MotionKind::parse(t.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(kinds)
    }

    /// Kinds in play order.
    pub fn kinds(&self) -> &[MotionKind] {
        &self.0
    }

    /// Tokens in play order, for file names and reports.
    pub fn tokens(&self) -> Vec<&'static str> {
        self.0.iter().map(|k| k.token()).collect()
    }

    /// File-name suffix, tokens joined by `_`.
    pub fn suffix(&self) -> String {
        self.tokens().join("_")
    }

    /// Map a frame index within a clip of `total` frames to the kind in play
    /// and its segment-local normalized time.
    ///
    /// Segments divide the clip evenly; the last segment absorbs rounding.
    /// Segment-local time runs 0..=1 within each segment, so a single-kind
    /// script reproduces the clip-global schedule exactly.
    pub fn sample(&self, index: u64, total: u64) -> (MotionKind, f64) {
        debug_assert!(index < total.max(1));
        let len = self.0.len() as u64;
        if len == 1 || total == 0 {
            let t = index as f64 / (total.saturating_sub(1)).max(1) as f64;
            return (self.0[0], t.clamp(0.0, 1.0));
        }

        let segment_duration = total as f64 / len as f64;
        let segment = ((index as f64 / segment_duration) as u64).min(len - 1);
        let segment_start = (segment as f64 * segment_duration) as u64;
        let segment_end = ((segment + 1) as f64 * segment_duration) as u64;
        let in_segment = index.saturating_sub(segment_start);
        let segment_frames = segment_end.saturating_sub(segment_start);
        let t = in_segment as f64 / (segment_frames.saturating_sub(1)).max(1) as f64;
        (self.0[segment as usize], t.clamp(0.0, 1.0))
    }
}
