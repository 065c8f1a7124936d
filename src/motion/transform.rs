//! Per-frame geometric transform: motion kind + normalized time -> one frame.
//!
//! Every motion kind is expressed as an axis-aligned crop window over the
//! source image, computed as a pure function of `t`, then bilinearly
//! resampled into the canvas. The window keeps the source's native aspect;
//! resampling to the canvas may scale axes non-uniformly (accepted
//! simplification, no letterboxing).

use crate::foundation::core::{Canvas, Frame, SourceImage};
use crate::motion::kind::MotionKind;

const SUBTLE_ZOOM_SPAN: f64 = 0.15;
const SUBTLE_PAN_RADIUS: f64 = 0.03;
const KEN_BURNS_ZOOM_SPAN: f64 = 0.30;
const KEN_BURNS_PAN_AMPLITUDE: f64 = 0.06;
const ZOOM_IN_SPAN: f64 = 1.0;
const ZOOM_OUT_START: f64 = 1.2;

/// Crop window over the source, in source pixel coordinates.
///
/// `wrap_x` marks windows over the horizontally tiled source; sampling then
/// wraps modulo the source width instead of clamping at the edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Window {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) wrap_x: bool,
}

/// Render one frame of `image` at normalized time `t`.
///
/// Deterministic and side-effect-free. `t` outside `[0, 1]` is clamped, never
/// rejected, so floating-point rounding at schedule endpoints cannot fail a
/// conversion. The produced frame is always exactly canvas-sized, including
/// for degenerate sources down to 1x1.
pub fn render(image: &SourceImage, canvas: Canvas, kind: MotionKind, t: f64) -> Frame {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let win = window(kind, image.width, image.height, t);
    resample(image, canvas, win)
}

/// Compute the crop window for `kind` at time `t` over a `src_w` x `src_h`
/// source. `t` must already be clamped to `[0, 1]`.
pub(crate) fn window(kind: MotionKind, src_w: u32, src_h: u32, t: f64) -> Window {
    let w = f64::from(src_w);
    let h = f64::from(src_h);
    let min_dim = w.min(h);

    match kind {
        MotionKind::None => full_window(w, h),
        MotionKind::Subtle => {
            let zoom = 1.0 + SUBTLE_ZOOM_SPAN * t;
            let radius = SUBTLE_PAN_RADIUS * min_dim;
            let angle = t * std::f64::consts::TAU;
            let cx = w / 2.0 + radius * angle.sin();
            let cy = h / 2.0 + radius * angle.cos();
            zoomed_window(w, h, zoom, cx, cy)
        }
        MotionKind::KenBurns => {
            let zoom = 1.0 + KEN_BURNS_ZOOM_SPAN * t;
            let amplitude = KEN_BURNS_PAN_AMPLITUDE * min_dim;
            let phase = t * std::f64::consts::PI;
            let cx = w / 2.0 + amplitude * phase.sin();
            let cy = h / 2.0 + amplitude * phase.cos();
            zoomed_window(w, h, zoom, cx, cy)
        }
        MotionKind::Pan360 => Window {
            // Offset sweeps one full source width; sampling wraps at the seam.
            x: t * w,
            y: 0.0,
            width: w,
            height: h,
            wrap_x: true,
        },
        MotionKind::ZoomIn => {
            let zoom = 1.0 + ZOOM_IN_SPAN * t;
            zoomed_window(w, h, zoom, w / 2.0, h / 2.0)
        }
        MotionKind::ZoomOut => {
            let zoom = ZOOM_OUT_START - (ZOOM_OUT_START - 1.0) * t;
            zoomed_window(w, h, zoom, w / 2.0, h / 2.0)
        }
    }
}

fn full_window(w: f64, h: f64) -> Window {
    Window {
        x: 0.0,
        y: 0.0,
        width: w,
        height: h,
        wrap_x: false,
    }
}

/// Window of size `src / zoom` centered at `(cx, cy)`, shifted the minimum
/// amount to fit inside the source. The window is never resized to fit: that
/// would change the zoom factor in play at this `t`.
fn zoomed_window(w: f64, h: f64, zoom: f64, cx: f64, cy: f64) -> Window {
    let win_w = w / zoom;
    let win_h = h / zoom;
    Window {
        x: (cx - win_w / 2.0).clamp(0.0, (w - win_w).max(0.0)),
        y: (cy - win_h / 2.0).clamp(0.0, (h - win_h).max(0.0)),
        width: win_w,
        height: win_h,
        wrap_x: false,
    }
}

fn resample(image: &SourceImage, canvas: Canvas, win: Window) -> Frame {
    let mut data = vec![0u8; canvas.pixel_count() * 4];
    let x_scale = win.width / f64::from(canvas.width);
    let y_scale = win.height / f64::from(canvas.height);

    let mut out = 0usize;
    for oy in 0..canvas.height {
        let sy = win.y + (f64::from(oy) + 0.5) * y_scale - 0.5;
        for ox in 0..canvas.width {
            let sx = win.x + (f64::from(ox) + 0.5) * x_scale - 0.5;
            let px = sample_bilinear(image, sx, sy, win.wrap_x);
            data[out..out + 4].copy_from_slice(&px);
            out += 4;
        }
    }

    Frame {
        width: canvas.width,
        height: canvas.height,
        data,
    }
}

/// Bilinear sample at fractional source coordinates.
///
/// Horizontal neighbors wrap modulo the source width when `wrap_x` is set
/// (tiled panorama); otherwise both axes clamp to the source edges.
fn sample_bilinear(image: &SourceImage, sx: f64, sy: f64, wrap_x: bool) -> [u8; 4] {
    let x0 = sx.floor();
    let y0 = sy.floor();
    let fx = sx - x0;
    let fy = sy - y0;

    let ix0 = resolve_x(image.width, x0 as i64, wrap_x);
    let ix1 = resolve_x(image.width, x0 as i64 + 1, wrap_x);
    let iy0 = clamp_axis(image.height, y0 as i64);
    let iy1 = clamp_axis(image.height, y0 as i64 + 1);

    let p00 = pixel(image, ix0, iy0);
    let p10 = pixel(image, ix1, iy0);
    let p01 = pixel(image, ix0, iy1);
    let p11 = pixel(image, ix1, iy1);

    let mut px = [0u8; 4];
    for c in 0..4 {
        let top = f64::from(p00[c]) * (1.0 - fx) + f64::from(p10[c]) * fx;
        let bottom = f64::from(p01[c]) * (1.0 - fx) + f64::from(p11[c]) * fx;
        px[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    px
}

fn resolve_x(width: u32, x: i64, wrap: bool) -> u32 {
    if wrap {
        x.rem_euclid(i64::from(width)) as u32
    } else {
        clamp_axis(width, x)
    }
}

fn clamp_axis(extent: u32, v: i64) -> u32 {
    v.clamp(0, i64::from(extent) - 1) as u32
}

fn pixel(image: &SourceImage, x: u32, y: u32) -> [u8; 4] {
    let idx = (y as usize * image.width as usize + x as usize) * 4;
    [
        image.data[idx],
        image.data[idx + 1],
        image.data[idx + 2],
        image.data[idx + 3],
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/motion/transform.rs"]
mod tests;
