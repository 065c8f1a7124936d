use super::*;

fn gradient_image(w: u32, h: u32) -> SourceImage {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            data.extend_from_slice(&[x as u8, y as u8, (x ^ y) as u8, 255]);
        }
    }
    SourceImage::from_rgba8(w, h, data).unwrap()
}

#[test]
fn every_kind_produces_canvas_sized_frames() {
    let canvas = Canvas::new(32, 18).unwrap();
    for src in [gradient_image(64, 48), gradient_image(1, 1)] {
        for kind in MotionKind::ALL {
            for t in [0.0, 0.5, 1.0] {
                let frame = render(&src, canvas, kind, t);
                assert_eq!((frame.width, frame.height), (32, 18), "{kind:?} t={t}");
                assert_eq!(frame.data.len(), 32 * 18 * 4);
            }
        }
    }
}

#[test]
fn none_is_identical_for_all_t() {
    let src = gradient_image(40, 30);
    let canvas = Canvas::new(16, 12).unwrap();
    let baseline = render(&src, canvas, MotionKind::None, 0.0);
    for t in [0.1, 0.33, 0.5, 0.99, 1.0] {
        assert_eq!(render(&src, canvas, MotionKind::None, t), baseline);
    }
}

#[test]
fn out_of_range_t_is_clamped() {
    let src = gradient_image(40, 30);
    let canvas = Canvas::new(16, 12).unwrap();
    for kind in MotionKind::ALL {
        assert_eq!(
            render(&src, canvas, kind, -0.25),
            render(&src, canvas, kind, 0.0)
        );
        assert_eq!(
            render(&src, canvas, kind, 1.25),
            render(&src, canvas, kind, 1.0)
        );
    }
}

#[test]
fn ken_burns_zoom_strictly_increases_and_stays_in_bounds() {
    let (w, h) = (200u32, 120u32);
    let mut last_width = f64::INFINITY;
    for step in 0..=20 {
        let t = step as f64 / 20.0;
        let win = window(MotionKind::KenBurns, w, h, t);
        assert!(win.width < last_width, "zoom must tighten at t={t}");
        last_width = win.width;
        assert!(win.x >= 0.0 && win.y >= 0.0);
        assert!(win.x + win.width <= f64::from(w) + 1e-9);
        assert!(win.y + win.height <= f64::from(h) + 1e-9);
    }
}

#[test]
fn subtle_window_never_leaves_source_bounds() {
    let (w, h) = (64u32, 64u32);
    for step in 0..=40 {
        let t = step as f64 / 40.0;
        let win = window(MotionKind::Subtle, w, h, t);
        assert!(win.x >= 0.0 && win.y >= 0.0, "t={t}");
        assert!(win.x + win.width <= f64::from(w) + 1e-9, "t={t}");
        assert!(win.y + win.height <= f64::from(h) + 1e-9, "t={t}");
    }
}

#[test]
fn clamp_preserves_window_size() {
    // A center far outside the source must shift the window, not shrink it.
    let win = window(MotionKind::KenBurns, 10, 10, 1.0);
    let expected = 10.0 / 1.3;
    assert!((win.width - expected).abs() < 1e-9);
    assert!((win.height - expected).abs() < 1e-9);
}

#[test]
fn pan360_wraps_back_to_the_start() {
    let src = gradient_image(64, 16);
    let canvas = Canvas::new(64, 16).unwrap();
    let first = render(&src, canvas, MotionKind::Pan360, 0.0);
    let last = render(&src, canvas, MotionKind::Pan360, 1.0);
    // The offset advances exactly one source width, so the seam lands back
    // where it started.
    assert_eq!(first, last);
}

#[test]
fn pan360_midpoint_shows_the_wrapped_seam() {
    let src = gradient_image(64, 16);
    // Canvas matches the source so sampling is exact (no interpolation).
    let canvas = Canvas::new(64, 16).unwrap();
    let frame = render(&src, canvas, MotionKind::Pan360, 0.5);
    // Output column 0 samples source column 32; column 32 wraps to column 0.
    assert_eq!(frame.data[0], 32);
    let col32 = (32 * 4) as usize;
    assert_eq!(frame.data[col32], 0);
}

#[test]
fn one_by_one_source_renders_solid_frames() {
    let src = SourceImage::from_rgba8(1, 1, vec![9, 81, 27, 255]).unwrap();
    let canvas = Canvas::new(8, 6).unwrap();
    for kind in MotionKind::ALL {
        let frame = render(&src, canvas, kind, 0.7);
        for px in frame.data.chunks_exact(4) {
            assert_eq!(px, &[9, 81, 27, 255]);
        }
    }
}

#[test]
fn zoom_in_tightens_and_zoom_out_widens() {
    let tight = window(MotionKind::ZoomIn, 100, 100, 1.0);
    assert!((tight.width - 50.0).abs() < 1e-9);

    let start = window(MotionKind::ZoomOut, 100, 100, 0.0);
    let end = window(MotionKind::ZoomOut, 100, 100, 1.0);
    assert!(start.width < end.width);
    assert!((end.width - 100.0).abs() < 1e-9);
}

#[test]
fn render_is_deterministic() {
    let src = gradient_image(48, 32);
    let canvas = Canvas::new(20, 14).unwrap();
    let a = render(&src, canvas, MotionKind::Subtle, 0.37);
    let b = render(&src, canvas, MotionKind::Subtle, 0.37);
    assert_eq!(a, b);
}
