use std::sync::{Arc, Mutex};

use super::*;
use crate::encode::sink::SinkConfig;
use crate::foundation::core::{Frame, SourceImage};
use crate::motion::kind::{MotionKind, MotionScript};

struct CountingSink {
    appended: Arc<Mutex<Vec<u64>>>,
    fail_at: Option<u64>,
}

impl FrameSink for CountingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> Result<()> {
        Ok(())
    }

    fn append(&mut self, index: u64, _frame: &Frame) -> Result<()> {
        if Some(index) == self.fail_at {
            return Err(Error::sink_write(index, "disk full"));
        }
        self.appended.lock().unwrap().push(index);
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        Ok(())
    }
}

fn entry_ok(name: &str) -> ImageEntry {
    ImageEntry {
        name: name.to_owned(),
        image: Ok(SourceImage::from_rgba8(4, 4, vec![100; 64]).unwrap()),
    }
}

fn entry_bad(name: &str) -> ImageEntry {
    ImageEntry {
        name: name.to_owned(),
        image: Err(Error::invalid_image(format!("'{name}': not a picture"))),
    }
}

fn options() -> BatchOptions {
    BatchOptions {
        canvas: Canvas::new(4, 4).unwrap(),
        script: MotionScript::single(MotionKind::None),
        duration_secs: 0.5,
        fps: 4.0,
    }
}

fn counting_opener(
    appended: Arc<Mutex<Vec<u64>>>,
    opened: Arc<Mutex<Vec<String>>>,
    fail_at: Option<u64>,
) -> impl FnMut(&str) -> Result<(PathBuf, Box<dyn FrameSink>)> {
    move |name| {
        opened.lock().unwrap().push(name.to_owned());
        let sink = CountingSink {
            appended: appended.clone(),
            fail_at,
        };
        Ok((PathBuf::from(format!("/tmp/out/{name}.mp4")), Box::new(sink)))
    }
}

#[test]
fn empty_input_set_is_fatal() {
    let appended = Arc::new(Mutex::new(Vec::new()));
    let opened = Arc::new(Mutex::new(Vec::new()));
    let err = run_batch(
        &[],
        &options(),
        counting_opener(appended, opened, None),
        |_| {},
    )
    .unwrap_err();
    assert!(matches!(err, Error::EmptyInputSet));
}

#[test]
fn bad_image_is_recorded_and_batch_continues() {
    let appended = Arc::new(Mutex::new(Vec::new()));
    let opened = Arc::new(Mutex::new(Vec::new()));
    let entries = [entry_ok("first"), entry_bad("second"), entry_ok("third")];

    let report = run_batch(
        &entries,
        &options(),
        counting_opener(appended, opened.clone(), None),
        |_| {},
    )
    .unwrap();

    assert_eq!(report.outputs.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 1);
    assert_eq!(report.failures[0].name, "second");
    assert!(report.failures[0].error.contains("not a picture"));
    // Sinks were opened only for the decodable images, in input order.
    assert_eq!(*opened.lock().unwrap(), vec!["first", "third"]);
    assert_eq!(report.outputs[0].filename, "first.mp4");
    assert_eq!(report.outputs[1].filename, "third.mp4");
}

#[test]
fn progress_is_monotone_and_reaches_100() {
    let appended = Arc::new(Mutex::new(Vec::new()));
    let opened = Arc::new(Mutex::new(Vec::new()));
    let entries = [entry_ok("a"), entry_bad("b"), entry_ok("c")];

    let mut seen: Vec<f64> = Vec::new();
    run_batch(
        &entries,
        &options(),
        counting_opener(appended, opened, None),
        |p| seen.push(p),
    )
    .unwrap();

    assert!(!seen.is_empty());
    for pair in seen.windows(2) {
        assert!(pair[0] <= pair[1], "progress went backwards: {pair:?}");
    }
    assert_eq!(*seen.last().unwrap(), 100.0);
}

#[test]
fn per_image_progress_maps_into_batch_fraction() {
    let appended = Arc::new(Mutex::new(Vec::new()));
    let opened = Arc::new(Mutex::new(Vec::new()));
    let entries = [entry_ok("solo")];

    let mut seen: Vec<f64> = Vec::new();
    run_batch(
        &entries,
        &options(),
        counting_opener(appended, opened, None),
        |p| seen.push(p),
    )
    .unwrap();

    // One image, two frames: 50% after the first frame, 100% after the last.
    assert_eq!(seen, vec![50.0, 100.0]);
}

#[test]
fn sink_failure_halts_that_clip_only() {
    let appended = Arc::new(Mutex::new(Vec::new()));
    let opened = Arc::new(Mutex::new(Vec::new()));
    let entries = [entry_ok("doomed"), entry_ok("fine")];

    // Every sink fails at frame index 1; the first clip records the failure,
    // and the second clip fails identically, so use per-call fail flags.
    let mut call = 0;
    let report = run_batch(
        &entries,
        &options(),
        |name: &str| {
            call += 1;
            let sink = CountingSink {
                appended: appended.clone(),
                fail_at: if call == 1 { Some(1) } else { None },
            };
            opened.lock().unwrap().push(name.to_owned());
            Ok((PathBuf::from(format!("/tmp/out/{name}.mp4")), Box::new(sink) as Box<dyn FrameSink>))
        },
        |_| {},
    )
    .unwrap();

    assert_eq!(report.outputs.len(), 1);
    assert_eq!(report.outputs[0].filename, "fine.mp4");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, "doomed");
    assert!(report.failures[0].error.contains("frame 1"));
}

#[test]
fn frame_counts_match_the_schedule() {
    let appended = Arc::new(Mutex::new(Vec::new()));
    let opened = Arc::new(Mutex::new(Vec::new()));
    let entries = [entry_ok("a"), entry_ok("b")];
    let opts = BatchOptions {
        canvas: Canvas::new(4, 4).unwrap(),
        script: MotionScript::single(MotionKind::KenBurns),
        duration_secs: 5.0,
        fps: 10.0,
    };

    let report = run_batch(
        &entries,
        &opts,
        counting_opener(appended.clone(), opened, None),
        |_| {},
    )
    .unwrap();

    assert_eq!(report.outputs.len(), 2);
    assert!(report.outputs.iter().all(|o| o.frames == 50));
    assert_eq!(appended.lock().unwrap().len(), 100);
}

#[test]
fn failed_clip_partial_file_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("doomed.mp4");
    std::fs::write(&out_path, b"partial bytes").unwrap();

    let appended = Arc::new(Mutex::new(Vec::new()));
    let entries = [entry_ok("doomed")];
    let path_for_opener = out_path.clone();
    let report = run_batch(
        &entries,
        &options(),
        move |_name: &str| {
            let sink = CountingSink {
                appended: appended.clone(),
                fail_at: Some(0),
            };
            Ok((path_for_opener.clone(), Box::new(sink) as Box<dyn FrameSink>))
        },
        |_| {},
    )
    .unwrap();

    assert_eq!(report.failures.len(), 1);
    assert!(!out_path.exists(), "partial output must be discarded");
}
