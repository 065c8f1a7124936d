use super::*;

#[test]
fn schedule_length_is_rounded_product() {
    assert_eq!(sample_schedule(5.0, 10.0).unwrap().len(), 50);
    assert_eq!(sample_schedule(1.0, 30.0).unwrap().len(), 30);
    // 0.25 * 10 rounds to 2 frames, not 3.
    assert_eq!(sample_schedule(0.25, 10.0).unwrap().len(), 2);
}

#[test]
fn schedule_endpoints_and_monotonicity() {
    let sched = sample_schedule(5.0, 10.0).unwrap();
    assert_eq!(sched[0], 0.0);
    assert_eq!(*sched.last().unwrap(), 1.0);
    for pair in sched.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
}

#[test]
fn sub_frame_durations_clamp_to_one_sample() {
    let sched = sample_schedule(0.01, 10.0).unwrap();
    assert_eq!(sched, vec![0.0]);
}

#[test]
fn non_positive_parameters_are_rejected() {
    for (d, f) in [(0.0, 10.0), (-1.0, 10.0), (5.0, 0.0), (5.0, -24.0)] {
        let err = sample_schedule(d, f).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)), "{d} {f}");
    }
    assert!(sample_schedule(f64::NAN, 10.0).is_err());
    assert!(sample_schedule(5.0, f64::INFINITY).is_err());
}

#[test]
fn frame_count_minimum_is_one() {
    assert_eq!(frame_count(0.001, 1.0).unwrap(), 1);
    assert_eq!(frame_count(5.0, 10.0).unwrap(), 50);
}
