use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        Error::invalid_parameter("x")
            .to_string()
            .contains("invalid parameter:")
    );
    assert!(
        Error::invalid_image("x")
            .to_string()
            .contains("invalid image:")
    );
    assert!(
        Error::UnknownMotionKind("spin".into())
            .to_string()
            .contains("unknown motion kind 'spin'")
    );
    assert_eq!(Error::EmptyInputSet.to_string(), "input set is empty");
}

#[test]
fn sink_write_carries_frame_index() {
    let err = Error::sink_write(17, "pipe closed");
    assert!(err.to_string().contains("frame 17"));
    assert!(err.to_string().contains("pipe closed"));
}

#[test]
fn per_image_classification() {
    assert!(Error::invalid_image("x").is_per_image());
    assert!(Error::sink_write(0, "x").is_per_image());
    assert!(!Error::EmptyInputSet.is_per_image());
    assert!(!Error::unknown_job("x").is_per_image());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = Error::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
