use latnet_core::errors::{ErrorInfo, NetError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("coord", "3")
        .with_context("input", "level:9")
}

#[test]
fn config_error_surface() {
    let err = NetError::Config(sample_info("bad-level-combiner", "cannot parse combiner string"));
    assert_eq!(err.code(), "bad-level-combiner");
    assert_eq!(err.info().context["input"], "level:9");
}

#[test]
fn unsupported_and_logic_are_distinct() {
    let unsupported = NetError::Unsupported(sample_info("not-sequence-viewable", "cannot extend"));
    let logic = NetError::Logic(sample_info("missing-size-extension", "not overridden"));
    assert_ne!(unsupported, logic);
    assert!(unsupported.to_string().starts_with("unsupported operation"));
    assert!(logic.to_string().starts_with("logic error"));
}

#[test]
fn display_lists_context_and_hint() {
    let err = NetError::OutOfRange(
        ErrorInfo::new("coordinate-out-of-range", "coordinate outside [1, dimension]")
            .with_context("coord", "0")
            .with_hint("coordinates are 1-indexed"),
    );
    let text = err.to_string();
    assert!(text.contains("code: coordinate-out-of-range"));
    assert!(text.contains("coord=0"));
    assert!(text.contains("hint: coordinates are 1-indexed"));
}

#[test]
fn errors_round_trip_json() {
    let err = NetError::InvalidArgument(sample_info("degenerate-interlacing", "m must be >= 2"));
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"InvalidArgument\""));
    let decoded: NetError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}
