use std::path::PathBuf;

use tap_config_compiler::{
    generate_from_path, parse_tap_file, render_generated_config, validate_config,
    ConfigCompilerError, ProxyAxis,
};

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("missing tools dir")
        .parent()
        .expect("missing repo root")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn repo_config_compiles() {
    let config = repo_root().join("config/tap.toml");
    let generated = generate_from_path(&config).expect("repo config should compile");
    assert!(generated.contains("pub const TAP_ENGINE_CONFIG: TapEngineConfig"));
    assert!(generated.contains("pub const TAP_HISTORY_CAPACITY: usize = 10;"));
}

#[test]
fn default_fixture_renders_detector_constants() {
    let events = parse_tap_file(&fixture("valid_default.toml")).expect("fixture should parse");
    validate_config(&events).expect("fixture should validate");
    let rendered = render_generated_config(&events);

    for needle in [
        "proxy_axis: ProxyAxis::Z,",
        "initial_sensitivity: 30,",
        "subtle_threshold: 12,",
        "subtle_length: 6,",
        "max_length: 30,",
        "rate_hz: 100,",
        "samples_per_batch: 5,",
        "average_shift: 5,",
        "start_x: 72,",
        "start_y: 44,",
        "redraw_interval_ms: 50,",
        "max_drawable_radius: 100,",
    ] {
        assert!(
            rendered.contains(needle),
            "rendered output missing `{needle}`"
        );
    }
}

#[test]
fn generation_is_deterministic_for_same_input() {
    let config = fixture("valid_default.toml");
    let first = generate_from_path(&config).expect("first generation failed");
    let second = generate_from_path(&config).expect("second generation failed");
    assert_eq!(first, second);
}

#[test]
fn alternate_axis_and_capacity_render() {
    let events = parse_tap_file(&fixture("valid_x_axis.toml")).expect("fixture should parse");
    assert_eq!(events.detector.proxy_axis, ProxyAxis::X);
    validate_config(&events).expect("fixture should validate");
    let rendered = render_generated_config(&events);
    assert!(rendered.contains("proxy_axis: ProxyAxis::X,"));
    assert!(rendered.contains("pub const TAP_HISTORY_CAPACITY: usize = 4;"));
}

#[test]
fn semantic_validation_rejects_invalid_ranges() {
    let cases = [
        (
            "invalid/subtle_length_zero.toml",
            "detector.subtle_length must be > 0",
        ),
        (
            "invalid/subtle_length_too_long.toml",
            "detector.subtle_length must be < detector.max_length",
        ),
        (
            "invalid/threshold_above_sensitivity.toml",
            "detector.subtle_threshold must be < detector.initial_sensitivity",
        ),
        (
            "invalid/max_length_overflow.toml",
            "detector.max_length must be <= 255",
        ),
        (
            "invalid/rate_not_divisor.toml",
            "sampling.rate_hz must be > 0 and divide 1000",
        ),
        (
            "invalid/radius_below_strength.toml",
            "render.max_drawable_radius must be > 23",
        ),
        (
            "invalid/history_empty.toml",
            "render.history_capacity must be in 1..=64",
        ),
        (
            "invalid/redraw_zero.toml",
            "render.redraw_interval_ms must be > 0",
        ),
    ];

    for (name, expected) in cases {
        let err = generate_from_path(&fixture(name)).expect_err("fixture should be rejected");
        match err {
            ConfigCompilerError::Invalid(msg) => assert!(
                msg.contains(expected),
                "{name}: expected `{expected}`, got `{msg}`"
            ),
            other => panic!("{name}: expected semantic error, got {other}"),
        }
    }
}

#[test]
fn schema_errors_surface_as_parse_errors() {
    for name in ["invalid/unknown_axis.toml", "invalid/unknown_section.toml"] {
        let err = generate_from_path(&fixture(name)).expect_err("fixture should be rejected");
        assert!(
            matches!(err, ConfigCompilerError::Parse(_)),
            "{name}: expected parse error, got {err}"
        );
    }
}

#[test]
fn missing_file_is_io_error() {
    let err = generate_from_path(&fixture("does_not_exist.toml")).expect_err("missing file");
    assert!(matches!(err, ConfigCompilerError::Io(_)));
}
