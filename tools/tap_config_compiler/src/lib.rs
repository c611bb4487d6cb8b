//! Compiles `config/tap.toml` into Rust constants at build time.
//!
//! The tap detector has no runtime tuning surface: every threshold is baked into
//! the firmware image. This crate parses the TOML file, rejects combinations the
//! detector cannot honor, and renders a source fragment that `src/tap_engine/config.rs`
//! pulls in with `include!`.

use std::{fmt, fs, path::Path};

use serde::Deserialize;

const MAX_AXIS_SHIFT: u8 = 8;
const MAX_AVERAGE_SHIFT: u8 = 15;
const MAX_HISTORY_CAPACITY: usize = 64;

#[derive(Debug)]
pub enum ConfigCompilerError {
    Io(String),
    Parse(String),
    Invalid(String),
}

impl fmt::Display for ConfigCompilerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "io error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigCompilerError {}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ProxyAxis {
    X,
    Y,
    Z,
}

impl ProxyAxis {
    fn variant(self) -> &'static str {
        match self {
            Self::X => "ProxyAxis::X",
            Self::Y => "ProxyAxis::Y",
            Self::Z => "ProxyAxis::Z",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectorSection {
    pub proxy_axis: ProxyAxis,
    pub axis_shift: u8,
    pub initial_sensitivity: i32,
    pub subtle_threshold: i32,
    pub subtle_length: u16,
    pub max_length: u16,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplingSection {
    pub rate_hz: u16,
    pub samples_per_batch: u16,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CursorSection {
    pub axis_shift: u8,
    pub average_shift: u8,
    pub start_x: i32,
    pub start_y: i32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderSection {
    pub redraw_interval_ms: u64,
    pub max_drawable_radius: i32,
    pub history_capacity: usize,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TapConfigFile {
    pub detector: DetectorSection,
    pub sampling: SamplingSection,
    pub cursor: CursorSection,
    pub render: RenderSection,
}

pub fn parse_tap_file(path: &Path) -> Result<TapConfigFile, ConfigCompilerError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| ConfigCompilerError::Io(format!("{}: {e}", path.display())))?;
    parse_tap_str(&raw)
}

pub fn parse_tap_str(raw: &str) -> Result<TapConfigFile, ConfigCompilerError> {
    toml::from_str(raw).map_err(|e| ConfigCompilerError::Parse(e.to_string()))
}

pub fn validate_config(config: &TapConfigFile) -> Result<(), ConfigCompilerError> {
    let detector = &config.detector;
    if detector.axis_shift > MAX_AXIS_SHIFT {
        return invalid(format!("detector.axis_shift must be <= {MAX_AXIS_SHIFT}"));
    }
    if detector.subtle_threshold <= 0 {
        return invalid("detector.subtle_threshold must be > 0");
    }
    if detector.subtle_threshold >= detector.initial_sensitivity {
        return invalid("detector.subtle_threshold must be < detector.initial_sensitivity");
    }
    if detector.max_length > u16::from(u8::MAX) {
        return invalid("detector.max_length must be <= 255");
    }
    if detector.subtle_length == 0 {
        return invalid("detector.subtle_length must be > 0");
    }
    if detector.subtle_length >= detector.max_length {
        return invalid("detector.subtle_length must be < detector.max_length");
    }

    let sampling = &config.sampling;
    if sampling.rate_hz == 0 || 1_000 % u32::from(sampling.rate_hz) != 0 {
        return invalid("sampling.rate_hz must be > 0 and divide 1000");
    }
    if sampling.samples_per_batch == 0 || sampling.samples_per_batch > u16::from(u8::MAX) {
        return invalid("sampling.samples_per_batch must be in 1..=255");
    }

    let cursor = &config.cursor;
    if cursor.axis_shift > MAX_AXIS_SHIFT {
        return invalid(format!("cursor.axis_shift must be <= {MAX_AXIS_SHIFT}"));
    }
    if cursor.average_shift > MAX_AVERAGE_SHIFT {
        return invalid(format!(
            "cursor.average_shift must be <= {MAX_AVERAGE_SHIFT}"
        ));
    }
    let start_range = 0..=i32::from(i16::MAX);
    if !start_range.contains(&cursor.start_x) || !start_range.contains(&cursor.start_y) {
        return invalid("cursor.start_x and cursor.start_y must be in 0..=32767");
    }

    let render = &config.render;
    if render.redraw_interval_ms == 0 {
        return invalid("render.redraw_interval_ms must be > 0");
    }
    // A candidate commits only below the length cap.
    let max_strength = i32::from(detector.max_length) - 1 - i32::from(detector.subtle_length);
    if render.max_drawable_radius <= max_strength || render.max_drawable_radius > i32::from(i16::MAX)
    {
        return invalid(format!(
            "render.max_drawable_radius must be > {max_strength} (largest tap strength) and <= 32767"
        ));
    }
    if render.history_capacity == 0 || render.history_capacity > MAX_HISTORY_CAPACITY {
        return invalid(format!(
            "render.history_capacity must be in 1..={MAX_HISTORY_CAPACITY}"
        ));
    }

    Ok(())
}

pub fn render_generated_config(config: &TapConfigFile) -> String {
    let detector = &config.detector;
    let sampling = &config.sampling;
    let cursor = &config.cursor;
    let render = &config.render;

    let mut out = String::new();
    out.push_str("// @generated by tap_config_compiler from config/tap.toml. Do not edit.\n\n");
    out.push_str("pub const TAP_ENGINE_CONFIG: TapEngineConfig = TapEngineConfig {\n");
    out.push_str("    detector: TapDetectorConfig {\n");
    out.push_str(&format!(
        "        proxy_axis: {},\n",
        detector.proxy_axis.variant()
    ));
    out.push_str(&format!("        axis_shift: {},\n", detector.axis_shift));
    out.push_str(&format!(
        "        initial_sensitivity: {},\n",
        detector.initial_sensitivity
    ));
    out.push_str(&format!(
        "        subtle_threshold: {},\n",
        detector.subtle_threshold
    ));
    out.push_str(&format!("        subtle_length: {},\n", detector.subtle_length));
    out.push_str(&format!("        max_length: {},\n", detector.max_length));
    out.push_str("    },\n");
    out.push_str("    sampling: SamplingConfig {\n");
    out.push_str(&format!("        rate_hz: {},\n", sampling.rate_hz));
    out.push_str(&format!(
        "        samples_per_batch: {},\n",
        sampling.samples_per_batch
    ));
    out.push_str("    },\n");
    out.push_str("    cursor: CursorConfig {\n");
    out.push_str(&format!("        axis_shift: {},\n", cursor.axis_shift));
    out.push_str(&format!("        average_shift: {},\n", cursor.average_shift));
    out.push_str(&format!("        start_x: {},\n", cursor.start_x));
    out.push_str(&format!("        start_y: {},\n", cursor.start_y));
    out.push_str("    },\n");
    out.push_str("    render: RenderConfig {\n");
    out.push_str(&format!(
        "        redraw_interval_ms: {},\n",
        render.redraw_interval_ms
    ));
    out.push_str(&format!(
        "        max_drawable_radius: {},\n",
        render.max_drawable_radius
    ));
    out.push_str("    },\n");
    out.push_str("};\n\n");
    out.push_str(&format!(
        "pub const TAP_HISTORY_CAPACITY: usize = {};\n",
        render.history_capacity
    ));
    out
}

pub fn generate_from_path(path: &Path) -> Result<String, ConfigCompilerError> {
    let config = parse_tap_file(path)?;
    validate_config(&config)?;
    Ok(render_generated_config(&config))
}

fn invalid(msg: impl Into<String>) -> Result<(), ConfigCompilerError> {
    Err(ConfigCompilerError::Invalid(msg.into()))
}
