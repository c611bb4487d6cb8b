#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProxyAxis {
    X,
    Y,
    Z,
}

#[derive(Clone, Copy, Debug)]
pub struct TapDetectorConfig {
    pub proxy_axis: ProxyAxis,
    pub axis_shift: u8,
    pub initial_sensitivity: i32,
    pub subtle_threshold: i32,
    pub subtle_length: u8,
    pub max_length: u8,
}

impl TapDetectorConfig {
    /// Largest strength a tap can commit with: a candidate that reaches
    /// `max_length` is discarded.
    pub const fn max_strength(&self) -> u8 {
        self.max_length - 1 - self.subtle_length
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SamplingConfig {
    pub rate_hz: u16,
    pub samples_per_batch: u8,
}

impl SamplingConfig {
    pub const fn ms_per_sample(&self) -> u64 {
        1_000 / self.rate_hz as u64
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CursorConfig {
    pub axis_shift: u8,
    pub average_shift: u8,
    pub start_x: i16,
    pub start_y: i16,
}

#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    pub redraw_interval_ms: u64,
    pub max_drawable_radius: i16,
}

#[derive(Clone, Copy, Debug)]
pub struct TapEngineConfig {
    pub detector: TapDetectorConfig,
    pub sampling: SamplingConfig,
    pub cursor: CursorConfig,
    pub render: RenderConfig,
}

include!(concat!(env!("OUT_DIR"), "/tap_config.rs"));

pub fn active_config() -> &'static TapEngineConfig {
    &TAP_ENGINE_CONFIG
}
