use crate::tap_engine::types::{DetectorStateId, TapDecision};

/// Per-sample view of the detector, for diagnostics and replay output.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DetectorTraceSample {
    pub at_ms: u64,
    pub state_id: DetectorStateId,
    pub decision: TapDecision,
    pub proxy: i16,
    pub diff: i32,
    pub duration: u8,
    pub quiet_run: u8,
}
