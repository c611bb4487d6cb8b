pub mod config;
pub mod features;
pub mod tap_hsm;
pub mod trace;
pub mod types;

pub use config::{active_config, TapEngineConfig, TAP_HISTORY_CAPACITY};
pub use tap_hsm::{SampleOutput, TapDetector};
pub use trace::DetectorTraceSample;
pub use types::{
    CandidateStep, CursorPosition, DetectorStateId, RawSample, Tap, TapCandidate, TapDecision,
};
