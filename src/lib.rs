//! Tap detection for a wrist-worn accelerometer.
//!
//! A [`TapSession`] takes batches of raw samples, classifies short knocks with a
//! streaming state machine, keeps the last few taps for display, and moves a
//! tilt-driven cursor. Nothing here allocates; the host owns the sensor, the
//! clock and the screen.

#![cfg_attr(not(test), no_std)]

pub mod cursor;
pub mod history;
#[cfg(feature = "graphics")]
pub mod render;
pub mod session;
pub mod tap_engine;
pub mod telemetry;

pub use cursor::{CursorIntegrator, DisplayBounds};
pub use history::{TapCircle, TapHistoryRing};
pub use session::{
    BatchReport, MotionSensor, RedrawSchedule, SessionError, SessionView, SharedTapSession,
    TapSession,
};
pub use tap_engine::{
    active_config, CursorPosition, DetectorTraceSample, RawSample, SampleOutput, Tap, TapDetector,
    TapEngineConfig, TAP_HISTORY_CAPACITY,
};
pub use telemetry::Snapshot;
