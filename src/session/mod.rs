//! The per-app session: detector, cursor and tap history behind one owner.
//!
//! Everything the sample path mutates lives here. The host creates a session when
//! the app starts, hands it every sensor batch, reads a [`SessionView`] on each
//! redraw, and drops it on exit.

use core::fmt;

use heapless::HistoryBuffer;

use crate::{
    cursor::{CursorIntegrator, DisplayBounds},
    history::{TapCircle, TapHistoryRing},
    tap_engine::{
        active_config,
        config::{SamplingConfig, TapEngineConfig},
        CursorPosition, DetectorTraceSample, RawSample, SampleOutput, Tap, TapDetector,
        TAP_HISTORY_CAPACITY,
    },
    telemetry::{SessionTelemetry, Snapshot},
};

mod redraw;
mod shared;

pub use redraw::RedrawSchedule;
pub use shared::SharedTapSession;

pub const TRACE_DEPTH: usize = 32;

/// The motion sensor service as seen from a session.
pub trait MotionSensor {
    type Error: fmt::Debug;

    fn subscribe(&mut self, sampling: &SamplingConfig) -> Result<(), Self::Error>;
    fn unsubscribe(&mut self);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionError<E> {
    EmptyDisplay,
    SensorUnavailable(E),
}

impl<E: fmt::Debug> fmt::Display for SessionError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDisplay => f.write_str("display has no drawable area"),
            Self::SensorUnavailable(err) => write!(f, "motion sensor unavailable: {err:?}"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BatchReport {
    pub committed: u16,
    pub cursor: CursorPosition,
}

/// What the display needs for one redraw.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SessionView {
    pub cursor: CursorPosition,
    pub last_tap: Option<Tap>,
    pub circles: [TapCircle; TAP_HISTORY_CAPACITY],
}

pub struct TapSession {
    detector: TapDetector,
    cursor: CursorIntegrator,
    history: TapHistoryRing<TAP_HISTORY_CAPACITY>,
    last_tap: Option<Tap>,
    telemetry: SessionTelemetry,
    trace: HistoryBuffer<DetectorTraceSample, TRACE_DEPTH>,
}

impl TapSession {
    pub fn new(config: &'static TapEngineConfig, bounds: DisplayBounds) -> Self {
        Self {
            detector: TapDetector::new(config),
            cursor: CursorIntegrator::new(config, bounds),
            history: TapHistoryRing::new(),
            last_tap: None,
            telemetry: SessionTelemetry::new(),
            trace: HistoryBuffer::new(),
        }
    }

    /// Subscribes to the sensor and builds a session sized to the display.
    /// On error nothing is left subscribed.
    pub fn start<S: MotionSensor>(
        sensor: &mut S,
        width: u16,
        height: u16,
    ) -> Result<Self, SessionError<S::Error>> {
        let bounds = DisplayBounds::from_size(width, height).ok_or(SessionError::EmptyDisplay)?;
        let config = active_config();
        sensor
            .subscribe(&config.sampling)
            .map_err(SessionError::SensorUnavailable)?;

        let session = Self::new(config, bounds);
        session.telemetry.record_session_start(
            config.sampling.rate_hz,
            config.sampling.samples_per_batch,
            bounds,
        );
        Ok(session)
    }

    pub fn stop<S: MotionSensor>(self, sensor: &mut S) -> Snapshot {
        sensor.unsubscribe();
        self.telemetry.record_session_stop();
        self.telemetry.snapshot()
    }

    /// Runs one sensor batch: detector first, against the cursor as it stood
    /// when the batch arrived, then the cursor drift.
    pub fn handle_batch(&mut self, samples: &[RawSample], batch_ms: u64) -> BatchReport {
        self.handle_batch_with(samples, batch_ms, |_| {})
    }

    /// Same as [`Self::handle_batch`], handing each committed tap to `on_tap`
    /// once it is in the history.
    pub fn handle_batch_with(
        &mut self,
        samples: &[RawSample],
        batch_ms: u64,
        mut on_tap: impl FnMut(&Tap),
    ) -> BatchReport {
        self.handle_batch_traced(samples, batch_ms, |output| {
            if let Some(tap) = &output.tap {
                on_tap(tap);
            }
        })
    }

    /// Same as [`Self::handle_batch`], handing every per-sample detector output
    /// to `on_sample`, after any tap it carries is in the history. Unlike
    /// [`Self::recent_trace`], nothing is dropped for long batches.
    pub fn handle_batch_traced(
        &mut self,
        samples: &[RawSample],
        batch_ms: u64,
        mut on_sample: impl FnMut(&SampleOutput),
    ) -> BatchReport {
        self.telemetry.record_batch(batch_ms, samples.len());
        let origin = self.cursor.position();
        let mut committed = 0u16;

        let Self {
            detector,
            history,
            last_tap,
            telemetry,
            trace,
            ..
        } = self;
        detector.process_batch(samples, batch_ms, origin, |output| {
            telemetry.record_sample(&output.trace);
            trace.write(output.trace);
            if let Some(tap) = output.tap {
                let slot = history.push(tap);
                *last_tap = Some(tap);
                telemetry.record_tap(&tap, slot);
                committed = committed.saturating_add(1);
            }
            on_sample(output);
        });

        BatchReport {
            committed,
            cursor: self.cursor.update(samples),
        }
    }

    pub fn cursor(&self) -> CursorPosition {
        self.cursor.position()
    }

    pub fn bounds(&self) -> DisplayBounds {
        self.cursor.bounds()
    }

    pub fn last_tap(&self) -> Option<Tap> {
        self.last_tap
    }

    pub fn history(&self) -> &TapHistoryRing<TAP_HISTORY_CAPACITY> {
        &self.history
    }

    pub fn snapshot(&self) -> [TapCircle; TAP_HISTORY_CAPACITY] {
        self.history.snapshot()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            cursor: self.cursor(),
            last_tap: self.last_tap,
            circles: self.history.snapshot(),
        }
    }

    pub fn detector(&self) -> &TapDetector {
        &self.detector
    }

    pub fn telemetry(&self) -> Snapshot {
        self.telemetry.snapshot()
    }

    /// Oldest first.
    pub fn recent_trace(&self) -> impl Iterator<Item = &DetectorTraceSample> {
        self.trace.oldest_ordered()
    }

    #[cfg(feature = "graphics")]
    pub fn render<D>(&mut self, display: &mut D) -> crate::render::SceneReport
    where
        D: embedded_graphics::draw_target::DrawTarget<
            Color = embedded_graphics::pixelcolor::BinaryColor,
        >,
    {
        let max_radius = self.detector.config().render.max_drawable_radius;
        let report = crate::render::draw_scene(display, &self.view(), max_radius);
        for &(slot, radius) in report.rejected.iter() {
            self.telemetry.record_oversize_radius(slot, radius);
        }
        report
    }
}
