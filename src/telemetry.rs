use log::{debug, info, trace, warn};

use crate::{
    cursor::DisplayBounds,
    tap_engine::{DetectorTraceSample, Tap, TapDecision},
};

/// Counters for one session. Plain integers: the session is only ever touched
/// from one context at a time.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Snapshot {
    pub batches: u32,
    pub samples: u32,
    pub candidates_opened: u32,
    pub taps_committed: u32,
    pub shakes_discarded: u32,
    pub cold_start_settles: u32,
    pub oversize_radii_rejected: u32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SessionTelemetry {
    counters: Snapshot,
}

impl SessionTelemetry {
    pub const fn new() -> Self {
        Self {
            counters: Snapshot {
                batches: 0,
                samples: 0,
                candidates_opened: 0,
                taps_committed: 0,
                shakes_discarded: 0,
                cold_start_settles: 0,
                oversize_radii_rejected: 0,
            },
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.counters
    }

    pub fn record_session_start(&self, rate_hz: u16, samples_per_batch: u8, bounds: DisplayBounds) {
        info!(
            "tap session start rate_hz={} samples_per_batch={} max_x={} max_y={}",
            rate_hz, samples_per_batch, bounds.max_x, bounds.max_y
        );
    }

    pub fn record_session_stop(&self) {
        info!(
            "tap session stop batches={} taps={} shakes={}",
            self.counters.batches, self.counters.taps_committed, self.counters.shakes_discarded
        );
    }

    pub fn record_batch(&mut self, batch_ms: u64, len: usize) {
        self.counters.batches = self.counters.batches.wrapping_add(1);
        self.counters.samples = self
            .counters
            .samples
            .wrapping_add(u32::try_from(len).unwrap_or(u32::MAX));
        trace!("tap batch t_ms={} len={}", batch_ms, len);
    }

    pub fn record_sample(&mut self, sample: &DetectorTraceSample) {
        match sample.decision {
            TapDecision::None => {}
            TapDecision::BaselineSeeded => {
                debug!("tap baseline_seeded t_ms={} proxy={}", sample.at_ms, sample.proxy);
            }
            TapDecision::CandidateOpened => {
                self.counters.candidates_opened = self.counters.candidates_opened.wrapping_add(1);
                debug!(
                    "tap candidate_open t_ms={} diff={}",
                    sample.at_ms, sample.diff
                );
            }
            TapDecision::Committed => {
                self.counters.taps_committed = self.counters.taps_committed.wrapping_add(1);
            }
            TapDecision::DiscardedTooLong => {
                self.counters.shakes_discarded = self.counters.shakes_discarded.wrapping_add(1);
                debug!(
                    "tap discard_too_long t_ms={} duration={}",
                    sample.at_ms, sample.duration
                );
            }
            TapDecision::Settled => {
                self.counters.cold_start_settles = self.counters.cold_start_settles.wrapping_add(1);
                debug!("tap cold_start_settled t_ms={}", sample.at_ms);
            }
        }
    }

    pub fn record_tap(&self, tap: &Tap, slot: usize) {
        info!(
            "tap commit t_ms={} strength={} x={} y={} slot={}",
            tap.timestamp_ms, tap.strength, tap.x, tap.y, slot
        );
    }

    pub fn record_oversize_radius(&mut self, slot: usize, radius: i16) {
        self.counters.oversize_radii_rejected =
            self.counters.oversize_radii_rejected.wrapping_add(1);
        warn!("tap history slot={} radius={} rejected as implausible", slot, radius);
    }
}
