use super::super::features::{axis_proxy, proxy_delta};
use super::*;

impl TapHsm {
    pub(super) fn new(config: &'static TapEngineConfig) -> Self {
        Self {
            config,
            current: 0,
            last_trace: DetectorTraceSample {
                state_id: DetectorStateId::Uncalibrated,
                ..DetectorTraceSample::default()
            },
        }
    }

    pub(super) fn seed_baseline(&mut self, sample: RawSample) -> i16 {
        let proxy = axis_proxy(sample, &self.config.detector);
        self.current = proxy;
        proxy
    }

    /// Returns the new proxy and its distance from the previous one.
    pub(super) fn observe(&mut self, sample: RawSample) -> (i16, i32) {
        let proxy = axis_proxy(sample, &self.config.detector);
        let diff = proxy_delta(self.current, proxy);
        self.current = proxy;
        (proxy, diff)
    }

    pub(super) fn record(
        &mut self,
        tick: &SampleTick,
        proxy: i16,
        diff: i32,
        state_id: DetectorStateId,
        decision: TapDecision,
        candidate: Option<TapCandidate>,
    ) {
        let (duration, quiet_run) = candidate.map_or((0, 0), |c| (c.duration, c.quiet_run));
        self.last_trace = DetectorTraceSample {
            at_ms: tick.at_ms,
            state_id,
            decision,
            proxy,
            diff,
            duration,
            quiet_run,
        };
    }
}
