use super::*;

#[derive(Clone, Copy, Debug, Default)]
pub struct SampleOutput {
    pub tap: Option<Tap>,
    pub trace: DetectorTraceSample,
}

/// Streaming tap classifier. Owns all cross-batch state, so a candidate that
/// opens near the end of one batch keeps running into the next.
pub struct TapDetector {
    machine: statig::blocking::StateMachine<TapHsm>,
}

impl Default for TapDetector {
    fn default() -> Self {
        Self::new(active_config())
    }
}

impl TapDetector {
    pub fn new(config: &'static TapEngineConfig) -> Self {
        Self {
            machine: TapHsm::new(config).state_machine(),
        }
    }

    pub fn config(&self) -> &'static TapEngineConfig {
        self.machine.inner().config
    }

    pub fn tick(&mut self, sample: RawSample, at_ms: u64, cursor: CursorPosition) -> SampleOutput {
        let mut context = DispatchContext::default();
        let tick = SampleTick {
            sample,
            at_ms,
            cursor,
        };
        self.machine.handle_with_context(&tick, &mut context);
        SampleOutput {
            tap: context.tap,
            trace: self.machine.inner().last_trace,
        }
    }

    /// Feeds a batch in order. Sample `i` is stamped `batch_ms + i * ms_per_sample`;
    /// `cursor` is the position taps opened in this batch will be anchored at.
    pub fn process_batch(
        &mut self,
        samples: &[RawSample],
        batch_ms: u64,
        cursor: CursorPosition,
        mut on_sample: impl FnMut(&SampleOutput),
    ) {
        let ms_per_sample = self.config().sampling.ms_per_sample();
        for (index, sample) in samples.iter().enumerate() {
            let at_ms = batch_ms.saturating_add((index as u64).saturating_mul(ms_per_sample));
            let output = self.tick(*sample, at_ms, cursor);
            on_sample(&output);
        }
    }

    pub fn last_trace(&self) -> DetectorTraceSample {
        self.machine.inner().last_trace
    }

    pub fn state_id(&self) -> DetectorStateId {
        self.machine.inner().last_trace.state_id
    }
}
