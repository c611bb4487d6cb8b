use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::{
    config::{active_config, TapEngineConfig},
    features::{advance_candidate, opens_candidate},
    trace::DetectorTraceSample,
    types::{
        CandidateStep, CursorPosition, DetectorStateId, RawSample, Tap, TapCandidate, TapDecision,
    },
};

mod engine;
mod helpers;

pub use engine::{SampleOutput, TapDetector};

/// One sample, stamped with its extrapolated time and the cursor position at batch start.
#[derive(Clone, Copy, Debug)]
struct SampleTick {
    sample: RawSample,
    at_ms: u64,
    cursor: CursorPosition,
}

#[derive(Default)]
struct DispatchContext {
    tap: Option<Tap>,
}

struct TapHsm {
    config: &'static TapEngineConfig,
    current: i16,
    last_trace: DetectorTraceSample,
}

#[state_machine(initial = "State::uncalibrated()")]
impl TapHsm {
    /// No baseline yet. The first sample seeds `current` and opens a settling
    /// candidate so the jump from zero to the resting reading cannot commit.
    #[state]
    fn uncalibrated(
        &mut self,
        context: &mut DispatchContext,
        event: &SampleTick,
    ) -> Outcome<State> {
        let _ = context;
        let proxy = self.seed_baseline(event.sample);
        let mut candidate = TapCandidate::settling(event.at_ms, self.config.detector.max_length);
        match advance_candidate(&mut candidate, 0, &self.config.detector) {
            CandidateStep::Continue => {
                self.record(
                    event,
                    proxy,
                    0,
                    DetectorStateId::Tracking,
                    TapDecision::BaselineSeeded,
                    Some(candidate),
                );
                Transition(State::tracking(candidate))
            }
            _ => {
                self.record(
                    event,
                    proxy,
                    0,
                    DetectorStateId::Idle,
                    TapDecision::Settled,
                    Some(candidate),
                );
                Transition(State::idle())
            }
        }
    }

    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &SampleTick) -> Outcome<State> {
        let _ = context;
        let (proxy, diff) = self.observe(event.sample);
        if opens_candidate(diff, &self.config.detector) {
            let candidate = TapCandidate::opened(event.at_ms, event.cursor);
            self.record(
                event,
                proxy,
                diff,
                DetectorStateId::Tracking,
                TapDecision::CandidateOpened,
                Some(candidate),
            );
            return Transition(State::tracking(candidate));
        }

        self.record(
            event,
            proxy,
            diff,
            DetectorStateId::Idle,
            TapDecision::None,
            None,
        );
        Handled
    }

    #[state]
    fn tracking(
        &mut self,
        candidate: &mut TapCandidate,
        context: &mut DispatchContext,
        event: &SampleTick,
    ) -> Outcome<State> {
        let (proxy, diff) = self.observe(event.sample);
        match advance_candidate(candidate, diff, &self.config.detector) {
            CandidateStep::Continue => {
                self.record(
                    event,
                    proxy,
                    diff,
                    DetectorStateId::Tracking,
                    TapDecision::None,
                    Some(*candidate),
                );
                Handled
            }
            CandidateStep::Commit(tap) => {
                context.tap = Some(tap);
                self.record(
                    event,
                    proxy,
                    diff,
                    DetectorStateId::Idle,
                    TapDecision::Committed,
                    Some(*candidate),
                );
                Transition(State::idle())
            }
            CandidateStep::Discard => {
                let decision = if candidate.cold_start {
                    TapDecision::Settled
                } else {
                    TapDecision::DiscardedTooLong
                };
                self.record(
                    event,
                    proxy,
                    diff,
                    DetectorStateId::Idle,
                    decision,
                    Some(*candidate),
                );
                Transition(State::idle())
            }
        }
    }
}
