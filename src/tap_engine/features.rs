use crate::tap_engine::{
    config::{ProxyAxis, TapDetectorConfig},
    types::{CandidateStep, RawSample, Tap, TapCandidate},
};

/// Single-axis magnitude used for tap detection. Raw readings come in steps of
/// `1 << axis_shift`, so the shift only drops dead bits.
pub fn axis_proxy(sample: RawSample, cfg: &TapDetectorConfig) -> i16 {
    let raw = match cfg.proxy_axis {
        ProxyAxis::X => sample.x,
        ProxyAxis::Y => sample.y,
        ProxyAxis::Z => sample.z,
    };
    raw >> cfg.axis_shift
}

pub fn proxy_delta(previous: i16, current: i16) -> i32 {
    (i32::from(current) - i32::from(previous)).abs()
}

pub fn opens_candidate(diff: i32, cfg: &TapDetectorConfig) -> bool {
    diff >= cfg.initial_sensitivity
}

/// Advances an open candidate by one sample.
///
/// Duration grows on every sample, quiet or not, until it saturates at
/// `max_length`. The candidate ends after `subtle_length` consecutive quiet
/// samples; a saturated candidate ends as a discard.
pub fn advance_candidate(
    candidate: &mut TapCandidate,
    diff: i32,
    cfg: &TapDetectorConfig,
) -> CandidateStep {
    if candidate.duration < cfg.max_length {
        candidate.duration += 1;
    }

    if diff >= cfg.subtle_threshold {
        candidate.quiet_run = 0;
        return CandidateStep::Continue;
    }

    candidate.quiet_run = candidate.quiet_run.saturating_add(1);
    if candidate.quiet_run < cfg.subtle_length {
        return CandidateStep::Continue;
    }

    if candidate.duration >= cfg.max_length {
        return CandidateStep::Discard;
    }

    CandidateStep::Commit(Tap {
        timestamp_ms: candidate.start_ms,
        strength: candidate.duration.saturating_sub(cfg.subtle_length),
        x: candidate.origin.x,
        y: candidate.origin.y,
    })
}
