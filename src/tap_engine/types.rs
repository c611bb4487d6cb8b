/// One accelerometer tick as delivered by the motion sensor.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RawSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl RawSample {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CursorPosition {
    pub x: i16,
    pub y: i16,
}

impl CursorPosition {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// A committed knock. `strength` is how long the vibration lasted, not how hard it hit.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Tap {
    pub timestamp_ms: u64,
    pub strength: u8,
    pub x: i16,
    pub y: i16,
}

/// A knock in progress.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TapCandidate {
    pub start_ms: u64,
    pub duration: u8,
    pub origin: CursorPosition,
    pub quiet_run: u8,
    pub cold_start: bool,
}

impl TapCandidate {
    pub const fn opened(start_ms: u64, origin: CursorPosition) -> Self {
        Self {
            start_ms,
            duration: 1,
            origin,
            quiet_run: 0,
            cold_start: false,
        }
    }

    /// Cold-start candidate: already at the length cap, so it can only be discarded.
    pub const fn settling(start_ms: u64, max_length: u8) -> Self {
        Self {
            start_ms,
            duration: max_length,
            origin: CursorPosition::new(0, 0),
            quiet_run: 0,
            cold_start: true,
        }
    }
}

/// Outcome of feeding one sample to an open candidate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CandidateStep {
    Continue,
    Commit(Tap),
    Discard,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(u8)]
pub enum DetectorStateId {
    #[default]
    Uncalibrated = 0,
    Idle = 1,
    Tracking = 2,
}

impl DetectorStateId {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(u8)]
pub enum TapDecision {
    #[default]
    None = 0,
    BaselineSeeded = 1,
    CandidateOpened = 2,
    Committed = 3,
    DiscardedTooLong = 4,
    Settled = 5,
}

impl TapDecision {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}
