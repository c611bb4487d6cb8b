/// Fixed-cadence redraw timer driven by the host's millisecond clock.
///
/// Sample arrival never triggers a redraw; the display polls this instead.
#[derive(Clone, Copy, Debug)]
pub struct RedrawSchedule {
    interval_ms: u64,
    next_due_ms: Option<u64>,
}

impl RedrawSchedule {
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            next_due_ms: None,
        }
    }

    pub const fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// True when a redraw is due at `now_ms`. The first poll always fires.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.next_due_ms {
            Some(due) if now_ms < due => false,
            Some(due) => {
                // A late poll skips missed frames instead of bursting.
                let missed = (now_ms - due) / self.interval_ms;
                self.next_due_ms = Some(due + (missed + 1) * self.interval_ms);
                true
            }
            None => {
                self.next_due_ms = Some(now_ms.saturating_add(self.interval_ms));
                true
            }
        }
    }

    pub fn ms_until_due(&self, now_ms: u64) -> u64 {
        self.next_due_ms
            .map_or(0, |due| due.saturating_sub(now_ms))
    }
}
