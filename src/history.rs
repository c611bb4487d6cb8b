use crate::tap_engine::Tap;

/// A tap as the display draws it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TapCircle {
    pub x: i16,
    pub y: i16,
    pub radius: i16,
}

impl TapCircle {
    pub const EMPTY: Self = Self {
        x: 0,
        y: 0,
        radius: 0,
    };

    pub fn is_drawable(&self, max_radius: i16) -> bool {
        self.radius > 0 && self.radius < max_radius
    }
}

impl From<Tap> for TapCircle {
    fn from(tap: Tap) -> Self {
        Self {
            x: tap.x,
            y: tap.y,
            radius: i16::from(tap.strength),
        }
    }
}

/// Fixed-capacity history of the last `N` taps.
///
/// Slots are overwritten oldest-first and never cleared. Snapshots come back in
/// slot order, not chronological order.
#[derive(Clone, Debug)]
pub struct TapHistoryRing<const N: usize> {
    slots: [TapCircle; N],
    write_index: usize,
}

impl<const N: usize> TapHistoryRing<N> {
    pub const fn new() -> Self {
        const { assert!(N > 0, "tap history needs at least one slot") };
        Self {
            slots: [TapCircle::EMPTY; N],
            write_index: 0,
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Stores `tap` and returns the slot it landed in.
    pub fn push(&mut self, tap: Tap) -> usize {
        let slot = self.write_index;
        self.slots[slot] = TapCircle::from(tap);
        self.write_index = (slot + 1) % N;
        slot
    }

    pub fn snapshot(&self) -> [TapCircle; N] {
        self.slots
    }

    /// Most recently written slot, if anything has been pushed yet.
    pub fn newest(&self) -> Option<TapCircle> {
        let slot = (self.write_index + N - 1) % N;
        let circle = self.slots[slot];
        (circle != TapCircle::EMPTY).then_some(circle)
    }
}

impl<const N: usize> Default for TapHistoryRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tap(strength: u8) -> Tap {
        Tap {
            timestamp_ms: u64::from(strength) * 100,
            strength,
            x: i16::from(strength),
            y: -i16::from(strength),
        }
    }

    #[test]
    fn fresh_ring_is_all_empty_slots() {
        let ring = TapHistoryRing::<10>::new();
        let snapshot = ring.snapshot();
        assert_eq!(snapshot.len(), 10);
        assert!(snapshot.iter().all(|c| *c == TapCircle::EMPTY));
        assert_eq!(ring.newest(), None);
    }

    #[test]
    fn push_advances_write_index_modulo_capacity() {
        let mut ring = TapHistoryRing::<3>::new();
        assert_eq!(ring.capacity(), 3);
        assert_eq!(ring.push(tap(1)), 0);
        assert_eq!(ring.push(tap(2)), 1);
        assert_eq!(ring.push(tap(3)), 2);
        assert_eq!(ring.write_index(), 0);
        assert_eq!(ring.push(tap(4)), 0);
        assert_eq!(ring.write_index(), 1);
    }

    #[test]
    fn overflow_evicts_oldest() {
        let mut ring = TapHistoryRing::<10>::new();
        for strength in 1..=11 {
            let _ = ring.push(tap(strength));
        }

        let snapshot = ring.snapshot();
        assert_eq!(snapshot.len(), 10);
        let mut radii: Vec<i16> = snapshot.iter().map(|c| c.radius).collect();
        assert_eq!(radii[0], 11);
        radii.sort_unstable();
        assert_eq!(radii, (2..=11).collect::<Vec<i16>>());
        assert_eq!(ring.newest().map(|c| c.radius), Some(11));
    }

    #[test]
    fn snapshot_is_stable_without_push() {
        let mut ring = TapHistoryRing::<4>::new();
        let _ = ring.push(tap(5));
        assert_eq!(ring.snapshot(), ring.snapshot());
    }

    #[test]
    fn circle_carries_tap_origin_and_strength() {
        let circle = TapCircle::from(tap(7));
        assert_eq!(
            circle,
            TapCircle {
                x: 7,
                y: -7,
                radius: 7
            }
        );
    }

    #[test]
    fn drawable_excludes_empty_and_oversize() {
        assert!(!TapCircle::EMPTY.is_drawable(100));
        assert!(TapCircle { x: 1, y: 1, radius: 99 }.is_drawable(100));
        assert!(!TapCircle { x: 1, y: 1, radius: 100 }.is_drawable(100));
    }
}
