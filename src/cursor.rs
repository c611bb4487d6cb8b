use crate::tap_engine::{
    config::{CursorConfig, TapEngineConfig},
    CursorPosition, RawSample,
};

/// Inclusive cursor limits: the cursor lives in `[0, max_x] x [0, max_y]`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DisplayBounds {
    pub max_x: i16,
    pub max_y: i16,
}

impl DisplayBounds {
    /// Bounds for a display of `width` x `height` pixels. `None` for an empty display.
    pub fn from_size(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            max_x: i16::try_from(width - 1).unwrap_or(i16::MAX),
            max_y: i16::try_from(height - 1).unwrap_or(i16::MAX),
        })
    }

    pub fn clamp(&self, x: i32, y: i32) -> CursorPosition {
        CursorPosition {
            x: x.clamp(0, i32::from(self.max_x)) as i16,
            y: y.clamp(0, i32::from(self.max_y)) as i16,
        }
    }

    pub fn contains(&self, position: CursorPosition) -> bool {
        (0..=self.max_x).contains(&position.x) && (0..=self.max_y).contains(&position.y)
    }
}

/// Averaged x/y tilt for one batch, already scaled to screen pixels.
pub fn batch_drift(samples: &[RawSample], cfg: &CursorConfig) -> (i32, i32) {
    let (sum_x, sum_y) = samples.iter().fold((0i32, 0i32), |(sx, sy), s| {
        (
            sx.saturating_add(i32::from(s.x >> cfg.axis_shift)),
            sy.saturating_add(i32::from(s.y >> cfg.axis_shift)),
        )
    });
    (sum_x >> cfg.average_shift, sum_y >> cfg.average_shift)
}

/// Tilt-driven cursor. Screen y grows downward while the sensor's y axis grows
/// upward, hence the subtraction.
#[derive(Clone, Copy, Debug)]
pub struct CursorIntegrator {
    config: &'static CursorConfig,
    bounds: DisplayBounds,
    position: CursorPosition,
}

impl CursorIntegrator {
    pub fn new(config: &'static TapEngineConfig, bounds: DisplayBounds) -> Self {
        let cursor = &config.cursor;
        Self {
            config: cursor,
            bounds,
            position: bounds.clamp(i32::from(cursor.start_x), i32::from(cursor.start_y)),
        }
    }

    pub fn position(&self) -> CursorPosition {
        self.position
    }

    pub fn bounds(&self) -> DisplayBounds {
        self.bounds
    }

    pub fn update(&mut self, samples: &[RawSample]) -> CursorPosition {
        let (dx, dy) = batch_drift(samples, self.config);
        self.position = self.bounds.clamp(
            i32::from(self.position.x) + dx,
            i32::from(self.position.y) - dy,
        );
        self.position
    }
}
