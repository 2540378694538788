use crate::foundation::math::Rng64;

/// Seconds between automatic placement refreshes.
pub const REFRESH_SECS: f64 = 10.0;

/// Fixed draw opacity for the watermark sprite.
pub const WATERMARK_OPACITY: f32 = 0.7;

/// Watermark sprite width as a fraction of canvas width (`width / 4.2`).
pub const SIZE_DIVISOR: f64 = 4.2;

/// Randomized placement of the persistent overlay mark.
///
/// Fractions are of canvas size; the vertical band is split so the mark
/// never sits over the centered lyric block.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WatermarkPlacement {
    /// Horizontal center in `[0.2, 0.8]`.
    pub x_frac: f64,
    /// Vertical center in `[0.1, 0.3]` or `[0.7, 0.9]`.
    pub y_frac: f64,
    /// Rotation about the sprite center in `[-20, 20]` degrees.
    pub angle_deg: f64,
}

impl WatermarkPlacement {
    /// Draw a fresh placement from the session RNG.
    pub fn sample(rng: &mut Rng64) -> Self {
        let x_frac = rng.uniform(0.2, 0.8);
        let y_frac = if rng.chance(0.5) {
            rng.uniform(0.1, 0.3)
        } else {
            rng.uniform(0.7, 0.9)
        };
        Self {
            x_frac,
            y_frac,
            angle_deg: rng.uniform(-20.0, 20.0),
        }
    }
}

/// Placement plus the refresh clock. Owned by the session; written only by
/// the transport tick and explicit user actions.
#[derive(Clone, Copy, Debug)]
pub struct WatermarkState {
    placement: WatermarkPlacement,
    last_refresh: f64,
}

impl WatermarkState {
    pub fn new(rng: &mut Rng64) -> Self {
        Self {
            placement: WatermarkPlacement::sample(rng),
            last_refresh: 0.0,
        }
    }

    pub fn placement(&self) -> WatermarkPlacement {
        self.placement
    }

    /// Resample the placement immediately (user-triggered move).
    pub fn refresh(&mut self, rng: &mut Rng64, now: f64) {
        self.placement = WatermarkPlacement::sample(rng);
        self.last_refresh = now;
    }

    /// Resample if the 10-second interval has elapsed. `now` is the driving
    /// loop's wall-clock, so the mark keeps moving while playback is paused.
    pub fn refresh_if_due(&mut self, rng: &mut Rng64, now: f64) -> bool {
        if now - self.last_refresh >= REFRESH_SECS {
            self.refresh(rng, now);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/watermark.rs"]
mod tests;
