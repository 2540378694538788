use crate::foundation::math::{Rng64, clamp01, lerp};
use crate::scene::theme::Theme;

/// Ken-Burns pan/zoom path for one playback session.
///
/// Sampled once when the session is created and immutable afterwards, so any
/// seek reproduces the exact camera pose for the seeked time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraPath {
    pub start_zoom: f64,
    pub end_zoom: f64,
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

/// Camera state for a single frame: zoom factor plus normalized pan offsets
/// applied to the cover-fit source window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

const START_ZOOM: f64 = 1.0;
const END_ZOOM: f64 = 1.15;
const OFFSET_RANGE: f64 = 0.25;

impl CameraPath {
    /// Draw a fresh path: fixed 1.0 -> 1.15 zoom, offsets uniform in
    /// `(-0.25, 0.25)`.
    pub fn sample(rng: &mut Rng64) -> Self {
        Self {
            start_zoom: START_ZOOM,
            end_zoom: END_ZOOM,
            start_x: rng.uniform(-OFFSET_RANGE, OFFSET_RANGE),
            start_y: rng.uniform(-OFFSET_RANGE, OFFSET_RANGE),
            end_x: rng.uniform(-OFFSET_RANGE, OFFSET_RANGE),
            end_y: rng.uniform(-OFFSET_RANGE, OFFSET_RANGE),
        }
    }

    /// Base pose at time `t`: straight lerp over normalized song progress,
    /// no theme jitter.
    pub fn base_pose(&self, t: f64, duration: f64) -> CameraPose {
        let progress = if duration > 0.0 {
            clamp01(t / duration)
        } else {
            0.0
        };
        CameraPose {
            zoom: lerp(self.start_zoom, self.end_zoom, progress),
            offset_x: lerp(self.start_x, self.end_x, progress),
            offset_y: lerp(self.start_y, self.end_y, progress),
        }
    }

    /// Pose at time `t` with the theme's jitter layered on top of the base
    /// lerp. Pure in `t`; independent of play/pause state.
    pub fn pose(&self, t: f64, duration: f64, theme: Theme) -> CameraPose {
        let base = self.base_pose(t, duration);
        let jitter = theme_jitter(theme, t);
        CameraPose {
            zoom: base.zoom * jitter.zoom_mul,
            offset_x: base.offset_x + jitter.dx,
            offset_y: base.offset_y + jitter.dy,
        }
    }
}

struct Jitter {
    zoom_mul: f64,
    dx: f64,
    dy: f64,
}

const NO_JITTER: Jitter = Jitter {
    zoom_mul: 1.0,
    dx: 0.0,
    dy: 0.0,
};

/// Zoom bump with a sharp attack at each beat and a linear decay across
/// `window` seconds of the period. Exactly zero outside the window.
pub fn beat_bump(t: f64, period: f64, window: f64, peak: f64) -> f64 {
    let phase = t.rem_euclid(period);
    if phase < window {
        (1.0 - phase / window) * peak
    } else {
        0.0
    }
}

fn theme_jitter(theme: Theme, t: f64) -> Jitter {
    match theme {
        Theme::Default => NO_JITTER,
        Theme::Rock => Jitter {
            // 0.4s beat with a 0.15s decay window.
            zoom_mul: 1.0 + beat_bump(t, 0.4, 0.15, 0.12),
            dx: (t * 2.5).sin() * 0.008,
            dy: (t * 2.8).cos() * 0.008,
        },
        Theme::Country => Jitter {
            zoom_mul: 1.0 + (t * 0.2).sin() * 0.015,
            dx: (t * 0.15).sin() * 0.008,
            dy: (t * 0.12).cos() * 0.006,
        },
        Theme::Chill => Jitter {
            zoom_mul: 1.0 + (t * 0.1).sin() * 0.01,
            dx: (t * 0.08).sin() * 0.003,
            dy: (t * 0.06).cos() * 0.003,
        },
        Theme::Underground => Jitter {
            // 120 BPM: 0.5s beat, bump over the first tenth of the period.
            zoom_mul: 1.0 + beat_bump(t, 0.5, 0.05, 0.08),
            dx: (t * 0.3).sin() * 0.005,
            dy: (t * 0.25).cos() * 0.005,
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/camera.rs"]
mod tests;
