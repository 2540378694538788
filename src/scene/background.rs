use std::sync::Arc;

use crate::assets::store::{ImageStore, PreparedImage};
use crate::foundation::core::{Canvas, Rect};
use crate::scene::camera::CameraPose;

/// Cross-fade length in seconds when the background image changes.
pub const FADE_SECS: f64 = 1.0;

/// Pick the indexed image for a section at the given section progress.
///
/// The chorus cycles through up to three images (thresholds 0.33/0.67);
/// every other section switches once at the midpoint. The result is clamped
/// to the available range, and 0 or 1 available images always resolve to 0.
pub fn select_image_index(section: &str, progress: f64, available: usize) -> usize {
    if available <= 1 {
        return 0;
    }
    let index = if section == "chorus" {
        if progress < 0.33 {
            0
        } else if progress < 0.67 {
            1
        } else {
            2
        }
    } else if progress < 0.5 {
        0
    } else {
        1
    };
    index.min(available - 1)
}

/// Resolve the background image for a section at the given progress.
///
/// Fallback chain: selected `"{section}_{index}"` key, then `"{section}_0"`,
/// then the bare `"{section}"` key. `None` means nothing is loaded for the
/// section yet; the caller may keep showing the previously drawn image.
pub fn resolve_background(
    store: &ImageStore,
    section: &str,
    progress: f64,
) -> Option<(String, Arc<PreparedImage>)> {
    let keys = store.section_keys(section);
    let index = select_image_index(section, progress, keys.len());
    let key = keys
        .get(index)
        .cloned()
        .unwrap_or_else(|| format!("{section}_0"));
    store.resolve(&key, section)
}

/// The background layers to draw for one frame.
#[derive(Clone, Debug)]
pub struct CrossFade {
    /// Outgoing image, drawn at `1 - progress`. Absent once a fade finishes.
    pub old: Option<(String, Arc<PreparedImage>)>,
    /// Incoming image, drawn at `progress`.
    pub new: Option<(String, Arc<PreparedImage>)>,
    /// Linear fade progress in `[0, 1]`.
    pub progress: f64,
}

/// Per-session cross-fade tracker.
///
/// A fade is (re)started whenever the resolved image key or the active
/// section differs from the previous frame. The very first resolved image is
/// shown fully faded in; there is nothing to fade from.
#[derive(Clone, Debug, Default)]
pub struct BackgroundState {
    current: Option<(String, Arc<PreparedImage>)>,
    previous: Option<(String, Arc<PreparedImage>)>,
    last_section: Option<String>,
    transition_start: f64,
}

impl BackgroundState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key of the image currently faded (or fading) in.
    pub fn current_key(&self) -> Option<&str> {
        self.current.as_ref().map(|(k, _)| k.as_str())
    }

    /// Advance the tracker to time `t` with this frame's resolved image.
    ///
    /// `resolved = None` (nothing loaded for the section) keeps showing the
    /// previously drawn image rather than flashing to black.
    pub fn advance(
        &mut self,
        t: f64,
        section: &str,
        resolved: Option<(String, Arc<PreparedImage>)>,
    ) -> CrossFade {
        let resolved = resolved.or_else(|| self.current.clone());

        // A backward seek can land before the recorded transition start;
        // treat the current image as settled rather than faded out.
        if t < self.transition_start {
            self.transition_start = t - FADE_SECS;
            self.previous = None;
        }

        let section_changed = self
            .last_section
            .as_deref()
            .is_some_and(|last| last != section);
        let key_changed = match (&self.current, &resolved) {
            (Some((cur, _)), Some((new, _))) => cur != new,
            (None, Some(_)) => true,
            _ => false,
        };

        if self.current.is_none() {
            // First image of the session: skip the fade entirely.
            self.current = resolved;
            self.transition_start = t - FADE_SECS;
        } else if key_changed || section_changed {
            self.previous = self.current.take();
            self.current = resolved;
            self.transition_start = t;
        }
        self.last_section = Some(section.to_string());

        let progress = ((t - self.transition_start) / FADE_SECS).clamp(0.0, 1.0);
        if progress >= 1.0 {
            self.previous = None;
        }

        CrossFade {
            old: self.previous.clone(),
            new: self.current.clone(),
            progress,
        }
    }
}

/// Source rectangle for drawing `image` with "cover" fit onto `canvas`,
/// zoomed and panned by the camera pose.
///
/// The shorter-relative-to-canvas dimension fills the canvas and the
/// overflow is cropped; zoom shrinks the window further, and the normalized
/// offsets slide it within the leftover slack.
pub fn cover_source_rect(image: &PreparedImage, canvas: Canvas, pose: &CameraPose) -> Rect {
    let img_w = f64::from(image.width);
    let img_h = f64::from(image.height);

    let mut src_w = img_w;
    let mut src_h = img_h;
    if image.aspect() > canvas.aspect() {
        src_w = src_h * canvas.aspect();
    } else {
        src_h = src_w / canvas.aspect();
    }
    src_w /= pose.zoom;
    src_h /= pose.zoom;

    let x0 = (img_w - src_w) * (0.5 + pose.offset_x);
    let y0 = (img_h - src_h) * (0.5 + pose.offset_y);
    Rect::new(x0, y0, x0 + src_w, y0 + src_h)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/background.rs"]
mod tests;
