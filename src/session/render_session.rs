use std::sync::Arc;

use crate::assets::store::ImageStore;
use crate::foundation::core::{AspectRatio, Canvas};
use crate::foundation::error::{LyricframeError, LyricframeResult};
use crate::foundation::math::Rng64;
use crate::scene::background::BackgroundState;
use crate::scene::camera::CameraPath;
use crate::scene::particles::{DecayMode, ParticleSystem};
use crate::scene::theme::Theme;
use crate::scene::watermark::{WatermarkPlacement, WatermarkState};
use crate::text::metrics::{FixedAdvanceMetrics, FontMetrics};
use crate::timeline::model::{LyricEntry, Timeline};

/// Inputs for a new render session.
#[derive(Clone, Debug)]
pub struct SessionSpec {
    pub lyrics: Vec<LyricEntry>,
    pub theme: Theme,
    pub aspect: AspectRatio,
    /// Seed for the session RNG (camera path, watermark placement, effect
    /// randomness). Identical seeds replay identical plans; pass entropy for
    /// run-to-run variety.
    pub seed: u64,
    pub particle_decay: DecayMode,
}

impl SessionSpec {
    pub fn new(lyrics: Vec<LyricEntry>, theme: Theme, aspect: AspectRatio) -> Self {
        Self {
            lyrics,
            theme,
            aspect,
            seed: 0,
            particle_decay: DecayMode::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Per-frame tracking state carried between ticks.
#[derive(Clone, Debug)]
pub(crate) struct FrameTracking {
    pub last_active_index: Option<usize>,
    pub last_section: Option<String>,
    pub intro_start: f64,
}

/// One complete rendering configuration: lyrics, images, theme, aspect
/// ratio, the session-scoped camera path and watermark, and all transient
/// per-frame state.
///
/// Created once a finished, timed lyric set and its images are available;
/// dropping the session releases every held asset. All mutation happens on
/// the tick path (single writer); timing edits land between ticks via
/// [`RenderSession::replace_lyrics`].
pub struct RenderSession {
    pub(crate) theme: Theme,
    pub(crate) canvas: Canvas,
    pub(crate) timeline: Timeline,
    pub(crate) images: ImageStore,
    pub(crate) camera: CameraPath,
    pub(crate) background: BackgroundState,
    pub(crate) particles: ParticleSystem,
    pub(crate) watermark: WatermarkState,
    pub(crate) metrics: Arc<dyn FontMetrics>,
    pub(crate) rng: Rng64,
    pub(crate) tracking: FrameTracking,
}

impl RenderSession {
    /// Build a session with the default fixed-advance font metrics.
    pub fn new(spec: SessionSpec, images: ImageStore) -> LyricframeResult<Self> {
        Self::with_metrics(spec, images, Arc::new(FixedAdvanceMetrics::default()))
    }

    /// Build a session measuring text through the given metrics
    /// implementation (typically [`crate::text::metrics::ParleyMetrics`]
    /// over the theme's font bytes).
    pub fn with_metrics(
        spec: SessionSpec,
        images: ImageStore,
        metrics: Arc<dyn FontMetrics>,
    ) -> LyricframeResult<Self> {
        validate_entries(&spec.lyrics)?;

        let mut rng = Rng64::new(spec.seed);
        let camera = CameraPath::sample(&mut rng);
        let watermark = WatermarkState::new(&mut rng);

        tracing::debug!(
            theme = %spec.theme,
            entries = spec.lyrics.len(),
            images = images.len(),
            "creating render session"
        );

        Ok(Self {
            theme: spec.theme,
            canvas: spec.aspect.canvas(),
            timeline: Timeline::new(spec.lyrics),
            images,
            camera,
            background: BackgroundState::new(),
            particles: ParticleSystem::with_decay(spec.particle_decay),
            watermark,
            metrics,
            rng,
            tracking: FrameTracking {
                last_active_index: None,
                last_section: None,
                intro_start: 0.0,
            },
        })
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Replace the lyric timing data. Must be called between ticks, never
    /// from inside a frame callback.
    pub fn replace_lyrics(&mut self, lyrics: Vec<LyricEntry>) -> LyricframeResult<()> {
        validate_entries(&lyrics)?;
        self.timeline.replace_entries(lyrics);
        self.tracking.last_active_index = None;
        Ok(())
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    /// Mutable image access for off-tick loading and invalidation.
    pub fn images_mut(&mut self) -> &mut ImageStore {
        &mut self.images
    }

    pub fn camera_path(&self) -> CameraPath {
        self.camera
    }

    pub fn watermark_placement(&self) -> WatermarkPlacement {
        self.watermark.placement()
    }

    /// Live particle count, mostly useful for diagnostics.
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// User-triggered watermark move; `now` is the driving loop's
    /// wall-clock so the periodic refresh restarts from here.
    pub fn move_watermark(&mut self, now: f64) {
        self.watermark.refresh(&mut self.rng, now);
    }

    /// Periodic watermark refresh, called by the transport each tick.
    pub fn refresh_watermark_if_due(&mut self, now: f64) -> bool {
        self.watermark.refresh_if_due(&mut self.rng, now)
    }
}

fn validate_entries(entries: &[LyricEntry]) -> LyricframeResult<()> {
    for (i, e) in entries.iter().enumerate() {
        if !e.start_time.is_finite() || !e.end_time.is_finite() {
            return Err(LyricframeError::validation(format!(
                "lyric entry {i} has a non-finite time"
            )));
        }
        if e.start_time < 0.0 {
            return Err(LyricframeError::validation(format!(
                "lyric entry {i} starts before zero"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
