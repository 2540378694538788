//! Lyricframe is a frame-accurate lyric video rendering engine.
//!
//! Given a timed lyric sequence, themed background images and an external
//! audio position, the engine deterministically computes every visual
//! element for a frame: background selection with cross-fades, a Ken-Burns
//! camera, themed overlay effects, karaoke text highlighting, glyph
//! particles and a wandering watermark.
//!
//! # Pipeline overview
//!
//! 1. **Session**: `SessionSpec + ImageStore -> RenderSession` (camera path
//!    and watermark sampled once, all per-frame tracking state owned here)
//! 2. **Frame**: `render_frame(&mut session, t, duration) -> FramePlan`
//!    (ordered, backend-agnostic draw ops for one instant)
//! 3. **Drive**: a [`Transport`] over a [`TimeSource`] for live playback, or
//!    [`render_sequence`] for a fixed-fps offline sweep
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Compute only**: the engine emits [`DrawOp`]s; rasterizing them is the
//!   consumer's concern. This keeps every animation system testable.
//! - **No IO on the tick path**: images decode into the [`ImageStore`] up
//!   front; a missing asset skips its layer instead of failing the frame.
//! - **Seek-stable**: camera and karaoke state are pure functions of the
//!   playback time, so random seeks reproduce frames exactly.
#![forbid(unsafe_code)]

pub mod assets;
pub mod foundation;
pub mod render;
pub mod scene;
pub mod session;
pub mod text;
pub mod timeline;
pub mod transport;

pub use assets::decode::decode_image;
pub use assets::store::{ImageStore, PreparedImage, WATERMARK_KEY};
pub use foundation::core::{
    Affine, AspectRatio, Canvas, Point, Rect, Rgba8, Shadow, Stroke, Vec2,
};
pub use foundation::error::{LyricframeError, LyricframeResult};
pub use foundation::math::Rng64;
pub use render::frame::render_frame;
pub use render::plan::{DrawOp, FramePlan, GradientStop, TextOp};
pub use render::sequence::render_sequence;
pub use scene::background::{
    BackgroundState, CrossFade, FADE_SECS, cover_source_rect, resolve_background,
    select_image_index,
};
pub use scene::camera::{CameraPath, CameraPose};
pub use scene::overlay::{DARKEN_OPACITY, darken_op, overlay_ops};
pub use scene::particles::{DecayMode, Particle, ParticleSystem};
pub use scene::theme::{FontSpec, TextStyle, Theme};
pub use scene::watermark::{WatermarkPlacement, WatermarkState};
pub use session::render_session::{RenderSession, SessionSpec};
pub use text::layout::{INTRO_SECS, lyric_ops, wrap_lines};
pub use text::metrics::{FixedAdvanceMetrics, FontMetrics, ParleyMetrics};
pub use timeline::model::{DEFAULT_SECTION, LyricEntry, Timeline, entries_from_json};
pub use transport::controller::{
    FrameLoop, ManualTimeSource, PlaybackState, TimeSource, Transport,
};
