use crate::foundation::error::{LyricframeError, LyricframeResult};
use crate::render::frame::render_frame;
use crate::render::plan::FramePlan;
use crate::session::render_session::RenderSession;

/// Sweep the session from `t = 0` to `duration` at a fixed frame rate,
/// handing each computed plan to `sink` in presentation order.
///
/// This is the shape an offline encoder drives: rasterize each plan, mux
/// with the audio track, done. Frames are strictly sequential because the
/// session carries cross-fade/intro/particle state between them.
pub fn render_sequence<F>(
    session: &mut RenderSession,
    duration: f64,
    fps: f64,
    mut sink: F,
) -> LyricframeResult<()>
where
    F: FnMut(f64, FramePlan),
{
    if !fps.is_finite() || fps <= 0.0 {
        return Err(LyricframeError::validation("fps must be finite and > 0"));
    }
    if !duration.is_finite() || duration < 0.0 {
        return Err(LyricframeError::validation(
            "duration must be finite and >= 0",
        ));
    }

    let frame_count = (duration * fps).ceil() as u64;
    tracing::debug!(frame_count, fps, "rendering frame sequence");
    for i in 0..frame_count {
        let t = i as f64 / fps;
        let plan = render_frame(session, t, duration);
        sink(t, plan);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/sequence.rs"]
mod tests;
