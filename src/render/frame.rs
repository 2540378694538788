use crate::assets::store::WATERMARK_KEY;
use crate::foundation::core::{Affine, Point, Rgba8};
use crate::render::plan::{DrawOp, FramePlan, TextOp};
use crate::scene::background::{cover_source_rect, resolve_background};
use crate::scene::overlay::{darken_op, overlay_ops};
use crate::scene::theme::FontSpec;
use crate::scene::watermark::{SIZE_DIVISOR, WATERMARK_OPACITY};
use crate::session::render_session::RenderSession;
use crate::text::layout::lyric_ops;
use crate::timeline::model::DEFAULT_SECTION;

/// Compute everything to draw at time `t`.
///
/// This is the engine's single frame entry point, shared by the live
/// transport and offline sweeps. Layer order is fixed: clear, background
/// cross-fade pair, theme overlay, darkening rectangle, glyph particles,
/// lyric text, watermark. The call also advances the session's per-frame
/// tracking state, so frames must be computed in the order they are
/// presented.
#[tracing::instrument(skip(session), level = "trace")]
pub fn render_frame(session: &mut RenderSession, t: f64, duration: f64) -> FramePlan {
    let RenderSession {
        theme,
        canvas,
        timeline,
        images,
        camera,
        background,
        particles,
        watermark,
        metrics,
        rng,
        tracking,
    } = session;
    let theme = *theme;
    let canvas = *canvas;

    let mut plan = FramePlan::new(canvas);
    plan.ops.push(DrawOp::Clear {
        color: Rgba8::BLACK,
    });

    let active_index = timeline.active_index(t);
    let active = active_index.map(|i| (i, timeline.entries()[i].clone()));
    let index_changed = active_index != tracking.last_active_index;

    // No active entry keeps the previous section on screen; before anything
    // has played the first entry's section (or "verse") stands in.
    let section = active
        .as_ref()
        .map(|(_, e)| e.section.clone())
        .or_else(|| tracking.last_section.clone())
        .or_else(|| timeline.first_section().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_SECTION.to_string());

    let section_progress = active
        .as_ref()
        .map(|(i, _)| timeline.section_progress(*i))
        .unwrap_or(0.0);

    let resolved = resolve_background(images, &section, section_progress);
    let fade = background.advance(t, &section, resolved);
    let pose = camera.pose(t, duration, theme);

    if let Some((key, image)) = &fade.old
        && fade.progress < 1.0
    {
        plan.ops.push(DrawOp::CoverImage {
            key: key.clone(),
            src: cover_source_rect(image, canvas, &pose),
            opacity: (1.0 - fade.progress) as f32,
        });
    }
    if let Some((key, image)) = &fade.new {
        if fade.progress > 0.0 {
            plan.ops.push(DrawOp::CoverImage {
                key: key.clone(),
                src: cover_source_rect(image, canvas, &pose),
                opacity: fade.progress as f32,
            });
        }
    } else {
        tracing::trace!(section = %section, "no background image loaded; layer skipped");
    }

    plan.ops.extend(overlay_ops(theme, t, canvas, rng));
    plan.ops.push(darken_op(canvas));

    if index_changed
        && let Some((_, entry)) = &active
        && let Some(glyph) = &entry.glyph
    {
        particles.spawn_burst(canvas, glyph, rng);
    }
    particles.advance(t);
    for p in particles.particles() {
        plan.ops.push(DrawOp::Text(TextOp {
            text: p.glyph.clone(),
            center_x: p.x,
            y: p.y,
            size_px: p.size,
            font: FontSpec::SANS,
            fill: Rgba8::WHITE,
            stroke: None,
            shadow: None,
            clip: None,
            transform: Affine::IDENTITY,
            opacity: p.opacity as f32,
        }));
    }

    if index_changed {
        tracking.intro_start = t;
    }
    if let Some((_, entry)) = &active {
        plan.ops.extend(lyric_ops(
            theme,
            entry,
            t,
            tracking.intro_start,
            canvas,
            metrics.as_ref(),
            rng,
        ));
    }

    if images.watermark().is_some() {
        let placement = watermark.placement();
        plan.ops.push(DrawOp::Sprite {
            key: WATERMARK_KEY.to_string(),
            center: Point::new(
                canvas.width_f() * placement.x_frac,
                canvas.height_f() * placement.y_frac,
            ),
            size: canvas.width_f() / SIZE_DIVISOR,
            rotation_deg: placement.angle_deg,
            opacity: WATERMARK_OPACITY,
        });
    }

    tracking.last_active_index = active_index;
    tracking.last_section = Some(section);

    plan
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
