use crate::foundation::core::{Affine, Canvas, Rect, Rgba8};
use crate::foundation::math::{Rng64, clamp01, lerp};
use crate::render::plan::{DrawOp, TextOp};
use crate::scene::theme::Theme;
use crate::text::metrics::FontMetrics;
use crate::timeline::model::LyricEntry;

/// Length of the per-lyric intro animation in seconds.
pub const INTRO_SECS: f64 = 0.5;

/// Fraction of the canvas width available to a wrapped line.
pub const WRAP_WIDTH_FRAC: f64 = 0.9;

/// Greedy word wrap: words accumulate onto a line while the measured width
/// stays under `max_width`; a word that would overflow starts the next line.
/// Single words wider than `max_width` get a line of their own.
pub fn wrap_lines(
    text: &str,
    max_width: f64,
    size_px: f64,
    metrics: &dyn FontMetrics,
) -> Vec<String> {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    let mut current = first.to_string();
    for word in words {
        let candidate = format!("{current} {word}");
        if metrics.text_width(&candidate, size_px) < max_width {
            current = candidate;
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    lines.push(current);
    lines
}

struct IntroFx {
    alpha: f64,
    transform: Affine,
    ghost: bool,
}

const SETTLED: IntroFx = IntroFx {
    alpha: 1.0,
    transform: Affine::IDENTITY,
    ghost: false,
};

fn scale_about(cx: f64, cy: f64, scale: f64) -> Affine {
    Affine::translate((cx, cy)) * Affine::scale(scale) * Affine::translate((-cx, -cy))
}

fn intro_fx(
    theme: Theme,
    progress: f64,
    canvas: Canvas,
    block_y: f64,
    rng: &mut Rng64,
) -> IntroFx {
    if progress >= 1.0 {
        return SETTLED;
    }
    let cx = canvas.width_f() / 2.0;
    match theme {
        Theme::Rock => {
            let jitter = Affine::translate((rng.uniform(-4.0, 4.0), rng.uniform(-4.0, 4.0)));
            IntroFx {
                alpha: progress,
                transform: jitter * scale_about(cx, block_y, lerp(1.3, 1.0, progress)),
                ghost: false,
            }
        }
        Theme::Country => IntroFx {
            alpha: progress,
            transform: scale_about(cx, block_y, lerp(1.05, 1.0, progress)),
            ghost: false,
        },
        Theme::Chill => IntroFx {
            alpha: progress,
            transform: Affine::translate((0.0, lerp(30.0, 0.0, progress)))
                * scale_about(cx, block_y, lerp(0.9, 1.0, progress)),
            ghost: false,
        },
        Theme::Underground => IntroFx {
            // Hard cut: invisible for the first fifth, then fully on.
            alpha: if progress > 0.2 { 1.0 } else { 0.0 },
            transform: Affine::translate((rng.uniform(-5.0, 5.0), rng.uniform(-5.0, 5.0))),
            ghost: rng.chance(0.5),
        },
        Theme::Default => IntroFx {
            alpha: progress,
            transform: Affine::translate((0.0, lerp(20.0, 0.0, progress))),
            ghost: false,
        },
    }
}

/// Draw ops for the active lyric at time `t`: intro-animated base text plus
/// the karaoke highlight, clipped per wrapped line to `line_width *
/// lyric_progress`. All wrapped lines share one progress value.
pub fn lyric_ops(
    theme: Theme,
    entry: &LyricEntry,
    t: f64,
    intro_start: f64,
    canvas: Canvas,
    metrics: &dyn FontMetrics,
    rng: &mut Rng64,
) -> Vec<DrawOp> {
    let style = theme.text_style();
    let w = canvas.width_f();
    let h = canvas.height_f();
    let size_px = w / style.size_divisor;
    let line_height = (w / 20.0) * 1.2;

    let lines = wrap_lines(&entry.text, w * WRAP_WIDTH_FRAC, size_px, metrics);
    if lines.is_empty() {
        return Vec::new();
    }

    let total_height = lines.len() as f64 * line_height;
    let start_y = h / 2.0 - total_height / 2.0 + line_height / 2.0;
    let center_x = w / 2.0;

    let intro_progress = clamp01((t - intro_start) / INTRO_SECS);
    let fx = intro_fx(theme, intro_progress, canvas, start_y, rng);
    let lyric_progress = entry.progress_at(t);

    let mut ops = Vec::new();

    // Glitch ghost: the unwrapped text doubled in magenta, offset and drawn
    // at full opacity even while the main text is still cut to invisible.
    if fx.ghost {
        ops.push(DrawOp::Text(TextOp {
            text: entry.text.clone(),
            center_x: center_x + 5.0,
            y: start_y + 5.0,
            size_px,
            font: style.font,
            fill: Rgba8::rgb(0xFF, 0x00, 0xFF),
            stroke: None,
            shadow: None,
            clip: None,
            transform: fx.transform,
            opacity: 1.0,
        }));
    }

    if fx.alpha <= 0.0 {
        return ops;
    }

    for (i, line) in lines.iter().enumerate() {
        let y = start_y + i as f64 * line_height;

        ops.push(DrawOp::Text(TextOp {
            text: line.clone(),
            center_x,
            y,
            size_px,
            font: style.font,
            fill: style.base_fill,
            stroke: style.stroke,
            shadow: Some(style.base_shadow),
            clip: None,
            transform: fx.transform,
            opacity: fx.alpha as f32,
        }));

        if lyric_progress > 0.0 {
            let line_width = metrics.text_width(line, size_px);
            let x0 = center_x - line_width / 2.0;
            ops.push(DrawOp::Text(TextOp {
                text: line.clone(),
                center_x,
                y,
                size_px,
                font: style.font,
                fill: style.highlight_fill,
                stroke: style.stroke,
                shadow: Some(style.highlight_shadow),
                clip: Some(Rect::new(
                    x0,
                    y - line_height / 2.0,
                    x0 + line_width * lyric_progress,
                    y + line_height / 2.0,
                )),
                transform: fx.transform,
                opacity: fx.alpha as f32,
            }));
        }
    }

    ops
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
