use crate::foundation::core::{Canvas, Point, Rect, Rgba8, Shadow};
use crate::foundation::math::{Rng64, hsl_to_rgba8};
use crate::render::plan::{DrawOp, GradientStop};
use crate::scene::theme::Theme;

/// Opacity of the flat black rectangle that darkens every frame after the
/// theme overlay pass.
pub const DARKEN_OPACITY: f32 = 0.4;

/// Per-theme overlay pass: stochastic atmosphere drawn between the
/// background cross-fade and the darkening rectangle.
///
/// Stateless per frame; all appearance randomness comes from the session RNG
/// handed in by the tick.
pub fn overlay_ops(theme: Theme, t: f64, canvas: Canvas, rng: &mut Rng64) -> Vec<DrawOp> {
    match theme {
        Theme::Default => Vec::new(),
        Theme::Rock => rock_ops(canvas, rng),
        Theme::Country => country_ops(t, canvas),
        Theme::Chill => chill_ops(t, canvas),
        Theme::Underground => underground_ops(canvas, rng),
    }
}

/// Uniform darkening rectangle applied to every theme, every frame.
pub fn darken_op(canvas: Canvas) -> DrawOp {
    DrawOp::FillRect {
        rect: canvas.bounds(),
        color: Rgba8::BLACK,
        opacity: DARKEN_OPACITY,
    }
}

const LIGHTNING_CHANCE: f64 = 0.08;
const LIGHTNING_SEGMENTS: usize = 5;
const SPARK_COUNT: usize = 15;

fn rock_ops(canvas: Canvas, rng: &mut Rng64) -> Vec<DrawOp> {
    let (w, h) = (canvas.width_f(), canvas.height_f());
    let mut ops = Vec::new();

    if rng.chance(LIGHTNING_CHANCE) {
        let start_x = rng.uniform(0.0, w);
        let mut points = vec![Point::new(start_x, 0.0)];
        for i in 0..LIGHTNING_SEGMENTS {
            points.push(Point::new(
                start_x + rng.uniform(-50.0, 50.0),
                (i + 1) as f64 * h / LIGHTNING_SEGMENTS as f64,
            ));
        }
        ops.push(DrawOp::Polyline {
            points,
            color: Rgba8::rgb(0xFF, 0xFF, 0x00),
            width: 3.0,
            glow: Some(Shadow {
                color: Rgba8::rgb(0xFF, 0xFF, 0x00),
                blur: 10.0,
            }),
            opacity: 0.4,
        });
    }

    for _ in 0..SPARK_COUNT {
        let color = if rng.chance(0.5) {
            Rgba8::rgb(0xFF, 0x45, 0x00)
        } else {
            Rgba8::rgb(0xFF, 0xFF, 0x00)
        };
        ops.push(DrawOp::Circle {
            center: Point::new(rng.uniform(0.0, w), rng.uniform(0.0, h)),
            radius: rng.uniform(1.0, 4.0),
            color,
            opacity: 0.2,
        });
    }

    ops
}

const DUST_COUNT: usize = 20;

fn country_ops(t: f64, canvas: Canvas) -> Vec<DrawOp> {
    let (w, h) = (canvas.width_f(), canvas.height_f());
    let mut ops = Vec::with_capacity(DUST_COUNT + 1);

    // Dust motes orbit on slow sinusoids; position is a pure function of t.
    for i in 0..DUST_COUNT {
        let phase = i as f64;
        ops.push(DrawOp::Circle {
            center: Point::new(
                ((t * 0.1 + phase).sin() * 0.3 + 0.5) * w,
                ((t * 0.08 + phase * 0.5).cos() * 0.4 + 0.5) * h,
            ),
            radius: (t * 0.2 + phase).sin() * 2.0 + 3.0,
            color: Rgba8::new(255, 220, 180, 153),
            opacity: 0.1,
        });
    }

    ops.push(DrawOp::RadialGradient {
        center: canvas.center(),
        radius: w.max(h) / 2.0,
        stops: vec![
            GradientStop {
                offset: 0.0,
                color: Rgba8::new(0, 0, 0, 0),
            },
            GradientStop {
                offset: 1.0,
                color: Rgba8::new(101, 67, 33, 38),
            },
        ],
        opacity: 1.0,
    });

    ops
}

const FLOAT_COUNT: usize = 25;

fn chill_ops(t: f64, canvas: Canvas) -> Vec<DrawOp> {
    let (w, h) = (canvas.width_f(), canvas.height_f());
    let mut ops = Vec::with_capacity(FLOAT_COUNT + 1);

    for i in 0..FLOAT_COUNT {
        let phase = i as f64;
        let hue = (t * 10.0 + phase * 30.0) % 360.0;
        ops.push(DrawOp::Circle {
            center: Point::new(
                ((t * 0.05 + phase).sin() * 0.4 + 0.5) * w,
                ((t * 0.03 + phase * 0.7).cos() * 0.3 + 0.5) * h,
            ),
            radius: (t * 0.1 + phase).sin() * 4.0 + 6.0,
            color: hsl_to_rgba8(hue, 0.6, 0.8, 0.3),
            opacity: 0.08,
        });
    }

    ops.push(DrawOp::LinearGradient {
        rect: canvas.bounds(),
        start: Point::new(0.0, 0.0),
        end: Point::new(w, h),
        stops: vec![
            GradientStop {
                offset: 0.0,
                color: Rgba8::new(173, 216, 230, 13),
            },
            GradientStop {
                offset: 1.0,
                color: Rgba8::new(255, 182, 193, 13),
            },
        ],
        opacity: 1.0,
    });

    ops
}

const VHS_LINE_COUNT: usize = 8;
const NOISE_COUNT: u32 = 3000;
const GLITCH_CHANCE: f64 = 0.05;

fn underground_ops(canvas: Canvas, rng: &mut Rng64) -> Vec<DrawOp> {
    let (w, h) = (canvas.width_f(), canvas.height_f());
    let mut ops = Vec::new();

    for _ in 0..VHS_LINE_COUNT {
        let y = rng.uniform(0.0, h);
        let height = rng.uniform(1.0, 4.0);
        let color = if rng.chance(0.5) {
            Rgba8::rgb(0xFF, 0x00, 0xFF)
        } else {
            Rgba8::rgb(0x00, 0xFF, 0xFF)
        };
        ops.push(DrawOp::FillRect {
            rect: Rect::new(0.0, y, w, y + height),
            color,
            opacity: 0.15,
        });
    }

    ops.push(DrawOp::Noise {
        seed: rng.next_u64(),
        count: NOISE_COUNT,
        opacity: 0.08,
    });

    if rng.chance(GLITCH_CHANCE) {
        let y = rng.uniform(0.0, h);
        ops.push(DrawOp::FillRect {
            rect: Rect::new(0.0, y, w, y + 2.0),
            color: Rgba8::rgb(0xFF, 0x00, 0xFF),
            opacity: 0.3,
        });
    }

    ops
}

#[cfg(test)]
#[path = "../../tests/unit/scene/overlay.rs"]
mod tests;
