use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8, Shadow, Stroke};
use crate::scene::theme::FontSpec;

/// Color stop for gradient draws, offset in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba8,
}

/// A single text draw: one laid-out line, horizontally centered on
/// `center_x` and vertically centered on `y`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextOp {
    pub text: String,
    /// Horizontal center of the line in canvas pixels.
    pub center_x: f64,
    /// Vertical center of the line in canvas pixels.
    pub y: f64,
    pub size_px: f64,
    pub font: FontSpec,
    pub fill: Rgba8,
    pub stroke: Option<Stroke>,
    pub shadow: Option<Shadow>,
    /// Optional clip rectangle in canvas pixels, applied before `transform`.
    pub clip: Option<Rect>,
    /// Extra transform (intro animation); identity when the text is settled.
    pub transform: Affine,
    pub opacity: f32,
}

/// Backend-agnostic draw operation.
///
/// The engine only computes these; rasterizing them onto a canvas, GPU
/// surface or encoder frame is the consumer's concern. Coordinates are
/// canvas pixels, colors are straight-alpha, and `opacity` is a separate
/// layer multiplier.
#[derive(Clone, Debug, serde::Serialize)]
pub enum DrawOp {
    /// Fill the whole canvas with a solid color.
    Clear { color: Rgba8 },
    /// Draw the image region `src` scaled to cover the full canvas. Camera
    /// drift can push `src` slightly past the image bounds; painters clamp
    /// at the edge.
    CoverImage {
        key: String,
        src: Rect,
        opacity: f32,
    },
    FillRect {
        rect: Rect,
        color: Rgba8,
        opacity: f32,
    },
    LinearGradient {
        rect: Rect,
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
        opacity: f32,
    },
    RadialGradient {
        center: Point,
        radius: f64,
        stops: Vec<GradientStop>,
        opacity: f32,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Rgba8,
        opacity: f32,
    },
    Polyline {
        points: Vec<Point>,
        color: Rgba8,
        width: f64,
        /// Optional glow halo around the stroke.
        glow: Option<Shadow>,
        opacity: f32,
    },
    /// Scatter `count` single-pixel specks of random color across the
    /// canvas, derived from `seed`. Emitted as one op so plans stay
    /// proportional to scene elements rather than pixels.
    Noise { seed: u64, count: u32, opacity: f32 },
    Text(TextOp),
    /// Draw an image centered on `center`, scaled to `size` pixels wide and
    /// rotated about its own center.
    Sprite {
        key: String,
        center: Point,
        size: f64,
        rotation_deg: f64,
        opacity: f32,
    },
}

/// Everything to draw for one frame, in back-to-front order.
#[derive(Clone, Debug, serde::Serialize)]
pub struct FramePlan {
    pub canvas: Canvas,
    pub ops: Vec<DrawOp>,
}

impl FramePlan {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            ops: Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
