pub use kurbo::{Affine, Point, Rect, Vec2};

/// Output canvas in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn width_f(self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f(self) -> f64 {
        f64::from(self.height)
    }

    pub fn aspect(self) -> f64 {
        self.width_f() / self.height_f()
    }

    /// Full-canvas rectangle in pixel space.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width_f(), self.height_f())
    }

    pub fn center(self) -> Point {
        Point::new(self.width_f() / 2.0, self.height_f() / 2.0)
    }
}

/// Supported output aspect ratios, each bound to a fixed pixel canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AspectRatio {
    /// Landscape 16:9, rendered at 1280x720.
    #[serde(rename = "16:9")]
    Wide,
    /// Portrait 9:16, rendered at 720x1280.
    #[serde(rename = "9:16")]
    Tall,
}

impl AspectRatio {
    /// Pixel canvas for this aspect ratio.
    pub fn canvas(self) -> Canvas {
        match self {
            Self::Wide => Canvas {
                width: 1280,
                height: 720,
            },
            Self::Tall => Canvas {
                width: 720,
                height: 1280,
            },
        }
    }
}

impl std::str::FromStr for AspectRatio {
    type Err = crate::foundation::error::LyricframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "16:9" => Ok(Self::Wide),
            "9:16" => Ok(Self::Tall),
            other => Err(crate::foundation::error::LyricframeError::validation(
                format!("unknown aspect ratio '{other}'"),
            )),
        }
    }
}

/// Straight-alpha RGBA8 color.
///
/// Frame plans carry straight colors plus a separate layer opacity; painters
/// premultiply at composite time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with alpha given as a `[0, 1]` fraction.
    pub fn with_alpha_frac(self, alpha: f64) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }
}

/// Drop shadow applied behind text draws.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Shadow {
    pub color: Rgba8,
    pub blur: f64,
}

/// Outline stroke applied around text draws.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    pub color: Rgba8,
    pub width: f64,
}
