use crate::foundation::core::{Rgba8, Shadow, Stroke};
use crate::foundation::error::LyricframeError;

/// Visual theme selecting fonts, palettes, overlay effects, camera jitter and
/// text intro animation for a session. Fixed enumeration; immutable once a
/// session starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Default,
    Rock,
    Country,
    Chill,
    Underground,
}

impl Theme {
    /// Every supported theme, in declaration order.
    pub const ALL: [Theme; 5] = [
        Theme::Default,
        Theme::Rock,
        Theme::Country,
        Theme::Chill,
        Theme::Underground,
    ];

    /// Font and color styling for lyric text under this theme.
    pub fn text_style(self) -> TextStyle {
        match self {
            // Underground reuses the default face; its identity comes from
            // the glitch overlay and intro, not typography.
            Theme::Default | Theme::Underground => TextStyle {
                font: FontSpec {
                    family: "Inter",
                    weight: 900,
                },
                size_divisor: 18.0,
                base_fill: Rgba8::WHITE,
                highlight_fill: Rgba8::rgb(0x00, 0xFF, 0xFF),
                base_shadow: Shadow {
                    color: Rgba8::BLACK,
                    blur: 10.0,
                },
                highlight_shadow: Shadow {
                    color: Rgba8::BLACK,
                    blur: 10.0,
                },
                stroke: None,
            },
            Theme::Rock => TextStyle {
                font: FontSpec {
                    family: "Impact",
                    weight: 900,
                },
                size_divisor: 14.0,
                base_fill: Rgba8::rgb(0xE0, 0xE0, 0xE0),
                highlight_fill: Rgba8::rgb(0xFF, 0x45, 0x00),
                base_shadow: Shadow {
                    color: Rgba8::BLACK,
                    blur: 15.0,
                },
                highlight_shadow: Shadow {
                    color: Rgba8::rgb(0xFF, 0x45, 0x00),
                    blur: 20.0,
                },
                stroke: Some(Stroke {
                    color: Rgba8::BLACK,
                    width: 2.0,
                }),
            },
            Theme::Country => TextStyle {
                font: FontSpec {
                    family: "Georgia",
                    weight: 800,
                },
                size_divisor: 16.0,
                base_fill: Rgba8::rgb(0xF5, 0xE6, 0xD3),
                highlight_fill: Rgba8::rgb(0xFF, 0xD7, 0x00),
                base_shadow: Shadow {
                    color: Rgba8::new(101, 67, 33, 204),
                    blur: 8.0,
                },
                highlight_shadow: Shadow {
                    color: Rgba8::new(255, 215, 0, 204),
                    blur: 15.0,
                },
                stroke: None,
            },
            Theme::Chill => TextStyle {
                font: FontSpec {
                    family: "Poppins",
                    weight: 300,
                },
                size_divisor: 18.0,
                base_fill: Rgba8::WHITE.with_alpha_frac(0.8),
                highlight_fill: Rgba8::rgb(0x87, 0xCE, 0xEB),
                base_shadow: Shadow {
                    color: Rgba8::BLACK.with_alpha_frac(0.3),
                    blur: 5.0,
                },
                highlight_shadow: Shadow {
                    color: Rgba8::new(135, 206, 235, 204),
                    blur: 12.0,
                },
                stroke: None,
            },
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = LyricframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Theme::Default),
            "rock" => Ok(Theme::Rock),
            "country" => Ok(Theme::Country),
            "chill" => Ok(Theme::Chill),
            "underground" => Ok(Theme::Underground),
            other => Err(LyricframeError::validation(format!(
                "unknown theme '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Theme::Default => "default",
            Theme::Rock => "rock",
            Theme::Country => "country",
            Theme::Chill => "chill",
            Theme::Underground => "underground",
        };
        f.write_str(name)
    }
}

/// Font face request. Resolution to an actual font is the painter's concern;
/// the engine only measures through the [`crate::text::FontMetrics`] seam.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FontSpec {
    pub family: &'static str,
    pub weight: u16,
}

impl FontSpec {
    /// Plain face used for non-lyric text such as glyph particles.
    pub const SANS: FontSpec = FontSpec {
        family: "sans-serif",
        weight: 400,
    };
}

/// Complete lyric text styling for one theme.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TextStyle {
    pub font: FontSpec,
    /// Font size is `canvas_width / size_divisor`.
    pub size_divisor: f64,
    pub base_fill: Rgba8,
    pub highlight_fill: Rgba8,
    pub base_shadow: Shadow,
    pub highlight_shadow: Shadow,
    pub stroke: Option<Stroke>,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/theme.rs"]
mod tests;
