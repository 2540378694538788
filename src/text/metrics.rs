use std::sync::Mutex;

use crate::foundation::error::{LyricframeError, LyricframeResult};

/// Font measurement seam used by the word-wrap pass.
///
/// The engine never rasterizes glyphs; it only needs advance widths to
/// decide where lines break and how wide the karaoke clip rectangles are.
/// The engine is single-threaded and frame-driven, so implementations need
/// no thread-safety bounds.
pub trait FontMetrics {
    /// Advance width in pixels of `text` rendered at `size_px`.
    fn text_width(&self, text: &str, size_px: f64) -> f64;
}

/// Deterministic metrics assigning every character a fixed em-fraction
/// advance. Used as the default when no font bytes are available, and by
/// tests that need exact wrap positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceMetrics {
    /// Advance per character as a fraction of the font size.
    pub advance_em: f64,
}

impl Default for FixedAdvanceMetrics {
    fn default() -> Self {
        Self { advance_em: 0.55 }
    }
}

impl FontMetrics for FixedAdvanceMetrics {
    fn text_width(&self, text: &str, size_px: f64) -> f64 {
        text.chars().count() as f64 * self.advance_em * size_px
    }
}

/// Brush placeholder for measurement-only layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct MeasureBrush;

struct ParleyContexts {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<MeasureBrush>,
}

/// Real font metrics backed by a Parley shaping pass over registered font
/// bytes.
pub struct ParleyMetrics {
    contexts: Mutex<ParleyContexts>,
    family_name: String,
}

impl ParleyMetrics {
    /// Register `font_bytes` and measure against its primary family.
    pub fn from_font_bytes(font_bytes: &[u8]) -> LyricframeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            LyricframeError::validation("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| LyricframeError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            contexts: Mutex::new(ParleyContexts {
                font_ctx,
                layout_ctx: parley::LayoutContext::new(),
            }),
            family_name,
        })
    }

    /// Family name resolved from the registered font bytes.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }
}

impl FontMetrics for ParleyMetrics {
    fn text_width(&self, text: &str, size_px: f64) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let mut guard = match self.contexts.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let ctx = &mut *guard;

        let mut builder = ctx
            .layout_ctx
            .ranged_builder(&mut ctx.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px as f32));

        let mut layout: parley::Layout<MeasureBrush> = builder.build(text);
        layout.break_all_lines(None);

        let mut width = 0.0f64;
        for line in layout.lines() {
            width = width.max(f64::from(line.metrics().advance));
        }
        width
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/metrics.rs"]
mod tests;
