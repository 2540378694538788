use std::{collections::HashMap, sync::Arc};

use crate::{LyricframeResult, assets::decode};

/// Reserved store key for the persistent watermark image.
pub const WATERMARK_KEY: &str = "watermark";

/// Prepared raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Shared cache of decoded background images keyed by `"{section}_{index}"`
/// (or a bare `"{section}"`), plus the reserved watermark slot.
///
/// The store is populated before or between frame ticks; the per-frame path
/// only reads it. Partial coverage per section is expected, and an empty
/// store is a valid "nothing to draw" state.
#[derive(Clone, Debug, Default)]
pub struct ImageStore {
    images: HashMap<String, Arc<PreparedImage>>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an already-decoded image under `key`, replacing any previous
    /// image for that key.
    pub fn insert(&mut self, key: impl Into<String>, image: PreparedImage) {
        self.images.insert(key.into(), Arc::new(image));
    }

    /// Decode encoded bytes and insert the result under `key`.
    pub fn insert_encoded(&mut self, key: impl Into<String>, bytes: &[u8]) -> LyricframeResult<()> {
        let image = decode::decode_image(bytes)?;
        self.insert(key, image);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<Arc<PreparedImage>> {
        self.images.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Sorted `"{section}_{index}"` keys available for a section. The bare
    /// `"{section}"` key does not count as an indexed image.
    pub fn section_keys(&self, section: &str) -> Vec<String> {
        let prefix = format!("{section}_");
        let mut keys: Vec<String> = self
            .images
            .keys()
            .filter(|k| k.starts_with(&prefix))
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    /// Resolve `key` with the section fallback chain: exact key, then the
    /// bare `"{section}"` key. Returns the key that actually resolved.
    pub fn resolve(&self, key: &str, section: &str) -> Option<(String, Arc<PreparedImage>)> {
        if let Some(img) = self.get(key) {
            return Some((key.to_string(), img));
        }
        self.get(section).map(|img| (section.to_string(), img))
    }

    /// The watermark image, if one has been loaded.
    pub fn watermark(&self) -> Option<Arc<PreparedImage>> {
        self.get(WATERMARK_KEY)
    }

    pub fn set_watermark(&mut self, image: PreparedImage) {
        self.insert(WATERMARK_KEY, image);
    }

    /// Drop every cached image. Used when the underlying image set changes
    /// and must be reloaded.
    pub fn clear(&mut self) {
        tracing::debug!(count = self.images.len(), "invalidating image store");
        self.images.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
