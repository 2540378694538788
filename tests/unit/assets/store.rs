use std::sync::Arc;

use super::*;

fn img(w: u32, h: u32) -> PreparedImage {
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(vec![0u8; (w * h * 4) as usize]),
    }
}

#[test]
fn section_keys_are_sorted_and_prefix_scoped() {
    let mut store = ImageStore::new();
    store.insert("chorus_1", img(2, 2));
    store.insert("chorus_0", img(2, 2));
    store.insert("chorus", img(2, 2));
    store.insert("verse_0", img(2, 2));

    assert_eq!(store.section_keys("chorus"), ["chorus_0", "chorus_1"]);
    assert_eq!(store.section_keys("bridge"), Vec::<String>::new());
}

#[test]
fn resolve_falls_back_to_bare_section_key() {
    let mut store = ImageStore::new();
    store.insert("verse", img(4, 4));

    let (key, _) = store.resolve("verse_0", "verse").unwrap();
    assert_eq!(key, "verse");
    assert!(store.resolve("chorus_0", "chorus").is_none());
}

#[test]
fn resolve_prefers_exact_key() {
    let mut store = ImageStore::new();
    store.insert("verse", img(4, 4));
    store.insert("verse_1", img(8, 8));

    let (key, image) = store.resolve("verse_1", "verse").unwrap();
    assert_eq!(key, "verse_1");
    assert_eq!(image.width, 8);
}

#[test]
fn watermark_uses_reserved_slot() {
    let mut store = ImageStore::new();
    assert!(store.watermark().is_none());
    store.set_watermark(img(16, 16));
    assert_eq!(store.watermark().unwrap().width, 16);
    // Reserved key is not an indexed section image.
    assert!(store.section_keys(WATERMARK_KEY).is_empty());
}

#[test]
fn clear_invalidates_everything() {
    let mut store = ImageStore::new();
    store.insert("verse_0", img(2, 2));
    store.set_watermark(img(2, 2));
    store.clear();
    assert!(store.is_empty());
    assert!(store.watermark().is_none());
}
