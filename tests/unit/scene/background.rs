use super::*;

fn img(w: u32, h: u32) -> PreparedImage {
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(vec![0u8; (w * h * 4) as usize]),
    }
}

fn store_with(keys: &[&str]) -> ImageStore {
    let mut store = ImageStore::new();
    for key in keys {
        store.insert(*key, img(1920, 1080));
    }
    store
}

#[test]
fn chorus_uses_three_way_split() {
    assert_eq!(select_image_index("chorus", 0.2, 3), 0);
    assert_eq!(select_image_index("chorus", 0.5, 3), 1);
    assert_eq!(select_image_index("chorus", 0.9, 3), 2);
}

#[test]
fn other_sections_split_at_midpoint() {
    assert_eq!(select_image_index("verse", 0.49, 2), 0);
    assert_eq!(select_image_index("verse", 0.5, 2), 1);
    assert_eq!(select_image_index("bridge", 0.99, 2), 1);
}

#[test]
fn index_clamps_to_available() {
    assert_eq!(select_image_index("chorus", 0.9, 2), 1);
    assert_eq!(select_image_index("verse", 0.9, 1), 0);
    assert_eq!(select_image_index("verse", 0.9, 0), 0);
}

#[test]
fn resolve_walks_fallback_chain() {
    let store = store_with(&["verse_0", "verse_1", "chorus"]);

    let (key, _) = resolve_background(&store, "verse", 0.9).unwrap();
    assert_eq!(key, "verse_1");

    // No indexed chorus images: bare section key wins.
    let (key, _) = resolve_background(&store, "chorus", 0.1).unwrap();
    assert_eq!(key, "chorus");

    assert!(resolve_background(&store, "bridge", 0.0).is_none());
}

#[test]
fn first_image_skips_the_fade() {
    let store = store_with(&["verse_0"]);
    let mut state = BackgroundState::new();

    let fade = state.advance(0.0, "verse", resolve_background(&store, "verse", 0.0));
    assert!(fade.old.is_none());
    assert_eq!(fade.progress, 1.0);
    assert_eq!(fade.new.as_ref().unwrap().0, "verse_0");
}

#[test]
fn key_change_restarts_fade_and_opacities_complement() {
    let store = store_with(&["verse_0", "chorus_0"]);
    let mut state = BackgroundState::new();

    state.advance(0.0, "verse", resolve_background(&store, "verse", 0.0));
    let fade = state.advance(5.0, "chorus", resolve_background(&store, "chorus", 0.0));

    // At the transition start the pair still sums to full opacity.
    assert_eq!(fade.progress, 0.0);
    assert_eq!(fade.old.as_ref().unwrap().0, "verse_0");
    assert_eq!(fade.new.as_ref().unwrap().0, "chorus_0");

    let fade = state.advance(5.5, "chorus", resolve_background(&store, "chorus", 0.0));
    assert!((fade.progress - 0.5).abs() < 1e-9);

    let fade = state.advance(6.0, "chorus", resolve_background(&store, "chorus", 0.0));
    assert_eq!(fade.progress, 1.0);
    assert!(fade.old.is_none());
}

#[test]
fn same_key_does_not_retrigger() {
    let store = store_with(&["verse_0"]);
    let mut state = BackgroundState::new();

    state.advance(0.0, "verse", resolve_background(&store, "verse", 0.0));
    let fade = state.advance(30.0, "verse", resolve_background(&store, "verse", 0.2));
    assert_eq!(fade.progress, 1.0);
    assert!(fade.old.is_none());
}

#[test]
fn missing_resolution_keeps_previous_image() {
    let store = store_with(&["verse_0"]);
    let mut state = BackgroundState::new();

    state.advance(0.0, "verse", resolve_background(&store, "verse", 0.0));
    // Section with no loaded image: keep drawing what we had.
    let fade = state.advance(10.0, "bridge", resolve_background(&store, "bridge", 0.0));
    assert_eq!(fade.new.as_ref().unwrap().0, "verse_0");
}

#[test]
fn backward_seek_settles_instead_of_blanking() {
    let store = store_with(&["verse_0"]);
    let mut state = BackgroundState::new();

    state.advance(80.0, "verse", resolve_background(&store, "verse", 0.0));
    let fade = state.advance(10.0, "verse", resolve_background(&store, "verse", 0.0));
    assert_eq!(fade.progress, 1.0);
    assert_eq!(fade.new.as_ref().unwrap().0, "verse_0");
}

#[test]
fn empty_store_draws_nothing() {
    let store = ImageStore::new();
    let mut state = BackgroundState::new();
    let fade = state.advance(0.0, "verse", resolve_background(&store, "verse", 0.0));
    assert!(fade.old.is_none());
    assert!(fade.new.is_none());
}

#[test]
fn cover_fit_crops_the_wider_dimension() {
    let canvas = Canvas {
        width: 1280,
        height: 720,
    };
    let pose = CameraPose {
        zoom: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    // Wider than 16:9: horizontal crop, full height.
    let wide = img(4000, 1000);
    let src = cover_source_rect(&wide, canvas, &pose);
    assert!((src.height() - 1000.0).abs() < 1e-9);
    assert!((src.width() - 1000.0 * canvas.aspect()).abs() < 1e-9);
    // Centered.
    assert!((src.x0 - (4000.0 - src.width()) / 2.0).abs() < 1e-9);

    // Taller than 16:9: vertical crop, full width.
    let tall = img(1000, 4000);
    let src = cover_source_rect(&tall, canvas, &pose);
    assert!((src.width() - 1000.0).abs() < 1e-9);
}

#[test]
fn zoom_shrinks_source_window_and_stays_in_bounds() {
    let canvas = Canvas {
        width: 1280,
        height: 720,
    };
    let image = img(1920, 1080);
    let pose = CameraPose {
        zoom: 1.15,
        offset_x: 0.25,
        offset_y: -0.25,
    };
    let src = cover_source_rect(&image, canvas, &pose);
    assert!((src.width() - 1920.0 / 1.15).abs() < 1e-9);
    assert!(src.x0 >= 0.0 && src.x1 <= 1920.0);
    assert!(src.y0 >= 0.0 && src.y1 <= 1080.0);
}
