use super::*;

#[test]
fn fixed_advance_scales_with_size_and_length() {
    let metrics = FixedAdvanceMetrics { advance_em: 0.5 };
    assert_eq!(metrics.text_width("abcd", 10.0), 20.0);
    assert_eq!(metrics.text_width("abcd", 20.0), 40.0);
    assert_eq!(metrics.text_width("", 20.0), 0.0);
}

#[test]
fn fixed_advance_counts_chars_not_bytes() {
    let metrics = FixedAdvanceMetrics { advance_em: 1.0 };
    // Multibyte characters still count as one advance each.
    assert_eq!(metrics.text_width("héé", 10.0), 30.0);
}

#[test]
fn parley_metrics_rejects_non_font_bytes() {
    assert!(ParleyMetrics::from_font_bytes(b"definitely not a font").is_err());
}
