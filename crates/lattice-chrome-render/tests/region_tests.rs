//! Integration tests for regions, masks and color serialization.

use lattice_chrome_render::{AlphaMask, Color, Rect, Region, Size};
use serde::{Deserialize, Serialize};

#[test]
fn test_title_bar_drag_band_with_islands() {
    // Title bar 800x30 with a button cluster and a search box island.
    let band = Region::from_rect(Rect::new(0, 0, 800, 30));
    let islands: Region = [Rect::new(692, 0, 108, 30), Rect::new(300, 4, 200, 22)]
        .into_iter()
        .collect();

    let drag = band.subtracted(&islands);

    assert!(drag.contains_xy(10, 10));
    assert!(drag.contains_xy(400, 2));
    assert!(!drag.contains_xy(400, 10));
    assert!(!drag.contains_xy(799, 0));
    assert_eq!(drag.area(), 800 * 30 - 108 * 30 - 200 * 22);

    // Putting the islands back restores the band exactly.
    assert_eq!(drag.united(&islands), band);
}

#[test]
fn test_region_operations_are_idempotent() {
    let a: Region = [Rect::new(0, 0, 50, 20), Rect::new(40, 10, 30, 30)]
        .into_iter()
        .collect();

    assert_eq!(a.united(&a), a);
    assert_eq!(a.intersected(&a), a);
    assert!(a.subtracted(&a).is_empty());
    assert_eq!(a.translated(7, -3).translated(-7, 3), a);
}

#[test]
fn test_rounded_mask_region_symmetry() {
    let mask = AlphaMask::rounded_rect(Size::new(120, 80), 1, 8.0);
    let region = mask.to_region(128);

    for (x, y) in [(1, 1), (118, 1), (1, 78), (118, 78)] {
        assert!(!region.contains_xy(x, y), "corner ({x}, {y}) should be clipped");
    }
    assert_eq!(mask.coverage(3, 3), mask.coverage(116, 76));
    assert_eq!(mask.coverage(3, 76), mask.coverage(116, 3));
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Theme {
    accent: Color,
    background: Option<Color>,
}

#[test]
fn test_color_toml_round_trip() {
    let theme = Theme {
        accent: Color::rgb(24, 131, 215),
        background: Some(Color::rgba(0, 0, 0, 0)),
    };

    let text = toml::to_string(&theme).unwrap();
    assert!(text.contains("accent = \"#1883d7\""));
    assert!(text.contains("background = \"#00000000\""));

    let parsed: Theme = toml::from_str(&text).unwrap();
    assert_eq!(parsed, theme);
}

#[test]
fn test_color_rejects_bad_hex() {
    let err = toml::from_str::<Theme>("accent = \"#12\"").unwrap_err();
    assert!(err.to_string().contains("invalid color"));
}
