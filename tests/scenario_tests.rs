//! Scenario replay tests
//!
//! Loads the scenarios under `demos/` and checks what the layout reports at
//! each scripted offset.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use std::path::PathBuf;

use common::{count, find};
use sticky_split::{
    ElementKind, FrameSnapshot, HorizontalSide, IndexPath, LayoutError, ResolvedLayoutMode,
    Scenario, Size,
};

fn demo(name: &str) -> Scenario {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join(name);
    Scenario::from_path(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

fn at(snapshots: &[FrameSnapshot], y: f32) -> &FrameSnapshot {
    snapshots
        .iter()
        .find(|s| s.offset.y == y)
        .unwrap_or_else(|| panic!("no snapshot at offset {y}"))
}

// =============================================================================
// PROFILE SCREEN
// =============================================================================

#[test]
fn test_avatar_slide_is_vertical_throughout() {
    let snapshots = demo("avatar_slide.json").run();
    assert_eq!(snapshots.len(), 6);
    for snapshot in &snapshots {
        assert_eq!(snapshot.mode, ResolvedLayoutMode::Vertical);
        // 480 + 912 + 1488 of sections under a 280pt main header.
        assert_eq!(snapshot.content_size, Size::new(375.0, 3160.0));
        assert_eq!(count(&snapshot.attributes, ElementKind::MainHeader), 1);
    }
}

#[test]
fn test_avatar_slide_main_header_stretches_then_collapses() {
    let snapshots = demo("avatar_slide.json").run();

    let rest = find(&at(&snapshots, -44.0).attributes, ElementKind::MainHeader, IndexPath::section(0));
    assert_eq!(rest.frame.y, 0.0);
    assert_eq!(rest.frame.height, 280.0);

    let pulled = find(&at(&snapshots, -144.0).attributes, ElementKind::MainHeader, IndexPath::section(0));
    assert_eq!(pulled.frame.y, -100.0);
    assert_eq!(pulled.frame.height, 380.0);

    let collapsed = find(&at(&snapshots, 400.0).attributes, ElementKind::MainHeader, IndexPath::section(0));
    assert_eq!(collapsed.frame.y, 444.0);
    assert_eq!(collapsed.frame.height, 88.0);
    assert_eq!(collapsed.z_index, 2000);
}

#[test]
fn test_avatar_slide_section_header_tucks_under_collapsed_main_header() {
    let snapshots = demo("avatar_slide.json").run();
    let snapshot = at(&snapshots, 400.0);
    let main = find(&snapshot.attributes, ElementKind::MainHeader, IndexPath::section(0));
    let header = find(&snapshot.attributes, ElementKind::SectionHeader, IndexPath::section(0));
    assert_eq!(header.frame.y, main.frame.bottom());
}

// =============================================================================
// PLAYLIST (SPLIT RIGHT)
// =============================================================================

#[test]
fn test_media_playlist_splits_right() {
    let snapshots = demo("media_playlist.json").run();
    for snapshot in &snapshots {
        assert_eq!(
            snapshot.mode,
            ResolvedLayoutMode::Horizontal(HorizontalSide::Right)
        );
        // Three 150pt columns fit beside the 360pt header.
        assert_eq!(snapshot.content_size, Size::new(664.0, 3220.0));

        let main = find(&snapshot.attributes, ElementKind::MainHeader, IndexPath::section(0));
        assert_eq!(main.frame.x, 664.0);
        assert_eq!(main.z_index, 1023);
    }
}

#[test]
fn test_media_playlist_overscroll_grows_header() {
    let snapshots = demo("media_playlist.json").run();
    let main = find(&at(&snapshots, -120.0).attributes, ElementKind::MainHeader, IndexPath::section(0));
    assert_eq!(main.frame.y, -120.0);
    assert_eq!(main.frame.height, 888.0);
}

#[test]
fn test_media_playlist_zero_footer_override_is_absent() {
    let snapshots = demo("media_playlist.json").run();
    for snapshot in &snapshots {
        assert!(snapshot
            .attributes
            .iter()
            .all(|a| !(a.kind == ElementKind::SectionFooter && a.index_path.section == 2)));
    }
    // Section 2 is on screen at 1600 along with its header.
    find(
        &at(&snapshots, 1600.0).attributes,
        ElementKind::SectionHeader,
        IndexPath::section(2),
    );
}

// =============================================================================
// USER PROFILE (VERTICAL ENFORCED, PINNED ABOVE ALL)
// =============================================================================

#[test]
fn test_user_profile_stays_vertical_in_landscape() {
    let snapshots = demo("user_profile.json").run();
    assert_eq!(snapshots.len(), 4);
    for snapshot in &snapshots {
        assert_eq!(snapshot.mode, ResolvedLayoutMode::Vertical);
        // 200 of header, a 40pt section header and ten 120pt rows.
        assert_eq!(snapshot.content_size, Size::new(667.0, 1440.0));
        let main = find(&snapshot.attributes, ElementKind::MainHeader, IndexPath::section(0));
        assert_eq!(main.frame.x, 0.0);
        assert_eq!(main.z_index, 2000);
    }
}

#[test]
fn test_user_profile_header_pins_at_full_height() {
    let snapshots = demo("user_profile.json").run();

    let pulled = find(&at(&snapshots, -80.0).attributes, ElementKind::MainHeader, IndexPath::section(0));
    assert_eq!(pulled.frame.y, -80.0);
    assert_eq!(pulled.frame.height, 280.0);

    for y in [0.0, 300.0, 1000.0] {
        let snapshot = at(&snapshots, y);
        let main = find(&snapshot.attributes, ElementKind::MainHeader, IndexPath::section(0));
        assert_eq!(main.frame.y, y);
        assert_eq!(main.frame.height, 200.0);

        // The section header sits under the pinned main header once scrolled.
        let header = find(&snapshot.attributes, ElementKind::SectionHeader, IndexPath::section(0));
        assert_eq!(header.frame.y, main.frame.bottom());
    }
}

// =============================================================================
// SIMPLE PARALLAX (UNPINNED MAIN HEADER)
// =============================================================================

#[test]
fn test_simple_parallax_header_scrolls_away() {
    let snapshots = demo("simple_parallax.json").run();
    for snapshot in &snapshots {
        assert_eq!(snapshot.mode, ResolvedLayoutMode::Vertical);
        assert_eq!(snapshot.content_size, Size::new(375.0, 2475.0));
    }

    let pulled = find(&at(&snapshots, -100.0).attributes, ElementKind::MainHeader, IndexPath::section(0));
    assert_eq!(pulled.frame.y, -100.0);
    assert_eq!(pulled.frame.height, 475.0);
    assert_eq!(pulled.z_index, -1024);

    let rest = find(&at(&snapshots, 0.0).attributes, ElementKind::MainHeader, IndexPath::section(0));
    assert_eq!(rest.frame.height, 375.0);

    for y in [200.0, 1500.0] {
        assert_eq!(count(&at(&snapshots, y).attributes, ElementKind::MainHeader), 0);
    }
}

#[test]
fn test_simple_parallax_section_headers_hand_over() {
    let snapshots = demo("simple_parallax.json").run();

    // Still below the visible top: the header keeps its natural position.
    let header = find(&at(&snapshots, 200.0).attributes, ElementKind::SectionHeader, IndexPath::section(0));
    assert_eq!(header.frame.y, 375.0);

    // Only the second section is in view and its header holds the top edge.
    let deep = &at(&snapshots, 1500.0).attributes;
    assert_eq!(count(deep, ElementKind::SectionHeader), 1);
    let header = find(deep, ElementKind::SectionHeader, IndexPath::section(1));
    assert_eq!(header.frame.y, 1500.0);
}

// =============================================================================
// SERIALIZATION AND ERRORS
// =============================================================================

#[test]
fn test_snapshots_serialize_with_camel_case_keys() {
    let snapshots = demo("media_playlist.json").run();
    let json = serde_json::to_value(&snapshots[1]).unwrap();
    assert!(json.get("contentSize").is_some());
    let first = &json["attributes"][0];
    assert!(first.get("indexPath").is_some());
    assert!(first.get("zIndex").is_some());
}

#[test]
fn test_unknown_field_types_are_json_errors() {
    let err = Scenario::from_json(r#"{"offsets": "not a list"}"#).unwrap_err();
    assert!(matches!(err, LayoutError::Json(_)));
}

#[test]
fn test_negative_item_size_is_rejected() {
    let err = Scenario::from_json(
        r#"{"config": {"flow": {"itemSize": {"width": -1, "height": 10}}}}"#,
    )
    .unwrap_err();
    let LayoutError::InvalidConfig(message) = err else {
        panic!("expected InvalidConfig, got {err:?}");
    };
    assert!(message.contains("flow.itemSize"));
}

#[test]
fn test_negative_section_sizes_are_rejected() {
    let err = Scenario::from_json(
        r#"{
            "sections": [
                {"items": 3},
                {"items": 2, "headerSize": {"width": 0, "height": -50}, "itemSize": {"width": -10, "height": -20}}
            ]
        }"#,
    )
    .unwrap_err();
    let LayoutError::InvalidConfig(message) = err else {
        panic!("expected InvalidConfig, got {err:?}");
    };
    assert!(message.contains("sections[1].headerSize"), "{message}");
}
