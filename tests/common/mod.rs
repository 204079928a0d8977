//! Common test utilities and builders.
//!
//! Provides ready-made configurations, viewports and lookup helpers for the
//! integration tests of the sticky-split layout.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use sticky_split::{
    ElementKind, FlowMetrics, IndexPath, LayoutAttributes, LayoutConfiguration, LayoutMode,
    Sections, Size, StickySplitLayout, Viewport,
};

/// iPhone-sized portrait viewport.
pub const PORTRAIT: Size = Size::new(375.0, 667.0);

/// The same device rotated.
pub const LANDSCAPE: Size = Size::new(667.0, 375.0);

// ============================================================================
// Configuration builders
// ============================================================================

/// Full-width rows of `height` with no spacing, so positions are easy to
/// compute by hand.
#[must_use]
pub fn row_metrics(width: f32, height: f32) -> FlowMetrics {
    FlowMetrics {
        item_size: Size::new(width, height),
        minimum_line_spacing: 0.0,
        minimum_interitem_spacing: 0.0,
        ..FlowMetrics::default()
    }
}

/// Vertical scrolling list of 375x100 rows under a main header.
#[must_use]
pub fn list_config(mode: LayoutMode, main_header: Size) -> LayoutConfiguration {
    LayoutConfiguration {
        enforced_layout_mode: mode,
        main_header_reference_size: main_header,
        flow: row_metrics(375.0, 100.0),
        ..LayoutConfiguration::default()
    }
}

/// Engine over `sections` in a viewport of `size`.
#[must_use]
pub fn engine(
    config: LayoutConfiguration,
    size: Size,
    sections: Sections,
) -> StickySplitLayout<Sections> {
    StickySplitLayout::new(config, Viewport::new(size), sections)
}

// ============================================================================
// Lookup helpers
// ============================================================================

/// Find the attributes of `kind` at `path`, panicking with context if absent.
pub fn find(
    attributes: &[LayoutAttributes],
    kind: ElementKind,
    path: IndexPath,
) -> LayoutAttributes {
    *attributes
        .iter()
        .find(|a| a.kind == kind && a.index_path == path)
        .unwrap_or_else(|| {
            panic!(
                "no {} at {:?} in {:?}",
                kind.as_str(),
                path,
                attributes.iter().map(|a| (a.kind, a.index_path)).collect::<Vec<_>>()
            )
        })
}

/// Count the attributes of one kind.
#[must_use]
pub fn count(attributes: &[LayoutAttributes], kind: ElementKind) -> usize {
    attributes.iter().filter(|a| a.kind == kind).count()
}

/// Assert two floats match within a small tolerance.
pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}
