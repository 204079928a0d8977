use serde::{Deserialize, Serialize};

use super::geometry::{EdgeInsets, Point, Rect, Size};
use crate::config::{
    MAIN_HEADER_BELOW_ALL_Z_INDEX, MAIN_HEADER_BELOW_HEADER_FOOTER_Z_INDEX,
    MAIN_HEADER_TOP_Z_INDEX,
};

/// Direction the content scrolls in.
///
/// The "main" axis is the scroll axis; the "cross" axis is the one items wrap
/// along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrollAxis {
    #[default]
    Vertical,
    Horizontal,
}

impl ScrollAxis {
    #[inline]
    pub fn is_vertical(self) -> bool {
        self == ScrollAxis::Vertical
    }

    /// Extent of `size` along the scroll axis.
    #[inline]
    pub fn main(self, size: Size) -> f32 {
        match self {
            ScrollAxis::Vertical => size.height,
            ScrollAxis::Horizontal => size.width,
        }
    }

    /// Extent of `size` across the scroll axis.
    #[inline]
    pub fn cross(self, size: Size) -> f32 {
        match self {
            ScrollAxis::Vertical => size.width,
            ScrollAxis::Horizontal => size.height,
        }
    }

    /// Component of `point` along the scroll axis.
    #[inline]
    pub fn main_of(self, point: Point) -> f32 {
        match self {
            ScrollAxis::Vertical => point.y,
            ScrollAxis::Horizontal => point.x,
        }
    }

    /// Leading edge of `rect` along the scroll axis.
    #[inline]
    pub fn leading_edge(self, rect: &Rect) -> f32 {
        match self {
            ScrollAxis::Vertical => rect.y,
            ScrollAxis::Horizontal => rect.x,
        }
    }

    /// Move the leading edge of `rect` along the scroll axis.
    #[inline]
    pub fn set_leading_edge(self, rect: &mut Rect, value: f32) {
        match self {
            ScrollAxis::Vertical => rect.y = value,
            ScrollAxis::Horizontal => rect.x = value,
        }
    }

    /// Inset at the leading edge of the scroll axis (top or left).
    #[inline]
    pub fn leading_inset(self, insets: &EdgeInsets) -> f32 {
        match self {
            ScrollAxis::Vertical => insets.top,
            ScrollAxis::Horizontal => insets.left,
        }
    }

    /// Inset at the trailing edge of the scroll axis (bottom or right).
    #[inline]
    pub fn trailing_inset(self, insets: &EdgeInsets) -> f32 {
        match self {
            ScrollAxis::Vertical => insets.bottom,
            ScrollAxis::Horizontal => insets.right,
        }
    }

    /// Insets at the (leading, trailing) edges of the cross axis.
    #[inline]
    pub fn cross_insets(self, insets: &EdgeInsets) -> (f32, f32) {
        match self {
            ScrollAxis::Vertical => (insets.left, insets.right),
            ScrollAxis::Horizontal => (insets.top, insets.bottom),
        }
    }

    /// Build a rectangle from main/cross coordinates.
    #[inline]
    pub fn rect(self, main: f32, cross: f32, main_len: f32, cross_len: f32) -> Rect {
        match self {
            ScrollAxis::Vertical => Rect::new(cross, main, cross_len, main_len),
            ScrollAxis::Horizontal => Rect::new(main, cross, main_len, cross_len),
        }
    }

    /// Build a size from main/cross extents.
    #[inline]
    pub fn size(self, main_len: f32, cross_len: f32) -> Size {
        match self {
            ScrollAxis::Vertical => Size::new(cross_len, main_len),
            ScrollAxis::Horizontal => Size::new(main_len, cross_len),
        }
    }
}

/// Side the main header occupies in a split layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HorizontalSide {
    #[default]
    Left,
    Right,
}

/// Layout mode requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutMode {
    /// Main header on one side, content on the other.
    Horizontal(HorizontalSide),
    /// Split when the viewport is wider than tall, vertical otherwise.
    Implicit(HorizontalSide),
    /// Main header stacked above the content.
    Vertical,
}

impl Default for LayoutMode {
    fn default() -> Self {
        LayoutMode::Implicit(HorizontalSide::Left)
    }
}

impl LayoutMode {
    /// Resolve against the current viewport bounds.
    pub fn resolve(self, bounds: &Rect) -> ResolvedLayoutMode {
        match self {
            LayoutMode::Vertical => ResolvedLayoutMode::Vertical,
            LayoutMode::Horizontal(side) => ResolvedLayoutMode::Horizontal(side),
            LayoutMode::Implicit(side) => {
                if bounds.width > bounds.height {
                    ResolvedLayoutMode::Horizontal(side)
                } else {
                    ResolvedLayoutMode::Vertical
                }
            }
        }
    }
}

/// A layout mode that placement math can act on.
///
/// There is no implicit variant: placement code only ever sees a mode that has
/// been resolved against the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolvedLayoutMode {
    Vertical,
    Horizontal(HorizontalSide),
}

impl ResolvedLayoutMode {
    /// True for either split (horizontal) variant.
    #[inline]
    pub fn is_split(self) -> bool {
        matches!(self, ResolvedLayoutMode::Horizontal(_))
    }

    /// Short name used in logs and snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            ResolvedLayoutMode::Vertical => "vertical",
            ResolvedLayoutMode::Horizontal(HorizontalSide::Left) => "horizontal-left",
            ResolvedLayoutMode::Horizontal(HorizontalSide::Right) => "horizontal-right",
        }
    }
}

impl std::fmt::Display for ResolvedLayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layering of the main header relative to the rest of the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MainHeaderZPosition {
    /// Above headers, footers and cells.
    AboveAll,
    /// Below headers and footers, above cells.
    BelowHeadersAndFooters,
    /// Below everything.
    #[default]
    BelowAll,
}

impl MainHeaderZPosition {
    pub fn z_index(self) -> i32 {
        match self {
            MainHeaderZPosition::AboveAll => MAIN_HEADER_TOP_Z_INDEX,
            MainHeaderZPosition::BelowHeadersAndFooters => MAIN_HEADER_BELOW_HEADER_FOOTER_Z_INDEX,
            MainHeaderZPosition::BelowAll => MAIN_HEADER_BELOW_ALL_Z_INDEX,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_implicit_resolves_by_aspect() {
        let portrait = Rect::new(0.0, 0.0, 375.0, 667.0);
        let landscape = Rect::new(0.0, 0.0, 667.0, 375.0);
        let square = Rect::new(0.0, 0.0, 500.0, 500.0);
        let mode = LayoutMode::Implicit(HorizontalSide::Right);

        assert_eq!(mode.resolve(&portrait), ResolvedLayoutMode::Vertical);
        assert_eq!(
            mode.resolve(&landscape),
            ResolvedLayoutMode::Horizontal(HorizontalSide::Right)
        );
        assert_eq!(mode.resolve(&square), ResolvedLayoutMode::Vertical);
    }

    #[test]
    fn test_enforced_modes_ignore_bounds() {
        let landscape = Rect::new(0.0, 0.0, 667.0, 375.0);
        assert_eq!(
            LayoutMode::Vertical.resolve(&landscape),
            ResolvedLayoutMode::Vertical
        );
        let portrait = Rect::new(0.0, 0.0, 375.0, 667.0);
        assert_eq!(
            LayoutMode::Horizontal(HorizontalSide::Left).resolve(&portrait),
            ResolvedLayoutMode::Horizontal(HorizontalSide::Left)
        );
    }

    #[test]
    fn test_axis_projection() {
        let size = Size::new(10.0, 20.0);
        assert_eq!(ScrollAxis::Vertical.main(size), 20.0);
        assert_eq!(ScrollAxis::Horizontal.main(size), 10.0);
        assert_eq!(
            ScrollAxis::Horizontal.rect(1.0, 2.0, 3.0, 4.0),
            Rect::new(1.0, 2.0, 3.0, 4.0)
        );
        assert_eq!(
            ScrollAxis::Vertical.rect(1.0, 2.0, 3.0, 4.0),
            Rect::new(2.0, 1.0, 4.0, 3.0)
        );
    }

    #[test]
    fn test_z_index_levels() {
        assert_eq!(MainHeaderZPosition::AboveAll.z_index(), 2000);
        assert_eq!(MainHeaderZPosition::BelowHeadersAndFooters.z_index(), 1023);
        assert_eq!(MainHeaderZPosition::BelowAll.z_index(), -1024);
    }

    #[test]
    fn test_layout_mode_json_shape() {
        let mode: LayoutMode = serde_json::from_str(r#"{"implicit":"right"}"#).unwrap();
        assert_eq!(mode, LayoutMode::Implicit(HorizontalSide::Right));
        let mode: LayoutMode = serde_json::from_str(r#""vertical""#).unwrap();
        assert_eq!(mode, LayoutMode::Vertical);
    }
}
