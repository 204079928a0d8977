//! Viewport state: bounds, scroll offset and insets of the hosting scroll view.

use serde::{Deserialize, Serialize};

use crate::types::{EdgeInsets, Point, Rect, ScrollAxis, Size};

/// Viewport state - the visible window onto the content.
///
/// `bounds.x`/`bounds.y` is the content offset; the size is the viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Viewport {
    pub bounds: Rect,
    /// Insets the host configures; the layout rewrites left/right in `prepare`.
    pub content_inset: EdgeInsets,
    /// Safe area contributed by the platform (notches, bars).
    pub safe_area_insets: EdgeInsets,
    pub scroll_indicator_insets: EdgeInsets,
    /// Whether the view is in a hierarchy. A detached view has no content size.
    pub attached: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Size::new(375.0, 667.0))
    }
}

impl Viewport {
    /// Create an attached viewport of `size` at offset zero with no insets.
    pub fn new(size: Size) -> Self {
        Self {
            bounds: Rect::from_origin_size(Point::ZERO, size),
            content_inset: EdgeInsets::ZERO,
            safe_area_insets: EdgeInsets::ZERO,
            scroll_indicator_insets: EdgeInsets::ZERO,
            attached: true,
        }
    }

    /// Content inset plus safe area.
    pub fn adjusted_content_inset(&self) -> EdgeInsets {
        self.content_inset + self.safe_area_insets
    }

    pub fn content_offset(&self) -> Point {
        self.bounds.origin()
    }

    /// Set absolute scroll position. Overscroll is allowed.
    pub fn set_content_offset(&mut self, offset: Point) {
        self.bounds.x = offset.x;
        self.bounds.y = offset.y;
    }

    /// Resize the viewport, keeping the offset.
    pub fn resize(&mut self, size: Size) {
        self.bounds.width = size.width;
        self.bounds.height = size.height;
    }

    /// Scroll by delta amounts.
    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32) {
        self.bounds.x += delta_x;
        self.bounds.y += delta_y;
    }

    /// Clamp the offset along `axis` to the scrollable range.
    ///
    /// The range runs from minus the leading adjusted inset to the point where
    /// the trailing edge of the content plus the trailing inset is visible.
    pub fn clamp_scroll(&mut self, content_size: Size, axis: ScrollAxis) {
        let inset = self.adjusted_content_inset();
        let min = -axis.leading_inset(&inset);
        let max = (axis.main(content_size) - axis.main(self.bounds.size())
            + axis.trailing_inset(&inset))
        .max(min);
        let offset = axis.leading_edge(&self.bounds).max(min).min(max);
        axis.set_leading_edge(&mut self.bounds, offset);
    }

    /// The rectangle of content currently visible.
    pub fn visible_rect(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_adjusted_inset_adds_safe_area() {
        let mut viewport = Viewport::new(Size::new(375.0, 667.0));
        viewport.content_inset = EdgeInsets::new(10.0, 0.0, 0.0, 0.0);
        viewport.safe_area_insets = EdgeInsets::new(44.0, 0.0, 34.0, 0.0);
        assert_eq!(
            viewport.adjusted_content_inset(),
            EdgeInsets::new(54.0, 0.0, 34.0, 0.0)
        );
    }

    #[test]
    fn test_clamp_scroll_vertical() {
        let mut viewport = Viewport::new(Size::new(375.0, 600.0));
        viewport.content_inset = EdgeInsets::new(20.0, 0.0, 10.0, 0.0);
        let content = Size::new(375.0, 1000.0);

        viewport.set_content_offset(Point::new(0.0, -100.0));
        viewport.clamp_scroll(content, ScrollAxis::Vertical);
        assert_eq!(viewport.content_offset().y, -20.0);

        viewport.set_content_offset(Point::new(0.0, 5000.0));
        viewport.clamp_scroll(content, ScrollAxis::Vertical);
        assert_eq!(viewport.content_offset().y, 410.0);
    }

    #[test]
    fn test_clamp_scroll_short_content_pins_to_top() {
        let mut viewport = Viewport::new(Size::new(375.0, 600.0));
        viewport.scroll_by(0.0, 250.0);
        viewport.clamp_scroll(Size::new(375.0, 100.0), ScrollAxis::Vertical);
        assert_eq!(viewport.content_offset().y, 0.0);
    }

    #[test]
    fn test_clamp_scroll_horizontal_leaves_y() {
        let mut viewport = Viewport::new(Size::new(300.0, 200.0));
        viewport.set_content_offset(Point::new(900.0, 40.0));
        viewport.clamp_scroll(Size::new(1000.0, 200.0), ScrollAxis::Horizontal);
        assert_eq!(viewport.content_offset(), Point::new(700.0, 40.0));
    }

    #[test]
    fn test_resize_keeps_offset() {
        let mut viewport = Viewport::new(Size::new(375.0, 667.0));
        viewport.set_content_offset(Point::new(0.0, 120.0));
        viewport.resize(Size::new(667.0, 375.0));
        assert_eq!(viewport.visible_rect(), Rect::new(0.0, 120.0, 667.0, 375.0));
    }
}
