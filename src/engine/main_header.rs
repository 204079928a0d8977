//! Main header placement: elastic growth on overscroll, shrink to a minimum,
//! pinning, and side anchoring in split modes.

use tracing::trace;

use super::StickySplitLayout;
use crate::content::ContentProvider;
use crate::layout::BaseGeometryProvider;
use crate::types::{
    ElementKind, HorizontalSide, IndexPath, LayoutAttributes, Rect, ResolvedLayoutMode,
    ScrollAxis,
};

impl<C: ContentProvider, B: BaseGeometryProvider> StickySplitLayout<C, B> {
    /// Main header attributes, computed fresh for the current offset.
    /// `None` when the reference size is zero.
    pub(crate) fn main_header_attributes(&self) -> Option<LayoutAttributes> {
        let reference = self.config.main_header_reference_size;
        if reference.is_zero() {
            return None;
        }
        let frame = match self.config.scroll_axis {
            ScrollAxis::Vertical => self.main_header_frame_vertical(),
            ScrollAxis::Horizontal => self.main_header_frame_horizontal(),
        };
        trace!(
            x = frame.x,
            y = frame.y,
            width = frame.width,
            height = frame.height,
            "main header"
        );
        Some(LayoutAttributes::new(
            ElementKind::MainHeader,
            IndexPath::section(0),
            frame,
            self.config.main_header_z_position.z_index(),
        ))
    }

    fn main_header_frame_vertical(&self) -> Rect {
        let reference = self.config.main_header_reference_size;
        let minimum = self.config.main_header_minimum_reference_size;
        let maximum = self.config.main_header_maximum_reference_size;
        let inset = self.viewport.adjusted_content_inset();
        let bounds = self.viewport.bounds;
        let mode = self.layout_mode();

        let natural_bottom = reference.height;
        let mut y = (natural_bottom - minimum.height).min(bounds.y + inset.top);
        let height = match mode {
            ResolvedLayoutMode::Vertical => (natural_bottom - y).max(0.0),
            // Beside the content the header never shrinks below its natural height.
            ResolvedLayoutMode::Horizontal(_) => natural_bottom.max(natural_bottom - y),
        };

        if (self.config.main_header_pins_to_visible_bounds && height <= minimum.height)
            || mode.is_split()
        {
            y = self.viewport.content_offset().y + inset.top;
        }
        if height > maximum.height && mode == ResolvedLayoutMode::Vertical {
            y += height - maximum.height;
        }

        let x = match mode {
            ResolvedLayoutMode::Horizontal(HorizontalSide::Left) => -inset.left,
            ResolvedLayoutMode::Horizontal(HorizontalSide::Right) => bounds.width - inset.right,
            ResolvedLayoutMode::Vertical => 0.0,
        };
        Rect::new(x, y, reference.width, height.min(maximum.height))
    }

    /// Horizontal axis: the width plays the role of the height. There is no
    /// push-down past the maximum; the width is only capped.
    fn main_header_frame_horizontal(&self) -> Rect {
        let reference = self.config.main_header_reference_size;
        let minimum = self.config.main_header_minimum_reference_size;
        let maximum = self.config.main_header_maximum_reference_size;
        let inset = self.viewport.adjusted_content_inset();

        let natural_right = reference.width;
        let mut x = (natural_right - minimum.width).min(self.viewport.bounds.x + inset.left);
        let width = (natural_right - x).max(0.0);
        if self.config.main_header_pins_to_visible_bounds && width <= minimum.width {
            x = self.viewport.content_offset().x + inset.left;
        }
        Rect::new(x, 0.0, width.min(maximum.width), reference.height)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use crate::config::LayoutConfiguration;
    use crate::content::Sections;
    use crate::engine::StickySplitLayout;
    use crate::layout::Viewport;
    use crate::types::{
        ElementKind, HorizontalSide, IndexPath, LayoutAttributes, LayoutMode,
        MainHeaderZPosition, Point, Rect, ScrollAxis, Size,
    };

    fn layout(config: LayoutConfiguration, viewport: Size) -> StickySplitLayout<Sections> {
        StickySplitLayout::new(config, Viewport::new(viewport), Sections::uniform(1, 20))
    }

    fn main_header(layout: &mut StickySplitLayout<Sections>) -> LayoutAttributes {
        layout
            .attributes_for_supplementary(ElementKind::MainHeader, IndexPath::section(0))
            .unwrap()
    }

    fn vertical_header(height: f32) -> LayoutConfiguration {
        LayoutConfiguration {
            enforced_layout_mode: LayoutMode::Vertical,
            main_header_reference_size: Size::new(375.0, height),
            ..LayoutConfiguration::default()
        }
    }

    #[test]
    fn test_resting_frame() {
        let mut layout = layout(vertical_header(100.0), Size::new(375.0, 667.0));
        assert_eq!(main_header(&mut layout).frame, Rect::new(0.0, 0.0, 375.0, 100.0));
    }

    #[test]
    fn test_overscroll_grows_header() {
        let mut layout = layout(vertical_header(200.0), Size::new(375.0, 667.0));
        layout.set_content_offset(Point::new(0.0, -80.0));
        assert_eq!(main_header(&mut layout).frame, Rect::new(0.0, -80.0, 375.0, 280.0));
    }

    #[test]
    fn test_scrolling_shrinks_then_pins_at_minimum() {
        let mut config = vertical_header(200.0);
        config.main_header_minimum_reference_size = Size::new(375.0, 64.0);
        config.main_header_pins_to_visible_bounds = true;
        let mut layout = layout(config, Size::new(375.0, 667.0));

        layout.set_content_offset(Point::new(0.0, 100.0));
        assert_eq!(main_header(&mut layout).frame, Rect::new(0.0, 100.0, 375.0, 100.0));

        layout.set_content_offset(Point::new(0.0, 400.0));
        assert_eq!(main_header(&mut layout).frame, Rect::new(0.0, 400.0, 375.0, 64.0));
    }

    #[test]
    fn test_unpinned_header_scrolls_away_at_minimum() {
        let mut config = vertical_header(200.0);
        config.main_header_minimum_reference_size = Size::new(375.0, 64.0);
        let mut layout = layout(config, Size::new(375.0, 667.0));
        layout.set_content_offset(Point::new(0.0, 400.0));
        assert_eq!(main_header(&mut layout).frame, Rect::new(0.0, 136.0, 375.0, 64.0));
    }

    #[test]
    fn test_maximum_pushes_header_down() {
        let mut config = vertical_header(200.0);
        config.main_header_maximum_reference_size = Size::new(375.0, 250.0);
        let mut layout = layout(config, Size::new(375.0, 667.0));
        layout.set_content_offset(Point::new(0.0, -80.0));
        assert_eq!(main_header(&mut layout).frame, Rect::new(0.0, -50.0, 375.0, 250.0));
    }

    #[test]
    fn test_split_modes_anchor_to_sides() {
        let mut config = vertical_header(300.0);
        config.main_header_reference_size = Size::new(250.0, 300.0);
        config.enforced_layout_mode = LayoutMode::Implicit(HorizontalSide::Left);
        let mut left = layout(config, Size::new(667.0, 375.0));
        left.set_content_offset(Point::new(0.0, 120.0));
        let frame = main_header(&mut left).frame;
        assert_eq!(frame, Rect::new(-250.0, 120.0, 250.0, 300.0));

        config.enforced_layout_mode = LayoutMode::Horizontal(HorizontalSide::Right);
        let mut right = layout(config, Size::new(667.0, 375.0));
        let frame = main_header(&mut right).frame;
        assert_eq!(frame.x, 667.0 - 250.0);
        assert_eq!(frame.y, 0.0);
    }

    #[test]
    fn test_horizontal_axis_caps_width_without_push() {
        let config = LayoutConfiguration {
            scroll_axis: ScrollAxis::Horizontal,
            enforced_layout_mode: LayoutMode::Vertical,
            main_header_reference_size: Size::new(100.0, 300.0),
            main_header_maximum_reference_size: Size::new(150.0, 300.0),
            ..LayoutConfiguration::default()
        };
        let mut layout = layout(config, Size::new(400.0, 300.0));
        layout.set_content_offset(Point::new(-80.0, 0.0));
        assert_eq!(main_header(&mut layout).frame, Rect::new(-80.0, 0.0, 150.0, 300.0));
    }

    #[test]
    fn test_z_index_follows_position() {
        let mut config = vertical_header(100.0);
        config.main_header_z_position = MainHeaderZPosition::AboveAll;
        let mut layout = layout(config, Size::new(375.0, 667.0));
        assert_eq!(main_header(&mut layout).z_index, 2000);
        layout.set_main_header_z_position(MainHeaderZPosition::BelowHeadersAndFooters);
        assert_eq!(main_header(&mut layout).z_index, 1023);
    }

    #[test]
    fn test_zero_reference_size_is_absent() {
        let mut layout = layout(LayoutConfiguration::default(), Size::new(375.0, 667.0));
        assert!(layout
            .attributes_for_supplementary(ElementKind::MainHeader, IndexPath::section(0))
            .is_none());
    }
}
