//! Section headers and footers, optionally pinned to the visible bounds.

use tracing::trace;

use super::StickySplitLayout;
use crate::config::HEADER_FOOTER_Z_INDEX;
use crate::content::ContentProvider;
use crate::layout::BaseGeometryProvider;
use crate::types::{
    clamp_between, ElementKind, IndexPath, LayoutAttributes, MainHeaderZPosition, Rect,
    SupplementaryKind,
};

impl<C: ContentProvider, B: BaseGeometryProvider> StickySplitLayout<C, B> {
    /// Natural frame of a supplementary, translated past the main header.
    fn translated_supplementary(&self, kind: SupplementaryKind, section: usize) -> Option<Rect> {
        let (dx, dy) = self.translation(self.layout_mode());
        self.base
            .natural_supplementary_frame(kind, section)
            .map(|frame| frame.offset_by(dx, dy))
    }

    /// Section header attributes. `None` when the header has no size.
    ///
    /// A sticky header stays at the leading edge of the visible area until the
    /// next section's header pushes it out.
    pub(crate) fn header_attributes(&self, section: usize) -> Option<LayoutAttributes> {
        if self.reference_size_for_header(section).is_zero() {
            return None;
        }
        let mut frame = self.translated_supplementary(SupplementaryKind::Header, section)?;

        if self.config.section_headers_pin_to_visible_bounds {
            let axis = self.config.scroll_axis;
            let inset = self.viewport.adjusted_content_inset();
            let extent = axis.main(frame.size());

            let next_leading = if section + 1 < self.content.number_of_sections() {
                self.translated_supplementary(SupplementaryKind::Header, section + 1)
                    .map_or(f32::INFINITY, |next| axis.leading_edge(&next))
            } else {
                f32::INFINITY
            };
            let upper =
                next_leading - extent - axis.main(self.reference_size_for_footer(section));

            let mut lower =
                axis.main_of(self.viewport.content_offset()) + axis.leading_inset(&inset);
            // A pinned main header drawn above everything covers the minimum
            // extent, except beside the content in a vertical split.
            let beside_content = self.layout_mode().is_split() && axis.is_vertical();
            if self.config.main_header_pins_to_visible_bounds
                && self.config.main_header_z_position == MainHeaderZPosition::AboveAll
                && !beside_content
            {
                lower += axis.main(self.config.main_header_minimum_reference_size);
            }

            let natural = axis.leading_edge(&frame);
            let pinned = clamp_between(natural, lower, upper);
            trace!(section, natural, pinned, lower, upper, "sticky header");
            axis.set_leading_edge(&mut frame, pinned);
        }

        Some(LayoutAttributes::new(
            ElementKind::SectionHeader,
            IndexPath::section(section),
            frame,
            HEADER_FOOTER_Z_INDEX,
        ))
    }

    /// Section footer attributes. `None` when the footer has no size.
    ///
    /// A sticky footer stays at the trailing edge of the visible area until the
    /// previous section's footer pushes it out.
    pub(crate) fn footer_attributes(&self, section: usize) -> Option<LayoutAttributes> {
        if self.reference_size_for_footer(section).is_zero() {
            return None;
        }
        let mut frame = self.translated_supplementary(SupplementaryKind::Footer, section)?;

        if self.config.section_footers_pin_to_visible_bounds {
            let axis = self.config.scroll_axis;
            let bounds = self.viewport.bounds;
            let extent = axis.main(frame.size());

            let trailing = axis.leading_edge(&bounds) + axis.main(bounds.size()) - extent;

            let previous_leading = section
                .checked_sub(1)
                .and_then(|previous| {
                    self.translated_supplementary(SupplementaryKind::Footer, previous)
                })
                .map_or(f32::NEG_INFINITY, |previous| axis.leading_edge(&previous));
            let lower =
                previous_leading + extent + axis.main(self.reference_size_for_header(section));

            let natural = axis.leading_edge(&frame);
            let pinned = trailing.min(natural).max(lower);
            trace!(section, natural, pinned, trailing, lower, "sticky footer");
            axis.set_leading_edge(&mut frame, pinned);
        }

        Some(LayoutAttributes::new(
            ElementKind::SectionFooter,
            IndexPath::section(section),
            frame,
            HEADER_FOOTER_Z_INDEX,
        ))
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
    use crate::config::{FlowMetrics, LayoutConfiguration};
    use crate::content::{SectionModel, Sections};
    use crate::engine::StickySplitLayout;
    use crate::layout::Viewport;
    use crate::types::{ElementKind, IndexPath, LayoutMode, Point, ScrollAxis, Size};

    fn sticky(sections: Sections, axis: ScrollAxis) -> StickySplitLayout<Sections> {
        let config = LayoutConfiguration {
            scroll_axis: axis,
            enforced_layout_mode: LayoutMode::Vertical,
            section_headers_pin_to_visible_bounds: true,
            section_footers_pin_to_visible_bounds: true,
            flow: FlowMetrics {
                item_size: Size::new(100.0, 100.0),
                minimum_line_spacing: 0.0,
                minimum_interitem_spacing: 0.0,
                ..FlowMetrics::default()
            },
            ..LayoutConfiguration::default()
        };
        StickySplitLayout::new(config, Viewport::new(Size::new(100.0, 300.0)), sections)
    }

    fn header_y(layout: &mut StickySplitLayout<Sections>, section: usize) -> f32 {
        layout
            .attributes_for_supplementary(ElementKind::SectionHeader, IndexPath::section(section))
            .unwrap()
            .frame
            .y
    }

    #[test]
    fn test_header_pushed_by_next_header() {
        // Section 0 spans 0..550 (50pt header, five 100pt items); section 1
        // starts at 550.
        let sections = Sections::new(vec![
            SectionModel::new(5).with_header(Size::new(100.0, 50.0)),
            SectionModel::new(5).with_header(Size::new(100.0, 50.0)),
        ]);
        let mut layout = sticky(sections, ScrollAxis::Vertical);

        layout.set_content_offset(Point::new(0.0, 200.0));
        assert_eq!(header_y(&mut layout, 0), 200.0);

        layout.set_content_offset(Point::new(0.0, 520.0));
        assert_eq!(header_y(&mut layout, 0), 500.0);
        assert_eq!(header_y(&mut layout, 1), 550.0);
    }

    #[test]
    fn test_upper_bound_reserves_own_footer() {
        let sections = Sections::new(vec![
            SectionModel::new(5)
                .with_header(Size::new(100.0, 50.0))
                .with_footer(Size::new(100.0, 30.0)),
            SectionModel::new(5).with_header(Size::new(100.0, 50.0)),
        ]);
        let mut layout = sticky(sections, ScrollAxis::Vertical);
        layout.set_content_offset(Point::new(0.0, 560.0));
        // Next header at 580; 580 - 50 - 30 = 500.
        assert_eq!(header_y(&mut layout, 0), 500.0);
    }

    #[test]
    fn test_footer_pinned_to_trailing_edge() {
        let sections = Sections::new(vec![
            SectionModel::new(5).with_footer(Size::new(100.0, 40.0)),
            SectionModel::new(5).with_footer(Size::new(100.0, 40.0)),
        ]);
        let mut layout = sticky(sections, ScrollAxis::Vertical);

        // Natural footer 0 at 500; viewport bottom at 300.
        let footer = layout
            .attributes_for_supplementary(ElementKind::SectionFooter, IndexPath::section(0))
            .unwrap();
        assert_eq!(footer.frame.y, 260.0);

        // Footer 1 natural at 1040 cannot rise above footer 0 plus its extent.
        let footer = layout
            .attributes_for_supplementary(ElementKind::SectionFooter, IndexPath::section(1))
            .unwrap();
        assert_eq!(footer.frame.y, 540.0);
    }

    #[test]
    fn test_horizontal_axis_pins_on_x() {
        let sections = Sections::new(vec![
            SectionModel::new(4).with_header(Size::new(30.0, 100.0)),
        ]);
        let mut layout = sticky(sections, ScrollAxis::Horizontal);
        layout.set_content_offset(Point::new(120.0, 0.0));
        let header = layout
            .attributes_for_supplementary(ElementKind::SectionHeader, IndexPath::section(0))
            .unwrap();
        assert_eq!(header.frame.x, 120.0);
        assert_eq!(header.frame.y, 0.0);
    }

    #[test]
    fn test_zero_size_supplementaries_absent() {
        let mut layout = sticky(Sections::uniform(2, 3), ScrollAxis::Vertical);
        assert!(layout
            .attributes_for_supplementary(ElementKind::SectionHeader, IndexPath::section(0))
            .is_none());
        assert!(layout
            .attributes_for_supplementary(ElementKind::SectionFooter, IndexPath::section(1))
            .is_none());
    }
}
