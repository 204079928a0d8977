//! Pre-computed natural geometry of a sectioned flow layout.
//!
//! Positions are computed once per `prepare`, giving O(log n) lookups of the
//! sections that intersect a rectangle.

use crate::config::{FlowMetrics, CELL_Z_INDEX};
use crate::content::ContentProvider;
use crate::types::{
    EdgeInsets, ElementKind, IndexPath, LayoutAttributes, Rect, ScrollAxis, Size,
    SupplementaryKind,
};

/// Everything a base layout needs to compute natural geometry.
pub struct FlowInput<'a> {
    pub content: &'a dyn ContentProvider,
    pub metrics: &'a FlowMetrics,
    pub axis: ScrollAxis,
    /// Viewport bounds; only the size matters for natural geometry.
    pub bounds: Rect,
    /// Adjusted content inset after the engine has rewritten it.
    pub content_inset: EdgeInsets,
}

/// Source of the "natural" (untranslated, unclamped) frames the sticky-split
/// engine adjusts.
pub trait BaseGeometryProvider {
    /// Recompute geometry from scratch.
    fn prepare(&mut self, input: &FlowInput<'_>);

    fn natural_item_frame(&self, index_path: IndexPath) -> Option<Rect>;

    /// Frame of a section header or footer. Present for every section, possibly
    /// with a zero size.
    fn natural_supplementary_frame(&self, kind: SupplementaryKind, section: usize)
        -> Option<Rect>;

    fn natural_content_size(&self) -> Size;

    /// Cells and non-empty supplementaries whose natural frames intersect `rect`.
    fn natural_elements_in_rect(&self, rect: &Rect) -> Vec<LayoutAttributes>;
}

/// Natural geometry of one section.
#[derive(Debug, Clone, Default)]
struct SectionGeometry {
    /// Main-axis position of the header's leading edge.
    start: f32,
    /// Main-axis position of the footer's trailing edge.
    end: f32,
    header: Rect,
    footer: Rect,
    has_header: bool,
    has_footer: bool,
    items: Vec<Rect>,
}

/// Stretch a supplementary frame across `cross_len`.
fn span_cross(axis: ScrollAxis, frame: Rect, cross_len: f32) -> Rect {
    axis.rect(axis.leading_edge(&frame), 0.0, axis.main(frame.size()), cross_len)
}

/// A line of items waiting for its main-axis extent to be known.
struct Line {
    /// (cross position, size) of each item.
    items: Vec<(f32, Size)>,
    cursor: f32,
}

impl Line {
    fn new(start: f32) -> Self {
        Self {
            items: Vec::new(),
            cursor: start,
        }
    }

    /// Emit the line at `main`, centring items on the main axis.
    /// Returns the main-axis extent of the line.
    fn flush(&mut self, axis: ScrollAxis, main: f32, out: &mut Vec<Rect>) -> f32 {
        let extent = self
            .items
            .iter()
            .map(|(_, size)| axis.main(*size))
            .fold(0.0_f32, f32::max);
        for (cross, size) in self.items.drain(..) {
            let item_main = axis.main(size);
            out.push(axis.rect(
                main + (extent - item_main) / 2.0,
                cross,
                item_main,
                axis.cross(size),
            ));
        }
        extent
    }
}

/// Conventional flow layout: headers, lines of wrapped items, footers.
#[derive(Debug, Clone, Default)]
pub struct FlowLayout {
    axis: ScrollAxis,
    sections: Vec<SectionGeometry>,
    content_size: Size,
}

impl FlowLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sections computed by the last `prepare`.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Main-axis span `(start, end)` of a section, header and footer included.
    pub fn section_span(&self, section: usize) -> Option<(f32, f32)> {
        self.sections.get(section).map(|s| (s.start, s.end))
    }
}

impl BaseGeometryProvider for FlowLayout {
    fn prepare(&mut self, input: &FlowInput<'_>) {
        let axis = input.axis;
        let metrics = input.metrics;
        let content = input.content;

        let (inset_lead, inset_trail) = axis.cross_insets(&input.content_inset);
        let available = (axis.cross(input.bounds.size()) - inset_lead - inset_trail).max(0.0);
        let (section_lead, section_trail) = axis.cross_insets(&metrics.section_inset);
        let line_limit = available - section_trail;

        let section_count = content.number_of_sections();
        let mut sections = Vec::with_capacity(section_count);
        let mut widest = available;
        let mut main = 0.0_f32;

        for section in 0..section_count {
            let header_size = content
                .header_reference_size(section)
                .unwrap_or(metrics.header_reference_size);
            let footer_size = content
                .footer_reference_size(section)
                .unwrap_or(metrics.footer_reference_size);

            let start = main;
            let header_main = axis.main(header_size);
            main += header_main + axis.leading_inset(&metrics.section_inset);

            let item_count = content.number_of_items(section);
            let mut items = Vec::with_capacity(item_count);
            let mut line = Line::new(section_lead);
            let mut first_line = true;

            for item in 0..item_count {
                let size = content
                    .item_size(IndexPath::new(section, item))
                    .unwrap_or(metrics.item_size);
                let cross_len = axis.cross(size);
                let gap = if line.items.is_empty() {
                    0.0
                } else {
                    metrics.minimum_interitem_spacing
                };

                if !line.items.is_empty() && line.cursor + gap + cross_len > line_limit {
                    if !first_line {
                        main += metrics.minimum_line_spacing;
                    }
                    main += line.flush(axis, main, &mut items);
                    first_line = false;
                    line.cursor = section_lead;
                    line.items.push((line.cursor, size));
                    line.cursor += cross_len;
                } else {
                    line.items.push((line.cursor + gap, size));
                    line.cursor += gap + cross_len;
                }
                widest = widest.max(line.cursor + section_trail);
            }
            if !line.items.is_empty() {
                if !first_line {
                    main += metrics.minimum_line_spacing;
                }
                main += line.flush(axis, main, &mut items);
            }

            main += axis.trailing_inset(&metrics.section_inset);
            let footer_start = main;
            let footer_main = axis.main(footer_size);
            main += footer_main;

            sections.push(SectionGeometry {
                start,
                end: main,
                header: axis.rect(start, 0.0, header_main, 0.0),
                footer: axis.rect(footer_start, 0.0, footer_main, 0.0),
                has_header: !header_size.is_zero(),
                has_footer: !footer_size.is_zero(),
                items,
            });
        }

        // Supplementaries span the final cross extent, known only now.
        for geometry in &mut sections {
            if geometry.has_header {
                geometry.header = span_cross(axis, geometry.header, widest);
            }
            if geometry.has_footer {
                geometry.footer = span_cross(axis, geometry.footer, widest);
            }
        }
        self.sections = sections;
        self.axis = axis;
        self.content_size = axis.size(main, widest);
    }

    fn natural_item_frame(&self, index_path: IndexPath) -> Option<Rect> {
        self.sections
            .get(index_path.section)
            .and_then(|s| s.items.get(index_path.item))
            .copied()
    }

    fn natural_supplementary_frame(
        &self,
        kind: SupplementaryKind,
        section: usize,
    ) -> Option<Rect> {
        self.sections.get(section).map(|s| match kind {
            SupplementaryKind::Header => s.header,
            SupplementaryKind::Footer => s.footer,
        })
    }

    fn natural_content_size(&self) -> Size {
        self.content_size
    }

    fn natural_elements_in_rect(&self, rect: &Rect) -> Vec<LayoutAttributes> {
        let axis = self.axis;
        let lead = axis.leading_edge(rect);
        let trail = lead + axis.main(rect.size());

        // First section whose span reaches past the leading edge of the rect.
        let first = self.sections.partition_point(|s| s.end <= lead);

        let mut out = Vec::new();
        for (section, geometry) in self
            .sections
            .iter()
            .enumerate()
            .skip(first)
            .take_while(|(_, s)| s.start < trail)
        {
            let path = IndexPath::section(section);
            if geometry.has_header && geometry.header.intersects(rect) {
                out.push(LayoutAttributes::new(
                    ElementKind::SectionHeader,
                    path,
                    geometry.header,
                    CELL_Z_INDEX,
                ));
            }
            out.extend(
                geometry
                    .items
                    .iter()
                    .enumerate()
                    .filter(|(_, frame)| frame.intersects(rect))
                    .map(|(item, frame)| {
                        LayoutAttributes::new(
                            ElementKind::Cell,
                            IndexPath::new(section, item),
                            *frame,
                            CELL_Z_INDEX,
                        )
                    }),
            );
            if geometry.has_footer && geometry.footer.intersects(rect) {
                out.push(LayoutAttributes::new(
                    ElementKind::SectionFooter,
                    path,
                    geometry.footer,
                    CELL_Z_INDEX,
                ));
            }
        }
        out
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
    use super::*;
    use crate::content::{SectionModel, Sections};

    fn prepare(sections: &Sections, metrics: &FlowMetrics, axis: ScrollAxis, size: Size) -> FlowLayout {
        let mut layout = FlowLayout::new();
        layout.prepare(&FlowInput {
            content: sections,
            metrics,
            axis,
            bounds: Rect::new(0.0, 0.0, size.width, size.height),
            content_inset: EdgeInsets::ZERO,
        });
        layout
    }

    fn full_width_rows() -> FlowMetrics {
        FlowMetrics {
            item_size: Size::new(375.0, 100.0),
            minimum_line_spacing: 0.0,
            minimum_interitem_spacing: 0.0,
            ..FlowMetrics::default()
        }
    }

    #[test]
    fn test_single_column_stack() {
        let sections = Sections::uniform(1, 10);
        let layout = prepare(&sections, &full_width_rows(), ScrollAxis::Vertical, Size::new(375.0, 667.0));

        assert_eq!(layout.natural_content_size(), Size::new(375.0, 1000.0));
        assert_eq!(
            layout.natural_item_frame(IndexPath::new(0, 3)),
            Some(Rect::new(0.0, 300.0, 375.0, 100.0))
        );
        assert_eq!(layout.natural_item_frame(IndexPath::new(0, 10)), None);
    }

    #[test]
    fn test_items_wrap_into_lines() {
        // 50pt items with 10pt spacing: 6 per 350pt line (6*50 + 5*10 = 350).
        let sections = Sections::uniform(1, 8);
        let layout = prepare(&sections, &FlowMetrics::default(), ScrollAxis::Vertical, Size::new(350.0, 600.0));

        assert_eq!(
            layout.natural_item_frame(IndexPath::new(0, 5)),
            Some(Rect::new(300.0, 0.0, 50.0, 50.0))
        );
        assert_eq!(
            layout.natural_item_frame(IndexPath::new(0, 6)),
            Some(Rect::new(0.0, 60.0, 50.0, 50.0))
        );
        assert_eq!(layout.natural_content_size(), Size::new(350.0, 110.0));
    }

    #[test]
    fn test_items_centred_within_line() {
        struct Mixed(Sections);
        impl ContentProvider for Mixed {
            fn number_of_sections(&self) -> usize {
                self.0.number_of_sections()
            }
            fn number_of_items(&self, section: usize) -> usize {
                self.0.number_of_items(section)
            }
            fn item_size(&self, index_path: IndexPath) -> Option<Size> {
                Some(if index_path.item == 0 {
                    Size::new(50.0, 100.0)
                } else {
                    Size::new(50.0, 40.0)
                })
            }
        }
        let mixed = Mixed(Sections::uniform(1, 2));
        let metrics = FlowMetrics::default();
        let mut layout = FlowLayout::new();
        layout.prepare(&FlowInput {
            content: &mixed,
            metrics: &metrics,
            axis: ScrollAxis::Vertical,
            bounds: Rect::new(0.0, 0.0, 375.0, 667.0),
            content_inset: EdgeInsets::ZERO,
        });
        assert_eq!(
            layout.natural_item_frame(IndexPath::new(0, 1)),
            Some(Rect::new(60.0, 30.0, 50.0, 40.0))
        );
    }

    #[test]
    fn test_headers_footers_and_section_insets() {
        let sections = Sections::new(vec![
            SectionModel::new(2)
                .with_header(Size::new(0.0, 40.0))
                .with_footer(Size::new(0.0, 20.0)),
            SectionModel::new(1),
        ]);
        let metrics = FlowMetrics {
            item_size: Size::new(100.0, 100.0),
            section_inset: EdgeInsets::new(5.0, 10.0, 5.0, 10.0),
            ..full_width_rows()
        };
        let layout = prepare(&sections, &metrics, ScrollAxis::Vertical, Size::new(375.0, 667.0));

        let header = layout
            .natural_supplementary_frame(SupplementaryKind::Header, 0)
            .unwrap();
        assert_eq!(header, Rect::new(0.0, 0.0, 375.0, 40.0));
        assert_eq!(
            layout.natural_item_frame(IndexPath::new(0, 0)),
            Some(Rect::new(10.0, 45.0, 100.0, 100.0))
        );
        assert_eq!(
            layout.natural_supplementary_frame(SupplementaryKind::Footer, 0),
            Some(Rect::new(0.0, 150.0, 375.0, 20.0))
        );
        assert_eq!(layout.section_span(0), Some((0.0, 170.0)));
        // Second section has no header: a zero-size frame at its start.
        let empty = layout
            .natural_supplementary_frame(SupplementaryKind::Header, 1)
            .unwrap();
        assert!(empty.size().is_zero());
        assert_eq!(empty.y, 170.0);
    }

    #[test]
    fn test_cross_extent_widens_to_widest_line() {
        let sections = Sections::uniform(1, 3);
        let metrics = full_width_rows();
        let mut layout = FlowLayout::new();
        layout.prepare(&FlowInput {
            content: &sections,
            metrics: &metrics,
            axis: ScrollAxis::Vertical,
            bounds: Rect::new(0.0, 0.0, 375.0, 667.0),
            content_inset: EdgeInsets::new(0.0, 375.0, 0.0, 0.0),
        });
        assert_eq!(layout.natural_content_size(), Size::new(375.0, 300.0));
    }

    #[test]
    fn test_horizontal_axis_packs_top_to_bottom() {
        let sections = Sections::uniform(1, 3);
        let metrics = FlowMetrics {
            item_size: Size::new(100.0, 100.0),
            minimum_line_spacing: 0.0,
            minimum_interitem_spacing: 0.0,
            ..FlowMetrics::default()
        };
        let layout = prepare(&sections, &metrics, ScrollAxis::Horizontal, Size::new(300.0, 200.0));
        assert_eq!(
            layout.natural_item_frame(IndexPath::new(0, 1)),
            Some(Rect::new(0.0, 100.0, 100.0, 100.0))
        );
        assert_eq!(
            layout.natural_item_frame(IndexPath::new(0, 2)),
            Some(Rect::new(100.0, 0.0, 100.0, 100.0))
        );
        assert_eq!(layout.natural_content_size(), Size::new(200.0, 200.0));
    }

    #[test]
    fn test_elements_in_rect_skips_far_sections() {
        let sections = Sections::new(
            (0..20)
                .map(|_| SectionModel::new(5).with_header(Size::new(0.0, 50.0)))
                .collect(),
        );
        let layout = prepare(&sections, &full_width_rows(), ScrollAxis::Vertical, Size::new(375.0, 667.0));
        // Each section spans 550pt; the rect covers the tail of section 2 and
        // the head of section 3.
        let found = layout.natural_elements_in_rect(&Rect::new(0.0, 1600.0, 375.0, 150.0));
        let kinds: Vec<_> = found.iter().map(|a| (a.kind, a.index_path)).collect();
        assert_eq!(
            kinds,
            vec![
                (ElementKind::Cell, IndexPath::new(2, 4)),
                (ElementKind::SectionHeader, IndexPath::section(3)),
                (ElementKind::Cell, IndexPath::new(3, 0)),
            ]
        );
    }
}
