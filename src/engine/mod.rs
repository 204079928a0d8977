//! The sticky-split layout engine.
//!
//! `StickySplitLayout` layers its own placement rules on top of a
//! [`BaseGeometryProvider`]:
//! - Resolving the layout mode against the viewport and rewriting side insets
//! - Translating cells past the main header footprint
//! - Pinning section headers and footers to the visible bounds
//! - Placing the elastic, pinnable main header
//!
//! Every configuration write and every bounds change marks the layout stale;
//! the next query recomputes from scratch.

mod main_header;
mod supplementary;

use std::collections::BTreeSet;

use tracing::{debug, debug_span};

use crate::config::{FlowMetrics, LayoutConfiguration, CELL_Z_INDEX};
use crate::content::ContentProvider;
use crate::layout::{BaseGeometryProvider, FlowInput, FlowLayout, Viewport};
use crate::types::{
    EdgeInsets, ElementKind, HorizontalSide, IndexPath, LayoutAttributes, LayoutMode,
    MainHeaderZPosition, Point, Rect, ResolvedLayoutMode, ScrollAxis, Size,
};

/// Called whenever the layout is marked stale.
pub type InvalidationListener = Box<dyn FnMut()>;

/// Layout engine for a scrolling collection with a main header that can sit
/// above the content or beside it.
pub struct StickySplitLayout<C: ContentProvider, B: BaseGeometryProvider = FlowLayout> {
    config: LayoutConfiguration,
    viewport: Viewport,
    content: C,
    base: B,
    /// Adjusted inset captured by the first `prepare`; never refreshed.
    initial_inset: Option<EdgeInsets>,
    needs_layout: bool,
    on_invalidate: Option<InvalidationListener>,
}

impl<C: ContentProvider> StickySplitLayout<C, FlowLayout> {
    /// Create an engine over the default flow layout.
    pub fn new(config: LayoutConfiguration, viewport: Viewport, content: C) -> Self {
        Self::with_base(config, viewport, content, FlowLayout::new())
    }
}

impl<C: ContentProvider, B: BaseGeometryProvider> StickySplitLayout<C, B> {
    /// Create an engine over a custom base geometry provider.
    pub fn with_base(config: LayoutConfiguration, viewport: Viewport, content: C, base: B) -> Self {
        Self {
            config,
            viewport,
            content,
            base,
            initial_inset: None,
            needs_layout: true,
            on_invalidate: None,
        }
    }

    pub fn config(&self) -> &LayoutConfiguration {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    /// Mutable access to the data source. Marks the layout stale.
    pub fn content_mut(&mut self) -> &mut C {
        self.invalidate();
        &mut self.content
    }

    pub fn base(&self) -> &B {
        &self.base
    }

    /// The inset snapshot taken by the first `prepare`, if any.
    pub fn initial_inset(&self) -> Option<EdgeInsets> {
        self.initial_inset
    }

    pub fn set_invalidation_listener(&mut self, listener: Option<InvalidationListener>) {
        self.on_invalidate = listener;
    }

    // Configuration

    /// Apply several configuration edits with a single invalidation.
    pub fn update_config(&mut self, edit: impl FnOnce(&mut LayoutConfiguration)) {
        edit(&mut self.config);
        self.invalidate();
    }

    pub fn set_scroll_axis(&mut self, axis: ScrollAxis) {
        self.update_config(|c| c.scroll_axis = axis);
    }

    pub fn set_enforced_layout_mode(&mut self, mode: LayoutMode) {
        self.update_config(|c| c.enforced_layout_mode = mode);
    }

    pub fn set_main_header_reference_size(&mut self, size: Size) {
        self.update_config(|c| c.main_header_reference_size = size);
    }

    pub fn set_main_header_minimum_reference_size(&mut self, size: Size) {
        self.update_config(|c| c.main_header_minimum_reference_size = size);
    }

    pub fn set_main_header_maximum_reference_size(&mut self, size: Size) {
        self.update_config(|c| c.main_header_maximum_reference_size = size);
    }

    pub fn set_main_header_pins_to_visible_bounds(&mut self, pins: bool) {
        self.update_config(|c| c.main_header_pins_to_visible_bounds = pins);
    }

    pub fn set_main_header_z_position(&mut self, position: MainHeaderZPosition) {
        self.update_config(|c| c.main_header_z_position = position);
    }

    pub fn set_section_headers_pin_to_visible_bounds(&mut self, pins: bool) {
        self.update_config(|c| c.section_headers_pin_to_visible_bounds = pins);
    }

    pub fn set_section_footers_pin_to_visible_bounds(&mut self, pins: bool) {
        self.update_config(|c| c.section_footers_pin_to_visible_bounds = pins);
    }

    pub fn set_flow_metrics(&mut self, metrics: FlowMetrics) {
        self.update_config(|c| c.flow = metrics);
    }

    // Viewport

    /// Every bounds change requires a full recompute: sticky elements move
    /// with the offset and the mode can flip with the aspect ratio.
    pub fn should_invalidate_for_bounds_change(&self, _new_bounds: &Rect) -> bool {
        true
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        let invalidate = self.should_invalidate_for_bounds_change(&bounds);
        self.viewport.bounds = bounds;
        if invalidate {
            self.invalidate();
        }
    }

    pub fn set_content_offset(&mut self, offset: Point) {
        let mut bounds = self.viewport.bounds;
        bounds.x = offset.x;
        bounds.y = offset.y;
        self.set_bounds(bounds);
    }

    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32) {
        let mut viewport = self.viewport;
        viewport.scroll_by(delta_x, delta_y);
        self.set_bounds(viewport.bounds);
    }

    pub fn resize(&mut self, size: Size) {
        let mut bounds = self.viewport.bounds;
        bounds.width = size.width;
        bounds.height = size.height;
        self.set_bounds(bounds);
    }

    pub fn set_content_inset(&mut self, inset: EdgeInsets) {
        self.viewport.content_inset = inset;
        self.invalidate();
    }

    pub fn set_safe_area_insets(&mut self, inset: EdgeInsets) {
        self.viewport.safe_area_insets = inset;
        self.invalidate();
    }

    pub fn set_attached(&mut self, attached: bool) {
        self.viewport.attached = attached;
        self.invalidate();
    }

    // Lifecycle

    /// Mark the layout stale. The next query recomputes everything.
    pub fn invalidate(&mut self) {
        if !self.needs_layout {
            debug!("layout invalidated");
        }
        self.needs_layout = true;
        if let Some(listener) = self.on_invalidate.as_mut() {
            listener();
        }
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Resolve the mode, rewrite the side insets for it and recompute the
    /// natural geometry.
    pub fn prepare(&mut self) {
        let mode = self.layout_mode();
        let axis = self.config.scroll_axis;
        let current = self.viewport.adjusted_content_inset();
        let snapshot = *self.initial_inset.get_or_insert(current);
        let header_width = self.config.main_header_reference_size.width;

        // Pass-through sides keep the snapshot; the safe area is added back by
        // `adjusted_content_inset`. A reserved side is exactly the header width.
        let safe = self.viewport.safe_area_insets;
        let keep_left = snapshot.left - safe.left;
        let keep_right = snapshot.right - safe.right;

        let (left, right) = match mode {
            ResolvedLayoutMode::Horizontal(HorizontalSide::Left) => {
                let left = if axis.is_vertical() {
                    header_width
                } else {
                    keep_left
                };
                (left, keep_right)
            }
            ResolvedLayoutMode::Horizontal(HorizontalSide::Right) => {
                let right = if axis.is_vertical() {
                    header_width
                } else {
                    keep_right
                };
                self.viewport.scroll_indicator_insets.left = keep_left;
                self.viewport.scroll_indicator_insets.right = right;
                (keep_left, right)
            }
            ResolvedLayoutMode::Vertical => {
                self.viewport.scroll_indicator_insets.left = keep_left;
                self.viewport.scroll_indicator_insets.right = keep_right;
                (keep_left, keep_right)
            }
        };
        self.viewport.content_inset.left = left;
        self.viewport.content_inset.right = right;

        let adjusted = self.viewport.adjusted_content_inset();
        debug!(
            mode = %mode,
            axis = ?axis,
            inset_left = adjusted.left,
            inset_right = adjusted.right,
            "preparing layout"
        );

        self.base.prepare(&FlowInput {
            content: &self.content,
            metrics: &self.config.flow,
            axis,
            bounds: self.viewport.bounds,
            content_inset: adjusted,
        });
        self.needs_layout = false;
    }

    pub fn layout_if_needed(&mut self) {
        if self.needs_layout {
            self.prepare();
        }
    }

    // Queries

    /// The enforced mode resolved against the current bounds.
    pub fn layout_mode(&self) -> ResolvedLayoutMode {
        self.config.enforced_layout_mode.resolve(&self.viewport.bounds)
    }

    pub fn attributes_for_item(&mut self, index_path: IndexPath) -> Option<LayoutAttributes> {
        self.layout_if_needed();
        self.item_attributes(index_path)
    }

    /// Attributes of a header, footer or the main header. `Cell` is routed to
    /// the item query.
    pub fn attributes_for_supplementary(
        &mut self,
        kind: ElementKind,
        index_path: IndexPath,
    ) -> Option<LayoutAttributes> {
        self.layout_if_needed();
        match kind {
            ElementKind::Cell => self.item_attributes(index_path),
            ElementKind::SectionHeader => self.header_attributes(index_path.section),
            ElementKind::SectionFooter => self.footer_attributes(index_path.section),
            ElementKind::MainHeader => self.main_header_attributes(),
        }
    }

    /// Every element that may be visible in `rect`.
    ///
    /// Supplementaries come first in section order, then the main header, then
    /// cells in index path order.
    pub fn attributes_in_rect(&mut self, rect: Rect) -> Vec<LayoutAttributes> {
        self.layout_if_needed();

        let span = debug_span!(
            "layout_in_rect",
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height
        );
        let _enter = span.enter();

        let axis = self.config.scroll_axis;
        let header = self.config.main_header_reference_size;
        let query = match axis {
            ScrollAxis::Vertical => Rect::new(
                rect.x,
                rect.y - header.height,
                rect.width,
                rect.height + header.height,
            ),
            ScrollAxis::Horizontal => Rect::new(
                rect.x - header.width,
                rect.y,
                rect.width + header.width,
                rect.height,
            ),
        };

        let mut sections = BTreeSet::new();
        let mut cells = BTreeSet::new();
        for natural in self.base.natural_elements_in_rect(&query) {
            sections.insert(natural.index_path.section);
            if natural.is_cell() {
                cells.insert(natural.index_path);
            }
        }

        let mut out = Vec::with_capacity(sections.len() * 2 + cells.len() + 1);
        for &section in &sections {
            out.extend(self.header_attributes(section));
            out.extend(self.footer_attributes(section));
        }

        let touches_leading_edge = axis.leading_edge(&rect) <= 0.0;
        if touches_leading_edge
            || self.config.main_header_pins_to_visible_bounds
            || self.layout_mode().is_split()
        {
            out.extend(self.main_header_attributes());
        }

        out.extend(cells.iter().filter_map(|&path| self.item_attributes(path)));

        debug!(
            sections = sections.len(),
            cells = cells.len(),
            elements = out.len(),
            "collected attributes"
        );
        out
    }

    /// Total scrollable extent, including the main header footprint where the
    /// insets have not already reserved it.
    pub fn content_size(&mut self) -> Size {
        self.layout_if_needed();
        if !self.viewport.attached {
            return Size::ZERO;
        }
        let size = self.base.natural_content_size();
        let (dx, dy) = self.header_footprint();
        let split = self.layout_mode().is_split();

        let width = if split && self.config.scroll_axis.is_vertical() {
            size.width
        } else {
            size.width + dx
        };
        let height = if split { size.height } else { size.height + dy };
        Size::new(width, height)
    }

    /// Header size for `section`: the provider's override or the default.
    pub fn reference_size_for_header(&self, section: usize) -> Size {
        self.content
            .header_reference_size(section)
            .unwrap_or(self.config.flow.header_reference_size)
    }

    /// Footer size for `section`: the provider's override or the default.
    pub fn reference_size_for_footer(&self, section: usize) -> Size {
        self.content
            .footer_reference_size(section)
            .unwrap_or(self.config.flow.footer_reference_size)
    }

    // Placement helpers

    /// Main header extent along the scroll axis, as `(dx, dy)`.
    fn header_footprint(&self) -> (f32, f32) {
        let size = self.config.main_header_reference_size;
        match self.config.scroll_axis {
            ScrollAxis::Vertical => (0.0, size.height),
            ScrollAxis::Horizontal => (size.width, 0.0),
        }
    }

    /// Translation applied to natural frames in `mode`.
    ///
    /// Split modes with a vertical axis reserve the header through the side
    /// insets instead, so nothing moves.
    fn translation(&self, mode: ResolvedLayoutMode) -> (f32, f32) {
        let (dx, dy) = self.header_footprint();
        match mode {
            ResolvedLayoutMode::Vertical => (dx, dy),
            ResolvedLayoutMode::Horizontal(_) => (dx, 0.0),
        }
    }

    fn item_attributes(&self, index_path: IndexPath) -> Option<LayoutAttributes> {
        let natural = self.base.natural_item_frame(index_path)?;
        let (dx, dy) = self.translation(self.layout_mode());
        Some(LayoutAttributes::new(
            ElementKind::Cell,
            index_path,
            natural.offset_by(dx, dy),
            CELL_Z_INDEX,
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
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::content::Sections;

    fn rows_config() -> LayoutConfiguration {
        LayoutConfiguration {
            main_header_reference_size: Size::new(375.0, 100.0),
            flow: FlowMetrics {
                item_size: Size::new(375.0, 100.0),
                minimum_line_spacing: 0.0,
                minimum_interitem_spacing: 0.0,
                ..FlowMetrics::default()
            },
            ..LayoutConfiguration::default()
        }
    }

    fn engine(config: LayoutConfiguration) -> StickySplitLayout<Sections> {
        StickySplitLayout::new(
            config,
            Viewport::new(Size::new(375.0, 667.0)),
            Sections::uniform(1, 10),
        )
    }

    #[test]
    fn test_new_engine_needs_layout() {
        let mut layout = engine(rows_config());
        assert!(layout.needs_layout());
        layout.layout_if_needed();
        assert!(!layout.needs_layout());
    }

    #[test]
    fn test_every_setter_invalidates() {
        let mut layout = engine(rows_config());
        type Edit = fn(&mut StickySplitLayout<Sections>);
        let edits: [Edit; 14] = [
            |l| l.set_scroll_axis(ScrollAxis::Horizontal),
            |l| l.set_enforced_layout_mode(LayoutMode::Vertical),
            |l| l.set_main_header_reference_size(Size::new(1.0, 1.0)),
            |l| l.set_main_header_minimum_reference_size(Size::new(1.0, 1.0)),
            |l| l.set_main_header_maximum_reference_size(Size::new(1.0, 1.0)),
            |l| l.set_main_header_pins_to_visible_bounds(true),
            |l| l.set_main_header_z_position(MainHeaderZPosition::AboveAll),
            |l| l.set_section_headers_pin_to_visible_bounds(true),
            |l| l.set_section_footers_pin_to_visible_bounds(true),
            |l| l.set_flow_metrics(FlowMetrics::default()),
            |l| l.set_content_offset(Point::new(0.0, 10.0)),
            |l| l.resize(Size::new(400.0, 400.0)),
            |l| l.set_attached(true),
            |l| {
                l.content_mut();
            },
        ];
        for edit in edits {
            layout.layout_if_needed();
            edit(&mut layout);
            assert!(layout.needs_layout());
        }
    }

    #[test]
    fn test_listener_sees_invalidation() {
        let mut layout = engine(rows_config());
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        layout.set_invalidation_listener(Some(Box::new(move || seen.set(seen.get() + 1))));
        layout.set_content_offset(Point::new(0.0, 50.0));
        layout.set_main_header_pins_to_visible_bounds(true);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_initial_inset_captured_once() {
        let mut viewport = Viewport::new(Size::new(375.0, 667.0));
        viewport.safe_area_insets = EdgeInsets::new(44.0, 0.0, 34.0, 0.0);
        let mut layout = StickySplitLayout::new(rows_config(), viewport, Sections::uniform(1, 3));
        layout.layout_if_needed();
        let first = layout.initial_inset().unwrap();
        assert_eq!(first, EdgeInsets::new(44.0, 0.0, 34.0, 0.0));

        layout.set_safe_area_insets(EdgeInsets::new(0.0, 44.0, 21.0, 44.0));
        layout.layout_if_needed();
        assert_eq!(layout.initial_inset(), Some(first));
    }

    #[test]
    fn test_split_left_reserves_header_width_in_left_inset() {
        let mut config = rows_config();
        config.enforced_layout_mode = LayoutMode::Horizontal(HorizontalSide::Left);
        let mut viewport = Viewport::new(Size::new(667.0, 375.0));
        viewport.safe_area_insets = EdgeInsets::new(0.0, 44.0, 0.0, 44.0);
        let mut layout = StickySplitLayout::new(config, viewport, Sections::uniform(1, 3));
        layout.layout_if_needed();

        let viewport = layout.viewport();
        assert_eq!(viewport.content_inset.left, 375.0);
        assert_eq!(viewport.content_inset.right, 0.0);
        let adjusted = viewport.adjusted_content_inset();
        assert_eq!(adjusted.left, 419.0);
        assert_eq!(adjusted.right, 44.0);
    }

    #[test]
    fn test_split_right_updates_indicator_insets() {
        let mut config = rows_config();
        config.main_header_reference_size = Size::new(200.0, 100.0);
        config.enforced_layout_mode = LayoutMode::Horizontal(HorizontalSide::Right);
        let mut layout = engine(config);
        layout.layout_if_needed();

        let viewport = layout.viewport();
        assert_eq!(viewport.adjusted_content_inset().right, 200.0);
        assert_eq!(viewport.scroll_indicator_insets.right, 200.0);
        assert_eq!(viewport.scroll_indicator_insets.left, 0.0);
    }

    #[test]
    fn test_cells_shift_below_header_in_vertical_mode() {
        let mut layout = engine(rows_config());
        let cell = layout.attributes_for_item(IndexPath::new(0, 0)).unwrap();
        assert_eq!(cell.frame, Rect::new(0.0, 100.0, 375.0, 100.0));
        assert_eq!(cell.z_index, CELL_Z_INDEX);
    }

    #[test]
    fn test_cells_stay_put_in_split_mode_with_vertical_axis() {
        let mut config = rows_config();
        config.enforced_layout_mode = LayoutMode::Horizontal(HorizontalSide::Right);
        let mut layout = engine(config);
        let cell = layout.attributes_for_item(IndexPath::new(0, 2)).unwrap();
        assert_eq!(cell.frame.y, 200.0);
    }

    #[test]
    fn test_cell_kind_routes_to_item_query() {
        let mut layout = engine(rows_config());
        let path = IndexPath::new(0, 4);
        assert_eq!(
            layout.attributes_for_supplementary(ElementKind::Cell, path),
            layout.attributes_for_item(path)
        );
    }

    #[test]
    fn test_detached_content_size_is_zero() {
        let mut layout = engine(rows_config());
        layout.set_attached(false);
        assert_eq!(layout.content_size(), Size::ZERO);
    }
}
