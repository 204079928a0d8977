use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::error::LayoutError;

/// Token a host uses to register and dequeue the main header view.
pub const MAIN_HEADER_KIND: &str = "StickySplitMainHeader";

/// Token for section header supplementary views.
pub const SECTION_HEADER_KIND: &str = "SectionHeader";

/// Token for section footer supplementary views.
pub const SECTION_FOOTER_KIND: &str = "SectionFooter";

/// Token for ordinary cells.
pub const CELL_KIND: &str = "Cell";

/// Position of an element: section first, then item within the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    #[inline]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// Index path of the supplementary views of `section`.
    #[inline]
    pub const fn section(section: usize) -> Self {
        Self { section, item: 0 }
    }
}

/// The four kinds of element the layout positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    Cell,
    SectionHeader,
    SectionFooter,
    MainHeader,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Cell => CELL_KIND,
            ElementKind::SectionHeader => SECTION_HEADER_KIND,
            ElementKind::SectionFooter => SECTION_FOOTER_KIND,
            ElementKind::MainHeader => MAIN_HEADER_KIND,
        }
    }
}

impl FromStr for ElementKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CELL_KIND => Ok(ElementKind::Cell),
            SECTION_HEADER_KIND => Ok(ElementKind::SectionHeader),
            SECTION_FOOTER_KIND => Ok(ElementKind::SectionFooter),
            MAIN_HEADER_KIND => Ok(ElementKind::MainHeader),
            other => Err(LayoutError::UnknownElementKind(other.to_string())),
        }
    }
}

/// Per-section supplementary kinds understood by the base flow layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupplementaryKind {
    Header,
    Footer,
}

impl From<SupplementaryKind> for ElementKind {
    fn from(kind: SupplementaryKind) -> Self {
        match kind {
            SupplementaryKind::Header => ElementKind::SectionHeader,
            SupplementaryKind::Footer => ElementKind::SectionFooter,
        }
    }
}

/// Geometry of one element for one query.
///
/// Returned by value: a record describes the layout at the moment it was
/// produced and is never updated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutAttributes {
    pub kind: ElementKind,
    pub index_path: IndexPath,
    pub frame: Rect,
    pub z_index: i32,
}

impl LayoutAttributes {
    pub fn new(kind: ElementKind, index_path: IndexPath, frame: Rect, z_index: i32) -> Self {
        Self {
            kind,
            index_path,
            frame,
            z_index,
        }
    }

    #[inline]
    pub fn is_cell(&self) -> bool {
        self.kind == ElementKind::Cell
    }
}
