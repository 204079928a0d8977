//! Content provider: how many sections and items exist, and how big they are.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::types::{IndexPath, Size};

/// Host data source and size delegate.
///
/// The size methods return `None` to fall back to the configured defaults in
/// [`FlowMetrics`](crate::config::FlowMetrics).
pub trait ContentProvider {
    fn number_of_sections(&self) -> usize;

    fn number_of_items(&self, section: usize) -> usize;

    fn item_size(&self, _index_path: IndexPath) -> Option<Size> {
        None
    }

    fn header_reference_size(&self, _section: usize) -> Option<Size> {
        None
    }

    fn footer_reference_size(&self, _section: usize) -> Option<Size> {
        None
    }
}

/// One section of a [`Sections`] provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionModel {
    /// Number of items in the section.
    pub items: usize,
    pub header_size: Option<Size>,
    pub footer_size: Option<Size>,
    /// Size applied to every item of this section.
    pub item_size: Option<Size>,
}

impl SectionModel {
    pub fn new(items: usize) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn with_header(mut self, size: Size) -> Self {
        self.header_size = Some(size);
        self
    }

    pub fn with_footer(mut self, size: Size) -> Self {
        self.footer_size = Some(size);
        self
    }

    pub fn with_item_size(mut self, size: Size) -> Self {
        self.item_size = Some(size);
        self
    }
}

/// A ready-made provider over a list of sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sections(pub Vec<SectionModel>);

impl Sections {
    pub fn new(sections: Vec<SectionModel>) -> Self {
        Self(sections)
    }

    /// `count` sections of `items` items each.
    pub fn uniform(count: usize, items: usize) -> Self {
        Self(vec![SectionModel::new(items); count])
    }

    pub fn get(&self, section: usize) -> Option<&SectionModel> {
        self.0.get(section)
    }

    /// Reject negative or non-finite size overrides, naming the first one found.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidConfig`] for the offending field.
    pub fn validate(&self) -> Result<()> {
        for (index, section) in self.0.iter().enumerate() {
            let sizes = [
                ("headerSize", section.header_size),
                ("footerSize", section.footer_size),
                ("itemSize", section.item_size),
            ];
            for (name, size) in sizes {
                let Some(size) = size else { continue };
                if !size.is_valid() {
                    return Err(LayoutError::InvalidConfig(format!(
                        "sections[{index}].{name} must be finite and non-negative, got {}x{}",
                        size.width, size.height
                    )));
                }
            }
        }
        Ok(())
    }
}

impl ContentProvider for Sections {
    fn number_of_sections(&self) -> usize {
        self.0.len()
    }

    fn number_of_items(&self, section: usize) -> usize {
        self.get(section).map_or(0, |s| s.items)
    }

    fn item_size(&self, index_path: IndexPath) -> Option<Size> {
        self.get(index_path.section).and_then(|s| s.item_size)
    }

    fn header_reference_size(&self, section: usize) -> Option<Size> {
        self.get(section).and_then(|s| s.header_size)
    }

    fn footer_reference_size(&self, section: usize) -> Option<Size> {
        self.get(section).and_then(|s| s.footer_size)
    }
}
