//! Scripted scroll sessions.
//!
//! A scenario describes a host (configuration, viewport, sections) and a list
//! of offsets to visit. Running it records what the layout produces at each
//! offset, which is what the CLI prints and the benches replay.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfiguration;
use crate::content::Sections;
use crate::engine::StickySplitLayout;
use crate::error::Result;
use crate::layout::Viewport;
use crate::types::{LayoutAttributes, Point, ResolvedLayoutMode, Size};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scenario {
    pub config: LayoutConfiguration,
    pub viewport: Viewport,
    pub sections: Sections,
    /// Content offsets to visit, in order.
    pub offsets: Vec<Point>,
}

/// What the layout reported at one offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSnapshot {
    pub offset: Point,
    pub mode: ResolvedLayoutMode,
    pub content_size: Size,
    pub attributes: Vec<LayoutAttributes>,
}

impl Scenario {
    /// Parse a scenario and validate its configuration and section sizes.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or a size is invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.config.validate()?;
        scenario.sections.validate()?;
        Ok(scenario)
    }

    /// Read and parse a scenario file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// A fresh engine for this scenario, before any offset is applied.
    pub fn build_layout(&self) -> StickySplitLayout<Sections> {
        StickySplitLayout::new(self.config, self.viewport, self.sections.clone())
    }

    /// Visit every offset and record the elements in the visible rect.
    pub fn run(&self) -> Vec<FrameSnapshot> {
        let mut layout = self.build_layout();
        self.offsets
            .iter()
            .map(|&offset| {
                layout.set_content_offset(offset);
                let visible = layout.viewport().visible_rect();
                let attributes = layout.attributes_in_rect(visible);
                FrameSnapshot {
                    offset,
                    mode: layout.layout_mode(),
                    content_size: layout.content_size(),
                    attributes,
                }
            })
            .collect()
    }
}
