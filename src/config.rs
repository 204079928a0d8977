//! Layout configuration and stacking constants.
//!
//! `LayoutConfiguration` carries every knob the host can turn. It loads from
//! JSON with a default for each missing field, so a scenario file only needs to
//! name what differs from the defaults.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::types::{EdgeInsets, LayoutMode, MainHeaderZPosition, ScrollAxis, Size};

/// Stacking index of ordinary cells.
pub const CELL_Z_INDEX: i32 = 0;

/// Stacking index of section headers and footers.
pub const HEADER_FOOTER_Z_INDEX: i32 = 1024;

/// Main header stacking index for [`MainHeaderZPosition::AboveAll`].
pub const MAIN_HEADER_TOP_Z_INDEX: i32 = 2000;

/// Main header stacking index for [`MainHeaderZPosition::BelowHeadersAndFooters`].
pub const MAIN_HEADER_BELOW_HEADER_FOOTER_Z_INDEX: i32 = HEADER_FOOTER_Z_INDEX - 1;

/// Main header stacking index for [`MainHeaderZPosition::BelowAll`].
pub const MAIN_HEADER_BELOW_ALL_Z_INDEX: i32 = -1024;

/// Default item size of the base flow layout.
pub const DEFAULT_ITEM_SIZE: Size = Size::new(50.0, 50.0);

/// Default spacing between lines and between items of the base flow layout.
pub const DEFAULT_SPACING: f32 = 10.0;

/// Parameters of the base flow layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowMetrics {
    /// Size of every item the content provider does not size itself.
    pub item_size: Size,
    /// Header size for sections without an override.
    pub header_reference_size: Size,
    /// Footer size for sections without an override.
    pub footer_reference_size: Size,
    /// Spacing between consecutive lines along the scroll axis.
    pub minimum_line_spacing: f32,
    /// Spacing between items of one line.
    pub minimum_interitem_spacing: f32,
    /// Margins around the items of each section (headers and footers sit outside).
    pub section_inset: EdgeInsets,
}

impl Default for FlowMetrics {
    fn default() -> Self {
        Self {
            item_size: DEFAULT_ITEM_SIZE,
            header_reference_size: Size::ZERO,
            footer_reference_size: Size::ZERO,
            minimum_line_spacing: DEFAULT_SPACING,
            minimum_interitem_spacing: DEFAULT_SPACING,
            section_inset: EdgeInsets::ZERO,
        }
    }
}

/// Everything the host configures on the layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfiguration {
    pub scroll_axis: ScrollAxis,
    /// Requested mode; resolved against the viewport before use.
    pub enforced_layout_mode: LayoutMode,
    /// Main header size. Zero leaves the main header out of the layout.
    pub main_header_reference_size: Size,
    /// Size the main header shrinks to while scrolling.
    pub main_header_minimum_reference_size: Size,
    /// Cap on elastic growth.
    pub main_header_maximum_reference_size: Size,
    pub main_header_pins_to_visible_bounds: bool,
    pub main_header_z_position: MainHeaderZPosition,
    pub section_headers_pin_to_visible_bounds: bool,
    pub section_footers_pin_to_visible_bounds: bool,
    pub flow: FlowMetrics,
}

impl Default for LayoutConfiguration {
    fn default() -> Self {
        Self {
            scroll_axis: ScrollAxis::Vertical,
            enforced_layout_mode: LayoutMode::default(),
            main_header_reference_size: Size::ZERO,
            main_header_minimum_reference_size: Size::ZERO,
            main_header_maximum_reference_size: Size::MAX,
            main_header_pins_to_visible_bounds: false,
            main_header_z_position: MainHeaderZPosition::BelowAll,
            section_headers_pin_to_visible_bounds: false,
            section_footers_pin_to_visible_bounds: false,
            flow: FlowMetrics::default(),
        }
    }
}

impl LayoutConfiguration {
    /// Parse a configuration from JSON and validate it.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject sizes and spacings that are negative, NaN or infinite.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("mainHeaderReferenceSize", self.main_header_reference_size),
            (
                "mainHeaderMinimumReferenceSize",
                self.main_header_minimum_reference_size,
            ),
            (
                "mainHeaderMaximumReferenceSize",
                self.main_header_maximum_reference_size,
            ),
            ("flow.itemSize", self.flow.item_size),
            ("flow.headerReferenceSize", self.flow.header_reference_size),
            ("flow.footerReferenceSize", self.flow.footer_reference_size),
        ];
        for (name, size) in sizes {
            if !size.is_valid() {
                return Err(LayoutError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {}x{}",
                    size.width, size.height
                )));
            }
        }

        let spacings = [
            ("flow.minimumLineSpacing", self.flow.minimum_line_spacing),
            (
                "flow.minimumInteritemSpacing",
                self.flow.minimum_interitem_spacing,
            ),
            ("flow.sectionInset.top", self.flow.section_inset.top),
            ("flow.sectionInset.left", self.flow.section_inset.left),
            ("flow.sectionInset.bottom", self.flow.section_inset.bottom),
            ("flow.sectionInset.right", self.flow.section_inset.right),
        ];
        for (name, value) in spacings {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::HorizontalSide;

    #[test]
    fn test_defaults() {
        let config = LayoutConfiguration::default();
        assert_eq!(config.scroll_axis, ScrollAxis::Vertical);
        assert_eq!(
            config.enforced_layout_mode,
            LayoutMode::Implicit(HorizontalSide::Left)
        );
        assert!(config.main_header_reference_size.is_zero());
        assert_eq!(config.main_header_maximum_reference_size, Size::MAX);
        assert_eq!(config.main_header_z_position, MainHeaderZPosition::BelowAll);
        assert!(!config.section_headers_pin_to_visible_bounds);
        assert!(!config.section_footers_pin_to_visible_bounds);
        assert_eq!(config.flow.item_size, DEFAULT_ITEM_SIZE);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = LayoutConfiguration::from_json(
            r#"{
                "scrollAxis": "horizontal",
                "mainHeaderReferenceSize": {"width": 100, "height": 300},
                "sectionHeadersPinToVisibleBounds": true,
                "flow": {"minimumLineSpacing": 0}
            }"#,
        )
        .unwrap();
        assert_eq!(config.scroll_axis, ScrollAxis::Horizontal);
        assert_eq!(config.main_header_reference_size, Size::new(100.0, 300.0));
        assert!(config.section_headers_pin_to_visible_bounds);
        assert_eq!(config.flow.minimum_line_spacing, 0.0);
        assert_eq!(config.flow.minimum_interitem_spacing, DEFAULT_SPACING);
        assert_eq!(config.main_header_maximum_reference_size, Size::MAX);
    }

    #[test]
    fn test_negative_size_rejected() {
        let err = LayoutConfiguration::from_json(
            r#"{"mainHeaderMinimumReferenceSize": {"width": 0, "height": -64}}"#,
        )
        .unwrap_err();
        match err {
            LayoutError::InvalidConfig(msg) => {
                assert!(msg.contains("mainHeaderMinimumReferenceSize"), "{msg}");
            }
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_spacing_rejected() {
        let mut config = LayoutConfiguration::default();
        config.flow.minimum_interitem_spacing = -1.0;
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        assert!(matches!(
            LayoutConfiguration::from_json("{ not json"),
            Err(LayoutError::Json(_))
        ));
    }
}
