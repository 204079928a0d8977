//! sticky-split - layout engine for scrolling collections with a main header
//!
//! Computes frames and stacking order for a sectioned grid of cells:
//! - Section headers and footers that pin to the visible bounds
//! - An elastic main header that stretches on overscroll and shrinks to a minimum
//! - A split mode that moves the main header beside the content in wide viewports
//! - Vertical or horizontal scrolling
//!
//! # Usage (Rust)
//!
//! ```
//! use sticky_split::{LayoutConfiguration, Sections, Size, StickySplitLayout, Viewport};
//!
//! let config = LayoutConfiguration {
//!     main_header_reference_size: Size::new(375.0, 200.0),
//!     ..LayoutConfiguration::default()
//! };
//! let mut layout = StickySplitLayout::new(
//!     config,
//!     Viewport::new(Size::new(375.0, 667.0)),
//!     Sections::uniform(3, 12),
//! );
//! let visible = layout.viewport().visible_rect();
//! let attributes = layout.attributes_in_rect(visible);
//! assert!(!attributes.is_empty());
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { StickySplitView } from 'sticky-split';
//! await init();
//! const view = new StickySplitView(configJson, width, height);
//! view.set_sections(sections);
//! const attributes = view.attributes_in_rect(0, scrollTop, width, height);
//! ```

pub mod bindings;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod layout;
pub mod scenario;
pub mod types;

use wasm_bindgen::prelude::*;

pub use bindings::StickySplitView;
pub use config::{FlowMetrics, LayoutConfiguration};
pub use content::{ContentProvider, SectionModel, Sections};
pub use engine::StickySplitLayout;
pub use error::{LayoutError, Result};
pub use layout::{BaseGeometryProvider, FlowInput, FlowLayout, Viewport};
pub use scenario::{FrameSnapshot, Scenario};

pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
