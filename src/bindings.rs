//! JavaScript entry point: a sticky-split layout driven from a web host.
//!
//! The host owns the scroll container and the views; it forwards scroll and
//! resize events here and positions its elements from the returned attributes.
//!
//! ```javascript
//! import init, { StickySplitView } from 'sticky-split';
//! await init();
//! const view = new StickySplitView(configJson, el.clientWidth, el.clientHeight);
//! view.set_sections([{ items: 20, headerSize: { width: 0, height: 44 } }]);
//! view.set_invalidation_callback(() => requestAnimationFrame(draw));
//! el.addEventListener('scroll', () => view.set_content_offset(el.scrollLeft, el.scrollTop));
//! ```

use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::config::LayoutConfiguration;
use crate::content::Sections;
use crate::engine::StickySplitLayout;
use crate::layout::Viewport;
use crate::types::{EdgeInsets, ElementKind, IndexPath, Point, Rect, Size, MAIN_HEADER_KIND};

/// Layout engine over a list of sections, exported to JavaScript.
#[wasm_bindgen]
pub struct StickySplitView {
    layout: StickySplitLayout<Sections>,
}

#[wasm_bindgen]
impl StickySplitView {
    /// Create a view from configuration JSON and the viewport size.
    ///
    /// # Errors
    /// Returns an error if the configuration is malformed or invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, width: f32, height: f32) -> Result<StickySplitView, JsValue> {
        #[cfg(target_arch = "wasm32")]
        console_error_panic_hook::set_once();

        let config = LayoutConfiguration::from_json(config_json)?;
        Ok(Self {
            layout: StickySplitLayout::new(
                config,
                Viewport::new(Size::new(width, height)),
                Sections::default(),
            ),
        })
    }

    /// The token the host registers the main header view under.
    #[wasm_bindgen]
    pub fn main_element_kind() -> String {
        MAIN_HEADER_KIND.to_string()
    }

    /// Replace the sections from a JS array of `{ items, headerSize?, footerSize?, itemSize? }`.
    ///
    /// # Errors
    /// Returns an error if the value does not describe a list of sections or
    /// a size is negative. The current sections are kept on error.
    #[wasm_bindgen]
    pub fn set_sections(&mut self, sections: JsValue) -> Result<(), JsValue> {
        let sections: Sections = serde_wasm_bindgen::from_value(sections)
            .map_err(|e| JsValue::from_str(&format!("Invalid sections: {e}")))?;
        sections.validate()?;
        *self.layout.content_mut() = sections;
        Ok(())
    }

    /// Replace the sections from a JSON string.
    ///
    /// # Errors
    /// Returns an error if the JSON does not describe a list of sections or a
    /// size is negative.
    #[wasm_bindgen]
    pub fn set_sections_json(&mut self, json: &str) -> Result<(), JsValue> {
        let sections: Sections = serde_json::from_str(json).map_err(crate::LayoutError::from)?;
        sections.validate()?;
        *self.layout.content_mut() = sections;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_bounds(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.layout.set_bounds(Rect::new(x, y, width, height));
    }

    #[wasm_bindgen]
    pub fn set_content_offset(&mut self, x: f32, y: f32) {
        self.layout.set_content_offset(Point::new(x, y));
    }

    /// Move the offset by a wheel or keyboard delta.
    #[wasm_bindgen]
    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32) {
        self.layout.scroll_by(delta_x, delta_y);
    }

    #[wasm_bindgen]
    pub fn resize(&mut self, width: f32, height: f32) {
        self.layout.resize(Size::new(width, height));
    }

    #[wasm_bindgen]
    pub fn set_content_inset(&mut self, top: f32, left: f32, bottom: f32, right: f32) {
        self.layout
            .set_content_inset(EdgeInsets::new(top, left, bottom, right));
    }

    #[wasm_bindgen]
    pub fn set_safe_area_insets(&mut self, top: f32, left: f32, bottom: f32, right: f32) {
        self.layout
            .set_safe_area_insets(EdgeInsets::new(top, left, bottom, right));
    }

    #[wasm_bindgen]
    pub fn set_attached(&mut self, attached: bool) {
        self.layout.set_attached(attached);
    }

    /// Register a JS callback invoked whenever the layout becomes stale.
    #[wasm_bindgen]
    pub fn set_invalidation_callback(&mut self, callback: Option<Function>) {
        let listener = callback.map(|callback| {
            Box::new(move || {
                let _ = callback.call0(&JsValue::NULL);
            }) as Box<dyn FnMut()>
        });
        self.layout.set_invalidation_listener(listener);
    }

    /// `"vertical"`, `"horizontal-left"` or `"horizontal-right"`.
    #[wasm_bindgen]
    pub fn layout_mode(&self) -> String {
        self.layout.layout_mode().as_str().to_string()
    }

    /// Content inset after the layout rewrote it, as `[top, left, bottom, right]`.
    #[wasm_bindgen]
    pub fn adjusted_content_inset(&mut self) -> Vec<f32> {
        self.layout.layout_if_needed();
        let inset = self.layout.viewport().adjusted_content_inset();
        vec![inset.top, inset.left, inset.bottom, inset.right]
    }

    /// Content size as `[width, height]`.
    #[wasm_bindgen]
    pub fn content_size(&mut self) -> Vec<f32> {
        let size = self.layout.content_size();
        vec![size.width, size.height]
    }

    /// Attributes of every element that may be visible in the rect.
    ///
    /// # Errors
    /// Returns an error if the attributes cannot be converted to JS values.
    #[wasm_bindgen]
    pub fn attributes_in_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<JsValue, JsValue> {
        let attributes = self.layout.attributes_in_rect(Rect::new(x, y, width, height));
        serde_wasm_bindgen::to_value(&attributes)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Attributes of one element, or `undefined` when it is not part of the layout.
    ///
    /// # Errors
    /// Returns an error for an unknown kind token.
    #[wasm_bindgen]
    pub fn attributes_for_supplementary(
        &mut self,
        kind: &str,
        section: usize,
        item: usize,
    ) -> Result<JsValue, JsValue> {
        let kind: ElementKind = kind.parse()?;
        let attributes = self
            .layout
            .attributes_for_supplementary(kind, IndexPath::new(section, item));
        serde_wasm_bindgen::to_value(&attributes)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }
}
