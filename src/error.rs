//! Structured error types for sticky-split.
//!
//! Geometry queries never fail: a missing element is `None`. Errors only come
//! from the edges of the crate (configuration, scenario files, host tokens).

/// All errors that can occur while configuring or driving the layout.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// Configuration value out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Element kind token not produced by this layout.
    #[error("Unknown element kind: {0}")]
    UnknownElementKind(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

impl From<LayoutError> for wasm_bindgen::JsValue {
    fn from(e: LayoutError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
