//! Viewport state and the natural geometry the sticky-split engine adjusts.
//!
//! This module handles:
//! - Viewport state (bounds, content offset, insets, attachment)
//! - Pre-computing natural cell and supplementary frames of a flow layout
//! - Binary search over section spans for rectangle queries

mod flow;
mod viewport;

pub use flow::{BaseGeometryProvider, FlowInput, FlowLayout};
pub use viewport::Viewport;
