//! Data types shared by the layout engine and its hosts.

mod attributes;
mod geometry;
mod mode;

pub use attributes::*;
pub use geometry::*;
pub use mode::*;
