//! Bounding-box types.

pub mod stbox;

pub use stbox::STBox;
