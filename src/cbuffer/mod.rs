//! The circular-buffer spatiotemporal kernel: the `Cbuffer` value,
//! its spatial and spatiotemporal relationship predicates, and
//! traversed-area geometry.

pub mod cbuffer;
pub mod spatialrels;
pub mod tempspatialrels;
pub mod traversed_area;

pub use cbuffer::{Cbuffer, MEOS_EPSILON};
pub use traversed_area::TraversedArea;
