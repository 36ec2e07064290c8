//! Text and binary encodings for the collection and temporal types:
//! WKT/EWKT, WKB/HexWKB, and MF-JSON.

pub mod cursor;
pub mod mfjson;
pub mod wkb;
pub mod wkt;

pub use wkb::WkbVariant;
