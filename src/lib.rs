//! Temporal geometric types: time-varying booleans, numbers, text,
//! points, and circular buffers, plus the periods, timestamp sets, and
//! period sets used to index them in time.
//!
//! The crate is organized the way the system it generalizes is:
//! - [`collections`] — `Period`, `TimestampSet`, `PeriodSet`, and the
//!   shared `Collection`/`TimeSet` traits.
//! - [`temporal`] — `TInstant`/`TSequence`/`TSequenceSet` over a tagged
//!   [`temporal::BaseValue`], and the lifting infrastructure that turns
//!   a pointwise function into a temporal one.
//! - [`boxes`] — bounding-box types (`STBox`).
//! - [`cbuffer`] — the circular-buffer kernel: the `Cbuffer` value
//!   itself, its spatial and spatiotemporal relationship predicates,
//!   and traversed-area geometry.
//! - [`geo`] — the GEOS-backed geometry collaborator used by `cbuffer`'s
//!   relationship predicates.
//! - [`serialization`] — WKT/EWKT, WKB/HexWKB, and MF-JSON encodings.
//! - [`errors`] — the domain-coded error taxonomy every public
//!   operation returns instead of panicking.

pub mod boxes;
pub mod cbuffer;
pub mod collections;
pub mod errors;
pub mod geo;
pub mod serialization;
pub mod temporal;

pub mod prelude {
    //! Common imports for working with this crate's types.

    pub use crate::boxes::STBox;
    pub use crate::cbuffer::{Cbuffer, TraversedArea};
    pub use crate::collections::datetime::{Period, PeriodSet, TimestampSet};
    pub use crate::collections::Collection;
    pub use crate::errors::{Result, TemporalError};
    pub use crate::temporal::{BaseValue, TInstant, TInterpolation, TSequence, TSequenceSet, Temporal};
}
