//! Shared vocabulary for the time-set collections ([`crate::collections::datetime`]).
//!
//! A minimal contract every ordered set-like value satisfies, independent
//! of what it actually stores.

/// A finite, ordered collection supporting the base set-relations used
/// throughout this crate.
pub trait Collection {
    /// The element type contained in the collection (e.g. `DateTime<Utc>`
    /// for a `TimestampSet`, `Period` for a `PeriodSet`).
    type Type;

    /// Number of elements (instants for `TimestampSet`, periods for
    /// `PeriodSet`).
    fn n(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.n() == 0
    }

    /// Whether `self` contains `content` as an exact element or, for
    /// interval-like collections, within one of its intervals.
    fn contains(&self, content: &Self::Type) -> bool;
}
