//! Endpoint comparison.
//!
//! `cmp_bounds` is the single source of truth for every interval relation in
//! this crate; nothing else re-derives bound-inclusivity policy locally.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Whether an endpoint value is acting as the lower or the upper bound of
/// an interval. Needed because the tie-break at equal values depends on
/// which side the bound is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    Lower,
    Upper,
}

/// Conceptually, each bound is the real value `v` plus an infinitesimal
/// offset: a lower-inclusive bound sits exactly at `v`, a lower-exclusive
/// bound sits at `v + epsilon` (the interval starts just after `v`), an
/// upper-inclusive bound sits exactly at `v`, and an upper-exclusive bound
/// sits at `v - epsilon` (the interval ends just before `v`). Encoding
/// that offset as a small signed class and comparing `(v, class)`
/// lexicographically reproduces every such case directly, including the
/// lower-vs-upper "would the interval be adjacent, touching, or
/// overlapping" case, without special-casing it.
fn epsilon_class(side: BoundSide, inclusive: bool) -> i8 {
    if inclusive {
        0
    } else {
        match side {
            BoundSide::Lower => 1,
            BoundSide::Upper => -1,
        }
    }
}

/// Compare two interval endpoints, treating inclusivity correctly.
///
/// Returns `Ordering::Less`/`Equal`/`Greater` (the C convention's
/// `{-1,0,+1}` expressed as a proper `Ordering`).
pub fn cmp_bounds(
    v1: DateTime<Utc>,
    v2: DateTime<Utc>,
    side1: BoundSide,
    side2: BoundSide,
    inc1: bool,
    inc2: bool,
) -> Ordering {
    match v1.cmp(&v2) {
        Ordering::Equal => epsilon_class(side1, inc1).cmp(&epsilon_class(side2, inc2)),
        other => other,
    }
}

/// `bounds_adjacent(v1, v2, inc1, inc2) = v1 == v2 ∧ (inc1 ⊕ inc2)`.
pub fn bounds_adjacent(v1: DateTime<Utc>, v2: DateTime<Utc>, inc1: bool, inc2: bool) -> bool {
    v1 == v2 && (inc1 ^ inc2)
}
