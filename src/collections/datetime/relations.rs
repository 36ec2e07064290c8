//! The 16-signature time-set relation matrix.
//!
//! `contains`/`overlaps`/`before`/`after`/`overbefore`/`overafter` are
//! defined once, generically, over every pairing of `{DateTime<Utc>,
//! TimestampSet, Period, PeriodSet}`, by reducing each operand to its
//! constituent periods (a single degenerate period for an instant) and
//! its bounding span. Nothing here re-implements the bound comparison
//! policy — it all goes through [`Period`]'s own methods, which in turn
//! go through `cmp_bounds`.

use chrono::{DateTime, Utc};

use crate::collections::datetime::period::Period;
use crate::collections::datetime::period_set::{subtract_period, PeriodSet};
use crate::collections::datetime::timestamp_set::TimestampSet;

/// Anything reducible to a bounding [`Period`] and a list of constituent
/// periods (instants become single-point periods).
pub trait TimeSet {
    fn span(&self) -> Period;
    fn periods(&self) -> Vec<Period>;
}

impl TimeSet for DateTime<Utc> {
    fn span(&self) -> Period {
        Period::instant(*self)
    }

    fn periods(&self) -> Vec<Period> {
        vec![Period::instant(*self)]
    }
}

impl TimeSet for TimestampSet {
    fn span(&self) -> Period {
        TimestampSet::span(self)
    }

    fn periods(&self) -> Vec<Period> {
        self.instants().iter().map(|t| Period::instant(*t)).collect()
    }
}

impl TimeSet for Period {
    fn span(&self) -> Period {
        *self
    }

    fn periods(&self) -> Vec<Period> {
        vec![*self]
    }
}

impl TimeSet for PeriodSet {
    fn span(&self) -> Period {
        PeriodSet::span(self)
    }

    fn periods(&self) -> Vec<Period> {
        PeriodSet::periods(self).to_vec()
    }
}

/// Whether `a` and `b` share at least one instant.
pub fn overlaps<A: TimeSet + ?Sized, B: TimeSet + ?Sized>(a: &A, b: &B) -> bool {
    let pb = b.periods();
    a.periods().iter().any(|pa| pb.iter().any(|q| pa.overlaps(q)))
}

/// Whether every instant of `b` falls within `a`.
pub fn contains<A: TimeSet + ?Sized, B: TimeSet + ?Sized>(a: &A, b: &B) -> bool {
    let pa = a.periods();
    b.periods()
        .iter()
        .all(|pb| pa.iter().any(|q| q.contains_period(pb)))
}

/// `a` entirely precedes `b`: `a`'s span ends strictly before `b`'s
/// span begins, with no touching.
pub fn before<A: TimeSet + ?Sized, B: TimeSet + ?Sized>(a: &A, b: &B) -> bool {
    a.span().is_before(&b.span())
}

pub fn after<A: TimeSet + ?Sized, B: TimeSet + ?Sized>(a: &A, b: &B) -> bool {
    before(b, a)
}

/// `a`'s span does not extend past `b`'s span's end.
pub fn overbefore<A: TimeSet + ?Sized, B: TimeSet + ?Sized>(a: &A, b: &B) -> bool {
    a.span().is_over_or_before(&b.span())
}

/// `a`'s span does not start before `b`'s span's start.
pub fn overafter<A: TimeSet + ?Sized, B: TimeSet + ?Sized>(a: &A, b: &B) -> bool {
    a.span().is_over_or_after(&b.span())
}

/// `a` and `b` don't overlap, but some period of one touches some period
/// of the other with no gap between them.
pub fn adjacent<A: TimeSet + ?Sized, B: TimeSet + ?Sized>(a: &A, b: &B) -> bool {
    if overlaps(a, b) {
        return false;
    }
    let pb = b.periods();
    a.periods().iter().any(|pa| pb.iter().any(|q| pa.is_adjacent(q)))
}

/// Set union `a ∪ b`, normalized over the combined constituent periods.
pub fn union<A: TimeSet + ?Sized, B: TimeSet + ?Sized>(a: &A, b: &B) -> PeriodSet {
    let mut periods = a.periods();
    periods.extend(b.periods());
    PeriodSet::new(periods).expect("union of two non-empty time sets is non-empty")
}

/// Set intersection `a ∩ b`: merge-walk both sorted constituent-period
/// lists, collecting pairwise overlaps.
pub fn intersection<A: TimeSet + ?Sized, B: TimeSet + ?Sized>(a: &A, b: &B) -> Option<PeriodSet> {
    let pa = a.periods();
    let pb = b.periods();
    let mut result = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);
    while i < pa.len() && j < pb.len() {
        let x = pa[i];
        let y = pb[j];
        if let Some(overlap) = x.intersection(&y) {
            result.push(overlap);
        }
        if x.upper() < y.upper() {
            i += 1;
        } else if y.upper() < x.upper() {
            j += 1;
        } else {
            i += 1;
            j += 1;
        }
    }
    if result.is_empty() {
        None
    } else {
        Some(PeriodSet::from_normalized(result).expect("pairwise intersections stay disjoint"))
    }
}

/// Set difference `a ∖ b`: subtract every constituent period of `b` from
/// every constituent period of `a`.
pub fn difference<A: TimeSet + ?Sized, B: TimeSet + ?Sized>(a: &A, b: &B) -> Option<PeriodSet> {
    let pb = b.periods();
    let mut result = Vec::new();
    for p in a.periods() {
        let mut remaining = vec![p];
        for q in &pb {
            if !q.overlaps(&p) {
                continue;
            }
            let mut next = Vec::new();
            for r in remaining {
                next.extend(subtract_period(&r, q));
            }
            remaining = next;
        }
        result.extend(remaining);
    }
    if result.is_empty() {
        None
    } else {
        Some(PeriodSet::from_normalized(result).expect("subtraction leaves disjoint pieces"))
    }
}
