//! `PeriodSet` — a normalized set of disjoint, non-adjacent periods.
//!
//! Normalization merges any pair of input periods that overlap or
//! touch, leaving the minimal sorted representation. Every `PeriodSet`
//! in this crate is normalized by construction; nothing downstream
//! re-checks that invariant.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::collections::base::Collection;
use crate::collections::datetime::bounds::{cmp_bounds, BoundSide};
use crate::collections::datetime::period::Period;
use crate::errors::{Result, TemporalError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodSet {
    periods: Vec<Period>,
    span: Period,
}

impl PeriodSet {
    /// Builds a normalized set from arbitrary (possibly overlapping,
    /// touching, or unsorted) input periods.
    pub fn new(periods: Vec<Period>) -> Result<Self> {
        if periods.is_empty() {
            return Err(TemporalError::domain(
                "a period set must contain at least one period",
            ));
        }
        let periods = normalize(periods);
        let span = Period::new(
            periods.first().unwrap().lower(),
            periods.last().unwrap().upper(),
            periods.first().unwrap().lower_inc(),
            periods.last().unwrap().upper_inc(),
        )?;
        Ok(PeriodSet { periods, span })
    }

    /// Builds directly from periods already known to be normalized
    /// (sorted, disjoint, non-adjacent). Used by operations — like
    /// intersection — that can prove the result is already normalized
    /// and want to skip re-running the merge-walk.
    pub fn from_normalized(periods: Vec<Period>) -> Result<Self> {
        if periods.is_empty() {
            return Err(TemporalError::domain(
                "a period set must contain at least one period",
            ));
        }
        debug_assert!(is_normalized(&periods), "periods are not normalized");
        let span = Period::new(
            periods.first().unwrap().lower(),
            periods.last().unwrap().upper(),
            periods.first().unwrap().lower_inc(),
            periods.last().unwrap().upper_inc(),
        )?;
        Ok(PeriodSet { periods, span })
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn period_n(&self, n: usize) -> Option<Period> {
        self.periods.get(n).copied()
    }

    pub fn span(&self) -> Period {
        self.span
    }

    fn period_containing(&self, t: DateTime<Utc>) -> std::result::Result<usize, usize> {
        self.periods.binary_search_by(|p| {
            if p.contains_instant(t) {
                Ordering::Equal
            } else if p.lower() > t {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        })
    }

    /// Set union, normalized by merge-walk over the combined, sorted
    /// period list.
    pub fn union(&self, other: &PeriodSet) -> PeriodSet {
        let mut all: Vec<Period> = self.periods.clone();
        all.extend_from_slice(&other.periods);
        PeriodSet::new(all).expect("union of two non-empty period sets is non-empty")
    }

    /// Set intersection: walk both sorted period lists together,
    /// collecting pairwise intersections.
    pub fn intersection(&self, other: &PeriodSet) -> Option<PeriodSet> {
        let mut result = Vec::new();
        let (mut i, mut j) = (0usize, 0usize);
        while i < self.periods.len() && j < other.periods.len() {
            let a = self.periods[i];
            let b = other.periods[j];
            if let Some(overlap) = a.intersection(&b) {
                result.push(overlap);
            }
            if a.upper() < b.upper() {
                i += 1;
            } else if b.upper() < a.upper() {
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

    /// Set difference `self \ other`.
    pub fn minus(&self, other: &PeriodSet) -> Option<PeriodSet> {
        let mut result = Vec::new();
        for &p in &self.periods {
            let mut remaining = vec![p];
            for &q in &other.periods {
                if !q.overlaps(&p) {
                    continue;
                }
                let mut next = Vec::new();
                for r in remaining {
                    next.extend(subtract_period(&r, &q));
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

    pub fn contains_instant(&self, t: DateTime<Utc>) -> bool {
        self.period_containing(t).is_ok()
    }

    pub fn overlaps_period(&self, p: &Period) -> bool {
        self.periods.iter().any(|q| q.overlaps(p))
    }
}

impl Collection for PeriodSet {
    type Type = DateTime<Utc>;

    fn n(&self) -> usize {
        self.periods.len()
    }

    fn contains(&self, content: &DateTime<Utc>) -> bool {
        self.contains_instant(*content)
    }
}

/// `p` minus `q`, assuming they overlap. Produces 0, 1, or 2 pieces.
///
/// `pub(crate)`: reused by `relations::difference` to implement
/// set-difference generically over every `TimeSet` pairing, not just
/// `PeriodSet`×`PeriodSet`.
pub(crate) fn subtract_period(p: &Period, q: &Period) -> Vec<Period> {
    let mut pieces = Vec::new();
    let left_key = |period: &Period| (period.lower(), BoundSide::Lower, period.lower_inc());
    let (pl, pls, pli) = left_key(p);
    let (ql, qls, qli) = left_key(q);
    if cmp_bounds(pl, ql, pls, qls, pli, qli) == Ordering::Less {
        if let Ok(left) = Period::new(p.lower(), q.lower(), p.lower_inc(), !q.lower_inc()) {
            pieces.push(left);
        }
    }
    let right_key = |period: &Period| (period.upper(), BoundSide::Upper, period.upper_inc());
    let (pu, pus, pui) = right_key(p);
    let (qu, qus, qui) = right_key(q);
    if cmp_bounds(qu, pu, qus, pus, qui, pui) == Ordering::Less {
        if let Ok(right) = Period::new(q.upper(), p.upper(), !q.upper_inc(), p.upper_inc()) {
            pieces.push(right);
        }
    }
    pieces
}

fn is_normalized(periods: &[Period]) -> bool {
    periods
        .windows(2)
        .all(|w| !w[0].overlaps(&w[1]) && !w[0].is_adjacent(&w[1]) && w[0].lower() < w[1].lower())
}

/// Sorts by lower bound and merges overlapping/adjacent periods via a
/// single left-to-right walk — normalization algorithm.
fn normalize(mut periods: Vec<Period>) -> Vec<Period> {
    periods.sort_by(|a, b| {
        let (av, as_, ai) = (a.lower(), BoundSide::Lower, a.lower_inc());
        let (bv, bs_, bi) = (b.lower(), BoundSide::Lower, b.lower_inc());
        cmp_bounds(av, bv, as_, bs_, ai, bi)
    });
    let mut merged: Vec<Period> = Vec::with_capacity(periods.len());
    for p in periods {
        match merged.last_mut() {
            Some(last) if last.overlaps(&p) || last.is_adjacent(&p) => {
                *last = last.union(&p).expect("overlapping/adjacent periods always union");
            }
            _ => merged.push(p),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(n: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(n, 0).unwrap()
    }

    fn p(lo: i64, hi: i64, li: bool, ui: bool) -> Period {
        Period::new(t(lo), t(hi), li, ui).unwrap()
    }

    #[test]
    fn normalization_merges_overlaps_and_adjacency() {
        let set = PeriodSet::new(vec![
                p(0, 10, true, false),
                p(10, 20, true, false),
                p(25, 30, true, false),
        ])
            .unwrap();
        assert_eq!(set.n(), 2);
        assert_eq!(set.period_n(0).unwrap().lower(), t(0));
        assert_eq!(set.period_n(0).unwrap().upper(), t(20));
        assert_eq!(set.period_n(1).unwrap().lower(), t(25));
    }

    #[test]
    fn span_covers_first_and_last_periods() {
        let set = PeriodSet::new(vec![p(25, 30, true, false), p(0, 10, true, false)]).unwrap();
        assert_eq!(set.span().lower(), t(0));
        assert_eq!(set.span().upper(), t(30));
    }

    #[test]
    fn intersection_of_disjoint_sets_is_none() {
        let a = PeriodSet::new(vec![p(0, 10, true, false)]).unwrap();
        let b = PeriodSet::new(vec![p(20, 30, true, false)]).unwrap();
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn intersection_overlapping_pieces() {
        let a = PeriodSet::new(vec![p(0, 10, true, false)]).unwrap();
        let b = PeriodSet::new(vec![p(5, 15, true, false)]).unwrap();
        let i = a.intersection(&b).unwrap();
        assert_eq!(i.n(), 1);
        assert_eq!(i.period_n(0).unwrap().lower(), t(5));
        assert_eq!(i.period_n(0).unwrap().upper(), t(10));
    }

    #[test]
    fn difference_splits_into_two_pieces() {
        let a = PeriodSet::new(vec![p(0, 20, true, false)]).unwrap();
        let b = PeriodSet::new(vec![p(5, 10, true, false)]).unwrap();
        let d = a.minus(&b).unwrap();
        assert_eq!(d.n(), 2);
        assert_eq!(d.period_n(0).unwrap().lower(), t(0));
        assert_eq!(d.period_n(0).unwrap().upper(), t(5));
        assert_eq!(d.period_n(1).unwrap().lower(), t(10));
        assert_eq!(d.period_n(1).unwrap().upper(), t(20));
    }

    #[test]
    fn contains_instant_inside_any_period() {
        let set = PeriodSet::new(vec![p(0, 10, true, false), p(20, 30, true, false)]).unwrap();
        assert!(set.contains_instant(t(25)));
        assert!(!set.contains_instant(t(15)));
    }
}
