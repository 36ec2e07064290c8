//! `Period` — a half-open (or closed, per its own flags) time interval.
//!
//! Invariant: lower ≤ upper; an instantaneous period (`lower == upper`)
//! must have both bounds inclusive, since an interval open on either side
//! of a single instant would contain nothing.

use std::cmp::Ordering;

use chrono::{DateTime, TimeDelta, Utc};

use crate::collections::base::Collection;
use crate::collections::datetime::bounds::{bounds_adjacent, cmp_bounds, BoundSide};
use crate::errors::{Result, TemporalError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    lower: DateTime<Utc>,
    upper: DateTime<Utc>,
    lower_inc: bool,
    upper_inc: bool,
}

impl Period {
    /// Builds a period, enforcing invariants.
    pub fn new(
        lower: DateTime<Utc>,
        upper: DateTime<Utc>,
        lower_inc: bool,
        upper_inc: bool,
    ) -> Result<Self> {
        if lower > upper {
            return Err(TemporalError::domain(format!(
                "period lower bound {lower} is after upper bound {upper}"
            )));
        }
        if lower == upper && !(lower_inc && upper_inc) {
            return Err(TemporalError::domain(
                "an instantaneous period must have both bounds inclusive",
            ));
        }
        Ok(Period {
            lower,
            upper,
            lower_inc,
            upper_inc,
        })
    }

    /// A period collapsed to a single inclusive instant.
    pub fn instant(t: DateTime<Utc>) -> Self {
        Period {
            lower: t,
            upper: t,
            lower_inc: true,
            upper_inc: true,
        }
    }

    pub fn lower(&self) -> DateTime<Utc> {
        self.lower
    }

    pub fn upper(&self) -> DateTime<Utc> {
        self.upper
    }

    pub fn lower_inc(&self) -> bool {
        self.lower_inc
    }

    pub fn upper_inc(&self) -> bool {
        self.upper_inc
    }

    pub fn is_instant(&self) -> bool {
        self.lower == self.upper
    }

    pub fn duration(&self) -> TimeDelta {
        self.upper - self.lower
    }

    fn lower_key(&self) -> (DateTime<Utc>, BoundSide, bool) {
        (self.lower, BoundSide::Lower, self.lower_inc)
    }

    fn upper_key(&self) -> (DateTime<Utc>, BoundSide, bool) {
        (self.upper, BoundSide::Upper, self.upper_inc)
    }

    /// Whether `t` falls within this period.
    pub fn contains_instant(&self, t: DateTime<Utc>) -> bool {
        let (lv, ls, li) = self.lower_key();
        let (uv, us, ui) = self.upper_key();
        cmp_bounds(lv, t, ls, BoundSide::Lower, li, true) != Ordering::Greater
            && cmp_bounds(t, uv, BoundSide::Upper, us, true, ui) != Ordering::Greater
    }

    /// Whether `self` contains the whole of `other`.
    pub fn contains_period(&self, other: &Period) -> bool {
        let (sl_v, sl_s, sl_i) = self.lower_key();
        let (ol_v, ol_s, ol_i) = other.lower_key();
        let (su_v, su_s, su_i) = self.upper_key();
        let (ou_v, ou_s, ou_i) = other.upper_key();
        cmp_bounds(sl_v, ol_v, sl_s, ol_s, sl_i, ol_i) != Ordering::Greater
            && cmp_bounds(ou_v, su_v, ou_s, su_s, ou_i, su_i) != Ordering::Greater
    }

    /// Whether `self` and `other` share at least one instant.
    pub fn overlaps(&self, other: &Period) -> bool {
        let (sl_v, sl_s, sl_i) = self.lower_key();
        let (ol_v, ol_s, ol_i) = other.lower_key();
        let (su_v, su_s, su_i) = self.upper_key();
        let (ou_v, ou_s, ou_i) = other.upper_key();
        cmp_bounds(sl_v, ou_v, sl_s, ou_s, sl_i, ou_i) != Ordering::Greater
            && cmp_bounds(ol_v, su_v, ol_s, su_s, ol_i, su_i) != Ordering::Greater
    }

    /// Whether `self` ends exactly where `other` begins (or vice-versa),
    /// with no gap and no overlap.
    pub fn is_adjacent(&self, other: &Period) -> bool {
        (bounds_adjacent(self.upper, other.lower, self.upper_inc, other.lower_inc)
                && !self.overlaps(other))
            || (bounds_adjacent(other.upper, self.lower, other.upper_inc, self.lower_inc)
                && !self.overlaps(other))
    }

    /// `self` entirely before `other`, no overlap and no touching.
    pub fn is_before(&self, other: &Period) -> bool {
        let (su_v, su_s, su_i) = self.upper_key();
        let (ol_v, ol_s, ol_i) = other.lower_key();
        cmp_bounds(su_v, ol_v, su_s, ol_s, su_i, ol_i) == Ordering::Less
            && !bounds_adjacent(self.upper, other.lower, self.upper_inc, other.lower_inc)
    }

    pub fn is_after(&self, other: &Period) -> bool {
        other.is_before(self)
    }

    /// `self`'s upper bound does not extend past `other`'s.
    pub fn is_over_or_before(&self, other: &Period) -> bool {
        let (su_v, su_s, su_i) = self.upper_key();
        let (ou_v, ou_s, ou_i) = other.upper_key();
        cmp_bounds(su_v, ou_v, su_s, ou_s, su_i, ou_i) != Ordering::Greater
    }

    pub fn is_over_or_after(&self, other: &Period) -> bool {
        let (sl_v, sl_s, sl_i) = self.lower_key();
        let (ol_v, ol_s, ol_i) = other.lower_key();
        cmp_bounds(sl_v, ol_v, sl_s, ol_s, sl_i, ol_i) != Ordering::Less
    }

    /// Intersection, if the two periods overlap.
    pub fn intersection(&self, other: &Period) -> Option<Period> {
        if !self.overlaps(other) {
            return None;
        }
        let (lower, lower_inc) = {
            let (sl_v, sl_s, sl_i) = self.lower_key();
            let (ol_v, ol_s, ol_i) = other.lower_key();
            if cmp_bounds(sl_v, ol_v, sl_s, ol_s, sl_i, ol_i) == Ordering::Less {
                (ol_v, ol_i)
            } else {
                (sl_v, sl_i)
            }
        };
        let (upper, upper_inc) = {
            let (su_v, su_s, su_i) = self.upper_key();
            let (ou_v, ou_s, ou_i) = other.upper_key();
            if cmp_bounds(su_v, ou_v, su_s, ou_s, su_i, ou_i) == Ordering::Greater {
                (ou_v, ou_i)
            } else {
                (su_v, su_i)
            }
        };
        Period::new(lower, upper, lower_inc, upper_inc).ok()
    }

    /// Union, only defined when the two periods overlap or are adjacent
    /// (otherwise the union would not be a single period).
    pub fn union(&self, other: &Period) -> Option<Period> {
        if !self.overlaps(other) && !self.is_adjacent(other) {
            return None;
        }
        let (lower, lower_inc) = {
            let (sl_v, sl_s, sl_i) = self.lower_key();
            let (ol_v, ol_s, ol_i) = other.lower_key();
            if cmp_bounds(sl_v, ol_v, sl_s, ol_s, sl_i, ol_i) == Ordering::Greater {
                (ol_v, ol_i)
            } else {
                (sl_v, sl_i)
            }
        };
        let (upper, upper_inc) = {
            let (su_v, su_s, su_i) = self.upper_key();
            let (ou_v, ou_s, ou_i) = other.upper_key();
            if cmp_bounds(su_v, ou_v, su_s, ou_s, su_i, ou_i) == Ordering::Less {
                (ou_v, ou_i)
            } else {
                (su_v, su_i)
            }
        };
        Period::new(lower, upper, lower_inc, upper_inc).ok()
    }
}

impl Collection for Period {
    type Type = DateTime<Utc>;

    fn n(&self) -> usize {
        1
    }

    fn contains(&self, content: &DateTime<Utc>) -> bool {
        self.contains_instant(*content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(n: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(n, 0).unwrap()
    }

    #[test]
    fn rejects_inverted_bounds() {
        assert!(Period::new(t(5), t(1), true, true).is_err());
    }

    #[test]
    fn rejects_open_instant() {
        assert!(Period::new(t(5), t(5), true, false).is_err());
        assert!(Period::new(t(5), t(5), true, true).is_ok());
    }

    #[test]
    fn overlap_and_containment() {
        let a = Period::new(t(0), t(10), true, false).unwrap();
        let b = Period::new(t(5), t(15), true, false).unwrap();
        assert!(a.overlaps(&b));
        assert!(a.contains_instant(t(5)));
        assert!(!a.contains_instant(t(10)));
    }

    #[test]
    fn adjacent_touching_periods_do_not_overlap() {
        let a = Period::new(t(0), t(10), true, false).unwrap();
        let b = Period::new(t(10), t(20), true, false).unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.is_adjacent(&b));
        assert!(a.is_before(&b));
    }

    #[test]
    fn union_of_adjacent_periods_merges() {
        let a = Period::new(t(0), t(10), true, false).unwrap();
        let b = Period::new(t(10), t(20), true, false).unwrap();
        let u = a.union(&b).unwrap();
        assert_eq!(u.lower(), t(0));
        assert_eq!(u.upper(), t(20));
        assert!(u.lower_inc());
        assert!(!u.upper_inc());
    }

    #[test]
    fn disjoint_periods_have_no_union() {
        let a = Period::new(t(0), t(5), true, false).unwrap();
        let b = Period::new(t(10), t(20), true, false).unwrap();
        assert!(a.union(&b).is_none());
    }
}
