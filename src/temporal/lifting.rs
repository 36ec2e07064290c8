//! The lifting infrastructure: generic drivers that turn a pointwise
//! base-type function into its temporal counterpart.

use chrono::{DateTime, Utc};

use crate::collections::base::Collection;
use crate::collections::datetime::Period;
use crate::errors::{Result, TemporalError};
use crate::temporal::base_value::BaseValue;
use crate::temporal::instant::TInstant;
use crate::temporal::interpolation::TInterpolation;
use crate::temporal::sequence::TSequence;
use crate::temporal::sequence_set::TSequenceSet;
use crate::temporal::temporal_trait::Temporal;

/// Synchronization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Restrict both operands to `ta.period ∩ tb.period`.
    Intersection,
    /// Synchronize without inserting new instants beyond each side's own.
    NoCrossings,
    /// As `NoCrossings`, plus turning points inserted where a
    /// discontinuous predicate or distance crosses a threshold.
    Crossings,
}

/// Given two linear segments (endpoint values and the period they span),
/// returns the instants at which some domain-specific crossing occurs
/// (e.g. `tdwithin`'s quadratic roots). Supplied by L7 callers; generic
/// lifting code in this module has no notion of what "crossing" means
/// for a given predicate.
pub type CrossingFinder<'a> =
dyn Fn(&BaseValue, &BaseValue, &BaseValue, &BaseValue, Period) -> Vec<DateTime<Utc>> + 'a;

/// `lift1(ta, f)`: maps `f` over every instant. Interpolation is
/// preserved only if the mapped base type still admits it; otherwise
/// the result degrades to `Step` (or stays `Discrete`).
pub fn lift1(ta: &Temporal, f: impl Fn(&BaseValue) -> Result<BaseValue>) -> Result<Temporal> {
    match ta {
        Temporal::Instant(i) => Ok(Temporal::Instant(TInstant::new(f(i.value())?, i.t()))),
        Temporal::Sequence(s) => {
            let mapped: Vec<TInstant> = s
                .instants()
                .iter()
                .map(|i| Ok(TInstant::new(f(i.value())?, i.t())))
                .collect::<Result<_>>()?;
            let interp = if s.interpolation() == TInterpolation::Linear
                && mapped[0].value().supports_linear()
            {
                TInterpolation::Linear
            } else if s.interpolation() == TInterpolation::Discrete {
                TInterpolation::Discrete
            } else {
                TInterpolation::Step
            };
            Ok(Temporal::Sequence(TSequence::new(
                        mapped,
                        interp,
                        s.span().lower_inc(),
                        s.span().upper_inc(),
                    )?))
        }
        Temporal::SequenceSet(ss) => {
            let mapped: Vec<TSequence> = ss
                .sequences()
                .iter()
                .map(|s| match lift1(&Temporal::Sequence(s.clone()), &f)? {
                    Temporal::Sequence(seq) => Ok(seq),
                    _ => unreachable!("lift1 of a sequence stays a sequence"),
            })
                .collect::<Result<_>>()?;
            Ok(Temporal::SequenceSet(TSequenceSet::new(mapped)?))
        }
    }
}

/// Every distinct instant `ta` or `tb` is defined at, restricted to
/// `window`.
fn sample_points(ta: &Temporal, tb: &Temporal, window: Period) -> Vec<DateTime<Utc>> {
    let mut points: Vec<DateTime<Utc>> = ta
        .instants()
        .iter()
        .map(|i| i.t())
        .chain(tb.instants().iter().map(|i| i.t()))
        .filter(|t| window.contains_instant(*t))
        .collect();
    points.push(window.lower());
    points.push(window.upper());
    points.sort_unstable();
    points.dedup();
    points
}

/// A temporal value's own constituent periods — a single period for
/// `Instant`/`Sequence`, one per child for `SequenceSet` — the
/// gap-aware view `SyncIntersection` needs instead of the single
/// bounding `span()`.
fn constituent_periods(t: &Temporal) -> Vec<Period> {
    match t {
        Temporal::Instant(i) => vec![Period::instant(i.t())],
        Temporal::Sequence(s) => vec![s.span()],
        Temporal::SequenceSet(ss) => ss.sequences().iter().map(|s| s.span()).collect(),
    }
}

/// Merge-walks two sorted, disjoint period lists, emitting their
/// pairwise intersections — the same two-pointer algorithm
/// `PeriodSet::intersection` uses, generalized to arbitrary period
/// lists that aren't themselves wrapped in a `PeriodSet`.
fn intersect_period_lists(a: &[Period], b: &[Period]) -> Vec<Period> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        if let Some(overlap) = a[i].intersection(&b[j]) {
            result.push(overlap);
        }
        if a[i].upper() < b[j].upper() {
            i += 1;
        } else if b[j].upper() < a[i].upper() {
            j += 1;
        } else {
            i += 1;
            j += 1;
        }
    }
    result
}

/// Synchronizes `ta` and `tb` onto a common time domain.
///
/// `Intersection` restricts the domain to the genuine intersection of
/// `ta`'s and `tb`'s own period-sets — for a `SequenceSet` operand this
/// excludes its internal gaps, possibly splitting the result into
/// several disjoint windows. `NoCrossings` and `Crossings` both use the
/// coarser bounding-span intersection instead: `Crossings` behaves like
/// `NoCrossings` here — turning-point insertion for a specific
/// predicate is the job of [`lift2`], which has the predicate in hand;
/// plain synchronization has no predicate to find crossings of.
pub fn synchronize(ta: &Temporal, tb: &Temporal, mode: SyncMode) -> Result<(Temporal, Temporal)> {
    let windows = match mode {
        SyncMode::Intersection => {
            intersect_period_lists(&constituent_periods(ta), &constituent_periods(tb))
        }
        SyncMode::NoCrossings | SyncMode::Crossings => ta
            .span()
            .intersection(&tb.span())
            .map(|w| vec![w])
            .unwrap_or_default(),
    };
    if windows.is_empty() {
        tracing::debug!(?mode, "synchronize: operands do not overlap in time");
        return Err(TemporalError::domain("operands do not overlap in time"));
    }
    let instant_count = ta.instants().len() + tb.instants().len();
    if instant_count > 10_000 {
        tracing::warn!(
            instant_count,
            windows = windows.len(),
            ?mode,
            "synchronize: large combined instant count"
        );
    }
    resample_both(ta, tb, &windows)
}

fn resample_one(t: &Temporal, points: &[DateTime<Utc>], window: Period) -> Result<Temporal> {
    let instants: Vec<TInstant> = points
        .iter()
        .map(|&ts| {
            t.value_at(ts)
                .map(|v| TInstant::new(v, ts))
                .ok_or_else(|| TemporalError::domain("synchronization point outside operand span"))
    })
        .collect::<Result<_>>()?;
    if instants.len() == 1 {
        return Ok(Temporal::Instant(instants.into_iter().next().unwrap()));
    }
    Ok(Temporal::Sequence(TSequence::new(
                instants,
                t.interpolation(),
                window.lower_inc(),
                window.upper_inc(),
            )?))
}

/// Assembles the per-window synchronized pieces of one operand back
/// into a single `Temporal`: a lone piece passes through unchanged,
/// several pieces become a `TSequenceSet` (each single-instant piece
/// promoted to a one-instant sequence so every child shares
/// `interpolation`).
fn assemble(pieces: Vec<Temporal>, interpolation: TInterpolation) -> Result<Temporal> {
    if pieces.len() == 1 {
        return Ok(pieces.into_iter().next().unwrap());
    }
    let sequences: Vec<TSequence> = pieces
        .into_iter()
        .map(|p| match p {
            Temporal::Sequence(s) => Ok(s),
            Temporal::Instant(i) => TSequence::new(vec![i], interpolation, true, true),
            Temporal::SequenceSet(_) => unreachable!("resample_one never returns a sequence set"),
        })
        .collect::<Result<_>>()?;
    Ok(Temporal::SequenceSet(TSequenceSet::new(sequences)?))
}

fn resample_both(ta: &Temporal, tb: &Temporal, windows: &[Period]) -> Result<(Temporal, Temporal)> {
    let mut ra = Vec::with_capacity(windows.len());
    let mut rb = Vec::with_capacity(windows.len());
    for &window in windows {
        let points = sample_points(ta, tb, window);
        ra.push(resample_one(ta, &points, window)?);
        rb.push(resample_one(tb, &points, window)?);
    }
    Ok((
            assemble(ra, ta.interpolation())?,
            assemble(rb, tb.interpolation())?,
    ))
}

/// `lift2(ta, tb, f, discontinuous, crossings)`: synchronizes, then
/// applies `f` pointwise. When `discontinuous` is set and a
/// [`CrossingFinder`] is supplied, turning points are inserted into
/// every overlapping linear segment so the step-interpolated result
/// switches value exactly at the crossing instant instead of at the
/// nearest sample.
pub fn lift2(
    ta: &Temporal,
    tb: &Temporal,
    f: impl Fn(&BaseValue, &BaseValue) -> Result<BaseValue>,
    discontinuous: bool,
    crossings: Option<&CrossingFinder>,
) -> Result<Temporal> {
    let (sa, sb) = synchronize(ta, tb, SyncMode::NoCrossings)?;

    let mut points: Vec<DateTime<Utc>> = sa.instants().iter().map(|i| i.t()).collect();

    if discontinuous {
        if let Some(finder) = crossings {
            if sa.interpolation() == TInterpolation::Linear
                && sb.interpolation() == TInterpolation::Linear
            {
                let mut extra = Vec::new();
                for w in points.windows(2) {
                    let (t0, t1) = (w[0], w[1]);
                    let seg = Period::new(t0, t1, true, true)?;
                    let (av0, av1) = (sa.value_at(t0).unwrap(), sa.value_at(t1).unwrap());
                    let (bv0, bv1) = (sb.value_at(t0).unwrap(), sb.value_at(t1).unwrap());
                    extra.extend(finder(&av0, &av1, &bv0, &bv1, seg));
                }
                points.extend(extra);
                points.sort_unstable();
                points.dedup();
            }
        }
    }

    let values: Vec<TInstant> = points
        .iter()
        .map(|&t| {
            let av = sa.value_at(t).expect("synchronized point defined on sa");
            let bv = sb.value_at(t).expect("synchronized point defined on sb");
            Ok(TInstant::new(f(&av, &bv)?, t))
    })
        .collect::<Result<_>>()?;

    if values.len() == 1 {
        return Ok(Temporal::Instant(values.into_iter().next().unwrap()));
    }

    let interp = if discontinuous {
        TInterpolation::Step
    } else if sa.interpolation() == TInterpolation::Linear
        && sb.interpolation() == TInterpolation::Linear
        && values[0].value().supports_linear()
    {
        TInterpolation::Linear
    } else {
        TInterpolation::Step
    };

    let window = sa.span();
    Ok(Temporal::Sequence(TSequence::new(
                values,
                interp,
                window.lower_inc(),
                window.upper_inc(),
            )?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(n: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(n, 0).unwrap()
    }

    fn seq(points: &[(i64, f64)]) -> Temporal {
        let instants = points
            .iter()
            .map(|&(ts, v)| TInstant::new(BaseValue::Float(v), t(ts)))
            .collect();
        Temporal::Sequence(TSequence::new(instants, TInterpolation::Linear, true, true).unwrap())
    }

    fn seq_piece(lo: i64, hi: i64) -> TSequence {
        TSequence::new(
            vec![
                TInstant::new(BaseValue::Float(lo as f64), t(lo)),
                TInstant::new(BaseValue::Float(hi as f64), t(hi)),
            ],
            TInterpolation::Linear,
            true,
            true,
        )
        .unwrap()
    }

    #[test]
    fn lift1_doubles_every_value() {
        let ta = seq(&[(0, 1.0), (10, 2.0)]);
        let result = lift1(&ta, |v| match v {
            BaseValue::Float(f) => Ok(BaseValue::Float(f * 2.0)),
            _ => unreachable!(),
        })
            .unwrap();
        assert_eq!(result.value_at(t(0)), Some(BaseValue::Float(2.0)));
        assert_eq!(result.value_at(t(10)), Some(BaseValue::Float(4.0)));
    }

    #[test]
    fn synchronize_aligns_time_domains() {
        let ta = seq(&[(0, 1.0), (10, 2.0)]);
        let tb = seq(&[(0, 5.0), (5, 6.0), (10, 7.0)]);
        let (sa, sb) = synchronize(&ta, &tb, SyncMode::Intersection).unwrap();
        assert_eq!(sa.span(), sb.span());
    }

    #[test]
    fn sync_intersection_splits_across_a_sequence_sets_internal_gap() {
        let ta = Temporal::SequenceSet(
            TSequenceSet::new(vec![seq_piece(0, 10), seq_piece(20, 30)]).unwrap(),
        );
        let tb = seq(&[(5, 100.0), (25, 200.0)]);

        let (sa, sb) = synchronize(&ta, &tb, SyncMode::Intersection).unwrap();

        // The gap (10, 20) must not be bridged: neither side is defined there.
        assert!(sa.value_at(t(15)).is_none());
        assert!(sb.value_at(t(15)).is_none());

        match sa {
            Temporal::SequenceSet(ref ss) => assert_eq!(ss.sequences().len(), 2),
            other => panic!("expected a sequence set split around the gap, got {other:?}"),
        }
    }

    #[test]
    fn sync_intersection_reports_no_overlap_when_periods_never_meet() {
        let ta = Temporal::SequenceSet(
            TSequenceSet::new(vec![seq_piece(0, 10), seq_piece(20, 30)]).unwrap(),
        );
        // Entirely inside ta's gap: the bounding spans overlap, but the
        // actual period-sets never do.
        let tb = seq(&[(12, 1.0), (18, 2.0)]);

        assert!(synchronize(&ta, &tb, SyncMode::Intersection).is_err());
    }

    #[test]
    fn crossings_mode_behaves_like_no_crossings_for_plain_synchronize() {
        let ta = seq(&[(0, 1.0), (10, 2.0)]);
        let tb = seq(&[(0, 5.0), (10, 6.0)]);
        let (a1, b1) = synchronize(&ta, &tb, SyncMode::NoCrossings).unwrap();
        let (a2, b2) = synchronize(&ta, &tb, SyncMode::Crossings).unwrap();
        assert_eq!(a1, a2);
        assert_eq!(b1, b2);
    }

    #[test]
    fn lift2_sums_pointwise() {
        let ta = seq(&[(0, 1.0), (10, 2.0)]);
        let tb = seq(&[(0, 10.0), (10, 20.0)]);
        let result = lift2(
            &ta,
            &tb,
            |a, b| match (a, b) {
                (BaseValue::Float(x), BaseValue::Float(y)) => Ok(BaseValue::Float(x + y)),
                _ => unreachable!(),
            },
            false,
            None,
        )
            .unwrap();
        assert_eq!(result.value_at(t(0)), Some(BaseValue::Float(11.0)));
        assert_eq!(result.value_at(t(10)), Some(BaseValue::Float(22.0)));
    }
}
