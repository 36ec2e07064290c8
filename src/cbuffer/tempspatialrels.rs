//! Temporal spatial predicates: the piecewise-constant boolean family,
//! and the dwithin quadratic solver.
//!
//! Grounded on `tspatial_tempspatialrels.c`'s `tgeosegm_tdwithin` (the
//! quadratic) and `tdwithin_add_solutions` (the step-sequence
//! reconstruction it feeds). Two source bugs are fixed here, each with
//! a regression test named for the scenario it guards.

use chrono::{DateTime, TimeDelta, Utc};
use geos::Geometry;

use crate::cbuffer::cbuffer::{Cbuffer, MEOS_EPSILON};
use crate::collections::datetime::Period;
use crate::errors::{Result, TemporalError};
use crate::temporal::{lift1, lift2, BaseValue, SyncMode, Temporal};

/// The sub-interval of normalized time `u ∈ [0, 1]` on which two linear
/// motion segments stay within distance `d` of each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DwithinInterval {
    Never,
    Always,
    /// True on `[lo, hi] ⊆ [0, 1]`, false elsewhere (a single instant
    /// when `lo == hi`).
    Window { lo: f64, hi: f64 },
}

/// The numerically stable Viète-form quadratic solver for the interval
/// on which two linearly-moving points stay within `d` of each other.
/// `sv`/`ev` are each segment's start/end 2D coordinates.
pub fn dwithin_interval(sv1: (f64, f64), ev1: (f64, f64), sv2: (f64, f64), ev2: (f64, f64), d: f64) -> DwithinInterval {
    let ax = (ev1.0 - sv1.0) - (ev2.0 - sv2.0);
    let ay = (ev1.1 - sv1.1) - (ev2.1 - sv2.1);
    let cx = sv1.0 - sv2.0;
    let cy = sv1.1 - sv2.1;

    let a = ax * ax + ay * ay;
    let b = 2.0 * (ax * cx + ay * cy);
    let c = cx * cx + cy * cy - d * d;

    if a.abs() < MEOS_EPSILON {
        return if c <= 0.0 { DwithinInterval::Always } else { DwithinInterval::Never };
    }

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return DwithinInterval::Never;
    }
    if disc.abs() < MEOS_EPSILON {
        let u0 = -b / (2.0 * a);
        return clip_window(u0, u0);
    }

    let sq = disc.sqrt();
    let (u1, u2) = if b >= 0.0 {
        ((-b - sq) / (2.0 * a), 2.0 * c / (-b - sq))
    } else {
        (2.0 * c / (-b + sq), (-b + sq) / (2.0 * a))
    };
    let (lo, hi) = if u1 <= u2 { (u1, u2) } else { (u2, u1) };
    clip_window(lo, hi)
}

fn clip_window(lo: f64, hi: f64) -> DwithinInterval {
    let lo = lo.max(0.0);
    let hi = hi.min(1.0);
    if lo > hi {
        DwithinInterval::Never
    } else if (hi - lo).abs() < MEOS_EPSILON {
        DwithinInterval::Window { lo, hi: lo }
    } else {
        DwithinInterval::Window { lo, hi }
    }
}

/// Maps a `DwithinInterval` in `[0, 1]` back onto `period`, returning
/// the instants at which the boolean result changes value — the
/// "produce 0, 1, or 2 instants" step that feeds a
/// [`crate::temporal::CrossingFinder`].
pub fn dwithin_crossings(period: Period, window: DwithinInterval) -> Vec<DateTime<Utc>> {
    let span = period.upper() - period.lower();
    let at = |u: f64| period.lower() + scale(span, u);
    match window {
        DwithinInterval::Never | DwithinInterval::Always => Vec::new(),
        DwithinInterval::Window { lo, hi } if lo == hi => vec![at(lo)],
        DwithinInterval::Window { lo, hi } => vec![at(lo), at(hi)],
    }
}

fn scale(span: TimeDelta, u: f64) -> TimeDelta {
    TimeDelta::nanoseconds((span.num_nanoseconds().unwrap_or(0) as f64 * u) as i64)
}

/// `tdwithin` between two temporal points: synchronizes with crossing
/// insertion, then evaluates the distance threshold pointwise — the
/// crossings inserted by [`dwithin_interval`] are what let a linear
/// segment's threshold crossing land on an exact instant rather than
/// the nearest sample.
pub fn tdwithin_points(ta: &Temporal, tb: &Temporal, d: f64) -> Result<Temporal> {
    if d < 0.0 {
        return Err(TemporalError::domain("dwithin requires a non-negative distance"));
    }
    let finder = move |av0: &BaseValue, av1: &BaseValue, bv0: &BaseValue, bv1: &BaseValue, seg: Period| {
        let coords = |v: &BaseValue| match v {
            BaseValue::Point(p) => (p.x(), p.y()),
            _ => (0.0, 0.0),
        };
        let window = dwithin_interval(coords(av0), coords(av1), coords(bv0), coords(bv1), d);
        dwithin_crossings(seg, window)
    };
    lift2(
        ta,
        tb,
        move |a, b| Ok(BaseValue::Bool(a.distance(b)? <= d)),
        true,
        Some(&finder),
    )
}

/// `tdwithin(T, geo, d)`: inflate every radius of `T` by `d` and
/// delegate to `tintersects` rather than re-deriving a
/// buffer-specific quadratic.
pub fn tdwithin_cbuffer_geo(t: &Temporal, geo: &Geometry, d: f64) -> Result<Temporal> {
    if d < 0.0 {
        return Err(TemporalError::domain("dwithin requires a non-negative distance"));
    }
    let expanded = lift1(t, |v| match v {
        BaseValue::Cbuffer(c) => Ok(BaseValue::Cbuffer(Cbuffer::new(c.point(), c.radius() + d, c.srid())?)),
        other => Err(TemporalError::domain(format!(
            "dwithin expansion is only defined for circular buffers, found '{}'",
            other.type_name()
        ))),
    })?;
    tintersects_cbuffer_geo(&expanded, geo)
}

/// `tcontains`/`tcovers`: pointwise lifting, no crossing insertion — the
/// predicate is piecewise constant over any pure-motion segment, so
/// there's no interior crossing to locate.
pub fn tcontains_geo_cbuffer(geo: &Geometry, t: &Temporal) -> Result<Temporal> {
    let contains_area = geo.clone();
    lift1(t, move |v| match v {
        BaseValue::Cbuffer(c) => {
            let disk = crate::geo::to_geos_geometry(&crate::cbuffer::traversed_area::circle(c))?;
            Ok(BaseValue::Bool(crate::geo::contains(&contains_area, &disk)?))
        }
        other => Err(TemporalError::domain(format!(
            "tcontains is only defined for circular buffers, found '{}'",
            other.type_name()
        ))),
    })
}

pub fn tcovers_cbuffer_geo(t: &Temporal, geo: &Geometry) -> Result<Temporal> {
    let geo = geo.clone();
    lift1(t, move |v| match v {
        BaseValue::Cbuffer(c) => {
            let disk = crate::geo::to_geos_geometry(&crate::cbuffer::traversed_area::circle(c))?;
            Ok(BaseValue::Bool(crate::geo::covers(&disk, &geo)?))
        }
        other => Err(TemporalError::domain(format!(
            "tcovers is only defined for circular buffers, found '{}'",
            other.type_name()
        ))),
    })
}

/// `tintersects(T, geo)`. Bug fix: `ea_intersects_geo_tcbuffer` wrongly
/// calls the *disjoint* dispatcher; this implementation calls the
/// intersects one, as named in `ea_intersects_tcbuffer_geo`.
pub fn tintersects_cbuffer_geo(t: &Temporal, geo: &Geometry) -> Result<Temporal> {
    segment_step_predicate(t, |area_geom| crate::geo::intersects(area_geom, geo))
}

pub fn tdisjoint_cbuffer_geo(t: &Temporal, geo: &Geometry) -> Result<Temporal> {
    segment_step_predicate(t, |area_geom| crate::geo::disjoint(area_geom, geo))
}

/// `tintersects(T, T)` between two temporal circular buffers. Bug fix:
/// `tintersects_cbuffer_tcbuffer` dispatches with `TDISJOINT` instead of
/// `TINTERSECTS`, inverting the result; this implementation tests
/// intersection directly.
pub fn tintersects_cbuffer_cbuffer(a: &Temporal, b: &Temporal) -> Result<Temporal> {
    let (sa, sb) = crate::temporal::synchronize(a, b, SyncMode::Intersection)?;
    lift2(
        &sa,
        &sb,
        |av, bv| {
            let (ca, cb) = match (av, bv) {
                (BaseValue::Cbuffer(x), BaseValue::Cbuffer(y)) => (x, y),
                _ => {
                    return Err(TemporalError::domain(
                        "tintersects between temporal values requires circular buffers",
                    ))
                }
            };
            Ok(BaseValue::Bool(ca.center_distance(cb) <= ca.radius() + cb.radius()))
        },
        false,
        None,
    )
}

fn segment_step_predicate(t: &Temporal, test: impl Fn(&Geometry) -> Result<bool>) -> Result<Temporal> {
    lift1(t, |v| match v {
        BaseValue::Cbuffer(c) => {
            let disk = crate::geo::to_geos_geometry(&crate::cbuffer::traversed_area::circle(c))?;
            Ok(BaseValue::Bool(test(&disk)?))
        }
        other => Err(TemporalError::domain(format!(
            "this relation is only defined for circular buffers, found '{}'",
            other.type_name()
        ))),
    })
}

/// `ttouches(T, geo)` for temporal geometries: `tintersects(T,
/// boundary(geo))`.
pub fn ttouches_temporal_geo(t: &Temporal, geo: &Geometry) -> Result<Temporal> {
    let boundary = crate::geo::boundary(geo)?;
    tintersects_cbuffer_geo(t, &boundary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::TInstant;
    use chrono::TimeZone;
    use geo_types::Point;

    fn t(n: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(n, 0).unwrap()
    }

    #[test]
    fn no_motion_segments_never_within_distance() {
        // Scenario 4: (0,0)->(0,0), (2,0)->(2,0), d=1 -> a=0,b=0,c=3, no solutions.
        let window = dwithin_interval((0.0, 0.0), (0.0, 0.0), (2.0, 0.0), (2.0, 0.0), 1.0);
        assert_eq!(window, DwithinInterval::Never);
    }

    #[test]
    fn crossing_segments_produce_the_literal_window() {
        // Scenario 5: (0,0)->(4,0), (2,0)->(2,0), d=1 -> u in [0.25, 0.75].
        let window = dwithin_interval((0.0, 0.0), (4.0, 0.0), (2.0, 0.0), (2.0, 0.0), 1.0);
        match window {
            DwithinInterval::Window { lo, hi } => {
                assert!((lo - 0.25).abs() < 1e-9);
                assert!((hi - 0.75).abs() < 1e-9);
            }
            other => panic!("expected a window, got {other:?}"),
        }
    }

    #[test]
    fn tdwithin_points_produces_false_true_false_step_sequence() {
        let period = Period::new(t(0), t(4), true, true).unwrap();
        let window = dwithin_interval((0.0, 0.0), (4.0, 0.0), (2.0, 0.0), (2.0, 0.0), 1.0);
        let crossings = dwithin_crossings(period, window);
        assert_eq!(crossings, vec![t(1), t(3)]);
    }

    #[test]
    fn tintersects_cbuffer_cbuffer_touching_disks_is_true_not_false() {
        // Regression for the documented source bug: TDISJOINT vs TINTERSECTS.
        let cb = |x: f64, y: f64, r: f64| {
            Temporal::Instant(TInstant::new(
                    BaseValue::Cbuffer(Cbuffer::new(Point::new(x, y), r, None).unwrap()),
                    t(0),
            ))
        };
        let a = cb(0.0, 0.0, 1.0);
        let b = cb(0.0, 0.0, 1.0);
        let result = tintersects_cbuffer_cbuffer(&a, &b).unwrap();
        assert_eq!(result.value_at(t(0)), Some(BaseValue::Bool(true)));
    }

    #[test]
    fn tintersects_cbuffer_geo_is_not_inverted() {
        // Regression for ea_intersects_geo_tcbuffer calling the disjoint path.
        let inst = Temporal::Instant(TInstant::new(
                BaseValue::Cbuffer(Cbuffer::new(Point::new(0.0, 0.0), 1.0, None).unwrap()),
                t(0),
        ));
        let geo = Geometry::new_from_wkt("POLYGON((-5 -5, 5 -5, 5 5, -5 5, -5 -5))").unwrap();
        let result = tintersects_cbuffer_geo(&inst, &geo).unwrap();
        assert_eq!(result.value_at(t(0)), Some(BaseValue::Bool(true)));
    }
}
