//! Ever/always spatial predicates on temporal circular buffers: the
//! boolean-result family, grounded on the ever/always pairs the source
//! documents for `contains`/`covers`/`disjoint`/`intersects`/`touches`.
//!
//! Each predicate is defined over `(geo, T)`/`(T, geo)`/`(T, T)`; the
//! `(cbuffer, T)`/`(T, cbuffer)` signatures reduce to the geometry ones
//! by treating a static `Cbuffer` as its own one-instant traversed area.

use geos::{Geom, Geometry};

use crate::cbuffer::cbuffer::Cbuffer;
use crate::cbuffer::traversed_area::{circle, sequence_traversed_area, TraversedArea};
use crate::errors::{Result, TemporalError};
use crate::geo;
use crate::temporal::temporal_trait::Temporal;
use crate::temporal::BaseValue;

/// Every segment's traversed area, in time order: one circle per
/// instant for `Discrete`/`Step`, one trapezoid per consecutive pair for
/// `Linear`. This is the per-segment unit that ever/always predicates
/// short-circuit over.
pub fn traversed_area_segments(t: &Temporal) -> Result<Vec<TraversedArea>> {
    let cbuffer_instants = |seq_instants: &[crate::temporal::TInstant]| -> Result<Vec<(Cbuffer, chrono::DateTime<chrono::Utc>)>> {
        seq_instants
            .iter()
            .map(|i| match i.value() {
                BaseValue::Cbuffer(c) => Ok((*c, i.t())),
                other => Err(TemporalError::domain(format!(
                    "expected a temporal circular buffer, found base type '{}'",
                    other.type_name()
                ))),
            })
            .collect()
    };

    match t {
        Temporal::Instant(i) => match i.value() {
            BaseValue::Cbuffer(c) => Ok(vec![circle(c)]),
            other => Err(TemporalError::domain(format!(
                "expected a temporal circular buffer, found base type '{}'",
                other.type_name()
            ))),
        },
        Temporal::Sequence(s) => {
            let insts = cbuffer_instants(s.instants())?;
            match sequence_traversed_area(&insts, s.interpolation()) {
                TraversedArea::Union(parts) => Ok(parts),
                other => Ok(vec![other]),
            }
        }
        Temporal::SequenceSet(ss) => {
            let mut all = Vec::new();
            for s in ss.sequences() {
                all.extend(traversed_area_segments(&Temporal::Sequence(s.clone()))?);
            }
            Ok(all)
        }
    }
}

/// The traversed area of the whole temporal value, as one geometry.
pub fn whole_traversed_area(t: &Temporal) -> Result<Geometry> {
    let segments = traversed_area_segments(t)?;
    geo::to_geos_geometry(&TraversedArea::Union(segments))
}

fn ever<F>(t: &Temporal, mut per_segment: F) -> Result<bool>
where
    F: FnMut(&Geometry) -> Result<bool>,
{
    for area in traversed_area_segments(t)? {
        let g = geo::to_geos_geometry(&area)?;
        if per_segment(&g)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn always<F>(t: &Temporal, mut per_segment: F) -> Result<bool>
where
    F: FnMut(&Geometry) -> Result<bool>,
{
    for area in traversed_area_segments(t)? {
        let g = geo::to_geos_geometry(&area)?;
        if !per_segment(&g)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// `econtains`/`acontains(T, geo)`: only `econtains` uses the interior
/// relate pattern; `acontains` is a direct containment test.
pub fn econtains_temporal_geo(t: &Temporal, geo: &Geometry) -> Result<bool> {
    ever(t, |seg| crate::geo::relate_pattern(seg, geo, "T********"))
}

pub fn acontains_temporal_geo(t: &Temporal, geo: &Geometry) -> Result<bool> {
    always(t, |seg| crate::geo::contains(seg, geo))
}

/// `acontains(geo, T)`: only `always` is defined for this direction —
/// `geo` must contain the traversed area throughout.
pub fn acontains_geo_temporal(geo: &Geometry, t: &Temporal) -> Result<bool> {
    always(t, |seg| crate::geo::contains(geo, seg))
}

pub fn ecovers_temporal_geo(t: &Temporal, geo: &Geometry) -> Result<bool> {
    ever(t, |seg| crate::geo::covers(seg, geo))
}

pub fn acovers_temporal_geo(t: &Temporal, geo: &Geometry) -> Result<bool> {
    always(t, |seg| crate::geo::covers(seg, geo))
}

pub fn edisjoint_temporal_geo(t: &Temporal, geo: &Geometry) -> Result<bool> {
    if geo.is_empty().unwrap_or(true) {
        return Err(TemporalError::domain("disjoint forbids an empty geometry"));
    }
    ever(t, |seg| crate::geo::disjoint(seg, geo))
}

pub fn adisjoint_temporal_geo(t: &Temporal, geo: &Geometry) -> Result<bool> {
    if geo.is_empty().unwrap_or(true) {
        return Err(TemporalError::domain("disjoint forbids an empty geometry"));
    }
    always(t, |seg| crate::geo::disjoint(seg, geo))
}

pub fn eintersects_temporal_geo(t: &Temporal, geo: &Geometry) -> Result<bool> {
    if geo.is_empty().unwrap_or(true) {
        return Err(TemporalError::domain("intersects forbids an empty geometry"));
    }
    ever(t, |seg| crate::geo::intersects(seg, geo))
}

pub fn aintersects_temporal_geo(t: &Temporal, geo: &Geometry) -> Result<bool> {
    if geo.is_empty().unwrap_or(true) {
        return Err(TemporalError::domain("intersects forbids an empty geometry"));
    }
    always(t, |seg| crate::geo::intersects(seg, geo))
}

pub fn etouches_temporal_geo(t: &Temporal, geo: &Geometry) -> Result<bool> {
    ensure_non_degenerate_boundary(geo)?;
    ever(t, |seg| crate::geo::touches(seg, geo))
}

pub fn atouches_temporal_geo(t: &Temporal, geo: &Geometry) -> Result<bool> {
    ensure_non_degenerate_boundary(geo)?;
    always(t, |seg| crate::geo::touches(seg, geo))
}

fn ensure_non_degenerate_boundary(geo: &Geometry) -> Result<()> {
    let boundary = crate::geo::boundary(geo)?;
    if boundary.is_empty().unwrap_or(true) {
        return Err(TemporalError::domain(
            "touches requires a geometry with a non-degenerate boundary",
        ));
    }
    Ok(())
}

/// `dwithin(T, geo, d)`: ever/always within distance `d` at some/every
/// instant's traversed-area segment.
pub fn edwithin_temporal_geo(t: &Temporal, geo: &Geometry, d: f64) -> Result<bool> {
    if d < 0.0 {
        return Err(TemporalError::domain("dwithin requires a non-negative distance"));
    }
    ever(t, |seg| crate::geo::dwithin(seg, geo, d))
}

pub fn adwithin_temporal_geo(t: &Temporal, geo: &Geometry, d: f64) -> Result<bool> {
    if d < 0.0 {
        return Err(TemporalError::domain("dwithin requires a non-negative distance"));
    }
    always(t, |seg| crate::geo::dwithin(seg, geo, d))
}

/// `(T, T)` signature: tested over each operand's *whole* traversed
/// area rather than per fine segment — a coarser decomposition than the
/// geometry-operand predicates above, noted in `DESIGN.md`.
pub fn eintersects_temporal_temporal(a: &Temporal, b: &Temporal) -> Result<bool> {
    let ga = whole_traversed_area(a)?;
    let gb = whole_traversed_area(b)?;
    crate::geo::intersects(&ga, &gb)
}

pub fn edisjoint_temporal_temporal(a: &Temporal, b: &Temporal) -> Result<bool> {
    let ga = whole_traversed_area(a)?;
    let gb = whole_traversed_area(b)?;
    crate::geo::disjoint(&ga, &gb)
}
