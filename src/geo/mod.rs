//! The geometry collaborator: point and polygon construction,
//! `intersects2d`, `contains`, `covers`, `touches`, `dwithin`,
//! `boundary`, `buffer`, `relate_pattern`, SRID get/set, projection.
//! Backed by `geos`. The teacher crate keeps `geos` optional behind its
//! own `geos` Cargo feature; here it's a plain, default-enabled
//! dependency (see `DESIGN.md`) because the spatiotemporal kernel in
//! [`crate::cbuffer`] needs geometry predicates unconditionally — there
//! is no non-spatial build of this crate to gate it out of.
//!
//! GEOS itself only understands linear geometries: it has no WKT reader
//! for `CIRCULARSTRING`/`CURVEPOLYGON`. `linearize` below turns a
//! [`TraversedArea`](crate::cbuffer::traversed_area::TraversedArea) —
//! an exact analytic curve compound — into a polygon approximation
//! before it reaches GEOS, which is the only point in the crate where a
//! circular arc loses its exactness. See `DESIGN.md`.

use geos::{Geom, Geometry};

use crate::cbuffer::traversed_area::{Pt, TraversedArea};
use crate::errors::{Result, TemporalError};

/// Number of line segments used to approximate each circular arc when
/// handing a traversed area to GEOS.
pub const ARC_SEGMENTS: usize = 32;

fn geos_err(context: &str) -> impl Fn(geos::Error) -> TemporalError + '_ {
    move |e| TemporalError::internal(format!("GEOS error in {context}: {e}"))
}

/// Samples points along the circular arc through `start`, `mid`, `end`
/// (in that direction), via the arc's circumcircle.
fn sample_arc(start: Pt, mid: Pt, end: Pt, segments: usize) -> Vec<Pt> {
    let center = match circumcenter(start, mid, end) {
        Some(c) => c,
        None => return vec![start, end], // degenerate (collinear): treat as a line
    };
    let radius = ((start.x - center.x).powi(2) + (start.y - center.y).powi(2)).sqrt();
    let angle_of = |p: Pt| (p.y - center.y).atan2(p.x - center.x);
    let (a0, am, a1) = (angle_of(start), angle_of(mid), angle_of(end));

    // Walk from a0 towards a1 in whichever rotational direction passes
    // through am, so the sampled arc matches the one the three points
    // actually define rather than the short way around.
    let two_pi = std::f64::consts::TAU;
    let normalize = |mut a: f64, reference: f64| {
        while a < reference {
            a += two_pi;
        }
        while a > reference + two_pi {
            a -= two_pi;
        }
        a
    };
    let am_ccw = normalize(am, a0);
    let a1_ccw = normalize(a1, a0);
    let going_ccw = am_ccw <= a1_ccw;
    let sweep = if going_ccw {
        normalize(a1, a0) - a0
    } else {
        -(normalize(a0, a1) - a1)
    };

    (0..=segments)
        .map(|i| {
            let t = sweep * (i as f64) / (segments as f64);
            let angle = a0 + t;
            Pt {
                x: center.x + radius * angle.cos(),
                y: center.y + radius * angle.sin(),
            }
    })
        .collect()
}

fn circumcenter(a: Pt, b: Pt, c: Pt) -> Option<Pt> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < 1e-12 {
        return None;
    }
    let ax2y2 = a.x * a.x + a.y * a.y;
    let bx2y2 = b.x * b.x + b.y * b.y;
    let cx2y2 = c.x * c.x + c.y * c.y;
    let ux = (ax2y2 * (b.y - c.y) + bx2y2 * (c.y - a.y) + cx2y2 * (a.y - b.y)) / d;
    let uy = (ax2y2 * (c.x - b.x) + bx2y2 * (a.x - c.x) + cx2y2 * (b.x - a.x)) / d;
    Some(Pt { x: ux, y: uy })
}

/// Flattens a traversed area into a closed polygon-ring point list.
pub fn linearize(area: &TraversedArea) -> Vec<Pt> {
    match area {
        TraversedArea::Circle { center, radius } => {
            let a = Pt { x: center.x - radius, y: center.y };
            let b = Pt { x: center.x + radius, y: center.y };
            sample_arc(a, b, a, ARC_SEGMENTS)
        }
        TraversedArea::Trapezoid {
            circstr1,
            linestr1,
            circstr2,
            linestr2,
        } => {
            let mut ring = sample_arc(circstr1[0], circstr1[1], circstr1[2], ARC_SEGMENTS);
            ring.push(linestr1[1]);
            let mut arc2 = sample_arc(circstr2[0], circstr2[1], circstr2[2], ARC_SEGMENTS);
            ring.append(&mut arc2);
            ring.push(linestr2[1]);
            ring
        }
        TraversedArea::Union(_) => Vec::new(), // callers handle unions part-by-part
    }
}

/// Materializes a traversed area as a GEOS geometry, unioning the parts
/// of a `TraversedArea::Union`.
pub fn to_geos_geometry(area: &TraversedArea) -> Result<Geometry> {
    match area {
        TraversedArea::Union(parts) => {
            let mut geoms: Vec<Geometry> = Vec::with_capacity(parts.len());
            for p in parts {
                geoms.push(to_geos_geometry(p)?);
            }
            let mut acc = geoms.remove(0);
            for g in geoms {
                acc = acc.union(&g).map_err(geos_err("polygon union"))?;
            }
            Ok(acc)
        }
        other => {
            let ring = linearize(other);
            let wkt = ring_to_wkt(&ring);
            Geometry::new_from_wkt(&wkt).map_err(geos_err("polygon construction"))
        }
    }
}

fn ring_to_wkt(ring: &[Pt]) -> String {
    let coords: Vec<String> = ring.iter().map(|p| format!("{} {}", p.x, p.y)).collect();
    format!("POLYGON(({}))", coords.join(", "))
}

pub fn intersects(a: &Geometry, b: &Geometry) -> Result<bool> {
    a.intersects(b).map_err(geos_err("intersects"))
}

pub fn contains(a: &Geometry, b: &Geometry) -> Result<bool> {
    a.contains(b).map_err(geos_err("contains"))
}

pub fn covers(a: &Geometry, b: &Geometry) -> Result<bool> {
    a.covers(b).map_err(geos_err("covers"))
}

pub fn touches(a: &Geometry, b: &Geometry) -> Result<bool> {
    a.touches(b).map_err(geos_err("touches"))
}

pub fn disjoint(a: &Geometry, b: &Geometry) -> Result<bool> {
    a.disjoint(b).map_err(geos_err("disjoint"))
}

pub fn dwithin(a: &Geometry, b: &Geometry, distance: f64) -> Result<bool> {
    if distance < 0.0 {
        return Err(TemporalError::domain("dwithin distance must be non-negative"));
    }
    let d = a.distance(b).map_err(geos_err("distance"))?;
    Ok(d <= distance)
}

pub fn relate_pattern(a: &Geometry, b: &Geometry, pattern: &str) -> Result<bool> {
    a.relate_pattern(b, pattern).map_err(geos_err("relate_pattern"))
}

pub fn boundary(a: &Geometry) -> Result<Geometry> {
    a.get_boundary().map_err(geos_err("boundary"))
}

pub fn buffer(a: &Geometry, distance: f64, quadsegs: i32) -> Result<Geometry> {
    a.buffer(distance, quadsegs).map_err(geos_err("buffer"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cbuffer::cbuffer::Cbuffer;
    use crate::cbuffer::traversed_area::circle;
    use geo_types::Point;

    #[test]
    fn linearized_circle_is_closed_and_roughly_round() {
        let c = Cbuffer::new(Point::new(0.0, 0.0), 2.0, None).unwrap();
        let area = circle(&c);
        let ring = linearize(&area);
        assert!(ring.len() > 8);
        let first = ring.first().unwrap();
        let last = ring.last().unwrap();
        assert!((first.x - last.x).abs() < 1e-6);
        assert!((first.y - last.y).abs() < 1e-6);
        for p in &ring {
            let d = (p.x.powi(2) + p.y.powi(2)).sqrt();
            assert!((d - 2.0).abs() < 1e-6);
        }
    }

    #[test]
    fn circle_geometry_contains_center() {
        let c = Cbuffer::new(Point::new(0.0, 0.0), 2.0, None).unwrap();
        let area = circle(&c);
        let geom = to_geos_geometry(&area).unwrap();
        let point = Geometry::new_from_wkt("POINT(0 0)").unwrap();
        assert!(contains(&geom, &point).unwrap());
    }
}
