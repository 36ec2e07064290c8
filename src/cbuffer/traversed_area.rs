//! Traversed-area construction, grounded on `tcbuffer_spatialfuncs.c`
//! (`cbufferarr_circles`, `trapezoid_make`,
//! `tcbufferseq_linear_trav_area_iter`).

use chrono::{DateTime, Utc};

use crate::cbuffer::cbuffer::Cbuffer;
use crate::temporal::interpolation::TInterpolation;

/// A 2D point, formatted with WKT's `x y` convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pt {
    pub x: f64,
    pub y: f64,
}

impl Pt {
    fn fmt_wkt(&self) -> String {
        format!("{} {}", round3(self.x), round3(self.y))
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// The region swept by one or more moving circular buffers, as an
/// analytic curve compound rather than a linearized polygon — see
/// `DESIGN.md` for why predicates over this shape are routed through a
/// linearization step before reaching the geometry collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum TraversedArea {
    /// A full circle: a closed `CIRCULARSTRING` through `(x-r,y)`,
    /// `(x+r,y)`, `(x-r,y)`.
    Circle { center: Pt, radius: f64 },
    /// The trapezoidal hull of two disks in linear motion: two circular
    /// arcs and two tangent line segments, in ring order
    /// `circstr1 -> linestr1 -> circstr2 -> linestr2`.
    Trapezoid {
        circstr1: [Pt; 3],
        linestr1: [Pt; 2],
        circstr2: [Pt; 3],
        linestr2: [Pt; 2],
    },
    Union(Vec<TraversedArea>),
}

impl TraversedArea {
    /// Renders the ring content as comma-separated
    /// `CIRCULARSTRING(...)` / `(...)` parts, without the enclosing
    /// `CURVEPOLYGON(COMPOUNDCURVE(...))`.
    pub fn ring_wkt(&self) -> String {
        match self {
            TraversedArea::Circle { center, radius } => {
                let a = Pt { x: center.x - radius, y: center.y };
                let b = Pt { x: center.x + radius, y: center.y };
                format!(
                    "CIRCULARSTRING({}, {}, {})",
                    a.fmt_wkt(),
                    b.fmt_wkt(),
                    a.fmt_wkt()
                )
            }
            TraversedArea::Trapezoid {
                circstr1,
                linestr1,
                circstr2,
                linestr2,
            } => format!(
                "CIRCULARSTRING({}, {}, {}), ({}, {}), CIRCULARSTRING({}, {}, {}), ({}, {})",
                circstr1[0].fmt_wkt(),
                circstr1[1].fmt_wkt(),
                circstr1[2].fmt_wkt(),
                linestr1[0].fmt_wkt(),
                linestr1[1].fmt_wkt(),
                circstr2[0].fmt_wkt(),
                circstr2[1].fmt_wkt(),
                circstr2[2].fmt_wkt(),
                linestr2[0].fmt_wkt(),
                linestr2[1].fmt_wkt(),
            ),
            TraversedArea::Union(parts) => parts
                .iter()
                .map(|p| p.ring_wkt())
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }

    pub fn to_wkt(&self) -> String {
        format!("CURVEPOLYGON(COMPOUNDCURVE({}))", self.ring_wkt())
    }
}

/// One full circle per instant (discrete/step interpolation).
pub fn circle(c: &Cbuffer) -> TraversedArea {
    TraversedArea::Circle {
        center: Pt { x: c.x(), y: c.y() },
        radius: c.radius(),
    }
}

/// The trapezoidal hull bounded by external tangents, or the larger
/// disk when one swallows the other throughout the motion — exactly
/// reproducing `trapezoid_make`.
pub fn trapezoid_make(c1: &Cbuffer, c2: &Cbuffer) -> TraversedArea {
    let (p1x, p1y, r1) = (c1.x(), c1.y(), c1.radius());
    let (p2x, p2y, r2) = (c2.x(), c2.y(), c2.radius());
    let d = ((p2x - p1x).powi(2) + (p2y - p1y).powi(2)).sqrt();

    if d <= (r1 - r2).abs() {
        return if r1 > r2 { circle(c1) } else { circle(c2) };
    }

    let theta = (p2y - p1y).atan2(p2x - p1x);
    let delta = ((r1 - r2) / d).acos();

    let t1a = Pt {
        x: p1x + r1 * (theta + delta).cos(),
        y: p1y + r1 * (theta + delta).sin(),
    };
    let t2a = Pt {
        x: p2x + r2 * (theta + delta).cos(),
        y: p2y + r2 * (theta + delta).sin(),
    };
    let t1b = Pt {
        x: p1x + r1 * (theta - delta).cos(),
        y: p1y + r1 * (theta - delta).sin(),
    };
    let t2b = Pt {
        x: p2x + r2 * (theta - delta).cos(),
        y: p2y + r2 * (theta - delta).sin(),
    };

    let cos_t = theta.cos();
    let sin_t = theta.sin();
    let a1_plus = Pt { x: p1x + r1 * cos_t, y: p1y + r1 * sin_t };
    let a1_minus = Pt { x: p1x - r1 * cos_t, y: p1y - r1 * sin_t };
    let a2_plus = Pt { x: p2x + r2 * cos_t, y: p2y + r2 * sin_t };
    let a2_minus = Pt { x: p2x - r2 * cos_t, y: p2y - r2 * sin_t };

    let sq = |a: Pt, b: Pt| (a.x - b.x).powi(2) + (a.y - b.y).powi(2);
    let dist1 = sq(a1_plus, a2_plus);
    let dist2 = sq(a1_minus, a2_minus);
    let dist3 = sq(a1_plus, a2_minus);
    let dist4 = sq(a1_minus, a2_plus);

    let (a1, a2) = if dist1 > dist2 && dist1 > dist3 && dist1 > dist4 {
        (a1_plus, a2_plus)
    } else if dist2 > dist1 && dist2 > dist3 && dist2 > dist4 {
        (a1_minus, a2_minus)
    } else if dist3 > dist1 && dist3 > dist2 && dist3 > dist4 {
        (a1_plus, a2_minus)
    } else {
        (a1_minus, a2_plus)
    };

    TraversedArea::Trapezoid {
        circstr1: [t2a, a2, t2b],
        linestr1: [t2b, t1b],
        circstr2: [t1b, a1, t1a],
        linestr2: [t1a, t2a],
    }
}

/// Traversed area of a whole sequence of `(Cbuffer, t)` instants,
/// dispatching on interpolation: one circle per instant for
/// discrete/step, a chain of trapezoids for linear.
pub fn sequence_traversed_area(
    instants: &[(Cbuffer, DateTime<Utc>)],
    interpolation: TInterpolation,
) -> TraversedArea {
    if instants.len() == 1 {
        return circle(&instants[0].0);
    }
    match interpolation {
        TInterpolation::Linear => {
            let parts: Vec<TraversedArea> = instants
                .windows(2)
                .map(|w| trapezoid_make(&w[0].0, &w[1].0))
                .collect();
            if parts.len() == 1 {
                parts.into_iter().next().unwrap()
            } else {
                TraversedArea::Union(parts)
            }
        }
        TInterpolation::Discrete | TInterpolation::Step => {
            TraversedArea::Union(instants.iter().map(|(c, _)| circle(c)).collect())
        }
    }
}
