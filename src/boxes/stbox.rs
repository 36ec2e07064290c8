//! `STBox` — a spatiotemporal axis-aligned bounding box over X, Y, an
//! optional Z, and an optional time period.

use crate::collections::datetime::Period;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct STBox {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub zmin: Option<f64>,
    pub zmax: Option<f64>,
    pub period: Option<Period>,
    pub srid: Option<i32>,
}

impl STBox {
    pub fn from_point(x: f64, y: f64, srid: Option<i32>) -> Self {
        STBox {
            xmin: x,
            xmax: x,
            ymin: y,
            ymax: y,
            zmin: None,
            zmax: None,
            period: None,
            srid,
        }
    }

    /// Inflates the box on X and Y by `r` — used to turn a `Cbuffer`'s
    /// point box into the disk's bounding box.
    pub fn expanded(&self, r: f64) -> Self {
        STBox {
            xmin: self.xmin - r,
            xmax: self.xmax + r,
            ymin: self.ymin - r,
            ymax: self.ymax + r,
            ..*self
        }
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn union(&self, other: &STBox) -> STBox {
        STBox {
            xmin: self.xmin.min(other.xmin),
            xmax: self.xmax.max(other.xmax),
            ymin: self.ymin.min(other.ymin),
            ymax: self.ymax.max(other.ymax),
            zmin: match (self.zmin, other.zmin) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, None) => a,
                (None, b) => b,
            },
            zmax: match (self.zmax, other.zmax) {
                (Some(a), Some(b)) => Some(a.max(b)),
                (a, None) => a,
                (None, b) => b,
            },
            period: match (self.period, other.period) {
                (Some(a), Some(b)) => a.union(&b).or(Some(a)),
                (a, None) => a,
                (None, b) => b,
            },
            srid: self.srid.or(other.srid),
        }
    }

    /// Cheap axis-aligned overlap test, used as a bounding-box filter
    /// ahead of exact geometric predicates (: "may return
    /// negative short-circuit answers... but never a false positive").
    pub fn overlaps(&self, other: &STBox) -> bool {
        self.xmin <= other.xmax
            && other.xmin <= self.xmax
            && self.ymin <= other.ymax
            && other.ymin <= self.ymax
    }
}
