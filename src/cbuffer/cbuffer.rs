//! `Cbuffer` — a 2D point plus a non-negative radius, representing a
//! closed disk. Grounded on `cbuffer.c`'s `cbuffer_make`/`cbuffer_parse`/
//! `cbuffer_out`.

use geo_types::Point;

use crate::errors::{Result, TemporalError};

pub const MEOS_EPSILON: f64 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cbuffer {
    point: Point<f64>,
    radius: f64,
    srid: Option<i32>,
}

impl Cbuffer {
    /// Builds a circular buffer. Fails if `radius < 0`.
    pub fn new(point: Point<f64>, radius: f64, srid: Option<i32>) -> Result<Self> {
        if radius < 0.0 {
            return Err(TemporalError::domain(
                "the radius must be a real number greater than or equal to 0",
            ));
        }
        Ok(Cbuffer { point, radius, srid })
    }

    pub fn point(&self) -> Point<f64> {
        self.point
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn srid(&self) -> Option<i32> {
        self.srid
    }

    pub fn x(&self) -> f64 {
        self.point.x()
    }

    pub fn y(&self) -> f64 {
        self.point.y()
    }

    /// Formats as `Cbuffer(x y,r)`, the canonical WKT-ish representation
    /// emitted by `cbuffer_out`.
    pub fn to_wkt(&self) -> String {
        format!("Cbuffer({} {},{})", self.x(), self.y(), self.radius)
    }

    /// Formats with an `SRID=n;` prefix when the SRID is known.
    pub fn to_ewkt(&self) -> String {
        match self.srid {
            Some(srid) => format!("SRID={srid};{}", self.to_wkt()),
            None => self.to_wkt(),
        }
    }

    /// Parses `('SRID=' Int ';')? 'Cbuffer(' Point ',' Float ')'`
    /// (case-insensitive `CBUFFER`).
    pub fn parse(input: &str) -> Result<Self> {
        let mut s = input.trim();
        let mut srid = None;

        if let Some(rest) = s.strip_prefix("SRID=").or_else(|| s.strip_prefix("srid=")) {
            let semi = rest
                .find(';')
                .ok_or_else(|| TemporalError::parse(0, "';' after SRID number"))?;
            let num = &rest[..semi];
            srid = Some(
                num.trim()
                    .parse::<i32>()
                    .map_err(|_| TemporalError::parse(0, "integer SRID"))?,
            );
            s = rest[semi + 1..].trim_start();
        }

        let lower = s.to_ascii_lowercase();
        if !lower.starts_with("cbuffer") {
            return Err(TemporalError::parse(0, "'Cbuffer(' prefix"));
        }
        let rest = s["cbuffer".len()..].trim_start();
        let rest = rest
            .strip_prefix('(')
            .ok_or_else(|| TemporalError::parse(0, "'(' after Cbuffer"))?;
        let close = rest
            .rfind(')')
            .ok_or_else(|| TemporalError::parse(0, "closing ')'"))?;
        let body = &rest[..close];

        let comma = body
            .rfind(',')
            .ok_or_else(|| TemporalError::parse(0, "',' separating point and radius"))?;
        let point_str = body[..comma].trim();
        let radius_str = body[comma + 1..].trim();

        let mut coords = point_str.split_whitespace();
        let x: f64 = coords
            .next()
            .ok_or_else(|| TemporalError::parse(0, "point x coordinate"))?
            .parse()
            .map_err(|_| TemporalError::parse(0, "numeric x coordinate"))?;
        let y: f64 = coords
            .next()
            .ok_or_else(|| TemporalError::parse(0, "point y coordinate"))?
            .parse()
            .map_err(|_| TemporalError::parse(0, "numeric y coordinate"))?;
        if coords.next().is_some() {
            return Err(TemporalError::unsupported(
                "Z/M circular buffer points are not supported",
            ));
        }

        let radius: f64 = radius_str
            .parse()
            .map_err(|_| TemporalError::parse(0, "numeric radius"))?;

        Cbuffer::new(Point::new(x, y), radius, srid)
    }

    /// Euclidean distance between two buffers' centers.
    pub fn center_distance(&self, other: &Cbuffer) -> f64 {
        ((self.x() - other.x()).powi(2) + (self.y() - other.y()).powi(2)).sqrt()
    }

    /// Linear interpolation of centers and radii at parameter `ratio` in
    /// `[0, 1]` — the `interpolate` capability.
    pub fn interpolate(&self, other: &Cbuffer, ratio: f64) -> Cbuffer {
        let x = self.x() + (other.x() - self.x()) * ratio;
        let y = self.y() + (other.y() - self.y()) * ratio;
        let r = self.radius + (other.radius - self.radius) * ratio;
        Cbuffer {
            point: Point::new(x, y),
            radius: r,
            srid: self.srid,
        }
    }

    /// Whether `b` lies on the straight line/linear-radius blend between
    /// `a` and `c` at the same parameter `ratio` — used by the lifting
    /// layer to decide whether three consecutive instants compress to a
    /// single linear segment without loss.
    pub fn collinear(a: &Cbuffer, b: &Cbuffer, c: &Cbuffer, ratio: f64) -> bool {
        let expected = a.interpolate(c, ratio);
        (b.x() - expected.x()).abs() < MEOS_EPSILON
            && (b.y() - expected.y()).abs() < MEOS_EPSILON
            && (b.radius - expected.radius).abs() < MEOS_EPSILON
    }

    /// Approximate equality within `MEOS_EPSILON`, matching the source's
    /// `cbuffer_eq` tolerance policy.
    pub fn same(&self, other: &Cbuffer) -> bool {
        (self.x() - other.x()).abs() < MEOS_EPSILON
            && (self.y() - other.y()).abs() < MEOS_EPSILON
            && (self.radius - other.radius).abs() < MEOS_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_radius() {
        assert!(Cbuffer::new(Point::new(0.0, 0.0), -1.0, None).is_err());
    }

    #[test]
    fn round_trips_through_wkt() {
        let c = Cbuffer::new(Point::new(1.0, 2.0), 3.5, None).unwrap();
        let text = c.to_wkt();
        let parsed = Cbuffer::parse(&text).unwrap();
        assert!(c.same(&parsed));
    }

    #[test]
    fn parses_case_insensitive_prefix_and_srid() {
        let c = Cbuffer::parse("SRID=4326;cbuffer(1 2,3)").unwrap();
        assert_eq!(c.srid(), Some(4326));
        assert_eq!(c.x(), 1.0);
        assert_eq!(c.y(), 2.0);
        assert_eq!(c.radius(), 3.0);
    }

    #[test]
    fn rejects_negative_radius_on_parse() {
        assert!(Cbuffer::parse("Cbuffer(0 0,-1)").is_err());
    }

    #[test]
    fn interpolation_midpoint() {
        let a = Cbuffer::new(Point::new(0.0, 0.0), 1.0, None).unwrap();
        let b = Cbuffer::new(Point::new(2.0, 0.0), 3.0, None).unwrap();
        let mid = a.interpolate(&b, 0.5);
        assert_eq!(mid.x(), 1.0);
        assert_eq!(mid.radius(), 2.0);
    }

    #[test]
    fn collinear_detects_linear_motion() {
        let a = Cbuffer::new(Point::new(0.0, 0.0), 1.0, None).unwrap();
        let b = Cbuffer::new(Point::new(1.0, 0.0), 1.5, None).unwrap();
        let c = Cbuffer::new(Point::new(2.0, 0.0), 2.0, None).unwrap();
        assert!(Cbuffer::collinear(&a, &b, &c, 0.5));
        let off = Cbuffer::new(Point::new(1.0, 1.0), 1.5, None).unwrap();
        assert!(!Cbuffer::collinear(&a, &off, &c, 0.5));
    }
}
