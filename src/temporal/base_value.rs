//! Base-type polymorphism: a tagged sum type standing in for a
//! per-type dispatch table, per the Design Notes' "sum type with
//! capability traits" guidance.

use std::hash::{Hash, Hasher};

use geo_types::Point;

use crate::cbuffer::Cbuffer;
use crate::errors::{Result, TemporalError};

/// A value carried by a `TInstant`/`TSequence`/`TSequenceSet`, tagged by
/// base type.
#[derive(Debug, Clone, PartialEq)]
pub enum BaseValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Point(Point<f64>),
    Cbuffer(Cbuffer),
}

/// A short, stable name for the tag — used in error messages and MF-JSON
/// `type` fields.
impl BaseValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            BaseValue::Bool(_) => "Boolean",
            BaseValue::Int(_) => "Integer",
            BaseValue::Float(_) => "Float",
            BaseValue::Text(_) => "Text",
            BaseValue::Point(_) => "Point",
            BaseValue::Cbuffer(_) => "Cbuffer",
        }
    }

    /// Whether this base type admits `Linear` interpolation. Text and
    /// boolean values have no meaningful blend between two instants.
    pub fn supports_linear(&self) -> bool {
        matches!(
            self,
            BaseValue::Int(_) | BaseValue::Float(_) | BaseValue::Point(_) | BaseValue::Cbuffer(_)
        )
    }

    /// `same` equality — approximate for floating base types, matching
    /// the source's `MEOS_EPSILON` tolerance.
    pub fn same(&self, other: &BaseValue) -> bool {
        match (self, other) {
            (BaseValue::Bool(a), BaseValue::Bool(b)) => a == b,
            (BaseValue::Int(a), BaseValue::Int(b)) => a == b,
            (BaseValue::Float(a), BaseValue::Float(b)) => (a - b).abs() < crate::cbuffer::cbuffer::MEOS_EPSILON,
            (BaseValue::Text(a), BaseValue::Text(b)) => a == b,
            (BaseValue::Point(a), BaseValue::Point(b)) => {
                (a.x() - b.x()).abs() < crate::cbuffer::cbuffer::MEOS_EPSILON
                    && (a.y() - b.y()).abs() < crate::cbuffer::cbuffer::MEOS_EPSILON
            }
            (BaseValue::Cbuffer(a), BaseValue::Cbuffer(b)) => a.same(b),
            _ => false,
        }
    }

    /// Linear blend at parameter `ratio` in `[0, 1]`. Errors for base
    /// types without the interpolation capability.
    pub fn interpolate(&self, other: &BaseValue, ratio: f64) -> Result<BaseValue> {
        match (self, other) {
            (BaseValue::Int(a), BaseValue::Int(b)) => {
                let blended = *a as f64 + (*b as f64 - *a as f64) * ratio;
                Ok(BaseValue::Float(blended))
            }
            (BaseValue::Float(a), BaseValue::Float(b)) => Ok(BaseValue::Float(a + (b - a) * ratio)),
            (BaseValue::Point(a), BaseValue::Point(b)) => Ok(BaseValue::Point(Point::new(
                a.x() + (b.x() - a.x()) * ratio,
                a.y() + (b.y() - a.y()) * ratio,
            ))),
            (BaseValue::Cbuffer(a), BaseValue::Cbuffer(b)) => {
                Ok(BaseValue::Cbuffer(a.interpolate(b, ratio)))
            }
            _ => Err(TemporalError::unsupported(format!(
                "linear interpolation is not defined for base type '{}'",
                self.type_name()
            ))),
        }
    }

    /// Numeric distance, used by `dwithin`-style relations. Defined for
    /// the base types that have a coordinate notion.
    pub fn distance(&self, other: &BaseValue) -> Result<f64> {
        match (self, other) {
            (BaseValue::Int(a), BaseValue::Int(b)) => Ok((*a - *b).abs() as f64),
            (BaseValue::Float(a), BaseValue::Float(b)) => Ok((a - b).abs()),
            (BaseValue::Point(a), BaseValue::Point(b)) => {
                Ok(((a.x() - b.x()).powi(2) + (a.y() - b.y()).powi(2)).sqrt())
            }
            (BaseValue::Cbuffer(a), BaseValue::Cbuffer(b)) => Ok(a.center_distance(b)),
            _ => Err(TemporalError::unsupported(format!(
                "distance is not defined for base type '{}'",
                self.type_name()
            ))),
        }
    }

    /// Whether `b` is collinear with `a` and `c` at the same parameter
    /// `ratio` — the compressibility test generalized beyond `Cbuffer`
    /// to every base type that supports linear blend.
    pub fn collinear(a: &BaseValue, b: &BaseValue, c: &BaseValue, ratio: f64) -> bool {
        match a.interpolate(c, ratio) {
            Ok(expected) => b.same(&expected),
            Err(_) => false,
        }
    }
}

impl Eq for BaseValue {}

impl Hash for BaseValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            BaseValue::Bool(b) => b.hash(state),
            BaseValue::Int(i) => i.hash(state),
            BaseValue::Float(f) => f.to_bits().hash(state),
            BaseValue::Text(t) => t.hash(state),
            BaseValue::Point(p) => {
                p.x().to_bits().hash(state);
                p.y().to_bits().hash(state);
            }
            BaseValue::Cbuffer(c) => {
                c.x().to_bits().hash(state);
                c.y().to_bits().hash(state);
                c.radius().to_bits().hash(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_has_no_linear_interpolation() {
        let a = BaseValue::Text("a".into());
        let b = BaseValue::Text("b".into());
        assert!(!a.supports_linear());
        assert!(a.interpolate(&b, 0.5).is_err());
    }

    #[test]
    fn float_interpolation_midpoint() {
        let a = BaseValue::Float(0.0);
        let b = BaseValue::Float(10.0);
        match a.interpolate(&b, 0.5).unwrap() {
            BaseValue::Float(v) => assert_eq!(v, 5.0),
            _ => panic!("expected float"),
        }
    }

    #[test]
    fn collinear_points() {
        let a = BaseValue::Point(Point::new(0.0, 0.0));
        let b = BaseValue::Point(Point::new(1.0, 1.0));
        let c = BaseValue::Point(Point::new(2.0, 2.0));
        assert!(BaseValue::collinear(&a, &b, &c, 0.5));
    }
}
