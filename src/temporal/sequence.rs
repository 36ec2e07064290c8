//! `TSequence` — a contiguous, time-ordered array of `TInstant`s sharing
//! one interpolation mode.

use std::mem::discriminant;

use chrono::{DateTime, Utc};

use crate::boxes::STBox;
use crate::collections::base::Collection;
use crate::collections::datetime::Period;
use crate::errors::{Result, TemporalError};
use crate::temporal::base_value::BaseValue;
use crate::temporal::instant::TInstant;
use crate::temporal::interpolation::TInterpolation;

#[derive(Debug, Clone, PartialEq)]
pub struct TSequence {
    instants: Vec<TInstant>,
    span: Period,
    interpolation: TInterpolation,
    bbox: Option<STBox>,
}

impl TSequence {
    /// Builds a sequence, enforcing invariants: strictly
    /// increasing timestamps, at least one instant, homogeneous base
    /// type, `Linear` only for base types with the interpolation
    /// capability, and `Discrete` forced to a closed span.
    pub fn new(
        instants: Vec<TInstant>,
        interpolation: TInterpolation,
        lower_inc: bool,
        upper_inc: bool,
    ) -> Result<Self> {
        if instants.is_empty() {
            return Err(TemporalError::domain(
                "a sequence must contain at least one instant",
            ));
        }
        for w in instants.windows(2) {
            if w[0].t() >= w[1].t() {
                return Err(TemporalError::domain(
                    "sequence instants must have strictly increasing timestamps",
                ));
            }
            if discriminant(w[0].value()) != discriminant(w[1].value()) {
                return Err(TemporalError::domain(
                    "a sequence cannot mix base-value types",
                ));
            }
        }
        if interpolation == TInterpolation::Linear && !instants[0].value().supports_linear() {
            return Err(TemporalError::unsupported(format!(
                "'{}' does not support linear interpolation",
                        instants[0].value().type_name()
            )));
        }

        let (lower_inc, upper_inc) = if instants.len() == 1 || interpolation == TInterpolation::Discrete {
            (true, true)
        } else {
            (lower_inc, upper_inc)
        };

        let span = Period::new(
            instants.first().unwrap().t(),
            instants.last().unwrap().t(),
            lower_inc,
            upper_inc,
        )?;
        let bbox = spatial_bbox(&instants);

        Ok(TSequence {
            instants,
            span,
            interpolation,
            bbox,
        })
    }

    pub fn instants(&self) -> &[TInstant] {
        &self.instants
    }

    pub fn span(&self) -> Period {
        self.span
    }

    pub fn interpolation(&self) -> TInterpolation {
        self.interpolation
    }

    pub fn bbox(&self) -> Option<STBox> {
        self.bbox
    }

    pub fn start_instant(&self) -> &TInstant {
        self.instants.first().expect("non-empty by invariant")
    }

    pub fn end_instant(&self) -> &TInstant {
        self.instants.last().expect("non-empty by invariant")
    }

    /// Value at `t`, honoring the sequence's interpolation mode.
    /// `None` if `t` falls outside `span`.
    pub fn value_at(&self, t: DateTime<Utc>) -> Option<BaseValue> {
        if !self.span.contains_instant(t) {
            return None;
        }
        match self.interpolation {
            TInterpolation::Discrete => self
                .instants
                .iter()
                .find(|i| i.t() == t)
                .map(|i| i.value().clone()),
            TInterpolation::Step => {
                let idx = self.instants.partition_point(|i| i.t() <= t);
                self.instants.get(idx.saturating_sub(1)).map(|i| i.value().clone())
            }
            TInterpolation::Linear => {
                if let Ok(idx) = self
                    .instants
                    .binary_search_by(|i| i.t().cmp(&t))
                {
                    return Some(self.instants[idx].value().clone());
                }
                let idx = self.instants.partition_point(|i| i.t() < t);
                if idx == 0 || idx == self.instants.len() {
                    return None;
                }
                let before = &self.instants[idx - 1];
                let after = &self.instants[idx];
                let whole = (after.t() - before.t()).num_nanoseconds()? as f64;
                let elapsed = (t - before.t()).num_nanoseconds()? as f64;
                let ratio = elapsed / whole;
                before.value().interpolate(after.value(), ratio).ok()
            }
        }
    }
}

fn spatial_bbox(instants: &[TInstant]) -> Option<STBox> {
    let mut iter = instants.iter().filter_map(|inst| match inst.value() {
        BaseValue::Point(p) => Some(STBox::from_point(p.x(), p.y(), None)),
        BaseValue::Cbuffer(c) => Some(STBox::from_point(c.x(), c.y(), c.srid()).expanded(c.radius())),
        _ => None,
    });
    let first = iter.next()?;
    Some(iter.fold(first, |acc, b| acc.union(&b)))
}

impl Collection for TSequence {
    type Type = DateTime<Utc>;

    fn n(&self) -> usize {
        self.instants.len()
    }

    fn contains(&self, content: &DateTime<Utc>) -> bool {
        self.instants.iter().any(|i| i.t() == *content)
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
    fn rejects_non_monotonic_instants() {
        let instants = vec![
            TInstant::new(BaseValue::Int(1), t(10)),
            TInstant::new(BaseValue::Int(2), t(5)),
        ];
        assert!(TSequence::new(instants, TInterpolation::Step, true, false).is_err());
    }

    #[test]
    fn single_instant_forces_closed_span() {
        let instants = vec![TInstant::new(BaseValue::Int(1), t(10))];
        let seq = TSequence::new(instants, TInterpolation::Discrete, true, false).unwrap();
        assert!(seq.span().lower_inc());
        assert!(seq.span().upper_inc());
    }

    #[test]
    fn rejects_linear_on_text() {
        let instants = vec![
            TInstant::new(BaseValue::Text("a".into()), t(0)),
            TInstant::new(BaseValue::Text("b".into()), t(10)),
        ];
        assert!(TSequence::new(instants, TInterpolation::Linear, true, false).is_err());
    }

    #[test]
    fn step_interpolation_holds_earlier_value() {
        let instants = vec![
            TInstant::new(BaseValue::Int(1), t(0)),
            TInstant::new(BaseValue::Int(2), t(10)),
        ];
        let seq = TSequence::new(instants, TInterpolation::Step, true, false).unwrap();
        assert_eq!(seq.value_at(t(5)), Some(BaseValue::Int(1)));
    }

    #[test]
    fn linear_interpolation_blends() {
        let instants = vec![
            TInstant::new(BaseValue::Float(0.0), t(0)),
            TInstant::new(BaseValue::Float(10.0), t(10)),
        ];
        let seq = TSequence::new(instants, TInterpolation::Linear, true, true).unwrap();
        assert_eq!(seq.value_at(t(5)), Some(BaseValue::Float(5.0)));
    }
}
