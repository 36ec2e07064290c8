//! `TSequenceSet` — an ordered sequence of non-overlapping `TSequence`s
//! sharing one interpolation.

use chrono::{DateTime, Utc};

use crate::boxes::STBox;
use crate::collections::base::Collection;
use crate::collections::datetime::Period;
use crate::errors::{Result, TemporalError};
use crate::temporal::base_value::BaseValue;
use crate::temporal::interpolation::TInterpolation;
use crate::temporal::sequence::TSequence;

#[derive(Debug, Clone, PartialEq)]
pub struct TSequenceSet {
    sequences: Vec<TSequence>,
    span: Period,
    bbox: Option<STBox>,
}

impl TSequenceSet {
    /// Builds a sequence set. Enforces that all children share an
    /// interpolation and are non-overlapping and properly ordered:
    /// `sᵢ.span.upper < sᵢ₊₁.span.lower`, or touching with not both
    /// bounds inclusive.
    pub fn new(sequences: Vec<TSequence>) -> Result<Self> {
        if sequences.is_empty() {
            return Err(TemporalError::domain(
                "a sequence set must contain at least one sequence",
            ));
        }
        let interpolation = sequences[0].interpolation();
        for w in sequences.windows(2) {
            if w[0].interpolation() != interpolation {
                return Err(TemporalError::domain(
                    "all sequences in a sequence set must share one interpolation",
                ));
            }
            let a = w[0].span();
            let b = w[1].span();
            if a.upper() > b.lower() {
                return Err(TemporalError::domain(
                    "sequences in a sequence set must be ordered and non-overlapping",
                ));
            }
            if a.upper() == b.lower() && a.upper_inc() && b.lower_inc() {
                return Err(TemporalError::domain(
                    "adjacent sequences cannot both include the shared boundary instant",
                ));
            }
        }

        let span = Period::new(
            sequences.first().unwrap().span().lower(),
            sequences.last().unwrap().span().upper(),
            sequences.first().unwrap().span().lower_inc(),
            sequences.last().unwrap().span().upper_inc(),
        )?;
        let bbox = sequences
            .iter()
            .filter_map(|s| s.bbox())
            .fold(None, |acc: Option<STBox>, b| match acc {
                Some(a) => Some(a.union(&b)),
                None => Some(b),
        });

        Ok(TSequenceSet {
            sequences,
            span,
            bbox,
        })
    }

    pub fn sequences(&self) -> &[TSequence] {
        &self.sequences
    }

    pub fn span(&self) -> Period {
        self.span
    }

    pub fn bbox(&self) -> Option<STBox> {
        self.bbox
    }

    pub fn interpolation(&self) -> TInterpolation {
        self.sequences[0].interpolation()
    }

    pub fn value_at(&self, t: DateTime<Utc>) -> Option<BaseValue> {
        self.sequences.iter().find_map(|s| s.value_at(t))
    }
}

impl Collection for TSequenceSet {
    type Type = DateTime<Utc>;

    fn n(&self) -> usize {
        self.sequences.iter().map(|s| s.n()).sum()
    }

    fn contains(&self, content: &DateTime<Utc>) -> bool {
        self.sequences.iter().any(|s| s.contains(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::instant::TInstant;
    use chrono::TimeZone;

    fn t(n: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(n, 0).unwrap()
    }

    fn seq(lo: i64, hi: i64) -> TSequence {
        TSequence::new(
            vec![
                TInstant::new(BaseValue::Float(lo as f64), t(lo)),
                TInstant::new(BaseValue::Float(hi as f64), t(hi)),
            ],
            TInterpolation::Linear,
            true,
            false,
        )
            .unwrap()
    }

    #[test]
    fn rejects_overlapping_children() {
        assert!(TSequenceSet::new(vec![seq(0, 10), seq(5, 15)]).is_err());
    }

    #[test]
    fn rejects_touching_children_both_inclusive() {
        let a = TSequence::new(
            vec![
                TInstant::new(BaseValue::Float(0.0), t(0)),
                TInstant::new(BaseValue::Float(10.0), t(10)),
            ],
            TInterpolation::Linear,
            true,
            true,
        )
            .unwrap();
        let b = TSequence::new(
            vec![
                TInstant::new(BaseValue::Float(10.0), t(10)),
                TInstant::new(BaseValue::Float(20.0), t(20)),
            ],
            TInterpolation::Linear,
            true,
            true,
        )
            .unwrap();
        assert!(TSequenceSet::new(vec![a, b]).is_err());
    }

    #[test]
    fn accepts_non_overlapping_children_and_unions_span() {
        let set = TSequenceSet::new(vec![seq(0, 10), seq(20, 30)]).unwrap();
        assert_eq!(set.span().lower(), t(0));
        assert_eq!(set.span().upper(), t(30));
    }
}
