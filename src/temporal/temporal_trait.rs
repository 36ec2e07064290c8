//! `Temporal` — the umbrella over the three temporal-value
//! representations, as an enum: the three representations here are
//! concrete structs rather than associated types of a generic trait,
//! so dispatch is a `match`.

use chrono::DateTime;
use chrono::Utc;

use crate::collections::base::Collection;
use crate::collections::datetime::Period;
use crate::boxes::STBox;
use crate::temporal::base_value::BaseValue;
use crate::temporal::instant::TInstant;
use crate::temporal::interpolation::TInterpolation;
use crate::temporal::sequence::TSequence;
use crate::temporal::sequence_set::TSequenceSet;

#[derive(Debug, Clone, PartialEq)]
pub enum Temporal {
    Instant(TInstant),
    Sequence(TSequence),
    SequenceSet(TSequenceSet),
}

impl Temporal {
    pub fn span(&self) -> Period {
        match self {
            Temporal::Instant(i) => Period::instant(i.t()),
            Temporal::Sequence(s) => s.span(),
            Temporal::SequenceSet(ss) => ss.span(),
        }
    }

    pub fn interpolation(&self) -> TInterpolation {
        match self {
            Temporal::Instant(_) => TInterpolation::Discrete,
            Temporal::Sequence(s) => s.interpolation(),
            Temporal::SequenceSet(ss) => ss.interpolation(),
        }
    }

    pub fn bbox(&self) -> Option<STBox> {
        match self {
            Temporal::Instant(i) => match i.value() {
                BaseValue::Point(p) => Some(STBox::from_point(p.x(), p.y(), None)),
                BaseValue::Cbuffer(c) => {
                    Some(STBox::from_point(c.x(), c.y(), c.srid()).expanded(c.radius()))
                }
                _ => None,
            },
            Temporal::Sequence(s) => s.bbox(),
            Temporal::SequenceSet(ss) => ss.bbox(),
        }
    }

    pub fn value_at(&self, t: DateTime<Utc>) -> Option<BaseValue> {
        match self {
            Temporal::Instant(i) => (i.t() == t).then(|| i.value().clone()),
            Temporal::Sequence(s) => s.value_at(t),
            Temporal::SequenceSet(ss) => ss.value_at(t),
        }
    }

    pub fn start_value(&self) -> BaseValue {
        match self {
            Temporal::Instant(i) => i.value().clone(),
            Temporal::Sequence(s) => s.start_instant().value().clone(),
            Temporal::SequenceSet(ss) => ss
                .sequences()
                .first()
                .expect("non-empty by invariant")
                .start_instant()
                .value()
                .clone(),
        }
    }

    pub fn end_value(&self) -> BaseValue {
        match self {
            Temporal::Instant(i) => i.value().clone(),
            Temporal::Sequence(s) => s.end_instant().value().clone(),
            Temporal::SequenceSet(ss) => ss
                .sequences()
                .last()
                .expect("non-empty by invariant")
                .end_instant()
                .value()
                .clone(),
        }
    }

    /// All `(value, t)` pairs, flattened across whichever representation
    /// this is.
    pub fn instants(&self) -> Vec<TInstant> {
        match self {
            Temporal::Instant(i) => vec![i.clone()],
            Temporal::Sequence(s) => s.instants().to_vec(),
            Temporal::SequenceSet(ss) => ss
                .sequences()
                .iter()
                .flat_map(|s| s.instants().to_vec())
                .collect(),
        }
    }
}

impl Collection for Temporal {
    type Type = DateTime<Utc>;

    fn n(&self) -> usize {
        match self {
            Temporal::Instant(i) => i.n(),
            Temporal::Sequence(s) => s.n(),
            Temporal::SequenceSet(ss) => ss.n(),
        }
    }

    fn contains(&self, content: &DateTime<Utc>) -> bool {
        match self {
            Temporal::Instant(i) => i.contains(content),
            Temporal::Sequence(s) => s.contains(content),
            Temporal::SequenceSet(ss) => ss.contains(content),
        }
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
    fn instant_wrapper_reports_its_own_span() {
        let temp = Temporal::Instant(TInstant::new(BaseValue::Int(1), t(5)));
        assert!(temp.span().is_instant());
        assert_eq!(temp.span().lower(), t(5));
    }
}
