//! `TInstant` — a single `(value, t)` pair, the leaf of the temporal
//! value model.

use chrono::{DateTime, Utc};

use crate::collections::base::Collection;
use crate::temporal::base_value::BaseValue;

#[derive(Debug, Clone, PartialEq)]
pub struct TInstant {
    value: BaseValue,
    t: DateTime<Utc>,
}

impl TInstant {
    pub fn new(value: BaseValue, t: DateTime<Utc>) -> Self {
        TInstant { value, t }
    }

    pub fn value(&self) -> &BaseValue {
        &self.value
    }

    pub fn t(&self) -> DateTime<Utc> {
        self.t
    }
}

impl Collection for TInstant {
    type Type = DateTime<Utc>;

    fn n(&self) -> usize {
        1
    }

    fn contains(&self, content: &DateTime<Utc>) -> bool {
        self.t == *content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn exposes_its_value_and_instant() {
        let t = Utc.timestamp_opt(100, 0).unwrap();
        let inst = TInstant::new(BaseValue::Int(42), t);
        assert_eq!(inst.value(), &BaseValue::Int(42));
        assert_eq!(inst.t(), t);
    }
}
