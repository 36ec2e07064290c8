//! `TimestampSet` — an ordered, duplicate-free set of instants.

use chrono::{DateTime, Utc};

use crate::collections::base::Collection;
use crate::collections::datetime::period::Period;
use crate::errors::{Result, TemporalError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampSet {
    instants: Vec<DateTime<Utc>>,
    span: Period,
}

impl TimestampSet {
    /// Builds a set from arbitrary instants, sorting and de-duplicating
    /// them. Fails only if `instants` is empty — a `TimestampSet` always
    /// has a well-defined bounding `Period`.
    pub fn new(mut instants: Vec<DateTime<Utc>>) -> Result<Self> {
        if instants.is_empty() {
            return Err(TemporalError::domain(
                "a timestamp set must contain at least one instant",
            ));
        }
        instants.sort_unstable();
        instants.dedup();
        let span = Period::new(
            *instants.first().unwrap(),
            *instants.last().unwrap(),
            true,
            true,
        )?;
        Ok(TimestampSet { instants, span })
    }

    pub fn instants(&self) -> &[DateTime<Utc>] {
        &self.instants
    }

    pub fn instant_n(&self, n: usize) -> Option<DateTime<Utc>> {
        self.instants.get(n).copied()
    }

    /// Bounding `Period`, cached at construction time.
    pub fn span(&self) -> Period {
        self.span
    }

    fn position(&self, t: DateTime<Utc>) -> std::result::Result<usize, usize> {
        self.instants.binary_search(&t)
    }
}

impl Collection for TimestampSet {
    type Type = DateTime<Utc>;

    fn n(&self) -> usize {
        self.instants.len()
    }

    fn contains(&self, content: &DateTime<Utc>) -> bool {
        self.position(*content).is_ok()
    }
}
