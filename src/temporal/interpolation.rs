//! How a `TSequence` defines values *between* its instants.

use std::fmt;
use std::str::FromStr;

use crate::errors::TemporalError;

/// Interpolation mode of a `TSequence`/`TSequenceSet` — , GLOSSARY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TInterpolation {
    /// Undefined between instants; the sequence models instantaneous events.
    Discrete,
    /// Equal to the earlier endpoint until the next instant.
    Step,
    /// Linear blend between the two bounding instants.
    Linear,
}

impl fmt::Display for TInterpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TInterpolation::Discrete => "Discrete",
            TInterpolation::Step => "Step",
            TInterpolation::Linear => "Linear",
        };
        f.write_str(s)
    }
}

impl FromStr for TInterpolation {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Discrete" => Ok(TInterpolation::Discrete),
            "Step" => Ok(TInterpolation::Step),
            "Linear" => Ok(TInterpolation::Linear),
            other => Err(TemporalError::parse(0, format!("interpolation, got '{other}'"))),
        }
    }
}
