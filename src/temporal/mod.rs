//! The temporal value model (L3/L4) and lifting infrastructure (L5).

pub mod base_value;
pub mod instant;
pub mod interpolation;
pub mod lifting;
pub mod sequence;
pub mod sequence_set;
pub mod temporal_trait;

pub use base_value::BaseValue;
pub use instant::TInstant;
pub use interpolation::TInterpolation;
pub use lifting::{lift1, lift2, synchronize, CrossingFinder, SyncMode};
pub use sequence::TSequence;
pub use sequence_set::TSequenceSet;
pub use temporal_trait::Temporal;
