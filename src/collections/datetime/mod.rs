//! Time-set collections: the L1/L2 layer of this crate's dependency table.

pub mod bounds;
pub mod period;
pub mod period_set;
pub mod relations;
pub mod timestamp_set;

pub use bounds::{bounds_adjacent, cmp_bounds, BoundSide};
pub use period::Period;
pub use period_set::PeriodSet;
pub use relations::TimeSet;
pub use timestamp_set::TimestampSet;
