//! Domain-coded error taxonomy.
//!
//! Every public operation in this crate returns `Result<_, TemporalError>`
//! rather than panicking, except for genuinely broken invariants (see
//! [`TemporalError::Internal`]).

use thiserror::Error;

/// A position and the token an operation expected to find there, for
/// reporting malformed text or WKB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePosition {
    pub offset: usize,
    pub expected: String,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TemporalError {
    /// Malformed text or WKB input.
    #[error("parse error at offset {}: expected {}", .0.offset, .0.expected)]
    Parse(ParsePosition),

    /// A value outside its allowed domain: negative radius, empty geometry
    /// where forbidden, mismatched SRIDs, heterogeneous interpolation in a
    /// sequence set, a non-normalized period set passed where one is
    /// assumed normalized, etc.
    #[error("domain error: {0}")]
    Domain(String),

    /// 2D/3D or geometry/geography mismatch between operands.
    #[error("dimensionality mismatch: {0}")]
    Dimensionality(String),

    /// Operation not defined for a given base-type/interpolation
    /// combination.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// A broken invariant. Treated as panic-equivalent: code that can
    /// prove it cannot happen should still return this rather than
    /// `unreachable!()`, so callers at an FFI boundary (should one ever
    /// be added) get a catchable error instead of an abort.
    #[error("internal invariant violated: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, TemporalError>;

impl TemporalError {
    pub fn parse(offset: usize, expected: impl Into<String>) -> Self {
        let expected = expected.into();
        tracing::debug!(offset, expected = %expected, "parse error");
        TemporalError::Parse(ParsePosition { offset, expected })
    }

    pub fn domain(msg: impl Into<String>) -> Self {
        TemporalError::Domain(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        TemporalError::Unsupported(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        TemporalError::Internal(msg.into())
    }
}
