use thiserror::Error;

// ---------------------------------------------------------------------------
// DataError – failures of the statistics / transformation core
// ---------------------------------------------------------------------------

/// Errors raised by dataset transformations.
///
/// Degenerate arithmetic (zero ranges, single-row variances) is not an
/// error: it yields NaN or Infinity and is left to the display layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataError {
    #[error("dimension mismatch: row has {left} values but reference has {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("invalid Minkowski exponent p = {0} (must be finite and > 0)")]
    InvalidExponent(f64),
}

pub type Result<T> = std::result::Result<T, DataError>;
