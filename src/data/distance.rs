use crate::error::{DataError, Result};

/// Minkowski distance `(Σ|a_i - b_i|^p)^(1/p)`.
///
/// * `p = 2.0` – Euclidean
/// * `p = 1.0` – Manhattan
pub fn minkowski(p: f64, a: &[f64], b: &[f64]) -> Result<f64> {
    if !(p.is_finite() && p > 0.0) {
        return Err(DataError::InvalidExponent(p));
    }
    if a.len() != b.len() {
        return Err(DataError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs().powf(p))
        .sum();

    Ok(sum.powf(1.0 / p))
}
