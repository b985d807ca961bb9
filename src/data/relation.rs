use std::cmp::Ordering;

use super::column::Column;

// ---------------------------------------------------------------------------
// Relation – a value attached to an unordered pair of columns
// ---------------------------------------------------------------------------

/// Covariance or correlation between columns `a` and `b` (`a < b`, indices
/// into the dataset's column list at the time of computation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relation {
    pub a: usize,
    pub b: usize,
    pub value: f64,
}

/// Ascending order with every NaN after every number, whatever its sign bit.
pub fn nan_last(x: f64, y: f64) -> Ordering {
    x.is_nan().cmp(&y.is_nan()).then(x.total_cmp(&y))
}

/// Sample variance per column: `Σ (x - avg)^2 / (count - 1)`.
pub fn sample_variances(rows: &[Vec<f64>], columns: &[Column]) -> Vec<f64> {
    let mut sums = vec![0.0; columns.len()];
    for row in rows {
        for (j, (x, col)) in row.iter().zip(columns).enumerate() {
            sums[j] += (x - col.avg()).powi(2);
        }
    }

    sums.iter()
        .zip(columns)
        .map(|(s, col)| s / (col.count as f64 - 1.0))
        .collect()
}

/// Population covariance for every pair `(i, j)`, `i < j`, in column order:
/// `Σ (x_i - avg_i)(x_j - avg_j) / n`.
pub fn covariances(rows: &[Vec<f64>], columns: &[Column]) -> Vec<Relation> {
    let n = rows.len() as f64;
    let avgs: Vec<f64> = columns.iter().map(Column::avg).collect();

    let mut relations = Vec::with_capacity(columns.len() * columns.len().saturating_sub(1) / 2);
    for a in 0..columns.len() {
        for b in a + 1..columns.len() {
            relations.push(Relation { a, b, value: 0.0 });
        }
    }

    for row in rows {
        let mut k = 0;
        for a in 0..columns.len() {
            let da = row[a] - avgs[a];
            for b in a + 1..columns.len() {
                relations[k].value += da * (row[b] - avgs[b]) / n;
                k += 1;
            }
        }
    }

    relations
}

/// Squared Pearson correlation for each covariance relation:
/// `(n·cov)^2 / ((n·var_a)(n·var_b))`.
///
/// Requires the columns' variances; uncomputed ones read as NaN.
pub fn correlations(covariances: &[Relation], columns: &[Column], n: usize) -> Vec<Relation> {
    let n = n as f64;
    covariances
        .iter()
        .map(|cov| {
            let ssxx = n * columns[cov.a].variance_or_nan();
            let ssyy = n * columns[cov.b].variance_or_nan();
            let ssxy = n * cov.value;
            Relation {
                value: (ssxy * ssxy) / (ssxx * ssyy),
                ..*cov
            }
        })
        .collect()
}

/// Greedy feature ordering from correlations.
///
/// Relations are processed from the least to the most correlated pair
/// (stable sort, so ties keep their input order). A pair with neither column
/// placed yet contributes both, lower variance first; a pair with one column
/// placed contributes the other one. Only columns below `width` take part.
/// Columns never reached (fewer than two features) follow in index order.
pub fn correlation_order(correlations: &[Relation], columns: &[Column], width: usize) -> Vec<usize> {
    let mut sorted: Vec<&Relation> = correlations
        .iter()
        .filter(|r| r.a < width && r.b < width)
        .collect();
    sorted.sort_by(|x, y| nan_last(x.value, y.value));

    let mut indexes: Vec<usize> = Vec::with_capacity(width);
    for rel in sorted {
        let has_a = indexes.contains(&rel.a);
        let has_b = indexes.contains(&rel.b);

        match (has_a, has_b) {
            (false, false) => {
                if columns[rel.a].variance_or_nan() < columns[rel.b].variance_or_nan() {
                    indexes.push(rel.a);
                    indexes.push(rel.b);
                } else {
                    indexes.push(rel.b);
                    indexes.push(rel.a);
                }
            }
            (false, true) => indexes.push(rel.a),
            (true, false) => indexes.push(rel.b),
            (true, true) => {}
        }
    }

    for i in 0..width {
        if !indexes.contains(&i) {
            indexes.push(i);
        }
    }

    indexes
}
