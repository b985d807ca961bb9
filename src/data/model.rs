use super::column::Column;
use super::distance::minkowski;
use super::relation::{self, Relation};
use crate::error::{DataError, Result};

// ---------------------------------------------------------------------------
// Dataset – rows, per-feature statistics and optional labels
// ---------------------------------------------------------------------------

/// A loaded table of numeric rows with one [`Column`] per field.
///
/// Transformations mutate in place through `&mut self`. Every mutation drops
/// the covariance / correlation caches, so relations never point at stale
/// column positions.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<Vec<f64>>,
    columns: Vec<Column>,
    /// One entry per row when the source had a trailing label column.
    /// `None` entries are labels that did not parse as numbers.
    labels: Option<Vec<Option<i64>>>,
    /// Number of source features; distance columns are appended after them.
    features: usize,
    covariances: Option<Vec<Relation>>,
    correlations: Option<Vec<Relation>>,
}

impl Dataset {
    /// An empty dataset (shown while a load is in flight).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a dataset from raw records.
    ///
    /// The first record fixes the row width. Shorter records are padded with
    /// NaN and longer ones truncated. With `last_is_label` the trailing field
    /// of every record is split off as an integer label and excluded from
    /// the column statistics.
    pub fn from_records(records: Vec<Vec<f64>>, last_is_label: bool) -> Self {
        let Some(first) = records.first() else {
            return Self::empty();
        };
        let width = if last_is_label {
            first.len().saturating_sub(1)
        } else {
            first.len()
        };
        let full = if last_is_label { width + 1 } else { width };

        let mut columns: Vec<Column> = (0..width).map(Column::new).collect();
        let mut labels = Vec::with_capacity(if last_is_label { records.len() } else { 0 });
        let mut rows = Vec::with_capacity(records.len());

        for (row_no, mut record) in records.into_iter().enumerate() {
            if record.len() != full {
                log::warn!(
                    "row {row_no}: expected {full} fields, found {}; adjusting",
                    record.len()
                );
                record.resize(full, f64::NAN);
            }

            if last_is_label {
                labels.push(record.pop().and_then(label_from_f64));
            }

            for (col, x) in columns.iter_mut().zip(&record) {
                col.add(*x);
            }
            rows.push(record);
        }

        Dataset {
            rows,
            columns,
            labels: last_is_label.then_some(labels),
            features: width,
            covariances: None,
            correlations: None,
        }
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn labels(&self) -> Option<&[Option<i64>]> {
        self.labels.as_deref()
    }

    /// Label of row `row`, if the dataset has labels and it parsed.
    pub fn label(&self, row: usize) -> Option<i64> {
        self.labels.as_ref()?.get(row).copied().flatten()
    }

    /// Number of source features (columns before any appended distances).
    pub fn feature_count(&self) -> usize {
        self.features
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// No rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    pub fn has_labels(&self) -> bool {
        self.labels.as_ref().is_some_and(|l| !l.is_empty())
    }

    // -- Statistics --

    /// Fill in each column's sample variance unless all are already known.
    pub fn compute_variances(&mut self) {
        if self.is_empty() || self.columns.iter().all(|c| c.variance.is_some()) {
            return;
        }

        let variances = relation::sample_variances(&self.rows, &self.columns);
        for (col, v) in self.columns.iter_mut().zip(variances) {
            col.variance = Some(v);
        }
    }

    /// Population covariance of every column pair (memoized).
    pub fn covariances(&mut self) -> &[Relation] {
        if self.is_empty() {
            return &[];
        }
        self.covariances
            .get_or_insert_with(|| relation::covariances(&self.rows, &self.columns))
            .as_slice()
    }

    /// Squared Pearson correlation of every column pair (memoized).
    pub fn correlations(&mut self) -> &[Relation] {
        if self.is_empty() {
            return &[];
        }
        if self.correlations.is_none() {
            self.compute_variances();
            let n = self.rows.len();
            let covariances = self.covariances().to_vec();
            self.correlations = Some(relation::correlations(&covariances, &self.columns, n));
        }
        self.correlations.as_deref().unwrap_or_default()
    }

    // -- Transformations --

    /// Min-max scale every column into `[0, 1]`, replacing the column set.
    pub fn scale(&mut self) -> &mut Self {
        if self.is_empty() {
            return self;
        }

        let mut scaled: Vec<Column> = self.columns.iter().map(|c| Column::new(c.i)).collect();
        for row in &mut self.rows {
            for ((x, old), new) in row.iter_mut().zip(&self.columns).zip(scaled.iter_mut()) {
                *x = old.scale(*x);
                new.add(*x);
            }
        }

        self.columns = scaled;
        self.invalidate();
        self
    }

    /// Reorder features by ascending variance (stable; NaN variances last).
    pub fn sort_features_by_variance(&mut self) -> &mut Self {
        if self.is_empty() {
            return self;
        }

        self.compute_variances();
        let mut order: Vec<usize> = (0..self.features).collect();
        order.sort_by(|&a, &b| {
            relation::nan_last(
                self.columns[a].variance_or_nan(),
                self.columns[b].variance_or_nan(),
            )
        });
        log::debug!("variance order: {order:?}");

        self.permute(&order);
        self
    }

    /// Reorder features by the greedy low-correlation chaining of
    /// [`relation::correlation_order`].
    pub fn sort_features_by_correlation(&mut self) -> &mut Self {
        if self.is_empty() {
            return self;
        }

        let correlations = self.correlations().to_vec();
        let order = relation::correlation_order(&correlations, &self.columns, self.features);
        log::debug!("correlation order: {order:?}");

        self.permute(&order);
        self
    }

    /// Append a Euclidean distance column, see [`Dataset::add_distance_to`].
    pub fn append_distance(&mut self, reference: &[f64]) -> Result<&mut Self> {
        self.add_distance_to(2.0, reference)
    }

    /// Append a column holding each row's Minkowski-`p` distance from its
    /// source features to `reference`.
    ///
    /// Previously appended distance columns are not part of the measured
    /// vector, so `reference` must have [`Dataset::feature_count`] entries.
    /// Nothing is modified when an error is returned.
    pub fn add_distance_to(&mut self, p: f64, reference: &[f64]) -> Result<&mut Self> {
        if self.is_empty() {
            return Ok(self);
        }
        if reference.len() != self.features {
            return Err(DataError::DimensionMismatch {
                left: self.features,
                right: reference.len(),
            });
        }

        let distances = self
            .rows
            .iter()
            .map(|row| minkowski(p, &row[..self.features], reference))
            .collect::<Result<Vec<f64>>>()?;

        let mut column = Column::new(self.columns.len());
        for (row, d) in self.rows.iter_mut().zip(distances) {
            row.push(d);
            column.add(d);
        }
        self.columns.push(column);
        self.invalidate();
        Ok(self)
    }

    /// Move feature `order[k]` to position `k` in every row and the column
    /// list. Appended distance columns keep their trailing positions.
    fn permute(&mut self, order: &[usize]) {
        let tail: Vec<usize> = (self.features..self.columns.len()).collect();
        let full: Vec<usize> = order.iter().chain(&tail).copied().collect();

        let mut columns: Vec<Column> = full.iter().map(|&j| self.columns[j].clone()).collect();
        for (i, col) in columns.iter_mut().enumerate() {
            col.i = i;
        }

        for row in &mut self.rows {
            let permuted: Vec<f64> = full.iter().map(|&j| row[j]).collect();
            *row = permuted;
        }

        self.columns = columns;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.covariances = None;
        self.correlations = None;
    }
}

/// Integral labels only; `1.7` is not a class.
fn label_from_f64(x: f64) -> Option<i64> {
    (x.is_finite() && x.fract() == 0.0).then_some(x as i64)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Rectangular tables of bounded finite values.
    fn table() -> impl Strategy<Value = Vec<Vec<f64>>> {
        (1_usize..6, 2_usize..30).prop_flat_map(|(width, rows)| {
            proptest::collection::vec(
                proptest::collection::vec(-1000.0_f64..1000.0, width),
                rows,
            )
        })
    }

    /// Column vectors in a canonical order, for permutation checks.
    fn sorted_columns(ds: &Dataset) -> Vec<Vec<f64>> {
        let mut cols: Vec<Vec<f64>> = (0..ds.columns().len())
            .map(|j| ds.rows().iter().map(|r| r[j]).collect())
            .collect();
        cols.sort_by(|a, b| {
            a.iter()
                .zip(b)
                .map(|(x, y)| x.total_cmp(y))
                .find(|o| o.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        cols
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn average_lies_between_min_and_max(records in table()) {
            let ds = Dataset::from_records(records, false);
            for col in ds.columns() {
                let tol = 1e-9 * col.max.abs().max(col.min.abs()).max(1.0);
                prop_assert!(col.min <= col.avg() + tol);
                prop_assert!(col.avg() <= col.max + tol);
            }
        }

        #[test]
        fn scaled_columns_span_unit_interval(records in table()) {
            let mut ds = Dataset::from_records(records, false);
            let constant: Vec<bool> = ds.columns().iter().map(|c| c.range() == 0.0).collect();
            ds.scale();

            for (j, col) in ds.columns().iter().enumerate() {
                if constant[j] {
                    continue;
                }
                prop_assert_eq!(col.min, 0.0);
                prop_assert_eq!(col.max, 1.0);
                prop_assert!(ds.rows().iter().all(|r| (0.0..=1.0).contains(&r[j])));
            }
        }

        #[test]
        fn variance_sort_is_ordered_and_idempotent(records in table()) {
            let mut ds = Dataset::from_records(records, false);
            ds.sort_features_by_variance();
            let vars: Vec<f64> = ds.columns().iter().map(|c| c.variance_or_nan()).collect();
            prop_assert!(vars.windows(2).all(|w| w[0] <= w[1]));

            let rows = ds.rows().to_vec();
            ds.sort_features_by_variance();
            prop_assert_eq!(ds.rows(), rows.as_slice());
        }

        #[test]
        fn correlation_sort_permutes_columns(records in table()) {
            let mut ds = Dataset::from_records(records, false);
            let before = sorted_columns(&ds);
            ds.sort_features_by_correlation();
            let after = sorted_columns(&ds);

            prop_assert_eq!(before, after);
            prop_assert!(ds.columns().iter().enumerate().all(|(i, c)| c.i == i));
        }

        #[test]
        fn squared_correlations_are_bounded(records in table()) {
            let mut ds = Dataset::from_records(records, false);
            for r in ds.correlations() {
                prop_assert!(r.value.is_nan() || (-1e-9..=1.0 + 1e-9).contains(&r.value));
            }
        }

        #[test]
        fn distance_to_origin_is_euclidean_norm(records in table()) {
            let mut ds = Dataset::from_records(records, false);
            let width = ds.feature_count();
            ds.add_distance_to(2.0, &vec![0.0; width]).unwrap();

            prop_assert_eq!(ds.columns().len(), width + 1);
            for row in ds.rows() {
                prop_assert_eq!(row.len(), width + 1);
                let norm = row[..width].iter().map(|x| x * x).sum::<f64>().sqrt();
                prop_assert!((row[width] - norm).abs() <= 1e-9 * norm.max(1.0));
            }
        }
    }
}
