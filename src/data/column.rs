// ---------------------------------------------------------------------------
// Column – running statistics for one feature
// ---------------------------------------------------------------------------

/// Running statistics of one feature across all rows of a dataset.
///
/// `count` includes NaN cells while `sum`, `min` and `max` skip them, so an
/// all-NaN column keeps the `+∞` / `-∞` sentinels.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Position of the feature inside each row.
    pub i: usize,
    pub sum: f64,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    /// Sample variance, `None` until the dataset's variance pass has run.
    pub variance: Option<f64>,
}

impl Column {
    pub fn new(i: usize) -> Self {
        Column {
            i,
            sum: 0.0,
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            variance: None,
        }
    }

    /// Accumulate one cell.
    pub fn add(&mut self, x: f64) {
        self.count += 1;

        if !x.is_nan() {
            self.sum += x;
            self.min = self.min.min(x);
            self.max = self.max.max(x);
        }
    }

    /// Mean over `count` (NaN for an empty column).
    pub fn avg(&self) -> f64 {
        self.sum / self.count as f64
    }

    /// Min-max normalisation into `[0, 1]`.
    ///
    /// A constant column (`max == min`) yields NaN or ±Infinity; callers
    /// decide how to display that.
    pub fn scale(&self, x: f64) -> f64 {
        (x - self.min) / (self.max - self.min)
    }

    /// `max - min`.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Variance if computed, NaN otherwise.
    pub fn variance_or_nan(&self) -> f64 {
        self.variance.unwrap_or(f64::NAN)
    }

    /// Whether every accumulated cell was NaN (or nothing was added).
    pub fn is_all_nan(&self) -> bool {
        self.min > self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_skips_nan_but_counts_it() {
        let mut c = Column::new(0);
        c.add(3.0);
        c.add(f64::NAN);
        c.add(-1.0);

        assert_eq!(c.count, 3);
        assert_eq!(c.sum, 2.0);
        assert_eq!(c.min, -1.0);
        assert_eq!(c.max, 3.0);
        assert!((c.avg() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn all_nan_column_keeps_sentinels() {
        let mut c = Column::new(2);
        c.add(f64::NAN);
        c.add(f64::NAN);

        assert_eq!(c.min, f64::INFINITY);
        assert_eq!(c.max, f64::NEG_INFINITY);
        assert!(c.is_all_nan());
        assert_eq!(c.avg(), 0.0);
    }

    #[test]
    fn empty_column_average_is_nan() {
        assert!(Column::new(0).avg().is_nan());
    }

    #[test]
    fn scale_maps_range_onto_unit_interval() {
        let mut c = Column::new(0);
        for x in [2.0, 4.0, 6.0] {
            c.add(x);
        }
        assert_eq!(c.scale(2.0), 0.0);
        assert_eq!(c.scale(4.0), 0.5);
        assert_eq!(c.scale(6.0), 1.0);
    }

    #[test]
    fn scale_of_constant_column_is_not_finite() {
        let mut c = Column::new(0);
        c.add(5.0);
        c.add(5.0);
        assert!(c.scale(5.0).is_nan());
        assert!(c.scale(6.0).is_infinite());
    }
}
