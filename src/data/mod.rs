/// Data layer: statistics, transformations and loading.
///
/// Architecture:
/// ```text
///  .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → raw records (non-numeric → NaN)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  rows + Column accumulators + labels
///   └──────────┘
///        │  scale / sort by variance / sort by correlation / add distance
///        ▼
///   ┌──────────┐
///   │ relation  │  variances, covariances, r², greedy feature order
///   └──────────┘
/// ```

pub mod column;
pub mod distance;
pub mod loader;
pub mod model;
pub mod relation;

pub use column::Column;
pub use model::Dataset;
pub use relation::Relation;
