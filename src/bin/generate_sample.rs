use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Per-class feature means and spreads (four features each).
const CLASSES: [([f64; 4], [f64; 4]); 3] = [
    ([5.0, 3.4, 1.5, 0.25], [0.35, 0.38, 0.17, 0.1]),
    ([5.9, 2.8, 4.3, 1.3], [0.5, 0.31, 0.47, 0.2]),
    ([6.6, 3.0, 5.5, 2.0], [0.64, 0.32, 0.55, 0.27]),
];
const ROWS_PER_CLASS: usize = 50;

/// Feature columns and per-row labels, `ROWS_PER_CLASS` rows per class.
fn generate(seed: u64) -> (Vec<Vec<f64>>, Vec<i64>) {
    let mut rng = SimpleRng::new(seed);

    let mut features: Vec<Vec<f64>> = vec![Vec::new(); 4];
    let mut labels: Vec<i64> = Vec::new();

    for (label, (means, spreads)) in CLASSES.iter().enumerate() {
        for _ in 0..ROWS_PER_CLASS {
            for (j, column) in features.iter_mut().enumerate() {
                let v = rng.gauss(means[j], spreads[j]).max(0.0);
                column.push((v * 100.0).round() / 100.0);
            }
            labels.push(label as i64);
        }
    }

    (features, labels)
}

fn main() -> Result<()> {
    let (features, labels) = generate(42);

    // ---- CSV: headerless, trailing label ----
    let csv_path = "sample.csv";
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(csv_path)
        .context("creating sample.csv")?;
    for (row, label) in labels.iter().enumerate() {
        let mut record: Vec<String> = features.iter().map(|c| c[row].to_string()).collect();
        record.push(label.to_string());
        writer.write_record(&record).context("writing CSV row")?;
    }
    writer.flush().context("flushing sample.csv")?;

    // ---- Parquet: f0..f3 + label ----
    let mut fields: Vec<Field> = (0..features.len())
        .map(|j| Field::new(format!("f{j}"), DataType::Float64, false))
        .collect();
    fields.push(Field::new("label", DataType::Int64, false));
    let schema = Arc::new(Schema::new(fields));

    let mut arrays: Vec<ArrayRef> = features
        .iter()
        .map(|c| Arc::new(Float64Array::from(c.clone())) as ArrayRef)
        .collect();
    arrays.push(Arc::new(Int64Array::from(labels.clone())));

    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    let parquet_path = "sample.parquet";
    let file = std::fs::File::create(parquet_path).context("creating sample.parquet")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;

    println!(
        "Wrote {} rows ({} features + label) to {csv_path} and {parquet_path}",
        labels.len(),
        features.len()
    );
    Ok(())
}
