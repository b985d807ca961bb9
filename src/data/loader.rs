use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – headerless comma-separated numbers (the catalog format)
/// * `.parquet`      – every numeric column becomes a field
///
/// With `last_is_label` the trailing field of each row is taken as its label.
pub fn load_file(path: &Path, last_is_label: bool) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "parquet" | "pq" => read_parquet(path)?,
        "csv" | "txt" | "data" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            read_csv(file)?
        }
        other => bail!("Unsupported file extension: .{other}"),
    };

    let dataset = Dataset::from_records(records, last_is_label);
    log::info!(
        "Loaded {}: {} rows, {} features{}",
        path.display(),
        dataset.len(),
        dataset.columns().len(),
        if dataset.has_labels() { " + label" } else { "" }
    );
    Ok(dataset)
}

/// Parse CSV text already in memory.
pub fn load_str(text: &str, last_is_label: bool) -> Result<Dataset> {
    let records = read_csv(text.as_bytes())?;
    Ok(Dataset::from_records(records, last_is_label))
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// CSV layout: no header row, one row per line, comma separated.
/// Blank lines (including the trailing one) are skipped. Tokens that are
/// not decimal numbers become NaN.
fn read_csv<R: Read>(source: R) -> Result<Vec<Vec<f64>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        records.push(record.iter().map(parse_number).collect());
    }

    Ok(records)
}

/// Decimal parse with the silent-NaN policy.
fn parse_number(token: &str) -> f64 {
    token.parse::<f64>().unwrap_or(f64::NAN)
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Read every numeric column of a Parquet file, row by row.
///
/// Int32 / Int64 / Float32 / Float64 columns are kept in schema order; nulls
/// become NaN. Other columns are skipped with a warning.
fn read_parquet(path: &Path) -> Result<Vec<Vec<f64>>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let numeric: Vec<usize> = schema
            .fields()
            .iter()
            .enumerate()
            .filter_map(|(i, f)| {
                if is_numeric(f.data_type()) {
                    Some(i)
                } else {
                    log::warn!("skipping non-numeric parquet column '{}'", f.name());
                    None
                }
            })
            .collect();

        for row in 0..batch.num_rows() {
            let record = numeric
                .iter()
                .map(|&i| extract_f64(batch.column(i), row))
                .collect::<Result<Vec<f64>>>()
                .with_context(|| format!("Row {row}: failed to read numeric fields"))?;
            records.push(record);
        }
    }

    Ok(records)
}

fn is_numeric(dt: &DataType) -> bool {
    matches!(
        dt,
        DataType::Int32 | DataType::Int64 | DataType::Float32 | DataType::Float64
    )
}

/// Extract a single numeric cell as `f64`.
fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        return Ok(f64::NAN);
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .context("expected Int32Array")?
            .value(row) as f64,
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row) as f64,
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .context("expected Float32Array")?
            .value(row) as f64,
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .context("expected Float64Array")?
            .value(row),
        other => bail!("column type {other:?} is not numeric"),
    };
    Ok(value)
}
