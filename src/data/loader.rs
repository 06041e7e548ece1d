use std::fs::File;
use std::io::Read;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{CropDataset, CropRecord, REQUIRED_COLUMNS};

/// Columns read as text even when the source stores them as numbers.
const CATEGORICAL_COLUMNS: [&str; 4] =
    ["region", "crop_type", "crop_disease_status", "sowing_month"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the crop dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – comma-delimited text with a header row
/// * `.tsv`          – tab-delimited text with a header row
/// * `.json`         – `[{ "region": ..., "yield_kg_per_hectare": ..., ... }, ...]`
/// * `.parquet`      – Parquet file with the nine source columns
///
/// A single malformed row rejects the whole file.
pub fn load_file(path: &Path) -> Result<CropDataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" | "txt" => load_csv(path, b',')?,
        "tsv" => load_csv(path, b'\t')?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} records from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path, delimiter: u8) -> Result<CropDataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_csv_reader(file, delimiter)
}

/// Load delimited text from any reader.  The first row must be a header.
///
/// Columns may appear in any order; columns outside the schema are ignored.
pub fn load_csv_reader<R: Read>(reader: R, delimiter: u8) -> Result<CropDataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    check_columns(&headers)?;

    let mut records = Vec::new();
    for (i, result) in reader.deserialize::<CropRecord>().enumerate() {
        let row = i + 1;
        let record = match result {
            Ok(r) => r,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                return Err(LoadError::MalformedRow {
                    row,
                    reason: e.to_string(),
                })
            }
        };
        push_validated(&mut records, record, row)?;
    }

    Ok(CropDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "region": "North India",
///     "crop_type": "Wheat",
///     "crop_disease_status": "None",
///     "yield_kg_per_hectare": 4128.5,
///     "NDVI_index": 0.71,
///     "rainfall_mm": 212.0,
///     "sowing_month": "March",
///     "latitude": 28.6,
///     "longitude": 77.2
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<CropDataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_json_str(&text)
}

pub(crate) fn load_json_str(text: &str) -> Result<CropDataset, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;

    let rows = root.as_array().ok_or_else(|| LoadError::MalformedRow {
        row: 0,
        reason: "expected top-level JSON array".to_string(),
    })?;

    if let Some(first) = rows.first().and_then(|r| r.as_object()) {
        let keys: Vec<String> = first.keys().cloned().collect();
        check_columns(&keys)?;
    }

    let mut records = Vec::with_capacity(rows.len());
    for (i, rec) in rows.iter().enumerate() {
        let row = i + 1;
        let mut obj = rec
            .as_object()
            .cloned()
            .ok_or_else(|| LoadError::MalformedRow {
                row,
                reason: "not a JSON object".to_string(),
            })?;

        // Month numbers and numeric region codes are still categories.
        for col in CATEGORICAL_COLUMNS {
            if let Some(v) = obj.get_mut(col) {
                if v.is_number() || v.is_boolean() {
                    *v = JsonValue::String(v.to_string());
                }
            }
        }

        let record: CropRecord = serde_json::from_value(JsonValue::Object(obj))
            .map_err(|e| LoadError::MalformedRow {
                row,
                reason: e.to_string(),
            })?;
        push_validated(&mut records, record, row)?;
    }

    Ok(CropDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the nine source columns.
///
/// Numeric columns may use any Arrow numeric type; categorical columns any
/// type castable to UTF-8.  Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<CropDataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    check_columns(&names)?;

    let reader = builder.build()?;

    let mut records = Vec::new();
    let mut row_offset = 0;
    for batch_result in reader {
        let batch = batch_result?;
        read_batch(&batch, row_offset, &mut records)?;
        row_offset += batch.num_rows();
    }

    Ok(CropDataset::from_records(records))
}

fn read_batch(
    batch: &RecordBatch,
    row_offset: usize,
    records: &mut Vec<CropRecord>,
) -> Result<(), LoadError> {
    let region = column_as(batch, "region", &DataType::Utf8)?;
    let crop = column_as(batch, "crop_type", &DataType::Utf8)?;
    let disease = column_as(batch, "crop_disease_status", &DataType::Utf8)?;
    let month = column_as(batch, "sowing_month", &DataType::Utf8)?;
    let yield_kg = column_as(batch, "yield_kg_per_hectare", &DataType::Float64)?;
    let ndvi = column_as(batch, "NDVI_index", &DataType::Float64)?;
    let rainfall = column_as(batch, "rainfall_mm", &DataType::Float64)?;
    let lat = column_as(batch, "latitude", &DataType::Float64)?;
    let lon = column_as(batch, "longitude", &DataType::Float64)?;

    let strings = [
        ("region", region.as_string::<i32>()),
        ("crop_type", crop.as_string::<i32>()),
        ("crop_disease_status", disease.as_string::<i32>()),
        ("sowing_month", month.as_string::<i32>()),
    ];
    let floats = [
        ("yield_kg_per_hectare", yield_kg.as_primitive::<Float64Type>()),
        ("NDVI_index", ndvi.as_primitive::<Float64Type>()),
        ("rainfall_mm", rainfall.as_primitive::<Float64Type>()),
        ("latitude", lat.as_primitive::<Float64Type>()),
        ("longitude", lon.as_primitive::<Float64Type>()),
    ];

    for i in 0..batch.num_rows() {
        let row = row_offset + i + 1;

        for (name, arr) in strings.iter() {
            if arr.is_null(i) {
                return Err(null_value(row, name));
            }
        }
        for (name, arr) in floats.iter() {
            if arr.is_null(i) {
                return Err(null_value(row, name));
            }
        }

        let record = CropRecord {
            region: strings[0].1.value(i).to_string(),
            crop_type: strings[1].1.value(i).to_string(),
            crop_disease_status: strings[2].1.value(i).to_string(),
            sowing_month: strings[3].1.value(i).to_string(),
            yield_kg_per_hectare: floats[0].1.value(i),
            ndvi_index: floats[1].1.value(i),
            rainfall_mm: floats[2].1.value(i),
            latitude: floats[3].1.value(i),
            longitude: floats[4].1.value(i),
        };
        push_validated(records, record, row)?;
    }
    Ok(())
}

fn column_as(
    batch: &RecordBatch,
    name: &str,
    to: &DataType,
) -> Result<ArrayRef, LoadError> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| LoadError::MissingColumns(vec![name.to_string()]))?;
    Ok(cast(col.as_ref(), to)?)
}

fn null_value(row: usize, column: &str) -> LoadError {
    LoadError::MalformedRow {
        row,
        reason: format!("null '{column}' value"),
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Fail with every required column absent from `present`; warn on extras.
fn check_columns(present: &[String]) -> Result<(), LoadError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !present.iter().any(|p| p == *c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    let extra: Vec<&str> = present
        .iter()
        .map(String::as_str)
        .filter(|p| !REQUIRED_COLUMNS.contains(p))
        .collect();
    if !extra.is_empty() {
        log::warn!("Ignoring extra columns: {extra:?}");
    }
    Ok(())
}

fn push_validated(
    records: &mut Vec<CropRecord>,
    record: CropRecord,
    row: usize,
) -> Result<(), LoadError> {
    record
        .validate()
        .map_err(|reason| LoadError::MalformedRow { row, reason })?;
    records.push(record);
    Ok(())
}
