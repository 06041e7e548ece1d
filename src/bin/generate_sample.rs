use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crop_yield_dashboard::config::DEFAULT_DATA_FILE;
use crop_yield_dashboard::data::CropRecord;

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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Region name with the centre of its fields.
const REGIONS: [(&str, f64, f64); 5] = [
    ("North India", 28.6, 77.2),
    ("South India", 12.9, 77.6),
    ("Central USA", 39.8, -98.6),
    ("South USA", 31.0, -92.0),
    ("East Africa", -1.3, 36.8),
];

/// Crop with its baseline yield (kg/ha) and preferred rainfall (mm).
const CROPS: [(&str, f64, f64); 5] = [
    ("Wheat", 3200.0, 180.0),
    ("Rice", 4200.0, 260.0),
    ("Maize", 3800.0, 200.0),
    ("Cotton", 2200.0, 150.0),
    ("Soybean", 2800.0, 170.0),
];

/// Disease status with the share of yield it leaves.
const DISEASES: [(&str, f64); 4] = [
    ("None", 1.0),
    ("Mild", 0.9),
    ("Moderate", 0.75),
    ("Severe", 0.55),
];

const MONTHS: [&str; 8] = [
    "February", "March", "April", "May", "June", "July", "October", "November",
];

fn generate(rng: &mut SimpleRng, n: usize) -> Vec<CropRecord> {
    (0..n)
        .map(|_| {
            let &(region, lat, lon) = rng.pick(&REGIONS);
            let &(crop, base_yield, ideal_rain) = rng.pick(&CROPS);
            let &(disease, health) = rng.pick(&DISEASES);
            let month = *rng.pick(&MONTHS);

            let rainfall = rng.gauss(ideal_rain, 60.0).max(0.0);
            let ndvi = (rng.gauss(0.65, 0.12) * health.sqrt()).clamp(0.05, 0.95);
            let rain_fit = 1.0 - ((rainfall - ideal_rain) / (2.5 * ideal_rain)).powi(2);
            let yield_kg = (base_yield * health * rain_fit.max(0.2) * (0.6 + 0.6 * ndvi)
                + rng.gauss(0.0, 250.0))
            .max(0.0);

            CropRecord {
                region: region.to_string(),
                crop_type: crop.to_string(),
                crop_disease_status: disease.to_string(),
                yield_kg_per_hectare: (yield_kg * 100.0).round() / 100.0,
                ndvi_index: (ndvi * 1000.0).round() / 1000.0,
                rainfall_mm: (rainfall * 10.0).round() / 10.0,
                sowing_month: month.to_string(),
                latitude: (lat + rng.uniform(-3.0, 3.0)).clamp(-90.0, 90.0),
                longitude: (lon + rng.uniform(-4.0, 4.0)).clamp(-180.0, 180.0),
            }
        })
        .collect()
}

fn write_csv(path: &Path, records: &[CropRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for rec in records {
        writer.serialize(rec).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, records: &[CropRecord]) -> Result<()> {
    let strings = |f: fn(&CropRecord) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(records.iter().map(f).collect::<Vec<_>>()))
    };
    let floats = |f: fn(&CropRecord) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(records.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("region", DataType::Utf8, false),
        Field::new("crop_type", DataType::Utf8, false),
        Field::new("crop_disease_status", DataType::Utf8, false),
        Field::new("yield_kg_per_hectare", DataType::Float64, false),
        Field::new("NDVI_index", DataType::Float64, false),
        Field::new("rainfall_mm", DataType::Float64, false),
        Field::new("sowing_month", DataType::Utf8, false),
        Field::new("latitude", DataType::Float64, false),
        Field::new("longitude", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            strings(|r| r.region.as_str()),
            strings(|r| r.crop_type.as_str()),
            strings(|r| r.crop_disease_status.as_str()),
            floats(|r| r.yield_kg_per_hectare),
            floats(|r| r.ndvi_index),
            floats(|r| r.rainfall_mm),
            strings(|r| r.sowing_month.as_str()),
            floats(|r| r.latitude),
            floats(|r| r.longitude),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    let mut rng = SimpleRng::new(42);
    let records = generate(&mut rng, 500);

    let ext = output_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => write_csv(&output_path, &records)?,
        "parquet" | "pq" => write_parquet(&output_path, &records)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    log::info!("Wrote {} records to {}", records.len(), output_path.display());
    println!("Wrote {} records to {}", records.len(), output_path.display());
    Ok(())
}
