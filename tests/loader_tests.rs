use std::io::Write;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

use crop_yield_dashboard::data::loader::load_file;
use crop_yield_dashboard::data::{Facet, LoadError};

const HEADER: &str = "region,crop_type,crop_disease_status,yield_kg_per_hectare,NDVI_index,rainfall_mm,sowing_month,latitude,longitude";

fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut f = std::fs::File::create(&path).expect("create fixture");
    f.write_all(contents.as_bytes()).expect("write fixture");
    path
}

#[test]
fn loads_csv_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "farms.csv",
        &format!(
            "{HEADER}\nNorth,Wheat,None,3100.5,0.71,180,March,28.6,77.2\nSouth,Rice,Mild,4200,0.66,260,June,12.9,77.6\n"
        ),
    );

    let ds = load_file(&path).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.records()[0].yield_kg_per_hectare, 3100.5);
    assert_eq!(ds.facet_options(Facet::DiseaseStatus).len(), 2);
}

#[test]
fn loads_tsv_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "farms.tsv",
        &format!(
            "{}\nEast\tMaize\tSevere\t1500\t0.3\t90\tApril\t-1.3\t36.8\n",
            HEADER.replace(',', "\t")
        ),
    );
    let ds = load_file(&path).unwrap();
    assert_eq!(ds.records()[0].crop_disease_status, "Severe");
}

#[test]
fn loads_json_records() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "farms.json",
        r#"[
            {"region":"North","crop_type":"Wheat","crop_disease_status":"None",
             "yield_kg_per_hectare":3100.5,"NDVI_index":0.71,"rainfall_mm":180,
             "sowing_month":"March","latitude":28.6,"longitude":77.2}
        ]"#,
    );
    let ds = load_file(&path).unwrap();
    assert_eq!(ds.len(), 1);
    assert_eq!(ds.records()[0].ndvi_index, 0.71);
}

#[test]
fn loads_parquet_with_integer_columns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("farms.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("region", DataType::Utf8, false),
        Field::new("crop_type", DataType::Utf8, false),
        Field::new("crop_disease_status", DataType::Utf8, false),
        Field::new("yield_kg_per_hectare", DataType::Float64, false),
        Field::new("NDVI_index", DataType::Float64, false),
        Field::new("rainfall_mm", DataType::Int64, false),
        Field::new("sowing_month", DataType::Int64, false),
        Field::new("latitude", DataType::Float64, false),
        Field::new("longitude", DataType::Float64, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec!["North", "South"])),
        Arc::new(StringArray::from(vec!["Wheat", "Rice"])),
        Arc::new(StringArray::from(vec!["None", "Mild"])),
        Arc::new(Float64Array::from(vec![3100.0, 4200.0])),
        Arc::new(Float64Array::from(vec![0.7, 0.6])),
        Arc::new(Int64Array::from(vec![180, 260])),
        Arc::new(Int64Array::from(vec![3, 6])),
        Arc::new(Float64Array::from(vec![28.6, 12.9])),
        Arc::new(Float64Array::from(vec![77.2, 77.6])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let ds = load_file(&path).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.records()[1].rainfall_mm, 260.0);
    assert_eq!(ds.records()[1].sowing_month, "6");
}

#[test]
fn parquet_missing_column_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.parquet");

    let schema = Arc::new(Schema::new(vec![Field::new("region", DataType::Utf8, false)]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(StringArray::from(vec!["North"])) as ArrayRef],
    )
    .unwrap();
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    match load_file(&path) {
        Err(LoadError::MissingColumns(cols)) => assert_eq!(cols.len(), 8),
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn malformed_row_rejects_whole_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "bad.csv",
        &format!(
            "{HEADER}\nNorth,Wheat,None,3100,0.7,180,March,28.6,77.2\nSouth,Rice,Mild,-5,0.6,260,June,12.9,77.6\n"
        ),
    );
    match load_file(&path) {
        Err(LoadError::MalformedRow { row, reason }) => {
            assert_eq!(row, 2);
            assert!(reason.contains("yield"));
        }
        other => panic!("expected MalformedRow, got {other:?}"),
    }
}

#[test]
fn unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "farms.xlsx", "not really");
    assert!(matches!(load_file(&path), Err(LoadError::UnsupportedFormat(ext)) if ext == "xlsx"));
}
