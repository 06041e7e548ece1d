use std::io::Write;

use crop_yield_dashboard::data::store;

// The store is process-wide, so every assertion about it lives in this one test.
#[test]
fn dataset_is_loaded_at_most_once() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("farms.csv");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(
        f,
        "region,crop_type,crop_disease_status,yield_kg_per_hectare,NDVI_index,rainfall_mm,sowing_month,latitude,longitude"
    )
    .unwrap();
    writeln!(f, "North,Wheat,None,3100,0.7,180,March,28.6,77.2").unwrap();
    drop(f);

    assert!(store::dataset().is_none());
    assert!(store::init(&dir.path().join("missing.csv")).is_err());
    assert!(store::dataset().is_none());

    let first = store::init(&path).unwrap();
    assert_eq!(first.len(), 1);

    // The source is gone; a second init must not re-read it.
    std::fs::remove_file(&path).unwrap();
    let second = store::init(&path).unwrap();
    assert!(std::ptr::eq(first, second));
    assert!(std::ptr::eq(store::dataset().unwrap(), first));
}
