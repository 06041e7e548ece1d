use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CropRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single field observation (one row of the source table).
///
/// Field names follow the column headers of the preprocessed smart-farming
/// export, so the struct deserializes straight from CSV or JSON records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecord {
    pub region: String,
    pub crop_type: String,
    pub crop_disease_status: String,
    pub yield_kg_per_hectare: f64,
    #[serde(rename = "NDVI_index")]
    pub ndvi_index: f64,
    pub rainfall_mm: f64,
    pub sowing_month: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Column headers every source must provide.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "region",
    "crop_type",
    "crop_disease_status",
    "yield_kg_per_hectare",
    "NDVI_index",
    "rainfall_mm",
    "sowing_month",
    "latitude",
    "longitude",
];

impl CropRecord {
    /// Check the value ranges a parsed row must satisfy.
    ///
    /// Returns a human-readable reason for the first violated constraint.
    pub fn validate(&self) -> Result<(), String> {
        for facet in Facet::ALL {
            if facet.value_of(self).trim().is_empty() {
                return Err(format!("empty '{}' value", facet.column_name()));
            }
        }
        if self.sowing_month.trim().is_empty() {
            return Err("empty 'sowing_month' value".to_string());
        }

        let numeric = [
            ("yield_kg_per_hectare", self.yield_kg_per_hectare),
            ("NDVI_index", self.ndvi_index),
            ("rainfall_mm", self.rainfall_mm),
            ("latitude", self.latitude),
            ("longitude", self.longitude),
        ];
        for (col, v) in numeric {
            if !v.is_finite() {
                return Err(format!("'{col}' is not a finite number ({v})"));
            }
        }

        if self.yield_kg_per_hectare < 0.0 {
            return Err(format!(
                "negative 'yield_kg_per_hectare' ({})",
                self.yield_kg_per_hectare
            ));
        }
        if self.rainfall_mm < 0.0 {
            return Err(format!("negative 'rainfall_mm' ({})", self.rainfall_mm));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!("'latitude' {} outside -90..90", self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!("'longitude' {} outside -180..180", self.longitude));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Facet – a categorical filter dimension
// ---------------------------------------------------------------------------

/// The categorical columns the dashboard filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Facet {
    Region,
    CropType,
    DiseaseStatus,
}

impl Facet {
    /// All facets in sidebar order.
    pub const ALL: [Facet; 3] = [Facet::Region, Facet::CropType, Facet::DiseaseStatus];

    /// Source column backing this facet.
    pub fn column_name(self) -> &'static str {
        match self {
            Facet::Region => "region",
            Facet::CropType => "crop_type",
            Facet::DiseaseStatus => "crop_disease_status",
        }
    }

    /// Label shown above the facet's filter widget.
    pub fn label(self) -> &'static str {
        match self {
            Facet::Region => "Region",
            Facet::CropType => "Crop Type",
            Facet::DiseaseStatus => "Disease Status",
        }
    }

    /// Read this facet's value from a record.
    pub fn value_of(self, record: &CropRecord) -> &str {
        match self {
            Facet::Region => &record.region,
            Facet::CropType => &record.crop_type,
            Facet::DiseaseStatus => &record.crop_disease_status,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// CropDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed facet option lists.
#[derive(Debug, Clone)]
pub struct CropDataset {
    /// All records, in source row order.
    records: Vec<CropRecord>,
    /// For each facet the sorted set of distinct values over the full table.
    facet_options: BTreeMap<Facet, BTreeSet<String>>,
}

impl CropDataset {
    /// Build facet indices from the loaded records.
    pub fn from_records(records: Vec<CropRecord>) -> Self {
        let mut facet_options: BTreeMap<Facet, BTreeSet<String>> =
            Facet::ALL.iter().map(|&f| (f, BTreeSet::new())).collect();

        for rec in &records {
            for facet in Facet::ALL {
                facet_options
                    .entry(facet)
                    .or_default()
                    .insert(facet.value_of(rec).to_string());
            }
        }

        CropDataset {
            records,
            facet_options,
        }
    }

    pub fn records(&self) -> &[CropRecord] {
        &self.records
    }

    /// Sorted distinct values of `facet` across the whole dataset.
    pub fn facet_options(&self, facet: Facet) -> &BTreeSet<String> {
        // Every facet is seeded in `from_records`.
        &self.facet_options[&facet]
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::record;

    #[test]
    fn facet_options_are_sorted_and_distinct() {
        let ds = CropDataset::from_records(vec![
            record("South", "Wheat", "None", 1.0),
            record("North", "Rice", "Mild", 2.0),
            record("South", "Wheat", "None", 3.0),
        ]);
        let regions: Vec<&str> = ds.facet_options(Facet::Region).iter().map(String::as_str).collect();
        assert_eq!(regions, vec!["North", "South"]);
        assert_eq!(ds.facet_options(Facet::CropType).len(), 2);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn empty_dataset_has_empty_facets() {
        let ds = CropDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        for facet in Facet::ALL {
            assert!(ds.facet_options(facet).is_empty());
        }
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let mut rec = record("North", "Rice", "None", 10.0);
        assert!(rec.validate().is_ok());

        rec.latitude = 95.0;
        assert!(rec.validate().unwrap_err().contains("latitude"));

        rec.latitude = 0.0;
        rec.yield_kg_per_hectare = -1.0;
        assert!(rec.validate().unwrap_err().contains("yield"));

        rec.yield_kg_per_hectare = f64::NAN;
        assert!(rec.validate().unwrap_err().contains("finite"));
    }

    #[test]
    fn validate_rejects_blank_categoricals() {
        let rec = record("  ", "Rice", "None", 10.0);
        assert!(rec.validate().unwrap_err().contains("region"));
    }
}
