/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate file → CropDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  store    │  process-wide, loaded once
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply facet selection → FilteredView
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod store;

pub use error::LoadError;
pub use filter::{filter, FilterSelection, FilteredView};
pub use model::{CropDataset, CropRecord, Facet};
