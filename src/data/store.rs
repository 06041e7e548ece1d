use std::path::Path;
use std::sync::OnceLock;

use super::error::LoadError;
use super::loader::load_file;
use super::model::CropDataset;

/// Process-wide dataset, read from disk at most once.
static DATASET: OnceLock<CropDataset> = OnceLock::new();

/// Load the dataset at `path` into the process-wide store.
///
/// The first successful call reads the file; later calls return the stored
/// dataset without touching disk, whatever path they pass.  A failed load
/// leaves the store empty.
pub fn init(path: &Path) -> Result<&'static CropDataset, LoadError> {
    if let Some(ds) = DATASET.get() {
        log::debug!("Dataset already loaded, ignoring {}", path.display());
        return Ok(ds);
    }
    let dataset = load_file(path)?;
    Ok(DATASET.get_or_init(|| dataset))
}

/// The loaded dataset, if [`init`] has succeeded.
pub fn dataset() -> Option<&'static CropDataset> {
    DATASET.get()
}
