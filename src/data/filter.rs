use std::collections::{BTreeMap, BTreeSet};

use super::model::{CropDataset, CropRecord, Facet};

// ---------------------------------------------------------------------------
// Filter predicate: which facet values are selected
// ---------------------------------------------------------------------------

/// Per-facet selection state: facet → set of selected values.
///
/// Unlike an "absent means everything" filter, an empty set really is empty:
/// deselecting every value of any facet hides every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    selected: BTreeMap<Facet, BTreeSet<String>>,
}

impl FilterSelection {
    /// A selection with every value of every facet selected (show everything).
    pub fn all(dataset: &CropDataset) -> Self {
        let selected = Facet::ALL
            .iter()
            .map(|&f| (f, dataset.facet_options(f).clone()))
            .collect();
        FilterSelection { selected }
    }

    /// Build a selection from explicit per-facet value lists.
    ///
    /// Facets not listed are left empty.
    pub fn from_values<I, S>(values: impl IntoIterator<Item = (Facet, I)>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = FilterSelection::default();
        for (facet, vals) in values {
            selection
                .selected
                .insert(facet, vals.into_iter().map(Into::into).collect());
        }
        selection
    }

    /// Selected values of one facet.
    pub fn selected(&self, facet: Facet) -> Option<&BTreeSet<String>> {
        self.selected.get(&facet)
    }

    /// Whether `value` is selected for `facet`.
    pub fn contains(&self, facet: Facet, value: &str) -> bool {
        self.selected
            .get(&facet)
            .is_some_and(|vals| vals.contains(value))
    }

    /// Replace the selected set for one facet.
    pub fn set(&mut self, facet: Facet, values: BTreeSet<String>) {
        self.selected.insert(facet, values);
    }

    /// Toggle a single value in a facet's selection.
    pub fn toggle(&mut self, facet: Facet, value: &str) {
        let selected = self.selected.entry(facet).or_default();
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
    }

    /// Select every value the dataset offers for `facet`.
    pub fn select_all(&mut self, facet: Facet, dataset: &CropDataset) {
        self.selected
            .insert(facet, dataset.facet_options(facet).clone());
    }

    /// Deselect every value of `facet`.
    pub fn select_none(&mut self, facet: Facet) {
        self.selected.insert(facet, BTreeSet::new());
    }

    /// Whether a record passes all three facets.
    ///
    /// AND across facets, OR within a facet's selected set.
    pub fn matches(&self, record: &CropRecord) -> bool {
        Facet::ALL
            .iter()
            .all(|&f| self.contains(f, f.value_of(record)))
    }
}

// ---------------------------------------------------------------------------
// FilteredView – the subset of records passing the selection
// ---------------------------------------------------------------------------

/// Records of a dataset passing a selection, in dataset order.
///
/// Borrows the dataset; building a view never touches the source records.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a CropDataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Number of records in the view.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Dataset row indices of the records in the view.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The dataset this view was cut from.
    pub fn dataset(&self) -> &'a CropDataset {
        self.dataset
    }

    /// Iterate the records of the view in dataset order.
    pub fn records(&self) -> impl Iterator<Item = &'a CropRecord> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    /// Yield values of the view, in dataset order.
    pub fn yields(&self) -> Vec<f64> {
        self.records().map(|r| r.yield_kg_per_hectare).collect()
    }
}

/// Cut the view of records that pass the selection.
///
/// A record passes when its region, crop type and disease status are each
/// in the corresponding selected set.  An empty set for any facet yields
/// no records.
pub fn filter<'a>(dataset: &'a CropDataset, selection: &FilterSelection) -> FilteredView<'a> {
    let indices = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect();
    FilteredView { dataset, indices }
}
