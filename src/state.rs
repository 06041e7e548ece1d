use crate::color::ColorMap;
use crate::data::{CropDataset, Facet, FilterSelection, LoadError};
use crate::pipeline::{refresh, DashboardFrame};
use crate::views::ViewOptions;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None if the startup load failed).
    pub dataset: Option<&'static CropDataset>,

    /// Per-facet filter selections.
    pub selection: FilterSelection,

    /// KPIs and charts for the current selection.
    pub frame: Option<DashboardFrame>,

    /// Colour per crop type, fixed for the process lifetime.
    pub crop_colors: Option<ColorMap>,

    pub view_options: ViewOptions,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(view_options: ViewOptions) -> Self {
        Self {
            dataset: None,
            selection: FilterSelection::default(),
            frame: None,
            crop_colors: None,
            view_options,
            status_message: None,
        }
    }

    /// Ingest the loaded dataset, select everything and build the first frame.
    pub fn set_dataset(&mut self, dataset: &'static CropDataset) {
        self.selection = FilterSelection::all(dataset);
        self.crop_colors = Some(ColorMap::new(dataset.facet_options(Facet::CropType)));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Record a failed startup load.  No dataset is served afterwards.
    pub fn set_load_error(&mut self, err: &LoadError) {
        self.dataset = None;
        self.frame = None;
        self.status_message = Some(format!("Error: {err}"));
    }

    /// Recompute the frame after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = self.dataset {
            self.frame = Some(refresh(ds, &self.selection, &self.view_options));
        }
    }

    /// Toggle a single value in a facet's filter.
    pub fn toggle_filter_value(&mut self, facet: Facet, value: &str) {
        self.selection.toggle(facet, value);
        self.refilter();
    }

    /// Select all values of a facet.
    pub fn select_all(&mut self, facet: Facet) {
        if let Some(ds) = self.dataset {
            self.selection.select_all(facet, ds);
            self.refilter();
        }
    }

    /// Deselect all values of a facet.
    pub fn select_none(&mut self, facet: Facet) {
        self.selection.select_none(facet);
        self.refilter();
    }

    /// Records passing the current selection.
    pub fn visible_count(&self) -> usize {
        self.frame.as_ref().map_or(0, |f| f.matching.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::record;

    fn leaked() -> &'static CropDataset {
        Box::leak(Box::new(CropDataset::from_records(vec![
            record("North", "Wheat", "None", 100.0),
            record("South", "Rice", "Mild", 200.0),
            record("North", "Rice", "None", 300.0),
        ])))
    }

    #[test]
    fn dataset_starts_fully_selected() {
        let mut state = AppState::new(ViewOptions::default());
        state.set_dataset(leaked());
        assert_eq!(state.visible_count(), 3);
        assert_eq!(state.frame.as_ref().unwrap().summary.count, 3);
    }

    #[test]
    fn toggling_refreshes_the_frame() {
        let mut state = AppState::new(ViewOptions::default());
        state.set_dataset(leaked());

        state.toggle_filter_value(Facet::Region, "South");
        let frame = state.frame.as_ref().unwrap();
        assert_eq!(frame.matching, vec![0, 2]);
        assert_eq!(frame.summary.mean, Some(200.0));

        state.select_none(Facet::CropType);
        assert_eq!(state.visible_count(), 0);
        assert_eq!(state.frame.as_ref().unwrap().summary.mean, None);

        state.select_all(Facet::CropType);
        assert_eq!(state.visible_count(), 2);
    }

    #[test]
    fn load_error_serves_nothing() {
        let mut state = AppState::new(ViewOptions::default());
        state.set_load_error(&LoadError::MissingColumns(vec!["region".into()]));
        assert!(state.dataset.is_none());
        assert_eq!(state.visible_count(), 0);
        assert!(state.status_message.as_deref().unwrap().contains("region"));
    }
}
