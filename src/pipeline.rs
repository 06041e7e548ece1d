//! The request/response cycle behind every filter change.

use crate::data::{filter, CropDataset, FilterSelection};
use crate::stats::{summarize, SummaryStats};
use crate::views::{build_views, ChartSet, ViewOptions};

/// Everything the dashboard shows for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardFrame {
    /// Dataset rows passing the selection.
    pub matching: Vec<usize>,
    pub summary: SummaryStats,
    pub charts: ChartSet,
}

/// Filter, summarize and build the charts for `selection`.
///
/// Pure: the same dataset and selection always give the same frame.
pub fn refresh(
    dataset: &CropDataset,
    selection: &FilterSelection,
    options: &ViewOptions,
) -> DashboardFrame {
    let view = filter(dataset, selection);
    let summary = summarize(&view);
    let charts = build_views(&view, options);

    log::debug!(
        "Refreshed dashboard: {}/{} records match",
        view.len(),
        dataset.len()
    );

    DashboardFrame {
        matching: view.indices().to_vec(),
        summary,
        charts,
    }
}
