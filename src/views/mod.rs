//! Chart projections of a filtered view.
//!
//! Every projection is a pure function of the view; none depends on another
//! or on a previous selection.
//!
//! ```text
//!   FilteredView ──┬── histogram  → yield distribution
//!                  ├── scatter    → NDVI vs yield
//!                  ├── scatter    → rainfall vs yield ── lowess trend
//!                  ├── boxplot    → yield per sowing month
//!                  └── geo        → lat/lon coloured by yield
//! ```

pub mod boxplot;
pub mod geo;
pub mod histogram;
pub mod lowess;
pub mod scatter;

use crate::data::FilteredView;

pub use boxplot::BoxSummary;
pub use geo::{GeoPoint, GeoProjection};
pub use histogram::{Histogram, HistogramBin};
pub use lowess::LowessParams;
pub use scatter::{GroupedScatter, ScatterGroup, TrendLine, TrendScatter};

/// Tunables for the projections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    pub histogram_bins: usize,
    pub scatter_opacity: f32,
    pub lowess: LowessParams,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            histogram_bins: 30,
            scatter_opacity: 0.7,
            lowess: LowessParams::default(),
        }
    }
}

/// The five chart projections of one view.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    pub distribution: Histogram,
    pub vegetation: GroupedScatter,
    pub rainfall: TrendScatter,
    pub temporal: Vec<BoxSummary>,
    pub geo: GeoProjection,
}

/// Build every projection from `view`.
pub fn build_views(view: &FilteredView<'_>, options: &ViewOptions) -> ChartSet {
    let yields = view.yields();

    ChartSet {
        distribution: histogram::histogram(&yields, options.histogram_bins),
        vegetation: scatter::vegetation_yield(view, options.scatter_opacity),
        rainfall: scatter::rainfall_yield(view, options.lowess),
        temporal: boxplot::box_summaries(
            view.records()
                .map(|r| (r.sowing_month.as_str(), r.yield_kg_per_hectare)),
        ),
        geo: geo::geo_projection(view),
    }
}
