//! Bivariate yield relationships grouped by crop type.

use std::collections::BTreeMap;

use super::lowess::{lowess, LowessParams};
use crate::data::{CropRecord, FilteredView};

/// Points of one crop type.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterGroup {
    pub crop_type: String,
    pub points: Vec<[f64; 2]>,
}

/// A scatter plot with one series per crop type.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedScatter {
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Series, ordered by crop type.
    pub groups: Vec<ScatterGroup>,
    /// Marker opacity in `[0, 1]`.
    pub opacity: f32,
}

impl GroupedScatter {
    pub fn point_count(&self) -> usize {
        self.groups.iter().map(|g| g.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Smoothed trend of one crop type.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendLine {
    pub crop_type: String,
    pub points: Vec<[f64; 2]>,
}

/// A grouped scatter plus a LOWESS trend per group.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendScatter {
    pub scatter: GroupedScatter,
    pub trends: Vec<TrendLine>,
}

/// Group `(x(record), yield)` pairs by crop type.
pub fn grouped_scatter(
    view: &FilteredView<'_>,
    x_label: &'static str,
    x: impl Fn(&CropRecord) -> f64,
    opacity: f32,
) -> GroupedScatter {
    let mut groups: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for rec in view.records() {
        groups
            .entry(rec.crop_type.as_str())
            .or_default()
            .push([x(rec), rec.yield_kg_per_hectare]);
    }

    GroupedScatter {
        x_label,
        y_label: "yield_kg_per_hectare",
        groups: groups
            .into_iter()
            .map(|(crop, points)| ScatterGroup {
                crop_type: crop.to_string(),
                points,
            })
            .collect(),
        opacity: opacity.clamp(0.0, 1.0),
    }
}

/// NDVI against yield, semi-transparent to show overlap.
pub fn vegetation_yield(view: &FilteredView<'_>, opacity: f32) -> GroupedScatter {
    grouped_scatter(view, "NDVI_index", |r| r.ndvi_index, opacity)
}

/// Rainfall against yield with a LOWESS trend per crop type.
pub fn rainfall_yield(view: &FilteredView<'_>, params: LowessParams) -> TrendScatter {
    let scatter = grouped_scatter(view, "rainfall_mm", |r| r.rainfall_mm, 1.0);
    let trends = scatter
        .groups
        .iter()
        .filter_map(|g| {
            let points = lowess(&g.points, params);
            if points.is_empty() {
                log::debug!("No trend for '{}' ({} points)", g.crop_type, g.points.len());
                return None;
            }
            Some(TrendLine {
                crop_type: g.crop_type.clone(),
                points,
            })
        })
        .collect();

    TrendScatter { scatter, trends }
}
