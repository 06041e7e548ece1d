//! Runtime settings, from defaults overridden by environment variables.

use std::env;
use std::path::PathBuf;

use crate::views::ViewOptions;

/// File read when `CROP_DASHBOARD_DATA` is unset.
pub const DEFAULT_DATA_FILE: &str = "Smart_Farming_Crop_Yield_2024_preprocessed.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Source table, read once at startup.
    pub data_path: PathBuf,
    /// Initial window size in logical points.
    pub window_size: [f32; 2],
    pub views: ViewOptions,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            window_size: [1400.0, 900.0],
            views: ViewOptions::default(),
        }
    }
}

impl DashboardConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| env::var(key).ok());
        config
    }

    /// Apply overrides from `lookup`.  Unparsable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("CROP_DASHBOARD_DATA") {
            if !value.trim().is_empty() {
                self.data_path = PathBuf::from(value);
            }
        }
        if let Some(width) = parse_var::<f32>(&lookup, "CROP_DASHBOARD_WIDTH") {
            if width > 0.0 {
                self.window_size[0] = width;
            }
        }
        if let Some(height) = parse_var::<f32>(&lookup, "CROP_DASHBOARD_HEIGHT") {
            if height > 0.0 {
                self.window_size[1] = height;
            }
        }
        if let Some(bins) = parse_var::<usize>(&lookup, "CROP_DASHBOARD_HIST_BINS") {
            if bins > 0 {
                self.views.histogram_bins = bins;
            } else {
                log::warn!("CROP_DASHBOARD_HIST_BINS must be positive, keeping {}", self.views.histogram_bins);
            }
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("Ignoring invalid {key}={raw:?}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_source_export() {
        let config = DashboardConfig::default();
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(config.views.histogram_bins, 30);
    }

    #[test]
    fn overrides_apply() {
        let mut config = DashboardConfig::default();
        config.apply_overrides(lookup_from(&[
            ("CROP_DASHBOARD_DATA", "/data/yield.parquet"),
            ("CROP_DASHBOARD_HIST_BINS", "12"),
            ("CROP_DASHBOARD_WIDTH", "800"),
        ]));
        assert_eq!(config.data_path, PathBuf::from("/data/yield.parquet"));
        assert_eq!(config.views.histogram_bins, 12);
        assert_eq!(config.window_size, [800.0, 900.0]);
    }

    #[test]
    fn invalid_overrides_are_ignored() {
        let mut config = DashboardConfig::default();
        config.apply_overrides(lookup_from(&[
            ("CROP_DASHBOARD_HIST_BINS", "0"),
            ("CROP_DASHBOARD_HEIGHT", "tall"),
        ]));
        assert_eq!(config, DashboardConfig::default());
    }
}
