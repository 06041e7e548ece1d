//! Headline yield statistics over a filtered view.

use crate::data::FilteredView;

/// Count, mean and extrema of `yield_kg_per_hectare`.
///
/// `mean`, `max` and `min` are `None` when the view is empty.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub max: Option<f64>,
    pub min: Option<f64>,
}

impl SummaryStats {
    /// Whether the statistics describe at least one record.
    pub fn is_available(&self) -> bool {
        self.count > 0
    }
}

/// Summarize the yield column of `view`.
pub fn summarize(view: &FilteredView<'_>) -> SummaryStats {
    summarize_values(view.yields())
}

/// Summarize any sequence of yield values.
pub fn summarize_values(values: impl IntoIterator<Item = f64>) -> SummaryStats {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;

    for v in values {
        count += 1;
        sum += v;
        max = max.max(v);
        min = min.min(v);
    }

    if count == 0 {
        return SummaryStats::default();
    }

    SummaryStats {
        count,
        mean: Some(sum / count as f64),
        max: Some(max),
        min: Some(min),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_unavailable() {
        let stats = summarize_values(std::iter::empty());
        assert_eq!(stats.count, 0);
        assert!(!stats.is_available());
        assert_eq!(stats.mean, None);
        assert_eq!(stats.max, None);
        assert_eq!(stats.min, None);
    }

    #[test]
    fn mean_and_extrema() {
        let stats = summarize_values([100.0, 300.0]);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean, Some(200.0));
        assert_eq!(stats.max, Some(300.0));
        assert_eq!(stats.min, Some(100.0));
    }

    #[test]
    fn single_value() {
        let stats = summarize_values([42.5]);
        assert_eq!(stats.mean, Some(42.5));
        assert_eq!(stats.max, stats.min);
    }
}
