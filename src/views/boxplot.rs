//! Five-number summaries of yield per sowing month.

use std::cmp::Ordering;
use std::collections::HashMap;

/// Box-and-whisker summary of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub category: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest value within `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Largest value within `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
    /// Values beyond the fences, ascending.
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Calendar position of a month name or three-letter abbreviation.
pub fn month_index(label: &str) -> Option<usize> {
    let lower = label.trim().to_ascii_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|m| *m == lower || (lower.len() == 3 && m.starts_with(&lower)))
}

/// Order categories by calendar when all are months, numerically when all
/// are numbers, else lexicographically.
pub fn sort_categories(categories: &mut [String]) {
    if categories.iter().all(|c| month_index(c).is_some()) {
        categories.sort_by_key(|c| month_index(c));
    } else if categories.iter().all(|c| c.trim().parse::<f64>().is_ok()) {
        categories.sort_by(|a, b| {
            let a: f64 = a.trim().parse().unwrap_or(f64::NAN);
            let b: f64 = b.trim().parse().unwrap_or(f64::NAN);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        });
    } else {
        categories.sort();
    }
}

/// Summarize `values` grouped by their category label.
pub fn box_summaries<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Vec<BoxSummary> {
    let mut groups: HashMap<String, Vec<f64>> = HashMap::new();
    for (cat, v) in pairs {
        groups.entry(cat.to_string()).or_default().push(v);
    }

    let mut categories: Vec<String> = groups.keys().cloned().collect();
    sort_categories(&mut categories);

    categories
        .into_iter()
        .filter_map(|cat| {
            let values = groups.remove(&cat)?;
            summarize_group(cat, values)
        })
        .collect()
}

fn summarize_group(category: String, mut ys: Vec<f64>) -> Option<BoxSummary> {
    if ys.is_empty() {
        return None;
    }
    ys.sort_by(f64::total_cmp);

    let q1 = percentile(&ys, 0.25);
    let median = percentile(&ys, 0.50);
    let q3 = percentile(&ys, 0.75);
    let iqr = q3 - q1;

    let lower_fence = q1 - 1.5 * iqr;
    let upper_fence = q3 + 1.5 * iqr;

    let lower_whisker = ys.iter().copied().find(|&v| v >= lower_fence).unwrap_or(q1);
    let upper_whisker = ys
        .iter()
        .rev()
        .copied()
        .find(|&v| v <= upper_fence)
        .unwrap_or(q3);

    let outliers = ys
        .iter()
        .copied()
        .filter(|&v| v < lower_fence || v > upper_fence)
        .collect();

    Some(BoxSummary {
        category,
        count: ys.len(),
        min: ys[0],
        q1,
        median,
        q3,
        max: ys[ys.len() - 1],
        lower_whisker,
        upper_whisker,
        outliers,
    })
}

/// Linear interpolation between the closest ranks of sorted data.
pub fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    let n = sorted_data.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return sorted_data[0];
    }

    let rank = p * (n - 1) as f64;
    let lower_idx = rank.floor() as usize;
    let upper_idx = rank.ceil() as usize;

    if lower_idx == upper_idx {
        sorted_data[lower_idx]
    } else {
        let weight = rank - lower_idx as f64;
        sorted_data[lower_idx] * (1.0 - weight) + sorted_data[upper_idx] * weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quartiles_interpolate() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&data, 0.25), 2.0);
        assert_eq!(percentile(&data, 0.5), 3.0);
        assert_eq!(percentile(&[1.0, 2.0], 0.5), 1.5);
    }

    #[test]
    fn outliers_fall_outside_fences() {
        let pairs = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0].map(|v| ("May", v));
        let boxes = box_summaries(pairs);
        assert_eq!(boxes.len(), 1);
        let b = &boxes[0];
        assert_eq!(b.count, 6);
        assert_eq!(b.max, 100.0);
        assert_eq!(b.outliers, vec![100.0]);
        assert_eq!(b.upper_whisker, 5.0);
        assert_eq!(b.lower_whisker, 1.0);
    }

    #[test]
    fn single_value_box_collapses() {
        let boxes = box_summaries([("June", 42.0)]);
        let b = &boxes[0];
        assert_eq!((b.min, b.q1, b.median, b.q3, b.max), (42.0, 42.0, 42.0, 42.0, 42.0));
        assert!(b.outliers.is_empty());
    }

    #[test]
    fn months_sort_by_calendar() {
        let mut cats = vec!["October".to_string(), "feb".to_string(), "March".to_string()];
        sort_categories(&mut cats);
        assert_eq!(cats, vec!["feb", "March", "October"]);
    }

    #[test]
    fn numeric_months_sort_numerically() {
        let mut cats = vec!["10".to_string(), "2".to_string(), "11".to_string()];
        sort_categories(&mut cats);
        assert_eq!(cats, vec!["2", "10", "11"]);
    }

    #[test]
    fn mixed_labels_sort_lexicographically() {
        let mut cats = vec!["Rabi".to_string(), "Kharif".to_string()];
        sort_categories(&mut cats);
        assert_eq!(cats, vec!["Kharif", "Rabi"]);
    }

    #[test]
    fn empty_input_gives_no_boxes() {
        assert!(box_summaries(std::iter::empty()).is_empty());
    }
}
