//! Equal-width binning of the yield column.

/// One histogram bar: half-open range `[start, end)` and its record count.
///
/// The last bin of a histogram also holds values equal to its `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Distribution of a numeric column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Total number of values across all bins.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

/// Bin `values` into `bin_count` equal-width bins spanning their min..max.
///
/// Empty input (or zero bins) gives an empty histogram.  When every value is
/// equal the range is degenerate and a single unit-width bin centred on the
/// value holds all of them.
pub fn histogram(values: &[f64], bin_count: usize) -> Histogram {
    if values.is_empty() || bin_count == 0 {
        return Histogram::default();
    }

    let min = values.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let max = values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let range = max - min;

    if range <= 0.0 {
        return Histogram {
            bins: vec![HistogramBin {
                start: min - 0.5,
                end: min + 0.5,
                count: values.len(),
            }],
        };
    }

    let width = range / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for &v in values {
        let idx = ((v - min) / width).floor() as usize;
        // max lands exactly on the upper edge
        counts[idx.min(bin_count - 1)] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + i as f64 * width,
            end: if i + 1 == bin_count {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count,
        })
        .collect();

    Histogram { bins }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_min_to_max_with_fixed_bin_count() {
        let values: Vec<f64> = (0..=100).map(|v| v as f64).collect();
        let hist = histogram(&values, 30);
        assert_eq!(hist.bins.len(), 30);
        assert_eq!(hist.bins[0].start, 0.0);
        assert_eq!(hist.bins[29].end, 100.0);
        assert_eq!(hist.total(), 101);
    }

    #[test]
    fn max_lands_in_last_bin() {
        let hist = histogram(&[0.0, 10.0], 5);
        assert_eq!(hist.bins[0].count, 1);
        assert_eq!(hist.bins[4].count, 1);
        assert_eq!(hist.total(), 2);
    }

    #[test]
    fn single_value_is_one_degenerate_bin() {
        let hist = histogram(&[250.0], 30);
        assert_eq!(hist.bins.len(), 1);
        assert_eq!(hist.bins[0].count, 1);
        assert_eq!(hist.bins[0].center(), 250.0);
        assert!(hist.bins[0].width() > 0.0);
    }

    #[test]
    fn repeated_value_is_one_degenerate_bin() {
        let hist = histogram(&[7.0, 7.0, 7.0], 30);
        assert_eq!(hist.bins.len(), 1);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn empty_input_has_no_bins() {
        assert!(histogram(&[], 30).is_empty());
        assert!(histogram(&[1.0, 2.0], 0).is_empty());
    }
}
