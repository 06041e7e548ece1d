//! Locally weighted scatterplot smoothing (LOWESS).
//!
//! Each fitted value is a weighted least-squares line through the `frac * n`
//! nearest neighbours of the point, with tricube distance weights.  After the
//! first pass, bisquare weights on the residuals damp the pull of outliers.

/// Smoothing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowessParams {
    /// Share of the points used for each local fit, in `(0, 1]`.
    pub frac: f64,
    /// Robustifying passes after the initial fit.
    pub iterations: usize,
}

impl Default for LowessParams {
    fn default() -> Self {
        Self {
            frac: 2.0 / 3.0,
            iterations: 3,
        }
    }
}

/// Fit a LOWESS curve through the `(x, y)` pairs.
///
/// Returns the fitted points sorted by x.  Fewer than two points, or no
/// spread in x, gives an empty curve.
pub fn lowess(points: &[[f64; 2]], params: LowessParams) -> Vec<[f64; 2]> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a[0].total_cmp(&b[0]));
    let xs: Vec<f64> = sorted.iter().map(|p| p[0]).collect();
    let ys: Vec<f64> = sorted.iter().map(|p| p[1]).collect();

    if xs[n - 1] - xs[0] <= 0.0 {
        return Vec::new();
    }

    let k = ((params.frac * n as f64).ceil() as usize).clamp(2, n);
    let windows = neighbour_windows(&xs, k);

    let mut robust = vec![1.0; n];
    let mut fitted = vec![0.0; n];

    for pass in 0..=params.iterations {
        for i in 0..n {
            fitted[i] = local_fit(&xs, &ys, &robust, i, windows[i], k);
        }
        if pass == params.iterations {
            break;
        }

        let residuals: Vec<f64> = ys.iter().zip(&fitted).map(|(y, f)| y - f).collect();
        let mut abs: Vec<f64> = residuals.iter().map(|r| r.abs()).collect();
        abs.sort_by(f64::total_cmp);
        let scale = median(&abs);
        if scale <= f64::EPSILON {
            // Already an exact fit; further passes change nothing.
            break;
        }
        for (w, r) in robust.iter_mut().zip(&residuals) {
            *w = bisquare(r / (6.0 * scale));
        }
    }

    xs.into_iter().zip(fitted).map(|(x, y)| [x, y]).collect()
}

/// Start index of the `k` nearest neighbours of every point (xs sorted).
fn neighbour_windows(xs: &[f64], k: usize) -> Vec<usize> {
    let n = xs.len();
    let mut lo = 0;
    (0..n)
        .map(|i| {
            while lo + k < n && xs[i] - xs[lo] > xs[lo + k] - xs[i] {
                lo += 1;
            }
            lo
        })
        .collect()
}

fn local_fit(xs: &[f64], ys: &[f64], robust: &[f64], i: usize, lo: usize, k: usize) -> f64 {
    let x0 = xs[i];
    let hi = lo + k - 1;
    let h = (x0 - xs[lo]).max(xs[hi] - x0);

    let mut sw = 0.0;
    let mut sx = 0.0;
    let mut sy = 0.0;
    let weights: Vec<f64> = (lo..=hi)
        .map(|j| {
            let w = if h > 0.0 {
                tricube((xs[j] - x0).abs() / h)
            } else {
                1.0
            } * robust[j];
            sw += w;
            sx += w * xs[j];
            sy += w * ys[j];
            w
        })
        .collect();

    if sw <= 0.0 {
        return ys[i];
    }

    let xm = sx / sw;
    let ym = sy / sw;
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (j, w) in (lo..=hi).zip(&weights) {
        let dx = xs[j] - xm;
        sxx += w * dx * dx;
        sxy += w * dx * (ys[j] - ym);
    }

    if sxx <= f64::EPSILON * (h * h).max(1.0) {
        ym
    } else {
        ym + sxy / sxx * (x0 - xm)
    }
}

fn tricube(u: f64) -> f64 {
    if u >= 1.0 {
        0.0
    } else {
        let t = 1.0 - u * u * u;
        t * t * t
    }
}

fn bisquare(u: f64) -> f64 {
    if u.abs() >= 1.0 {
        0.0
    } else {
        let t = 1.0 - u * u;
        t * t
    }
}

fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproduces_a_straight_line() {
        let pts: Vec<[f64; 2]> = (0..20).map(|i| [i as f64, 2.0 * i as f64 + 1.0]).collect();
        let curve = lowess(&pts, LowessParams::default());
        assert_eq!(curve.len(), 20);
        for [x, y] in curve {
            assert!((y - (2.0 * x + 1.0)).abs() < 1e-9, "x={x} y={y}");
        }
    }

    #[test]
    fn output_is_sorted_by_x() {
        let pts = vec![[3.0, 1.0], [1.0, 2.0], [2.0, 0.5], [0.0, 1.5]];
        let curve = lowess(&pts, LowessParams::default());
        let xs: Vec<f64> = curve.iter().map(|p| p[0]).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn robust_passes_damp_an_outlier() {
        let mut pts: Vec<[f64; 2]> = (0..30).map(|i| [i as f64, 10.0]).collect();
        pts[15][1] = 1000.0;

        let plain = lowess(&pts, LowessParams { frac: 2.0 / 3.0, iterations: 0 });
        let robust = lowess(&pts, LowessParams::default());

        let dev = |curve: &[[f64; 2]]| (curve[15][1] - 10.0).abs();
        assert!(dev(&robust) < dev(&plain));
        assert!(dev(&robust) < 1.0);
    }

    #[test]
    fn too_few_points_gives_no_curve() {
        assert!(lowess(&[], LowessParams::default()).is_empty());
        assert!(lowess(&[[1.0, 2.0]], LowessParams::default()).is_empty());
        assert!(lowess(&[[1.0, 2.0], [1.0, 3.0]], LowessParams::default()).is_empty());
    }

    #[test]
    fn two_points_draw_their_segment() {
        let curve = lowess(&[[0.0, 0.0], [1.0, 2.0]], LowessParams::default());
        assert_eq!(curve.len(), 2);
        assert!((curve[1][1] - 2.0).abs() < 1e-9);
    }
}
