//! Field locations coloured by yield.

use crate::data::FilteredView;

/// One field location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub yield_kg_per_hectare: f64,
    /// Position of the yield on the colour scale, in `[0, 1]`.
    pub scale: f64,
}

/// Points on a map plus the yield range the colour scale spans.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeoProjection {
    pub points: Vec<GeoPoint>,
    /// `(min, max)` yield of the view, `None` when empty.
    pub yield_range: Option<(f64, f64)>,
}

/// Project the view onto (latitude, longitude) with a continuous yield scale.
///
/// A degenerate yield range puts every point mid-scale.
pub fn geo_projection(view: &FilteredView<'_>) -> GeoProjection {
    let mut range: Option<(f64, f64)> = None;
    for y in view.yields() {
        range = Some(match range {
            None => (y, y),
            Some((lo, hi)) => (lo.min(y), hi.max(y)),
        });
    }

    let Some((lo, hi)) = range else {
        return GeoProjection::default();
    };
    let span = hi - lo;

    let points = view
        .records()
        .map(|r| GeoPoint {
            latitude: r.latitude,
            longitude: r.longitude,
            yield_kg_per_hectare: r.yield_kg_per_hectare,
            scale: if span > 0.0 {
                ((r.yield_kg_per_hectare - lo) / span).clamp(0.0, 1.0)
            } else {
                0.5
            },
        })
        .collect();

    GeoProjection {
        points,
        yield_range: Some((lo, hi)),
    }
}
