use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

/// The same colour at `opacity` in `[0, 1]`.
pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

// ---------------------------------------------------------------------------
// Continuous scale: Viridis
// ---------------------------------------------------------------------------

/// Viridis anchors at evenly spaced positions 0, 1/8, ..., 1.
const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

/// Colour at position `t` in `[0, 1]` on the Viridis scale.
///
/// Interpolates between anchors in linear RGB.  Out-of-range and NaN
/// positions clamp to the ends.
pub fn viridis(t: f64) -> Color32 {
    let t = (if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }) as f32;
    let segments = (VIRIDIS.len() - 1) as f32;
    let pos = t * segments;
    let idx = (pos.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = pos - idx as f32;

    let anchor = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
        Srgb::new(r, g, b).into_format::<f32>().into_linear()
    };
    let mixed = anchor(VIRIDIS[idx]).mix(anchor(VIRIDIS[idx + 1]), frac);
    to_color32(Srgb::from_linear(mixed))
}

// ---------------------------------------------------------------------------
// Color mapping: crop type → Color32
// ---------------------------------------------------------------------------

/// Maps the crop types of the full dataset to distinct colours.
///
/// Built from the full dataset so a crop keeps its colour across filters.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from a facet's distinct values.
    pub fn new(values: &BTreeSet<String>) -> Self {
        let palette = generate_palette(values.len());
        let mapping: BTreeMap<String, Color32> = values
            .iter()
            .zip(palette)
            .map(|(v, c)| (v.clone(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given value.
    pub fn color_for(&self, value: &str) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colors = generate_palette(5);
        assert_eq!(colors.len(), 5);
        let unique: BTreeSet<[u8; 4]> = colors.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 5);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn viridis_hits_its_end_anchors() {
        assert_eq!(viridis(0.0), Color32::from_rgb(68, 1, 84));
        assert_eq!(viridis(1.0), Color32::from_rgb(253, 231, 37));
        assert_eq!(viridis(-3.0), viridis(0.0));
        assert_eq!(viridis(f64::NAN), viridis(0.0));
        assert_eq!(viridis(7.0), viridis(1.0));
    }

    #[test]
    fn viridis_brightens_along_the_scale() {
        let luma = |c: Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(luma(viridis(0.25)) < luma(viridis(0.75)));
    }

    #[test]
    fn unknown_value_uses_default() {
        let values: BTreeSet<String> = ["Rice".to_string(), "Wheat".to_string()].into();
        let map = ColorMap::new(&values);
        assert_ne!(map.color_for("Rice"), map.color_for("Wheat"));
        assert_eq!(map.color_for("Barley"), Color32::GRAY);
    }

    #[test]
    fn opacity_sets_alpha() {
        let c = with_opacity(Color32::from_rgb(10, 20, 30), 0.5);
        assert_eq!(c.a(), 128);
        assert_eq!(with_opacity(Color32::RED, 2.0).a(), 255);
    }
}
