use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::CellValue;

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
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Colour for a signed change: green for improvement, red for decline.
///
/// Whether a rise is good depends on the indicator, so this only encodes the
/// sign.
pub fn change_color(change: f64) -> Color32 {
    if change >= 0.0 {
        Color32::from_rgb(46, 160, 67)
    } else {
        Color32::from_rgb(218, 54, 51)
    }
}

// ---------------------------------------------------------------------------
// Color mapping: category value → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of a categorical column to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<CellValue, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new<'a>(values: impl IntoIterator<Item = &'a CellValue>) -> Self {
        let unique: BTreeSet<&CellValue> = values.into_iter().collect();
        let palette = generate_palette(unique.len());
        let mapping = unique
            .into_iter()
            .zip(palette)
            .map(|(v, c)| (v.clone(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given value.
    pub fn color_for(&self, value: &CellValue) -> Color32 {
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
        let palette = generate_palette(6);
        assert_eq!(palette.len(), 6);
        let unique: BTreeSet<[u8; 4]> = palette.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 6);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn color_map_is_independent_of_input_order() {
        let a = CellValue::text("Goa");
        let b = CellValue::text("Kerala");
        let forward = ColorMap::new([&a, &b, &a]);
        let backward = ColorMap::new([&b, &a]);
        assert_eq!(forward.color_for(&a), backward.color_for(&a));
        assert_ne!(forward.color_for(&a), forward.color_for(&b));
        assert_eq!(forward.color_for(&CellValue::Null), Color32::GRAY);
    }

    #[test]
    fn change_color_encodes_sign() {
        assert_ne!(change_color(1.0), change_color(-1.0));
        assert_eq!(change_color(0.0), change_color(2.0));
    }
}
