use std::collections::BTreeMap;

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

/// The twelve pastel colours of the ColorBrewer "Set3" scheme.
pub const SET3: [Color32; 12] = [
    Color32::from_rgb(141, 211, 199),
    Color32::from_rgb(255, 255, 179),
    Color32::from_rgb(190, 186, 218),
    Color32::from_rgb(251, 128, 114),
    Color32::from_rgb(128, 177, 211),
    Color32::from_rgb(253, 180, 98),
    Color32::from_rgb(179, 222, 105),
    Color32::from_rgb(252, 205, 229),
    Color32::from_rgb(217, 217, 217),
    Color32::from_rgb(188, 128, 189),
    Color32::from_rgb(204, 235, 197),
    Color32::from_rgb(255, 237, 111),
];

/// Set3 colour for the `i`-th category, cycling after twelve.
pub fn set3(i: usize) -> Color32 {
    SET3[i % SET3.len()]
}

// ---------------------------------------------------------------------------
// Diverging scale for the correlation heatmap
// ---------------------------------------------------------------------------

const COOL: (u8, u8, u8) = (59, 76, 192);
const NEUTRAL: (u8, u8, u8) = (221, 221, 221);
const WARM: (u8, u8, u8) = (180, 4, 38);

/// Blue → grey → red for `r` in [-1, 1]; values outside are clamped.
pub fn coolwarm(r: f64) -> Color32 {
    let r = r.clamp(-1.0, 1.0) as f32;
    let (from, to, t) = if r < 0.0 {
        (COOL, NEUTRAL, r + 1.0)
    } else {
        (NEUTRAL, WARM, r)
    };
    let mixed = linear(from).mix(linear(to), t);
    to_color32(Srgb::from_linear(mixed))
}

/// Black or white, whichever reads better on `background`.
pub fn contrasting_text(background: Color32) -> Color32 {
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 150.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

fn linear((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Color mapping: direction value → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of a categorical column to distinct colours, so
/// the same value gets the same colour in every chart.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the column's unique values.
    pub fn new<'a>(unique_values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut values: Vec<&str> = unique_values.into_iter().collect();
        values.sort_unstable();
        values.dedup();

        let palette = generate_palette(values.len());
        let mapping = values
            .into_iter()
            .zip(palette)
            .map(|(v, c)| (v.to_string(), c))
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

    /// Return the legend entries (value label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(v, c)| (v.clone(), *c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let p = generate_palette(5);
        assert_eq!(p.len(), 5);
        for i in 0..p.len() {
            for j in i + 1..p.len() {
                assert_ne!(p[i], p[j]);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn coolwarm_endpoints() {
        assert_eq!(coolwarm(-1.0), Color32::from_rgb(59, 76, 192));
        assert_eq!(coolwarm(1.0), Color32::from_rgb(180, 4, 38));
        assert_eq!(coolwarm(0.0), Color32::from_rgb(221, 221, 221));
        assert_eq!(coolwarm(7.0), coolwarm(1.0));
    }

    #[test]
    fn color_map_is_stable_across_orderings() {
        let a = ColorMap::new(["Import", "Export", "Import"]);
        let b = ColorMap::new(["Export", "Import"]);
        assert_eq!(a.color_for("Import"), b.color_for("Import"));
        assert_ne!(a.color_for("Import"), a.color_for("Export"));
        assert_eq!(a.color_for("Transit"), Color32::GRAY);
        assert_eq!(a.legend_entries().len(), 2);
    }

    #[test]
    fn text_contrast() {
        assert_eq!(contrasting_text(Color32::WHITE), Color32::BLACK);
        assert_eq!(contrasting_text(Color32::from_rgb(59, 76, 192)), Color32::WHITE);
    }
}
