use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            hsl_to_color32(hsl)
        })
        .collect()
}

/// Yellow→red gradient for heatmap cells, `t` in [0, 1] (low → high price).
pub fn heat_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let hue = 55.0 * (1.0 - t);
    let hsl = Hsl::new(hue, 0.85, 0.55 - 0.08 * t);
    hsl_to_color32(hsl)
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: make → Color32
// ---------------------------------------------------------------------------

/// Maps each make to a distinct colour for the scatter legend.
#[derive(Debug, Clone)]
pub struct MakeColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl MakeColors {
    /// Build the colour map from the dataset's sorted distinct makes.
    pub fn new(makes: &[String]) -> Self {
        let palette = generate_palette(makes.len());
        let mapping: BTreeMap<String, Color32> = makes
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();

        MakeColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given make.
    pub fn color_for(&self, make: &str) -> Color32 {
        self.mapping
            .get(make)
            .copied()
            .unwrap_or(self.default_color)
    }
}
