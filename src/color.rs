use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use streamscope::data::ContentType;

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| hsl_to_color32(Hsl::new((i as f32 / n as f32) * 360.0, 0.75, 0.55)))
        .collect()
}

/// Sequential red scale: `t = 0` is a pale pink, `t = 1` a deep red.
pub fn reds(t: f64) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) as f32 } else { 0.0 };
    hsl_to_color32(Hsl::new(355.0, 0.85, 0.85 - 0.5 * t))
}

/// Normalise `value` into `0..=1` over `[min, max]`; flat ranges map to 1.
pub fn scale(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range.abs() < f64::EPSILON {
        1.0
    } else {
        (value - min) / range
    }
}

/// Brand colours for the two content types.
pub fn type_color(content_type: ContentType) -> Color32 {
    match content_type {
        ContentType::Movie => Color32::from_rgb(0xE5, 0x09, 0x14),
        ContentType::TvShow => Color32::from_rgb(0xFF, 0x6B, 0x6B),
    }
}

// ---------------------------------------------------------------------------
// Color mapping: category → Color32
// ---------------------------------------------------------------------------

/// Maps the categories of one column (e.g. genres) to distinct colours.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    /// Build a colour map, assigning hues in the given order.
    pub fn new(categories: &[String]) -> Self {
        let palette = generate_palette(categories.len());
        ColorMap {
            mapping: categories.iter().cloned().zip(palette).collect(),
        }
    }

    /// Look up the colour for a category.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping.get(category).copied().unwrap_or(Color32::GRAY)
    }
}
