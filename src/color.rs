use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Dashboard theme
// ---------------------------------------------------------------------------

pub const COLOR_BG: Color32 = Color32::from_rgb(0x19, 0x1B, 0x27);
pub const COLOR_ACCENT: Color32 = Color32::from_rgb(0x00, 0x93, 0xFF);
pub const COLOR_SUCCESS: Color32 = Color32::from_rgb(0x22, 0xC7, 0x0C);
pub const COLOR_TEXT: Color32 = Color32::from_rgb(0xDC, 0xE4, 0xF2);
pub const COLOR_PANEL: Color32 = Color32::from_rgb(0x2D, 0x35, 0x4A);

fn to_srgb(c: Color32) -> Srgb {
    Srgb::new(c.r(), c.g(), c.b()).into_format()
}

fn to_color32(c: Srgb) -> Color32 {
    let c: Srgb<u8> = c.into_format();
    Color32::from_rgb(c.red, c.green, c.blue)
}

/// Continuous bar colour: `t = 0` is the success green, `t = 1` the accent
/// blue. Mixed in linear light.
pub fn gradient(t: f32) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let low: LinSrgb = to_srgb(COLOR_SUCCESS).into_linear();
    let high: LinSrgb = to_srgb(COLOR_ACCENT).into_linear();
    let mixed: LinSrgb = low.mix(high, t);
    to_color32(Srgb::from_linear(mixed))
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
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category code → Color32
// ---------------------------------------------------------------------------

/// Fixed colour per category so slices keep their colour as filters change.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(values: &[String]) -> Self {
        let palette = generate_palette(values.len());
        let mapping = values.iter().cloned().zip(palette).collect();
        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

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

    fn close(a: Color32, b: Color32) -> bool {
        a.to_array()
            .iter()
            .zip(b.to_array())
            .all(|(x, y)| x.abs_diff(y) <= 1)
    }

    #[test]
    fn gradient_endpoints_are_theme_colours() {
        assert!(close(gradient(0.0), COLOR_SUCCESS));
        assert!(close(gradient(1.0), COLOR_ACCENT));
        assert!(close(gradient(f32::NAN), COLOR_SUCCESS));
        assert!(close(gradient(7.0), COLOR_ACCENT));
    }

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn unknown_values_use_default() {
        let map = ColorMap::new(&["COPP".to_string(), "PV".to_string()]);
        assert_ne!(map.color_for("COPP"), map.color_for("PV"));
        assert_eq!(map.color_for("XYZ"), Color32::GRAY);
    }
}
