use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Stroke of the perspective trails: `rgba(255, 45, 0, 0.2)`.
pub const TRAIL_COLOR: Color32 = Color32::from_rgba_premultiplied(51, 9, 0, 51);
/// Markers of NaN cells.
pub const MISSING_COLOR: Color32 = Color32::BLACK;

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
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Parse `#rrggbb` (or `rrggbb`).
pub fn parse_hex(hex: &str) -> Option<Color32> {
    let rgb = Srgb::<u8>::from_str(hex.trim()).ok()?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

// ---------------------------------------------------------------------------
// ColorMap: label / feature index → Color32
// ---------------------------------------------------------------------------

/// The configured palette plus a generated extension for indices past its
/// end.
#[derive(Debug, Clone)]
pub struct ColorMap {
    palette: Vec<Color32>,
    overflow: Vec<Color32>,
}

impl ColorMap {
    /// Build from hex strings; unparsable entries are logged and skipped.
    pub fn new(colors: &[String]) -> Self {
        let mut palette: Vec<Color32> = colors
            .iter()
            .filter_map(|hex| {
                let c = parse_hex(hex);
                if c.is_none() {
                    log::warn!("ignoring invalid palette color '{hex}'");
                }
                c
            })
            .collect();
        if palette.is_empty() {
            palette.push(Color32::LIGHT_BLUE);
        }

        ColorMap {
            palette,
            overflow: generate_palette(12),
        }
    }

    /// First palette entry, used when coloring is turned off.
    pub fn primary(&self) -> Color32 {
        self.palette[0]
    }

    /// Color of a class label. Unlabeled rows (and negative labels) get the
    /// primary color; labels past the palette take generated hues.
    pub fn label_color(&self, label: Option<i64>) -> Color32 {
        match label.and_then(|l| usize::try_from(l).ok()) {
            Some(l) if l < self.palette.len() => self.palette[l],
            Some(l) => self.overflow[(l - self.palette.len()) % self.overflow.len()],
            None => self.primary(),
        }
    }

    /// Color of feature `i`, cycling through the palette.
    pub fn feature_color(&self, i: usize) -> Color32 {
        self.palette[i % self.palette.len()]
    }

    /// The configured palette entries.
    pub fn legend_entries(&self) -> &[Color32] {
        &self.palette
    }
}

/// `#rrggbb` and opacity for SVG attributes.
pub fn svg_color(c: Color32) -> (String, f32) {
    let [r, g, b, a] = c.to_srgba_unmultiplied();
    (format!("#{r:02x}{g:02x}{b:02x}"), a as f32 / 255.0)
}
