use std::collections::HashMap;
use std::str::FromStr;

use eframe::egui::Color32;
use palette::Srgb;

// ---------------------------------------------------------------------------
// Qualitative palettes
// ---------------------------------------------------------------------------

const PLOTLY_HEX: [&str; 10] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    "#ff97ff", "#fecb52",
];

const PASTEL_HEX: [&str; 11] = [
    "#66c5cc", "#f6cf71", "#f89c74", "#dcb0f2", "#87c55f", "#9eb9f3", "#fe88b1", "#c9db74",
    "#8be0a4", "#b497e7", "#b3b3b3",
];

/// Named sequences of visually distinct colours, cycled when exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// Saturated default, used for per-country series.
    Qualitative,
    /// Soft tones, used for bar categories.
    Pastel,
}

impl Palette {
    fn hex_codes(self) -> &'static [&'static str] {
        match self {
            Palette::Qualitative => &PLOTLY_HEX,
            Palette::Pastel => &PASTEL_HEX,
        }
    }

    /// Colour for the `index`-th category.
    pub fn color(self, index: usize) -> Color32 {
        let codes = self.hex_codes();
        parse_hex(codes[index % codes.len()])
    }
}

fn parse_hex(code: &str) -> Color32 {
    match Srgb::<u8>::from_str(code) {
        Ok(rgb) => Color32::from_rgb(rgb.red, rgb.green, rgb.blue),
        Err(e) => {
            log::warn!("invalid palette entry {code}: {e}");
            Color32::GRAY
        }
    }
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps category labels to colours in the order the categories are given.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    mapping: HashMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new<'a>(categories: impl IntoIterator<Item = &'a str>, palette: Palette) -> Self {
        let mut mapping = HashMap::new();
        for label in categories {
            if !mapping.contains_key(label) {
                let color = palette.color(mapping.len());
                mapping.insert(label.to_string(), color);
            }
        }

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}
