use serde::Deserialize;

use super::shapes::Color;

/// Canvas size and styling options for the map renderer.
///
/// Every field has a default, so a partial settings document is accepted;
/// the shell hands the deserialized struct over once, before any render.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub line_width: f64,
    pub stop_radius: f64,
    pub bus_label_font_size: u32,
    pub bus_label_offset: (f64, f64),
    pub stop_label_font_size: u32,
    pub stop_label_offset: (f64, f64),
    pub underlayer_color: Color,
    pub underlayer_width: f64,
    /// Routes take colors from here in alphabetical order, wrapping around
    /// when the palette runs out. Must not be empty.
    pub color_palette: Vec<Color>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            padding: 50.0,
            line_width: 14.0,
            stop_radius: 5.0,
            bus_label_font_size: 20,
            bus_label_offset: (7.0, 15.0),
            stop_label_font_size: 20,
            stop_label_offset: (7.0, -3.0),
            underlayer_color: Color::Rgba(255, 255, 255, 0.85),
            underlayer_width: 3.0,
            color_palette: vec![
                Color::name("green"),
                Color::Rgb(255, 160, 0),
                Color::name("red"),
            ],
        }
    }
}
