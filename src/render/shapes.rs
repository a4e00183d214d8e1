use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// A position on the output canvas.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A color the way a settings document spells it: a name, an rgb triple or
/// an rgba quadruple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Name(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

impl Color {
    pub fn name(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Rgb(red, green, blue) => write!(f, "rgb({red},{green},{blue})"),
            Self::Rgba(red, green, blue, opacity) => {
                write!(f, "rgba({red},{green},{blue},{opacity})")
            }
        }
    }
}

/// An open stroke through two or more canvas points. Fill is always none and
/// line caps and joins are round; that style is fixed for the whole map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub stroke: Color,
    pub stroke_width: f64,
}

/// A filled circle without an outline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub fill: Color,
}

/// A piece of text anchored at a canvas point. The font family is always
/// Verdana. Labels come in pairs: an underlay copy stroked with the halo
/// color followed by the foreground copy without a stroke.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub position: Point,
    pub offset: (f64, f64),
    pub font_size: u32,
    pub bold: bool,
    pub content: String,
    pub fill: Color,
    /// Halo stroke color and width; round caps and joins implied.
    pub stroke: Option<(Color, f64)>,
}

/// One drawable primitive of the rendered map. The renderer's output order
/// is the draw order: later shapes overlay earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Shape {
    Polyline(Polyline),
    Circle(Circle),
    Label(Label),
}
