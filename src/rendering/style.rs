//! Colors and the drawing style a canvas is built with.

use crate::core::constants::{DEFAULT_LINE_WIDTH, DEFAULT_TEXT_SCALE};
use crate::prelude::HashMap;
use crate::{Error, Result};
use ab_glyph::FontArc;
use image::Rgb;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named colors accepted in color strings
static NAMED_COLORS: Lazy<HashMap<&'static str, [u8; 3]>> = Lazy::new(|| {
    [
        ("black", [0, 0, 0]),
        ("white", [255, 255, 255]),
        ("red", [255, 0, 0]),
        ("lime", [0, 255, 0]),
        ("green", [0, 128, 0]),
        ("blue", [0, 0, 255]),
        ("yellow", [255, 255, 0]),
        ("cyan", [0, 255, 255]),
        ("aqua", [0, 255, 255]),
        ("magenta", [255, 0, 255]),
        ("fuchsia", [255, 0, 255]),
        ("gray", [128, 128, 128]),
        ("grey", [128, 128, 128]),
        ("silver", [192, 192, 192]),
        ("lightgray", [211, 211, 211]),
        ("lightgrey", [211, 211, 211]),
        ("darkgray", [169, 169, 169]),
        ("darkgrey", [169, 169, 169]),
        ("maroon", [128, 0, 0]),
        ("olive", [128, 128, 0]),
        ("navy", [0, 0, 128]),
        ("purple", [128, 0, 128]),
        ("teal", [0, 128, 128]),
        ("orange", [255, 165, 0]),
        ("brown", [165, 42, 42]),
        ("pink", [255, 192, 203]),
        ("gold", [255, 215, 0]),
        ("beige", [245, 245, 220]),
        ("tan", [210, 180, 140]),
        ("khaki", [240, 230, 140]),
        ("coral", [255, 127, 80]),
        ("salmon", [250, 128, 114]),
        ("tomato", [255, 99, 71]),
        ("crimson", [220, 20, 60]),
        ("indigo", [75, 0, 130]),
        ("violet", [238, 130, 238]),
        ("turquoise", [64, 224, 208]),
        ("skyblue", [135, 206, 235]),
        ("steelblue", [70, 130, 180]),
        ("forestgreen", [34, 139, 34]),
        ("darkgreen", [0, 100, 0]),
        ("darkblue", [0, 0, 139]),
        ("darkred", [139, 0, 0]),
    ]
    .into_iter()
    .collect()
});

/// An opaque RGB color.
///
/// Parsed from `#rgb`, `#rrggbb`, `rgb(r, g, b)`, a CSS color name, or an
/// integer gray level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorValue", into = "String")]
pub struct Color(pub Rgb<u8>);

/// Raw color as found in configuration or feature properties
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Gray(u8),
    Text(String),
}

impl Color {
    pub const BLACK: Color = Color(Rgb([0, 0, 0]));
    pub const WHITE: Color = Color(Rgb([255, 255, 255]));

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Rgb([r, g, b]))
    }

    /// Gray level color
    pub fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    /// Pixel value for the raster
    pub fn pixel(&self) -> Rgb<u8> {
        self.0
    }

    /// Reads a color from a JSON value (string or gray level)
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::String(s) => s.parse(),
            serde_json::Value::Number(n) => n
                .as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .map(Color::gray)
                .ok_or_else(|| Error::InvalidColor(n.to_string())),
            other => Err(Error::InvalidColor(other.to_string())),
        }
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 => {
                let mut rgb = [0_u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let v = c.to_digit(16)? as u8;
                    rgb[i] = v * 17;
                }
                Some(Self(Rgb(rgb)))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            _ => None,
        }
    }

    fn parse_function(args: &str) -> Option<Self> {
        let parts: Vec<u8> = args
            .split(',')
            .map(|p| p.trim().parse::<u8>())
            .collect::<std::result::Result<_, _>>()
            .ok()?;
        match parts[..] {
            [r, g, b] => Some(Self::rgb(r, g, b)),
            _ => None,
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim().to_ascii_lowercase();
        let parsed = if let Some(hex) = text.strip_prefix('#') {
            Self::parse_hex(hex)
        } else if let Some(args) = text
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Self::parse_function(args)
        } else {
            NAMED_COLORS.get(text.as_str()).map(|rgb| Self(Rgb(*rgb)))
        };
        parsed.ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

impl From<u8> for Color {
    fn from(level: u8) -> Self {
        Color::gray(level)
    }
}

impl From<Rgb<u8>> for Color {
    fn from(rgb: Rgb<u8>) -> Self {
        Color(rgb)
    }
}

impl TryFrom<ColorValue> for Color {
    type Error = Error;

    fn try_from(value: ColorValue) -> Result<Self> {
        match value {
            ColorValue::Gray(level) => Ok(Color::gray(level)),
            ColorValue::Text(text) => text.parse(),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Rgb([r, g, b]) = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Drawing style fixed when a canvas is created
#[derive(Clone)]
pub struct CanvasStyle {
    /// Fill of a freshly allocated canvas
    pub background: Color,
    /// Color used when a draw call or feature names none
    pub foreground: Color,
    /// Font for text labels
    pub font: Option<FontArc>,
    /// Stroke width of lines and outlines, in pixels
    pub line_width: u32,
    /// Pixel height of text labels
    pub text_scale: f32,
}

impl CanvasStyle {
    pub fn new(background: Color, foreground: Color) -> Self {
        Self {
            background,
            foreground,
            ..Self::default()
        }
    }

    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_line_width(mut self, width: u32) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_text_scale(mut self, scale: f32) -> Self {
        self.text_scale = scale;
        self
    }
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            foreground: Color::WHITE,
            font: None,
            line_width: DEFAULT_LINE_WIDTH,
            text_scale: DEFAULT_TEXT_SCALE,
        }
    }
}

impl fmt::Debug for CanvasStyle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CanvasStyle")
            .field("background", &self.background)
            .field("foreground", &self.foreground)
            .field("font", &self.font.is_some())
            .field("line_width", &self.line_width)
            .field("text_scale", &self.text_scale)
            .finish()
    }
}
