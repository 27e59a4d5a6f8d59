//! Configuration for rendering feature collections
//!
//! A `RenderConfig` gathers the zoom request, tile budget, canvas geometry
//! and colors of one render. Configs can be built in code, picked from a
//! profile preset, or read from JSON.

use crate::core::constants::{
    DEFAULT_LINE_WIDTH, DEFAULT_RENDER_MAX_TILES, DEFAULT_RENDER_ZOOM, DEFAULT_TEXT_SCALE,
    TILE_SIZE,
};
use crate::rendering::style::{CanvasStyle, Color};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum RenderProfile {
    /// Full detail within the default budget
    Default,
    /// Coarse, small canvases for previews
    Overview,
    /// Large budget for print-size output
    Detailed,
    Custom(RenderConfig),
}

impl RenderProfile {
    pub fn resolve(&self) -> RenderConfig {
        match self {
            Self::Default => RenderConfig::default(),
            Self::Overview => RenderConfig {
                zoom: 14,
                max_tiles: 4,
                line_width: 1,
                ..RenderConfig::default()
            },
            Self::Detailed => RenderConfig {
                max_tiles: 128,
                line_width: 3,
                text_scale: 16.0,
                ..RenderConfig::default()
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for RenderProfile {
    fn default() -> Self {
        Self::Default
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Finest zoom level to render at
    pub zoom: u8,
    /// Exclusive upper bound on canvas tiles
    pub max_tiles: u32,
    /// Square tile size in pixels
    pub tile_size: u32,
    /// Relative margin added around the bounds before planning
    pub margin: Option<f64>,
    /// Canvas fill
    pub background: Color,
    /// Feature color when a feature has no `color` property
    pub foreground: Color,
    /// Optional outline color for polygons
    pub outline: Option<Color>,
    /// Stroke width in pixels
    pub line_width: u32,
    /// Text label height in pixels
    pub text_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_RENDER_ZOOM,
            max_tiles: DEFAULT_RENDER_MAX_TILES,
            tile_size: TILE_SIZE,
            margin: None,
            background: Color::BLACK,
            foreground: Color::WHITE,
            outline: None,
            line_width: DEFAULT_LINE_WIDTH,
            text_scale: DEFAULT_TEXT_SCALE,
        }
    }
}

impl RenderConfig {
    /// Reads a config from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.zoom > crate::core::constants::MAX_ZOOM {
            return Err(Error::InvalidZoom(self.zoom));
        }
        if self.tile_size == 0 {
            return Err(Error::MalformedInput("tile_size must be positive".into()));
        }
        if let Some(margin) = self.margin {
            if !margin.is_finite() || margin < 0.0 {
                return Err(Error::MalformedInput(format!("invalid margin {}", margin)));
            }
        }
        Ok(())
    }

    /// Drawing style for a canvas; no font is attached
    pub fn style(&self) -> CanvasStyle {
        CanvasStyle::new(self.background, self.foreground)
            .with_line_width(self.line_width)
            .with_text_scale(self.text_scale)
    }
}
