//! One-call rendering of a GeoJSON document to an image.

use crate::{
    core::{builder::GeoCanvasBuilder, config::RenderConfig, geo::LatLngBounds},
    data::geojson::{GeoJson, GeoJsonFeature},
    rendering::{canvas::GeoCanvas, style::Color},
    Result,
};
use image::RgbImage;
use serde_json::Value;
use std::time::Instant;

/// Property holding a per-feature fill color
pub const COLOR_PROPERTY: &str = "color";

/// Fill color of a feature: its `color` property, else `default`.
///
/// A `null` color counts as absent.
pub fn feature_color(feature: &GeoJsonFeature, default: Color) -> Result<Color> {
    match feature.property(COLOR_PROPERTY) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => Color::from_value(value),
    }
}

/// Draws every feature of `geojson` onto an existing canvas.
///
/// Features without geometry are skipped; an undrawable geometry type aborts
/// the whole call.
pub fn draw_features(
    canvas: &mut GeoCanvas,
    geojson: &GeoJson,
    default_color: Color,
    outline: Option<Color>,
) -> Result<usize> {
    let mut drawn = 0;
    for (i, feature) in geojson.features().into_iter().enumerate() {
        let geometry = match &feature.geometry {
            Some(geometry) => geometry,
            None => {
                log::warn!("feature {} has no geometry, skipped", i);
                continue;
            }
        };
        let fill = feature_color(feature, default_color)?;
        canvas.draw_geometry(geometry, Some(fill), outline)?;
        drawn += 1;
    }
    if let GeoJson::Geometry(geometry) = geojson {
        canvas.draw_geometry(geometry, Some(default_color), outline)?;
        drawn += 1;
    }
    Ok(drawn)
}

/// Renders a feature collection, cropped to `bounds`.
///
/// Without `bounds` the box of every coordinate in the document is used.
pub fn render_feature_collection(
    geojson: &GeoJson,
    config: &RenderConfig,
    bounds: Option<LatLngBounds>,
) -> Result<RgbImage> {
    let t = Instant::now();
    config.validate()?;
    let bounds = match bounds {
        Some(bounds) => bounds,
        None => geojson.bounds()?,
    };
    let mut canvas = GeoCanvasBuilder::from_config(bounds, config).build()?;
    let drawn = draw_features(&mut canvas, geojson, config.foreground, config.outline)?;
    let img = canvas.cropped(&bounds);
    log::info!(
        "rendered {} features at zoom {} into {}x{} in {:?}",
        drawn,
        canvas.zoom(),
        img.width(),
        img.height(),
        t.elapsed()
    );
    Ok(img)
}

/// Parses GeoJSON text and renders it
pub fn render_geojson_str(
    geojson_str: &str,
    config: &RenderConfig,
    bounds: Option<LatLngBounds>,
) -> Result<RgbImage> {
    let geojson: GeoJson = geojson_str.parse()?;
    render_feature_collection(&geojson, config, bounds)
}
