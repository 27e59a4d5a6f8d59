//! A raster canvas covering a rectangular grid of map tiles.

use crate::{
    core::{
        geo::{LatLng, LatLngBounds},
        planner::{CanvasPlan, PixelRect},
    },
    data::{geojson::GeoJsonGeometry, shape::Shape},
    rendering::{
        raster::{self, Pixel},
        style::{CanvasStyle, Color},
    },
    Error, Result,
};
use image::{imageops, RgbImage};
use std::path::Path;

/// Owned drawing surface for one rendering session.
///
/// The zoom level and anchor tile are fixed when the canvas is created;
/// every draw call maps geographic coordinates through that same plan.
#[derive(Debug, Clone)]
pub struct GeoCanvas {
    plan: CanvasPlan,
    style: CanvasStyle,
    img: RgbImage,
}

impl GeoCanvas {
    /// Allocates a canvas for `plan`, filled with the style's background
    pub fn new(plan: CanvasPlan, style: CanvasStyle) -> Self {
        let (width, height) = plan.pixel_size();
        log::debug!(
            "allocating {}x{} canvas at zoom {} (background {})",
            width,
            height,
            plan.zoom(),
            style.background
        );
        let img = RgbImage::from_pixel(width, height, style.background.pixel());
        Self { plan, style, img }
    }

    /// Starts a [`GeoCanvasBuilder`] for `bounds`
    ///
    /// [`GeoCanvasBuilder`]: crate::core::builder::GeoCanvasBuilder
    pub fn builder(bounds: LatLngBounds) -> crate::core::builder::GeoCanvasBuilder {
        crate::core::builder::GeoCanvasBuilder::new(bounds)
    }

    pub fn plan(&self) -> &CanvasPlan {
        &self.plan
    }

    pub fn style(&self) -> &CanvasStyle {
        &self.style
    }

    /// Working zoom level
    pub fn zoom(&self) -> u8 {
        self.plan.zoom()
    }

    /// Canvas size in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        self.img.dimensions()
    }

    fn to_pixels(&self, points: &[LatLng]) -> Vec<Pixel> {
        points
            .iter()
            .map(|p| self.plan.geo_to_pixel(*p).truncate())
            .collect()
    }

    /// Plots geographic points
    pub fn draw_points(&mut self, points: &[LatLng], color: Option<Color>) {
        let pixels = self.to_pixels(points);
        let color = color.unwrap_or(self.style.foreground);
        raster::draw_points(&mut self.img, &pixels, color.pixel());
    }

    /// Strokes a polyline through geographic points
    pub fn draw_line(&mut self, points: &[LatLng], color: Option<Color>) {
        let pixels = self.to_pixels(points);
        let color = color.unwrap_or(self.style.foreground);
        raster::draw_line(&mut self.img, &pixels, color.pixel(), self.style.line_width);
    }

    /// Fills a ring of geographic points, optionally outlined
    pub fn draw_polygon(&mut self, ring: &[LatLng], fill: Option<Color>, outline: Option<Color>) {
        let pixels = self.to_pixels(ring);
        let fill = fill.unwrap_or(self.style.foreground);
        raster::draw_polygon(
            &mut self.img,
            &pixels,
            fill.pixel(),
            outline.map(|c| c.pixel()),
            self.style.line_width,
        );
    }

    /// Writes a text label anchored at a geographic point
    pub fn draw_text(&mut self, point: LatLng, text: &str, color: Option<Color>) -> Result<()> {
        let font = self.style.font.as_ref().ok_or(Error::MissingFont)?;
        let pixel = self.plan.geo_to_pixel(point).truncate();
        let color = color.unwrap_or(self.style.foreground);
        raster::draw_text(
            &mut self.img,
            pixel,
            text,
            color.pixel(),
            font,
            self.style.text_scale,
        );
        Ok(())
    }

    /// Draws a typed shape; only polygon exterior rings are filled
    pub fn draw_shape(&mut self, shape: &Shape, fill: Option<Color>, outline: Option<Color>) {
        match shape {
            Shape::LineString(_) | Shape::MultiLineString(_) => {
                for line in shape.lines() {
                    self.draw_line(line, fill);
                }
            }
            Shape::Polygon(_) | Shape::MultiPolygon(_) => {
                for ring in shape.exteriors() {
                    self.draw_polygon(ring, fill, outline);
                }
            }
        }
    }

    /// Draws a GeoJSON geometry.
    ///
    /// Only `LineString`, `MultiLineString`, `Polygon` and `MultiPolygon`
    /// are drawable; anything else fails with `UnsupportedGeometry`.
    pub fn draw_geometry(
        &mut self,
        geometry: &GeoJsonGeometry,
        fill: Option<Color>,
        outline: Option<Color>,
    ) -> Result<()> {
        let shape = Shape::try_from(geometry)?;
        self.draw_shape(&shape, fill, outline);
        Ok(())
    }

    /// The whole canvas
    pub fn image(&self) -> &RgbImage {
        &self.img
    }

    /// Consumes the canvas, returning the whole image
    pub fn into_image(self) -> RgbImage {
        self.img
    }

    /// Pixel rectangle of a geographic box on this canvas
    pub fn crop_rect(&self, bounds: &LatLngBounds, padding: u32) -> PixelRect {
        self.plan.crop_rect(bounds, padding)
    }

    /// Copy of the part of the canvas covered by `bounds`
    pub fn cropped(&self, bounds: &LatLngBounds) -> RgbImage {
        self.cropped_with_padding(bounds, 0)
    }

    /// Copy of the part of the canvas covered by `bounds`, grown by
    /// `padding` pixels on each side
    pub fn cropped_with_padding(&self, bounds: &LatLngBounds, padding: u32) -> RgbImage {
        let rect = self.crop_rect(bounds, padding);
        imageops::crop_imm(&self.img, rect.left, rect.top, rect.width, rect.height).to_image()
    }

    /// Encodes the whole canvas to a file; format follows the extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.img.save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::TILE_SIZE;
    use crate::data::geojson::Position;

    fn small_box() -> LatLngBounds {
        LatLngBounds::from_lng_lat(-122.4143, 37.7796, -122.4130, 37.7802)
    }

    fn canvas() -> GeoCanvas {
        let plan = CanvasPlan::new(&small_box(), 19, 32, TILE_SIZE).unwrap();
        GeoCanvas::new(plan, CanvasStyle::new(Color::gray(10), Color::WHITE))
    }

    #[test]
    fn test_canvas_allocation() {
        let canvas = canvas();
        assert_eq!(canvas.dimensions(), (768, 512));
        assert_eq!(*canvas.image().get_pixel(0, 0), Color::gray(10).pixel());
    }

    #[test]
    fn test_draw_polygon_in_geo_space() {
        let mut canvas = canvas();
        let sw = small_box().south_west();
        let ne = small_box().north_east();
        let ring = [
            LatLng::new(sw.lat, sw.lng),
            LatLng::new(sw.lat, ne.lng),
            LatLng::new(ne.lat, ne.lng),
            LatLng::new(ne.lat, sw.lng),
        ];
        let red = Color::rgb(255, 0, 0);
        canvas.draw_polygon(&ring, Some(red), None);
        let center = LatLng::new((sw.lat + ne.lat) / 2.0, (sw.lng + ne.lng) / 2.0);
        let (x, y) = canvas.plan().geo_to_pixel(center).truncate();
        assert_eq!(*canvas.image().get_pixel(x as u32, y as u32), red.pixel());
    }

    #[test]
    fn test_point_geometry_is_rejected() {
        let mut canvas = canvas();
        let point = GeoJsonGeometry::Point {
            coordinates: Position::new(-122.4140, 37.7800),
        };
        match canvas.draw_geometry(&point, None, None) {
            Err(Error::UnsupportedGeometry(name)) => assert_eq!(name, "Point"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_text_without_font() {
        let mut canvas = canvas();
        assert!(matches!(
            canvas.draw_text(small_box().start, "label", None),
            Err(Error::MissingFont)
        ));
    }

    #[test]
    fn test_text_with_font() {
        let font = ab_glyph::FontArc::try_from_slice(include_bytes!(
            "../../tests/fixtures/DejaVuSans.ttf"
        ))
        .unwrap();
        let mut canvas = canvas();
        canvas.style = canvas.style.clone().with_font(font);
        let anchor = LatLng::new(37.7800, -122.4140);
        canvas.draw_text(anchor, "Market St", None).unwrap();
        let (x, y) = canvas.plan().geo_to_pixel(anchor).truncate();
        let lit = canvas
            .image()
            .enumerate_pixels()
            .filter(|(px, py, p)| {
                **p != Color::gray(10).pixel() && *px >= x as u32 && *py >= y as u32
            })
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn test_draw_points_uses_foreground() {
        let mut canvas = canvas();
        let point = LatLng::new(37.7800, -122.4140);
        canvas.draw_points(&[point], None);
        let (x, y) = canvas.plan().geo_to_pixel(point).truncate();
        assert_eq!(*canvas.image().get_pixel(x as u32, y as u32), Color::WHITE.pixel());
    }

    #[test]
    fn test_cropped_size_matches_rect() {
        let canvas = canvas();
        let rect = canvas.crop_rect(&small_box(), 0);
        let img = canvas.cropped(&small_box());
        assert_eq!(img.dimensions(), (rect.width, rect.height));
        assert!(img.width() > 0 && img.height() > 0);
        let padded = canvas.cropped_with_padding(&small_box(), 10);
        assert!(padded.width() >= img.width());
    }
}
