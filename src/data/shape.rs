use crate::core::geo::LatLng;
use crate::data::geojson::{GeoJsonGeometry, Position};
use crate::{Error, Result};

/// A geometry the rasterizer knows how to draw.
///
/// Polygons keep all their rings, but only the exterior (first) ring is
/// ever filled; holes are not subtracted.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    LineString(Vec<LatLng>),
    MultiLineString(Vec<Vec<LatLng>>),
    Polygon(Vec<Vec<LatLng>>),
    MultiPolygon(Vec<Vec<Vec<LatLng>>>),
}

/// Drawing is planar: positions carrying an altitude are rejected
fn ring(positions: &[Position]) -> Result<Vec<LatLng>> {
    positions
        .iter()
        .map(|p| match p.dimensions() {
            2 => Ok(p.to_lat_lng()),
            n => Err(Error::MalformedInput(format!(
                "expected 2-D position, found {} components",
                n
            ))),
        })
        .collect()
}

fn rings(lines: &[Vec<Position>]) -> Result<Vec<Vec<LatLng>>> {
    lines.iter().map(|l| ring(l)).collect()
}

fn polygon(rings_in: &[Vec<Position>]) -> Result<Vec<Vec<LatLng>>> {
    if rings_in.is_empty() {
        return Err(Error::MalformedInput("polygon has no rings".into()));
    }
    rings(rings_in)
}

impl Shape {
    /// Name of the matching GeoJSON type
    pub fn type_name(&self) -> &'static str {
        match self {
            Shape::LineString(_) => "LineString",
            Shape::MultiLineString(_) => "MultiLineString",
            Shape::Polygon(_) => "Polygon",
            Shape::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// Exterior rings of every polygon, in order
    pub fn exteriors(&self) -> Vec<&[LatLng]> {
        match self {
            Shape::Polygon(rings) => rings.first().map(Vec::as_slice).into_iter().collect(),
            Shape::MultiPolygon(polygons) => polygons
                .iter()
                .filter_map(|rings| rings.first().map(Vec::as_slice))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Polylines of a line geometry, in order
    pub fn lines(&self) -> Vec<&[LatLng]> {
        match self {
            Shape::LineString(line) => vec![line.as_slice()],
            Shape::MultiLineString(lines) => lines.iter().map(Vec::as_slice).collect(),
            _ => Vec::new(),
        }
    }
}

impl TryFrom<&GeoJsonGeometry> for Shape {
    type Error = Error;

    fn try_from(geometry: &GeoJsonGeometry) -> Result<Self> {
        match geometry {
            GeoJsonGeometry::LineString { coordinates } => Ok(Shape::LineString(ring(coordinates)?)),
            GeoJsonGeometry::MultiLineString { coordinates } => {
                Ok(Shape::MultiLineString(rings(coordinates)?))
            }
            GeoJsonGeometry::Polygon { coordinates } => Ok(Shape::Polygon(polygon(coordinates)?)),
            GeoJsonGeometry::MultiPolygon { coordinates } => Ok(Shape::MultiPolygon(
                coordinates
                    .iter()
                    .map(|p| polygon(p))
                    .collect::<Result<Vec<_>>>()?,
            )),
            other => Err(Error::UnsupportedGeometry(other.type_name().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> Vec<Position> {
        vec![
            Position::new(x, y),
            Position::new(x + size, y),
            Position::new(x + size, y + size),
            Position::new(x, y + size),
            Position::new(x, y),
        ]
    }

    #[test]
    fn test_point_is_unsupported() {
        let geometry = GeoJsonGeometry::Point {
            coordinates: Position::new(1.0, 2.0),
        };
        match Shape::try_from(&geometry) {
            Err(Error::UnsupportedGeometry(name)) => assert_eq!(name, "Point"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_collection_is_unsupported() {
        let geometry = GeoJsonGeometry::GeometryCollection { geometries: vec![] };
        assert!(matches!(
            Shape::try_from(&geometry),
            Err(Error::UnsupportedGeometry(_))
        ));
    }

    #[test]
    fn test_multipolygon_exteriors_skip_holes() {
        let geometry = GeoJsonGeometry::MultiPolygon {
            coordinates: vec![
                vec![square(0.0, 0.0, 4.0), square(1.0, 1.0, 1.0)],
                vec![square(10.0, 0.0, 4.0), square(11.0, 1.0, 1.0)],
            ],
        };
        let shape = Shape::try_from(&geometry).unwrap();
        let exteriors = shape.exteriors();
        assert_eq!(exteriors.len(), 2);
        assert_eq!(exteriors[1][0], LatLng::new(0.0, 10.0));
        assert!(shape.lines().is_empty());
    }

    #[test]
    fn test_empty_polygon_is_malformed() {
        let geometry = GeoJsonGeometry::Polygon {
            coordinates: vec![],
        };
        assert!(matches!(
            Shape::try_from(&geometry),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn test_lines() {
        let geometry = GeoJsonGeometry::MultiLineString {
            coordinates: vec![square(0.0, 0.0, 1.0), square(5.0, 5.0, 1.0)],
        };
        let shape = Shape::try_from(&geometry).unwrap();
        assert_eq!(shape.type_name(), "MultiLineString");
        assert_eq!(shape.lines().len(), 2);
    }

    #[test]
    fn test_altitude_is_malformed_for_drawing() {
        let geojson: crate::data::geojson::GeoJson =
            r#"{"type": "LineString", "coordinates": [[1, 2, 3], [4, 5, 6]]}"#
                .parse()
                .unwrap();
        let geometry = match geojson {
            crate::data::geojson::GeoJson::Geometry(geometry) => geometry,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(geometry.coordinates().count(), 2);
        assert!(matches!(
            Shape::try_from(&geometry),
            Err(Error::MalformedInput(_))
        ));
    }
}
