use crate::core::geo::{LatLng, LatLngBounds};
use crate::prelude::HashMap;
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// A GeoJSON position: longitude, latitude and an optional altitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Position {
    pub lng: f64,
    pub lat: f64,
    pub alt: Option<f64>,
}

impl Position {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self {
            lng,
            lat,
            alt: None,
        }
    }

    pub fn to_lat_lng(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// Number of components: 2, or 3 with an altitude
    pub fn dimensions(&self) -> usize {
        if self.alt.is_some() {
            3
        } else {
            2
        }
    }
}

impl TryFrom<Vec<f64>> for Position {
    type Error = String;

    fn try_from(values: Vec<f64>) -> std::result::Result<Self, Self::Error> {
        match values[..] {
            [lng, lat] => Ok(Self::new(lng, lat)),
            [lng, lat, alt] => Ok(Self {
                lng,
                lat,
                alt: Some(alt),
            }),
            _ => Err(format!(
                "position needs 2 or 3 numbers, found {}",
                values.len()
            )),
        }
    }
}

impl From<Position> for Vec<f64> {
    fn from(p: Position) -> Self {
        match p.alt {
            Some(alt) => vec![p.lng, p.lat, alt],
            None => vec![p.lng, p.lat],
        }
    }
}

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: Position,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<HashMap<String, Value>>,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq)]
pub enum GeoJson {
    FeatureCollection { features: Vec<GeoJsonFeature> },
    Feature(GeoJsonFeature),
    Geometry(GeoJsonGeometry),
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<GeoJsonFeature>,
}

impl FromStr for GeoJson {
    type Err = Error;

    fn from_str(geojson_str: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(geojson_str)
            .map_err(|e| Error::MalformedInput(format!("invalid GeoJSON: {}", e)))?;
        Self::from_value(value)
    }
}

impl GeoJson {
    /// Converts an already parsed JSON tree, dispatching on its `type` member
    pub fn from_value(value: Value) -> Result<Self> {
        let kind = match value.get("type").and_then(Value::as_str) {
            Some(kind) => kind.to_string(),
            None => return Err(Error::MalformedInput("missing \"type\" member".into())),
        };
        let malformed = |e: serde_json::Error| Error::MalformedInput(format!("{}: {}", kind, e));
        match kind.as_str() {
            "FeatureCollection" => {
                let fc: FeatureCollection = serde_json::from_value(value).map_err(malformed)?;
                Ok(GeoJson::FeatureCollection {
                    features: fc.features,
                })
            }
            "Feature" => Ok(GeoJson::Feature(
                serde_json::from_value(value).map_err(malformed)?,
            )),
            _ => Ok(GeoJson::Geometry(
                serde_json::from_value(value).map_err(malformed)?,
            )),
        }
    }

    /// Gets all features; a bare geometry has none
    pub fn features(&self) -> Vec<&GeoJsonFeature> {
        match self {
            GeoJson::FeatureCollection { features } => features.iter().collect(),
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::Geometry(_) => Vec::new(),
        }
    }

    /// Lazily walks every position in the tree, in document order.
    ///
    /// Holes and all members of geometry collections are included.
    pub fn coordinates(&self) -> Box<dyn Iterator<Item = &Position> + '_> {
        match self {
            GeoJson::FeatureCollection { features } => {
                Box::new(features.iter().flat_map(|f| f.coordinates()))
            }
            GeoJson::Feature(feature) => feature.coordinates(),
            GeoJson::Geometry(geometry) => geometry.coordinates(),
        }
    }

    /// Bounding box of every position in the tree
    pub fn bounds(&self) -> Result<LatLngBounds> {
        bounding_box_of(self.coordinates())
    }
}

impl<'de> Deserialize<'de> for GeoJson {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        GeoJson::from_value(value).map_err(serde::de::Error::custom)
    }
}

impl GeoJsonFeature {
    /// Positions of the feature geometry; none when the geometry is null
    pub fn coordinates(&self) -> Box<dyn Iterator<Item = &Position> + '_> {
        Box::new(self.geometry.iter().flat_map(|g| g.coordinates()))
    }

    /// Looks up a property value
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|p| p.get(key))
    }
}

impl GeoJsonGeometry {
    /// GeoJSON type name
    pub fn type_name(&self) -> &'static str {
        match self {
            GeoJsonGeometry::Point { .. } => "Point",
            GeoJsonGeometry::MultiPoint { .. } => "MultiPoint",
            GeoJsonGeometry::LineString { .. } => "LineString",
            GeoJsonGeometry::MultiLineString { .. } => "MultiLineString",
            GeoJsonGeometry::Polygon { .. } => "Polygon",
            GeoJsonGeometry::MultiPolygon { .. } => "MultiPolygon",
            GeoJsonGeometry::GeometryCollection { .. } => "GeometryCollection",
        }
    }

    /// Lazily walks every position of the geometry
    pub fn coordinates(&self) -> Box<dyn Iterator<Item = &Position> + '_> {
        match self {
            GeoJsonGeometry::Point { coordinates } => Box::new(std::iter::once(coordinates)),
            GeoJsonGeometry::MultiPoint { coordinates }
            | GeoJsonGeometry::LineString { coordinates } => Box::new(coordinates.iter()),
            GeoJsonGeometry::MultiLineString { coordinates }
            | GeoJsonGeometry::Polygon { coordinates } => Box::new(coordinates.iter().flatten()),
            GeoJsonGeometry::MultiPolygon { coordinates } => {
                Box::new(coordinates.iter().flatten().flatten())
            }
            GeoJsonGeometry::GeometryCollection { geometries } => {
                Box::new(geometries.iter().flat_map(|g| g.coordinates()))
            }
        }
    }
}

/// Bounding box over a run of positions.
///
/// Fails with [`Error::EmptyGeometry`] when there is nothing to bound.
pub fn bounding_box_of<'a, I>(positions: I) -> Result<LatLngBounds>
where
    I: IntoIterator<Item = &'a Position>,
{
    let mut positions = positions.into_iter();
    let first = positions.next().ok_or(Error::EmptyGeometry)?.to_lat_lng();
    let mut bounds = LatLngBounds::new(first, first);
    for position in positions {
        bounds.extend(&position.to_lat_lng());
    }
    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLLECTION: &str = r##"
    {
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"name": "Test Point", "color": "#065535"},
                "geometry": {
                    "type": "Point",
                    "coordinates": [-74.0060, 40.7128]
                }
            },
            {
                "type": "Feature",
                "properties": null,
                "geometry": {
                    "type": "GeometryCollection",
                    "geometries": [
                        {"type": "LineString", "coordinates": [[-73.9857, 40.7489, 12.0], [-73.99, 40.70]]},
                        {"type": "Polygon", "coordinates": [[[-74.1, 40.6], [-74.0, 40.6], [-74.0, 40.65], [-74.1, 40.6]]]}
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": null
            }
        ]
    }
    "##;

    #[test]
    fn test_geojson_parsing() {
        let geojson = COLLECTION.parse::<GeoJson>().unwrap();
        let features = geojson.features();
        assert_eq!(features.len(), 3);
        assert_eq!(
            features[0].property("color"),
            Some(&Value::String("#065535".into()))
        );
        assert!(features[2].geometry.is_none());
    }

    #[test]
    fn test_coordinates_walk_in_order() {
        let geojson = COLLECTION.parse::<GeoJson>().unwrap();
        let coords: Vec<&Position> = geojson.coordinates().collect();
        assert_eq!(coords.len(), 7);
        assert_eq!(*coords[0], Position::new(-74.0060, 40.7128));
        assert_eq!(coords[1].alt, Some(12.0));
        // The same root can be walked again
        assert_eq!(geojson.coordinates().count(), 7);
    }

    #[test]
    fn test_bounds_calculation() {
        let geojson = COLLECTION.parse::<GeoJson>().unwrap();
        let bounds = geojson.bounds().unwrap();
        assert_eq!(bounds.south_west(), LatLng::new(40.6, -74.1));
        assert_eq!(bounds.north_east(), LatLng::new(40.7489, -73.9857));
    }

    #[test]
    fn test_empty_bounds_is_error() {
        let geojson = GeoJson::FeatureCollection { features: vec![] };
        assert!(matches!(geojson.bounds(), Err(Error::EmptyGeometry)));
    }

    #[test]
    fn test_short_position_is_malformed() {
        let err = GeoJson::from_str(r#"{"type": "LineString", "coordinates": [[1.0], [2.0, 3.0]]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
        let err = GeoJson::from_str(r#"{"type": "LineString", "coordinates": [[1, 2, 3, 4], [2, 3]]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_wrong_nesting_is_malformed() {
        let err = GeoJson::from_str(r#"{"type": "Polygon", "coordinates": [[1.0, 2.0]]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_missing_type_is_malformed() {
        let err = GeoJson::from_str(r#"{"features": []}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_geometry_round_trips_through_serde() {
        let geometry = GeoJsonGeometry::LineString {
            coordinates: vec![Position::new(1.0, 2.0), Position::new(3.0, 4.0)],
        };
        let text = serde_json::to_string(&geometry).unwrap();
        assert!(text.contains("\"type\":\"LineString\""));
        let back: GeoJsonGeometry = serde_json::from_str(&text).unwrap();
        assert_eq!(back, geometry);
    }
}
