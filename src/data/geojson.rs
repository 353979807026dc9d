use crate::core::geo::{LatLng, LatLngBounds};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// GeoJSON geometry types
///
/// Positions keep every ordinate the source provides; earthquake feeds carry a
/// third one for depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: Vec<f64>,
    },
    LineString {
        coordinates: Vec<Vec<f64>>,
    },
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPoint {
        coordinates: Vec<Vec<f64>>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<HashMap<String, serde_json::Value>>,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
}

/// One earthquake: where it happened and how strong it was.
#[derive(Debug, Clone, PartialEq)]
pub struct QuakeFeature {
    pub id: Option<serde_json::Value>,
    pub position: LatLng,
    pub magnitude: f64,
    pub properties: HashMap<String, serde_json::Value>,
}

impl QuakeFeature {
    /// Extracts a quake from a GeoJSON feature. Returns `None` unless the
    /// feature is a Point with a numeric `magnitude_property`.
    pub fn from_feature(feature: &GeoJsonFeature, magnitude_property: &str) -> Option<Self> {
        let position = match &feature.geometry {
            Some(GeoJsonGeometry::Point { coordinates }) if coordinates.len() >= 2 => {
                LatLng::from(geo_types::coord! { x: coordinates[0], y: coordinates[1] })
            }
            _ => return None,
        };

        let properties = feature.properties.clone().unwrap_or_default();
        let magnitude = properties.get(magnitude_property)?.as_f64()?;

        Some(Self {
            id: feature.id.clone(),
            position,
            magnitude,
            properties,
        })
    }

    /// Display label used when logging hovers.
    pub fn label(&self) -> String {
        match self.properties.get("place").and_then(|p| p.as_str()) {
            Some(place) => format!("M{} {}", self.magnitude, place),
            None => format!(
                "M{} at ({:.3}, {:.3})",
                self.magnitude, self.position.lng, self.position.lat
            ),
        }
    }
}

/// The loaded dataset. Built once and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuakeCollection {
    features: Vec<QuakeFeature>,
    skipped: usize,
}

impl QuakeCollection {
    pub fn new(features: Vec<QuakeFeature>) -> Self {
        Self {
            features,
            skipped: 0,
        }
    }

    /// Parses a GeoJSON FeatureCollection.
    pub fn from_geojson_str(geojson_str: &str, magnitude_property: &str) -> crate::Result<Self> {
        let data: GeoJson = serde_json::from_str(geojson_str)
            .map_err(|e| crate::Error::ParseError(format!("Invalid GeoJSON: {}", e)))?;

        match data {
            GeoJson::FeatureCollection { features } => {
                Ok(Self::from_features(&features, magnitude_property))
            }
            GeoJson::Feature(_) => Err(crate::Error::ParseError(
                "expected a FeatureCollection, found a single Feature".to_string(),
            )),
        }
    }

    pub fn from_features(features: &[GeoJsonFeature], magnitude_property: &str) -> Self {
        let mut quakes = Vec::with_capacity(features.len());
        let mut skipped = 0;
        for (index, feature) in features.iter().enumerate() {
            match QuakeFeature::from_feature(feature, magnitude_property) {
                Some(quake) => quakes.push(quake),
                None => {
                    skipped += 1;
                    log::warn!(
                        "skipping feature {}: not a Point with a numeric '{}'",
                        index,
                        magnitude_property
                    );
                }
            }
        }

        Self {
            features: quakes,
            skipped,
        }
    }

    pub fn features(&self) -> &[QuakeFeature] {
        &self.features
    }

    pub fn get(&self, index: usize) -> Option<&QuakeFeature> {
        self.features.get(index)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Number of input features that were not usable quakes.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Largest magnitude in the dataset, `None` when it is empty.
    pub fn max_magnitude(&self) -> Option<f64> {
        self.features
            .iter()
            .map(|f| f.magnitude)
            .fold(None, |max, m| match max {
                Some(current) if current >= m => Some(current),
                _ => Some(m),
            })
    }

    /// Bounding box of all quake positions
    pub fn bounds(&self) -> Option<LatLngBounds> {
        let first = self.features.first()?.position;
        let mut bounds = LatLngBounds::new(first, first);
        for feature in &self.features[1..] {
            bounds.extend(&feature.position);
        }
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "nc72000001",
                "properties": { "mag": 4.2, "place": "10km NE of Mammoth Lakes, CA" },
                "geometry": { "type": "Point", "coordinates": [-119.663, 37.414, 8.1] }
            },
            {
                "type": "Feature",
                "properties": { "mag": 1.3 },
                "geometry": { "type": "Point", "coordinates": [-121.8, 36.6] }
            },
            {
                "type": "Feature",
                "properties": { "mag": null },
                "geometry": { "type": "Point", "coordinates": [-118.0, 34.0] }
            },
            {
                "type": "Feature",
                "properties": { "mag": 2.0 },
                "geometry": { "type": "LineString", "coordinates": [[-118.0, 34.0], [-117.0, 35.0]] }
            }
        ]
    }"#;

    #[test]
    fn test_geojson_parsing() {
        let quakes = QuakeCollection::from_geojson_str(SAMPLE, "mag").unwrap();
        assert_eq!(quakes.len(), 2);
        assert_eq!(quakes.skipped(), 2);

        let first = quakes.get(0).unwrap();
        assert_eq!(first.position, LatLng::new(37.414, -119.663));
        assert_eq!(first.magnitude, 4.2);
        assert_eq!(first.id, Some(serde_json::json!("nc72000001")));
        assert_eq!(first.label(), "M4.2 10km NE of Mammoth Lakes, CA");
    }

    #[test]
    fn test_max_magnitude_and_bounds() {
        let quakes = QuakeCollection::from_geojson_str(SAMPLE, "mag").unwrap();
        assert_eq!(quakes.max_magnitude(), Some(4.2));

        let bounds = quakes.bounds().unwrap();
        assert_eq!(bounds.south_west, LatLng::new(36.6, -121.8));
        assert_eq!(bounds.north_east, LatLng::new(37.414, -119.663));

        assert_eq!(QuakeCollection::default().max_magnitude(), None);
        assert!(QuakeCollection::default().bounds().is_none());
    }

    #[test]
    fn test_single_feature_is_rejected() {
        let json = r#"{ "type": "Feature", "properties": { "mag": 1.0 },
                        "geometry": { "type": "Point", "coordinates": [0, 0] } }"#;
        let result = QuakeCollection::from_geojson_str(json, "mag");
        assert!(matches!(result, Err(crate::Error::ParseError(_))));
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let result = QuakeCollection::from_geojson_str("[1, 2", "mag");
        assert!(matches!(result, Err(crate::Error::ParseError(_))));
    }

    #[test]
    fn test_custom_magnitude_property() {
        let json = r#"{ "type": "FeatureCollection", "features": [
            { "type": "Feature", "properties": { "ml": 3.3 },
              "geometry": { "type": "Point", "coordinates": [-120.0, 36.0] } } ] }"#;
        let quakes = QuakeCollection::from_geojson_str(json, "ml").unwrap();
        assert_eq!(quakes.len(), 1);
        assert_eq!(quakes.features()[0].magnitude, 3.3);
    }
}
