//! GeoJSON output for region boundaries

use crate::algorithms::circle::GeoCircle;
use crate::core::{LocationPoint, Provider};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    /// Linear rings of `[longitude, latitude]`; the first is the exterior
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    pub id: String,
    pub name: String,
    pub provider: Provider,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonFeature {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: PolygonGeometry,
    pub properties: FeatureProperties,
}

impl PolygonFeature {
    /// Feature whose exterior ring is `circle`, tagged with the location's identity
    pub fn from_circle(location: &LocationPoint, circle: &GeoCircle) -> Self {
        Self {
            kind: "Feature".to_string(),
            geometry: PolygonGeometry {
                kind: "Polygon".to_string(),
                coordinates: vec![circle.coordinates()],
            },
            properties: FeatureProperties {
                id: location.id.clone(),
                name: location.name.clone(),
                provider: location.provider,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<PolygonFeature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<PolygonFeature>) -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            features,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
