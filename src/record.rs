//! GeoJSON-style feature records
//!
//! One [`FeatureRecord`] is built per ingested image and never modified
//! afterwards. It owns the raw image bytes; serializing a record emits the
//! GeoJSON envelope without them.

use serde::Serialize;
use crate::geo::{GeolocationRecord, Yaw};

/// GeoJSON `type` discriminators used by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GeoJsonType {
    Feature,
    FeatureCollection,
    Point,
}

/// Point geometry; `coordinates` is `[longitude, latitude]` or null
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub kind: GeoJsonType,
    pub coordinates: Option<[f64; 2]>,
}

/// Feature properties, named the way stored survey documents name them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureProperties {
    pub filename: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub yaw: Yaw,
    pub msl_alt: Option<f64>,
}

/// The unit persisted per image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    #[serde(rename = "type")]
    kind: GeoJsonType,
    properties: FeatureProperties,
    geometry: PointGeometry,
    #[serde(skip)]
    image_data: Vec<u8>,
}

impl FeatureRecord {
    pub fn properties(&self) -> &FeatureProperties {
        &self.properties
    }

    pub fn geometry(&self) -> &PointGeometry {
        &self.geometry
    }

    pub fn filename(&self) -> &str {
        &self.properties.filename
    }

    /// Raw image bytes as uploaded
    pub fn image_data(&self) -> &[u8] {
        &self.image_data
    }
}

/// Combines a filename, its extracted geolocation and the raw bytes
pub fn assemble(filename: impl Into<String>, geolocation: GeolocationRecord, raw_bytes: Vec<u8>) -> FeatureRecord {
    let coordinates = geolocation
        .position
        .map(|p| [p.longitude, p.latitude]);

    FeatureRecord {
        kind: GeoJsonType::Feature,
        properties: FeatureProperties {
            filename: filename.into(),
            lat: geolocation.latitude(),
            lon: geolocation.longitude(),
            yaw: geolocation.yaw,
            msl_alt: geolocation.altitude_meters,
        },
        geometry: PointGeometry {
            kind: GeoJsonType::Point,
            coordinates,
        },
        image_data: raw_bytes,
    }
}

/// A GeoJSON feature collection borrowing its features
#[derive(Debug, Serialize)]
pub struct FeatureCollection<'a> {
    #[serde(rename = "type")]
    kind: GeoJsonType,
    features: Vec<&'a FeatureRecord>,
}

impl<'a> FeatureCollection<'a> {
    pub fn new(features: impl IntoIterator<Item = &'a FeatureRecord>) -> Self {
        Self {
            kind: GeoJsonType::FeatureCollection,
            features: features.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
