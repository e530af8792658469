use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use crate::geo::Yaw;
use crate::store::StoredFeature;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub inserted: Vec<String>,
    /// Files refused for their extension or name
    pub skipped: Vec<String>,
    pub failed: Vec<UploadFailure>,
}

#[derive(Debug, Serialize)]
pub struct UploadFailure {
    pub filename: String,
    pub error: String,
}

/// Value stored for above-ground-level fields, which are never computed
pub const AGL_UNDEFINED: &str = "undefined";

/// A stored image as returned by the image listing
#[derive(Debug, Serialize)]
pub struct ImageDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub filename: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub yaw: Yaw,
    pub msl_alt: Option<f64>,
    pub agl: &'static str,
    pub agl_feet: &'static str,
    pub image_data_base64: String,
}

impl From<&StoredFeature> for ImageDocument {
    fn from(stored: &StoredFeature) -> Self {
        let properties = stored.record.properties();

        Self {
            id: stored.id.clone(),
            filename: properties.filename.clone(),
            lat: properties.lat,
            lon: properties.lon,
            yaw: properties.yaw,
            msl_alt: properties.msl_alt,
            agl: AGL_UNDEFINED,
            agl_feet: AGL_UNDEFINED,
            image_data_base64: STANDARD.encode(stored.record.image_data()),
        }
    }
}

/// Header of the CSV survey export, matching [`CsvRow`]
pub const CSV_HEADER: [&str; 5] = ["filename", "lat", "lon", "yaw", "msl_alt"];

/// One row of the CSV survey export
#[derive(Debug, Serialize)]
pub struct CsvRow<'a> {
    pub filename: &'a str,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub yaw: Yaw,
    pub msl_alt: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub documents: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
