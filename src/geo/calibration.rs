//! Fixed sensor-bias corrections
//!
//! Applied identically to every record so survey data from different
//! flights stays comparable. Not configurable.

/// Subtracted from every converted latitude, in decimal degrees
pub const LATITUDE_OFFSET: f64 = 0.00004;

/// Subtracted from every converted longitude, in decimal degrees
pub const LONGITUDE_OFFSET: f64 = 0.0;

/// Applies the offsets to a converted latitude/longitude pair
pub fn apply(latitude: f64, longitude: f64) -> (f64, f64) {
    (latitude - LATITUDE_OFFSET, longitude - LONGITUDE_OFFSET)
}
