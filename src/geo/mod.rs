//! Geolocation from EXIF GPS metadata
//!
//! Flow: raw bytes -> [`extract`] (DMS [`convert`]ed, then calibrated)
//! -> [`GeolocationRecord`].

pub mod convert;
pub mod calibration;
pub mod extract;

pub use convert::{convert, ConversionError, Hemisphere};
pub use extract::{extract, GeolocationRecord, Position, Yaw};
