//! Geolocation extraction from EXIF GPS tags
//!
//! Every field is read independently. A tag that is missing, has the wrong
//! type, points outside the payload, or holds a zero denominator degrades
//! only its own field; the rest of the record is still produced. The only
//! errors returned are those that make the container itself unreadable.

use std::fmt;
use serde::{Serialize, Serializer};
use tracing::debug;
use crate::error::Result;
use crate::formats::{find_exif_payload, ExifData, ExifReader, IFD};
use crate::formats::exif::tags::gps;
use super::calibration;
use super::convert::convert;

/// A calibrated latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// Capture heading in decimal degrees
///
/// Serializes as a number, or as the string `"Unknown"` when the heading
/// could not be read. Downstream consumers rely on that string.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Yaw {
    Degrees(f64),
    #[default]
    Unknown,
}

impl Yaw {
    /// Returns the heading, if known
    pub fn degrees(&self) -> Option<f64> {
        match self {
            Yaw::Degrees(d) => Some(*d),
            Yaw::Unknown => None,
        }
    }
}

impl fmt::Display for Yaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Yaw::Degrees(d) => write!(f, "{}", d),
            Yaw::Unknown => write!(f, "Unknown"),
        }
    }
}

impl Serialize for Yaw {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Yaw::Degrees(d) => serializer.serialize_f64(*d),
            Yaw::Unknown => serializer.serialize_str("Unknown"),
        }
    }
}

/// Normalized geolocation of one image
///
/// Latitude and longitude live together in `position`, so one can never be
/// present without the other.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeolocationRecord {
    pub position: Option<Position>,
    pub yaw: Yaw,
    /// Meters relative to sea level; `None` means no reading, not a failure
    pub altitude_meters: Option<f64>,
}

impl GeolocationRecord {
    /// The record for an image with no usable GPS data
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn latitude(&self) -> Option<f64> {
        self.position.map(|p| p.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.position.map(|p| p.longitude)
    }
}

impl Serialize for GeolocationRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Flat {
            latitude: Option<f64>,
            longitude: Option<f64>,
            yaw: Yaw,
            altitude_meters: Option<f64>,
        }

        Flat {
            latitude: self.latitude(),
            longitude: self.longitude(),
            yaw: self.yaw,
            altitude_meters: self.altitude_meters,
        }
        .serialize(serializer)
    }
}

/// Extracts the geolocation record from raw image bytes
///
/// Fails only when the bytes are not a parseable JPEG/TIFF container. A
/// JPEG without an EXIF segment, with an unreadable one, or without GPS
/// tags yields [`GeolocationRecord::unknown`].
pub fn extract(raw_bytes: &[u8]) -> Result<GeolocationRecord> {
    let Some(payload) = find_exif_payload(raw_bytes)? else {
        debug!("no EXIF segment found");
        return Ok(GeolocationRecord::unknown());
    };

    // A bare TIFF stream is the container itself, so its header errors are fatal.
    let embedded = payload.len() < raw_bytes.len();

    match read_exif(payload) {
        Ok((mut reader, exif)) => Ok(extract_from(&mut reader, &exif)),
        Err(e) if embedded => {
            debug!("EXIF segment unreadable: {}", e);
            Ok(GeolocationRecord::unknown())
        }
        Err(e) => Err(e),
    }
}

fn read_exif(payload: &[u8]) -> Result<(ExifReader<'_>, ExifData)> {
    let mut reader = ExifReader::new(payload)?;
    let exif = reader.read()?;
    Ok((reader, exif))
}

/// Builds the record from already-parsed EXIF directories
pub fn extract_from(reader: &mut ExifReader<'_>, exif: &ExifData) -> GeolocationRecord {
    let Some(gps_ifd) = exif.gps() else {
        debug!("no GPS IFD present");
        return GeolocationRecord::unknown();
    };

    GeolocationRecord {
        position: read_position(reader, gps_ifd),
        yaw: read_yaw(reader, gps_ifd),
        altitude_meters: read_altitude(reader, gps_ifd),
    }
}

/// Unwraps a field read, logging and dropping the error
fn field<T>(name: &str, result: Result<T>) -> Option<T> {
    result
        .map_err(|e| debug!("{} unreadable: {}", name, e))
        .ok()
}

fn read_position(reader: &mut ExifReader<'_>, gps_ifd: &IFD) -> Option<Position> {
    let latitude = read_coordinate(reader, gps_ifd, gps::LATITUDE, gps::LATITUDE_REF)?;
    let longitude = read_coordinate(reader, gps_ifd, gps::LONGITUDE, gps::LONGITUDE_REF)?;

    let (latitude, longitude) = calibration::apply(latitude, longitude);
    Some(Position { latitude, longitude })
}

fn read_coordinate(reader: &mut ExifReader<'_>, gps_ifd: &IFD, value_tag: u16, ref_tag: u16) -> Option<f64> {
    let value_entry = gps_ifd.get_entry(value_tag)?;
    let ref_entry = gps_ifd.get_entry(ref_tag)?;
    let name = gps::tag_name(value_tag);

    let dms = field(name, reader.read_tag_rationals(value_entry))?;
    let hemisphere = field(gps::tag_name(ref_tag), reader.read_tag_ascii(ref_entry))?;

    convert(&dms, &hemisphere)
        .map_err(|e| debug!("{} not convertible: {}", name, e))
        .ok()
}

fn read_yaw(reader: &mut ExifReader<'_>, gps_ifd: &IFD) -> Yaw {
    gps_ifd
        .get_entry(gps::IMG_DIRECTION)
        .and_then(|entry| field("GPSImgDirection", reader.read_tag_rationals(entry)))
        .and_then(|values| values.first().and_then(|r| r.to_f64()))
        .map(Yaw::Degrees)
        .unwrap_or(Yaw::Unknown)
}

fn read_altitude(reader: &mut ExifReader<'_>, gps_ifd: &IFD) -> Option<f64> {
    let entry = gps_ifd.get_entry(gps::ALTITUDE)?;
    let meters = field("GPSAltitude", reader.read_tag_rationals(entry))?
        .first()
        .and_then(|r| r.to_f64())?;

    let below_sea_level = gps_ifd
        .get_entry(gps::ALTITUDE_REF)
        .and_then(|entry| field("GPSAltitudeRef", reader.read_tag_bytes(entry)))
        .is_some_and(|bytes| bytes.first() == Some(&1));

    Some(if below_sea_level { -meters } else { meters })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::formats::fixtures::{self, ExifBuilder, TagValue};
    use crate::formats::exif::tags::{self, field_types};
    use crate::io::ByteOrder;

    const LAT: f64 = 40.5 - calibration::LATITUDE_OFFSET;
    const LON: f64 = -77.5 - calibration::LONGITUDE_OFFSET;

    fn without(order: ByteOrder, skip: &[u16]) -> ExifBuilder {
        let full = [
            (gps::LATITUDE_REF, TagValue::Ascii("N".to_string())),
            (gps::LATITUDE, TagValue::Rationals(vec![(40, 1), (30, 1), (0, 1)])),
            (gps::LONGITUDE_REF, TagValue::Ascii("W".to_string())),
            (gps::LONGITUDE, TagValue::Rationals(vec![(77, 1), (30, 1), (0, 1)])),
            (gps::ALTITUDE, TagValue::Rationals(vec![(35050, 100)])),
            (gps::IMG_DIRECTION, TagValue::Rationals(vec![(12345, 100)])),
        ];

        full.into_iter()
            .filter(|(tag, _)| !skip.contains(tag))
            .fold(ExifBuilder::new(order), |b, (tag, value)| b.gps(tag, value))
    }

    #[test]
    fn test_full_drone_record() {
        for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
            let record = extract(&fixtures::drone_gps(order).build_jpeg()).unwrap();

            assert_eq!(record.latitude(), Some(LAT));
            assert_eq!(record.longitude(), Some(LON));
            assert_eq!(record.yaw, Yaw::Degrees(123.45));
            assert_eq!(record.altitude_meters, Some(350.5));
        }
    }

    #[test]
    fn test_no_gps_tags_at_all() {
        let jpeg = ExifBuilder::new(ByteOrder::LittleEndian)
            .primary(tags::MAKE, TagValue::Ascii("DJI".to_string()))
            .build_jpeg();

        let record = extract(&jpeg).unwrap();
        assert_eq!(record, GeolocationRecord::unknown());
        assert_eq!(record.latitude(), None);
        assert_eq!(record.longitude(), None);
        assert_eq!(record.yaw, Yaw::Unknown);
        assert_eq!(record.altitude_meters, None);
    }

    #[test]
    fn test_no_exif_segment() {
        assert_eq!(extract(&fixtures::jpeg_without_exif()).unwrap(), GeolocationRecord::unknown());
    }

    #[test]
    fn test_unparseable_container_fails() {
        assert!(matches!(extract(b"definitely not an image"), Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_damaged_exif_segment_yields_unknown() {
        let mut jpeg = fixtures::drone_jpeg();
        let tiff_start = jpeg.windows(6).position(|w| w == b"Exif\0\0").unwrap() + 6;
        jpeg[tiff_start] = b'X';
        jpeg[tiff_start + 1] = b'X';

        assert_eq!(extract(&jpeg).unwrap(), GeolocationRecord::unknown());
    }

    #[test]
    fn test_damaged_bare_tiff_fails() {
        let mut tiff = fixtures::drone_gps(ByteOrder::LittleEndian).build_tiff();
        tiff[4..8].copy_from_slice(&[0xFF; 4]);

        assert!(matches!(extract(&tiff), Err(Error::InvalidOffset(_))));
    }

    #[test]
    fn test_latitude_without_longitude_drops_both() {
        let jpeg = without(ByteOrder::LittleEndian, &[gps::LONGITUDE]).build_jpeg();
        let record = extract(&jpeg).unwrap();

        assert_eq!(record.position, None);
        assert_eq!(record.yaw, Yaw::Degrees(123.45));
        assert_eq!(record.altitude_meters, Some(350.5));
    }

    #[test]
    fn test_longitude_without_latitude_drops_both() {
        let jpeg = without(ByteOrder::BigEndian, &[gps::LATITUDE, gps::LATITUDE_REF]).build_jpeg();
        let record = extract(&jpeg).unwrap();

        assert_eq!(record.latitude(), None);
        assert_eq!(record.longitude(), None);
    }

    #[test]
    fn test_missing_reference_drops_position() {
        let jpeg = without(ByteOrder::LittleEndian, &[gps::LONGITUDE_REF]).build_jpeg();
        assert_eq!(extract(&jpeg).unwrap().position, None);
    }

    #[test]
    fn test_zero_denominator_in_longitude_drops_both() {
        let jpeg = without(ByteOrder::LittleEndian, &[gps::LONGITUDE])
            .gps(gps::LONGITUDE, TagValue::Rationals(vec![(77, 1), (30, 0), (0, 1)]))
            .build_jpeg();
        let record = extract(&jpeg).unwrap();

        assert_eq!(record.position, None);
        assert_eq!(record.yaw, Yaw::Degrees(123.45));
    }

    #[test]
    fn test_invalid_hemisphere_drops_position() {
        let jpeg = without(ByteOrder::LittleEndian, &[gps::LATITUDE_REF])
            .gps(gps::LATITUDE_REF, TagValue::Ascii("Q".to_string()))
            .build_jpeg();

        assert_eq!(extract(&jpeg).unwrap().position, None);
    }

    #[test]
    fn test_truncated_latitude_triple_drops_position() {
        let jpeg = without(ByteOrder::LittleEndian, &[gps::LATITUDE])
            .gps(gps::LATITUDE, TagValue::Rationals(vec![(40, 1), (30, 1)]))
            .build_jpeg();

        assert_eq!(extract(&jpeg).unwrap().position, None);
    }

    #[test]
    fn test_altitude_zero_denominator_is_absent() {
        let jpeg = without(ByteOrder::LittleEndian, &[gps::ALTITUDE])
            .gps(gps::ALTITUDE, TagValue::Rationals(vec![(35050, 0)]))
            .build_jpeg();
        let record = extract(&jpeg).unwrap();

        assert_eq!(record.altitude_meters, None);
        assert_eq!(record.latitude(), Some(LAT));
    }

    #[test]
    fn test_yaw_zero_denominator_is_unknown() {
        let jpeg = without(ByteOrder::LittleEndian, &[gps::IMG_DIRECTION])
            .gps(gps::IMG_DIRECTION, TagValue::Rationals(vec![(90, 0)]))
            .build_jpeg();
        let record = extract(&jpeg).unwrap();

        assert_eq!(record.yaw, Yaw::Unknown);
        assert!(record.position.is_some());
    }

    #[test]
    fn test_yaw_degrees() {
        assert_eq!(extract(&fixtures::drone_jpeg()).unwrap().yaw.degrees(), Some(123.45));
        assert_eq!(Yaw::Unknown.degrees(), None);
    }

    #[test]
    fn test_yaw_wrong_type_is_unknown() {
        let jpeg = without(ByteOrder::LittleEndian, &[gps::IMG_DIRECTION])
            .gps(gps::IMG_DIRECTION, TagValue::Ascii("north".to_string()))
            .build_jpeg();

        assert_eq!(extract(&jpeg).unwrap().yaw, Yaw::Unknown);
    }

    #[test]
    fn test_value_pointing_outside_payload_degrades_field() {
        let jpeg = without(ByteOrder::LittleEndian, &[gps::ALTITUDE])
            .gps(gps::ALTITUDE, TagValue::Raw {
                field_type: field_types::RATIONAL,
                count: 1000,
                bytes: vec![0; 8],
            })
            .build_jpeg();
        let record = extract(&jpeg).unwrap();

        assert_eq!(record.altitude_meters, None);
        assert_eq!(record.yaw, Yaw::Degrees(123.45));
    }

    #[test]
    fn test_below_sea_level_altitude() {
        let jpeg = without(ByteOrder::BigEndian, &[])
            .gps(gps::ALTITUDE_REF, TagValue::Byte(1))
            .build_jpeg();

        assert_eq!(extract(&jpeg).unwrap().altitude_meters, Some(-350.5));
    }

    #[test]
    fn test_signed_rationals_are_accepted() {
        let jpeg = without(ByteOrder::LittleEndian, &[gps::ALTITUDE])
            .gps(gps::ALTITUDE, TagValue::SRationals(vec![(1201, 2)]))
            .build_jpeg();

        assert_eq!(extract(&jpeg).unwrap().altitude_meters, Some(600.5));
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let jpeg = fixtures::drone_jpeg();
        assert_eq!(extract(&jpeg).unwrap(), extract(&jpeg).unwrap());
    }

    #[test]
    fn test_bare_tiff_input() {
        let tiff = fixtures::drone_gps(ByteOrder::BigEndian).build_tiff();
        assert_eq!(extract(&tiff).unwrap().latitude(), Some(LAT));
    }

    #[test]
    fn test_serialization_shape() {
        let json = serde_json::to_value(GeolocationRecord::unknown()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "latitude": null,
                "longitude": null,
                "yaw": "Unknown",
                "altitude_meters": null,
            })
        );

        let json = serde_json::to_value(extract(&fixtures::drone_jpeg()).unwrap()).unwrap();
        assert_eq!(json["yaw"], serde_json::json!(123.45));
        assert_eq!(json["longitude"], serde_json::json!(-77.5));
    }
}
