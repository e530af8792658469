//! EXIF tag constants
//!
//! Tag numbers are only unique within their directory: GPS tag 2 is
//! GPSLatitude, while tag 2 in IFD0 means nothing. Primary/Exif IFD tags
//! live at the top of this module and GPS IFD tags in [`gps`].

/// Camera manufacturer
pub const MAKE: u16 = 271;

/// Camera model
pub const MODEL: u16 = 272;

/// Image orientation
pub const ORIENTATION: u16 = 274;

/// Software
pub const SOFTWARE: u16 = 305;

/// Date/time of last modification
pub const DATE_TIME: u16 = 306;

/// Offset of the Exif sub-IFD
pub const EXIF_IFD_POINTER: u16 = 34665;

/// Offset of the GPS IFD
pub const GPS_IFD_POINTER: u16 = 34853;

/// Date/time the image was captured (Exif IFD)
pub const DATE_TIME_ORIGINAL: u16 = 36867;

/// Returns the name of a primary or Exif IFD tag
pub fn tag_name(tag: u16) -> &'static str {
    match tag {
        MAKE => "Make",
        MODEL => "Model",
        ORIENTATION => "Orientation",
        SOFTWARE => "Software",
        DATE_TIME => "DateTime",
        EXIF_IFD_POINTER => "ExifIFDPointer",
        GPS_IFD_POINTER => "GPSInfoIFDPointer",
        DATE_TIME_ORIGINAL => "DateTimeOriginal",
        _ => "Unknown",
    }
}

/// GPS IFD tag constants
pub mod gps {
    /// GPS tag version
    pub const VERSION_ID: u16 = 0;

    /// North or south latitude ("N" / "S")
    pub const LATITUDE_REF: u16 = 1;

    /// Latitude as three RATIONALs (degrees, minutes, seconds)
    pub const LATITUDE: u16 = 2;

    /// East or west longitude ("E" / "W")
    pub const LONGITUDE_REF: u16 = 3;

    /// Longitude as three RATIONALs (degrees, minutes, seconds)
    pub const LONGITUDE: u16 = 4;

    /// Altitude reference (0 = above sea level, 1 = below)
    pub const ALTITUDE_REF: u16 = 5;

    /// Altitude in meters, one RATIONAL
    pub const ALTITUDE: u16 = 6;

    /// UTC time of the fix
    pub const TIME_STAMP: u16 = 7;

    /// Satellites used for the fix
    pub const SATELLITES: u16 = 8;

    /// Reference for the image direction ("T" true / "M" magnetic)
    pub const IMG_DIRECTION_REF: u16 = 16;

    /// Direction of the image when captured, one RATIONAL in degrees
    pub const IMG_DIRECTION: u16 = 17;

    /// Geodetic survey datum
    pub const MAP_DATUM: u16 = 18;

    /// UTC date of the fix
    pub const DATE_STAMP: u16 = 29;

    /// Returns the name of a GPS IFD tag
    pub fn tag_name(tag: u16) -> &'static str {
        match tag {
            VERSION_ID => "GPSVersionID",
            LATITUDE_REF => "GPSLatitudeRef",
            LATITUDE => "GPSLatitude",
            LONGITUDE_REF => "GPSLongitudeRef",
            LONGITUDE => "GPSLongitude",
            ALTITUDE_REF => "GPSAltitudeRef",
            ALTITUDE => "GPSAltitude",
            TIME_STAMP => "GPSTimeStamp",
            SATELLITES => "GPSSatellites",
            IMG_DIRECTION_REF => "GPSImgDirectionRef",
            IMG_DIRECTION => "GPSImgDirection",
            MAP_DATUM => "GPSMapDatum",
            DATE_STAMP => "GPSDateStamp",
            _ => "Unknown",
        }
    }
}

/// Field type constants
pub mod field_types {
    /// BYTE (8-bit unsigned)
    pub const BYTE: u16 = 1;

    /// ASCII string
    pub const ASCII: u16 = 2;

    /// SHORT (16-bit unsigned)
    pub const SHORT: u16 = 3;

    /// LONG (32-bit unsigned)
    pub const LONG: u16 = 4;

    /// RATIONAL (two LONGs: numerator, denominator)
    pub const RATIONAL: u16 = 5;

    /// SBYTE (8-bit signed)
    pub const SBYTE: u16 = 6;

    /// UNDEFINED (8-bit)
    pub const UNDEFINED: u16 = 7;

    /// SSHORT (16-bit signed)
    pub const SSHORT: u16 = 8;

    /// SLONG (32-bit signed)
    pub const SLONG: u16 = 9;

    /// SRATIONAL (two SLONGs)
    pub const SRATIONAL: u16 = 10;

    /// FLOAT (32-bit IEEE float)
    pub const FLOAT: u16 = 11;

    /// DOUBLE (64-bit IEEE double)
    pub const DOUBLE: u16 = 12;
}

/// Returns the name of a field type
pub fn field_type_name(field_type: u16) -> &'static str {
    match field_type {
        field_types::BYTE => "BYTE",
        field_types::ASCII => "ASCII",
        field_types::SHORT => "SHORT",
        field_types::LONG => "LONG",
        field_types::RATIONAL => "RATIONAL",
        field_types::SBYTE => "SBYTE",
        field_types::UNDEFINED => "UNDEFINED",
        field_types::SSHORT => "SSHORT",
        field_types::SLONG => "SLONG",
        field_types::SRATIONAL => "SRATIONAL",
        field_types::FLOAT => "FLOAT",
        field_types::DOUBLE => "DOUBLE",
        _ => "Unknown",
    }
}
