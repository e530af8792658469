//! JPEG container walking
//!
//! Only the marker segments ahead of the first scan are visited; the
//! entropy-coded image data is never decoded.

use crate::error::{Error, Result};

/// Start of image
const SOI: u8 = 0xD8;
/// End of image
const EOI: u8 = 0xD9;
/// Start of scan
const SOS: u8 = 0xDA;
/// APP1, where EXIF lives
const APP1: u8 = 0xE1;
/// Temporary marker, no length
const TEM: u8 = 0x01;

/// Identifier that opens an EXIF APP1 segment
pub const EXIF_HEADER: &[u8; 6] = b"Exif\0\0";

/// Returns the TIFF stream of the first EXIF APP1 segment
///
/// A bare TIFF stream is returned as-is. `Ok(None)` means the container is
/// a valid JPEG that simply has no EXIF segment. Anything that is neither
/// JPEG nor TIFF, or a JPEG whose marker segments run past the end of the
/// buffer, is an error.
pub fn find_exif_payload(data: &[u8]) -> Result<Option<&[u8]>> {
    if data.starts_with(b"II*\0") || data.starts_with(b"MM\0*") {
        return Ok(Some(data));
    }

    if data.len() < 2 || data[0] != 0xFF || data[1] != SOI {
        return Err(Error::InvalidFormat("not a JPEG or TIFF stream".to_string()));
    }

    let mut pos = 2;
    loop {
        if pos >= data.len() {
            return Err(Error::InvalidFormat("JPEG ended before any scan".to_string()));
        }
        if data[pos] != 0xFF {
            return Err(Error::InvalidFormat(format!(
                "expected JPEG marker at offset {}, found 0x{:02X}",
                pos, data[pos]
            )));
        }

        // Markers may be preceded by any number of 0xFF fill bytes.
        while pos < data.len() && data[pos] == 0xFF {
            pos += 1;
        }
        let Some(&marker) = data.get(pos) else {
            return Err(Error::InvalidFormat("JPEG ended inside a marker".to_string()));
        };
        pos += 1;

        match marker {
            SOS | EOI => return Ok(None),
            TEM | 0xD0..=0xD7 => continue,
            _ => {}
        }

        let length = data
            .get(pos..pos + 2)
            .map(|b| u16::from_be_bytes([b[0], b[1]]) as usize)
            .ok_or_else(|| Error::InvalidFormat("JPEG ended inside a segment length".to_string()))?;
        if length < 2 {
            return Err(Error::InvalidFormat(format!(
                "JPEG segment 0x{:02X} has invalid length {}",
                marker, length
            )));
        }

        let segment = data.get(pos + 2..pos + length).ok_or_else(|| {
            Error::OutOfBounds(format!(
                "JPEG segment 0x{:02X} of {} bytes at offset {} overruns {} byte buffer",
                marker, length, pos, data.len()
            ))
        })?;

        if marker == APP1 && segment.starts_with(EXIF_HEADER) {
            return Ok(Some(&segment[EXIF_HEADER.len()..]));
        }

        pos += length;
    }
}
