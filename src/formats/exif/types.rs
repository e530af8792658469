//! EXIF data structures

use std::fmt;
use crate::io::ByteOrder;
use super::ifd::IFD;
use super::tags;

/// The directories found in one EXIF payload
#[derive(Debug)]
pub struct ExifData {
    /// Byte order of the TIFF stream
    pub byte_order: ByteOrder,
    /// IFD0
    pub primary: IFD,
    /// Exif sub-IFD, if present and readable
    pub exif: Option<IFD>,
    /// GPS IFD, if present and readable
    pub gps: Option<IFD>,
}

impl ExifData {
    /// Returns the GPS IFD
    pub fn gps(&self) -> Option<&IFD> {
        self.gps.as_ref()
    }

    /// Returns all IFDs that were read, IFD0 first
    pub fn all_ifds(&self) -> Vec<&IFD> {
        std::iter::once(&self.primary)
            .chain(self.exif.as_ref())
            .chain(self.gps.as_ref())
            .collect()
    }
}

impl fmt::Display for ExifData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "EXIF Information:")?;
        writeln!(
            f,
            "  Byte order: {}",
            match self.byte_order {
                ByteOrder::LittleEndian => "Little-endian (II)",
                ByteOrder::BigEndian => "Big-endian (MM)",
            }
        )?;
        writeln!(f, "  GPS: {}", if self.gps.is_some() { "Yes" } else { "No" })?;

        for ifd in self.all_ifds() {
            writeln!(f, "\n{} ({} entries at offset {}):", ifd.kind, ifd.entry_count(), ifd.offset)?;
            for entry in &ifd.entries {
                writeln!(
                    f,
                    "  Tag {}: {} ({} x {})",
                    entry.tag,
                    ifd.kind.tag_name(entry.tag),
                    entry.count,
                    tags::field_type_name(entry.field_type),
                )?;
            }
        }

        Ok(())
    }
}
