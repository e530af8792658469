//! Image container formats

pub mod jpeg;
pub mod exif;

#[cfg(test)]
pub(crate) mod fixtures;

pub use jpeg::find_exif_payload;
pub use exif::{ExifData, ExifReader, IFD, IFDEntry, IfdKind, TIFF_MAGIC};
