//! EXIF metadata support
//!
//! EXIF is a TIFF stream: a byte-order mark, the magic number 42, and a
//! chain of image file directories whose entries point at typed values.

pub mod tags;
pub mod ifd;
pub mod types;
pub mod reader;

pub use ifd::{IFD, IFDEntry, IfdKind};
pub use types::ExifData;
pub use reader::ExifReader;

/// TIFF magic number (42)
pub const TIFF_MAGIC: u16 = 42;
