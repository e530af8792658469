//! Core I/O traits

use std::io::{Read, Seek};

/// Trait for readers that support both reading and seeking operations
///
/// EXIF payloads are always held in memory, so in practice this is a
/// `Cursor<&[u8]>`, but tag readers only depend on this trait.
pub trait SeekableReader: Read + Seek + Send + Sync {}

impl<T: Read + Seek + Send + Sync> SeekableReader for T {}
