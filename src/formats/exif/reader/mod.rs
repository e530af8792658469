//! EXIF (TIFF structured) reader

pub mod tags;

use std::io::{Cursor, Seek, SeekFrom};
use tracing::debug;
use crate::error::{Error, Result};
use crate::io::ByteOrder;
use crate::formats::exif::{ExifData, IFD, IFDEntry, IfdKind, TIFF_MAGIC};
use crate::formats::exif::tags as exif_tags;
use crate::types::Rational;

use self::tags::TagReader;

/// Size of one IFD entry in a classic TIFF stream
const ENTRY_SIZE: u64 = 12;

/// Reader over an in-memory EXIF payload (the TIFF stream after `Exif\0\0`)
pub struct ExifReader<'a> {
    cursor: Cursor<&'a [u8]>,
    byte_order: ByteOrder,
    first_ifd_offset: u32,
}

impl<'a> ExifReader<'a> {
    /// Validates the TIFF header and prepares to read directories
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);

        let byte_order = ByteOrder::detect(&mut cursor)?;
        let handler = byte_order.handler();

        let magic = handler.read_u16(&mut cursor)?;
        if magic != TIFF_MAGIC {
            return Err(Error::InvalidMagic(magic));
        }

        let first_ifd_offset = handler.read_u32(&mut cursor)?;

        Ok(Self {
            cursor,
            byte_order,
            first_ifd_offset,
        })
    }

    /// Returns the byte order of the payload
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    fn len(&self) -> u64 {
        self.cursor.get_ref().len() as u64
    }

    /// Reads IFD0 and the Exif and GPS sub-IFDs it points to
    ///
    /// An unreadable IFD0 fails the whole payload. A sub-IFD that cannot be
    /// read is dropped so the rest of the metadata survives.
    pub fn read(&mut self) -> Result<ExifData> {
        let primary = self.read_ifd(IfdKind::Primary, self.first_ifd_offset as u64)?;

        let exif = self.read_sub_ifd(&primary, exif_tags::EXIF_IFD_POINTER, IfdKind::Exif);
        let gps = self.read_sub_ifd(&primary, exif_tags::GPS_IFD_POINTER, IfdKind::Gps);

        Ok(ExifData {
            byte_order: self.byte_order,
            primary,
            exif,
            gps,
        })
    }

    fn read_sub_ifd(&mut self, parent: &IFD, pointer_tag: u16, kind: IfdKind) -> Option<IFD> {
        let offset = parent.pointer(pointer_tag)?;
        match self.read_ifd(kind, offset as u64) {
            Ok(ifd) => Some(ifd),
            Err(e) => {
                debug!("skipping unreadable {} at offset {}: {}", kind, offset, e);
                None
            }
        }
    }

    /// Reads a single IFD at the given offset
    fn read_ifd(&mut self, kind: IfdKind, offset: u64) -> Result<IFD> {
        let len = self.len();
        if offset < 8 || offset + 2 > len {
            return Err(Error::InvalidOffset(offset));
        }

        let handler = self.byte_order.handler();
        self.cursor.seek(SeekFrom::Start(offset))?;

        let entry_count = handler.read_u16(&mut self.cursor)? as u64;
        let entries_end = offset + 2 + entry_count * ENTRY_SIZE;
        if entries_end > len {
            return Err(Error::OutOfBounds(format!(
                "{} at offset {} declares {} entries, payload is {} bytes",
                kind, offset, entry_count, len
            )));
        }

        let mut ifd = IFD::new(kind, offset);

        for _ in 0..entry_count {
            let entry_position = self.cursor.position();
            let tag = handler.read_u16(&mut self.cursor)?;
            let field_type = handler.read_u16(&mut self.cursor)?;
            let count = handler.read_u32(&mut self.cursor)?;
            let value_offset = handler.read_u32(&mut self.cursor)?;

            ifd.add_entry(IFDEntry::new(tag, field_type, count, value_offset, entry_position));
        }

        Ok(ifd)
    }

    fn tag_reader<T>(&mut self, f: impl FnOnce(&mut TagReader<'_>) -> Result<T>) -> Result<T> {
        let len = self.len();
        let handler = self.byte_order.handler();
        let mut tag_reader = TagReader::new(&mut self.cursor, &*handler, len);
        f(&mut tag_reader)
    }

    /// Reads tag values as rationals
    pub fn read_tag_rationals(&mut self, entry: &IFDEntry) -> Result<Vec<Rational>> {
        self.tag_reader(|r| r.read_rationals(entry))
    }

    /// Reads tag values as u32 array
    pub fn read_tag_u32s(&mut self, entry: &IFDEntry) -> Result<Vec<u32>> {
        self.tag_reader(|r| r.read_u32s(entry))
    }

    /// Reads tag values as raw bytes
    pub fn read_tag_bytes(&mut self, entry: &IFDEntry) -> Result<Vec<u8>> {
        self.tag_reader(|r| r.read_bytes(entry))
    }

    /// Reads ASCII string from tag
    pub fn read_tag_ascii(&mut self, entry: &IFDEntry) -> Result<String> {
        self.tag_reader(|r| r.read_ascii(entry))
    }
}
