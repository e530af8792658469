//! Tag value reading operations

use std::io::{Read, Seek, SeekFrom};
use crate::error::{Error, Result};
use crate::io::{ByteOrderHandler, SeekableReader};
use crate::formats::exif::IFDEntry;
use crate::formats::exif::tags::field_types;
use crate::types::Rational;

/// Reads typed tag values out of an EXIF TIFF stream
pub struct TagReader<'a> {
    reader: &'a mut dyn SeekableReader,
    handler: &'a dyn ByteOrderHandler,
    len: u64,
}

impl<'a> TagReader<'a> {
    pub fn new(reader: &'a mut dyn SeekableReader, handler: &'a dyn ByteOrderHandler, len: u64) -> Self {
        Self { reader, handler, len }
    }

    /// Reads RATIONAL or SRATIONAL values
    pub fn read_rationals(&mut self, entry: &IFDEntry) -> Result<Vec<Rational>> {
        self.seek_to_tag_data(entry)?;
        let mut values = Vec::with_capacity(entry.count as usize);

        match entry.field_type {
            field_types::RATIONAL => {
                for _ in 0..entry.count {
                    let num = self.handler.read_u32(self.reader)?;
                    let den = self.handler.read_u32(self.reader)?;
                    values.push(Rational::from((num, den)));
                }
            }
            field_types::SRATIONAL => {
                for _ in 0..entry.count {
                    let num = self.handler.read_i32(self.reader)?;
                    let den = self.handler.read_i32(self.reader)?;
                    values.push(Rational::new(num as i64, den as i64));
                }
            }
            other => return Err(Self::unexpected(entry, other)),
        }

        Ok(values)
    }

    /// Reads SHORT or LONG values widened to u32
    pub fn read_u32s(&mut self, entry: &IFDEntry) -> Result<Vec<u32>> {
        self.seek_to_tag_data(entry)?;
        let mut values = Vec::with_capacity(entry.count as usize);

        for _ in 0..entry.count {
            let value = match entry.field_type {
                field_types::SHORT => self.handler.read_u16(self.reader)? as u32,
                field_types::LONG => self.handler.read_u32(self.reader)?,
                other => return Err(Self::unexpected(entry, other)),
            };
            values.push(value);
        }

        Ok(values)
    }

    /// Reads BYTE, SBYTE or UNDEFINED values
    pub fn read_bytes(&mut self, entry: &IFDEntry) -> Result<Vec<u8>> {
        match entry.field_type {
            field_types::BYTE | field_types::SBYTE | field_types::UNDEFINED => self.read_raw(entry),
            other => Err(Self::unexpected(entry, other)),
        }
    }

    /// Reads an ASCII string, dropping the NUL terminator and padding
    pub fn read_ascii(&mut self, entry: &IFDEntry) -> Result<String> {
        if entry.field_type != field_types::ASCII {
            return Err(Self::unexpected(entry, entry.field_type));
        }

        let bytes = self.read_raw(entry)?;
        let s = String::from_utf8_lossy(&bytes)
            .trim_end_matches('\0')
            .trim()
            .to_string();
        Ok(s)
    }

    fn read_raw(&mut self, entry: &IFDEntry) -> Result<Vec<u8>> {
        self.seek_to_tag_data(entry)?;
        let mut bytes = vec![0u8; entry.count as usize];
        self.reader.read_exact(&mut bytes)?;
        Ok(bytes)
    }

    /// Seeks to the first value byte after checking the values fit the stream
    fn seek_to_tag_data(&mut self, entry: &IFDEntry) -> Result<()> {
        let byte_len = entry
            .byte_len()
            .ok_or_else(|| Self::unexpected(entry, entry.field_type))?;

        if entry.data_offset.saturating_add(byte_len) > self.len {
            return Err(Error::OutOfBounds(format!(
                "tag {} needs {} bytes at offset {}, payload is {} bytes",
                entry.tag, byte_len, entry.data_offset, self.len
            )));
        }

        self.reader.seek(SeekFrom::Start(entry.data_offset))?;
        Ok(())
    }

    fn unexpected(entry: &IFDEntry, field_type: u16) -> Error {
        Error::UnexpectedFieldType { tag: entry.tag, field_type }
    }
}
