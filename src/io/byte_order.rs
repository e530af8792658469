//! Byte order (endianness) handling
//!
//! EXIF data is a TIFF stream and may be written in either byte order;
//! every multi-byte word after the header is read through a handler
//! chosen from the first two bytes.

use std::io::Result;
use crate::error::{Error, Result as ExifResult};
use crate::io::SeekableReader;

/// Represents the byte order (endianness) of binary data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian byte order ("II", Intel)
    LittleEndian,
    /// Big-endian byte order ("MM", Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Detects byte order from TIFF magic bytes
    pub fn from_tiff_magic(magic: [u8; 2]) -> Option<Self> {
        match &magic {
            b"II" => Some(ByteOrder::LittleEndian),
            b"MM" => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }

    /// Reads the first 2 bytes of a TIFF stream and identifies its byte order
    pub fn detect<R: SeekableReader>(reader: &mut R) -> ExifResult<Self> {
        let mut magic = [0u8; 2];
        reader.read_exact(&mut magic)?;

        Self::from_tiff_magic(magic)
            .ok_or_else(|| Error::InvalidByteOrder(u16::from_be_bytes(magic)))
    }

    /// Creates a handler for this byte order
    pub fn handler(&self) -> Box<dyn ByteOrderHandler> {
        match self {
            ByteOrder::LittleEndian => Box::new(LittleEndian),
            ByteOrder::BigEndian => Box::new(BigEndian),
        }
    }

    /// Encodes a u16 in this byte order
    pub fn u16_bytes(&self, value: u16) -> [u8; 2] {
        match self {
            ByteOrder::LittleEndian => value.to_le_bytes(),
            ByteOrder::BigEndian => value.to_be_bytes(),
        }
    }

    /// Encodes a u32 in this byte order
    pub fn u32_bytes(&self, value: u32) -> [u8; 4] {
        match self {
            ByteOrder::LittleEndian => value.to_le_bytes(),
            ByteOrder::BigEndian => value.to_be_bytes(),
        }
    }
}

/// Trait for reading typed values with specific byte order
pub trait ByteOrderHandler: Send + Sync {
    /// Reads an unsigned 16-bit integer
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16>;

    /// Reads an unsigned 32-bit integer
    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32>;

    /// Reads a signed 32-bit integer
    fn read_i32(&self, reader: &mut dyn SeekableReader) -> Result<i32>;
}

struct LittleEndian;

impl ByteOrderHandler for LittleEndian {
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16> {
        let mut buf = [0u8; 2];
        reader.read_exact(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32> {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn read_i32(&self, reader: &mut dyn SeekableReader) -> Result<i32> {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        Ok(i32::from_le_bytes(buf))
    }
}

struct BigEndian;

impl ByteOrderHandler for BigEndian {
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16> {
        let mut buf = [0u8; 2];
        reader.read_exact(&mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32> {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }

    fn read_i32(&self, reader: &mut dyn SeekableReader) -> Result<i32> {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        Ok(i32::from_be_bytes(buf))
    }
}
