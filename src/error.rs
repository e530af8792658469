//! Error types for geotag_survey

use std::io;
use thiserror::Error;

/// Result type for geotag_survey operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort reading a single image's metadata container
///
/// Field-level problems (a missing tag, a zero denominator) never show up
/// here; the extractor degrades those fields instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Byte stream is not a JPEG or TIFF container
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Invalid byte order
    #[error("Invalid byte order: 0x{0:04X}")]
    InvalidByteOrder(u16),

    /// Invalid TIFF magic number
    #[error("Invalid TIFF magic number: {0}")]
    InvalidMagic(u16),

    /// IFD offset points outside the EXIF payload
    #[error("Invalid offset: {0}")]
    InvalidOffset(u64),

    /// Out of bounds access
    #[error("Out of bounds: {0}")]
    OutOfBounds(String),

    /// Tag carries a field type the reader cannot interpret as requested
    #[error("Unexpected field type {field_type} for tag {tag}")]
    UnexpectedFieldType { tag: u16, field_type: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidFormat("test".to_string());
        assert_eq!(err.to_string(), "Invalid format: test");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "short read");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_invalid_byte_order() {
        let err = Error::InvalidByteOrder(0x1234);
        assert!(err.to_string().contains("0x1234"));
    }

    #[test]
    fn test_unexpected_field_type() {
        let err = Error::UnexpectedFieldType { tag: 2, field_type: 7 };
        assert_eq!(err.to_string(), "Unexpected field type 7 for tag 2");
    }
}
