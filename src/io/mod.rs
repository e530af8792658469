//! I/O utilities for geotag_survey
//!
//! Provides the byte-order aware primitives the EXIF reader is built on.

pub mod traits;
pub mod byte_order;

pub use traits::SeekableReader;
pub use byte_order::{ByteOrder, ByteOrderHandler};
