//! Synthetic EXIF/JPEG payloads for tests

use std::collections::HashMap;
use crate::io::ByteOrder;
use crate::formats::exif::tags::{self, field_types, gps};

/// A tag value to encode
#[derive(Debug, Clone)]
pub(crate) enum TagValue {
    Ascii(String),
    Rationals(Vec<(u32, u32)>),
    SRationals(Vec<(i32, i32)>),
    Byte(u8),
    Short(u16),
    Long(u32),
    /// Arbitrary bytes under an arbitrary type and count, for malformed tags
    Raw { field_type: u16, count: u32, bytes: Vec<u8> },
}

pub(crate) struct ExifBuilder {
    order: ByteOrder,
    primary: Vec<(u16, TagValue)>,
    exif: Vec<(u16, TagValue)>,
    gps: Vec<(u16, TagValue)>,
    gps_pointer: Option<u32>,
}

impl ExifBuilder {
    pub(crate) fn new(order: ByteOrder) -> Self {
        Self {
            order,
            primary: Vec::new(),
            exif: Vec::new(),
            gps: Vec::new(),
            gps_pointer: None,
        }
    }

    pub(crate) fn primary(mut self, tag: u16, value: TagValue) -> Self {
        self.primary.push((tag, value));
        self
    }

    pub(crate) fn exif(mut self, tag: u16, value: TagValue) -> Self {
        self.exif.push((tag, value));
        self
    }

    pub(crate) fn gps(mut self, tag: u16, value: TagValue) -> Self {
        self.gps.push((tag, value));
        self
    }

    /// Writes this value into the GPS pointer instead of the real offset
    pub(crate) fn gps_pointer_override(mut self, offset: u32) -> Self {
        self.gps_pointer = Some(offset);
        self
    }

    fn encode(&self, value: &TagValue) -> (u16, u32, Vec<u8>) {
        let o = self.order;
        match value {
            TagValue::Ascii(s) => {
                let mut bytes = s.as_bytes().to_vec();
                bytes.push(0);
                (field_types::ASCII, bytes.len() as u32, bytes)
            }
            TagValue::Rationals(values) => {
                let bytes = values
                    .iter()
                    .flat_map(|&(n, d)| o.u32_bytes(n).into_iter().chain(o.u32_bytes(d)))
                    .collect();
                (field_types::RATIONAL, values.len() as u32, bytes)
            }
            TagValue::SRationals(values) => {
                let bytes = values
                    .iter()
                    .flat_map(|&(n, d)| o.u32_bytes(n as u32).into_iter().chain(o.u32_bytes(d as u32)))
                    .collect();
                (field_types::SRATIONAL, values.len() as u32, bytes)
            }
            TagValue::Byte(b) => (field_types::BYTE, 1, vec![*b]),
            TagValue::Short(v) => (field_types::SHORT, 1, o.u16_bytes(*v).to_vec()),
            TagValue::Long(v) => (field_types::LONG, 1, o.u32_bytes(*v).to_vec()),
            TagValue::Raw { field_type, count, bytes } => (*field_type, *count, bytes.clone()),
        }
    }

    /// Appends an IFD plus its value area; returns where each value word sits
    fn write_ifd(&self, buf: &mut Vec<u8>, entries: &[(u16, TagValue)]) -> HashMap<u16, usize> {
        let o = self.order;
        let data_start = buf.len() + 2 + entries.len() * 12 + 4;
        let mut data = Vec::new();
        let mut value_words = HashMap::new();

        buf.extend_from_slice(&o.u16_bytes(entries.len() as u16));
        for (tag, value) in entries {
            let (field_type, count, bytes) = self.encode(value);
            buf.extend_from_slice(&o.u16_bytes(*tag));
            buf.extend_from_slice(&o.u16_bytes(field_type));
            buf.extend_from_slice(&o.u32_bytes(count));
            value_words.insert(*tag, buf.len());

            if bytes.len() <= 4 {
                let mut word = [0u8; 4];
                word[..bytes.len()].copy_from_slice(&bytes);
                buf.extend_from_slice(&word);
            } else {
                buf.extend_from_slice(&o.u32_bytes((data_start + data.len()) as u32));
                data.extend_from_slice(&bytes);
                if data.len() % 2 == 1 {
                    data.push(0);
                }
            }
        }
        buf.extend_from_slice(&o.u32_bytes(0));
        buf.extend_from_slice(&data);

        value_words
    }

    fn patch(&self, buf: &mut [u8], at: usize, value: u32) {
        buf[at..at + 4].copy_from_slice(&self.order.u32_bytes(value));
    }

    /// Builds the TIFF stream that follows `Exif\0\0`
    pub(crate) fn build_tiff(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(match self.order {
            ByteOrder::LittleEndian => b"II",
            ByteOrder::BigEndian => b"MM",
        });
        buf.extend_from_slice(&self.order.u16_bytes(42));
        buf.extend_from_slice(&self.order.u32_bytes(8));

        let mut primary = self.primary.clone();
        if !self.exif.is_empty() {
            primary.push((tags::EXIF_IFD_POINTER, TagValue::Long(0)));
        }
        if !self.gps.is_empty() || self.gps_pointer.is_some() {
            primary.push((tags::GPS_IFD_POINTER, TagValue::Long(self.gps_pointer.unwrap_or(0))));
        }
        let words = self.write_ifd(&mut buf, &primary);

        if !self.exif.is_empty() {
            let offset = buf.len() as u32;
            self.write_ifd(&mut buf, &self.exif);
            self.patch(&mut buf, words[&tags::EXIF_IFD_POINTER], offset);
        }
        if !self.gps.is_empty() && self.gps_pointer.is_none() {
            let offset = buf.len() as u32;
            self.write_ifd(&mut buf, &self.gps);
            self.patch(&mut buf, words[&tags::GPS_IFD_POINTER], offset);
        }

        buf
    }

    /// Wraps the TIFF stream in a minimal JPEG with an APP1 Exif segment
    pub(crate) fn build_jpeg(&self) -> Vec<u8> {
        let tiff = self.build_tiff();
        let mut app1 = b"Exif\0\0".to_vec();
        app1.extend_from_slice(&tiff);

        let mut jpeg = vec![0xFF, 0xD8];
        jpeg.extend_from_slice(&jfif_segment());
        jpeg.extend_from_slice(&[0xFF, 0xE1]);
        jpeg.extend_from_slice(&((app1.len() + 2) as u16).to_be_bytes());
        jpeg.extend_from_slice(&app1);
        jpeg.extend_from_slice(&scan_and_end());
        jpeg
    }
}

fn jfif_segment() -> Vec<u8> {
    let mut segment = vec![0xFF, 0xE0, 0x00, 0x10];
    segment.extend_from_slice(b"JFIF\0");
    segment.extend_from_slice(&[1, 1, 0, 0, 1, 0, 1, 0, 0]);
    segment
}

fn scan_and_end() -> Vec<u8> {
    vec![0xFF, 0xDA, 0x00, 0x02, 0x12, 0x34, 0xFF, 0x00, 0x56, 0xFF, 0xD9]
}

/// A JPEG carrying no APP1 segment at all
pub(crate) fn jpeg_without_exif() -> Vec<u8> {
    let mut jpeg = vec![0xFF, 0xD8];
    jpeg.extend_from_slice(&jfif_segment());
    jpeg.extend_from_slice(&scan_and_end());
    jpeg
}

/// A complete drone-style GPS block
///
/// Latitude 40°30'0" N, longitude 77°30'0" W, heading 123.45°, 350.5 m.
pub(crate) fn drone_gps(order: ByteOrder) -> ExifBuilder {
    ExifBuilder::new(order)
        .primary(tags::MAKE, TagValue::Ascii("DJI".to_string()))
        .primary(tags::MODEL, TagValue::Ascii("FC3411".to_string()))
        .gps(gps::LATITUDE_REF, TagValue::Ascii("N".to_string()))
        .gps(gps::LATITUDE, TagValue::Rationals(vec![(40, 1), (30, 1), (0, 1)]))
        .gps(gps::LONGITUDE_REF, TagValue::Ascii("W".to_string()))
        .gps(gps::LONGITUDE, TagValue::Rationals(vec![(77, 1), (30, 1), (0, 1)]))
        .gps(gps::ALTITUDE_REF, TagValue::Byte(0))
        .gps(gps::ALTITUDE, TagValue::Rationals(vec![(35050, 100)]))
        .gps(gps::IMG_DIRECTION_REF, TagValue::Ascii("T".to_string()))
        .gps(gps::IMG_DIRECTION, TagValue::Rationals(vec![(12345, 100)]))
}

/// The [`drone_gps`] block as a JPEG, little-endian
pub(crate) fn drone_jpeg() -> Vec<u8> {
    drone_gps(ByteOrder::LittleEndian).build_jpeg()
}
