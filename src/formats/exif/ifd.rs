//! Image File Directory (IFD) structures

use std::collections::HashMap;
use std::fmt;
use super::tags;

/// Which directory an IFD was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IfdKind {
    /// IFD0, the main image directory
    Primary,
    /// Exif sub-IFD reached through tag 34665
    Exif,
    /// GPS IFD reached through tag 34853
    Gps,
}

impl IfdKind {
    /// Resolves a tag number to a name in this directory's namespace
    pub fn tag_name(&self, tag: u16) -> &'static str {
        match self {
            IfdKind::Gps => tags::gps::tag_name(tag),
            IfdKind::Primary | IfdKind::Exif => tags::tag_name(tag),
        }
    }
}

impl fmt::Display for IfdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IfdKind::Primary => write!(f, "IFD0"),
            IfdKind::Exif => write!(f, "Exif IFD"),
            IfdKind::Gps => write!(f, "GPS IFD"),
        }
    }
}

/// Represents an Image File Directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IFDEntry {
    /// Tag identifier
    pub tag: u16,
    /// Field type
    pub field_type: u16,
    /// Number of values
    pub count: u32,
    /// Raw value/offset word as read in the stream's byte order
    pub value_offset: u32,
    /// Position of the first value byte within the TIFF stream
    pub data_offset: u64,
}

impl IFDEntry {
    /// Creates a new IFD entry
    ///
    /// `entry_position` is where this 12-byte entry starts; values of
    /// four bytes or fewer live in its last word.
    pub fn new(tag: u16, field_type: u16, count: u32, value_offset: u32, entry_position: u64) -> Self {
        let mut entry = Self {
            tag,
            field_type,
            count,
            value_offset,
            data_offset: value_offset as u64,
        };
        if entry.is_inline() {
            entry.data_offset = entry_position + 8;
        }
        entry
    }

    /// Returns the size in bytes of this field type
    pub fn field_type_size(&self) -> Option<usize> {
        use super::tags::field_types::*;
        match self.field_type {
            BYTE | ASCII | SBYTE | UNDEFINED => Some(1),
            SHORT | SSHORT => Some(2),
            LONG | SLONG | FLOAT => Some(4),
            RATIONAL | SRATIONAL | DOUBLE => Some(8),
            _ => None,
        }
    }

    /// Total size of the values, if the field type is known
    pub fn byte_len(&self) -> Option<u64> {
        self.field_type_size()
            .map(|size| size as u64 * self.count as u64)
    }

    /// Returns whether the value is stored inline (in the value_offset word)
    pub fn is_inline(&self) -> bool {
        matches!(self.byte_len(), Some(len) if len <= 4)
    }
}

/// Represents an Image File Directory
#[derive(Debug, Clone)]
pub struct IFD {
    /// Directory this IFD was read as
    pub kind: IfdKind,
    /// Offset to this IFD in the TIFF stream
    pub offset: u64,
    /// Entries in this IFD
    pub entries: Vec<IFDEntry>,
    /// Tag map for quick lookup
    tag_map: HashMap<u16, usize>,
}

impl IFD {
    /// Creates a new IFD
    pub fn new(kind: IfdKind, offset: u64) -> Self {
        Self {
            kind,
            offset,
            entries: Vec::new(),
            tag_map: HashMap::new(),
        }
    }

    /// Adds an entry to this IFD
    pub fn add_entry(&mut self, entry: IFDEntry) {
        let index = self.entries.len();
        self.tag_map.insert(entry.tag, index);
        self.entries.push(entry);
    }

    /// Gets an entry by tag
    pub fn get_entry(&self, tag: u16) -> Option<&IFDEntry> {
        self.tag_map.get(&tag).and_then(|&idx| self.entries.get(idx))
    }

    /// Returns whether the tag is present
    pub fn contains(&self, tag: u16) -> bool {
        self.tag_map.contains_key(&tag)
    }

    /// Reads a sub-IFD pointer stored as a single LONG
    pub fn pointer(&self, tag: u16) -> Option<u32> {
        self.get_entry(tag)
            .filter(|e| e.field_type == tags::field_types::LONG && e.count == 1)
            .map(|e| e.value_offset)
    }

    /// Returns number of entries
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}
