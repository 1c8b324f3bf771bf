//! # Handover Records

use crate::tag::{Tag, UnknownTag};
use crate::{u16_at, u32_at, u64_at};
use core::fmt;
use kernel_memory_addresses::LowAddress;

/// Size of one record in bytes.
pub const RECORD_SIZE: usize = 32;

/// Reference to a NUL-terminated string inside the payload.
///
/// The value is a byte offset from the start of the payload; resolve it with
/// [`Payload::resolve`](crate::Payload::resolve).
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct StrRef(pub u32);

/// Framebuffer pixel layout as reported by the bootloader.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PixelFormat {
    Rgbx8888,
    Bgrx8888,
    Other(u16),
}

impl PixelFormat {
    pub const RGBX8888: u16 = 0x7451;
    pub const BGRX8888: u16 = 0xd040;

    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        match raw {
            Self::RGBX8888 => Self::Rgbx8888,
            Self::BGRX8888 => Self::Bgrx8888,
            other => Self::Other(other),
        }
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        match self {
            Self::Rgbx8888 => Self::RGBX8888,
            Self::Bgrx8888 => Self::BGRX8888,
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgbx8888 => f.write_str("RGBX8888"),
            Self::Bgrx8888 => f.write_str("BGRX8888"),
            Self::Other(raw) => write!(f, "{raw:#x}"),
        }
    }
}

/// One decoded handover record.
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 4    | `tag` |
/// | 4      | 4    | `flags` |
/// | 8      | 8    | `start` |
/// | 16     | 8    | `size` |
/// | 24     | 8    | tag-dependent |
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Record {
    /// Raw tag; see [`Record::kind`].
    pub tag: u32,
    pub flags: u32,
    /// Start of the described resource, in the bootloader's address space.
    pub start: LowAddress,
    pub size: u64,
    /// The tag-dependent area, undecoded.
    pub extra: [u8; 8],
}

impl Record {
    /// Decode a record from its wire representation.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; RECORD_SIZE]) -> Self {
        let mut extra = [0u8; 8];
        extra.copy_from_slice(&bytes[24..32]);
        Self {
            tag: u32_at(bytes, 0),
            flags: u32_at(bytes, 4),
            start: LowAddress::new(u64_at(bytes, 8)),
            size: u64_at(bytes, 16),
            extra,
        }
    }

    /// Encode the record into its wire representation.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut out = [0u8; RECORD_SIZE];
        out[0..4].copy_from_slice(&self.tag.to_le_bytes());
        out[4..8].copy_from_slice(&self.flags.to_le_bytes());
        out[8..16].copy_from_slice(&self.start.as_u64().to_le_bytes());
        out[16..24].copy_from_slice(&self.size.to_le_bytes());
        out[24..32].copy_from_slice(&self.extra);
        out
    }

    /// The record's tag, if it is one of the known kinds.
    ///
    /// # Errors
    /// Returns [`UnknownTag`] for tags outside the known set.
    pub fn kind(&self) -> Result<Tag, UnknownTag> {
        Tag::try_from(self.tag)
    }

    /// One past the last byte of the described resource.
    #[must_use]
    pub const fn end(&self) -> LowAddress {
        self.start.offset(self.size)
    }

    /// The tag-dependent area read as a single opaque value.
    #[must_use]
    pub fn more(&self) -> u64 {
        u64::from_le_bytes(self.extra)
    }

    /// View the record as a framebuffer descriptor.
    #[must_use]
    pub fn as_framebuffer(&self) -> Option<FramebufferRecord> {
        if self.tag != Tag::Framebuffer.raw() {
            return None;
        }
        Some(FramebufferRecord {
            start: self.start,
            size: self.size,
            width: u16_at(&self.extra, 0),
            height: u16_at(&self.extra, 2),
            pitch: u16_at(&self.extra, 4),
            format: PixelFormat::from_raw(u16_at(&self.extra, 6)),
        })
    }

    /// View the record as a loaded file.
    #[must_use]
    pub fn as_file(&self) -> Option<FileRecord> {
        if self.tag != Tag::File.raw() {
            return None;
        }
        Some(FileRecord {
            start: self.start,
            size: self.size,
            name: StrRef(u32_at(&self.extra, 0)),
            meta: u32_at(&self.extra, 4),
        })
    }
}

/// A `FB` record: a linear framebuffer of 32-bit pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FramebufferRecord {
    pub start: LowAddress,
    pub size: u64,
    /// Visible width in pixels.
    pub width: u16,
    /// Visible height in pixels.
    pub height: u16,
    /// Bytes between the starts of two consecutive rows.
    pub pitch: u16,
    pub format: PixelFormat,
}

impl FramebufferRecord {
    /// The record this descriptor encodes.
    #[must_use]
    pub fn to_record(&self, flags: u32) -> Record {
        let mut extra = [0u8; 8];
        extra[0..2].copy_from_slice(&self.width.to_le_bytes());
        extra[2..4].copy_from_slice(&self.height.to_le_bytes());
        extra[4..6].copy_from_slice(&self.pitch.to_le_bytes());
        extra[6..8].copy_from_slice(&self.format.raw().to_le_bytes());
        Record {
            tag: Tag::Framebuffer.raw(),
            flags,
            start: self.start,
            size: self.size,
            extra,
        }
    }
}

/// A `FILE` record: a file the bootloader loaded into memory.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FileRecord {
    pub start: LowAddress,
    /// File length in bytes.
    pub size: u64,
    pub name: StrRef,
    pub meta: u32,
}

impl FileRecord {
    /// The record this descriptor encodes.
    #[must_use]
    pub fn to_record(&self, flags: u32) -> Record {
        let mut extra = [0u8; 8];
        extra[0..4].copy_from_slice(&self.name.0.to_le_bytes());
        extra[4..8].copy_from_slice(&self.meta.to_le_bytes());
        Record {
            tag: Tag::File.raw(),
            flags,
            start: self.start,
            size: self.size,
            extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_read_at_their_offsets() {
        let mut bytes = [0u8; RECORD_SIZE];
        bytes[0..4].copy_from_slice(&0xe2d5_5685u32.to_le_bytes());
        bytes[4..8].copy_from_slice(&7u32.to_le_bytes());
        bytes[8..16].copy_from_slice(&0xfd00_0000u64.to_le_bytes());
        bytes[16..24].copy_from_slice(&0x1d_4c00u64.to_le_bytes());
        bytes[24..26].copy_from_slice(&800u16.to_le_bytes());
        bytes[26..28].copy_from_slice(&600u16.to_le_bytes());
        bytes[28..30].copy_from_slice(&3200u16.to_le_bytes());
        bytes[30..32].copy_from_slice(&0xd040u16.to_le_bytes());

        let record = Record::from_bytes(&bytes);
        assert_eq!(record.kind(), Ok(Tag::Framebuffer));
        assert_eq!(record.flags, 7);
        assert_eq!(record.start, LowAddress::new(0xfd00_0000));
        assert_eq!(record.end(), LowAddress::new(0xfd1d_4c00));

        let fb = record.as_framebuffer().expect("framebuffer view");
        assert_eq!((fb.width, fb.height, fb.pitch), (800, 600, 3200));
        assert_eq!(fb.format, PixelFormat::Bgrx8888);
        assert!(record.as_file().is_none());
        assert_eq!(fb.to_record(7).to_bytes(), bytes);
    }

    #[test]
    fn file_view_reads_name_reference() {
        let file = FileRecord {
            start: LowAddress::new(0x20_0000),
            size: 42,
            name: StrRef(0x90),
            meta: 3,
        };
        let record = file.to_record(0);
        assert_eq!(record.kind(), Ok(Tag::File));
        assert_eq!(record.as_file(), Some(file));
        assert_eq!(record.more(), 0x0000_0003_0000_0090);
    }

    #[test]
    fn unknown_formats_are_kept_raw() {
        assert_eq!(PixelFormat::from_raw(0x1234), PixelFormat::Other(0x1234));
        assert_eq!(PixelFormat::Other(0x1234).raw(), 0x1234);
        assert_eq!(PixelFormat::from_raw(0x7451), PixelFormat::Rgbx8888);
    }
}
