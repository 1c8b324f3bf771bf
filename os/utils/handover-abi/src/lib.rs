//! # Handover Protocol Wire Format
//!
//! Binary layout of the payload a Handover-protocol bootloader passes to the
//! kernel, and a bounds-checked, read-only view over it.
//!
//! The payload is a 16-byte [`Header`] followed by `count` fixed-size
//! 32-byte [`Record`]s. Each record carries a [`Tag`] naming the kind of
//! resource it describes, a start address in the bootloader's low address
//! space, a size, and 8 tag-dependent bytes. Strings (the agent name, file
//! names) live inside the payload and are referenced by byte offset from its
//! start, see [`StrRef`].
//!
//! ```text
//! offset 0   ┌──────────────────────────────┐
//!            │ magic | agent | size | count │  Header (16 bytes)
//! offset 16  ├──────────────────────────────┤
//!            │ record 0 (tag == magic)      │  Record (32 bytes each)
//!            │ record 1                     │
//!            │ ...                          │
//!            ├──────────────────────────────┤
//!            │ NUL-terminated strings       │
//!            └──────────────────────────────┘
//! ```
//!
//! All fields are little-endian and read with explicit byte offsets; the
//! payload is never reinterpreted as a Rust struct.
//!
//! ```rust
//! use handover_abi::{HANDOVER_MAGIC, Payload, PayloadError};
//!
//! let blob = [0u8; 16];
//! let err = Payload::parse(&blob, HANDOVER_MAGIC).err();
//! assert!(matches!(err, Some(PayloadError::BadMagic { found: 0, .. })));
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]

#[cfg(feature = "builder")]
extern crate alloc;

#[cfg(feature = "builder")]
pub mod builder;
mod payload;
mod record;
mod request;
mod tag;

pub use payload::{HEADER_SIZE, Header, Payload, PayloadError, Records};
pub use record::{FileRecord, FramebufferRecord, PixelFormat, RECORD_SIZE, Record, StrRef};
pub use request::Request;
pub use tag::{Tag, UnknownTag, tag_name};

/// Magic value identifying a handover payload.
///
/// It appears twice: in the payload [`Header`] and as the tag of the first
/// record, which marks a well-formed record table.
pub const HANDOVER_MAGIC: u32 = 0xc001_b001;

/// Linker section the kernel places its [`Request`] table in.
pub const HANDOVER_SECTION: &str = ".handover";

#[inline]
fn u16_at<const N: usize>(bytes: &[u8; N], off: usize) -> u16 {
    u16::from_le_bytes([bytes[off], bytes[off + 1]])
}

#[inline]
fn u32_at<const N: usize>(bytes: &[u8; N], off: usize) -> u32 {
    u32::from_le_bytes([bytes[off], bytes[off + 1], bytes[off + 2], bytes[off + 3]])
}

#[inline]
fn u64_at<const N: usize>(bytes: &[u8; N], off: usize) -> u64 {
    u64::from_le_bytes([
        bytes[off],
        bytes[off + 1],
        bytes[off + 2],
        bytes[off + 3],
        bytes[off + 4],
        bytes[off + 5],
        bytes[off + 6],
        bytes[off + 7],
    ])
}
