//! # Payload View

use crate::record::{RECORD_SIZE, Record, StrRef};
use crate::u32_at;
use core::iter::FusedIterator;
use core::slice::ChunksExact;

/// Size of the payload header in bytes.
pub const HEADER_SIZE: usize = 16;

/// The fixed header at the start of every handover payload.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Header {
    /// Must equal [`HANDOVER_MAGIC`](crate::HANDOVER_MAGIC).
    pub magic: u32,
    /// Name of the bootloader that produced the payload.
    pub agent: StrRef,
    /// Total payload size in bytes, header included.
    pub size: u32,
    /// Number of records following the header.
    pub count: u32,
}

impl Header {
    #[must_use]
    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Self {
        Self {
            magic: u32_at(bytes, 0),
            agent: StrRef(u32_at(bytes, 4)),
            size: u32_at(bytes, 8),
            count: u32_at(bytes, 12),
        }
    }

    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&self.magic.to_le_bytes());
        out[4..8].copy_from_slice(&self.agent.0.to_le_bytes());
        out[8..12].copy_from_slice(&self.size.to_le_bytes());
        out[12..16].copy_from_slice(&self.count.to_le_bytes());
        out
    }

    /// Decode the header at the start of `blob`.
    ///
    /// # Errors
    /// Returns [`PayloadError::TooShort`] if `blob` cannot hold a header.
    pub fn decode(blob: &[u8]) -> Result<Self, PayloadError> {
        blob.first_chunk::<HEADER_SIZE>()
            .map(Self::from_bytes)
            .ok_or_else(|| PayloadError::TooShort { len: blob.len() })
    }

    /// Check the payload-level magic.
    ///
    /// # Errors
    /// Returns [`PayloadError::BadMagic`] on mismatch.
    pub const fn check_magic(&self, expected: u32) -> Result<(), PayloadError> {
        if self.magic == expected {
            Ok(())
        } else {
            Err(PayloadError::BadMagic {
                found: self.magic,
                expected,
            })
        }
    }

    /// Number of bytes the header and its record table occupy.
    #[must_use]
    pub const fn table_end(&self) -> usize {
        HEADER_SIZE + self.count as usize * RECORD_SIZE
    }
}

/// Reasons a payload is rejected. All of them are fatal to the boot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum PayloadError {
    #[error("handover payload of {len} bytes is shorter than its header")]
    TooShort { len: usize },
    #[error("invalid handover payload magic {found:#x} (expected {expected:#x})")]
    BadMagic { found: u32, expected: u32 },
    #[error("handover record table of {count} records does not fit in {len} bytes")]
    RecordsOutOfBounds { count: u32, len: usize },
    #[error("handover payload contains no records")]
    NoRecords,
    #[error("invalid handover record sentinel {found:#x} (expected {expected:#x})")]
    BadSentinel { found: u32, expected: u32 },
}

impl PayloadError {
    /// Short name of the failed check.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::TooShort { .. } => "payload too short",
            Self::BadMagic { .. } => "payload magic",
            Self::RecordsOutOfBounds { .. } => "record table",
            Self::NoRecords => "no records",
            Self::BadSentinel { .. } => "first record",
        }
    }
}

/// Validated, read-only view over a handover payload.
#[derive(Debug, Copy, Clone)]
pub struct Payload<'a> {
    blob: &'a [u8],
    header: Header,
}

impl<'a> Payload<'a> {
    /// Parse and validate a payload blob.
    ///
    /// The checks run in order: header present, payload magic, record table
    /// within `blob`, and finally the first record's tag, which must repeat
    /// `expected_magic`. Nothing past the header is read before the payload
    /// magic has matched.
    ///
    /// # Errors
    /// Returns the first [`PayloadError`] encountered.
    pub fn parse(blob: &'a [u8], expected_magic: u32) -> Result<Self, PayloadError> {
        let header = Header::decode(blob)?;
        header.check_magic(expected_magic)?;

        if header.table_end() > blob.len() {
            return Err(PayloadError::RecordsOutOfBounds {
                count: header.count,
                len: blob.len(),
            });
        }

        let payload = Self { blob, header };
        let first = payload.records().next().ok_or(PayloadError::NoRecords)?;
        if first.tag != expected_magic {
            return Err(PayloadError::BadSentinel {
                found: first.tag,
                expected: expected_magic,
            });
        }

        Ok(payload)
    }

    #[must_use]
    pub const fn header(&self) -> &Header {
        &self.header
    }

    /// The raw bytes of the payload.
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.blob
    }

    /// Number of records in the payload.
    #[must_use]
    pub const fn record_count(&self) -> usize {
        self.header.count as usize
    }

    /// Iterate over all records in table order.
    #[must_use]
    pub fn records(&self) -> Records<'a> {
        let table = &self.blob[HEADER_SIZE..self.header.table_end()];
        Records {
            chunks: table.chunks_exact(RECORD_SIZE),
        }
    }

    /// Fetch record `i`.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<Record> {
        self.records().nth(i)
    }

    /// Resolve a string reference into the bytes before its NUL terminator.
    ///
    /// Returns `None` if the reference points outside the payload or the
    /// string is not terminated inside it.
    #[must_use]
    pub fn resolve(&self, string: StrRef) -> Option<&'a [u8]> {
        let tail = self.blob.get(string.0 as usize..)?;
        let nul = tail.iter().position(|&b| b == 0)?;
        Some(&tail[..nul])
    }

    /// Name of the bootloader that produced the payload.
    #[must_use]
    pub fn agent(&self) -> Option<&'a [u8]> {
        self.resolve(self.header.agent)
    }
}

/// Iterator over the records of a [`Payload`].
///
/// Yields exactly [`Payload::record_count`] records, in table order, once.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    chunks: ChunksExact<'a, u8>,
}

impl Iterator for Records<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks
            .next()
            .and_then(<[u8]>::first_chunk::<RECORD_SIZE>)
            .map(Record::from_bytes)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for Records<'_> {}

impl FusedIterator for Records<'_> {}
