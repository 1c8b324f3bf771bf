//! # Payload Builder
//!
//! Assembles handover payloads the way a bootloader lays them out: header,
//! record table, then a blob of NUL-terminated strings padded to 8 bytes.

use crate::payload::{HEADER_SIZE, Header};
use crate::record::{FileRecord, FramebufferRecord, RECORD_SIZE, Record, StrRef};
use crate::tag::Tag;
use alloc::vec::Vec;
use kernel_memory_addresses::LowAddress;

/// Incrementally builds a payload blob.
///
/// ```rust
/// use handover_abi::{HANDOVER_MAGIC, Payload, builder::PayloadBuilder};
///
/// let blob = PayloadBuilder::new(HANDOVER_MAGIC).agent(b"booboot").build();
/// let payload = Payload::parse(&blob, HANDOVER_MAGIC).unwrap();
/// assert_eq!(payload.record_count(), 1);
/// assert_eq!(payload.agent(), Some(&b"booboot"[..]));
/// ```
#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    magic: u32,
    agent: Vec<u8>,
    records: Vec<PendingRecord>,
}

#[derive(Debug, Clone)]
struct PendingRecord {
    record: Record,
    /// File name to place in the string blob and patch into the record.
    name: Option<Vec<u8>>,
}

impl PayloadBuilder {
    /// A payload whose record table opens with the `magic` sentinel record.
    #[must_use]
    pub fn new(magic: u32) -> Self {
        Self::without_sentinel(magic).record(Record {
            tag: magic,
            flags: 0,
            start: LowAddress::new(0),
            size: 0,
            extra: [0; 8],
        })
    }

    /// A payload with an empty record table.
    #[must_use]
    pub const fn without_sentinel(magic: u32) -> Self {
        Self {
            magic,
            agent: Vec::new(),
            records: Vec::new(),
        }
    }

    #[must_use]
    pub fn agent(mut self, name: &[u8]) -> Self {
        self.agent = name.to_vec();
        self
    }

    /// Append a record verbatim.
    #[must_use]
    pub fn record(mut self, record: Record) -> Self {
        self.records.push(PendingRecord { record, name: None });
        self
    }

    /// Append a record with only a tag, start and size.
    #[must_use]
    pub fn raw(self, tag: u32, start: LowAddress, size: u64) -> Self {
        self.record(Record {
            tag,
            flags: 0,
            start,
            size,
            extra: [0; 8],
        })
    }

    #[must_use]
    pub fn framebuffer(self, fb: FramebufferRecord) -> Self {
        self.record(fb.to_record(0))
    }

    /// Append a `FILE` record; `name` is stored in the payload's string blob.
    #[must_use]
    pub fn file(mut self, name: &[u8], start: LowAddress, size: u64) -> Self {
        let record = FileRecord {
            start,
            size,
            name: StrRef(0),
            meta: 0,
        }
        .to_record(0);
        self.records.push(PendingRecord {
            record,
            name: Some(name.to_vec()),
        });
        self
    }

    #[must_use]
    pub fn cmdline(self, start: LowAddress, size: u64) -> Self {
        self.raw(Tag::Cmdline.raw(), start, size)
    }

    #[must_use]
    pub fn rsdp(self, start: LowAddress) -> Self {
        self.raw(Tag::Rsdp.raw(), start, 0x24)
    }

    /// Lay out the payload.
    ///
    /// # Panics
    /// Panics if the payload would exceed the 4 GiB the header can describe.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        let strings_off = HEADER_SIZE + self.records.len() * RECORD_SIZE;

        let mut strings = Vec::new();
        let mut push_str = |s: &[u8]| {
            let off = strings_off + strings.len();
            strings.extend_from_slice(s);
            strings.push(0);
            StrRef(u32::try_from(off).expect("payload exceeds 4 GiB"))
        };

        let agent = push_str(&self.agent);
        let mut table = Vec::with_capacity(self.records.len() * RECORD_SIZE);
        for PendingRecord { mut record, name } in self.records.iter().cloned() {
            if let Some(name) = name {
                let name_ref = push_str(&name);
                record.extra[0..4].copy_from_slice(&name_ref.0.to_le_bytes());
            }
            table.extend_from_slice(&record.to_bytes());
        }

        while !strings.len().is_multiple_of(8) {
            strings.push(0);
        }

        let header = Header {
            magic: self.magic,
            agent,
            size: u32::try_from(strings_off + strings.len()).expect("payload exceeds 4 GiB"),
            count: u32::try_from(self.records.len()).expect("too many records"),
        };

        let mut out = Vec::with_capacity(strings_off + strings.len());
        out.extend_from_slice(&header.to_bytes());
        out.extend_from_slice(&table);
        out.extend_from_slice(&strings);
        out
    }
}
