//! # Handover Requests
//!
//! A kernel tells the bootloader which records it wants by embedding a table
//! of requests in the [`HANDOVER_SECTION`](crate::HANDOVER_SECTION) of its
//! image. The table opens with [`Request::START`] and closes with
//! [`Request::END`].

use crate::HANDOVER_MAGIC;
use crate::tag::Tag;

/// One entry of the request table. Layout is fixed by the protocol.
#[repr(C)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Request {
    pub tag: u32,
    pub flags: u32,
    pub more: u64,
}

const _: () = {
    assert!(size_of::<Request>() == 16);
};

impl Request {
    pub const START: Self = Self::new(HANDOVER_MAGIC, 0, 0);
    pub const END: Self = Self::new(Tag::End.raw(), 0, 0);

    #[must_use]
    pub const fn new(tag: u32, flags: u32, more: u64) -> Self {
        Self { tag, flags, more }
    }

    /// Request records of the given kind.
    #[must_use]
    pub const fn with(tag: Tag) -> Self {
        Self::new(tag.raw(), 0, 0)
    }

    pub const WITH_CMDLINE: Self = Self::with(Tag::Cmdline);
    pub const WITH_FB: Self = Self::with(Tag::Framebuffer);
    pub const WITH_FILES: Self = Self::with(Tag::File);
    pub const WITH_ACPI: Self = Self::with(Tag::Rsdp);
}
