//! # Record Tags

use crate::HANDOVER_MAGIC;
use core::fmt;

/// Kind of resource a [`Record`](crate::Record) describes.
///
/// The set is closed: any other raw value converts into an [`UnknownTag`],
/// which consumers skip so that newer bootloaders can add record kinds.
#[repr(u32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Tag {
    /// Usable memory.
    Free = 0x0000_0000,
    /// Sentinel opening the record table.
    Magic = HANDOVER_MAGIC,
    /// The memory the handover payload itself occupies.
    SelfRecord = 0xa24f_988d,
    /// The stack the kernel was entered on.
    Stack = 0xf65b_391b,
    /// The kernel image.
    Kernel = 0xbfc7_1b20,
    /// The bootloader image.
    Loader = 0xf1f8_0c26,
    /// A file loaded by the bootloader.
    File = 0xcbc3_6d3b,
    /// The ACPI Root System Description Pointer.
    Rsdp = 0x008d_3bbb,
    /// A flattened device tree.
    Fdt = 0xb628_bbc1,
    /// A linear framebuffer.
    Framebuffer = 0xe2d5_5685,
    /// The kernel command line.
    Cmdline = 0x4351_40c4,
    /// Memory reserved by firmware.
    Reserved = 0xb884_1d2d,
    /// Terminator of request tables.
    End = 0xffff_ffff,
}

impl Tag {
    /// Every tag, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Free,
        Self::Magic,
        Self::SelfRecord,
        Self::Stack,
        Self::Kernel,
        Self::Loader,
        Self::File,
        Self::Rsdp,
        Self::Fdt,
        Self::Framebuffer,
        Self::Cmdline,
        Self::Reserved,
        Self::End,
    ];

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Protocol name of the tag.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::Magic => "MAGIC",
            Self::SelfRecord => "SELF",
            Self::Stack => "STACK",
            Self::Kernel => "KERNEL",
            Self::Loader => "LOADER",
            Self::File => "FILE",
            Self::Rsdp => "RSDP",
            Self::Fdt => "FDT",
            Self::Framebuffer => "FB",
            Self::Cmdline => "CMDLINE",
            Self::Reserved => "RESERVED",
            Self::End => "END",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A raw tag value outside the known set.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
#[error("unknown handover tag {0:#x}")]
pub struct UnknownTag(pub u32);

impl TryFrom<u32> for Tag {
    type Error = UnknownTag;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.raw() == value)
            .ok_or(UnknownTag(value))
    }
}

/// Display name for a raw tag value; `"UNKNOWN"` outside the known set.
#[must_use]
pub fn tag_name(raw: u32) -> &'static str {
    Tag::try_from(raw).map_or("UNKNOWN", Tag::name)
}
