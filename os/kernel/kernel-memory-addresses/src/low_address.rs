use crate::MemoryAddress;
use core::fmt;

/// Address as reported by the bootloader.
///
/// A thin wrapper around [`MemoryAddress`] for values taken from handover
/// records. It deliberately offers no pointer conversion; use
/// [`translate`](crate::translate) to obtain a [`MappedAddress`](crate::MappedAddress).
///
/// ### Examples
/// ```rust
/// # use kernel_memory_addresses::*;
/// let start = LowAddress::new(0x0008_0000);
/// let end = start.offset(0x1000);
/// assert_eq!(end.as_u64(), 0x0008_1000);
/// ```
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct LowAddress(MemoryAddress);

impl LowAddress {
    #[inline]
    #[must_use]
    pub const fn new(v: u64) -> Self {
        Self(MemoryAddress::new(v))
    }

    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0.as_u64()
    }

    /// The address `bytes` further along, wrapping around the address space.
    #[inline]
    #[must_use]
    pub const fn offset(self, bytes: u64) -> Self {
        Self(self.0.wrapping_add(bytes))
    }
}

impl fmt::Debug for LowAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LowAddress(0x{:016X})", self.as_u64())
    }
}

impl fmt::Display for LowAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for LowAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl From<LowAddress> for MemoryAddress {
    #[inline(always)]
    fn from(value: LowAddress) -> Self {
        value.0
    }
}
