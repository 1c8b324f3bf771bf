use crate::MemoryAddress;
use core::fmt;

/// Address valid in the kernel's own mapping.
///
/// Values of this type come either from [`translate`](crate::translate) or,
/// for pointers the bootloader already handed over in kernel space (the
/// payload pointer itself), from [`MappedAddress::from_ptr`].
///
/// ### Invariants
/// - No invariant beyond "this address may be dereferenced by the kernel".
/// - There is no conversion back into a [`LowAddress`](crate::LowAddress),
///   so a mapped address cannot be translated a second time.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MappedAddress(MemoryAddress);

impl MappedAddress {
    /// Wrap an address the kernel already holds as a pointer.
    #[inline]
    #[must_use]
    pub const fn from_ptr<T>(ptr: *const T) -> Self {
        Self(MemoryAddress::from_ptr(ptr))
    }

    #[inline]
    pub(crate) const fn from_raw(v: u64) -> Self {
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

    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_ptr<T>(self) -> *const T {
        self.as_u64() as usize as *const T
    }

    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_mut_ptr<T>(self) -> *mut T {
        self.as_u64() as usize as *mut T
    }
}

impl fmt::Debug for MappedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MappedAddress(0x{:016X})", self.as_u64())
    }
}

impl fmt::Display for MappedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<MappedAddress> for MemoryAddress {
    #[inline(always)]
    fn from(value: MappedAddress) -> Self {
        value.0
    }
}
