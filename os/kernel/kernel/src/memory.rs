use kernel_memory_addresses::{MapMemory, MappedAddress};

/// Direct view of memory the bootloader already mapped.
///
/// Handover addresses are only valid after translation into the upper half,
/// which the [`MappedAddress`] argument guarantees; no page tables are touched.
pub struct UpperHalfMemory;

impl MapMemory for UpperHalfMemory {
    unsafe fn map_ro<'a>(&self, addr: MappedAddress, len: usize) -> &'a [u8] {
        unsafe { core::slice::from_raw_parts(addr.as_ptr(), len) }
    }

    unsafe fn map_rw<'a>(&self, addr: MappedAddress, len: usize) -> &'a mut [u8] {
        unsafe { core::slice::from_raw_parts_mut(addr.as_mut_ptr(), len) }
    }
}
