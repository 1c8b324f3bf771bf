use crate::MappedAddress;

/// Access to memory the bootloader left mapped for the kernel.
///
/// Everything the handover points at (the payload, the command line, files,
/// the framebuffer) is reached through this trait. The kernel implements it
/// as a plain pointer-to-slice view; tests implement it over owned buffers.
pub trait MapMemory {
    /// Borrow `len` bytes at `addr` for reading.
    ///
    /// # Safety
    /// `addr` must be followed by `len` readable bytes that stay valid and
    /// unmodified for the whole lifetime `'a`.
    unsafe fn map_ro<'a>(&self, addr: MappedAddress, len: usize) -> &'a [u8];

    /// Borrow `len` bytes at `addr` for writing.
    ///
    /// # Safety
    /// `addr` must be followed by `len` writable bytes that stay valid for the
    /// whole lifetime `'a`, with no other reference to them alive meanwhile.
    #[allow(clippy::mut_from_ref)]
    unsafe fn map_rw<'a>(&self, addr: MappedAddress, len: usize) -> &'a mut [u8];
}
