//! # Kernel Boot Information

/// Kernel function pointer as seen by the bootloader.
///
/// # ABI
/// The Handover protocol calls the kernel with the System V calling
/// convention: the magic value in `RDI`, the payload pointer in `RSI`.
pub type KernelEntryFn = extern "C" fn(magic: u64, payload: *const u8) -> !;

/// Name of the file carrying the boot logo.
///
/// The bootloader loads this file next to the kernel and reports it as a
/// `FILE` record. It is matched byte-for-byte (case-sensitive) against the
/// start of each file record's name.
pub const LOGO_FILE_NAME: &[u8] = b"logo.tga";

const _: () = {
    assert!(LOGO_FILE_NAME.len() == 8);
};
