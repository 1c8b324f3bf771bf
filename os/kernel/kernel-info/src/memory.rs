//! # Memory Layout

/// Offset of the upper-half mapping established by the bootloader.
///
/// Every address the bootloader hands over (record `start` fields, the
/// command line, files, the framebuffer) is valid only after adding this
/// offset.
pub const UPPER_HALF: u64 = 0xffff_8000_0000_0000;

/// Where the kernel executes (VMA), matches the linker script.
///
/// # Kernel Build
/// This information is sourced in the kernel's `build.rs` to configure
/// the linker.
pub const KERNEL_BASE: u64 = 0xffff_ffff_8000_0000;

const _: () = {
    assert!(KERNEL_BASE > UPPER_HALF);
    assert!(KERNEL_BASE & ((1 << 21) - 1) == 0);
};
