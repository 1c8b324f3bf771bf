//! # QEMU Debug Console Support
//!
//! Diagnostic output for the early kernel. Nothing else is available at this
//! stage: no console driver, no heap, no interrupts. Every message is
//! formatted into a fixed, stack-allocated [`LineBuffer`] and then written byte
//! by byte to the debug console I/O port, which QEMU forwards to the host.
//!
//! ## Output Mechanism
//! ```text
//! log::info! / qemu_trace!
//!     ↓
//! LineBuffer<1024> (fmt::Write, truncating)
//!     ↓
//! dbg_putc() → I/O port 0xE9
//!     ↓
//! QEMU -debugcon
//! ```
//!
//! Messages longer than [`LINE_CAPACITY`] bytes are cut at the last UTF-8
//! character boundary that fits; formatting never fails and never panics.
//!
//! ## Feature System
//!
//! The `enabled` feature (default) compiles in the port access. Without it
//! every emission is a no-op and no I/O instruction is generated.
//!
//! ## Host-Side Configuration
//! ```bash
//! qemu-system-x86_64 ... -debugcon stdio
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use kernel_qemu::QemuLogger;
//! use log::{LevelFilter, info};
//!
//! static LOGGER: QemuLogger = QemuLogger::new(LevelFilter::Debug);
//!
//! LOGGER.install().expect("logger installed once");
//! info!("Handover agent: {}", "booboot");
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod line_buffer;
mod logger;

pub use line_buffer::{LINE_CAPACITY, LineBuffer};
pub use logger::QemuLogger;

#[cfg(feature = "enabled")]
#[doc(hidden)]
pub mod qemu_fmt {
    use crate::line_buffer::LineBuffer;
    use core::fmt;

    /// The port number of the debug console (`-debugcon`).
    pub const DEBUG_CONSOLE_PORT: u16 = 0xe9;

    /// Write a single byte to the debug console.
    #[allow(clippy::inline_always)]
    #[inline(always)]
    pub fn dbg_putc(c: u8) {
        #[cfg(target_arch = "x86_64")]
        unsafe {
            outb(DEBUG_CONSOLE_PORT, c);
        }
        #[cfg(not(target_arch = "x86_64"))]
        let _ = c;
    }

    #[cfg(target_arch = "x86_64")]
    #[allow(clippy::inline_always)]
    #[inline(always)]
    unsafe fn outb(port: u16, val: u8) {
        unsafe {
            core::arch::asm!(
            "out dx, al",
            in("dx") port,
            in("al") val,
            options(nomem, nostack, preserves_flags)
            );
        }
    }

    /// Emit raw bytes to the debug console.
    pub fn emit(bytes: &[u8]) {
        for &b in bytes {
            dbg_putc(b);
        }
    }

    #[doc(hidden)]
    pub fn qemu_write(args: fmt::Arguments) {
        let line = LineBuffer::<{ crate::LINE_CAPACITY }>::render(args);
        emit(line.as_bytes());
    }
}

#[cfg(not(feature = "enabled"))]
#[doc(hidden)]
pub mod qemu_fmt {
    use core::fmt;

    #[inline(always)]
    #[allow(clippy::inline_always)]
    pub fn emit(_: &[u8]) {
        // no-op when feature disabled
    }

    #[doc(hidden)]
    #[inline(always)]
    #[allow(clippy::inline_always)]
    pub fn qemu_write(_: fmt::Arguments) {
        // no-op when feature disabled
    }
}

/// Write formatted text straight to the debug console, bypassing `log`.
///
/// Useful before the logger is installed. No newline is appended.
#[macro_export]
macro_rules! qemu_trace {
    ($($arg:tt)*) => {{
        $crate::qemu_fmt::qemu_write(core::format_args!($($arg)*));
    }};
}
