//! # Kernel Entry Point
//!
//! The bootloader loads this image into the upper half, maps all of physical
//! memory at [`UPPER_HALF`](kernel_info::memory::UPPER_HALF), and jumps to
//! [`_start`] with the handover magic and payload pointer. The kernel runs
//! one boot pass over the payload and halts.

#![no_std]
#![no_main]
#![allow(unsafe_code)]

mod memory;
mod requests;

use handover_abi::HANDOVER_MAGIC;
use kernel_handover::{LogoOutcome, run};
use kernel_memory_addresses::MappedAddress;
use kernel_qemu::{QemuLogger, qemu_trace};
use log::{LevelFilter, error, info, warn};

use crate::memory::UpperHalfMemory;

const _: kernel_info::boot::KernelEntryFn = _start;

static LOGGER: QemuLogger = QemuLogger::new(LevelFilter::Debug);

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    error!("Kernel panic: {info}");
    halt()
}

/// The kernel entry point.
///
/// # ABI
/// SysV: `magic` arrives in `RDI`, `payload` in `RSI`. The bootloader has
/// already set up a stack.
#[unsafe(no_mangle)]
pub extern "C" fn _start(magic: u64, payload: *const u8) -> ! {
    qemu_trace!("Kernel reporting to QEMU!\n");

    if LOGGER.install().is_err() {
        qemu_trace!("Logger already installed\n");
    }

    info!("Handover magic: {magic:#x}");
    info!("Handover payload: {payload:p}");

    if magic != u64::from(HANDOVER_MAGIC) {
        warn!("Unexpected entry magic {magic:#x} (expected {HANDOVER_MAGIC:#x})");
    }

    if payload.is_null() {
        error!("No handover payload");
        halt();
    }

    let payload = MappedAddress::from_ptr(payload);
    match unsafe { run(&UpperHalfMemory, payload, HANDOVER_MAGIC) } {
        Ok(report) => {
            info!(
                "Handover records: {} visited, {} unknown",
                report.walk.visited, report.walk.unknown
            );
            if let LogoOutcome::Missing { framebuffer, logo } = report.logo {
                info!("No logo drawn (framebuffer missing: {framebuffer}, logo missing: {logo})");
            }
        }
        Err(err) => error!("Invalid handover payload ({}): {err}", err.reason()),
    }

    info!("Halting...");
    halt()
}

/// Stop this CPU for good.
fn halt() -> ! {
    loop {
        #[cfg(target_arch = "x86_64")]
        unsafe {
            core::arch::asm!("cli", "hlt", options(nomem, nostack));
        }
        #[cfg(not(target_arch = "x86_64"))]
        core::hint::spin_loop();
    }
}
