//! # Handover Payload Consumer
//!
//! The first thing the kernel does after the bootloader jumps to it: make
//! sense of the handover payload.
//!
//! ## Boot Pass
//!
//! ```text
//! validate ──fatal──▶ (caller halts)
//!    │ ok
//!    ▼
//! walk ── for each record: interpret, then log a summary line
//!    │
//!    ▼
//! framebuffer + logo captured? ──yes──▶ draw_logo
//!    │
//!    ▼
//! BootReport (caller halts)
//! ```
//!
//! * [`validate`] checks the payload magic and the sentinel record. Its errors
//!   are fatal; no record body is touched after a failure.
//! * [`walk`] visits every record once, in table order, and dispatches it to
//!   [`interpret`]. Unknown tags are skipped.
//! * [`interpret`] captures the first framebuffer and the first logo file
//!   into a [`BootCapture`], prints the command line, and checks the ACPI RSDP
//!   signature. Nothing in it is fatal.
//! * [`draw_logo`] decodes the captured TGA file and blits it into the
//!   captured framebuffer. Its failures are logged and the boot goes on.
//!
//! All memory the records point at is reached through
//! [`MapMemory`](kernel_memory_addresses::MapMemory), after
//! [`translate`](kernel_memory_addresses::translate)-ing the record's low
//! address.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod capture;
mod interpret;
mod logo;
mod validate;
mod walk;

pub use capture::{BootCapture, LogoJob, Slot};
pub use interpret::{Interpretation, interpret};
pub use logo::{BlitReport, DrawError, draw_logo};
pub use validate::validate;
pub use walk::{WalkSummary, walk};

use core::fmt;
use handover_abi::PayloadError;
use kernel_memory_addresses::{MapMemory, MappedAddress};
use log::{debug, info, warn};

/// What became of the boot logo.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LogoOutcome {
    /// The logo was blitted.
    Drawn(BlitReport),
    /// At least one of the two required records was absent.
    Missing { framebuffer: bool, logo: bool },
    /// Both records were present, but drawing failed.
    Failed(DrawError),
}

/// Result of a complete boot pass over a valid payload.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BootReport {
    pub walk: WalkSummary,
    pub logo: LogoOutcome,
}

/// Run the whole boot pass: validate, walk, and draw the logo if possible.
///
/// # Errors
/// Returns the [`PayloadError`] if validation fails. The caller must halt;
/// no record has been read in that case.
///
/// # Safety
/// `payload` must point at a handover payload mapped for at least its
/// header, and for its declared size once the header magic matches. Every
/// record address must be mapped at its translated location.
pub unsafe fn run(
    memory: &impl MapMemory,
    payload: MappedAddress,
    expected_magic: u32,
) -> Result<BootReport, PayloadError> {
    let payload = unsafe { validate(memory, payload, expected_magic)? };

    info!(
        "Handover agent: {}",
        Text(payload.agent().unwrap_or(b"<unknown>"))
    );
    info!("Handover size: {}", payload.header().size);
    info!("Handover count: {}", payload.header().count);

    let mut capture = BootCapture::new();
    let walk = unsafe { walk(&payload, memory, &mut capture) };

    let logo = if let Some(job) = capture.into_logo_job() {
        match unsafe { draw_logo(memory, job.framebuffer, job.logo) } {
            Ok(report) => {
                info!("Boot logo drawn ({} pixels)", report.pixels);
                LogoOutcome::Drawn(report)
            }
            Err(err) => {
                warn!("Boot logo not drawn: {err}");
                LogoOutcome::Failed(err)
            }
        }
    } else {
        let missing = LogoOutcome::Missing {
            framebuffer: capture.framebuffer().is_none(),
            logo: capture.logo().is_none(),
        };
        debug!("Boot logo skipped: {missing:?}");
        missing
    };

    Ok(BootReport { walk, logo })
}

/// Displays bytes as text, escaping them if they are not UTF-8.
pub(crate) struct Text<'a>(pub &'a [u8]);

impl fmt::Display for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match core::str::from_utf8(self.0) {
            Ok(s) => f.write_str(s),
            Err(_) => write!(f, "{}", self.0.escape_ascii()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_escapes_invalid_utf8() {
        assert_eq!(Text(b"console=ttyS0").to_string(), "console=ttyS0");
        assert_eq!(Text(b"a\xffb").to_string(), "a\\xffb");
    }
}
