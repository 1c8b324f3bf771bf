use crate::Text;
use crate::capture::{BootCapture, Slot};
use handover_abi::{Payload, Record, Tag};
use kernel_acpi::rsdp::Rsdp;
use kernel_info::boot::LOGO_FILE_NAME;
use kernel_memory_addresses::{MapMemory, translate};
use log::{debug, info, warn};

/// What an interpreter did with a record.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Interpretation {
    /// The record was stored in a capture slot.
    Captured(Slot),
    /// The record is known but had nothing to act on.
    Ignored,
    /// The record was read for diagnostics only.
    Inspected,
    /// The tag is not part of the protocol; the record was skipped.
    Unknown,
}

/// Act on a single record.
///
/// # Safety
/// Memory described by `CMDLINE` and `RSDP` records must be mapped at the
/// translated address of their `start`.
pub unsafe fn interpret(
    payload: &Payload<'_>,
    memory: &impl MapMemory,
    record: &Record,
    capture: &mut BootCapture,
) -> Interpretation {
    let tag = match record.kind() {
        Ok(tag) => tag,
        Err(unknown) => {
            debug!("Skipping record: {unknown}");
            return Interpretation::Unknown;
        }
    };

    match tag {
        Tag::Framebuffer => framebuffer(record, capture),
        Tag::Cmdline => unsafe { cmdline(memory, record) },
        Tag::File => file(payload, record, capture),
        Tag::Rsdp => unsafe { rsdp(memory, record) },
        Tag::Free
        | Tag::Magic
        | Tag::SelfRecord
        | Tag::Stack
        | Tag::Kernel
        | Tag::Loader
        | Tag::Fdt
        | Tag::Reserved
        | Tag::End => Interpretation::Ignored,
    }
}

fn framebuffer(record: &Record, capture: &mut BootCapture) -> Interpretation {
    let Some(fb) = record.as_framebuffer() else {
        return Interpretation::Ignored;
    };

    info!(
        "Framebuffer: {}x{}, pitch {}, format {}",
        fb.width, fb.height, fb.pitch, fb.format
    );

    if capture.capture_framebuffer(fb) {
        Interpretation::Captured(Slot::Framebuffer)
    } else {
        debug!("Framebuffer already captured; ignoring {}", fb.start);
        Interpretation::Ignored
    }
}

unsafe fn cmdline(memory: &impl MapMemory, record: &Record) -> Interpretation {
    let Ok(len) = usize::try_from(record.size) else {
        warn!("Command line of {} bytes cannot be mapped", record.size);
        return Interpretation::Ignored;
    };

    let bytes = unsafe { memory.map_ro(translate(record.start), len) };
    let line = bytes
        .iter()
        .position(|&b| b == 0)
        .map_or(bytes, |nul| &bytes[..nul]);

    info!("Command line: {}", Text(line));
    Interpretation::Inspected
}

fn file(payload: &Payload<'_>, record: &Record, capture: &mut BootCapture) -> Interpretation {
    let Some(file) = record.as_file() else {
        return Interpretation::Ignored;
    };

    let Some(name) = payload.resolve(file.name) else {
        debug!("File at {} has no resolvable name", file.start);
        return Interpretation::Ignored;
    };

    if !name.starts_with(LOGO_FILE_NAME) {
        return Interpretation::Ignored;
    }

    if capture.capture_logo(file) {
        Interpretation::Captured(Slot::Logo)
    } else {
        debug!("Logo already captured; ignoring {}", Text(name));
        Interpretation::Ignored
    }
}

unsafe fn rsdp(memory: &impl MapMemory, record: &Record) -> Interpretation {
    match unsafe { Rsdp::probe(memory, translate(record.start)) } {
        Some(rsdp) => info!(
            "RSDP signature matched (OEM {:?}, revision {})",
            rsdp.oem_id(),
            rsdp.revision
        ),
        None => warn!("RSDP signature mismatch at {}", record.start),
    }
    Interpretation::Inspected
}
