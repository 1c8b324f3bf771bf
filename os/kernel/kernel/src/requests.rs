//! Records this kernel asks the bootloader for.

use handover_abi::Request;

/// Scanned by the bootloader in the image's `.handover` section.
#[used]
#[unsafe(link_section = ".handover")]
static REQUESTS: [Request; 6] = [
    Request::START,
    Request::WITH_CMDLINE,
    Request::WITH_FB,
    Request::WITH_FILES,
    Request::WITH_ACPI,
    Request::END,
];
