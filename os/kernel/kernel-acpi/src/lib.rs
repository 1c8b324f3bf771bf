//! # ACPI (Advanced Configuration and Power Interface) Support
//!
//! Early, read-only inspection of the ACPI Root System Description Pointer
//! that the bootloader reports in its `RSDP` handover record.
//!
//! ```text
//! Handover RSDP record
//!     ↓ translate(start)
//! RSDP/XSDP (Root System Description Pointer)
//!     ↓
//! RSDT/XSDT (not parsed yet)
//! ```
//!
//! At this stage the kernel only confirms the `"RSD PTR "` signature and
//! reports the OEM id and revision for diagnostics. Checksums are not
//! verified and nothing is stored; table enumeration belongs to a later
//! boot phase.
//!
//! ## Usage
//! ```rust
//! use kernel_acpi::rsdp::Rsdp;
//!
//! let mut bytes = [0u8; 20];
//! bytes[..8].copy_from_slice(b"RSD PTR ");
//! bytes[9..15].copy_from_slice(b"BOCHS ");
//! bytes[15] = 2;
//!
//! let rsdp = Rsdp::decode(&bytes).expect("signature matches");
//! assert_eq!(rsdp.revision, 2);
//! assert_eq!(rsdp.oem_id(), "BOCHS");
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

pub mod rsdp;
