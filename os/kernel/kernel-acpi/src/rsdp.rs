//! # RSDP/XSDP (Root/Extended System Description Pointer)

use kernel_memory_addresses::{MapMemory, MappedAddress};

/// Signature opening every RSDP.
pub const RSDP_SIGNATURE: &[u8; 8] = b"RSD PTR ";

/// Length of the ACPI 1.0 part shared by RSDP and XSDP.
pub const RSDP_V1_LEN: usize = 20;

/// The ACPI 1.0 fields of a Root System Description Pointer.
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 8    | signature, `"RSD PTR "` |
/// | 8      | 1    | checksum |
/// | 9      | 6    | OEM id |
/// | 15     | 1    | revision, 0 for ACPI 1.0, 2 for 2.0+ |
/// | 16     | 4    | RSDT physical address |
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Rsdp {
    pub checksum: u8,
    pub oem_id: [u8; 6],
    pub revision: u8,
    pub rsdt_addr: u32,
}

/// Whether `bytes` start with the RSDP signature.
#[must_use]
pub fn signature_matches(bytes: &[u8]) -> bool {
    bytes.starts_with(RSDP_SIGNATURE)
}

impl Rsdp {
    /// Decode the ACPI 1.0 fields. Returns `None` if the signature does not
    /// match or fewer than [`RSDP_V1_LEN`] bytes are given.
    #[must_use]
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        let v1 = bytes.first_chunk::<RSDP_V1_LEN>()?;
        if !signature_matches(v1) {
            return None;
        }

        let mut oem_id = [0u8; 6];
        oem_id.copy_from_slice(&v1[9..15]);
        Some(Self {
            checksum: v1[8],
            oem_id,
            revision: v1[15],
            rsdt_addr: u32::from_le_bytes([v1[16], v1[17], v1[18], v1[19]]),
        })
    }

    /// Read the RSDP at `addr`.
    ///
    /// # Safety
    /// `addr` must point to at least [`RSDP_V1_LEN`] readable bytes.
    #[must_use]
    pub unsafe fn probe(memory: &impl MapMemory, addr: MappedAddress) -> Option<Self> {
        let bytes = unsafe { memory.map_ro(addr, RSDP_V1_LEN) };
        Self::decode(bytes)
    }

    /// The OEM id with trailing padding removed; `"?"` if it is not text.
    #[must_use]
    pub fn oem_id(&self) -> &str {
        core::str::from_utf8(&self.oem_id).map_or("?", |s| s.trim_end_matches([' ', '\0']))
    }
}
