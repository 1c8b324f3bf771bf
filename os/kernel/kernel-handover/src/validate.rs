use handover_abi::{HEADER_SIZE, Header, Payload, PayloadError};
use kernel_memory_addresses::{MapMemory, MappedAddress};

/// Validate the payload at `addr` and return a view over it.
///
/// Only the header is mapped until the payload magic has matched; after
/// that the declared size is mapped and [`Payload::parse`] checks the record
/// table and its sentinel.
///
/// # Errors
/// Any [`PayloadError`]; all of them are fatal to the boot.
///
/// # Safety
/// `addr` must point at least [`HEADER_SIZE`] readable bytes, and at the
/// number of bytes the header declares once its magic matches.
pub unsafe fn validate<'a>(
    memory: &impl MapMemory,
    addr: MappedAddress,
    expected_magic: u32,
) -> Result<Payload<'a>, PayloadError> {
    let header = Header::decode(unsafe { memory.map_ro(addr, HEADER_SIZE) })?;
    header.check_magic(expected_magic)?;

    let blob = unsafe { memory.map_ro(addr, header.size as usize) };
    Payload::parse(blob, expected_magic)
}
