//! # Low and Mapped Memory Address Types
//!
//! Strongly typed wrappers for the two address spaces the early kernel deals
//! with while it consumes the bootloader handover.
//!
//! ## Overview
//!
//! The bootloader describes resources using addresses from its own, *low*
//! view of memory. The kernel runs in the upper half, where the same memory
//! is visible at a fixed offset ([`UPPER_HALF`](kernel_info::memory::UPPER_HALF)).
//! Dereferencing a low address from the kernel is the classic early-boot bug:
//! it either faults with no handler installed or silently reads the wrong
//! memory.
//!
//! | Type | Meaning |
//! |----------|----------|
//! | [`MemoryAddress`] | A raw 64-bit address of either kind. |
//! | [`LowAddress`] | An address as reported by the bootloader. Never dereferenced. |
//! | [`MappedAddress`] | An address valid in the kernel's own mapping. |
//!
//! [`translate`] is the only way to turn a [`LowAddress`] into a
//! [`MappedAddress`], and [`MapMemory`] only accepts [`MappedAddress`]es, so an
//! untranslated bootloader address cannot reach a dereference.
//!
//! ## Typical Usage
//!
//! ```rust
//! # use kernel_memory_addresses::*;
//! # use kernel_info::memory::UPPER_HALF;
//! let start = LowAddress::new(0x0010_2000);
//! let mapped = translate(start);
//! assert_eq!(mapped.as_u64(), UPPER_HALF + 0x0010_2000);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code, clippy::inline_always)]

mod low_address;
mod map_memory;
mod mapped_address;
mod memory_address;

pub use low_address::LowAddress;
pub use map_memory::MapMemory;
pub use mapped_address::MappedAddress;
pub use memory_address::MemoryAddress;

use kernel_info::memory::UPPER_HALF;

/// Translate a bootloader-supplied address into the kernel's mapping.
///
/// This is a pure, wrapping addition of [`UPPER_HALF`]; it performs no bounds
/// checking. The bootloader guarantees that every address it reports is
/// mapped at this offset.
#[inline]
#[must_use]
pub const fn translate(low: LowAddress) -> MappedAddress {
    MappedAddress::from_raw(low.as_u64().wrapping_add(UPPER_HALF))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_adds_upper_half() {
        let mapped = translate(LowAddress::new(0x1000));
        assert_eq!(mapped.as_u64(), 0xffff_8000_0000_1000);
    }

    #[test]
    fn translate_is_an_additive_bijection() {
        for raw in [
            0,
            1,
            0x0010_0000,
            0x7fff_ffff_ffff,
            0xdead_beef_cafe,
            UPPER_HALF,
            u64::MAX,
        ] {
            let mapped = translate(LowAddress::new(raw));
            assert_eq!(mapped.as_u64().wrapping_sub(UPPER_HALF), raw);
        }
    }

    #[test]
    fn distinct_low_addresses_stay_distinct() {
        let a = translate(LowAddress::new(0x2000));
        let b = translate(LowAddress::new(0x2001));
        assert_ne!(a, b);
        assert_eq!(b.as_u64() - a.as_u64(), 1);
    }

    #[test]
    fn offsets_are_preserved_by_translation() {
        let low = LowAddress::new(0x8000);
        assert_eq!(
            translate(low.offset(0x40)),
            translate(low).offset(0x40),
        );
    }
}
