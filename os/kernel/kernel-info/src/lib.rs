//! # Kernel Configuration and Boot Interface
//!
//! This crate holds the compile-time configuration shared between the kernel
//! binary, its build script, and the library crates that interpret the
//! bootloader handover.
//!
//! ## Overview
//!
//! The kernel is started by a Handover-protocol bootloader. The bootloader
//! maps the kernel image into the upper half of the address space, describes
//! every resource it discovered in a single handover payload, and jumps to the
//! kernel entry point with two arguments: a magic value and a pointer to that
//! payload.
//!
//! Addresses inside the payload are expressed in the bootloader's *low*
//! address space. The kernel reaches them through a fixed upper-half offset,
//! see [`memory::UPPER_HALF`].
//!
//! ## Modules
//!
//! ### Boot Information ([`boot`])
//! * **Kernel Entry Point**: function signature and calling convention
//! * **Embedded Assets**: name of the logo file the bootloader loads for us
//!
//! ### Memory Layout ([`memory`])
//! * **Upper Half**: the offset that turns low addresses into mapped ones
//! * **Link Base**: where the kernel image executes, consumed by `build.rs`
//!
//! ```text
//! 0x0000_0000_0000_0000 ┌─────────────────────────────────┐
//!                       │   Low memory (bootloader view)  │
//! UPPER_HALF            ├─────────────────────────────────┤ 0xffff_8000_0000_0000
//!                       │   Upper-half mirror of low mem  │
//! KERNEL_BASE           ├─────────────────────────────────┤ 0xffff_ffff_8000_0000
//!                       │       Kernel Text & Data        │
//! 0xFFFF_FFFF_FFFF_FFFF └─────────────────────────────────┘
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

pub mod boot;
pub mod memory;
