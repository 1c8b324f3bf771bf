//! # Early Boot Graphics
//!
//! Just enough graphics to put a logo on screen before the kernel has a heap
//! or a display driver: a decoder for uncompressed 32-bit TGA images
//! ([`tga`]) and a stride-aware blitter for linear 32-bit framebuffers
//! ([`framebuffer`]).
//!
//! Both work on plain byte slices. Mapping the image file and the
//! framebuffer into the kernel's address space is the caller's job.
//!
//! ```rust
//! use kernel_gfx::framebuffer::Framebuffer;
//! use kernel_gfx::tga::TgaImage;
//!
//! // A 1×1 TGA: 18-byte header, then one R,G,B,A pixel.
//! let mut file = [0u8; 22];
//! file[2] = 2; // uncompressed truecolor
//! file[12] = 1; // width
//! file[14] = 1; // height
//! file[16] = 32; // bits per pixel
//! file[18..22].copy_from_slice(&[0x10, 0x20, 0x30, 0xff]);
//!
//! let image = TgaImage::parse(&file).unwrap();
//! let mut memory = [0u8; 8];
//! let mut fb = Framebuffer::new(&mut memory, 2, 1, 8).unwrap();
//! assert_eq!(fb.blit(&image), Ok(1));
//! assert_eq!(memory[..4], [0x30, 0x20, 0x10, 0xff]);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

pub mod framebuffer;
pub mod tga;

/// A pixel with its channels named, independent of memory order.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}
