//! # TGA Image Decoding
//!
//! Only the subset the bootloader ships is supported: uncompressed
//! truecolor (image type 2), no colour map, 32 bits per pixel, with the
//! pixels stored as R, G, B, A bytes in rows from top to bottom.

use crate::Color;
use bitfield_struct::bitfield;
use core::slice::ChunksExact;

/// Size of the packed TGA header in bytes.
pub const TGA_HEADER_SIZE: usize = 18;

/// Image type code for uncompressed truecolor images.
pub const IMAGE_TYPE_TRUECOLOR: u8 = 2;

/// Bytes per source pixel.
pub const TGA_BYTES_PER_PIXEL: usize = 4;

/// The `image_descriptor` byte of the TGA header.
///
/// The orientation bits are decoded but not honored: pixel rows are always
/// read top to bottom, left to right.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct ImageDescriptor {
    /// Number of attribute (alpha) bits per pixel.
    #[bits(4)]
    pub alpha_bits: u8,
    /// Pixels are stored right to left.
    pub right_to_left: bool,
    /// Rows are stored top to bottom.
    pub top_to_bottom: bool,
    #[bits(2)]
    __: u8,
}

/// The 18-byte TGA header.
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 1    | `id_length` |
/// | 1      | 1    | `colour_map_type` |
/// | 2      | 1    | `image_type` |
/// | 3      | 2    | `colour_map_origin` |
/// | 5      | 2    | `colour_map_length` |
/// | 7      | 1    | `colour_map_depth` |
/// | 8      | 2    | `x_origin` |
/// | 10     | 2    | `y_origin` |
/// | 12     | 2    | `width` |
/// | 14     | 2    | `height` |
/// | 16     | 1    | `bits_per_pixel` |
/// | 17     | 1    | `image_descriptor` |
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TgaHeader {
    pub id_length: u8,
    pub colour_map_type: u8,
    pub image_type: u8,
    pub colour_map_origin: u16,
    pub colour_map_length: u16,
    pub colour_map_depth: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    pub bits_per_pixel: u8,
    pub descriptor: ImageDescriptor,
}

impl TgaHeader {
    #[must_use]
    pub fn from_bytes(b: &[u8; TGA_HEADER_SIZE]) -> Self {
        let u16_at = |off: usize| u16::from_le_bytes([b[off], b[off + 1]]);
        Self {
            id_length: b[0],
            colour_map_type: b[1],
            image_type: b[2],
            colour_map_origin: u16_at(3),
            colour_map_length: u16_at(5),
            colour_map_depth: b[7],
            x_origin: u16_at(8),
            y_origin: u16_at(10),
            width: u16_at(12),
            height: u16_at(14),
            bits_per_pixel: b[16],
            descriptor: ImageDescriptor::from_bits(b[17]),
        }
    }

    /// Whether the header describes an image this decoder can read.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        self.image_type == IMAGE_TYPE_TRUECOLOR
            && self.colour_map_type == 0
            && self.bits_per_pixel == 32
    }

    /// Byte offset of the first pixel in the file.
    #[must_use]
    pub const fn pixel_offset(&self) -> usize {
        TGA_HEADER_SIZE + self.id_length as usize
    }

    /// Number of bytes the pixel array occupies.
    #[must_use]
    pub const fn pixel_bytes(&self) -> usize {
        self.width as usize * self.height as usize * TGA_BYTES_PER_PIXEL
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum TgaError {
    #[error("image of {len} bytes is shorter than the TGA header")]
    TooShort { len: usize },
    #[error(
        "unsupported TGA image (type {image_type}, colour map {colour_map_type}, {bits_per_pixel} bpp)"
    )]
    Unsupported {
        image_type: u8,
        colour_map_type: u8,
        bits_per_pixel: u8,
    },
    #[error("TGA pixel data truncated: expected {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },
}

/// A decoded view over a TGA file in memory.
#[derive(Debug, Copy, Clone)]
pub struct TgaImage<'a> {
    header: TgaHeader,
    pixels: &'a [u8],
}

impl<'a> TgaImage<'a> {
    /// Parse the header and locate the pixel array.
    ///
    /// # Errors
    /// See [`TgaError`]; trailing bytes after the pixel array are ignored.
    pub fn parse(file: &'a [u8]) -> Result<Self, TgaError> {
        let header = file
            .first_chunk::<TGA_HEADER_SIZE>()
            .map(TgaHeader::from_bytes)
            .ok_or_else(|| TgaError::TooShort { len: file.len() })?;

        if !header.is_supported() {
            return Err(TgaError::Unsupported {
                image_type: header.image_type,
                colour_map_type: header.colour_map_type,
                bits_per_pixel: header.bits_per_pixel,
            });
        }

        let body = file.get(header.pixel_offset()..).unwrap_or_default();
        let pixels = body
            .get(..header.pixel_bytes())
            .ok_or_else(|| TgaError::Truncated {
                expected: header.pixel_bytes(),
                actual: body.len(),
            })?;

        Ok(Self { header, pixels })
    }

    #[must_use]
    pub const fn header(&self) -> &TgaHeader {
        &self.header
    }

    #[must_use]
    pub fn width(&self) -> usize {
        usize::from(self.header.width)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.header.height)
    }

    /// Rows of raw R, G, B, A bytes, top to bottom.
    pub fn rows(&self) -> ChunksExact<'a, u8> {
        // A zero-width image has no bytes; any non-zero chunk size yields nothing.
        let row_bytes = (self.width() * TGA_BYTES_PER_PIXEL).max(1);
        self.pixels.chunks_exact(row_bytes)
    }

    /// Source pixel at (`x`, `y`).
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let off = (y * self.width() + x) * TGA_BYTES_PER_PIXEL;
        self.pixels
            .get(off..off + TGA_BYTES_PER_PIXEL)
            .and_then(<[u8]>::first_chunk::<TGA_BYTES_PER_PIXEL>)
            .copied()
            .map(rgba_to_color)
    }
}

/// Interpret source bytes stored as R, G, B, A.
#[inline]
#[must_use]
pub const fn rgba_to_color([r, g, b, a]: [u8; TGA_BYTES_PER_PIXEL]) -> Color {
    Color { r, g, b, a }
}
