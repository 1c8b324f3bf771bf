//! # Linear Framebuffer
//!
//! A framebuffer of 32-bit pixels stored as B, G, R, A bytes. Rows are
//! `pitch` bytes apart, which may be more than `width * 4` when the hardware
//! pads scanlines.

use crate::Color;
use crate::tga::{TGA_BYTES_PER_PIXEL, TgaImage, rgba_to_color};

/// Bytes per framebuffer pixel.
pub const BYTES_PER_PIXEL: usize = 4;

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum BlitError {
    #[error("framebuffer pitch {pitch} is smaller than a {width}-pixel row")]
    BadPitch { width: usize, pitch: usize },
    #[error("framebuffer memory of {len} bytes cannot hold {required} bytes")]
    BufferTooSmall { len: usize, required: usize },
    #[error("image of {width}x{height} does not fit a {fb_width}x{fb_height} framebuffer")]
    DoesNotFit {
        width: usize,
        height: usize,
        fb_width: usize,
        fb_height: usize,
    },
}

/// Mutable view over framebuffer memory.
pub struct Framebuffer<'a> {
    buf: &'a mut [u8],
    width: usize,
    height: usize,
    pitch: usize,
}

impl<'a> Framebuffer<'a> {
    /// Wrap `buf` as a `width`×`height` framebuffer with rows `pitch` bytes apart.
    ///
    /// # Errors
    /// Fails if a row does not fit in `pitch` bytes or `buf` is shorter than
    /// `pitch * height`.
    pub fn new(
        buf: &'a mut [u8],
        width: usize,
        height: usize,
        pitch: usize,
    ) -> Result<Self, BlitError> {
        let row_bytes = width
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or(BlitError::BadPitch { width, pitch })?;
        if row_bytes > pitch {
            return Err(BlitError::BadPitch { width, pitch });
        }

        let required = pitch.saturating_mul(height);
        if buf.len() < required {
            return Err(BlitError::BufferTooSmall {
                len: buf.len(),
                required,
            });
        }

        Ok(Self {
            buf,
            width,
            height,
            pitch,
        })
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn pitch(&self) -> usize {
        self.pitch
    }

    /// Byte offset of pixel (`x`, `y`).
    #[must_use]
    pub const fn offset_of(&self, x: usize, y: usize) -> usize {
        y * self.pitch + x * BYTES_PER_PIXEL
    }

    /// Read back the pixel at (`x`, `y`).
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = self.offset_of(x, y);
        let px = self.buf.get(off..)?.first_chunk::<BYTES_PER_PIXEL>()?;
        let &[blue, green, red, alpha] = px;
        Some(Color::new(red, green, blue, alpha))
    }

    /// Write one pixel; out-of-bounds coordinates are ignored.
    pub fn put_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let off = self.offset_of(x, y);
        if let Some(px) = self
            .buf
            .get_mut(off..)
            .and_then(<[u8]>::first_chunk_mut::<BYTES_PER_PIXEL>)
        {
            *px = encode(color);
        }
    }

    /// Copy `image` into the top-left corner of the framebuffer.
    ///
    /// Row `y` of the image starts at byte `y * pitch`. Channels are copied
    /// by name from the image's R, G, B, A order into the framebuffer's
    /// B, G, R, A order. Nothing is written unless the whole image fits.
    ///
    /// # Errors
    /// Returns [`BlitError::DoesNotFit`] if the image is wider or taller
    /// than the framebuffer.
    pub fn blit(&mut self, image: &TgaImage) -> Result<usize, BlitError> {
        if image.width() > self.width || image.height() > self.height {
            return Err(BlitError::DoesNotFit {
                width: image.width(),
                height: image.height(),
                fb_width: self.width,
                fb_height: self.height,
            });
        }

        let len = self.buf.len();
        let mut written = 0;
        for (y, row) in image.rows().enumerate() {
            let start = y * self.pitch;
            let required = start + row.len();
            let dst = self
                .buf
                .get_mut(start..required)
                .ok_or(BlitError::BufferTooSmall { len, required })?;

            for (d, s) in dst
                .chunks_exact_mut(BYTES_PER_PIXEL)
                .zip(row.chunks_exact(TGA_BYTES_PER_PIXEL))
            {
                let mut src = [0u8; TGA_BYTES_PER_PIXEL];
                src.copy_from_slice(s);
                d.copy_from_slice(&encode(rgba_to_color(src)));
                written += 1;
            }
        }

        Ok(written)
    }
}

/// Lay out a color as framebuffer bytes (B, G, R, A).
#[inline]
#[must_use]
pub const fn encode(color: Color) -> [u8; BYTES_PER_PIXEL] {
    [color.b, color.g, color.r, color.a]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_are_stored_blue_first() {
        let mut mem = [0u8; 16];
        let mut fb = Framebuffer::new(&mut mem, 2, 2, 8).unwrap();
        fb.put_pixel(1, 1, Color::new(0x11, 0x22, 0x33, 0x44));
        assert_eq!(fb.pixel(1, 1), Some(Color::new(0x11, 0x22, 0x33, 0x44)));
        assert_eq!(mem[12..16], [0x33, 0x22, 0x11, 0x44]);
    }

    #[test]
    fn out_of_bounds_puts_are_ignored() {
        let mut mem = [0u8; 16];
        let mut fb = Framebuffer::new(&mut mem, 2, 2, 8).unwrap();
        fb.put_pixel(2, 0, Color::new(1, 1, 1, 1));
        fb.put_pixel(0, 2, Color::new(1, 1, 1, 1));
        assert_eq!(fb.pixel(2, 0), None);
        assert!(mem.iter().all(|&b| b == 0));
    }

    #[test]
    fn geometry_is_validated() {
        let mut mem = [0u8; 32];
        assert_eq!(
            Framebuffer::new(&mut mem, 4, 1, 12).err(),
            Some(BlitError::BadPitch {
                width: 4,
                pitch: 12
            })
        );
        assert_eq!(
            Framebuffer::new(&mut mem, 2, 5, 8).err(),
            Some(BlitError::BufferTooSmall {
                len: 32,
                required: 40
            })
        );
    }

    #[test]
    fn blit_stops_at_the_end_of_short_memory() {
        // One row of a 2x2 framebuffer; `new` would refuse this buffer.
        let mut mem = [0u8; 8];
        let mut fb = Framebuffer {
            buf: &mut mem,
            width: 2,
            height: 2,
            pitch: 8,
        };

        let mut file = [0u8; 18 + 16];
        file[2] = 2;
        file[12] = 2;
        file[14] = 2;
        file[16] = 32;
        let image = TgaImage::parse(&file).unwrap();

        assert_eq!(
            fb.blit(&image),
            Err(BlitError::BufferTooSmall {
                len: 8,
                required: 16
            })
        );
    }

    #[test]
    fn offsets_use_the_pitch() {
        let mut mem = [0u8; 64];
        let fb = Framebuffer::new(&mut mem, 2, 2, 32).unwrap();
        assert_eq!(fb.offset_of(0, 1), 32);
        assert_eq!(fb.offset_of(1, 1), 36);
    }
}
