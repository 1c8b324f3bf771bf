use handover_abi::{FileRecord, FramebufferRecord};
use kernel_gfx::framebuffer::{BlitError, Framebuffer};
use kernel_gfx::tga::{TgaError, TgaImage};
use kernel_memory_addresses::{MapMemory, translate};
use log::debug;

/// Outcome of a successful blit.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BlitReport {
    /// Number of framebuffer pixels written.
    pub pixels: usize,
}

/// Reasons the boot logo could not be drawn. None of them stop the boot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum DrawError {
    #[error("logo file of {0} bytes cannot be mapped")]
    FileTooLarge(u64),
    #[error(transparent)]
    Image(#[from] TgaError),
    #[error(transparent)]
    Blit(#[from] BlitError),
}

/// Decode the TGA file described by `logo` and copy it into the top-left
/// corner of `framebuffer`.
///
/// The framebuffer geometry comes from the record: `pitch * height` bytes are
/// mapped, and the image must fit in `width` × `height` pixels before any
/// pixel is written.
///
/// # Errors
/// A [`DrawError`] if the file is not a supported TGA or the image does not
/// fit the framebuffer.
///
/// # Safety
/// Both records must describe memory that is mapped at the translated
/// addresses: `logo.size` readable bytes and `pitch * height` writable bytes.
pub unsafe fn draw_logo(
    memory: &impl MapMemory,
    framebuffer: FramebufferRecord,
    logo: FileRecord,
) -> Result<BlitReport, DrawError> {
    let file_len = usize::try_from(logo.size).map_err(|_| DrawError::FileTooLarge(logo.size))?;
    let file = unsafe { memory.map_ro(translate(logo.start), file_len) };
    let image = TgaImage::parse(file)?;

    let header = image.header();
    debug!(
        "Logo: {}x{} at {}bpp, descriptor {:?}",
        header.width, header.height, header.bits_per_pixel, header.descriptor
    );

    let width = usize::from(framebuffer.width);
    let height = usize::from(framebuffer.height);
    let pitch = usize::from(framebuffer.pitch);

    let dst = unsafe { memory.map_rw(translate(framebuffer.start), pitch * height) };
    let mut fb = Framebuffer::new(dst, width, height, pitch)?;
    let pixels = fb.blit(&image)?;

    Ok(BlitReport { pixels })
}
