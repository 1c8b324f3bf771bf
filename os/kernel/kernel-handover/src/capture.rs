use handover_abi::{FileRecord, FramebufferRecord};

/// Which capture slot a record went into.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Slot {
    Framebuffer,
    Logo,
}

/// Records selected during the walk, consumed by the logo step.
///
/// Each slot is written at most once: the first framebuffer and the first
/// matching logo file win, later ones are ignored.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct BootCapture {
    framebuffer: Option<FramebufferRecord>,
    logo: Option<FileRecord>,
}

/// Both records needed to draw the boot logo.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LogoJob {
    pub framebuffer: FramebufferRecord,
    pub logo: FileRecord,
}

impl BootCapture {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            framebuffer: None,
            logo: None,
        }
    }

    #[must_use]
    pub const fn framebuffer(&self) -> Option<&FramebufferRecord> {
        self.framebuffer.as_ref()
    }

    #[must_use]
    pub const fn logo(&self) -> Option<&FileRecord> {
        self.logo.as_ref()
    }

    /// Store `fb` unless a framebuffer was already captured.
    /// Returns whether it was stored.
    pub const fn capture_framebuffer(&mut self, fb: FramebufferRecord) -> bool {
        if self.framebuffer.is_some() {
            return false;
        }
        self.framebuffer = Some(fb);
        true
    }

    /// Store `file` unless a logo was already captured.
    /// Returns whether it was stored.
    pub const fn capture_logo(&mut self, file: FileRecord) -> bool {
        if self.logo.is_some() {
            return false;
        }
        self.logo = Some(file);
        true
    }

    /// Hand both records over to the logo step, if both were captured.
    #[must_use]
    pub const fn into_logo_job(self) -> Option<LogoJob> {
        match (self.framebuffer, self.logo) {
            (Some(framebuffer), Some(logo)) => Some(LogoJob { framebuffer, logo }),
            _ => None,
        }
    }
}
