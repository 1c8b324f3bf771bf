use crate::line_buffer::{LINE_CAPACITY, LineBuffer};
use crate::qemu_fmt;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// `log` backend writing one line per record to the debug console.
pub struct QemuLogger {
    max_level: LevelFilter,
}

impl QemuLogger {
    #[must_use]
    pub const fn new(max_level: LevelFilter) -> Self {
        Self { max_level }
    }

    /// Register this logger with `log`. Call once during early init.
    ///
    /// # Errors
    /// Fails if a logger is already installed.
    pub fn install(&'static self) -> Result<(), SetLoggerError> {
        log::set_logger(self)?;
        log::set_max_level(self.max_level);
        Ok(())
    }
}

/// Format a record as `[LEVEL] target: message`.
pub(crate) fn render(record: &Record) -> LineBuffer<LINE_CAPACITY> {
    LineBuffer::render(format_args!(
        "[{}] {}: {}",
        record.level(),
        record.target(),
        record.args()
    ))
}

impl Log for QemuLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = render(record);
        qemu_fmt::emit(line.as_bytes());
        qemu_fmt::emit(b"\n");
    }

    fn flush(&self) {
        // no-op for the debug console
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn records_render_with_level_and_target() {
        let line = render(
            &Record::builder()
                .level(Level::Warn)
                .target("kernel_handover")
                .args(format_args!("RSDP signature mismatch"))
                .build(),
        );
        assert_eq!(
            line.as_str(),
            "[WARN] kernel_handover: RSDP signature mismatch"
        );
    }

    #[test]
    fn level_filter_is_respected() {
        let logger = QemuLogger::new(LevelFilter::Info);
        let debug = Metadata::builder().level(Level::Debug).build();
        let error = Metadata::builder().level(Level::Error).build();
        assert!(!logger.enabled(&debug));
        assert!(logger.enabled(&error));
    }
}
