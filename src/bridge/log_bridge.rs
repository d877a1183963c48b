//! `log` facade bridge

use std::io::Write;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::console::{console, Arg, Console};

/// Logger sending `Error` records to the error channel and `Warn` records to
/// the warn channel. Records below that are written to stderr when `level`
/// allows them.
///
/// This crate's own records skip the channels; its warnings and errors are
/// always written to stderr.
pub struct LogBridge {
    console: &'static Console,
    level: LevelFilter,
}

impl LogBridge {
    /// Bridge into the process-wide console.
    pub fn new(level: LevelFilter) -> Self {
        Self::with_console(console(), level)
    }

    pub fn with_console(console: &'static Console, level: LevelFilter) -> Self {
        Self { console, level }
    }

    /// Register as the global logger.
    pub fn install(self) -> Result<(), SetLoggerError> {
        let max_level = self.level.max(LevelFilter::Warn);
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }

    fn should_print(&self, record: &Record<'_>) -> bool {
        record.level() <= self.level
            || (super::is_own_target(record.target()) && record.level() <= Level::Warn)
    }

    fn print(&self, record: &Record<'_>) {
        if !self.should_print(record) {
            return;
        }
        let _ = writeln!(
            std::io::stderr().lock(),
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level.max(LevelFilter::Warn)
    }

    fn log(&self, record: &Record<'_>) {
        if super::is_own_target(record.target()) {
            self.print(record);
            return;
        }
        match record.level() {
            Level::Error => self.console.error(&[Arg::from(record.args().to_string())]),
            Level::Warn => self.console.warn(&[Arg::from(record.args().to_string())]),
            _ => self.print(record),
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Install a [`LogBridge`] over the process-wide console.
pub fn install_log_bridge(level: LevelFilter) -> Result<(), SetLoggerError> {
    LogBridge::new(level).install()
}
