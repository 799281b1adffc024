/*!
 * Stderr logger for applications embedding subforge.
 *
 * Library code only uses the `log` macros; this logger is optional and
 * stamps each record with the injected `Clock` rather than the wall clock.
 */

use std::io::Write;
use std::sync::Arc;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::clock::Clock;
use crate::config::LogLevel;

// @struct: Colored stderr logger
pub struct SubtitleLogger {
    level: LevelFilter,
    clock: Arc<dyn Clock>,
}

impl SubtitleLogger {
    // @creates: New logger with specified level and time source
    pub fn new(level: LevelFilter, clock: Arc<dyn Clock>) -> Self {
        SubtitleLogger { level, clock }
    }

    // @initializes: Global logger
    pub fn init(level: LevelFilter, clock: Arc<dyn Clock>) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(SubtitleLogger::new(level, clock)))?;
        log::set_max_level(level);
        Ok(())
    }

    /// Render a record the way it is written to stderr, without color codes
    pub fn format_record(&self, record: &Record) -> String {
        let now = self.clock.now().format("%H:%M:%S%.3f");
        format!("{} {:<5} {}", now, record.level(), record.args())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for SubtitleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let line = self.format_record(record);
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{}\x1B[0m",
                Self::color_for_level(record.level()),
                line
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

impl From<&LogLevel> for LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}
