//! Log writer module
//!
//! Thread-safe, write-once global writer. Info/debug lines and
//! warning/error lines have separate targets, each stderr or a file.
//! Stdout is left to the rendered plan.

use super::format::{LogFormat, LogLevel, LogRecord};
use crate::error::{Result, WebsiteError};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Log output target
enum LogTarget {
    Stderr,
    File(Mutex<File>),
}

impl LogTarget {
    fn open(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => {
                let file = open_log_file(p).map_err(|e| WebsiteError::io(p, e))?;
                Ok(Self::File(Mutex::new(file)))
            }
            None => Ok(Self::Stderr),
        }
    }

    fn write_line(&self, line: &str) {
        match self {
            Self::Stderr => eprintln!("{line}"),
            Self::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{line}");
                }
            }
        }
    }
}

/// Thread-safe log writer
pub struct LogWriter {
    info: LogTarget,
    error: LogTarget,
    level: LogLevel,
    format: LogFormat,
}

impl LogWriter {
    fn new(
        level: LogLevel,
        format: LogFormat,
        info_log_file: Option<&str>,
        error_log_file: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            info: LogTarget::open(info_log_file)?,
            error: LogTarget::open(error_log_file)?,
            level,
            format,
        })
    }

    pub fn write(&self, level: LogLevel, message: &str) {
        if !level.enabled(self.level) {
            return;
        }
        let line = LogRecord::new(level, message).format(self.format);
        match level {
            LogLevel::Error | LogLevel::Warn => self.error.write_line(&line),
            LogLevel::Info | LogLevel::Debug => self.info.write_line(&line),
        }
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the global log writer
///
/// Should be called once at startup. Fails if a log file cannot be
/// opened or the writer is already set.
pub fn init(
    level: LogLevel,
    format: LogFormat,
    info_log_file: Option<&str>,
    error_log_file: Option<&str>,
) -> Result<()> {
    let writer = LogWriter::new(level, format, info_log_file, error_log_file)?;
    LOG_WRITER
        .set(writer)
        .map_err(|_| WebsiteError::invalid("log writer already initialized"))
}

/// Get the global log writer, if initialized
pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}
