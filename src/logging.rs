//! Logger factory
//!
//! Installs a [`tracing`] subscriber that writes formatted events to a log
//! file rotated by size. Timers and the renderer log through `tracing`, so
//! any subscriber works, this module only provides a file based default.
//!
//! ```rust,no_run
//! use objrepr::logging::{self, LoggerConfig};
//!
//! let config = LoggerConfig::from_json(r#"{ "name": "billing", "level": "info" }"#).unwrap();
//! logging::init(&config).unwrap();
//!
//! tracing::info!(target: "billing", "invoice sent");
//! ```
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Subscriber;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, EnvFilter};

use crate::timer::TIMER_TARGET;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file: {0}")]
    Io(#[from] io::Error),

    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("a global logger is already installed: {0}")]
    AlreadyInitialized(#[from] TryInitError),

    #[error("invalid logger configuration: {0}")]
    Config(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Logger settings
///
/// Every field has a default, so a configuration only needs to list the
/// values it changes.
pub struct LoggerConfig {
    /// Target to log. If not set, events from every target are logged.
    /// [`Timer`](crate::Timer) events are logged along with the target.
    pub name: Option<String>,
    /// Minimum level of logged events
    pub level: String,
    /// Folder for the log files, created if missing
    pub directory: PathBuf,
    pub file_name: String,
    /// Size in bytes after which the log file is rotated
    pub max_file_size: u64,
    /// Number of rotated files kept as `<file_name>.1`, `<file_name>.2`, ...
    pub backup_count: usize,
    pub with_target: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            name: None,
            level: "debug".to_string(),
            directory: PathBuf::from("logs"),
            file_name: "log_app.log".to_string(),
            max_file_size: 10 * 1024 * 1024,
            backup_count: 5,
            with_target: true,
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self, LoggingError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Location of the active log file
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// The [`EnvFilter`] directive selecting the logged events
    pub fn filter_directive(&self) -> String {
        match &self.name {
            Some(name) => format!(
                "{name}={level},{TIMER_TARGET}={level}",
                level = self.level
            ),
            None => self.level.clone(),
        }
    }
}

/// Build the subscriber described by the configuration without installing it
///
/// Useful with [`tracing::subscriber::with_default`] to log to a file only
/// within a scope.
pub fn subscriber(config: &LoggerConfig) -> Result<impl Subscriber + Send + Sync + 'static, LoggingError> {
    let filter = EnvFilter::try_new(config.filter_directive())?;

    fs::create_dir_all(&config.directory)?;
    let file = RotatingFile::open(config.path(), config.max_file_size, config.backup_count)?;

    Ok(tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_ansi(false)
            .with_target(config.with_target)
            .with_writer(Mutex::new(file)),
    ))
}

/// Install the configured subscriber as the global default
///
/// Fails if a global subscriber has already been installed.
pub fn init(config: &LoggerConfig) -> Result<(), LoggingError> {
    subscriber(config)?.try_init()?;
    Ok(())
}

#[derive(Debug)]
/// A log file that is rotated once it reaches a maximum size
///
/// Before a write that would take the file past `max_size`, the file is
/// renamed to `<path>.1`, previous backups move one number up and the
/// oldest beyond `backup_count` is removed. With no backups the file is
/// truncated instead.
pub struct RotatingFile {
    path: PathBuf,
    max_size: u64,
    backup_count: usize,
    file: File,
    size: u64,
}

impl RotatingFile {
    pub fn open(path: impl Into<PathBuf>, max_size: u64, backup_count: usize) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let size = file.metadata()?.len();
        Ok(RotatingFile {
            path,
            max_size,
            backup_count,
            file,
            size,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.backup_count > 0 {
            let oldest = self.backup_path(self.backup_count);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }
            for index in (1..self.backup_count).rev() {
                let from = self.backup_path(index);
                if from.exists() {
                    fs::rename(&from, self.backup_path(index + 1))?;
                }
            }
            fs::rename(&self.path, self.backup_path(1))?;
        }

        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        self.size = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.size > 0 && self.size + buf.len() as u64 > self.max_size {
            self.rotate()?;
        }
        let written = self.file.write(buf)?;
        self.size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
