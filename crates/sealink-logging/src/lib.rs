//! Structured logging for Sealink
//!
//! Sets up a `tracing` subscriber for the Sealink binaries.
//!
//! # Features
//!
//! - **JSONL Output**: Structured JSON lines for log aggregation (default)
//! - **Pretty Console**: Human-readable output for development
//! - **File Rotation**: Daily/hourly log rotation via tracing-appender
//! - **Session Context**: Spans opened while a [`SessionContextGuard`] is
//!   alive carry the session id and role
//!
//! Nothing in Sealink logs link text, key material or file content; events
//! carry sizes, states and error kinds only.
//!
//! # Quick Start
//!
//! ```ignore
//! use sealink_logging::{SealinkSubscriberBuilder, LogConfig};
//!
//! // JSONL to stderr
//! let _guard = SealinkSubscriberBuilder::new().init();
//!
//! // Development mode with pretty human-readable output
//! let _guard = SealinkSubscriberBuilder::new()
//!     .with_config(LogConfig::development())
//!     .init();
//! ```

pub mod config;
pub mod context;
pub mod layers;

pub use config::{ConsoleConfig, FileConfig, JsonlConfig, LogConfig, RotationStrategy};
pub use context::{SessionContextData, SessionContextGuard, SessionRole};
pub use layers::{SessionContextExtension, SessionContextLayer};

use std::fs::{self, File};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors raised while installing the subscriber
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to prepare log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to create rolling appender: {0}")]
    Appender(#[from] InitError),

    #[error("Global subscriber already set: {0}")]
    AlreadySet(#[from] tracing_subscriber::util::TryInitError),
}

/// Builder for configuring and initializing the Sealink logging subscriber
///
/// By default, console output uses JSONL format on stderr. Use
/// `LogConfig::development()` for human-readable output.
pub struct SealinkSubscriberBuilder {
    config: LogConfig,
}

impl SealinkSubscriberBuilder {
    /// Create a new subscriber builder with default configuration
    pub fn new() -> Self {
        Self {
            config: LogConfig::default(),
        }
    }

    /// Use a specific configuration
    pub fn with_config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default log level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.config.default_level = level.into();
        self
    }

    /// Enable or disable console output
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.config.console.enabled = enabled;
        self
    }

    /// Switch console output between pretty and JSONL
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.config.console.pretty = pretty;
        self
    }

    /// Configure file output
    pub fn with_file_output(mut self, config: FileConfig) -> Self {
        self.config.file = Some(config);
        self
    }

    /// Initialize the subscriber globally
    ///
    /// The returned guard keeps the file writer alive; hold it until exit.
    /// Failures are reported on stderr and leave logging disabled.
    pub fn init(self) -> Option<WorkerGuard> {
        match self.try_init() {
            Ok(guard) => guard,
            Err(e) => {
                eprintln!("Warning: logging not initialized: {}", e);
                None
            }
        }
    }

    /// Try to initialize the subscriber globally
    pub fn try_init(self) -> Result<Option<WorkerGuard>, LoggingError> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.config.default_level));

        let console = &self.config.console;
        let jsonl = &self.config.jsonl;

        let pretty_console = (console.enabled && console.pretty).then(|| {
            tracing_subscriber::fmt::layer()
                .with_ansi(console.ansi)
                .with_target(true)
                .with_writer(std::io::stderr)
        });

        let json_console = (console.enabled && !console.pretty).then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(jsonl.include_spans)
                .flatten_event(jsonl.flatten_events)
                .with_file(jsonl.include_location)
                .with_line_number(jsonl.include_location)
                .with_writer(std::io::stderr)
        });

        let (file_layer, guard) = match &self.config.file {
            Some(file_config) => {
                let (writer, guard) = file_writer(file_config)?;
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_current_span(true)
                    .with_span_list(jsonl.include_spans)
                    .flatten_event(jsonl.flatten_events)
                    .with_file(jsonl.include_location)
                    .with_line_number(jsonl.include_location)
                    .with_writer(writer);
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        Registry::default()
            .with(env_filter)
            .with(SessionContextLayer::new())
            .with(pretty_console)
            .with(json_console)
            .with(file_layer)
            .try_init()?;

        Ok(guard)
    }
}

impl Default for SealinkSubscriberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Open the writer for file output; `Never` truncates a single file
fn file_writer(config: &FileConfig) -> Result<(NonBlocking, WorkerGuard), LoggingError> {
    fs::create_dir_all(&config.directory)?;

    let rotation = match config.rotation {
        RotationStrategy::Never => {
            let path = config.directory.join(format!("{}.log", config.prefix));
            let file = File::create(path)?;
            return Ok(tracing_appender::non_blocking(file));
        }
        RotationStrategy::Daily => Rotation::DAILY,
        RotationStrategy::Hourly => Rotation::HOURLY,
    };

    let appender = RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(&config.prefix)
        .filename_suffix("log")
        .build(&config.directory)?;

    Ok(tracing_appender::non_blocking(appender))
}
