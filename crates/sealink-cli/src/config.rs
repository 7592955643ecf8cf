use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use sealink_logging::{FileConfig, LogConfig};
use sealink_session::MAX_FILE_SIZE;

/// Page the link points at when no `--base-url` is given
pub const DEFAULT_BASE_URL: &str = "https://sealink.example/";

#[derive(Parser)]
#[command(
    name = "sealink",
    version,
    about = "Share files through self-contained encrypted links"
)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
    /// Console log format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
    /// Also write JSONL logs into this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Encrypt a file and print its share link
    Share {
        /// File to share
        file: PathBuf,
        /// Page the link should open
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
        /// MIME type to record (guessed from the extension if omitted)
        #[arg(long)]
        mime: Option<String>,
        /// Largest file accepted, in bytes
        #[arg(long, default_value_t = MAX_FILE_SIZE)]
        max_size: u64,
    },
    /// Decrypt a share link and write the file
    Receive {
        /// Full share link
        link: String,
        /// Directory to write the file into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Show the metadata carried by a share link without decrypting it
    Inspect {
        /// Full share link
        link: String,
    },
}

impl Cli {
    /// Logging configuration selected by the global flags
    pub fn log_config(&self) -> LogConfig {
        let mut config = match self.log_format {
            LogFormat::Pretty => LogConfig::development(),
            LogFormat::Json => LogConfig::default(),
        };
        config.default_level = self.log_level.clone();
        config.file = self.log_dir.as_ref().map(|dir| FileConfig {
            directory: dir.clone(),
            ..FileConfig::default()
        });
        config
    }
}
