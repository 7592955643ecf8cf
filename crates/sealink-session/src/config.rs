//! Configuration for a share session

use serde::{Deserialize, Serialize};

/// Largest source file accepted for sharing (2 MiB)
pub const MAX_FILE_SIZE: u64 = 2 * 1024 * 1024;

/// Configuration for a [`ShareSession`](crate::ShareSession)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Largest file, in bytes, accepted by `select_file`
    pub max_file_size: u64,
    /// Percentage added to the progress indicator per completed step
    pub progress_step: u8,
    /// Highest percentage reported before the link actually exists
    pub progress_ceiling: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            progress_step: 20,
            progress_ceiling: 85,
        }
    }
}

impl SessionConfig {
    /// Set the file size ceiling
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Set the progress step and ceiling
    ///
    /// The ceiling is clamped below 100 so progress never claims completion
    /// early.
    pub fn with_progress(mut self, step: u8, ceiling: u8) -> Self {
        self.progress_step = step;
        self.progress_ceiling = ceiling.min(99);
        self
    }
}
