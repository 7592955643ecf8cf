//! # Sealink Session
//!
//! The state machine behind a share page. One [`ShareSession`] covers both
//! roles:
//!
//! - **Sender**: pick a file, encrypt it under a fresh key, get a link whose
//!   fragment carries both the ciphertext and the key
//! - **Receiver**: open a page whose location holds such a fragment, decrypt
//!   locally, hand the file to a download sink
//!
//! Nothing ever leaves the process except the link text itself. Fragments
//! are not sent to servers by browsers, so the host serving the page never
//! sees either token.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use sealink_link::MemoryLocation;
//! use sealink_session::{SelectedFile, SessionConfig, SessionState, ShareSession};
//!
//! let page = Arc::new(MemoryLocation::new("https://example.com/share"));
//! let mut sender = ShareSession::new(SessionConfig::default(), page);
//! sender
//!     .select_file(SelectedFile::new("a.txt", "text/plain", b"hello".to_vec()))
//!     .unwrap();
//! let link = sender.encrypt_and_share().unwrap();
//!
//! let opened = Arc::new(MemoryLocation::new(link));
//! let mut receiver = ShareSession::new(SessionConfig::default(), opened);
//! assert!(receiver.detect_link().unwrap());
//! assert_eq!(receiver.state(), SessionState::Ready);
//! assert_eq!(receiver.download().unwrap().bytes(), b"hello");
//! ```

pub mod config;
pub mod error;
pub mod file;
pub mod progress;
pub mod session;

// Re-exports
pub use config::{MAX_FILE_SIZE, SessionConfig};
pub use error::{ShareError, ShareResult};
pub use file::{DownloadArtifact, FileKind, SelectedFile, format_file_size};
pub use progress::ProgressTracker;
pub use session::{DECRYPT_FAILURE_MESSAGE, SessionState, ShareSession};
