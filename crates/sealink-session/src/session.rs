//! Share session state machine
//!
//! A [`ShareSession`] drives both roles. Which role it plays depends only on
//! what the location holds when the page (or command) starts: a share
//! fragment puts it on the receiver path, anything else leaves it idle and
//! ready for a sender.
//!
//! ```text
//! sender:   Idle -> FileSelected -> Encrypting -> LinkReady
//! receiver: Idle -> Decrypting -> Ready | Failed
//! any state --reset--> Idle
//! ```
//!
//! Plaintext and key bytes are held in zeroizing types and wiped as soon as
//! the stage that owns them is left.

use std::fmt;
use std::sync::Arc;

use sealink_crypto::{Cipher, KeyManager, SymmetricKey};
use sealink_link::{
    EncryptedPackage, LinkTokens, LinkTransport, base_of, build, deserialize_package,
    fragment_of, from_url_safe_text, parse, serialize_package, to_url_safe_text,
};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::config::SessionConfig;
use crate::error::{ShareError, ShareResult};
use crate::file::{DownloadArtifact, SelectedFile};
use crate::progress::ProgressTracker;

/// The only message a receiver ever sees when a link cannot be opened
///
/// Wrong key, truncated token and flipped bits all read the same, so the
/// message reveals nothing about which part of the link was damaged.
pub const DECRYPT_FAILURE_MESSAGE: &str = "Failed to decrypt. The link may be corrupted.";

/// Observable state of a share session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Idle,
    FileSelected,
    Encrypting,
    LinkReady,
    Decrypting,
    Ready,
    Failed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::FileSelected => write!(f, "file selected"),
            SessionState::Encrypting => write!(f, "encrypting"),
            SessionState::LinkReady => write!(f, "link ready"),
            SessionState::Decrypting => write!(f, "decrypting"),
            SessionState::Ready => write!(f, "ready"),
            SessionState::Failed => write!(f, "failed"),
        }
    }
}

/// Internal stage, carrying the data each state owns
enum Stage {
    Idle,
    FileSelected { file: SelectedFile },
    Encrypting,
    LinkReady {
        file: SelectedFile,
        link: Zeroizing<String>,
    },
    Decrypting,
    Ready { artifact: DownloadArtifact },
    Failed,
}

impl Stage {
    fn state(&self) -> SessionState {
        match self {
            Stage::Idle => SessionState::Idle,
            Stage::FileSelected { .. } => SessionState::FileSelected,
            Stage::Encrypting => SessionState::Encrypting,
            Stage::LinkReady { .. } => SessionState::LinkReady,
            Stage::Decrypting => SessionState::Decrypting,
            Stage::Ready { .. } => SessionState::Ready,
            Stage::Failed => SessionState::Failed,
        }
    }
}

/// Orchestrates the sender and receiver flows for one page lifetime
///
/// The session is re-entrant: after [`ShareSession::reset`] it can share or
/// receive again.
pub struct ShareSession {
    id: Uuid,
    config: SessionConfig,
    keys: KeyManager,
    cipher: Cipher,
    transport: Arc<dyn LinkTransport>,
    stage: Stage,
    last_error: Option<ShareError>,
    progress: ProgressTracker,
    state_tx: watch::Sender<SessionState>,
}

impl ShareSession {
    /// Create a session using the operating system RNG and AES-256-GCM
    pub fn new(config: SessionConfig, transport: Arc<dyn LinkTransport>) -> Self {
        Self::with_crypto(config, transport, KeyManager::system(), Cipher::system())
    }

    /// Create a session with explicit key and cipher capabilities
    pub fn with_crypto(
        config: SessionConfig,
        transport: Arc<dyn LinkTransport>,
        keys: KeyManager,
        cipher: Cipher,
    ) -> Self {
        let progress = ProgressTracker::new(config.progress_step, config.progress_ceiling);
        let (state_tx, _rx) = watch::channel(SessionState::Idle);

        Self {
            id: Uuid::new_v4(),
            config,
            keys,
            cipher,
            transport,
            stage: Stage::Idle,
            last_error: None,
            progress,
            state_tx,
        }
    }

    // ============================================================
    // Accessors
    // ============================================================

    /// Unique id of this session, for log correlation
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.stage.state()
    }

    /// Subscribe to state transitions
    pub fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Current progress percentage
    pub fn progress(&self) -> u8 {
        self.progress.current()
    }

    /// Subscribe to progress updates
    pub fn subscribe_progress(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    /// The file picked by the sender, if any
    pub fn selected_file(&self) -> Option<&SelectedFile> {
        match &self.stage {
            Stage::FileSelected { file } | Stage::LinkReady { file, .. } => Some(file),
            _ => None,
        }
    }

    /// The finished share link, in `LinkReady`
    pub fn share_link(&self) -> Option<&str> {
        match &self.stage {
            Stage::LinkReady { link, .. } => Some(link.as_str()),
            _ => None,
        }
    }

    /// The decrypted file, in `Ready`
    pub fn download(&self) -> Option<&DownloadArtifact> {
        match &self.stage {
            Stage::Ready { artifact } => Some(artifact),
            _ => None,
        }
    }

    /// The generic failure message, in `Failed`
    pub fn failure_message(&self) -> Option<&'static str> {
        match self.stage {
            Stage::Failed => Some(DECRYPT_FAILURE_MESSAGE),
            _ => None,
        }
    }

    /// The last sender-side error, cleared on the next successful step
    pub fn last_error(&self) -> Option<&ShareError> {
        self.last_error.as_ref()
    }

    // ============================================================
    // Sender path
    // ============================================================

    /// Pick the file to share
    ///
    /// Allowed while idle or while another file is selected. Files above the
    /// configured ceiling are rejected before any cryptographic work and
    /// leave the session unchanged.
    pub fn select_file(&mut self, file: SelectedFile) -> ShareResult<()> {
        match self.state() {
            SessionState::Idle | SessionState::FileSelected => {}
            state => {
                return Err(ShareError::InvalidState {
                    operation: "select a file",
                    state,
                });
            }
        }

        if file.size() > self.config.max_file_size {
            let err = ShareError::FileTooLarge {
                size: file.size(),
                limit: self.config.max_file_size,
            };
            warn!(session_id = %self.id, size = file.size(), limit = self.config.max_file_size, "rejected oversized file");
            self.last_error = Some(err.clone());
            return Err(err);
        }

        debug!(session_id = %self.id, size = file.size(), mime_type = file.mime_type(), "file selected");
        self.last_error = None;
        self.set_stage(Stage::FileSelected { file });
        Ok(())
    }

    /// Encrypt the selected file and produce a share link
    ///
    /// A fresh key is generated for every call. On failure the session
    /// returns to `FileSelected` with the file kept, so the sender can retry.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn encrypt_and_share(&mut self) -> ShareResult<String> {
        let file = match std::mem::replace(&mut self.stage, Stage::Idle) {
            Stage::FileSelected { file } => file,
            other => {
                let state = other.state();
                self.stage = other;
                return Err(ShareError::InvalidState {
                    operation: "encrypt",
                    state,
                });
            }
        };

        self.progress.reset();
        self.set_stage(Stage::Encrypting);
        let result = self.seal(&file);

        match result {
            Ok(link) => {
                info!(size = file.size(), link_len = link.len(), "share link ready");
                self.last_error = None;
                let shared = link.to_string();
                self.set_stage(Stage::LinkReady { file, link });
                self.progress.complete();
                Ok(shared)
            }
            Err(e) => {
                warn!(error = %e, "encryption failed");
                self.progress.reset();
                self.last_error = Some(e.clone());
                self.set_stage(Stage::FileSelected { file });
                Err(e)
            }
        }
    }

    fn seal(&self, file: &SelectedFile) -> ShareResult<Zeroizing<String>> {
        let key = self.keys.generate()?;
        self.progress.advance();

        let sealed = self
            .cipher
            .encrypt(file.bytes(), &key)
            .map_err(|e| ShareError::EncryptionFailed(e.to_string()))?;
        self.progress.advance();

        let package = EncryptedPackage::new(sealed, file.metadata());
        let package_token =
            serialize_package(&package).map_err(|e| ShareError::EncryptionFailed(e.to_string()))?;
        self.progress.advance();

        let key_token = Zeroizing::new(to_url_safe_text(self.keys.export(&key).as_slice()));
        let location = self.transport.read();

        Ok(Zeroizing::new(build(
            base_of(&location),
            &package_token,
            &key_token,
        )))
    }

    // ============================================================
    // Receiver path
    // ============================================================

    /// Check the location for a share fragment and open it
    ///
    /// Returns `Ok(false)` when the location holds no share fragment. When
    /// one is present the session moves through `Decrypting` to either
    /// `Ready` or `Failed` and this returns `Ok(true)`; the failure cause is
    /// never exposed beyond [`DECRYPT_FAILURE_MESSAGE`].
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn detect_link(&mut self) -> ShareResult<bool> {
        let state = self.state();
        if state != SessionState::Idle {
            return Err(ShareError::InvalidState {
                operation: "open a link",
                state,
            });
        }

        let location = self.transport.read();
        let Some(tokens) = parse(fragment_of(&location)) else {
            return Ok(false);
        };

        self.progress.reset();
        self.set_stage(Stage::Decrypting);

        match self.open(&tokens) {
            Ok(artifact) => {
                info!(size = artifact.bytes().len(), "share link opened");
                self.progress.complete();
                self.set_stage(Stage::Ready { artifact });
            }
            Err(e) => {
                // Kind only; the user-facing state carries the generic message
                debug!(kind = error_kind(&e), "share link failed to open");
                self.progress.reset();
                self.set_stage(Stage::Failed);
            }
        }

        Ok(true)
    }

    fn open(&self, tokens: &LinkTokens) -> ShareResult<DownloadArtifact> {
        let package = deserialize_package(&tokens.package)?;
        self.progress.advance();

        let key = self.import_key(&tokens.key)?;
        self.progress.advance();

        let bytes = self
            .cipher
            .decrypt(&package.nonce, &package.ciphertext, &key)?;

        if bytes.len() as u64 != package.metadata.size_bytes {
            debug!(
                carried = package.metadata.size_bytes,
                actual = bytes.len(),
                "link metadata size differs from decrypted size"
            );
        }

        Ok(DownloadArtifact::new(package.metadata, bytes))
    }

    fn import_key(&self, token: &str) -> ShareResult<SymmetricKey> {
        let bytes = Zeroizing::new(
            from_url_safe_text(token).map_err(|e| ShareError::MalformedKey(e.to_string()))?,
        );
        Ok(self.keys.import(&bytes)?)
    }

    // ============================================================
    // Reset
    // ============================================================

    /// Return to `Idle` from any state
    ///
    /// Drops (and wipes) any file, link or decrypted content, and rewrites
    /// the location without its fragment.
    pub fn reset(&mut self) {
        debug!(session_id = %self.id, from = %self.state(), "session reset");
        self.set_stage(Stage::Idle);
        self.last_error = None;
        self.progress.reset();

        let location = self.transport.read();
        self.transport.write(base_of(&location));
    }

    fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
        self.state_tx.send_replace(self.stage.state());
    }
}

impl fmt::Debug for ShareSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShareSession")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("progress", &self.progress())
            .finish_non_exhaustive()
    }
}

fn error_kind(e: &ShareError) -> &'static str {
    match e {
        ShareError::FileTooLarge { .. } => "file_too_large",
        ShareError::InvalidState { .. } => "invalid_state",
        ShareError::EntropyUnavailable(_) => "entropy_unavailable",
        ShareError::MalformedKey(_) => "malformed_key",
        ShareError::MalformedPackage(_) => "malformed_package",
        ShareError::AuthenticationFailed => "authentication_failed",
        ShareError::EncryptionFailed(_) => "encryption_failed",
    }
}
