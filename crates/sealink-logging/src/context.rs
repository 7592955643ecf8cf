//! Session context injection
//!
//! Thread-local storage for the active share session, so every span opened
//! while a session runs can be tagged with its id and role.

use std::cell::RefCell;
use std::fmt;

use uuid::Uuid;

/// Session context data stored in thread-local storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContextData {
    /// Id of the share session
    pub session_id: Uuid,
    /// Which side of the exchange the session plays
    pub role: SessionRole,
}

/// Side of a share exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRole {
    /// Encrypts a file and produces a link
    Sender,
    /// Opens a link and decrypts the file
    Receiver,
    /// Only reads a link without decrypting
    Inspector,
}

impl fmt::Display for SessionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionRole::Sender => write!(f, "sender"),
            SessionRole::Receiver => write!(f, "receiver"),
            SessionRole::Inspector => write!(f, "inspector"),
        }
    }
}

thread_local! {
    static SESSION_CONTEXT: RefCell<Option<SessionContextData>> = const { RefCell::new(None) };
}

/// RAII guard for session context
///
/// Sets the session context for the current thread and restores the
/// previous one (if any) when dropped.
///
/// # Example
///
/// ```rust
/// use sealink_logging::{SessionContextGuard, SessionRole};
/// use uuid::Uuid;
///
/// let id = Uuid::new_v4();
/// {
///     let _guard = SessionContextGuard::new(id, SessionRole::Sender);
///     assert_eq!(SessionContextGuard::current_session_id(), Some(id));
/// }
/// assert!(SessionContextGuard::current().is_none());
/// ```
pub struct SessionContextGuard {
    previous: Option<SessionContextData>,
}

impl SessionContextGuard {
    /// Enter a session context for the current scope
    pub fn new(session_id: Uuid, role: SessionRole) -> Self {
        let previous = SESSION_CONTEXT.with(|ctx| {
            ctx.borrow_mut()
                .replace(SessionContextData { session_id, role })
        });
        Self { previous }
    }

    /// Get the current session context (if any)
    pub fn current() -> Option<SessionContextData> {
        SESSION_CONTEXT.with(|ctx| ctx.borrow().clone())
    }

    /// Get the current session id (if set)
    pub fn current_session_id() -> Option<Uuid> {
        Self::current().map(|ctx| ctx.session_id)
    }
}

impl Drop for SessionContextGuard {
    fn drop(&mut self) {
        SESSION_CONTEXT.with(|ctx| *ctx.borrow_mut() = self.previous.take());
    }
}
