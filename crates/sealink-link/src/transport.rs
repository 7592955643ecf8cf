//! Location abstraction
//!
//! The [`LinkTransport`] trait stands in for the page location a share link
//! arrives through. The session reads it once on load to detect an incoming
//! link, and writes it back on reset to clear the fragment. This keeps the
//! protocol independent of any particular UI runtime.
//!
//! ## Implementations
//!
//! - [`MemoryLocation`]: in-memory location, used by tests and the CLI

use parking_lot::Mutex;

/// Read and replace the current location
pub trait LinkTransport: Send + Sync {
    /// The full current location, fragment included
    fn read(&self) -> String;

    /// Replace the current location
    fn write(&self, location: &str);
}

/// In-memory location
///
/// Records every write so tests can check what was exposed.
#[derive(Debug, Default)]
pub struct MemoryLocation {
    current: Mutex<String>,
    history: Mutex<Vec<String>>,
}

impl MemoryLocation {
    /// Create a location starting at `initial`
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            current: Mutex::new(initial.into()),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Every location written so far, oldest first
    pub fn history(&self) -> Vec<String> {
        self.history.lock().clone()
    }
}

impl LinkTransport for MemoryLocation {
    fn read(&self) -> String {
        self.current.lock().clone()
    }

    fn write(&self, location: &str) {
        *self.current.lock() = location.to_string();
        self.history.lock().push(location.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_location_read_write() {
        let location = MemoryLocation::new("https://example.com/#d=a&k=b");
        assert_eq!(location.read(), "https://example.com/#d=a&k=b");

        location.write("https://example.com/");
        assert_eq!(location.read(), "https://example.com/");
        assert_eq!(location.history(), vec!["https://example.com/".to_string()]);
    }

    #[test]
    fn test_default_is_empty() {
        let location = MemoryLocation::default();
        assert_eq!(location.read(), "");
        assert!(location.history().is_empty());
    }
}
