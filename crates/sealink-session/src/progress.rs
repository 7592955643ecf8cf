//! Cosmetic progress reporting
//!
//! Encryption of a 2 MiB file is fast, but a UI still wants something to
//! animate. Progress climbs by a fixed step per completed stage and stops at
//! a ceiling below 100. Only [`ProgressTracker::complete`], called once the
//! link exists, reports 100.

use tokio::sync::watch;

/// Publishes progress percentages over a watch channel
#[derive(Debug)]
pub struct ProgressTracker {
    tx: watch::Sender<u8>,
    step: u8,
    ceiling: u8,
}

impl ProgressTracker {
    /// Percentage reported once the operation has succeeded
    pub const COMPLETE: u8 = 100;

    /// Create a tracker starting at zero
    pub fn new(step: u8, ceiling: u8) -> Self {
        let (tx, _rx) = watch::channel(0);
        Self {
            tx,
            step,
            ceiling: ceiling.min(Self::COMPLETE - 1),
        }
    }

    /// Subscribe to progress updates
    pub fn subscribe(&self) -> watch::Receiver<u8> {
        self.tx.subscribe()
    }

    /// Current percentage
    pub fn current(&self) -> u8 {
        *self.tx.borrow()
    }

    /// Record one completed step, never passing the ceiling
    pub fn advance(&self) {
        let (step, ceiling) = (self.step, self.ceiling);
        self.tx.send_modify(|p| *p = p.saturating_add(step).min(ceiling));
    }

    /// Report completion
    pub fn complete(&self) {
        self.tx.send_replace(Self::COMPLETE);
    }

    /// Back to zero
    pub fn reset(&self) {
        self.tx.send_replace(0);
    }
}
