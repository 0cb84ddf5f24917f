//! Cancelable roll scheduling
//!
//! The rolling phase spans time: a periodic display tick plus one delayed
//! stop signal, both scheduled by the host event loop. Each roll is
//! identified by a token captured at start; any competing transition
//! (reset, roster change, a second start) invalidates the token, so a
//! stale stop callback can never land on a pool that was reset after the
//! callback was scheduled.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

/// Token identifying one scheduled roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RollToken(pub(crate) u64);

/// Cancel flag shared with host-owned timers
///
/// Cloned into the tick and stop callbacks at roll start. The engine
/// cancels it on any competing transition; hosts check it before firing.
#[derive(Debug, Clone, Default)]
pub struct CancelGuard {
    canceled: Arc<AtomicBool>,
}

impl CancelGuard {
    /// Create a fresh, un-canceled guard
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the scheduled work as canceled
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::Release);
    }

    /// Check whether the scheduled work was canceled
    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Acquire)
    }
}
