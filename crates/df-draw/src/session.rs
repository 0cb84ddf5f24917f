//! Shared engine handle
//!
//! The presentation layer holds clones of this handle and nothing else;
//! the roster, prize queue, pool, and history live inside the engine and
//! are mutated only through its operations.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::engine::DrawEngine;

/// Cloneable handle to one shared [`DrawEngine`]
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<DrawEngine>>,
}

impl SharedEngine {
    /// Wrap an engine for shared access
    pub fn new(engine: DrawEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    /// Read access for rendering
    pub fn read(&self) -> RwLockReadGuard<'_, DrawEngine> {
        self.inner.read()
    }

    /// Write access for event handlers and timer callbacks
    pub fn write(&self) -> RwLockWriteGuard<'_, DrawEngine> {
        self.inner.write()
    }
}

impl Default for SharedEngine {
    fn default() -> Self {
        Self::new(DrawEngine::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let session = SharedEngine::default();
        let renderer = session.clone();

        session.write().add_participants("Alice,Bob");
        assert_eq!(renderer.read().roster().len(), 2);
    }
}
