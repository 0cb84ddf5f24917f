//! df-state: Persistent preferences for DrawForge
//!
//! The only state that survives a session is the user's theme choice;
//! roster, prizes, and draw history are deliberately ephemeral.

mod preferences;

pub use preferences::*;
