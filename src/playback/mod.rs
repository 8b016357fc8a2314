//! Frame-driven playback.

/// Looping playback state machine.
pub mod controller;
