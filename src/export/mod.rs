//! Playback and frame-capture export.

/// Step-driven export state machine.
pub mod controller;
/// Interactive playback cursor.
pub mod playback;
/// Background-thread export runner.
pub mod worker;
