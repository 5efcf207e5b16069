//! Encoders for exported frame sequences.
//!
//! An encoder receives rasterized frames in order, each with its display delay, and produces the
//! final artifact bytes in [`FrameEncoder::finish`].

/// Animated GIF encoder (`image` crate).
pub mod gif;
/// Generic encoder trait and the in-memory encoder.
pub mod sink;
