//! Frame rendering: elements to draw commands, draw commands to pixels.

/// Raster frame type and backend contract.
pub mod backend;
/// Surface-agnostic draw command primitives.
pub mod command;
/// CPU rasterizer (`vello_cpu`).
pub mod cpu;
/// Element-to-command mapping.
pub mod renderer;
pub(crate) mod text;
