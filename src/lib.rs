//! Drillframe is a resolution-independent drill diagram engine.
//!
//! A [`DrillDocument`] is an ordered sequence of [`Frame`]s, each holding positioned
//! [`Element`]s in normalized `[0, 1]` coordinates. The public API is layered:
//!
//! - Build or load a document (JSON payload, [`DrillBuilder`], or the mutation methods)
//! - Map a frame to [`DrawCommand`]s with [`render`] for any canvas size
//! - Rasterize with [`CpuRasterizer`], produce thumbnails, or drive an [`ExportController`]
//!   into a [`FrameEncoder`] such as [`GifEncoder`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod model;
pub(crate) mod schema;

/// Frame encoders.
pub mod encode;
/// Stepwise export and playback.
pub mod export;
pub mod render;
pub mod thumbnail;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{DrillError, DrillResult};

pub use crate::model::color::{Color, DEFAULT_COLOR};
pub use crate::model::document::DrillDocument;
pub use crate::model::dsl::{DrillBuilder, FrameBuilder};
pub use crate::model::element::{
    DEFAULT_TEXT, Element, ElementType, EquipmentKind, MovementKind, clamp_to_canvas,
    create_element,
};
pub use crate::model::frame::Frame;
pub use crate::model::patch::ElementPatch;

pub use crate::encode::gif::{GifEncoder, GifEncoderOpts};
pub use crate::encode::sink::{EncoderConfig, FrameEncoder, InMemoryEncoder};
pub use crate::export::controller::{
    CancelToken, ExportArtifact, ExportController, ExportOpts, ExportOutcome, ExportProgress,
    ExportState, ExportStep,
};
pub use crate::export::playback::Playback;
pub use crate::export::worker::{ExportHandle, spawn_export};
pub use crate::render::backend::{FrameRGBA, RasterBackend, RasterOpts};
pub use crate::render::command::{ArrowHead, DrawCommand, StrokeStyle};
pub use crate::render::cpu::CpuRasterizer;
pub use crate::render::renderer::{
    DrawCommandIter, DrawCommands, RenderOpts, render, render_with,
};
pub use crate::thumbnail::{
    ThumbnailMode, ThumbnailOpts, encode_png, render_thumbnail, thumbnail_commands, thumbnail_png,
};
