//! Small static previews of a drill.

use std::io::Cursor;

use crate::{
    foundation::core::Canvas,
    foundation::error::{DrillError, DrillResult},
    model::document::DrillDocument,
    render::backend::{FrameRGBA, RasterBackend, RasterOpts},
    render::cpu::CpuRasterizer,
    render::renderer::{DrawCommands, RenderOpts},
};

/// Which part of the first frame a thumbnail shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThumbnailMode {
    /// Only the first element of the first frame (list-preview behavior).
    #[default]
    FirstElement,
    /// The complete first frame.
    FullFrame,
}

impl ThumbnailMode {
    /// Parse `"first-element"` / `"full-frame"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-element" | "first" => Some(Self::FirstElement),
            "full-frame" | "full" => Some(Self::FullFrame),
            _ => None,
        }
    }
}

/// Thumbnail options.
#[derive(Clone, Debug)]
pub struct ThumbnailOpts {
    /// Output width in pixels (default 160).
    pub width: u32,
    /// Output height in pixels (default 100).
    pub height: u32,
    /// Content selection.
    pub mode: ThumbnailMode,
    /// Renderer options.
    pub render: RenderOpts,
    /// Rasterizer options.
    pub raster: RasterOpts,
}

impl Default for ThumbnailOpts {
    fn default() -> Self {
        Self {
            width: Canvas::REFERENCE.width,
            height: Canvas::REFERENCE.height,
            mode: ThumbnailMode::default(),
            render: RenderOpts::default(),
            raster: RasterOpts::default(),
        }
    }
}

/// Draw commands a thumbnail of `doc` consists of.
///
/// A document without frames, or whose first frame is empty, yields no commands.
pub fn thumbnail_commands<'a>(doc: &'a DrillDocument, opts: &ThumbnailOpts) -> DrawCommands<'a> {
    let elements = match doc.frame(0) {
        None => &[][..],
        Some(frame) => match opts.mode {
            ThumbnailMode::FirstElement => &frame.elements()[..frame.len().min(1)],
            ThumbnailMode::FullFrame => frame.elements(),
        },
    };
    DrawCommands::new(elements, opts.width, opts.height, opts.render)
}

/// Render a thumbnail bitmap of `doc`.
#[tracing::instrument(
    level = "debug",
    skip(doc, opts),
    fields(mode = ?opts.mode, w = opts.width, h = opts.height)
)]
pub fn render_thumbnail(doc: &DrillDocument, opts: &ThumbnailOpts) -> DrillResult<FrameRGBA> {
    Canvas::new(opts.width, opts.height)?;
    let commands = thumbnail_commands(doc, opts);
    CpuRasterizer::new(opts.raster.clone()).rasterize(&commands, opts.width, opts.height)
}

/// Render a thumbnail and encode it as PNG bytes.
pub fn thumbnail_png(doc: &DrillDocument, opts: &ThumbnailOpts) -> DrillResult<Vec<u8>> {
    let frame = render_thumbnail(doc, opts)?;
    encode_png(&frame)
}

/// Encode a frame as PNG (straight alpha).
pub fn encode_png(frame: &FrameRGBA) -> DrillResult<Vec<u8>> {
    frame.check_len()?;
    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.to_straight_rgba8())
        .ok_or_else(|| DrillError::encoding("frame buffer does not match its dimensions"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| DrillError::encoding(format!("encode png: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../tests/unit/thumbnail.rs"]
mod tests;
