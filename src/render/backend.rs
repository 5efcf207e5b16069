use std::sync::Arc;

use crate::{
    foundation::core::Rgba8Premul,
    foundation::error::{DrillError, DrillResult},
    render::renderer::DrawCommands,
};

/// A rasterized frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**. The `premultiplied` flag keeps that explicit at encoder
/// boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Frame filled with a single premultiplied color.
    pub fn solid(width: u32, height: u32, color: Rgba8Premul) -> Self {
        let px = color.to_array();
        let data = std::iter::repeat_n(px, width as usize * height as usize)
            .flatten()
            .collect();
        Self {
            width,
            height,
            data,
            premultiplied: true,
        }
    }

    /// Pixel at `(x, y)` as stored, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel data, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    pub(crate) fn check_len(&self) -> DrillResult<()> {
        let expected = self.width as usize * self.height as usize * 4;
        if self.data.len() != expected {
            return Err(DrillError::render(format!(
                "frame data length {} does not match {}x{} rgba8",
                self.data.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }
}

/// Rasterization options.
#[derive(Clone, Debug)]
pub struct RasterOpts {
    /// Straight-alpha RGBA8 color the frame is cleared to before drawing.
    pub background_rgba: [u8; 4],
    /// Font used for text elements. Without one, text commands are skipped.
    pub font: Option<Arc<Vec<u8>>>,
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            background_rgba: [255, 255, 255, 255],
            font: None,
        }
    }
}

impl RasterOpts {
    /// Use `bytes` (TTF/OTF) for text elements.
    pub fn with_font(mut self, bytes: Vec<u8>) -> Self {
        self.font = Some(Arc::new(bytes));
        self
    }

    /// Read a font file for text elements.
    pub fn with_font_file(self, path: impl AsRef<std::path::Path>) -> DrillResult<Self> {
        use anyhow::Context;

        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Ok(self.with_font(bytes))
    }

    /// Transparent background.
    pub fn transparent(mut self) -> Self {
        self.background_rgba = [0, 0, 0, 0];
        self
    }
}

/// Turns a draw-command sequence into pixels.
pub trait RasterBackend {
    /// Rasterize `commands` onto a fresh `width`x`height` frame.
    fn rasterize(
        &mut self,
        commands: &DrawCommands<'_>,
        width: u32,
        height: u32,
    ) -> DrillResult<FrameRGBA>;
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
