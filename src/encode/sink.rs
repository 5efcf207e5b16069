use crate::foundation::error::{DrillError, DrillResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameEncoder`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Number of frames that will be submitted.
    pub frame_count: usize,
}

/// Encoder contract for consuming captured frames in order.
///
/// `begin` is called once, then `add_frame` once per frame in document order, then `finish`
/// exactly once. An encoder instance serves a single export and is dropped afterwards.
pub trait FrameEncoder: Send {
    /// Short format name recorded in the export artifact (`"gif"`, ...).
    fn format(&self) -> &'static str;
    /// Called once before any frames are submitted.
    fn begin(&mut self, cfg: EncoderConfig) -> DrillResult<()>;
    /// Submit one frame shown for `delay_ms` milliseconds.
    fn add_frame(&mut self, frame: &FrameRGBA, delay_ms: u32) -> DrillResult<()>;
    /// Finalize and return the encoded bytes.
    fn finish(&mut self) -> DrillResult<Vec<u8>>;
}

/// In-memory encoder for tests and debugging.
///
/// `finish` returns the concatenated raw premultiplied RGBA8 data of all frames.
#[derive(Debug, Default)]
pub struct InMemoryEncoder {
    cfg: Option<EncoderConfig>,
    /// Frames with their delays, in submission order.
    pub(crate) frames: Vec<(FrameRGBA, u32)>,
    finished: bool,
}

impl InMemoryEncoder {
    /// Create a new in-memory encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<EncoderConfig> {
        self.cfg
    }

    /// Borrow the captured frames and their delays.
    pub fn frames(&self) -> &[(FrameRGBA, u32)] {
        &self.frames
    }

    /// Return `true` once `finish` has run.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameEncoder for InMemoryEncoder {
    fn format(&self) -> &'static str {
        "rgba8"
    }

    fn begin(&mut self, cfg: EncoderConfig) -> DrillResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn add_frame(&mut self, frame: &FrameRGBA, delay_ms: u32) -> DrillResult<()> {
        check_frame(self.cfg, frame)?;
        self.frames.push((frame.clone(), delay_ms));
        Ok(())
    }

    fn finish(&mut self) -> DrillResult<Vec<u8>> {
        if self.cfg.is_none() {
            return Err(DrillError::encoding("finish called before begin"));
        }
        self.finished = true;
        Ok(self
            .frames
            .iter()
            .flat_map(|(f, _)| f.data.iter().copied())
            .collect())
    }
}

/// Check that `frame` matches the configured dimensions.
pub(crate) fn check_frame(cfg: Option<EncoderConfig>, frame: &FrameRGBA) -> DrillResult<()> {
    let cfg = cfg.ok_or_else(|| DrillError::encoding("frame submitted before begin"))?;
    if frame.width != cfg.width || frame.height != cfg.height {
        return Err(DrillError::encoding(format!(
            "frame is {}x{}, encoder expects {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    frame
        .check_len()
        .map_err(|e| DrillError::encoding(e.to_string()))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
