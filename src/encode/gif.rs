use image::codecs::gif::{GifEncoder as ImageGifEncoder, Repeat};

use crate::{
    encode::sink::{EncoderConfig, FrameEncoder, check_frame},
    foundation::error::{DrillError, DrillResult},
    render::backend::FrameRGBA,
};

/// Options for [`GifEncoder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GifEncoderOpts {
    /// Loop forever (`true`) or play once.
    pub repeat: bool,
    /// Color quantization speed, `1..=30`; lower is slower and more accurate.
    pub speed: i32,
}

impl Default for GifEncoderOpts {
    fn default() -> Self {
        Self {
            repeat: true,
            speed: 10,
        }
    }
}

/// Animated GIF encoder.
///
/// Frames are converted to straight alpha and buffered by `add_frame`; `finish` quantizes and
/// writes the whole animation.
#[derive(Debug, Default)]
pub struct GifEncoder {
    opts: GifEncoderOpts,
    cfg: Option<EncoderConfig>,
    frames: Vec<(image::RgbaImage, u32)>,
}

impl GifEncoder {
    /// Create an encoder with the given options.
    pub fn new(opts: GifEncoderOpts) -> DrillResult<Self> {
        if !(1..=30).contains(&opts.speed) {
            return Err(DrillError::invalid_export(format!(
                "gif speed must be in 1..=30, got {}",
                opts.speed
            )));
        }
        Ok(Self {
            opts,
            cfg: None,
            frames: Vec::new(),
        })
    }
}

impl FrameEncoder for GifEncoder {
    fn format(&self) -> &'static str {
        "gif"
    }

    fn begin(&mut self, cfg: EncoderConfig) -> DrillResult<()> {
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(DrillError::encoding(format!(
                "gif frames are limited to 65535x65535, got {}x{}",
                cfg.width, cfg.height
            )));
        }
        self.cfg = Some(cfg);
        self.frames.clear();
        self.frames.reserve(cfg.frame_count);
        Ok(())
    }

    fn add_frame(&mut self, frame: &FrameRGBA, delay_ms: u32) -> DrillResult<()> {
        check_frame(self.cfg, frame)?;
        let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.to_straight_rgba8())
            .ok_or_else(|| DrillError::encoding("frame buffer does not match its dimensions"))?;
        self.frames.push((img, delay_ms));
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self), fields(frames = self.frames.len()))]
    fn finish(&mut self) -> DrillResult<Vec<u8>> {
        if self.cfg.is_none() {
            return Err(DrillError::encoding("finish called before begin"));
        }
        if self.frames.is_empty() {
            return Err(DrillError::encoding("gif needs at least one frame"));
        }

        let mut buf = Vec::new();
        {
            let mut enc = ImageGifEncoder::new_with_speed(&mut buf, self.opts.speed);
            let repeat = if self.opts.repeat {
                Repeat::Infinite
            } else {
                Repeat::Finite(0)
            };
            enc.set_repeat(repeat)
                .map_err(|e| DrillError::encoding(format!("gif repeat: {e}")))?;
            for (img, delay_ms) in self.frames.drain(..) {
                let delay = image::Delay::from_numer_denom_ms(delay_ms, 1);
                enc.encode_frame(image::Frame::from_parts(img, 0, 0, delay))
                    .map_err(|e| DrillError::encoding(format!("gif frame: {e}")))?;
            }
        }
        Ok(buf)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
