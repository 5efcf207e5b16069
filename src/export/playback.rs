use crate::{
    foundation::error::{DrillError, DrillResult},
    model::document::DrillDocument,
};

/// Frame cursor for interactive playback.
///
/// Advances on timer ticks using per-frame durations, or on demand. Durations are captured from
/// the document when the cursor is created or re-synced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Playback {
    durations_ms: Vec<u32>,
    current: usize,
    elapsed_in_frame_ms: u64,
    looping: bool,
    playing: bool,
}

impl Playback {
    /// Cursor over `doc` at frame 0, paused.
    ///
    /// Frames without a `durationMs` are shown for `default_frame_ms`.
    pub fn new(doc: &DrillDocument, default_frame_ms: u32, looping: bool) -> DrillResult<Self> {
        let mut p = Self {
            durations_ms: Vec::new(),
            current: 0,
            elapsed_in_frame_ms: 0,
            looping,
            playing: false,
        };
        p.sync(doc, default_frame_ms)?;
        Ok(p)
    }

    /// Re-read frame durations after the document changed. The cursor is clamped to the new
    /// frame range.
    pub fn sync(&mut self, doc: &DrillDocument, default_frame_ms: u32) -> DrillResult<()> {
        if default_frame_ms == 0 {
            return Err(DrillError::invalid_export("frame duration must be > 0 ms"));
        }
        self.durations_ms = doc
            .frames()
            .iter()
            .map(|f| f.effective_duration_ms(default_frame_ms))
            .collect();
        if self.current >= self.durations_ms.len() {
            self.current = self.durations_ms.len().saturating_sub(1);
            self.elapsed_in_frame_ms = 0;
        }
        if self.durations_ms.is_empty() {
            self.playing = false;
        }
        Ok(())
    }

    /// Index of the frame to display, or `None` for an empty document.
    pub fn current(&self) -> Option<usize> {
        (!self.durations_ms.is_empty()).then_some(self.current)
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.durations_ms.len()
    }

    /// Return `true` for an empty document.
    pub fn is_empty(&self) -> bool {
        self.durations_ms.is_empty()
    }

    /// Start advancing on ticks. Restarts from frame 0 when a non-looping run already ended.
    pub fn play(&mut self) {
        if self.durations_ms.is_empty() {
            return;
        }
        if !self.looping && self.at_end() {
            self.current = 0;
            self.elapsed_in_frame_ms = 0;
        }
        self.playing = true;
    }

    /// Stop advancing on ticks.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Return `true` while playing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether playback wraps around after the last frame.
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Enable or disable wrap-around.
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Advance by `elapsed_ms` of wall time. Returns `true` when the displayed frame changed.
    ///
    /// Without looping, playback stops on the last frame once its duration has elapsed.
    pub fn tick(&mut self, elapsed_ms: u64) -> bool {
        if !self.playing || self.durations_ms.is_empty() {
            return false;
        }
        let before = self.current;
        let mut budget = self.elapsed_in_frame_ms.saturating_add(elapsed_ms);

        // Skip whole cycles so huge ticks stay cheap.
        if self.looping {
            let cycle = self.total_duration_ms();
            if cycle > 0 && budget >= cycle {
                budget %= cycle;
            }
        }

        loop {
            let frame_ms = u64::from(self.durations_ms[self.current]);
            if budget < frame_ms {
                break;
            }
            if self.current + 1 < self.durations_ms.len() {
                budget -= frame_ms;
                self.current += 1;
            } else if self.looping {
                budget -= frame_ms;
                self.current = 0;
            } else {
                budget = frame_ms;
                self.playing = false;
                break;
            }
        }
        self.elapsed_in_frame_ms = budget;
        self.current != before
    }

    /// Step to the next frame (wrapping when looping). Returns the new index.
    pub fn next_frame(&mut self) -> Option<usize> {
        let len = self.durations_ms.len();
        if len == 0 {
            return None;
        }
        if self.current + 1 < len {
            self.current += 1;
        } else if self.looping {
            self.current = 0;
        }
        self.elapsed_in_frame_ms = 0;
        Some(self.current)
    }

    /// Step to the previous frame (wrapping when looping). Returns the new index.
    pub fn prev_frame(&mut self) -> Option<usize> {
        let len = self.durations_ms.len();
        if len == 0 {
            return None;
        }
        if self.current > 0 {
            self.current -= 1;
        } else if self.looping {
            self.current = len - 1;
        }
        self.elapsed_in_frame_ms = 0;
        Some(self.current)
    }

    /// Jump to frame `index`.
    pub fn seek(&mut self, index: usize) -> DrillResult<()> {
        let len = self.durations_ms.len();
        if index >= len {
            return Err(DrillError::frame_index(index, len));
        }
        self.current = index;
        self.elapsed_in_frame_ms = 0;
        Ok(())
    }

    /// Sum of all frame durations.
    pub fn total_duration_ms(&self) -> u64 {
        self.durations_ms.iter().map(|d| u64::from(*d)).sum()
    }

    /// Time since the start of the sequence.
    pub fn position_ms(&self) -> u64 {
        let before: u64 = self.durations_ms[..self.current]
            .iter()
            .map(|d| u64::from(*d))
            .sum();
        before + self.elapsed_in_frame_ms
    }

    fn at_end(&self) -> bool {
        self.current + 1 == self.durations_ms.len()
            && self.elapsed_in_frame_ms >= u64::from(self.durations_ms[self.current])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/playback.rs"]
mod tests;
