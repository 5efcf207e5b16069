use crate::{
    foundation::error::{DrillError, DrillResult},
    model::element::Element,
    model::frame::Frame,
    model::patch::ElementPatch,
};

/// A complete drill: an ordered sequence of frames plus document-level metadata.
///
/// The document exclusively owns its frames and elements. All edits go through the index-based
/// methods below; an edit that fails leaves the document unchanged. Edits take `&mut self`, so
/// concurrent mutation is ruled out by the borrow checker and callers serialize edits.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrillDocument {
    pub(crate) title: Option<String>,
    pub(crate) frames: Vec<Frame>,
    pub(crate) extra: serde_json::Map<String, serde_json::Value>,
}

impl DrillDocument {
    /// Empty document with no frames.
    pub fn new() -> Self {
        Self::default()
    }

    /// Document holding `frames` in order.
    pub fn with_frames(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            ..Self::default()
        }
    }

    /// Document title, when the persistence layer supplied one.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set or clear the title.
    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    /// Frames in order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frame at `index`, if any.
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Return `true` when the document has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Unknown document-level payload fields (authoring identifiers and the like).
    pub fn extra(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.extra
    }

    /// Insert an empty frame. `at` is clamped to `[0, len]`; returns the index used.
    pub fn insert_frame(&mut self, at: usize) -> usize {
        let at = at.min(self.frames.len());
        self.frames.insert(at, Frame::new());
        at
    }

    /// Deep-copy frame `index` into a new frame right after it; returns the new index.
    pub fn duplicate_frame(&mut self, index: usize) -> DrillResult<usize> {
        let copy = self.frame_ref(index)?.clone();
        self.frames.insert(index + 1, copy);
        Ok(index + 1)
    }

    /// Remove frame `from` and reinsert it at `to`. Other frames keep their relative order.
    pub fn move_frame(&mut self, from: usize, to: usize) -> DrillResult<()> {
        let len = self.frames.len();
        if from >= len {
            return Err(DrillError::frame_index(from, len));
        }
        if to >= len {
            return Err(DrillError::frame_index(to, len));
        }
        let frame = self.frames.remove(from);
        self.frames.insert(to, frame);
        Ok(())
    }

    /// Remove and return frame `index`.
    pub fn remove_frame(&mut self, index: usize) -> DrillResult<Frame> {
        self.frame_ref(index)?;
        Ok(self.frames.remove(index))
    }

    /// Set or clear the per-frame duration override. Durations must be `> 0`.
    pub fn set_frame_duration(&mut self, index: usize, duration_ms: Option<u32>) -> DrillResult<()> {
        if duration_ms == Some(0) {
            return Err(DrillError::invalid_element("frame duration must be > 0 ms"));
        }
        self.frame_mut(index)?.duration_ms = duration_ms;
        Ok(())
    }

    /// Set or clear the frame label.
    pub fn set_frame_label(&mut self, index: usize, label: Option<String>) -> DrillResult<()> {
        self.frame_mut(index)?.label = label;
        Ok(())
    }

    /// Append `element` to frame `frame_index` (top of the z-order); returns its index.
    pub fn add_element(&mut self, frame_index: usize, element: Element) -> DrillResult<usize> {
        element.validate()?;
        let frame = self.frame_mut(frame_index)?;
        frame.elements.push(element);
        Ok(frame.elements.len() - 1)
    }

    /// Remove and return element `element_index` of frame `frame_index`.
    pub fn remove_element(
        &mut self,
        frame_index: usize,
        element_index: usize,
    ) -> DrillResult<Element> {
        let frame = self.frame_mut(frame_index)?;
        let len = frame.elements.len();
        if element_index >= len {
            return Err(DrillError::element_index(element_index, len));
        }
        Ok(frame.elements.remove(element_index))
    }

    /// Apply `patch` to one element.
    ///
    /// The patched element is validated before it replaces the stored one; on failure the
    /// document is unchanged and the error is [`DrillError::InvalidElement`].
    pub fn update_element(
        &mut self,
        frame_index: usize,
        element_index: usize,
        patch: &ElementPatch,
    ) -> DrillResult<()> {
        let slot = self.element_mut(frame_index, element_index)?;
        let updated = patch.apply(slot)?;
        *slot = updated;
        Ok(())
    }

    /// Reposition one element; coordinates follow the usual clamping rule.
    pub fn move_element(
        &mut self,
        frame_index: usize,
        element_index: usize,
        x: f64,
        y: f64,
    ) -> DrillResult<()> {
        self.update_element(frame_index, element_index, &ElementPatch::position(x, y))
    }

    /// Change an element's z-order position within its frame.
    pub fn reorder_element(&mut self, frame_index: usize, from: usize, to: usize) -> DrillResult<()> {
        let frame = self.frame_mut(frame_index)?;
        let len = frame.elements.len();
        if from >= len {
            return Err(DrillError::element_index(from, len));
        }
        if to >= len {
            return Err(DrillError::element_index(to, len));
        }
        let el = frame.elements.remove(from);
        frame.elements.insert(to, el);
        Ok(())
    }

    /// Total element count across all frames.
    pub fn element_count(&self) -> usize {
        self.frames.iter().map(Frame::len).sum()
    }

    fn frame_ref(&self, index: usize) -> DrillResult<&Frame> {
        let len = self.frames.len();
        self.frames
            .get(index)
            .ok_or_else(|| DrillError::frame_index(index, len))
    }

    fn frame_mut(&mut self, index: usize) -> DrillResult<&mut Frame> {
        let len = self.frames.len();
        self.frames
            .get_mut(index)
            .ok_or_else(|| DrillError::frame_index(index, len))
    }

    fn element_mut(&mut self, frame_index: usize, element_index: usize) -> DrillResult<&mut Element> {
        let frame = self.frame_mut(frame_index)?;
        let len = frame.elements.len();
        frame
            .elements
            .get_mut(element_index)
            .ok_or_else(|| DrillError::element_index(element_index, len))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/document.rs"]
mod tests;
