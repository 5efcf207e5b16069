use crate::{
    foundation::error::{DrillError, DrillResult},
    model::document::DrillDocument,
    model::element::Element,
    model::frame::Frame,
};

/// Builder for [`DrillDocument`](crate::DrillDocument).
#[derive(Debug, Default)]
pub struct DrillBuilder {
    title: Option<String>,
    frames: Vec<Frame>,
}

impl DrillBuilder {
    /// Create a builder for a new drill.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a frame.
    pub fn frame(mut self, frame: FrameBuilder) -> Self {
        self.frames.push(frame.build());
        self
    }

    /// Append `count` copies of `frame`.
    pub fn repeat_frame(mut self, frame: FrameBuilder, count: usize) -> Self {
        let frame = frame.build();
        self.frames.extend(std::iter::repeat_n(frame, count));
        self
    }

    /// Build the final document.
    pub fn build(self) -> DrillDocument {
        DrillDocument {
            title: self.title,
            frames: self.frames,
            extra: serde_json::Map::new(),
        }
    }
}

/// Builder for a single [`Frame`](crate::Frame).
#[derive(Debug, Default)]
pub struct FrameBuilder {
    frame: Frame,
}

impl FrameBuilder {
    /// Create an empty frame builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element on top of the current z-order.
    pub fn element(mut self, element: Element) -> Self {
        self.frame.elements.push(element);
        self
    }

    /// Append several elements in order.
    pub fn elements(mut self, elements: impl IntoIterator<Item = Element>) -> Self {
        self.frame.elements.extend(elements);
        self
    }

    /// Per-frame display duration override; must be `> 0`.
    pub fn duration_ms(mut self, ms: u32) -> DrillResult<Self> {
        if ms == 0 {
            return Err(DrillError::invalid_element("frame duration must be > 0 ms"));
        }
        self.frame.duration_ms = Some(ms);
        Ok(self)
    }

    /// Frame label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.frame.label = Some(label.into());
        self
    }

    /// Finish the frame.
    pub fn build(self) -> Frame {
        self.frame
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/dsl.rs"]
mod tests;
