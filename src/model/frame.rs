use crate::model::element::Element;

/// One step of a drill: an ordered set of elements.
///
/// Element order is z-order: the first element is drawn first and later elements cover earlier
/// ones. A frame has no identity beyond its position in the parent document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub(crate) elements: Vec<Element>,
    pub(crate) duration_ms: Option<u32>,
    pub(crate) label: Option<String>,
    pub(crate) extra: serde_json::Map<String, serde_json::Value>,
}

impl Frame {
    /// Empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame holding `elements` in z-order.
    pub fn with_elements(elements: Vec<Element>) -> Self {
        Self {
            elements,
            ..Self::default()
        }
    }

    /// Elements in z-order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Element at `index`, if any.
    pub fn element(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Return `true` when the frame has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Per-frame display duration override in milliseconds.
    pub fn duration_ms(&self) -> Option<u32> {
        self.duration_ms
    }

    /// Optional human-readable label ("Step 2: overlap run").
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Unknown payload fields carried by this frame.
    pub fn extra(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.extra
    }

    /// Display duration: the frame override, or `default_ms`.
    pub fn effective_duration_ms(&self, default_ms: u32) -> u32 {
        self.duration_ms.unwrap_or(default_ms)
    }
}
