/// Convenience result type used across drillframe.
pub type DrillResult<T> = Result<T, DrillError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is recoverable at the call site. A cancelled export is not an error; it is
/// reported as [`crate::ExportOutcome::Cancelled`].
#[derive(thiserror::Error, Debug)]
pub enum DrillError {
    /// Malformed element or frame edit input. The document is left unchanged.
    #[error("invalid element: {0}")]
    InvalidElement(String),

    /// A frame or element index outside the current bounds.
    #[error("index out of range: {what} index {index} (len {len})")]
    IndexOutOfRange {
        /// Which collection was addressed (`"frame"` or `"element"`).
        what: &'static str,
        /// Requested index.
        index: usize,
        /// Collection length at the time of the call.
        len: usize,
    },

    /// Export attempted on a document with zero frames.
    #[error("document has no frames to export")]
    EmptyDocument,

    /// Underlying encoder failure.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The JSON payload could not be parsed or has the wrong structure.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// Export parameters are unusable (zero size, zero duration).
    #[error("invalid export parameters: {0}")]
    InvalidExport(String),

    /// `start_export` called while a capture or encode is still running.
    #[error("an export is already in progress")]
    ExportInProgress,

    /// Rasterization limits (for example a canvas larger than the backend supports).
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DrillError {
    /// Build a [`DrillError::InvalidElement`] value.
    pub fn invalid_element(msg: impl Into<String>) -> Self {
        Self::InvalidElement(msg.into())
    }

    /// Build a [`DrillError::IndexOutOfRange`] for a frame index.
    pub fn frame_index(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            what: "frame",
            index,
            len,
        }
    }

    /// Build a [`DrillError::IndexOutOfRange`] for an element index.
    pub fn element_index(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            what: "element",
            index,
            len,
        }
    }

    /// Build a [`DrillError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build a [`DrillError::InvalidPayload`] value.
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }

    /// Build a [`DrillError::InvalidExport`] value.
    pub fn invalid_export(msg: impl Into<String>) -> Self {
        Self::InvalidExport(msg.into())
    }

    /// Build a [`DrillError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
