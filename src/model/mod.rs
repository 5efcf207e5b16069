//! Drill document model: elements, frames and the document aggregate.

pub(crate) mod color;
pub(crate) mod document;
pub(crate) mod dsl;
pub(crate) mod element;
pub(crate) mod frame;
pub(crate) mod patch;
