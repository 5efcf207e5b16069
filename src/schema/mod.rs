//! JSON payload boundary: `{ "frames": [...] }` in and out of the typed model.

pub(crate) mod model;
pub(crate) mod validate;

use std::{io::Read, path::Path};

use anyhow::Context;

use crate::{
    foundation::error::{DrillError, DrillResult},
    model::document::DrillDocument,
};

impl DrillDocument {
    /// Parse and validate a JSON payload.
    ///
    /// Malformed JSON, a missing `frames` array and invalid element fields all fail with
    /// [`DrillError::InvalidPayload`]. Unknown fields at every level are kept.
    pub fn from_json_str(s: &str) -> DrillResult<Self> {
        let def: model::DocumentDef = serde_json::from_str(s)
            .map_err(|e| DrillError::invalid_payload(format!("parse drill json: {e}")))?;
        Self::from_def(def)
    }

    /// Parse and validate an already decoded JSON value.
    pub fn from_json_value(value: serde_json::Value) -> DrillResult<Self> {
        let def: model::DocumentDef = serde_json::from_value(value)
            .map_err(|e| DrillError::invalid_payload(format!("decode drill payload: {e}")))?;
        Self::from_def(def)
    }

    /// Parse and validate a payload from a reader.
    pub fn from_reader<R: Read>(reader: R) -> DrillResult<Self> {
        let def: model::DocumentDef = serde_json::from_reader(reader)
            .map_err(|e| DrillError::invalid_payload(format!("parse drill json: {e}")))?;
        Self::from_def(def)
    }

    /// Read, parse and validate a payload file.
    pub fn from_path(path: impl AsRef<Path>) -> DrillResult<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path)
            .with_context(|| format!("open drill payload '{}'", path.display()))?;
        Self::from_reader(std::io::BufReader::new(f))
    }

    /// Payload representation of this document.
    pub fn to_json_value(&self) -> DrillResult<serde_json::Value> {
        serde_json::to_value(validate::document_to_def(self))
            .map_err(|e| DrillError::invalid_payload(format!("serialize drill: {e}")))
    }

    /// Serialize this document to a JSON string.
    pub fn to_json_string(&self, pretty: bool) -> DrillResult<String> {
        let def = validate::document_to_def(self);
        let out = if pretty {
            serde_json::to_string_pretty(&def)
        } else {
            serde_json::to_string(&def)
        };
        out.map_err(|e| DrillError::invalid_payload(format!("serialize drill: {e}")))
    }

    fn from_def(def: model::DocumentDef) -> DrillResult<Self> {
        validate::validate_document(def).map_err(|errs| DrillError::invalid_payload(errs.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/payload.rs"]
mod tests;
