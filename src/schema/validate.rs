use std::fmt;

use crate::{
    model::document::DrillDocument,
    model::element::{Element, ElementType},
    model::frame::Frame,
    schema::model::{DocumentDef, ElementDef, FrameDef},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SchemaPathElem {
    Field(&'static str),
    Index(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaError {
    pub(crate) path: Vec<SchemaPathElem>,
    pub(crate) message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaErrors {
    pub(crate) errors: Vec<SchemaError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

/// Validate a parsed payload and lift it into the typed model.
///
/// Every problem is collected with its JSON path. Positions are clamped into `[0, 1]`;
/// unrecognized `type`/`subType` pairs are kept verbatim.
pub(crate) fn validate_document(def: DocumentDef) -> Result<DrillDocument, SchemaErrors> {
    let mut errors = Vec::new();
    let mut path = vec![SchemaPathElem::Field("frames")];

    let mut frames = Vec::with_capacity(def.frames.len());
    for (fi, frame) in def.frames.into_iter().enumerate() {
        path.push(SchemaPathElem::Index(fi));
        if let Some(frame) = validate_frame(frame, &mut path, &mut errors) {
            frames.push(frame);
        }
        path.pop();
    }

    if !errors.is_empty() {
        return Err(SchemaErrors { errors });
    }
    Ok(DrillDocument {
        title: def.title,
        frames,
        extra: def.extra,
    })
}

fn validate_frame(
    def: FrameDef,
    path: &mut Vec<SchemaPathElem>,
    errors: &mut Vec<SchemaError>,
) -> Option<Frame> {
    let before = errors.len();
    if def.duration_ms == Some(0) {
        path.push(SchemaPathElem::Field("durationMs"));
        errors.push(SchemaError::at(path, "must be > 0"));
        path.pop();
    }

    path.push(SchemaPathElem::Field("elements"));
    let mut elements = Vec::with_capacity(def.elements.len());
    for (ei, el) in def.elements.into_iter().enumerate() {
        path.push(SchemaPathElem::Index(ei));
        if let Some(el) = validate_element(el, path, errors) {
            elements.push(el);
        }
        path.pop();
    }
    path.pop();

    (errors.len() == before).then_some(Frame {
        elements,
        duration_ms: def.duration_ms,
        label: def.label,
        extra: def.extra,
    })
}

fn validate_element(
    def: ElementDef,
    path: &mut Vec<SchemaPathElem>,
    errors: &mut Vec<SchemaError>,
) -> Option<Element> {
    let before = errors.len();
    let mut field_error = |name: &'static str, msg: &str| {
        path.push(SchemaPathElem::Field(name));
        errors.push(SchemaError::at(path, msg));
        path.pop();
    };

    if !def.x.is_finite() {
        field_error("x", "must be a finite number");
    }
    if !def.y.is_finite() {
        field_error("y", "must be a finite number");
    }
    if let Some(size) = def.size
        && (!size.is_finite() || size <= 0.0)
    {
        field_error("size", "must be a finite number > 0");
    }

    let ty = ElementType::classify(&def.kind, def.sub_kind.as_deref());
    if def.text.is_some() && ty.is_recognized() && ty != ElementType::Text {
        field_error("text", "only text elements carry text");
    }
    if !ty.is_recognized() {
        tracing::debug!(element_type = %ty, "keeping unrecognized element type");
    }

    if errors.len() != before {
        return None;
    }
    Some(Element {
        ty,
        x: def.x.clamp(0.0, 1.0),
        y: def.y.clamp(0.0, 1.0),
        color: def.color,
        size: def.size,
        text: def.text,
        extra: def.extra,
    })
}

/// Lower the typed model back into the payload shape.
pub(crate) fn document_to_def(doc: &DrillDocument) -> DocumentDef {
    DocumentDef {
        title: doc.title.clone(),
        frames: doc.frames.iter().map(frame_to_def).collect(),
        extra: doc.extra.clone(),
    }
}

fn frame_to_def(frame: &Frame) -> FrameDef {
    FrameDef {
        elements: frame.elements.iter().map(element_to_def).collect(),
        duration_ms: frame.duration_ms,
        label: frame.label.clone(),
        extra: frame.extra.clone(),
    }
}

fn element_to_def(el: &Element) -> ElementDef {
    ElementDef {
        kind: el.ty.kind_str().to_owned(),
        sub_kind: el.ty.sub_kind_str().map(str::to_owned),
        x: el.x,
        y: el.y,
        color: el.color.clone(),
        size: el.size,
        text: el.text.clone(),
        extra: el.extra.clone(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/validate.rs"]
mod tests;
