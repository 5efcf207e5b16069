use serde_json::Value;

use crate::{
    foundation::error::{DrillError, DrillResult},
    model::element::{Element, ElementType, check_size, checked_position},
};

/// Partial element update.
///
/// `None` leaves a field untouched. For the clearable fields (`sub_kind`, `color`, `text`),
/// `Some(None)` removes the stored value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementPatch {
    /// New `type`.
    pub kind: Option<String>,
    /// New `subType`, or `Some(None)` to clear it.
    pub sub_kind: Option<Option<String>>,
    /// New normalized x.
    pub x: Option<f64>,
    /// New normalized y.
    pub y: Option<f64>,
    /// New color, or `Some(None)` to fall back to the default.
    pub color: Option<Option<String>>,
    /// New scale multiplier.
    pub size: Option<f64>,
    /// New label, or `Some(None)` to clear it.
    pub text: Option<Option<String>>,
}

impl ElementPatch {
    /// Patch that only moves the element.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Read a patch from an untyped JSON object using payload key names.
    ///
    /// Recognized keys are `type`, `subType`, `x`, `y`, `color`, `size` and `text`; every other
    /// key is ignored. `null` clears `subType`, `color` and `text`. A recognized key holding a
    /// value of the wrong type fails with [`DrillError::InvalidElement`].
    pub fn from_json(value: &Value) -> DrillResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| DrillError::invalid_element("element patch must be a JSON object"))?;

        let mut patch = Self::default();
        for (key, v) in obj {
            match key.as_str() {
                "type" => patch.kind = Some(json_str(key, v)?),
                "subType" => patch.sub_kind = Some(json_opt_str(key, v)?),
                "x" => patch.x = Some(json_f64(key, v)?),
                "y" => patch.y = Some(json_f64(key, v)?),
                "color" => patch.color = Some(json_opt_str(key, v)?),
                "size" => patch.size = Some(json_f64(key, v)?),
                "text" => patch.text = Some(json_opt_str(key, v)?),
                _ => {}
            }
        }
        Ok(patch)
    }

    /// Return `true` when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Produce the patched element without touching `base`.
    ///
    /// The result is re-validated. When the patch names `type` or `subType`, the resulting pair
    /// must belong to the closed set; otherwise an unrecognized stored type is carried through.
    pub fn apply(&self, base: &Element) -> DrillResult<Element> {
        let mut out = base.clone();

        if self.kind.is_some() || self.sub_kind.is_some() {
            let kind = self
                .kind
                .as_deref()
                .unwrap_or_else(|| base.ty.kind_str());
            let sub_kind = match &self.sub_kind {
                Some(s) => s.as_deref(),
                None => base.ty.sub_kind_str(),
            };
            out.ty = ElementType::parse(kind, sub_kind)?;
            if out.ty != ElementType::Text && self.text.is_none() {
                out.text = None;
            }
        }

        let (x, y) = checked_position(self.x.unwrap_or(base.x), self.y.unwrap_or(base.y))?;
        out.x = x;
        out.y = y;

        if let Some(color) = &self.color {
            out.color = color.clone();
        }
        if let Some(size) = self.size {
            check_size(size)?;
            out.size = Some(size);
        }
        if let Some(text) = &self.text {
            out.text = text.clone();
        }

        out.validate()?;
        Ok(out)
    }
}

fn json_f64(key: &str, v: &Value) -> DrillResult<f64> {
    v.as_f64()
        .ok_or_else(|| DrillError::invalid_element(format!("'{key}' must be a number")))
}

fn json_str(key: &str, v: &Value) -> DrillResult<String> {
    v.as_str()
        .map(str::to_owned)
        .ok_or_else(|| DrillError::invalid_element(format!("'{key}' must be a string")))
}

fn json_opt_str(key: &str, v: &Value) -> DrillResult<Option<String>> {
    if v.is_null() {
        return Ok(None);
    }
    json_str(key, v).map(Some)
}

#[cfg(test)]
#[path = "../../tests/unit/model/patch.rs"]
mod tests;
