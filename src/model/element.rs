use std::fmt;

use crate::{
    foundation::error::{DrillError, DrillResult},
    foundation::math::clamp_unit,
    model::color::Color,
};

/// Glyph drawn for a text element whose label is empty.
pub const DEFAULT_TEXT: &str = "T";

/// Equipment marker variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EquipmentKind {
    /// Orange training cone.
    ConeOrange,
    /// Blue training cone.
    ConeBlue,
    /// Ring marker.
    Circle,
    /// Square marker.
    Square,
    /// Horizontal bar (pole, hurdle, line marking).
    Line,
}

impl EquipmentKind {
    /// All equipment variants in declaration order.
    pub const ALL: [EquipmentKind; 5] = [
        Self::ConeOrange,
        Self::ConeBlue,
        Self::Circle,
        Self::Square,
        Self::Line,
    ];

    /// Payload spelling of this variant.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConeOrange => "cone-orange",
            Self::ConeBlue => "cone-blue",
            Self::Circle => "circle",
            Self::Square => "square",
            Self::Line => "line",
        }
    }

    fn from_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

/// Movement path variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MovementKind {
    /// Straight arrow.
    Arrow,
    /// Dashed straight line.
    DottedLine,
    /// Curved path.
    CurvedLine,
}

impl MovementKind {
    /// All movement variants in declaration order.
    pub const ALL: [MovementKind; 3] = [Self::Arrow, Self::DottedLine, Self::CurvedLine];

    /// Payload spelling of this variant.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Arrow => "arrow",
            Self::DottedLine => "dotted-line",
            Self::CurvedLine => "curved-line",
        }
    }

    fn from_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

/// The `kind`/`subKind` pair of an element.
///
/// `Unrecognized` carries combinations outside the closed set verbatim. Such elements only enter
/// a document through the payload boundary; they serialize back unchanged and render nothing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// A player token.
    Player,
    /// An equipment marker.
    Equipment(EquipmentKind),
    /// A movement path.
    Movement(MovementKind),
    /// A text label.
    Text,
    /// Any other `kind`/`subKind` combination.
    Unrecognized {
        /// Raw `type` value.
        kind: String,
        /// Raw `subType` value.
        sub_kind: Option<String>,
    },
}

impl ElementType {
    /// Classify a raw pair, keeping unknown combinations as [`ElementType::Unrecognized`].
    pub fn classify(kind: &str, sub_kind: Option<&str>) -> Self {
        let known = match (kind, sub_kind) {
            ("player", None) => Some(Self::Player),
            ("text", None) => Some(Self::Text),
            ("equipment", Some(s)) => EquipmentKind::from_name(s).map(Self::Equipment),
            ("movement", Some(s)) => MovementKind::from_name(s).map(Self::Movement),
            _ => None,
        };
        known.unwrap_or_else(|| Self::Unrecognized {
            kind: kind.to_owned(),
            sub_kind: sub_kind.map(str::to_owned),
        })
    }

    /// Strictly parse a raw pair, failing with [`DrillError::InvalidElement`] unless it is a
    /// member of the closed set.
    pub fn parse(kind: &str, sub_kind: Option<&str>) -> DrillResult<Self> {
        match Self::classify(kind, sub_kind) {
            Self::Unrecognized { .. } => Err(incompatible(kind, sub_kind)),
            ty => Ok(ty),
        }
    }

    /// Payload `type` value.
    pub fn kind_str(&self) -> &str {
        match self {
            Self::Player => "player",
            Self::Equipment(_) => "equipment",
            Self::Movement(_) => "movement",
            Self::Text => "text",
            Self::Unrecognized { kind, .. } => kind,
        }
    }

    /// Payload `subType` value, if any.
    pub fn sub_kind_str(&self) -> Option<&str> {
        match self {
            Self::Player | Self::Text => None,
            Self::Equipment(k) => Some(k.as_str()),
            Self::Movement(k) => Some(k.as_str()),
            Self::Unrecognized { sub_kind, .. } => sub_kind.as_deref(),
        }
    }

    /// Return `true` for members of the closed set.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized { .. })
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_kind_str() {
            Some(sub) => write!(f, "{}/{}", self.kind_str(), sub),
            None => f.write_str(self.kind_str()),
        }
    }
}

fn incompatible(kind: &str, sub_kind: Option<&str>) -> DrillError {
    match (kind, sub_kind) {
        ("player" | "text", Some(s)) => DrillError::invalid_element(format!(
            "kind '{kind}' does not take a subKind (got '{s}')"
        )),
        ("equipment" | "movement", None) => {
            DrillError::invalid_element(format!("kind '{kind}' requires a subKind"))
        }
        ("equipment" | "movement", Some(s)) => DrillError::invalid_element(format!(
            "subKind '{s}' is not valid for kind '{kind}'"
        )),
        _ => DrillError::invalid_element(format!("unknown element kind '{kind}'")),
    }
}

/// A single positioned drawing primitive within a frame.
///
/// Positions are normalized to the canvas: `x` is a fraction of the width, `y` a fraction of the
/// height. Optional payload fields stay optional so documents serialize back without gaining
/// defaults; use the accessors to read effective values.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub(crate) ty: ElementType,
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) color: Option<String>,
    pub(crate) size: Option<f64>,
    pub(crate) text: Option<String>,
    /// Payload keys this crate does not interpret, preserved verbatim.
    pub(crate) extra: serde_json::Map<String, serde_json::Value>,
}

impl Element {
    /// Create an element of a recognized type at a normalized position.
    ///
    /// Coordinates must be finite and are clamped into `[0, 1]`.
    pub fn new(ty: ElementType, x: f64, y: f64) -> DrillResult<Self> {
        if !ty.is_recognized() {
            return Err(incompatible(ty.kind_str(), ty.sub_kind_str()));
        }
        let (x, y) = checked_position(x, y)?;
        Ok(Self {
            ty,
            x,
            y,
            color: None,
            size: None,
            text: None,
            extra: serde_json::Map::new(),
        })
    }

    /// Player token at `(x, y)`.
    pub fn player(x: f64, y: f64) -> DrillResult<Self> {
        Self::new(ElementType::Player, x, y)
    }

    /// Equipment marker at `(x, y)`.
    pub fn equipment(kind: EquipmentKind, x: f64, y: f64) -> DrillResult<Self> {
        Self::new(ElementType::Equipment(kind), x, y)
    }

    /// Movement path starting at `(x, y)`.
    pub fn movement(kind: MovementKind, x: f64, y: f64) -> DrillResult<Self> {
        Self::new(ElementType::Movement(kind), x, y)
    }

    /// Text label anchored at `(x, y)`.
    pub fn text(label: impl Into<String>, x: f64, y: f64) -> DrillResult<Self> {
        Self::new(ElementType::Text, x, y)?.with_text(label)
    }

    /// Set the color string. Unparseable colors are kept and render with the default color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the scale multiplier; must be finite and `> 0`.
    pub fn with_size(mut self, size: f64) -> DrillResult<Self> {
        check_size(size)?;
        self.size = Some(size);
        Ok(self)
    }

    /// Set the label; only valid for text elements.
    pub fn with_text(mut self, text: impl Into<String>) -> DrillResult<Self> {
        if self.ty != ElementType::Text {
            return Err(DrillError::invalid_element(format!(
                "only text elements carry text (kind '{}')",
                self.ty.kind_str()
            )));
        }
        self.text = Some(text.into());
        Ok(self)
    }

    /// Element type.
    pub fn element_type(&self) -> &ElementType {
        &self.ty
    }

    /// Normalized x in `[0, 1]`.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Normalized y in `[0, 1]`.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Raw color string as stored.
    pub fn raw_color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Effective color (default `#e11d48`).
    pub fn color(&self) -> Color {
        Color::resolve(self.color.as_deref())
    }

    /// Raw scale multiplier as stored.
    pub fn raw_size(&self) -> Option<f64> {
        self.size
    }

    /// Effective scale multiplier (default `1.0`).
    pub fn size(&self) -> f64 {
        self.size.unwrap_or(1.0)
    }

    /// Raw label as stored.
    pub fn raw_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Label to draw: the stored text, or `"T"` when absent or empty.
    pub fn label(&self) -> &str {
        match self.text.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => DEFAULT_TEXT,
        }
    }

    /// Unknown payload fields carried by this element.
    pub fn extra(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.extra
    }

    /// Check the numeric and field-placement invariants.
    ///
    /// Unrecognized types pass: they can only come from a stored payload and are kept for
    /// forward compatibility.
    pub fn validate(&self) -> DrillResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(DrillError::invalid_element("x and y must be finite numbers"));
        }
        if let Some(size) = self.size {
            check_size(size)?;
        }
        if self.text.is_some() && self.ty.is_recognized() && self.ty != ElementType::Text {
            return Err(DrillError::invalid_element(format!(
                "only text elements carry text (kind '{}')",
                self.ty.kind_str()
            )));
        }
        Ok(())
    }
}

/// Construct and validate an element from raw field values.
///
/// Fails with [`DrillError::InvalidElement`] when `kind` is outside the closed set, `sub_kind`
/// does not fit `kind`, `x`/`y` are not finite, `size <= 0`, or `text` is given for a non-text
/// element. Coordinates are clamped into `[0, 1]`.
pub fn create_element(
    kind: &str,
    sub_kind: Option<&str>,
    x: f64,
    y: f64,
    color: Option<&str>,
    size: Option<f64>,
    text: Option<&str>,
) -> DrillResult<Element> {
    let ty = ElementType::parse(kind, sub_kind)?;
    let mut el = Element::new(ty, x, y)?;
    if let Some(c) = color {
        el = el.with_color(c);
    }
    if let Some(s) = size {
        el = el.with_size(s)?;
    }
    if let Some(t) = text {
        el = el.with_text(t)?;
    }
    Ok(el)
}

/// Return `element` with its position clamped into `[0, 1]`.
pub fn clamp_to_canvas(element: Element) -> Element {
    Element {
        x: clamp_unit(element.x),
        y: clamp_unit(element.y),
        ..element
    }
}

pub(crate) fn checked_position(x: f64, y: f64) -> DrillResult<(f64, f64)> {
    if !x.is_finite() || !y.is_finite() {
        return Err(DrillError::invalid_element(format!(
            "x and y must be finite numbers, got ({x}, {y})"
        )));
    }
    Ok((clamp_unit(x), clamp_unit(y)))
}

pub(crate) fn check_size(size: f64) -> DrillResult<()> {
    if !size.is_finite() || size <= 0.0 {
        return Err(DrillError::invalid_element(format!(
            "size must be a finite number > 0, got {size}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/model/element.rs"]
mod tests;
