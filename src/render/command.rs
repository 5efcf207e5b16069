use kurbo::Shape;

use crate::{
    foundation::core::{BezPath, Point, Rect},
    model::color::Color,
};

/// Flattening tolerance used when converting shapes and dashes into paths.
pub(crate) const PATH_TOLERANCE: f64 = 0.1;

#[derive(Clone, Debug, PartialEq)]
/// Stroke parameters for outlined primitives.
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Color,
    /// Line width in output pixels.
    pub width: f64,
    /// On/off dash lengths in output pixels; `None` draws a solid line.
    pub dash: Option<[f64; 2]>,
}

impl StrokeStyle {
    /// Solid stroke.
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Filled triangular head at the end of an arrow.
pub struct ArrowHead {
    /// Distance from the tip back to the base of the head.
    pub length: f64,
    /// Full width of the head base.
    pub width: f64,
    /// Head fill color.
    pub fill: Color,
}

#[derive(Clone, Debug, PartialEq)]
/// Surface-agnostic drawing primitive in absolute output pixels.
///
/// A rendered frame is an ordered sequence of these; later commands paint over earlier ones.
pub enum DrawCommand {
    /// Circle, filled and/or outlined.
    Circle {
        /// Center point.
        center: Point,
        /// Radius in pixels.
        radius: f64,
        /// Fill color.
        fill: Option<Color>,
        /// Outline.
        stroke: Option<StrokeStyle>,
    },
    /// Closed polygon through `points`.
    Polygon {
        /// Vertices in drawing order.
        points: Vec<Point>,
        /// Fill color.
        fill: Option<Color>,
        /// Outline.
        stroke: Option<StrokeStyle>,
    },
    /// Axis-aligned rectangle.
    Rect {
        /// Rectangle in pixels.
        rect: Rect,
        /// Fill color.
        fill: Option<Color>,
        /// Outline.
        stroke: Option<StrokeStyle>,
    },
    /// Straight segment, optionally ending in an arrow head at `to`.
    Line {
        /// Start point.
        from: Point,
        /// End point (arrow tip).
        to: Point,
        /// Line style.
        stroke: StrokeStyle,
        /// Filled head drawn at `to`.
        head: Option<ArrowHead>,
    },
    /// Quadratic curve from `from` through control point `ctrl` to `to`.
    Curve {
        /// Start point.
        from: Point,
        /// Control point.
        ctrl: Point,
        /// End point.
        to: Point,
        /// Line style.
        stroke: StrokeStyle,
    },
    /// Text anchored with its top-left corner at `origin`.
    Text {
        /// Top-left anchor.
        origin: Point,
        /// Label to draw.
        text: String,
        /// Font size in pixels.
        font_size: f64,
        /// Fill color.
        color: Color,
    },
}

impl DrawCommand {
    /// Short primitive name, used in logs and debugging output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Circle { .. } => "circle",
            Self::Polygon { .. } => "polygon",
            Self::Rect { .. } => "rect",
            Self::Line { head: Some(_), .. } => "arrow",
            Self::Line { .. } => "line",
            Self::Curve { .. } => "curve",
            Self::Text { .. } => "text",
        }
    }

    /// Geometry of the primitive as a path. Text has no vector geometry and yields an empty path.
    pub fn to_path(&self) -> BezPath {
        match self {
            Self::Circle { center, radius, .. } => circle_path(*center, *radius),
            Self::Polygon { points, .. } => polygon_path(points),
            Self::Rect { rect, .. } => rect.to_path(PATH_TOLERANCE),
            Self::Line { from, to, .. } => {
                let mut p = BezPath::new();
                p.move_to(*from);
                p.line_to(*to);
                p
            }
            Self::Curve { from, ctrl, to, .. } => {
                let mut p = BezPath::new();
                p.move_to(*from);
                p.quad_to(*ctrl, *to);
                p
            }
            Self::Text { .. } => BezPath::new(),
        }
    }

    /// Path to fill, if the primitive is filled.
    pub fn fill(&self) -> Option<(BezPath, Color)> {
        match self {
            Self::Circle {
                fill: Some(c), ..
            }
            | Self::Polygon {
                fill: Some(c), ..
            }
            | Self::Rect {
                fill: Some(c), ..
            } => Some((self.to_path(), *c)),
            Self::Line {
                from,
                to,
                head: Some(head),
                ..
            } => Some((arrow_head_path(*from, *to, head), head.fill)),
            _ => None,
        }
    }

    /// Path to stroke with its style, if the primitive is stroked.
    ///
    /// Dashed strokes are returned already split into dash segments.
    pub fn stroke(&self) -> Option<(BezPath, &StrokeStyle)> {
        let style = match self {
            Self::Circle { stroke, .. }
            | Self::Polygon { stroke, .. }
            | Self::Rect { stroke, .. } => stroke.as_ref()?,
            Self::Line { stroke, .. } | Self::Curve { stroke, .. } => stroke,
            Self::Text { .. } => return None,
        };
        let path = self.shaft_path();
        let path = match style.dash {
            Some(pattern) => dashed(&path, pattern),
            None => path,
        };
        Some((path, style))
    }

    /// Axis-aligned bounds of the vector geometry; `None` for text.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Text { .. } => None,
            Self::Line {
                from,
                to,
                head: Some(head),
                ..
            } => Some(
                self.to_path()
                    .bounding_box()
                    .union(arrow_head_path(*from, *to, head).bounding_box()),
            ),
            _ => Some(self.to_path().bounding_box()),
        }
    }

    // Arrow shafts stop at the head base so the stroke does not poke through the tip.
    fn shaft_path(&self) -> BezPath {
        match self {
            Self::Line {
                from,
                to,
                head: Some(head),
                ..
            } => {
                let d = *to - *from;
                let len = d.hypot();
                let end = if len > head.length {
                    *to - d * (head.length / len)
                } else {
                    *from
                };
                let mut p = BezPath::new();
                p.move_to(*from);
                p.line_to(end);
                p
            }
            _ => self.to_path(),
        }
    }
}

fn polygon_path(points: &[Point]) -> BezPath {
    let mut p = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        p.move_to(*first);
        for pt in iter {
            p.line_to(*pt);
        }
        p.close_path();
    }
    p
}

// Four cubic quadrants, so the path only depends on center and radius.
fn circle_path(center: Point, r: f64) -> BezPath {
    const KAPPA: f64 = 0.552_284_749_830_793_4;
    let k = r * KAPPA;
    let (cx, cy) = (center.x, center.y);
    let mut p = BezPath::new();
    p.move_to((cx + r, cy));
    p.curve_to((cx + r, cy + k), (cx + k, cy + r), (cx, cy + r));
    p.curve_to((cx - k, cy + r), (cx - r, cy + k), (cx - r, cy));
    p.curve_to((cx - r, cy - k), (cx - k, cy - r), (cx, cy - r));
    p.curve_to((cx + k, cy - r), (cx + r, cy - k), (cx + r, cy));
    p.close_path();
    p
}

fn arrow_head_path(from: Point, to: Point, head: &ArrowHead) -> BezPath {
    let d = to - from;
    let len = d.hypot();
    let dir = if len > 0.0 {
        d / len
    } else {
        kurbo::Vec2::new(1.0, 0.0)
    };
    let normal = kurbo::Vec2::new(-dir.y, dir.x);
    let base = to - dir * head.length;
    let half = head.width / 2.0;
    polygon_path(&[to, base + normal * half, base - normal * half])
}

fn dashed(path: &BezPath, pattern: [f64; 2]) -> BezPath {
    if pattern.iter().any(|v| !v.is_finite() || *v <= 0.0) {
        return path.clone();
    }
    kurbo::dash(path.path_elements(PATH_TOLERANCE), 0.0, &pattern).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/command.rs"]
mod tests;
