use std::f64::consts::PI;

use crate::{
    foundation::core::{Canvas, Point, Rect},
    model::color::Color,
    model::element::{Element, ElementType, EquipmentKind, MovementKind},
    model::frame::Frame,
    render::command::{ArrowHead, DrawCommand, StrokeStyle},
};

/// Radius of players, cones and equipment circles at the reference canvas.
const MARKER_RADIUS: f64 = 8.0;
const SQUARE_SIDE: f64 = 16.0;
const BAR_LENGTH: f64 = 32.0;
const BAR_HEIGHT: f64 = 2.0;
const MOVEMENT_LENGTH: f64 = 40.0;
const CURVE_CTRL_DX: f64 = 20.0;
const CURVE_CTRL_DY: f64 = 20.0;
const LINE_WIDTH: f64 = 2.0;
const OUTLINE_WIDTH: f64 = 1.0;
const DASH: [f64; 2] = [4.0, 4.0];
const ARROW_HEAD_LENGTH: f64 = 10.0;
const ARROW_HEAD_WIDTH: f64 = 10.0;
const FONT_SIZE: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Renderer configuration.
pub struct RenderOpts {
    /// Canvas at which the pixel constants (radius 8, line width 2, font size 10, ...) hold
    /// exactly. Other output sizes scale them by `min(width / ref.width, height / ref.height)`.
    pub reference: Canvas,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            reference: Canvas::REFERENCE,
        }
    }
}

/// Render `frame` at `width`x`height` pixels with default options.
///
/// Pure and infallible: elements outside the drawable set contribute nothing.
pub fn render(frame: &Frame, width: u32, height: u32) -> DrawCommands<'_> {
    render_with(frame, width, height, &RenderOpts::default())
}

/// Render `frame` with explicit [`RenderOpts`].
pub fn render_with<'a>(
    frame: &'a Frame,
    width: u32,
    height: u32,
    opts: &RenderOpts,
) -> DrawCommands<'a> {
    DrawCommands::new(frame.elements(), width, height, *opts)
}

/// Lazy, restartable sequence of draw commands for one frame.
///
/// Nothing is computed until iterated; every call to [`DrawCommands::iter`] starts over and
/// yields the same commands.
#[derive(Clone, Copy, Debug)]
pub struct DrawCommands<'a> {
    elements: &'a [Element],
    layout: Layout,
}

impl<'a> DrawCommands<'a> {
    pub(crate) fn new(elements: &'a [Element], width: u32, height: u32, opts: RenderOpts) -> Self {
        let canvas = Canvas { width, height };
        Self {
            elements,
            layout: Layout {
                width: f64::from(width),
                height: f64::from(height),
                scale: canvas.scale_from(opts.reference),
            },
        }
    }

    /// Iterate the commands in z-order.
    pub fn iter(&self) -> DrawCommandIter<'a> {
        DrawCommandIter {
            elements: self.elements.iter(),
            layout: self.layout,
        }
    }

    /// Uniform pixel scale applied to the reference constants.
    pub fn scale(&self) -> f64 {
        self.layout.scale
    }

    /// Collect the commands.
    pub fn to_vec(&self) -> Vec<DrawCommand> {
        self.iter().collect()
    }

    /// Return `true` when the frame produces no commands.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<'a> IntoIterator for DrawCommands<'a> {
    type Item = DrawCommand;
    type IntoIter = DrawCommandIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &DrawCommands<'a> {
    type Item = DrawCommand;
    type IntoIter = DrawCommandIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`DrawCommands::iter`].
#[derive(Clone, Debug)]
pub struct DrawCommandIter<'a> {
    elements: std::slice::Iter<'a, Element>,
    layout: Layout,
}

impl Iterator for DrawCommandIter<'_> {
    type Item = DrawCommand;

    fn next(&mut self) -> Option<DrawCommand> {
        let layout = self.layout;
        self.elements.find_map(|el| element_command(el, &layout))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.elements.len()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Layout {
    width: f64,
    height: f64,
    scale: f64,
}

impl Layout {
    fn anchor(&self, el: &Element) -> Point {
        Point::new(el.x() * self.width, el.y() * self.height)
    }

    fn px(&self, v: f64) -> f64 {
        v * self.scale
    }
}

/// Map one element onto its primitive, or `None` for types with no drawing rule.
fn element_command(el: &Element, layout: &Layout) -> Option<DrawCommand> {
    let at = layout.anchor(el);
    let size = el.size();
    let color = el.color();

    let cmd = match el.element_type() {
        ElementType::Player => DrawCommand::Circle {
            center: at,
            radius: layout.px(MARKER_RADIUS * size),
            fill: Some(color),
            stroke: Some(StrokeStyle::solid(Color::BLACK, layout.px(OUTLINE_WIDTH))),
        },
        ElementType::Equipment(EquipmentKind::ConeOrange | EquipmentKind::ConeBlue) => {
            DrawCommand::Polygon {
                points: regular_polygon(at, layout.px(MARKER_RADIUS * size), 3, PI),
                fill: Some(color),
                stroke: None,
            }
        }
        ElementType::Equipment(EquipmentKind::Circle) => DrawCommand::Circle {
            center: at,
            radius: layout.px(MARKER_RADIUS * size),
            fill: None,
            stroke: Some(StrokeStyle::solid(color, layout.px(LINE_WIDTH))),
        },
        ElementType::Equipment(EquipmentKind::Square) => {
            let half = layout.px(SQUARE_SIDE * size) / 2.0;
            DrawCommand::Rect {
                rect: Rect::new(at.x - half, at.y - half, at.x + half, at.y + half),
                fill: None,
                stroke: Some(StrokeStyle::solid(color, layout.px(LINE_WIDTH))),
            }
        }
        ElementType::Equipment(EquipmentKind::Line) => {
            let half_w = layout.px(BAR_LENGTH * size) / 2.0;
            let half_h = layout.px(BAR_HEIGHT) / 2.0;
            DrawCommand::Rect {
                rect: Rect::new(at.x - half_w, at.y - half_h, at.x + half_w, at.y + half_h),
                fill: Some(color),
                stroke: None,
            }
        }
        ElementType::Movement(kind) => {
            let to = Point::new(at.x + layout.px(MOVEMENT_LENGTH * size), at.y);
            let solid = StrokeStyle::solid(color, layout.px(LINE_WIDTH));
            match kind {
                MovementKind::Arrow => DrawCommand::Line {
                    from: at,
                    to,
                    stroke: solid,
                    head: Some(ArrowHead {
                        length: layout.px(ARROW_HEAD_LENGTH),
                        width: layout.px(ARROW_HEAD_WIDTH),
                        fill: color,
                    }),
                },
                MovementKind::DottedLine => DrawCommand::Line {
                    from: at,
                    to,
                    stroke: StrokeStyle {
                        dash: Some(DASH.map(|d| layout.px(d))),
                        ..solid
                    },
                    head: None,
                },
                MovementKind::CurvedLine => DrawCommand::Curve {
                    from: at,
                    ctrl: Point::new(
                        at.x + layout.px(CURVE_CTRL_DX * size),
                        at.y - layout.px(CURVE_CTRL_DY * size),
                    ),
                    to,
                    stroke: solid,
                },
            }
        }
        ElementType::Text => DrawCommand::Text {
            origin: at,
            text: el.label().to_owned(),
            font_size: layout.px(FONT_SIZE),
            color,
        },
        ElementType::Unrecognized { .. } => {
            tracing::debug!(element_type = %el.element_type(), "no drawing rule, skipping");
            return None;
        }
    };
    Some(cmd)
}

/// Vertices of a regular `sides`-gon around `center`, first vertex straight up before
/// `rotation` (radians, clockwise in y-down space) is applied.
fn regular_polygon(center: Point, radius: f64, sides: usize, rotation: f64) -> Vec<Point> {
    (0..sides)
        .map(|i| {
            let a = rotation + 2.0 * PI * i as f64 / sides as f64;
            Point::new(center.x + radius * a.sin(), center.y - radius * a.cos())
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
