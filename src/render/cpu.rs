use crate::{
    foundation::core::{BezPath, Point},
    foundation::error::{DrillError, DrillResult},
    model::color::Color,
    render::backend::{FrameRGBA, RasterBackend, RasterOpts},
    render::command::DrawCommand,
    render::renderer::DrawCommands,
    render::text::{TextBrushRgba8, TextLayoutEngine},
};

/// CPU rasterizer powered by `vello_cpu`.
///
/// Vector primitives are filled and stroked directly. Text is shaped with Parley against the
/// font in [`RasterOpts::font`]; the font is registered lazily on first use and reused.
pub struct CpuRasterizer {
    opts: RasterOpts,
    text: Option<TextState>,
}

struct TextState {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

impl CpuRasterizer {
    /// Create a rasterizer with the given options.
    pub fn new(opts: RasterOpts) -> Self {
        Self { opts, text: None }
    }

    /// Options this rasterizer was created with.
    pub fn opts(&self) -> &RasterOpts {
        &self.opts
    }

    fn text_state(&mut self) -> DrillResult<Option<&mut TextState>> {
        if self.text.is_none() {
            let Some(bytes) = self.opts.font.clone() else {
                return Ok(None);
            };
            let engine = TextLayoutEngine::new(&bytes)?;
            tracing::debug!(family = engine.family_name(), "registered label font");
            let font = vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(bytes.to_vec()),
                0,
            );
            self.text = Some(TextState { engine, font });
        }
        Ok(self.text.as_mut())
    }

    fn draw(&mut self, ctx: &mut vello_cpu::RenderContext, cmd: &DrawCommand) -> DrillResult<()> {
        if let DrawCommand::Text {
            origin,
            text,
            font_size,
            color,
        } = cmd
        {
            return self.draw_text(ctx, *origin, text, *font_size, *color);
        }

        if let Some((path, color)) = cmd.fill() {
            set_color(ctx, color);
            ctx.fill_path(&bezpath_to_cpu(&path));
        }
        if let Some((path, style)) = cmd.stroke() {
            set_color(ctx, style.color);
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(style.width));
            ctx.stroke_path(&bezpath_to_cpu(&path));
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        origin: Point,
        text: &str,
        font_size: f64,
        color: Color,
    ) -> DrillResult<()> {
        let Some(state) = self.text_state()? else {
            tracing::debug!(text, "no font configured, skipping text");
            return Ok(());
        };
        let layout = state.engine.layout_plain(
            text,
            font_size as f32,
            TextBrushRgba8 {
                r: color.r,
                g: color.g,
                b: color.b,
                a: color.a,
            },
        )?;

        ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&state.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}

impl Default for CpuRasterizer {
    fn default() -> Self {
        Self::new(RasterOpts::default())
    }
}

impl RasterBackend for CpuRasterizer {
    #[tracing::instrument(level = "debug", skip(self, commands))]
    fn rasterize(
        &mut self,
        commands: &DrawCommands<'_>,
        width: u32,
        height: u32,
    ) -> DrillResult<FrameRGBA> {
        let w: u16 = width
            .try_into()
            .map_err(|_| DrillError::render("canvas width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| DrillError::render("canvas height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(DrillError::render(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        let [r, g, b, a] = self.opts.background_rgba;
        if a > 0 {
            set_color(&mut ctx, Color { r, g, b, a });
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));
        }

        let mut drawn = 0usize;
        for cmd in commands {
            self.draw(&mut ctx, &cmd)?;
            drawn += 1;
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        tracing::debug!(drawn, "rasterized frame");

        Ok(FrameRGBA {
            width,
            height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn set_color(ctx: &mut vello_cpu::RenderContext, c: Color) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
