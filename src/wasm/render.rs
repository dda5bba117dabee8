use wasm_bindgen::JsCast;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::{SiteError, SiteResult};
use crate::host::Size;
use crate::render::{Align, Paint, Point, Surface, TextStyle};

/// [`Surface`] over a 2D canvas context. Draw-call failures are dropped;
/// a frame with a missing gradient just looks plainer.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    size: Size,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> SiteResult<Self> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| SiteError::render("2d context unavailable"))?
            .dyn_into()
            .map_err(|_| SiteError::render("context is not CanvasRenderingContext2d"))?;
        let size = Size::new(f64::from(canvas.width()), f64::from(canvas.height()));
        Ok(Self { canvas, ctx, size })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn gradient(&self, paint: &Paint) -> Option<CanvasGradient> {
        let (gradient, stops) = match paint {
            Paint::Solid(_) => return None,
            Paint::Linear { from, to, stops } => (
                self.ctx.create_linear_gradient(from.0, from.1, to.0, to.1),
                stops,
            ),
            Paint::Radial {
                center,
                radius,
                stops,
            } => (
                self.ctx
                    .create_radial_gradient(center.0, center.1, 0.0, center.0, center.1, *radius)
                    .ok()?,
                stops,
            ),
        };
        for (offset, color) in stops {
            gradient.add_color_stop(*offset as f32, &color.to_string()).ok()?;
        }
        Some(gradient)
    }

    fn set_fill(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_string()),
            other => match self.gradient(other) {
                Some(g) => self.ctx.set_fill_style_canvas_gradient(&g),
                None => self.ctx.set_fill_style_str("transparent"),
            },
        }
    }

    fn set_stroke(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_stroke_style_str(&color.to_string()),
            other => match self.gradient(other) {
                Some(g) => self.ctx.set_stroke_style_canvas_gradient(&g),
                None => self.ctx.set_stroke_style_str("transparent"),
            },
        }
    }

    fn trace(&self, points: &[Point]) -> bool {
        let Some((first, rest)) = points.split_first() else {
            return false;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.0, first.1);
        for p in rest {
            self.ctx.line_to(p.0, p.1);
        }
        true
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.canvas.set_width(size.width.max(0.0) as u32);
        self.canvas.set_height(size.height.max(0.0) as u32);
        self.size = size;
    }

    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.size.width, self.size.height);
    }

    fn fade(&mut self, alpha: f64) {
        self.ctx.save();
        self.ctx.set_global_composite_operation("source-over").ok();
        self.ctx.set_global_alpha(alpha);
        self.ctx.set_fill_style_str("#000");
        self.ctx
            .fill_rect(0.0, 0.0, self.size.width, self.size.height);
        self.ctx.restore();
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint) {
        self.set_fill(paint);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn set_font(&mut self, px: f64, align: Align) {
        self.ctx.set_font(&format!("{px}px monospace"));
        self.ctx.set_text_align(match align {
            Align::Left => "left",
            Align::Center => "center",
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.ctx.save();
        self.ctx.set_fill_style_str(&style.color.to_string());
        if let Some((blur, color)) = style.glow {
            self.ctx.set_shadow_blur(blur);
            self.ctx.set_shadow_color(&color.to_string());
        }
        if style.rotation != 0.0 {
            self.ctx.translate(x, y).ok();
            self.ctx.rotate(style.rotation).ok();
            self.ctx.fill_text(text, 0.0, 0.0).ok();
        } else {
            self.ctx.fill_text(text, x, y).ok();
        }
        self.ctx.restore();
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f64, paint: &Paint) {
        if !self.trace(points) {
            return;
        }
        self.set_stroke(paint);
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }

    fn fill_polygon(&mut self, points: &[Point], paint: &Paint) {
        if !self.trace(points) {
            return;
        }
        self.ctx.close_path();
        self.set_fill(paint);
        self.ctx.fill();
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.0, center.1, radius.max(0.0), 0.0, std::f64::consts::TAU)
            .is_err()
        {
            return;
        }
        self.set_fill(paint);
        self.ctx.fill();
    }
}
