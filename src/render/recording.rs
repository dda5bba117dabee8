use std::cell::RefCell;
use std::rc::Rc;

use crate::host::Size;

use super::{Align, Paint, Point, Surface, TextStyle};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    Fade(f64),
    Rect { x: f64, y: f64, w: f64, h: f64, paint: Paint },
    Font { px: f64, align: Align },
    Text { text: String, x: f64, y: f64, style: TextStyle },
    Polyline { points: Vec<Point>, width: f64, paint: Paint },
    Polygon { points: Vec<Point>, paint: Paint },
    Circle { center: Point, radius: f64, paint: Paint },
}

#[derive(Debug)]
struct Recorded {
    size: Size,
    resizes: usize,
    ops: Vec<DrawOp>,
}

/// Surface that records draw calls instead of rasterising them. Clones share
/// one recording, so a test can keep a handle after giving the surface away.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    inner: Rc<RefCell<Recorded>>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Recorded {
                size,
                resizes: 0,
                ops: Vec::new(),
            })),
        }
    }

    pub fn ops(&self) -> Vec<DrawOp> {
        self.inner.borrow().ops.clone()
    }

    pub fn take_ops(&self) -> Vec<DrawOp> {
        std::mem::take(&mut self.inner.borrow_mut().ops)
    }

    pub fn resizes(&self) -> usize {
        self.inner.borrow().resizes
    }

    pub fn text_count(&self) -> usize {
        self.inner
            .borrow()
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { .. }))
            .count()
    }

    fn push(&self, op: DrawOp) {
        self.inner.borrow_mut().ops.push(op);
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.inner.borrow().size
    }

    fn resize(&mut self, size: Size) {
        let mut rec = self.inner.borrow_mut();
        rec.size = size;
        rec.resizes += 1;
    }

    fn clear(&mut self) {
        self.push(DrawOp::Clear);
    }

    fn fade(&mut self, alpha: f64) {
        self.push(DrawOp::Fade(alpha));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint) {
        self.push(DrawOp::Rect {
            x,
            y,
            w,
            h,
            paint: paint.clone(),
        });
    }

    fn set_font(&mut self, px: f64, align: Align) {
        self.push(DrawOp::Font { px, align });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            style: *style,
        });
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f64, paint: &Paint) {
        self.push(DrawOp::Polyline {
            points: points.to_vec(),
            width,
            paint: paint.clone(),
        });
    }

    fn fill_polygon(&mut self, points: &[Point], paint: &Paint) {
        self.push(DrawOp::Polygon {
            points: points.to_vec(),
            paint: paint.clone(),
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.push(DrawOp::Circle {
            center,
            radius,
            paint: paint.clone(),
        });
    }
}
