//! Drawing surface abstraction and the shared frame loop.

use crate::host::Size;
use crate::palette::Rgba;

pub mod frame_loop;
pub mod recording;

pub use frame_loop::{fit_viewport, Backdrop, Fit, FrameCtx, FrameLoop, LoopConfig, LoopState, Scene};
pub use recording::{DrawOp, RecordingSurface};

pub type Point = (f64, f64);

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear {
        from: Point,
        to: Point,
        stops: Vec<(f64, Rgba)>,
    },
    Radial {
        center: Point,
        radius: f64,
        stops: Vec<(f64, Rgba)>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub color: Rgba,
    /// Radians, applied around the text origin.
    pub rotation: f64,
    /// Shadow blur radius and colour.
    pub glow: Option<(f64, Rgba)>,
}

/// A 2D drawing target. Failures inside individual draw calls are cosmetic
/// and are swallowed by implementations.
pub trait Surface {
    fn size(&self) -> Size;

    fn resize(&mut self, size: Size);

    /// Removes everything drawn so far.
    fn clear(&mut self);

    /// Low-opacity black overdraw of the previous frame, so old strokes
    /// fade into the backdrop over many frames.
    fn fade(&mut self, alpha: f64);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: &Paint);

    fn set_font(&mut self, px: f64, align: Align);

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);

    fn stroke_polyline(&mut self, points: &[Point], width: f64, paint: &Paint);

    /// Fills the closed polygon through `points`.
    fn fill_polygon(&mut self, points: &[Point], paint: &Paint);

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint);

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, width: f64, color: Rgba) {
        let pts = [(x, y), (x + w, y), (x + w, y + h), (x, y + h), (x, y)];
        self.stroke_polyline(&pts, width, &Paint::Solid(color));
    }
}
