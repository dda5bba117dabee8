use crate::host::{EventKind, HostEvent, Size};
use crate::render::{Backdrop, FrameCtx, LoopConfig, Point, Scene, Surface};

use super::matrix::MatrixRain;
use super::waves::{draw_grid, draw_pointer_glow, draw_waves};

/// Hero background: matrix rain, sine bands and, on larger viewports, the
/// pointer spokes and a faint grid.
pub struct HeroScene {
    rain: MatrixRain,
    pointer: Option<Point>,
    track_pointer: bool,
    small: bool,
}

impl HeroScene {
    /// `track_pointer` is off on touch-primary devices, where the scene
    /// subscribes to nothing.
    pub fn new(seed: u64, track_pointer: bool) -> Self {
        Self {
            rain: MatrixRain::new(seed),
            pointer: None,
            track_pointer,
            small: false,
        }
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }
}

impl Scene for HeroScene {
    fn config(&self) -> LoopConfig {
        LoopConfig {
            fade_alpha: 0.005,
            time_step: 0.01,
            backdrop: Backdrop::Tinted,
        }
    }

    fn reseed(&mut self, size: Size) {
        self.small = size.is_small();
        self.rain.reseed(size);
    }

    fn draw(&mut self, surface: &mut dyn Surface, frame: &FrameCtx) {
        self.rain.advance();
        self.rain.draw(surface, frame.palette);
        draw_waves(surface, frame.size, frame.time, frame.palette);
        if self.small {
            return;
        }
        if let Some(pointer) = self.pointer {
            draw_pointer_glow(surface, frame.size, pointer, frame.time, frame.palette);
        }
        draw_grid(surface, frame.size, frame.palette);
    }

    fn element_count(&self) -> usize {
        self.rain.column_count()
    }

    fn interests(&self) -> &'static [EventKind] {
        if self.track_pointer {
            &[EventKind::PointerMove]
        } else {
            &[]
        }
    }

    fn on_event(&mut self, event: &HostEvent) {
        // The glow stays hidden until the pointer has entered the page.
        if let HostEvent::PointerMove { x, y } = *event {
            if x > 0.0 && y > 0.0 {
                self.pointer = Some((x, y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{Palette, Theme};
    use crate::render::{DrawOp, RecordingSurface};

    fn frame(size: Size) -> FrameCtx {
        FrameCtx {
            time: 1.0,
            now_ms: 0.0,
            size,
            theme: Theme::Dark,
            palette: Palette::for_theme(Theme::Dark),
        }
    }

    fn circles(ops: &[DrawOp]) -> usize {
        ops.iter().filter(|op| matches!(op, DrawOp::Circle { .. })).count()
    }

    #[test]
    fn pointer_glow_needs_a_positive_sample() {
        let mut scene = HeroScene::new(1, true);
        scene.on_event(&HostEvent::PointerMove { x: 0.0, y: 30.0 });
        assert_eq!(scene.pointer(), None);
        scene.on_event(&HostEvent::PointerMove { x: 10.0, y: 30.0 });
        assert_eq!(scene.pointer(), Some((10.0, 30.0)));
    }

    #[test]
    fn touch_scene_wants_no_pointer_events() {
        assert_eq!(HeroScene::new(1, true).interests(), &[EventKind::PointerMove]);
        assert!(HeroScene::new(1, false).interests().is_empty());
    }

    #[test]
    fn small_viewports_skip_glow_and_grid() {
        let size = Size::new(400.0, 800.0);
        let mut scene = HeroScene::new(1, true);
        scene.reseed(size);
        scene.on_event(&HostEvent::PointerMove { x: 10.0, y: 30.0 });
        let mut surface = RecordingSurface::new(size);
        scene.draw(&mut surface, &frame(size));
        assert_eq!(circles(&surface.ops()), 0);
        assert_eq!(scene.element_count(), 50);
    }

    #[test]
    fn large_viewports_draw_glow() {
        let size = Size::new(1400.0, 800.0);
        let mut scene = HeroScene::new(1, true);
        scene.reseed(size);
        scene.on_event(&HostEvent::PointerMove { x: 100.0, y: 300.0 });
        let mut surface = RecordingSurface::new(size);
        scene.draw(&mut surface, &frame(size));
        assert_eq!(circles(&surface.ops()), 1);
        assert_eq!(scene.element_count(), 80);
    }
}
