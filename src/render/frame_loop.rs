//! One animation loop engine for every canvas on the page.
//!
//! A [`FrameLoop`] owns a surface and a [`Scene`]. Each frame it fades or
//! clears the previous contents, paints the theme background, advances its
//! time accumulator and lets the scene draw, then asks the host for the next
//! frame. Resizes refit the surface and reseed the scene.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::context::UiContext;
use crate::host::{EventKind, Host, HostEvent, Size, Subscription};
use crate::palette::{Palette, Theme};

use super::{Paint, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    Running,
    TornDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backdrop {
    /// Fade the previous frame, then paint the theme background.
    Tinted,
    /// Clear to transparent every frame (overlays).
    Clear,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopConfig {
    pub fade_alpha: f64,
    pub time_step: f64,
    pub backdrop: Backdrop,
}

pub struct FrameCtx {
    /// Accumulated scene time (sum of `time_step`s).
    pub time: f64,
    /// Host clock at this frame.
    pub now_ms: f64,
    pub size: Size,
    pub theme: Theme,
    pub palette: &'static Palette,
}

pub trait Scene {
    fn config(&self) -> LoopConfig;

    /// Rebuilds per-element state for a surface of `size`.
    fn reseed(&mut self, size: Size);

    fn draw(&mut self, surface: &mut dyn Surface, frame: &FrameCtx);

    /// Number of live particles/glyph tokens.
    fn element_count(&self) -> usize;

    /// Events the scene wants on top of resize.
    fn interests(&self) -> &'static [EventKind] {
        &[]
    }

    fn on_event(&mut self, _event: &HostEvent) {}
}

/// Maps the viewport to the surface size.
pub type Fit = Box<dyn Fn(Size) -> Size>;

pub fn fit_viewport() -> Fit {
    Box::new(|viewport| viewport)
}

struct Core {
    scene: Box<dyn Scene>,
    surface: Box<dyn Surface>,
    fit: Fit,
    time: f64,
    frames: u64,
}

struct Shared {
    name: &'static str,
    host: Rc<dyn Host>,
    ctx: Rc<UiContext>,
    state: Cell<LoopState>,
    core: RefCell<Core>,
    frame: RefCell<Option<Subscription>>,
    listeners: RefCell<Vec<Subscription>>,
}

pub struct FrameLoop {
    shared: Rc<Shared>,
}

impl FrameLoop {
    pub fn new(
        name: &'static str,
        host: Rc<dyn Host>,
        ctx: Rc<UiContext>,
        surface: Box<dyn Surface>,
        scene: Box<dyn Scene>,
        fit: Fit,
    ) -> Self {
        Self {
            shared: Rc::new(Shared {
                name,
                host,
                ctx,
                state: Cell::new(LoopState::Uninitialized),
                core: RefCell::new(Core {
                    scene,
                    surface,
                    fit,
                    time: 0.0,
                    frames: 0,
                }),
                frame: RefCell::new(None),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn start(&self) {
        let shared = &self.shared;
        if shared.state.get() != LoopState::Uninitialized {
            tracing::warn!(name = shared.name, state = ?shared.state.get(), "frame loop already started");
            return;
        }
        shared.refit();
        shared.state.set(LoopState::Running);

        let mut listeners = Vec::new();
        let weak = Rc::downgrade(shared);
        listeners.push(shared.host.listen(
            EventKind::Resize,
            Rc::new(move |_: &HostEvent| {
                if let Some(shared) = weak.upgrade() {
                    shared.refit();
                }
            }),
        ));
        let interests = shared.core.borrow().scene.interests();
        for &kind in interests {
            let weak: Weak<Shared> = Rc::downgrade(shared);
            listeners.push(shared.host.listen(
                kind,
                Rc::new(move |event: &HostEvent| {
                    if let Some(shared) = weak.upgrade() {
                        shared.core.borrow_mut().scene.on_event(event);
                    }
                }),
            ));
        }
        *shared.listeners.borrow_mut() = listeners;

        tracing::debug!(name = shared.name, "frame loop running");
        let now = shared.host.now_ms();
        Shared::tick(shared, now);
    }

    /// Cancels the pending frame and every listener. Idempotent.
    pub fn teardown(&self) {
        let shared = &self.shared;
        if shared.state.replace(LoopState::TornDown) == LoopState::TornDown {
            return;
        }
        drop(shared.frame.borrow_mut().take());
        let listeners = std::mem::take(&mut *shared.listeners.borrow_mut());
        drop(listeners);
        tracing::debug!(name = shared.name, frames = shared.core.borrow().frames, "frame loop torn down");
    }

    pub fn state(&self) -> LoopState {
        self.shared.state.get()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.shared.core.borrow().frames
    }

    pub fn time(&self) -> f64 {
        self.shared.core.borrow().time
    }

    pub fn element_count(&self) -> usize {
        self.shared.core.borrow().scene.element_count()
    }

    pub fn surface_size(&self) -> Size {
        self.shared.core.borrow().surface.size()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl Shared {
    fn refit(&self) {
        let viewport = self.host.viewport();
        let mut core = self.core.borrow_mut();
        let size = (core.fit)(viewport);
        core.surface.resize(size);
        core.scene.reseed(size);
        tracing::trace!(name = self.name, width = size.width, height = size.height, "surface refit");
    }

    fn tick(shared: &Rc<Shared>, now_ms: f64) {
        if shared.state.get() != LoopState::Running {
            return;
        }
        shared.render(now_ms);

        let weak = Rc::downgrade(shared);
        let next = shared.host.request_frame(Box::new(move |ts: f64| {
            if let Some(shared) = weak.upgrade() {
                Shared::tick(&shared, ts);
            }
        }));
        *shared.frame.borrow_mut() = Some(next);
    }

    fn render(&self, now_ms: f64) {
        let theme = self.ctx.theme();
        let palette = Palette::for_theme(theme);
        let mut core = self.core.borrow_mut();
        let core = &mut *core;
        let cfg = core.scene.config();
        let size = core.surface.size();

        match cfg.backdrop {
            Backdrop::Tinted => {
                core.surface.fade(cfg.fade_alpha);
                core.surface.fill_rect(
                    0.0,
                    0.0,
                    size.width,
                    size.height,
                    &Paint::Solid(palette.background),
                );
            }
            Backdrop::Clear => core.surface.clear(),
        }

        core.time += cfg.time_step;
        let frame = FrameCtx {
            time: core.time,
            now_ms,
            size,
            theme,
            palette,
        };
        core.scene.draw(core.surface.as_mut(), &frame);
        core.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::manual::ManualHost;
    use crate::i18n::Language;
    use crate::render::{DrawOp, RecordingSurface};

    struct Dots {
        count: usize,
        moves: usize,
    }

    impl Scene for Dots {
        fn config(&self) -> LoopConfig {
            LoopConfig {
                fade_alpha: 0.05,
                time_step: 0.5,
                backdrop: Backdrop::Tinted,
            }
        }

        fn reseed(&mut self, size: Size) {
            self.count = if size.is_small() { 2 } else { 4 };
        }

        fn draw(&mut self, surface: &mut dyn Surface, frame: &FrameCtx) {
            for i in 0..self.count {
                surface.fill_circle((i as f64, frame.time), 1.0, &Paint::Solid(frame.palette.grid));
            }
        }

        fn element_count(&self) -> usize {
            self.count
        }

        fn interests(&self) -> &'static [EventKind] {
            &[EventKind::PointerMove]
        }

        fn on_event(&mut self, _event: &HostEvent) {
            self.moves += 1;
        }
    }

    fn make(host: &ManualHost, surface: &RecordingSurface) -> FrameLoop {
        FrameLoop::new(
            "dots",
            Rc::new(host.clone()),
            UiContext::new(Language::Ru, Theme::Dark),
            Box::new(surface.clone()),
            Box::new(Dots { count: 0, moves: 0 }),
            fit_viewport(),
        )
    }

    #[test]
    fn state_machine_runs_once() {
        let host = ManualHost::new(Size::new(1200.0, 800.0));
        let surface = RecordingSurface::new(Size::new(0.0, 0.0));
        let lp = make(&host, &surface);
        assert_eq!(lp.state(), LoopState::Uninitialized);
        lp.start();
        assert_eq!(lp.state(), LoopState::Running);
        lp.start();
        assert_eq!(host.listener_count(EventKind::Resize), 1);
        lp.teardown();
        assert_eq!(lp.state(), LoopState::TornDown);
        lp.start();
        assert_eq!(lp.state(), LoopState::TornDown);
    }

    #[test]
    fn each_frame_fades_tints_and_reschedules() {
        let host = ManualHost::new(Size::new(1200.0, 800.0));
        let surface = RecordingSurface::new(Size::new(0.0, 0.0));
        let lp = make(&host, &surface);
        lp.start();
        assert_eq!(lp.frames_drawn(), 1);
        assert_eq!(host.pending_frames(), 1);

        surface.take_ops();
        host.run_frame();
        let ops = surface.take_ops();
        assert_eq!(ops[0], DrawOp::Fade(0.05));
        assert!(matches!(ops[1], DrawOp::Rect { .. }));
        assert_eq!(ops.len(), 2 + 4);
        assert_eq!(lp.frames_drawn(), 2);
        assert!((lp.time() - 1.0).abs() < 1e-9);
        assert_eq!(host.pending_frames(), 1);
    }

    #[test]
    fn resize_refits_and_reseeds() {
        let host = ManualHost::new(Size::new(1200.0, 800.0));
        let surface = RecordingSurface::new(Size::new(0.0, 0.0));
        let lp = make(&host, &surface);
        lp.start();
        assert_eq!(lp.element_count(), 4);
        host.resize(Size::new(500.0, 900.0));
        assert_eq!(lp.element_count(), 2);
        assert_eq!(lp.surface_size(), Size::new(500.0, 900.0));
        assert_eq!(surface.resizes(), 2);
    }

    #[test]
    fn teardown_stops_scheduling_and_releases_everything() {
        let host = ManualHost::new(Size::new(1200.0, 800.0));
        let surface = RecordingSurface::new(Size::new(0.0, 0.0));
        let lp = make(&host, &surface);
        lp.start();
        host.run_frame();
        host.emit(HostEvent::PointerMove { x: 1.0, y: 2.0 });
        drop(lp);
        assert_eq!(host.pending_frames(), 0);
        assert_eq!(host.total_listeners(), 0);
        assert_eq!(host.ledger().live(), 0);
        assert_eq!(host.run_frame(), 0);
    }
}
