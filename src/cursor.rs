//! Custom pointer indicator with a decaying trail.
//!
//! The cursor mirrors the system pointer on a full-viewport overlay. Pointer
//! and hover events update a shared [`CursorState`] synchronously; three
//! interval timers age the trail and re-roll the decorative glyphs; a
//! [`FrameLoop`] paints the state every frame. On touch-primary devices
//! nothing is registered at all.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::f64::consts::TAU;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::context::UiContext;
use crate::host::{EventKind, Host, HostEvent, Size, Subscription};
use crate::palette::CURSOR;
use crate::render::{
    fit_viewport, Align, Backdrop, FrameCtx, FrameLoop, LoopConfig, Paint, Point, Scene, Surface,
    TextStyle,
};

pub const TRAIL_CAPACITY: usize = 9;
pub const TRAIL_MAX_AGE_MS: f64 = 200.0;
pub const TRAIL_TICK_MS: u32 = 16;
pub const HALO_TICK_MS: u32 = 150;
pub const RAIN_TICK_MS: u32 = 50;

const CURSOR_GLYPHS: &str =
    "01アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン";
const HALO_GLYPHS: usize = 12;
const HALO_RADIUS: f64 = 12.0;
const RAIN_DROPS: usize = 15;
const RAIN_SPAN: f64 = 50.0;
const RAIN_STEP: f64 = 2.0;
const RAIN_REROLL: f64 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailSample {
    pub x: f64,
    pub y: f64,
    pub at_ms: f64,
}

/// Most recent pointer samples, newest first.
#[derive(Clone, Debug, Default)]
pub struct TrailBuffer {
    samples: VecDeque<TrailSample>,
}

impl TrailBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `point` at `now_ms` and evicts whatever is over capacity or
    /// older than [`TRAIL_MAX_AGE_MS`].
    pub fn tick(&mut self, point: Point, now_ms: f64) {
        self.samples.push_front(TrailSample {
            x: point.0,
            y: point.1,
            at_ms: now_ms,
        });
        self.samples.truncate(TRAIL_CAPACITY);
        self.evict(now_ms);
    }

    /// Drops every sample older than [`TRAIL_MAX_AGE_MS`] at `now_ms`.
    pub fn evict(&mut self, now_ms: f64) {
        self.samples.retain(|s| now_ms - s.at_ms < TRAIL_MAX_AGE_MS);
    }

    /// Samples still young enough at `now_ms`, newest first.
    pub fn iter_fresh(&self, now_ms: f64) -> impl Iterator<Item = &TrailSample> + '_ {
        self.samples
            .iter()
            .filter(move |s| now_ms - s.at_ms < TRAIL_MAX_AGE_MS)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RainDrop {
    pub y: f64,
    pub glyph: char,
}

/// Everything the overlay draws. Written by event handlers and timers, read
/// once per frame.
#[derive(Clone, Debug)]
pub struct CursorState {
    pub pointer: Option<Point>,
    pub pressed: bool,
    pub hovering: bool,
    pub visible: bool,
    pub trail: TrailBuffer,
    pub halo: Vec<char>,
    pub rain: Vec<RainDrop>,
    rng: SmallRng,
    alphabet: Vec<char>,
}

impl CursorState {
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            pointer: None,
            pressed: false,
            hovering: false,
            visible: true,
            trail: TrailBuffer::new(),
            halo: Vec::with_capacity(HALO_GLYPHS),
            rain: Vec::with_capacity(RAIN_DROPS),
            rng: SmallRng::seed_from_u64(seed),
            alphabet: CURSOR_GLYPHS.chars().collect(),
        };
        state.reroll_halo();
        for _ in 0..RAIN_DROPS {
            let y = state.rng.gen::<f64>() * RAIN_SPAN * 2.0 - RAIN_SPAN;
            let glyph = state.glyph();
            state.rain.push(RainDrop { y, glyph });
        }
        state
    }

    fn glyph(&mut self) -> char {
        self.alphabet[self.rng.gen_range(0..self.alphabet.len())]
    }

    pub fn apply(&mut self, event: &HostEvent) {
        match *event {
            HostEvent::PointerMove { x, y } => self.pointer = Some((x, y)),
            HostEvent::PointerDown => self.pressed = true,
            HostEvent::PointerUp => self.pressed = false,
            HostEvent::HoverEnter { interactive } => self.hovering = interactive,
            HostEvent::HoverLeave => self.hovering = false,
            HostEvent::PageLeave => self.visible = false,
            HostEvent::PageEnter => self.visible = true,
            _ => {}
        }
    }

    pub fn tick_trail(&mut self, now_ms: f64) {
        self.trail.evict(now_ms);
        if !self.visible {
            return;
        }
        if let Some(pointer) = self.pointer {
            self.trail.tick(pointer, now_ms);
        }
    }

    pub fn reroll_halo(&mut self) {
        self.halo.clear();
        for _ in 0..HALO_GLYPHS {
            let glyph = self.glyph();
            self.halo.push(glyph);
        }
    }

    /// Moves every drop down by 2 px, wrapping past the bottom of the band.
    pub fn step_rain(&mut self) {
        if !self.visible {
            return;
        }
        for i in 0..self.rain.len() {
            let drop = self.rain[i];
            let y = if drop.y > RAIN_SPAN {
                -RAIN_SPAN
            } else {
                drop.y + RAIN_STEP
            };
            let glyph = if self.rng.gen_bool(RAIN_REROLL) {
                self.glyph()
            } else {
                drop.glyph
            };
            self.rain[i] = RainDrop { y, glyph };
        }
    }

    /// Indicator side length in px, after hover and press.
    pub fn indicator_side(&self) -> f64 {
        let side = if self.hovering { 5.0 } else { 4.0 };
        if self.pressed {
            side * 0.9
        } else {
            side
        }
    }
}

struct CursorScene {
    state: Rc<RefCell<CursorState>>,
}

impl CursorScene {
    fn draw_trail(surface: &mut dyn Surface, state: &CursorState, now_ms: f64) {
        let fresh: Vec<&TrailSample> = state.trail.iter_fresh(now_ms).collect();
        let n = fresh.len() as f64;
        for (i, sample) in fresh.iter().enumerate() {
            let weight = (n - i as f64) / n;
            let size = weight * 3.0;
            let paint = Paint::Radial {
                center: (sample.x, sample.y),
                radius: size / 2.0,
                stops: vec![
                    (0.0, CURSOR.with_alpha(0.75 * weight * 0.6)),
                    (0.7, CURSOR.with_alpha(0.0)),
                ],
            };
            surface.fill_circle((sample.x, sample.y), size / 2.0, &paint);
        }
    }

    fn draw_rain(surface: &mut dyn Surface, state: &CursorState, (px, py): Point) {
        surface.set_font(8.0, Align::Center);
        let n = state.rain.len() as f64;
        let mut buf = [0u8; 4];
        for (id, drop) in state.rain.iter().enumerate() {
            let angle = id as f64 / n * TAU;
            let radius = 15.0 + (id % 3) as f64 * 5.0;
            let alpha = (0.6 - drop.y.abs() / 100.0).max(0.0);
            let style = TextStyle {
                color: CURSOR.with_alpha(alpha),
                rotation: 0.0,
                glow: Some((3.0, CURSOR.with_alpha(0.8))),
            };
            surface.fill_text(
                drop.glyph.encode_utf8(&mut buf),
                px + angle.cos() * radius,
                py + angle.sin() * radius + drop.y,
                &style,
            );
        }
    }

    fn draw_halo(surface: &mut dyn Surface, state: &CursorState, (px, py): Point) {
        surface.set_font(7.0, Align::Center);
        let n = state.halo.len() as f64;
        let mut buf = [0u8; 4];
        for (i, glyph) in state.halo.iter().enumerate() {
            let angle = i as f64 / n * TAU;
            let style = TextStyle {
                color: CURSOR.with_alpha(0.64),
                rotation: 0.0,
                glow: Some((4.0, CURSOR.with_alpha(0.8))),
            };
            surface.fill_text(
                glyph.encode_utf8(&mut buf),
                px + angle.cos() * HALO_RADIUS,
                py + angle.sin() * HALO_RADIUS,
                &style,
            );
        }
    }
}

impl Scene for CursorScene {
    fn config(&self) -> LoopConfig {
        LoopConfig {
            fade_alpha: 0.0,
            time_step: 0.016,
            backdrop: Backdrop::Clear,
        }
    }

    fn reseed(&mut self, _size: Size) {}

    fn draw(&mut self, surface: &mut dyn Surface, frame: &FrameCtx) {
        let state = self.state.borrow();
        let Some((px, py)) = state.pointer else { return };
        if !state.visible {
            return;
        }

        Self::draw_trail(surface, &state, frame.now_ms);
        Self::draw_rain(surface, &state, (px, py));

        let glow_radius = if state.hovering { 16.0 } else { 12.0 };
        let glow = Paint::Radial {
            center: (px, py),
            radius: glow_radius,
            stops: vec![
                (0.0, CURSOR.with_alpha(if state.hovering { 0.14 } else { 0.07 })),
                (0.7, CURSOR.with_alpha(0.0)),
            ],
        };
        surface.fill_circle((px, py), glow_radius, &glow);

        let ring = if state.hovering { 24.0 } else { 20.0 };
        let ring_alpha = if state.hovering { 0.7 } else { 0.5 };
        surface.stroke_rect(
            px - ring / 2.0,
            py - ring / 2.0,
            ring,
            ring,
            1.0,
            CURSOR.with_alpha(ring_alpha),
        );

        let side = state.indicator_side();
        let body = if state.hovering { 0.95 } else { 0.85 };
        surface.fill_rect(
            px - side / 2.0,
            py - side / 2.0,
            side,
            side,
            &Paint::Solid(CURSOR.with_alpha(body)),
        );
        surface.stroke_rect(px - side / 2.0, py - side / 2.0, side, side, 1.0, CURSOR);

        if state.hovering {
            Self::draw_halo(surface, &state, (px, py));
        }
    }

    fn element_count(&self) -> usize {
        TRAIL_CAPACITY
    }
}

struct Mounted {
    state: Rc<RefCell<CursorState>>,
    subscriptions: Vec<Subscription>,
    frames: FrameLoop,
}

/// The mounted cursor. Dropping it releases every listener, timer and frame.
pub struct CustomCursor {
    mounted: Option<Mounted>,
}

const POINTER_EVENTS: [EventKind; 7] = [
    EventKind::PointerMove,
    EventKind::PointerDown,
    EventKind::PointerUp,
    EventKind::HoverEnter,
    EventKind::HoverLeave,
    EventKind::PageLeave,
    EventKind::PageEnter,
];

impl CustomCursor {
    pub fn mount(host: Rc<dyn Host>, ctx: Rc<UiContext>, surface: Box<dyn Surface>) -> Self {
        if host.is_touch_primary() {
            tracing::debug!("touch-primary device, custom cursor disabled");
            return Self { mounted: None };
        }

        let state = Rc::new(RefCell::new(CursorState::new(host.seed() ^ 0xC0FF_EE00)));
        let mut subscriptions = Vec::with_capacity(POINTER_EVENTS.len() + 3);

        for kind in POINTER_EVENTS {
            let state = Rc::clone(&state);
            subscriptions.push(host.listen(
                kind,
                Rc::new(move |event: &HostEvent| state.borrow_mut().apply(event)),
            ));
        }

        let trail_state = Rc::clone(&state);
        let clock = Rc::downgrade(&host);
        subscriptions.push(host.every(
            TRAIL_TICK_MS,
            Box::new(move || {
                if let Some(host) = clock.upgrade() {
                    trail_state.borrow_mut().tick_trail(host.now_ms());
                }
            }),
        ));
        let halo_state = Rc::clone(&state);
        subscriptions.push(host.every(
            HALO_TICK_MS,
            Box::new(move || halo_state.borrow_mut().reroll_halo()),
        ));
        let rain_state = Rc::clone(&state);
        subscriptions.push(host.every(
            RAIN_TICK_MS,
            Box::new(move || rain_state.borrow_mut().step_rain()),
        ));

        let frames = FrameLoop::new(
            "cursor",
            host,
            ctx,
            surface,
            Box::new(CursorScene {
                state: Rc::clone(&state),
            }),
            fit_viewport(),
        );
        frames.start();

        Self {
            mounted: Some(Mounted {
                state,
                subscriptions,
                frames,
            }),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.mounted.is_some()
    }

    /// Copy of the current state, or `None` when disabled.
    pub fn snapshot(&self) -> Option<CursorState> {
        self.mounted.as_ref().map(|m| m.state.borrow().clone())
    }

    pub fn frames_drawn(&self) -> u64 {
        self.mounted.as_ref().map_or(0, |m| m.frames.frames_drawn())
    }

    pub fn unmount(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            let count = mounted.subscriptions.len();
            drop(mounted);
            tracing::debug!(subscriptions = count, "custom cursor unmounted");
        }
    }
}

impl Drop for CustomCursor {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::manual::ManualHost;
    use crate::i18n::Language;
    use crate::palette::Theme;
    use crate::render::RecordingSurface;

    fn mount(host: &ManualHost) -> (CustomCursor, RecordingSurface) {
        let surface = RecordingSurface::new(Size::new(0.0, 0.0));
        let cursor = CustomCursor::mount(
            Rc::new(host.clone()),
            UiContext::new(Language::Ru, Theme::Dark),
            Box::new(surface.clone()),
        );
        (cursor, surface)
    }

    #[test]
    fn trail_respects_capacity_and_age() {
        let mut trail = TrailBuffer::new();
        for step in 0..40 {
            let now = step as f64 * 16.0;
            trail.tick((step as f64, 0.0), now);
            assert!(trail.len() <= TRAIL_CAPACITY);
            assert!(trail.iter_fresh(now).all(|s| now - s.at_ms < TRAIL_MAX_AGE_MS));
        }
        assert_eq!(trail.len(), TRAIL_CAPACITY);
        assert_eq!(trail.iter_fresh(10_000.0).count(), 0);
    }

    #[test]
    fn sparse_ticks_evict_old_samples() {
        let mut trail = TrailBuffer::new();
        trail.tick((0.0, 0.0), 0.0);
        trail.tick((1.0, 0.0), 150.0);
        trail.tick((2.0, 0.0), 260.0);
        let xs: Vec<f64> = trail.iter_fresh(260.0).map(|s| s.x).collect();
        assert_eq!(xs, vec![2.0, 1.0]);
    }

    #[test]
    fn evict_without_new_samples() {
        let mut trail = TrailBuffer::new();
        trail.tick((0.0, 0.0), 0.0);
        trail.tick((1.0, 0.0), 100.0);
        trail.evict(250.0);
        assert_eq!(trail.len(), 1);
        trail.evict(300.0);
        assert!(trail.is_empty());
    }

    #[test]
    fn hidden_cursor_still_ages_its_trail() {
        let host = ManualHost::new(Size::new(1280.0, 800.0));
        let (cursor, _) = mount(&host);
        host.emit(HostEvent::PointerMove { x: 10.0, y: 10.0 });
        host.advance(160.0);
        assert!(!cursor.snapshot().unwrap().trail.is_empty());
        host.emit(HostEvent::PageLeave);
        host.advance(5000.0);
        assert_eq!(cursor.snapshot().unwrap().trail.len(), 0);
    }

    #[test]
    fn pointer_state_follows_events() {
        let host = ManualHost::new(Size::new(1280.0, 800.0));
        let (cursor, _) = mount(&host);
        host.emit(HostEvent::PointerMove { x: 40.0, y: 60.0 });
        host.emit(HostEvent::PointerDown);
        host.emit(HostEvent::HoverEnter { interactive: true });
        let state = cursor.snapshot().unwrap();
        assert_eq!(state.pointer, Some((40.0, 60.0)));
        assert!(state.pressed && state.hovering);
        assert!((state.indicator_side() - 4.5).abs() < 1e-9);

        host.emit(HostEvent::PointerUp);
        host.emit(HostEvent::HoverLeave);
        host.emit(HostEvent::PageLeave);
        let state = cursor.snapshot().unwrap();
        assert!(!state.pressed && !state.hovering && !state.visible);
    }

    #[test]
    fn timers_feed_trail_and_glyphs() {
        let host = ManualHost::new(Size::new(1280.0, 800.0));
        let (cursor, _) = mount(&host);
        host.emit(HostEvent::PointerMove { x: 10.0, y: 10.0 });
        let before = cursor.snapshot().unwrap();
        host.advance(400.0);
        let after = cursor.snapshot().unwrap();
        assert_eq!(after.trail.len(), TRAIL_CAPACITY);
        assert_eq!(after.halo.len(), HALO_GLYPHS);
        assert_eq!(after.rain.len(), RAIN_DROPS);
        assert_ne!(before.rain, after.rain);
        assert!(after.rain.iter().all(|d| d.y >= -RAIN_SPAN && d.y <= RAIN_SPAN + RAIN_STEP));
    }

    #[test]
    fn hidden_cursor_draws_nothing() {
        let host = ManualHost::new(Size::new(1280.0, 800.0));
        let (_cursor, surface) = mount(&host);
        host.emit(HostEvent::PointerMove { x: 10.0, y: 10.0 });
        host.emit(HostEvent::PageLeave);
        surface.take_ops();
        host.run_frame();
        assert_eq!(surface.take_ops().len(), 1);
        host.emit(HostEvent::PageEnter);
        host.run_frame();
        assert!(surface.take_ops().len() > 1);
    }

    #[test]
    fn touch_devices_register_nothing() {
        let host = ManualHost::new(Size::new(390.0, 844.0)).with_touch(true);
        let (cursor, _) = mount(&host);
        assert!(!cursor.is_enabled());
        assert_eq!(host.ledger().registered(), 0);
        assert_eq!(host.pending_frames(), 0);
    }

    #[test]
    fn unmount_releases_everything() {
        let host = ManualHost::new(Size::new(1280.0, 800.0));
        let (mut cursor, _) = mount(&host);
        // 7 pointer listeners, 3 timers, resize, first frame
        assert_eq!(host.ledger().live(), 12);
        cursor.unmount();
        assert_eq!(host.ledger().live(), 0);
        assert_eq!(host.total_listeners(), 0);
        assert_eq!(host.active_timers(), 0);
        assert_eq!(host.pending_frames(), 0);
    }
}
