//! Every mounted component must hand back all of its listeners, timers and
//! frame requests when it goes away.

use std::rc::Rc;

use shoshiy_site::app::{App, PageView, Surfaces};
use shoshiy_site::carousel::SlideStatus;
use shoshiy_site::context::UiContext;
use shoshiy_site::cursor::CustomCursor;
use shoshiy_site::host::manual::ManualHost;
use shoshiy_site::host::{EventKind, Host, HostEvent, Size};
use shoshiy_site::i18n::Language;
use shoshiy_site::palette::Theme;
use shoshiy_site::render::{fit_viewport, FrameLoop, RecordingSurface, Surface};
use shoshiy_site::scenes::{ContactScene, HeroScene};

struct Quiet;

impl PageView for Quiet {
    fn show_language(&self, _: Language) {}
    fn show_theme(&self, _: Theme) {}
    fn show_header_scrolled(&self, _: bool) {}
    fn show_slide(&self, _: SlideStatus, _: usize) {}
    fn scroll_to_anchor(&self, _: &str) {}
    fn scroll_top(&self) {}
}

fn surface() -> Box<dyn Surface> {
    Box::new(RecordingSurface::new(Size::new(0.0, 0.0)))
}

fn ctx() -> Rc<UiContext> {
    UiContext::new(Language::Ru, Theme::Dark)
}

fn mount_app(host: &ManualHost) -> App {
    App::mount(
        Rc::new(host.clone()),
        Rc::new(Quiet),
        ctx(),
        Surfaces {
            hero: Some(surface()),
            contact: Some((surface(), fit_viewport())),
            cursor: Some(surface()),
        },
    )
}

fn exercise(host: &ManualHost) {
    host.emit(HostEvent::PointerMove { x: 300.0, y: 200.0 });
    host.emit(HostEvent::PointerDown);
    host.emit(HostEvent::HoverEnter { interactive: true });
    host.emit(HostEvent::Scroll { y: 400.0 });
    host.resize(Size::new(700.0, 900.0));
    for _ in 0..5 {
        host.run_frame();
        host.advance(16.0);
    }
}

fn assert_clean(host: &ManualHost) {
    assert_eq!(host.ledger().live(), 0, "leaked subscriptions");
    assert_eq!(host.total_listeners(), 0);
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.active_timers(), 0);
}

#[test]
fn hero_loop_releases_everything() {
    let host = ManualHost::new(Size::new(1280.0, 800.0));
    let lp = FrameLoop::new(
        "hero",
        Rc::new(host.clone()),
        ctx(),
        surface(),
        Box::new(HeroScene::new(1, true)),
        fit_viewport(),
    );
    lp.start();
    exercise(&host);
    assert!(host.ledger().live() > 0);
    drop(lp);
    assert_clean(&host);
}

#[test]
fn contact_loop_releases_everything() {
    let host = ManualHost::new(Size::new(1280.0, 800.0));
    let lp = FrameLoop::new(
        "contact",
        Rc::new(host.clone()),
        ctx(),
        surface(),
        Box::new(ContactScene::new()),
        fit_viewport(),
    );
    lp.start();
    exercise(&host);
    lp.teardown();
    assert_clean(&host);
}

#[test]
fn cursor_releases_everything() {
    let host = ManualHost::new(Size::new(1280.0, 800.0));
    let mut cursor = CustomCursor::mount(Rc::new(host.clone()), ctx(), surface());
    exercise(&host);
    assert!(cursor.frames_drawn() > 1);
    cursor.unmount();
    assert_clean(&host);
    cursor.unmount();
    assert_clean(&host);
}

#[test]
fn app_unmount_releases_everything() {
    let host = ManualHost::new(Size::new(1280.0, 800.0));
    let mut app = mount_app(&host);
    exercise(&host);
    host.advance(20_000.0);
    app.unmount();
    assert_clean(&host);
    app.unmount();
    assert_clean(&host);
}

#[test]
fn dropping_the_app_is_an_unmount() {
    let host = ManualHost::new(Size::new(1280.0, 800.0));
    let app = mount_app(&host);
    exercise(&host);
    drop(app);
    assert_clean(&host);
}

#[test]
fn touch_devices_get_no_pointer_wiring() {
    let host = ManualHost::new(Size::new(390.0, 844.0)).with_touch(true);
    let app = mount_app(&host);
    assert!(app.cursor().is_some_and(|c| !c.is_enabled()));
    for kind in [
        EventKind::PointerMove,
        EventKind::PointerDown,
        EventKind::PointerUp,
        EventKind::HoverEnter,
        EventKind::HoverLeave,
        EventKind::PageLeave,
        EventKind::PageEnter,
    ] {
        assert_eq!(host.listener_count(kind), 0, "{kind:?}");
    }
}

#[test]
fn hero_density_follows_only_the_small_flag() {
    let host = ManualHost::new(Size::new(320.0, 600.0));
    let lp = FrameLoop::new(
        "hero",
        Rc::new(host.clone()),
        ctx(),
        surface(),
        Box::new(HeroScene::new(9, true)),
        fit_viewport(),
    );
    lp.start();
    let small = lp.element_count();
    host.resize(Size::new(767.0, 2000.0));
    assert_eq!(lp.element_count(), small);
    host.resize(Size::new(768.0, 300.0));
    let large = lp.element_count();
    host.resize(Size::new(2560.0, 1440.0));
    assert_eq!(lp.element_count(), large);
    assert!(large > small);
}
