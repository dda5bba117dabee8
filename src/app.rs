//! Mounts every interactive component of the page against one host.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::carousel::{slides_per_view, ProjectsCarousel, SlideStatus, SnapScroller};
use crate::content::PROJECTS;
use crate::context::UiContext;
use crate::cursor::CustomCursor;
use crate::host::{EventKind, Host, HostEvent, Subscription, UiAction};
use crate::i18n::Language;
use crate::palette::Theme;
use crate::render::{fit_viewport, Fit, FrameLoop, Surface};
use crate::scenes::{ContactScene, HeroScene};

/// Header switches to its compact style past this scroll offset.
pub const HEADER_SCROLL_THRESHOLD: f64 = 50.0;

/// Document-side effects the app asks for. Implemented over the DOM in the
/// browser and by recorders in tests.
pub trait PageView {
    fn show_language(&self, lang: Language);
    fn show_theme(&self, theme: Theme);
    fn show_header_scrolled(&self, scrolled: bool);
    fn show_slide(&self, slide: SlideStatus, per_view: usize);
    fn scroll_to_anchor(&self, anchor: &str);
    fn scroll_top(&self);
}

/// Drawing targets found on the page. A missing surface disables only its
/// component.
#[derive(Default)]
pub struct Surfaces {
    pub hero: Option<Box<dyn Surface>>,
    pub contact: Option<(Box<dyn Surface>, Fit)>,
    pub cursor: Option<Box<dyn Surface>>,
}

pub struct App {
    ctx: Rc<UiContext>,
    subscriptions: Vec<Subscription>,
    carousel: Option<Rc<ProjectsCarousel>>,
    cursor: Option<CustomCursor>,
    hero: Option<FrameLoop>,
    contact: Option<FrameLoop>,
}

impl App {
    pub fn mount(
        host: Rc<dyn Host>,
        view: Rc<dyn PageView>,
        ctx: Rc<UiContext>,
        surfaces: Surfaces,
    ) -> Self {
        view.show_language(ctx.language());
        view.show_theme(ctx.theme());

        let hero = surfaces.hero.map(|surface| {
            let lp = FrameLoop::new(
                "hero",
                Rc::clone(&host),
                Rc::clone(&ctx),
                surface,
                Box::new(HeroScene::new(host.seed(), !host.is_touch_primary())),
                fit_viewport(),
            );
            lp.start();
            lp
        });
        let contact = surfaces.contact.map(|(surface, fit)| {
            let lp = FrameLoop::new(
                "contact",
                Rc::clone(&host),
                Rc::clone(&ctx),
                surface,
                Box::new(ContactScene::new()),
                fit,
            );
            lp.start();
            lp
        });
        let cursor = surfaces
            .cursor
            .map(|surface| CustomCursor::mount(Rc::clone(&host), Rc::clone(&ctx), surface));

        let scroller = SnapScroller::new(PROJECTS.len(), true, host.ledger());
        let observer_host = Rc::clone(&host);
        let observer_view = Rc::clone(&view);
        let carousel = Rc::new(ProjectsCarousel::mount(
            Rc::clone(&host),
            scroller,
            Rc::new(move |slide: SlideStatus| {
                let per_view = slides_per_view(observer_host.viewport().width);
                observer_view.show_slide(slide, per_view);
            }),
        ));

        let mut subscriptions = Vec::with_capacity(3);
        subscriptions.push(Self::listen_actions(&host, &ctx, &view, &carousel));

        let last_scrolled = Rc::new(Cell::new(None::<bool>));
        let scroll_view = Rc::clone(&view);
        subscriptions.push(host.listen(
            EventKind::Scroll,
            Rc::new(move |event: &HostEvent| {
                if let HostEvent::Scroll { y } = *event {
                    let scrolled = y > HEADER_SCROLL_THRESHOLD;
                    if last_scrolled.replace(Some(scrolled)) != Some(scrolled) {
                        scroll_view.show_header_scrolled(scrolled);
                    }
                }
            }),
        ));

        let weak: Weak<ProjectsCarousel> = Rc::downgrade(&carousel);
        subscriptions.push(host.listen(
            EventKind::Resize,
            Rc::new(move |_: &HostEvent| {
                if let Some(carousel) = weak.upgrade() {
                    carousel.refresh();
                }
            }),
        ));

        tracing::info!(
            hero = hero.is_some(),
            contact = contact.is_some(),
            cursor = cursor.as_ref().is_some_and(CustomCursor::is_enabled),
            "app mounted"
        );

        Self {
            ctx,
            subscriptions,
            carousel: Some(carousel),
            cursor,
            hero,
            contact,
        }
    }

    fn listen_actions(
        host: &Rc<dyn Host>,
        ctx: &Rc<UiContext>,
        view: &Rc<dyn PageView>,
        carousel: &Rc<ProjectsCarousel>,
    ) -> Subscription {
        let ctx = Rc::clone(ctx);
        let view = Rc::clone(view);
        let carousel = Rc::downgrade(carousel);
        host.listen(
            EventKind::Action,
            Rc::new(move |event: &HostEvent| {
                let HostEvent::Action(action) = event else { return };
                tracing::debug!(action = %action.encode(), "ui action");
                match action {
                    UiAction::SetLanguage(lang) => {
                        if ctx.set_language(*lang) {
                            view.show_language(*lang);
                        }
                    }
                    UiAction::ToggleTheme => view.show_theme(ctx.toggle_theme()),
                    UiAction::ScrollTop => view.scroll_top(),
                    UiAction::ScrollTo(anchor) => view.scroll_to_anchor(anchor),
                    UiAction::CarouselPrev | UiAction::CarouselNext | UiAction::CarouselGoTo(_) => {
                        let Some(carousel) = carousel.upgrade() else { return };
                        match action {
                            UiAction::CarouselPrev => carousel.prev(),
                            UiAction::CarouselNext => carousel.next(),
                            UiAction::CarouselGoTo(i) => carousel.go_to(*i),
                            _ => {}
                        }
                    }
                }
            }),
        )
    }

    pub fn context(&self) -> &Rc<UiContext> {
        &self.ctx
    }

    pub fn hero(&self) -> Option<&FrameLoop> {
        self.hero.as_ref()
    }

    pub fn contact(&self) -> Option<&FrameLoop> {
        self.contact.as_ref()
    }

    pub fn cursor(&self) -> Option<&CustomCursor> {
        self.cursor.as_ref()
    }

    pub fn carousel(&self) -> Option<&ProjectsCarousel> {
        self.carousel.as_deref()
    }

    /// Releases every listener, timer and frame request. Idempotent.
    pub fn unmount(&mut self) {
        self.subscriptions.clear();
        self.carousel = None;
        self.cursor = None;
        if let Some(hero) = self.hero.take() {
            hero.teardown();
        }
        if let Some(contact) = self.contact.take() {
            contact.teardown();
        }
        tracing::debug!("app unmounted");
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.unmount();
    }
}
