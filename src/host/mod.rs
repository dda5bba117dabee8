//! The seam between site logic and the environment it runs in.
//!
//! Components never touch the browser directly. They ask a [`Host`] for event
//! subscriptions, animation frames and interval timers; each request returns a
//! [`Subscription`] whose drop cancels it. Every host keeps a
//! [`ListenerLedger`] so a finished teardown can be checked for leaks.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::i18n::Language;

pub mod manual;

/// Widths below this are treated as small (phone) viewports.
pub const SMALL_VIEWPORT_PX: f64 = 768.0;
/// Widths at or above this show three carousel slides.
pub const LARGE_VIEWPORT_PX: f64 = 1024.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_small(&self) -> bool {
        self.width < SMALL_VIEWPORT_PX
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    Scroll,
    PointerMove,
    PointerDown,
    PointerUp,
    HoverEnter,
    HoverLeave,
    PageLeave,
    PageEnter,
    Action,
}

#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    Resize(Size),
    Scroll { y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerDown,
    PointerUp,
    /// Pointer entered an element; `interactive` is the result of
    /// [`is_interactive`] on its ancestry.
    HoverEnter { interactive: bool },
    HoverLeave,
    PageLeave,
    PageEnter,
    Action(UiAction),
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            HostEvent::Resize(_) => EventKind::Resize,
            HostEvent::Scroll { .. } => EventKind::Scroll,
            HostEvent::PointerMove { .. } => EventKind::PointerMove,
            HostEvent::PointerDown => EventKind::PointerDown,
            HostEvent::PointerUp => EventKind::PointerUp,
            HostEvent::HoverEnter { .. } => EventKind::HoverEnter,
            HostEvent::HoverLeave => EventKind::HoverLeave,
            HostEvent::PageLeave => EventKind::PageLeave,
            HostEvent::PageEnter => EventKind::PageEnter,
            HostEvent::Action(_) => EventKind::Action,
        }
    }
}

/// User intent decoded from a `data-action` attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiAction {
    SetLanguage(Language),
    ToggleTheme,
    ScrollTop,
    ScrollTo(String),
    CarouselPrev,
    CarouselNext,
    CarouselGoTo(usize),
}

impl UiAction {
    /// Parses `lang:ru`, `theme`, `top`, `scroll:nav_works`, `carousel:prev`,
    /// `carousel:next` and `carousel:3`.
    pub fn parse(raw: &str) -> Option<UiAction> {
        let raw = raw.trim();
        let (head, arg) = match raw.split_once(':') {
            Some((h, a)) => (h, Some(a)),
            None => (raw, None),
        };
        match (head, arg) {
            ("theme", None) => Some(UiAction::ToggleTheme),
            ("top", None) => Some(UiAction::ScrollTop),
            ("lang", Some(code)) => Language::from_code(code).map(UiAction::SetLanguage),
            ("scroll", Some(anchor)) if !anchor.is_empty() => {
                Some(UiAction::ScrollTo(anchor.to_string()))
            }
            ("carousel", Some("prev")) => Some(UiAction::CarouselPrev),
            ("carousel", Some("next")) => Some(UiAction::CarouselNext),
            ("carousel", Some(n)) => n.parse().ok().map(UiAction::CarouselGoTo),
            _ => None,
        }
    }

    pub fn encode(&self) -> String {
        match self {
            UiAction::SetLanguage(lang) => format!("lang:{}", lang.code()),
            UiAction::ToggleTheme => "theme".to_string(),
            UiAction::ScrollTop => "top".to_string(),
            UiAction::ScrollTo(anchor) => format!("scroll:{anchor}"),
            UiAction::CarouselPrev => "carousel:prev".to_string(),
            UiAction::CarouselNext => "carousel:next".to_string(),
            UiAction::CarouselGoTo(i) => format!("carousel:{i}"),
        }
    }
}

/// Tag and role of one element in a hover target's ancestry.
#[derive(Clone, Copy, Debug)]
pub struct ElementInfo<'a> {
    pub tag: &'a str,
    pub role: Option<&'a str>,
}

/// True when any element in the chain (target first) is a link, a button or
/// carries `role="button"`.
pub fn is_interactive<'a>(chain: impl IntoIterator<Item = ElementInfo<'a>>) -> bool {
    chain.into_iter().any(|el| {
        el.tag.eq_ignore_ascii_case("a")
            || el.tag.eq_ignore_ascii_case("button")
            || el.role == Some("button")
    })
}

/// Counts registrations and releases across every subscription of one host.
#[derive(Default)]
pub struct ListenerLedger {
    registered: Cell<usize>,
    released: Cell<usize>,
}

impl ListenerLedger {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn registered(&self) -> usize {
        self.registered.get()
    }

    pub fn released(&self) -> usize {
        self.released.get()
    }

    pub fn live(&self) -> usize {
        self.registered.get() - self.released.get()
    }
}

impl fmt::Debug for ListenerLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerLedger")
            .field("registered", &self.registered())
            .field("released", &self.released())
            .finish()
    }
}

/// Handle to a registered listener, frame request or timer. Dropping it runs
/// the cancel hook exactly once.
#[must_use = "dropping a Subscription cancels it immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
    ledger: Rc<ListenerLedger>,
}

impl Subscription {
    pub fn new(ledger: &Rc<ListenerLedger>, cancel: impl FnOnce() + 'static) -> Self {
        ledger.registered.set(ledger.registered.get() + 1);
        Self {
            cancel: Some(Box::new(cancel)),
            ledger: Rc::clone(ledger),
        }
    }

    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
            self.ledger.released.set(self.ledger.released.get() + 1);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

pub type Handler = Rc<dyn Fn(&HostEvent)>;

pub trait Host {
    /// Current layout viewport in CSS pixels.
    fn viewport(&self) -> Size;

    /// Monotonic clock in milliseconds.
    fn now_ms(&self) -> f64;

    /// True for touch-first devices (`(hover: none) and (pointer: coarse)`).
    fn is_touch_primary(&self) -> bool;

    /// Seed for decorative randomness.
    fn seed(&self) -> u64;

    fn ledger(&self) -> &Rc<ListenerLedger>;

    fn listen(&self, kind: EventKind, handler: Handler) -> Subscription;

    /// Runs `callback` once before the next repaint with the frame timestamp.
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> Subscription;

    /// Runs `callback` every `period_ms` until the subscription is dropped.
    fn every(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> Subscription;
}
