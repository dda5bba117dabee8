use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::request_animation_frame;
use gloo::timers::callback::Interval;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, MouseEvent, Window};

use crate::error::{SiteError, SiteResult};
use crate::host::{
    is_interactive, ElementInfo, EventKind, Handler, Host, HostEvent, ListenerLedger, Size,
    Subscription, UiAction,
};

const TOUCH_QUERY: &str = "(hover: none) and (pointer: coarse)";

/// [`Host`] backed by the page's window and document.
pub struct BrowserHost {
    window: Window,
    document: Document,
    ledger: Rc<ListenerLedger>,
    touch: bool,
}

impl BrowserHost {
    pub fn new() -> SiteResult<Self> {
        let window = web_sys::window().ok_or_else(|| SiteError::dom("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| SiteError::dom("no document"))?;
        let touch = window
            .match_media(TOUCH_QUERY)
            .ok()
            .flatten()
            .is_some_and(|q| q.matches());
        Ok(Self {
            window,
            document,
            ledger: ListenerLedger::new(),
            touch,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn on(
        &self,
        target: &EventTarget,
        name: &'static str,
        handler: Handler,
        map: fn(&Window, &Event) -> Option<HostEvent>,
    ) -> EventListener {
        let window = self.window.clone();
        EventListener::new(target, name, move |event| {
            if let Some(host_event) = map(&window, event) {
                handler(&host_event);
            }
        })
    }
}

fn viewport_of(window: &Window) -> Size {
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Size::new(read(window.inner_width()), read(window.inner_height()))
}

fn pointer(_: &Window, event: &Event) -> Option<HostEvent> {
    let e = event.dyn_ref::<MouseEvent>()?;
    Some(HostEvent::PointerMove {
        x: f64::from(e.client_x()),
        y: f64::from(e.client_y()),
    })
}

/// Walks from the event target up to the root, checking each element.
fn hover(_: &Window, event: &Event) -> Option<HostEvent> {
    let mut chain: Vec<(String, Option<String>)> = Vec::new();
    let mut current = event.target()?.dyn_into::<Element>().ok();
    while let Some(el) = current {
        chain.push((el.tag_name(), el.get_attribute("role")));
        current = el.parent_element();
    }
    let interactive = is_interactive(chain.iter().map(|(tag, role)| ElementInfo {
        tag: tag.as_str(),
        role: role.as_deref(),
    }));
    Some(HostEvent::HoverEnter { interactive })
}

fn action(event: &Event) -> Option<UiAction> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let el = target.closest("[data-action]").ok()??;
    UiAction::parse(&el.get_attribute("data-action")?)
}

impl Host for BrowserHost {
    fn viewport(&self) -> Size {
        viewport_of(&self.window)
    }

    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn is_touch_primary(&self) -> bool {
        self.touch
    }

    fn seed(&self) -> u64 {
        let hi = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
        let lo = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
        (hi << 32) | lo
    }

    fn ledger(&self) -> &Rc<ListenerLedger> {
        &self.ledger
    }

    fn listen(&self, kind: EventKind, handler: Handler) -> Subscription {
        let win: &EventTarget = self.window.as_ref();
        let doc: &EventTarget = self.document.as_ref();
        let listener = match kind {
            EventKind::Resize => self.on(win, "resize", handler, |w, _| {
                Some(HostEvent::Resize(viewport_of(w)))
            }),
            EventKind::Scroll => self.on(win, "scroll", handler, |w, _| {
                Some(HostEvent::Scroll {
                    y: w.scroll_y().unwrap_or(0.0),
                })
            }),
            EventKind::PointerMove => self.on(win, "mousemove", handler, pointer),
            EventKind::PointerDown => {
                self.on(win, "mousedown", handler, |_, _| Some(HostEvent::PointerDown))
            }
            EventKind::PointerUp => {
                self.on(win, "mouseup", handler, |_, _| Some(HostEvent::PointerUp))
            }
            EventKind::HoverEnter => self.on(doc, "mouseover", handler, hover),
            EventKind::HoverLeave => {
                self.on(doc, "mouseout", handler, |_, _| Some(HostEvent::HoverLeave))
            }
            EventKind::PageLeave => {
                self.on(doc, "mouseleave", handler, |_, _| Some(HostEvent::PageLeave))
            }
            EventKind::PageEnter => {
                self.on(doc, "mouseenter", handler, |_, _| Some(HostEvent::PageEnter))
            }
            EventKind::Action => EventListener::new_with_options(
                doc,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    if let Some(action) = action(event) {
                        event.prevent_default();
                        handler(&HostEvent::Action(action));
                    }
                },
            ),
        };
        Subscription::new(&self.ledger, move || drop(listener))
    }

    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> Subscription {
        let handle = request_animation_frame(callback);
        Subscription::new(&self.ledger, move || drop(handle))
    }

    fn every(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> Subscription {
        let interval = Interval::new(period_ms, callback);
        Subscription::new(&self.ledger, move || drop(interval))
    }
}
