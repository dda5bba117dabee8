//! In-memory [`Host`] with a hand-driven clock. Used for headless runs and
//! tests: events are injected with [`ManualHost::emit`], frames run with
//! [`ManualHost::run_frame`] and timers fire from [`ManualHost::advance`].

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::{EventKind, Handler, Host, HostEvent, ListenerLedger, Size, Subscription};

type SharedTick = Rc<RefCell<Box<dyn FnMut()>>>;

struct Timer {
    id: u64,
    period: f64,
    due: f64,
    callback: SharedTick,
}

struct Inner {
    ledger: Rc<ListenerLedger>,
    viewport: Cell<Size>,
    now: Cell<f64>,
    touch: Cell<bool>,
    seed: Cell<u64>,
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, EventKind, Handler)>>,
    frames: RefCell<Vec<(u64, Box<dyn FnOnce(f64)>)>>,
    timers: RefCell<Vec<Timer>>,
}

impl Inner {
    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

#[derive(Clone)]
pub struct ManualHost {
    inner: Rc<Inner>,
}

impl ManualHost {
    pub fn new(viewport: Size) -> Self {
        Self {
            inner: Rc::new(Inner {
                ledger: ListenerLedger::new(),
                viewport: Cell::new(viewport),
                now: Cell::new(0.0),
                touch: Cell::new(false),
                seed: Cell::new(7),
                next_id: Cell::new(1),
                listeners: RefCell::new(Vec::new()),
                frames: RefCell::new(Vec::new()),
                timers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn with_touch(self, touch: bool) -> Self {
        self.inner.touch.set(touch);
        self
    }

    pub fn with_seed(self, seed: u64) -> Self {
        self.inner.seed.set(seed);
        self
    }

    /// Delivers `event` to every listener of its kind. A resize updates the
    /// viewport first.
    pub fn emit(&self, event: HostEvent) {
        if let HostEvent::Resize(size) = &event {
            self.inner.viewport.set(*size);
        }
        let kind = event.kind();
        let handlers: Vec<Handler> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, h)| Rc::clone(h))
            .collect();
        for handler in handlers {
            handler(&event);
        }
    }

    pub fn resize(&self, size: Size) {
        self.emit(HostEvent::Resize(size));
    }

    /// Runs every frame callback queued before this call. Callbacks queued
    /// while running wait for the next call. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let pending = std::mem::take(&mut *self.inner.frames.borrow_mut());
        let ts = self.inner.now.get();
        let n = pending.len();
        for (_, callback) in pending {
            callback(ts);
        }
        n
    }

    /// Moves the clock forward by `ms`, firing due timers in order.
    pub fn advance(&self, ms: f64) {
        let target = self.inner.now.get() + ms;
        loop {
            let next = {
                let mut timers = self.inner.timers.borrow_mut();
                let due = timers
                    .iter_mut()
                    .filter(|t| t.due <= target)
                    .min_by(|a, b| a.due.total_cmp(&b.due));
                due.map(|t| {
                    let at = t.due;
                    t.due += t.period;
                    (at, Rc::clone(&t.callback))
                })
            };
            let Some((at, callback)) = next else { break };
            self.inner.now.set(at);
            (&mut *callback.borrow_mut())();
        }
        self.inner.now.set(target);
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.inner
            .listeners
            .borrow()
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .count()
    }

    pub fn total_listeners(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    pub fn pending_frames(&self) -> usize {
        self.inner.frames.borrow().len()
    }

    pub fn active_timers(&self) -> usize {
        self.inner.timers.borrow().len()
    }
}

impl Host for ManualHost {
    fn viewport(&self) -> Size {
        self.inner.viewport.get()
    }

    fn now_ms(&self) -> f64 {
        self.inner.now.get()
    }

    fn is_touch_primary(&self) -> bool {
        self.inner.touch.get()
    }

    fn seed(&self) -> u64 {
        self.inner.seed.get()
    }

    fn ledger(&self) -> &Rc<ListenerLedger> {
        &self.inner.ledger
    }

    fn listen(&self, kind: EventKind, handler: Handler) -> Subscription {
        let id = self.inner.next_id();
        self.inner.listeners.borrow_mut().push((id, kind, handler));
        let weak: Weak<Inner> = Rc::downgrade(&self.inner);
        Subscription::new(&self.inner.ledger, move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.borrow_mut().retain(|(i, _, _)| *i != id);
            }
        })
    }

    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> Subscription {
        let id = self.inner.next_id();
        self.inner.frames.borrow_mut().push((id, callback));
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(&self.inner.ledger, move || {
            if let Some(inner) = weak.upgrade() {
                inner.frames.borrow_mut().retain(|(i, _)| *i != id);
            }
        })
    }

    fn every(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> Subscription {
        let id = self.inner.next_id();
        let period = f64::from(period_ms.max(1));
        self.inner.timers.borrow_mut().push(Timer {
            id,
            period,
            due: self.inner.now.get() + period,
            callback: Rc::new(RefCell::new(callback)),
        });
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(&self.inner.ledger, move || {
            if let Some(inner) = weak.upgrade() {
                inner.timers.borrow_mut().retain(|t| t.id != id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listeners_receive_matching_events_only() {
        let host = ManualHost::new(Size::new(1280.0, 720.0));
        let seen = Rc::new(Cell::new(0));
        let s = Rc::clone(&seen);
        let _sub = host.listen(
            EventKind::PointerDown,
            Rc::new(move |_: &HostEvent| s.set(s.get() + 1)),
        );
        host.emit(HostEvent::PointerUp);
        host.emit(HostEvent::PointerDown);
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn dropping_a_listener_removes_it() {
        let host = ManualHost::new(Size::new(1280.0, 720.0));
        let sub = host.listen(EventKind::Resize, Rc::new(|_: &HostEvent| {}));
        assert_eq!(host.listener_count(EventKind::Resize), 1);
        drop(sub);
        assert_eq!(host.listener_count(EventKind::Resize), 0);
        assert_eq!(host.ledger().live(), 0);
    }

    #[test]
    fn timers_fire_per_period() {
        let host = ManualHost::new(Size::new(1280.0, 720.0));
        let fired = Rc::new(Cell::new(0));
        let f = Rc::clone(&fired);
        let sub = host.every(100, Box::new(move || f.set(f.get() + 1)));
        host.advance(99.0);
        assert_eq!(fired.get(), 0);
        host.advance(251.0);
        assert_eq!(fired.get(), 3);
        drop(sub);
        host.advance(1000.0);
        assert_eq!(fired.get(), 3);
        assert_eq!(host.active_timers(), 0);
    }

    #[test]
    fn frames_run_once() {
        let host = ManualHost::new(Size::new(1280.0, 720.0));
        let ran = Rc::new(Cell::new(false));
        let r = Rc::clone(&ran);
        let _frame = host.request_frame(Box::new(move |_: f64| r.set(true)));
        assert_eq!(host.run_frame(), 1);
        assert!(ran.get());
        assert_eq!(host.run_frame(), 0);
    }
}
