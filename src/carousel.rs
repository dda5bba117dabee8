//! Project carousel: a page-snapped scroller plus the autoplay and selection
//! wiring of the projects section.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::host::{Host, ListenerLedger, Subscription, LARGE_VIEWPORT_PX, SMALL_VIEWPORT_PX};

pub const AUTOPLAY_INTERVAL_MS: u32 = 6000;

/// Cards visible at once for a viewport `width`.
pub fn slides_per_view(width: f64) -> usize {
    if width < SMALL_VIEWPORT_PX {
        1
    } else if width < LARGE_VIEWPORT_PX {
        2
    } else {
        3
    }
}

type SelectHandler = Rc<dyn Fn(usize)>;

#[derive(Clone, Copy, Debug)]
struct SnapState {
    index: usize,
    count: usize,
    looping: bool,
}

/// A horizontally scrolling list that snaps to item boundaries and reports
/// the selected index.
pub struct SnapScroller {
    state: Cell<SnapState>,
    listeners: RefCell<Vec<(u64, SelectHandler)>>,
    next_id: Cell<u64>,
    ledger: Rc<ListenerLedger>,
}

impl SnapScroller {
    pub fn new(count: usize, looping: bool, ledger: &Rc<ListenerLedger>) -> Rc<Self> {
        Rc::new(Self {
            state: Cell::new(SnapState {
                index: 0,
                count,
                looping,
            }),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            ledger: Rc::clone(ledger),
        })
    }

    pub fn selected(&self) -> usize {
        self.state.get().index
    }

    pub fn count(&self) -> usize {
        self.state.get().count
    }

    pub fn looping(&self) -> bool {
        self.state.get().looping
    }

    pub fn can_scroll_prev(&self) -> bool {
        let s = self.state.get();
        s.count > 1 && (s.looping || s.index > 0)
    }

    pub fn can_scroll_next(&self) -> bool {
        let s = self.state.get();
        s.count > 1 && (s.looping || s.index + 1 < s.count)
    }

    /// Wraps out-of-range indices when looping, clamps otherwise.
    pub fn scroll_to(&self, index: usize) {
        let s = self.state.get();
        if s.count == 0 {
            return;
        }
        let target = if s.looping {
            index % s.count
        } else {
            index.min(s.count - 1)
        };
        self.select(target);
    }

    pub fn scroll_next(&self) {
        let s = self.state.get();
        if self.can_scroll_next() {
            self.select((s.index + 1) % s.count);
        }
    }

    pub fn scroll_prev(&self) {
        let s = self.state.get();
        if self.can_scroll_prev() {
            self.select((s.index + s.count - 1) % s.count);
        }
    }

    /// Calls `handler` with the new index whenever the selection changes.
    pub fn on_select(self: &Rc<Self>, handler: impl Fn(usize) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(handler)));
        let weak: Weak<Self> = Rc::downgrade(self);
        Subscription::new(&self.ledger, move || {
            if let Some(scroller) = weak.upgrade() {
                scroller.listeners.borrow_mut().retain(|(i, _)| *i != id);
            }
        })
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn select(&self, index: usize) {
        let mut s = self.state.get();
        if s.index == index {
            return;
        }
        s.index = index;
        self.state.set(s);
        let handlers: Vec<SelectHandler> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for handler in handlers {
            handler(index);
        }
    }
}

struct Binding {
    scroller: Rc<SnapScroller>,
    _select: Subscription,
    _autoplay: Subscription,
}

/// What the carousel controls need to show for the current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideStatus {
    pub index: usize,
    pub count: usize,
    pub can_prev: bool,
    pub can_next: bool,
}

impl SlideStatus {
    pub fn of(scroller: &SnapScroller) -> Self {
        Self {
            index: scroller.selected(),
            count: scroller.count(),
            can_prev: scroller.can_scroll_prev(),
            can_next: scroller.can_scroll_next(),
        }
    }
}

/// Receives the new [`SlideStatus`] whenever the visible selection changes.
pub type SlideObserver = Rc<dyn Fn(SlideStatus)>;

pub struct ProjectsCarousel {
    host: Rc<dyn Host>,
    current: Rc<Cell<usize>>,
    observer: SlideObserver,
    binding: Option<Binding>,
}

impl ProjectsCarousel {
    pub fn mount(host: Rc<dyn Host>, scroller: Rc<SnapScroller>, observer: SlideObserver) -> Self {
        let mut carousel = Self {
            host,
            current: Rc::new(Cell::new(0)),
            observer,
            binding: None,
        };
        carousel.bind(scroller);
        carousel
    }

    fn bind(&mut self, scroller: Rc<SnapScroller>) {
        let current = Rc::clone(&self.current);
        let observer = Rc::clone(&self.observer);
        let selected = Rc::downgrade(&scroller);
        let select = scroller.on_select(move |index| {
            current.set(index);
            if let Some(scroller) = selected.upgrade() {
                observer(SlideStatus::of(&scroller));
            }
        });

        let weak = Rc::downgrade(&scroller);
        let autoplay = self.host.every(
            AUTOPLAY_INTERVAL_MS,
            Box::new(move || {
                if let Some(scroller) = weak.upgrade() {
                    scroller.scroll_next();
                }
            }),
        );

        self.current.set(scroller.selected());
        (self.observer)(SlideStatus::of(&scroller));
        tracing::debug!(
            slides = scroller.count(),
            looping = scroller.looping(),
            "carousel bound"
        );
        self.binding = Some(Binding {
            scroller,
            _select: select,
            _autoplay: autoplay,
        });
    }

    /// Swaps the underlying scroller; the old autoplay timer and select
    /// listener are released first.
    pub fn replace_scroller(&mut self, scroller: Rc<SnapScroller>) {
        self.binding = None;
        self.bind(scroller);
    }

    /// Index of the active dot.
    pub fn current(&self) -> usize {
        self.current.get()
    }

    pub fn count(&self) -> usize {
        self.binding.as_ref().map_or(0, |b| b.scroller.count())
    }

    pub fn scroller(&self) -> Option<&Rc<SnapScroller>> {
        self.binding.as_ref().map(|b| &b.scroller)
    }

    pub fn next(&self) {
        if let Some(b) = &self.binding {
            b.scroller.scroll_next();
        }
    }

    pub fn prev(&self) {
        if let Some(b) = &self.binding {
            b.scroller.scroll_prev();
        }
    }

    pub fn go_to(&self, index: usize) {
        if let Some(b) = &self.binding {
            b.scroller.scroll_to(index);
        }
    }

    /// Re-announces the current selection, e.g. after a layout change.
    pub fn refresh(&self) {
        if let Some(b) = &self.binding {
            (self.observer)(SlideStatus::of(&b.scroller));
        }
    }

    pub fn unmount(&mut self) {
        if self.binding.take().is_some() {
            tracing::debug!("carousel unmounted");
        }
    }
}

impl Drop for ProjectsCarousel {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slides_per_view_breakpoints() {
        assert_eq!(slides_per_view(375.0), 1);
        assert_eq!(slides_per_view(768.0), 2);
        assert_eq!(slides_per_view(1023.0), 2);
        assert_eq!(slides_per_view(1024.0), 3);
    }

    #[test]
    fn looping_wraps_both_ends() {
        let ledger = ListenerLedger::new();
        let s = SnapScroller::new(6, true, &ledger);
        s.scroll_prev();
        assert_eq!(s.selected(), 5);
        s.scroll_next();
        assert_eq!(s.selected(), 0);
        s.scroll_to(13);
        assert_eq!(s.selected(), 1);
    }

    #[test]
    fn clamped_without_loop() {
        let ledger = ListenerLedger::new();
        let s = SnapScroller::new(3, false, &ledger);
        assert!(!s.can_scroll_prev());
        s.scroll_prev();
        assert_eq!(s.selected(), 0);
        s.scroll_to(10);
        assert_eq!(s.selected(), 2);
        assert!(!s.can_scroll_next());
        assert!(s.can_scroll_prev());
    }

    #[test]
    fn select_fires_only_on_change() {
        let ledger = ListenerLedger::new();
        let s = SnapScroller::new(4, true, &ledger);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let sub = s.on_select(move |i| log.borrow_mut().push(i));
        s.scroll_to(0);
        s.scroll_next();
        s.scroll_to(3);
        assert_eq!(*seen.borrow(), vec![1, 3]);
        drop(sub);
        assert_eq!(s.listener_count(), 0);
        assert_eq!(ledger.live(), 0);
    }

    #[test]
    fn status_reports_both_edges_without_loop() {
        let ledger = ListenerLedger::new();
        let s = SnapScroller::new(3, false, &ledger);
        let first = SlideStatus::of(&s);
        assert_eq!((first.index, first.can_prev, first.can_next), (0, false, true));
        s.scroll_to(2);
        let last = SlideStatus::of(&s);
        assert_eq!((last.index, last.can_prev, last.can_next), (2, true, false));
    }

    #[test]
    fn single_item_never_moves() {
        let ledger = ListenerLedger::new();
        let s = SnapScroller::new(1, true, &ledger);
        assert!(!s.can_scroll_next());
        s.scroll_next();
        s.scroll_prev();
        assert_eq!(s.selected(), 0);
    }
}
