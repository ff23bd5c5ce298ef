//! Multicast pointer event hub.
//!
//! Hosts register their platform listeners once and forward every event
//! here; gestures subscribe for as long as they need input. A listener that
//! returns [`Flow::Complete`] is dropped after the current event, and
//! dropping it is the gesture's cleanup hook.

use crate::pointer::PointerEvent;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Complete,
}

type Listener = Box<dyn FnMut(&PointerEvent) -> Flow>;
type Listeners = SmallVec<[(SubscriptionId, Listener); 4]>;

#[derive(Default)]
struct Hub {
    listeners: RefCell<Listeners>,
    // Unsubscribed while their listener was out for delivery
    cancelled: RefCell<SmallVec<[SubscriptionId; 4]>>,
    queue: RefCell<VecDeque<PointerEvent>>,
    dispatching: Cell<bool>,
    next_id: Cell<u64>,
}

/// Cheap-to-clone handle; clones share one set of subscribers.
#[derive(Clone, Default)]
pub struct PointerDispatcher {
    hub: Rc<Hub>,
}

impl fmt::Debug for PointerDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerDispatcher")
            .field("subscribers", &self.subscriber_count())
            .field("dispatching", &self.hub.dispatching.get())
            .finish()
    }
}

impl PointerDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It sees every event dispatched after this call
    /// until it completes or is unsubscribed.
    pub fn subscribe(
        &self,
        listener: impl FnMut(&PointerEvent) -> Flow + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.hub.next_id.get());
        self.hub.next_id.set(id.0 + 1);
        self.hub
            .listeners
            .borrow_mut()
            .push((id, Box::new(listener)));
        log::debug!("[dispatch] subscribed {:?}", id);
        id
    }

    /// Remove a listener. Unknown or already completed ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let removed = {
            let mut listeners = self.hub.listeners.borrow_mut();
            listeners
                .iter()
                .position(|(candidate, _)| *candidate == id)
                .map(|index| listeners.remove(index))
        };
        match removed {
            // Dropped here, outside the borrow, so cleanup may re-enter
            Some(entry) => {
                log::debug!("[dispatch] unsubscribed {:?}", id);
                drop(entry);
            }
            None if self.hub.dispatching.get() => self.hub.cancelled.borrow_mut().push(id),
            None => {}
        }
    }

    /// Deliver `event` to every subscriber. Events dispatched from inside a
    /// listener or a cleanup are queued and delivered in order afterwards.
    pub fn dispatch(&self, event: PointerEvent) {
        self.hub.queue.borrow_mut().push_back(event);
        if self.hub.dispatching.replace(true) {
            return;
        }
        loop {
            let next = self.hub.queue.borrow_mut().pop_front();
            let Some(event) = next else { break };
            self.deliver(&event);
        }
        self.hub.dispatching.set(false);
    }

    /// Live subscribers. Only meaningful outside of a dispatch.
    pub fn subscriber_count(&self) -> usize {
        self.hub.listeners.borrow().len()
    }

    fn deliver(&self, event: &PointerEvent) {
        let mut active = std::mem::take(&mut *self.hub.listeners.borrow_mut());
        let mut finished: SmallVec<[SubscriptionId; 4]> = SmallVec::new();

        for (id, listener) in active.iter_mut() {
            if self.hub.cancelled.borrow().contains(id) {
                continue;
            }
            if listener(event) == Flow::Complete {
                finished.push(*id);
            }
        }

        let cancelled = std::mem::take(&mut *self.hub.cancelled.borrow_mut());
        let (kept, done): (Listeners, Listeners) = active
            .into_iter()
            .partition(|(id, _)| !finished.contains(id) && !cancelled.contains(id));

        {
            let mut listeners = self.hub.listeners.borrow_mut();
            let added = std::mem::take(&mut *listeners);
            *listeners = kept;
            listeners.extend(added);
        }

        if !done.is_empty() {
            log::debug!("[dispatch] {} subscriber(s) finished", done.len());
        }
        drop(done);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::{PointerMove, ReleaseKind};
    use instant::Instant;

    fn mv(x: f64) -> PointerEvent {
        PointerEvent::Move(PointerMove::mouse(x, 0.0, Instant::now()))
    }

    fn release() -> PointerEvent {
        PointerEvent::Release(ReleaseKind::MouseUp)
    }

    struct OnDrop(Rc<Cell<u32>>);

    impl Drop for OnDrop {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn recorder(log: &Rc<RefCell<Vec<f64>>>) -> impl FnMut(&PointerEvent) -> Flow + 'static {
        let log = log.clone();
        move |ev| {
            match ev {
                PointerEvent::Move(m) => log.borrow_mut().push(m.client_x()),
                PointerEvent::Release(_) => log.borrow_mut().push(-1.0),
            }
            Flow::Continue
        }
    }

    #[test]
    fn every_subscriber_sees_every_event() {
        let pointer = PointerDispatcher::new();
        let a = Rc::new(RefCell::new(Vec::new()));
        let b = Rc::new(RefCell::new(Vec::new()));
        pointer.subscribe(recorder(&a));
        pointer.subscribe(recorder(&b));

        pointer.dispatch(mv(1.0));
        pointer.dispatch(mv(2.0));

        assert_eq!(*a.borrow(), vec![1.0, 2.0]);
        assert_eq!(*b.borrow(), vec![1.0, 2.0]);
    }

    #[test]
    fn completing_drops_the_listener_once() {
        let pointer = PointerDispatcher::new();
        let drops = Rc::new(Cell::new(0));
        let guard = OnDrop(drops.clone());
        pointer.subscribe(move |ev| {
            let _ = &guard;
            if ev.is_release() {
                Flow::Complete
            } else {
                Flow::Continue
            }
        });

        pointer.dispatch(mv(1.0));
        assert_eq!(drops.get(), 0);
        pointer.dispatch(release());
        assert_eq!(drops.get(), 1);
        assert_eq!(pointer.subscriber_count(), 0);
        pointer.dispatch(release());
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn unsubscribe_runs_cleanup_immediately() {
        let pointer = PointerDispatcher::new();
        let drops = Rc::new(Cell::new(0));
        let guard = OnDrop(drops.clone());
        let id = pointer.subscribe(move |_| {
            let _ = &guard;
            Flow::Continue
        });
        pointer.unsubscribe(id);
        assert_eq!(drops.get(), 1);
        pointer.unsubscribe(id);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn unsubscribing_a_peer_during_dispatch_skips_it() {
        let pointer = PointerDispatcher::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let victim: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));

        let p = pointer.clone();
        let v = victim.clone();
        pointer.subscribe(move |_| {
            if let Some(id) = v.take() {
                p.unsubscribe(id);
            }
            Flow::Continue
        });
        victim.set(Some(pointer.subscribe(recorder(&seen))));

        pointer.dispatch(mv(3.0));
        pointer.dispatch(mv(4.0));

        assert!(seen.borrow().is_empty());
        assert_eq!(pointer.subscriber_count(), 1);
    }

    #[test]
    fn late_subscribers_wait_for_the_next_event() {
        let pointer = PointerDispatcher::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let p = pointer.clone();
        let s = seen.clone();
        let mut armed = true;
        pointer.subscribe(move |_| {
            if armed {
                armed = false;
                p.subscribe(recorder(&s));
            }
            Flow::Continue
        });

        pointer.dispatch(mv(5.0));
        assert!(seen.borrow().is_empty());
        pointer.dispatch(mv(6.0));
        assert_eq!(*seen.borrow(), vec![6.0]);
    }

    #[test]
    fn nested_dispatch_is_queued_in_order() {
        let pointer = PointerDispatcher::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let p = pointer.clone();
        pointer.subscribe(move |ev| {
            if let PointerEvent::Move(m) = ev {
                if m.client_x() == 1.0 {
                    p.dispatch(release());
                }
            }
            Flow::Continue
        });
        pointer.subscribe(recorder(&seen));

        pointer.dispatch(mv(1.0));
        assert_eq!(*seen.borrow(), vec![1.0, -1.0]);
    }
}
