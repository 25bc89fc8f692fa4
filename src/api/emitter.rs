use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

type Listener<E> = Box<dyn FnMut(&E)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Registry<E> {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener<E>)>,
    dispatching: bool,
    removed_during_dispatch: Vec<ListenerId>,
    cleared_during_dispatch: bool,
}

impl<E> Registry<E> {
    fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
            dispatching: false,
            removed_during_dispatch: Vec::new(),
            cleared_during_dispatch: false,
        }
    }
}

trait Detach {
    fn detach(&self, id: ListenerId);
}

impl<E> Detach for RefCell<Registry<E>> {
    fn detach(&self, id: ListenerId) {
        let Ok(mut registry) = self.try_borrow_mut() else {
            return;
        };
        // Listeners added during dispatch live in `listeners` and can be dropped directly.
        registry.listeners.retain(|(listener_id, _)| *listener_id != id);
        if registry.dispatching {
            registry.removed_during_dispatch.push(id);
        }
    }
}

/// Typed, single-threaded event channel with RAII subscriptions.
///
/// Listeners run synchronously in registration order. A listener detached
/// while an event is being dispatched is not called again, including for
/// the event in flight; a listener added during dispatch first sees the
/// next event.
pub struct EventEmitter<E> {
    registry: Rc<RefCell<Registry<E>>>,
}

impl<E> Default for EventEmitter<E> {
    fn default() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry::new())),
        }
    }
}

impl<E> EventEmitter<E> {
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

impl<E> fmt::Debug for EventEmitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl<E: 'static> EventEmitter<E> {
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&E) + 'static,
    {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = ListenerId(registry.next_id);
            registry.next_id += 1;
            registry.listeners.push((id, Box::new(listener)));
            id
        };
        let weak: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.registry);
        let registry: Weak<dyn Detach> = weak;
        Subscription {
            id,
            registry: Some(registry),
        }
    }

    pub fn emit(&self, event: &E) {
        let mut listeners = {
            let mut registry = self.registry.borrow_mut();
            registry.dispatching = true;
            std::mem::take(&mut registry.listeners)
        };
        trace!(listeners = listeners.len(), "dispatch event");

        for (id, listener) in &mut listeners {
            let detached = {
                let registry = self.registry.borrow();
                registry.cleared_during_dispatch || registry.removed_during_dispatch.contains(id)
            };
            if !detached {
                listener(event);
            }
        }

        let mut registry = self.registry.borrow_mut();
        registry.dispatching = false;
        let removed = std::mem::take(&mut registry.removed_during_dispatch);
        if std::mem::take(&mut registry.cleared_during_dispatch) {
            listeners.clear();
        }
        listeners.retain(|(id, _)| !removed.contains(id));
        let added = std::mem::take(&mut registry.listeners);
        listeners.extend(added);
        registry.listeners = listeners;
    }

    /// Detaches every listener. Outstanding subscriptions become inert.
    pub fn clear(&self) {
        let mut registry = self.registry.borrow_mut();
        registry.listeners.clear();
        if registry.dispatching {
            registry.cleared_during_dispatch = true;
        }
    }
}

/// Handle to a registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes its listener"]
pub struct Subscription {
    id: ListenerId,
    registry: Option<Weak<dyn Detach>>,
}

impl Subscription {
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Keeps the listener registered for the emitter's whole lifetime.
    pub fn forget(mut self) {
        self.registry = None;
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.take().and_then(|weak| weak.upgrade()) {
            registry.detach(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::EventEmitter;

    #[test]
    fn listeners_run_in_registration_order() {
        let emitter = EventEmitter::<u32>::default();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = {
            let seen = Rc::clone(&seen);
            emitter.subscribe(move |value| seen.borrow_mut().push(("first", *value)))
        };
        let second = {
            let seen = Rc::clone(&seen);
            emitter.subscribe(move |value| seen.borrow_mut().push(("second", *value)))
        };

        emitter.emit(&7);
        assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
        drop((first, second));
    }

    #[test]
    fn dropped_subscription_stops_delivery() {
        let emitter = EventEmitter::<u32>::default();
        let count = Rc::new(RefCell::new(0));
        let subscription = {
            let count = Rc::clone(&count);
            emitter.subscribe(move |_| *count.borrow_mut() += 1)
        };

        emitter.emit(&1);
        subscription.unsubscribe();
        emitter.emit(&2);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(emitter.listener_count(), 0);
    }

    #[test]
    fn listener_detached_during_dispatch_is_skipped() {
        let emitter = EventEmitter::<u32>::default();
        let victim_calls = Rc::new(RefCell::new(0));
        let victim_slot = Rc::new(RefCell::new(None));

        let killer = {
            let victim_slot = Rc::clone(&victim_slot);
            emitter.subscribe(move |_| {
                victim_slot.borrow_mut().take();
            })
        };
        let victim = {
            let victim_calls = Rc::clone(&victim_calls);
            emitter.subscribe(move |_| *victim_calls.borrow_mut() += 1)
        };
        *victim_slot.borrow_mut() = Some(victim);

        emitter.emit(&1);
        emitter.emit(&2);

        assert_eq!(*victim_calls.borrow(), 0);
        assert_eq!(emitter.listener_count(), 1);
        drop(killer);
    }

    #[test]
    fn forgotten_subscription_outlives_its_handle() {
        let emitter = EventEmitter::<u32>::default();
        let count = Rc::new(RefCell::new(0));
        {
            let count = Rc::clone(&count);
            emitter
                .subscribe(move |_| *count.borrow_mut() += 1)
                .forget();
        }
        emitter.emit(&1);
        assert_eq!(*count.borrow(), 1);

        emitter.clear();
        emitter.emit(&2);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn clear_during_dispatch_stops_remaining_listeners() {
        let emitter = Rc::new(EventEmitter::<u32>::default());
        let count = Rc::new(RefCell::new(0));

        {
            let weak = Rc::downgrade(&emitter);
            let count = Rc::clone(&count);
            emitter
                .subscribe(move |_| {
                    *count.borrow_mut() += 1;
                    if let Some(emitter) = weak.upgrade() {
                        emitter.clear();
                    }
                })
                .forget();
        }
        {
            let count = Rc::clone(&count);
            emitter
                .subscribe(move |_| *count.borrow_mut() += 10)
                .forget();
        }

        emitter.emit(&1);
        emitter.emit(&2);
        assert_eq!(*count.borrow(), 1);
        assert_eq!(emitter.listener_count(), 0);
    }

    #[test]
    fn debug_reports_listener_count() {
        let emitter = EventEmitter::<u32>::default();
        let subscription = emitter.subscribe(|_| {});
        assert_eq!(
            format!("{emitter:?}"),
            "EventEmitter { listeners: 1 }"
        );
        drop(subscription);
        assert_eq!(format!("{emitter:?}"), "EventEmitter { listeners: 0 }");
    }
}
