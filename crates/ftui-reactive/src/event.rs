#![forbid(unsafe_code)]

//! Event channel with ordered, synchronous listener dispatch.
//!
//! # Design
//!
//! [`Event<S, P>`] stores listeners of type `Fn(&S, &P)` together with the
//! [`ListenerId`] handed out at registration. [`Event::trigger`] calls every
//! listener with the sender and payload on the caller's thread.
//!
//! # Performance
//!
//! | Operation       | Complexity                   |
//! |-----------------|------------------------------|
//! | `subscribe()`   | O(1) amortized               |
//! | `unsubscribe()` | O(L) where L = listeners     |
//! | `trigger()`     | O(L), one snapshot allocation |
//!
//! # Failure Modes
//!
//! - **Listener mutates the registry mid-dispatch**: allowed. Dispatch works
//!   on a snapshot taken when `trigger` starts, so a listener added during
//!   dispatch is first called on the next trigger, and a listener removed
//!   during dispatch still runs if it had not run yet.
//! - **Listener panics**: the panic propagates to the caller of `trigger`;
//!   later listeners in the snapshot do not run. The registry itself is not
//!   borrowed during listener calls, so the event remains usable.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

#[cfg(feature = "tracing")]
use tracing::trace;

type Listener<S, P> = Rc<dyn Fn(&S, &P)>;

/// Token identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Raw numeric value, unique per event.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// Shared interior for [`Event<S, P>`].
struct Registry<S: ?Sized, P: ?Sized> {
    next_id: u64,
    /// Registration order is dispatch order.
    listeners: Vec<(ListenerId, Listener<S, P>)>,
}

impl<S: ?Sized, P: ?Sized> Registry<S, P> {
    fn remove(&mut self, id: ListenerId) -> bool {
        match self.listeners.iter().position(|(lid, _)| *lid == id) {
            Some(pos) => {
                self.listeners.remove(pos);
                true
            }
            None => false,
        }
    }
}

/// A synchronous notification channel.
///
/// `S` is the sender type passed to listeners alongside the payload `P`.
/// Owners typically embed an `Event` in the struct that triggers it and pass
/// `self` as the sender.
///
/// # Invariants
///
/// 1. Listeners run in registration order.
/// 2. Ids are allocated monotonically and never reused.
/// 3. The registry is never borrowed while a listener runs.
pub struct Event<S: ?Sized, P: ?Sized> {
    registry: Rc<RefCell<Registry<S, P>>>,
}

impl<S: ?Sized, P: ?Sized> fmt::Debug for Event<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        f.debug_struct("Event")
            .field("listener_count", &registry.listeners.len())
            .field("next_id", &registry.next_id)
            .finish()
    }
}

impl<S: ?Sized + 'static, P: ?Sized + 'static> Default for Event<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized + 'static, P: ?Sized + 'static> Event<S, P> {
    /// Create an event with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Register a listener. Returns the token needed to remove it again.
    pub fn subscribe(&self, listener: impl Fn(&S, &P) + 'static) -> ListenerId {
        let mut registry = self.registry.borrow_mut();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.push((id, Rc::new(listener)));
        id
    }

    /// Register a listener whose lifetime is tied to the returned guard.
    ///
    /// Dropping the [`Subscription`] unsubscribes the listener. The guard
    /// only holds a weak reference, so it may outlive the event.
    pub fn subscribe_guarded(&self, listener: impl Fn(&S, &P) + 'static) -> Subscription {
        let id = self.subscribe(listener);
        let weak: Weak<RefCell<Registry<S, P>>> = Rc::downgrade(&self.registry);
        Subscription {
            id,
            detach: Some(Box::new(move |id: ListenerId| {
                if let Some(registry) = weak.upgrade() {
                    registry.borrow_mut().remove(id);
                }
            })),
        }
    }

    /// Remove a listener. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.registry.borrow_mut().remove(id)
    }

    /// Call every registered listener with `(sender, payload)`, in
    /// registration order, and return once all of them have run.
    pub fn trigger(&self, sender: &S, payload: &P) {
        // Snapshot first so listeners can touch the registry.
        let listeners: Vec<Listener<S, P>> = {
            let registry = self.registry.borrow();
            if registry.listeners.is_empty() {
                return;
            }
            registry
                .listeners
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect()
        };

        #[cfg(feature = "tracing")]
        trace!(listeners = listeners.len(), "event: trigger");

        for listener in &listeners {
            listener(sender, payload);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// `true` if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.borrow().listeners.is_empty()
    }

    /// Whether `id` is currently registered.
    #[must_use]
    pub fn is_subscribed(&self, id: ListenerId) -> bool {
        self.registry
            .borrow()
            .listeners
            .iter()
            .any(|(lid, _)| *lid == id)
    }

    /// Remove every listener. Ids already handed out stay retired.
    pub fn clear(&self) {
        self.registry.borrow_mut().listeners.clear();
    }
}

/// RAII guard for a listener registered with [`Event::subscribe_guarded`].
pub struct Subscription {
    id: ListenerId,
    /// Type-erased removal hook holding a weak reference to the registry.
    detach: Option<Box<dyn FnOnce(ListenerId)>>,
}

impl Subscription {
    /// Token of the guarded listener.
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Disarm the guard and keep the listener registered.
    ///
    /// The returned id can still be passed to [`Event::unsubscribe`].
    pub fn forget(mut self) -> ListenerId {
        self.detach = None;
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("armed", &self.detach.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
