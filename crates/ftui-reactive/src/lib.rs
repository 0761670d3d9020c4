#![forbid(unsafe_code)]

//! Synchronous event channels for FrankenTUI.
//!
//! This crate provides the publish/subscribe primitive used by the
//! observable collections in `ftui-collections`:
//!
//! - [`Event`]: an ordered listener registry with synchronous dispatch.
//! - [`ListenerId`]: token returned by [`Event::subscribe`], used to
//!   unsubscribe.
//! - [`Subscription`]: RAII guard that unsubscribes on drop.
//!
//! # Architecture
//!
//! `Event<S, P>` keeps its listeners in `Rc<RefCell<..>>` for single-threaded
//! shared ownership. Each dispatch clones the listener list before calling
//! anything, so listeners are free to subscribe or unsubscribe while a
//! dispatch is running.
//!
//! # Invariants
//!
//! 1. Listeners are invoked in registration order.
//! 2. `trigger` returns only after every listener in its snapshot has run.
//! 3. Registry changes made during a dispatch take effect on the next
//!    `trigger`, never the current one.
//! 4. A [`ListenerId`] is never reused by the same event.

pub mod event;

pub use event::{Event, ListenerId, Subscription};
