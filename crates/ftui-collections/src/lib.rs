#![forbid(unsafe_code)]

//! Collections: ordered lists with change notification, and object pools.
//!
//! # Role in FrankenTUI
//! `ftui-collections` holds the data-side building blocks that widgets bind
//! to: a bounds-checked ordered [`Collection`], an [`ObservableCollection`]
//! that reports every mutation as a [`ListChange`] diff, and a recycling
//! [`Pool`] for short-lived objects that are costly to build.
//!
//! # Primary responsibilities
//! - **Collection**: index-addressed mutation with validation before any
//!   state change; every mutation returns what it removed.
//! - **ObservableCollection**: wraps a `Collection` and triggers a
//!   [`ListChange`] on its `changed` [`Event`](ftui_reactive::Event) after
//!   each non-trivial mutation.
//! - **ListChange**: `(action, index, removed, added)` value object.
//! - **Pool**: LIFO free list in front of a fixed constructor.
//!
//! # How it fits in the system
//! Notification delivery comes from `ftui-reactive`; this crate only decides
//! *what* to publish and *when*. Everything is single-threaded and
//! synchronous: listeners run before the mutating call returns.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use ftui_collections::prelude::*;
//!
//! let mut list = ObservableCollection::from(vec!['a', 'b']);
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&log);
//! list.changed().subscribe(move |_, change: &ListChange<char>| {
//!     sink.borrow_mut().push((change.action(), change.index()));
//! });
//!
//! list.set(0, 'x').unwrap();
//! list.remove_range(1, 1).unwrap();
//! assert_eq!(list.to_vec(), vec!['x']);
//! assert_eq!(
//!     *log.borrow(),
//!     vec![(ChangeAction::Replace, 0), (ChangeAction::Remove, 1)]
//! );
//! ```

pub mod change;
pub mod collection;
pub mod error;
pub mod observable;
pub mod pool;
pub mod traits;

pub use change::{ChangeAction, ListChange};
pub use collection::Collection;
pub use error::{CollectionError, CollectionResult};
pub use observable::ObservableCollection;
pub use pool::{Pool, PoolConfig};
pub use traits::{ObservableOrderedCollection, OrderedCollection, Recycler};

pub use ftui_reactive::{Event, ListenerId, Subscription};

/// Prelude for convenient imports of the collection types and the traits
/// their operations live on.
pub mod prelude {
    pub use crate::change::{ChangeAction, ListChange};
    pub use crate::collection::Collection;
    pub use crate::error::{CollectionError, CollectionResult};
    pub use crate::observable::ObservableCollection;
    pub use crate::pool::{Pool, PoolConfig};
    pub use crate::traits::{ObservableOrderedCollection, OrderedCollection, Recycler};
    pub use ftui_reactive::{Event, ListenerId, Subscription};
}
