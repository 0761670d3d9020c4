#![forbid(unsafe_code)]

//! Ordered collection that publishes a diff after every mutation.
//!
//! # Design
//!
//! [`ObservableCollection<T>`] owns a [`Collection<T>`] and an
//! [`Event`] named `changed`. Each mutation runs the inner collection's
//! operation first; only if that succeeds and altered at least one element
//! is a [`ListChange`] built and triggered, with the collection as sender.
//! The removed items travel inside the change and are handed back to the
//! caller afterwards, so only the added side is cloned.
//!
//! | Operation             | index        | removed      | added   |
//! |-----------------------|--------------|--------------|---------|
//! | `add`, `add_range`    | previous len | –            | items   |
//! | `insert*`             | index        | –            | items   |
//! | `remove`, `remove_at` | index        | [item]       | –       |
//! | `remove_range`        | index        | removed      | –       |
//! | `clear`               | 0            | previous     | –       |
//! | `set`                 | index        | [previous]   | [item]  |
//! | `replace_range`       | index        | removed      | items   |
//! | `set_items`           | 0            | previous     | items   |
//!
//! # Failure Modes
//!
//! - **Out-of-bounds argument**: the error is returned before any mutation
//!   and no change is published.
//! - **Re-entrant mutation**: listeners receive `&ObservableCollection<T>`,
//!   a shared borrow, so they cannot mutate the sender through it. When the
//!   collection is shared as `Rc<RefCell<..>>`, a listener that calls
//!   `borrow_mut()` on it panics (RefCell borrow rules). Nested mutation from
//!   inside a notification is rejected rather than interleaved.
//! - **Listener registry changes mid-dispatch**: see [`Event`]; they apply
//!   from the next change on.

use std::fmt;

use ftui_reactive::Event;

#[cfg(feature = "tracing")]
use tracing::trace;

use crate::change::ListChange;
use crate::collection::Collection;
use crate::error::CollectionResult;
use crate::traits::{ObservableOrderedCollection, OrderedCollection};

/// An ordered collection with synchronous change notification.
///
/// # Invariants
///
/// 1. A change is published iff the mutation succeeded and removed or added
///    at least one item.
/// 2. Listeners observe the collection in its post-mutation state.
/// 3. Exactly one change is published per mutating call.
pub struct ObservableCollection<T> {
    inner: Collection<T>,
    changed: Event<ObservableCollection<T>, ListChange<T>>,
}

impl<T: fmt::Debug> fmt::Debug for ObservableCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableCollection")
            .field("items", &self.inner)
            .field("changed", &self.changed)
            .finish()
    }
}

impl<T: Clone + 'static> Default for ObservableCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> From<Vec<T>> for ObservableCollection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_collection(Collection::from(items))
    }
}

impl<T: Clone + 'static> ObservableCollection<T> {
    /// Create an empty collection with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::from_collection(Collection::new())
    }

    /// Create a collection holding a copy of `items`.
    #[must_use]
    pub fn from_slice(items: &[T]) -> Self {
        Self::from_collection(Collection::from_slice(items))
    }

    /// Wrap an existing collection. Its current contents are not published.
    #[must_use]
    pub fn from_collection(inner: Collection<T>) -> Self {
        Self {
            inner,
            changed: Event::new(),
        }
    }

    /// Read-only view of the wrapped collection.
    #[must_use]
    pub fn as_collection(&self) -> &Collection<T> {
        &self.inner
    }

    /// Drop the channel (and every listener) and return the plain collection.
    #[must_use]
    pub fn into_inner(self) -> Collection<T> {
        self.inner
    }

    /// Trigger a change for a completed mutation and hand the removed items
    /// back. Empty diffs publish nothing.
    fn publish(&self, index: usize, removed: Vec<T>, added: Vec<T>) -> Vec<T> {
        let Some(change) = ListChange::new(index, removed, added) else {
            return Vec::new();
        };

        #[cfg(feature = "tracing")]
        trace!(
            action = change.action().as_str(),
            index,
            removed = change.removed().len(),
            added = change.added().len(),
            listeners = self.changed.listener_count(),
            "collection: changed"
        );

        self.changed.trigger(self, &change);
        let (_, _, removed, _) = change.into_parts();
        removed
    }
}

impl<T: Clone + 'static> OrderedCollection<T> for ObservableCollection<T> {
    fn as_slice(&self) -> &[T] {
        self.inner.as_slice()
    }

    fn add(&mut self, item: T) {
        let index = self.inner.count();
        self.inner.add(item.clone());
        self.publish(index, Vec::new(), vec![item]);
    }

    fn add_range(&mut self, items: Vec<T>) {
        if items.is_empty() {
            return;
        }
        let index = self.inner.count();
        self.inner.add_range(items.clone());
        self.publish(index, Vec::new(), items);
    }

    fn insert(&mut self, index: usize, item: T) -> CollectionResult<()> {
        self.inner.insert(index, item.clone())?;
        self.publish(index, Vec::new(), vec![item]);
        Ok(())
    }

    fn insert_range(&mut self, index: usize, items: Vec<T>) -> CollectionResult<()> {
        self.inner.insert_range(index, items.clone())?;
        self.publish(index, Vec::new(), items);
        Ok(())
    }

    fn remove(&mut self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        let (index, removed) = self.inner.remove_first(item)?;
        self.publish(index, vec![removed], Vec::new());
        Some(index)
    }

    fn remove_at(&mut self, index: usize) -> CollectionResult<Vec<T>> {
        let removed = self.inner.remove_at(index)?;
        Ok(self.publish(index, removed, Vec::new()))
    }

    fn remove_range(&mut self, index: usize, count: usize) -> CollectionResult<Vec<T>> {
        let removed = self.inner.remove_range(index, count)?;
        Ok(self.publish(index, removed, Vec::new()))
    }

    fn clear(&mut self) -> Vec<T> {
        let removed = self.inner.clear();
        self.publish(0, removed, Vec::new())
    }

    fn set(&mut self, index: usize, item: T) -> CollectionResult<T> {
        let previous = self.inner.set(index, item.clone())?;
        self.publish(index, vec![previous.clone()], vec![item]);
        Ok(previous)
    }

    fn replace_range(
        &mut self,
        index: usize,
        count: usize,
        items: Vec<T>,
    ) -> CollectionResult<Vec<T>> {
        let removed = self.inner.replace_range(index, count, items.clone())?;
        Ok(self.publish(index, removed, items))
    }

    fn set_items(&mut self, items: Vec<T>) -> Vec<T> {
        let previous = self.inner.set_items(items.clone());
        self.publish(0, previous, items)
    }
}

impl<T: Clone + 'static> ObservableOrderedCollection<T> for ObservableCollection<T> {
    fn changed(&self) -> &Event<Self, ListChange<T>> {
        &self.changed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
