#![forbid(unsafe_code)]

//! Operation sets shared by the collection types.
//!
//! [`OrderedCollection`] declares the full mutation and query surface. Only
//! the mutations and [`as_slice`](OrderedCollection::as_slice) are required;
//! every query is a provided method over the slice, so [`Collection`] and
//! [`ObservableCollection`] answer queries identically.
//!
//! Index arguments follow one rule set:
//!
//! | Access            | Valid when             |
//! |-------------------|------------------------|
//! | read / update     | `index < len`          |
//! | insertion point   | `index <= len`         |
//! | range             | `index + count <= len` |
//!
//! A violation returns [`CollectionError::IndexOutOfBounds`] and leaves the
//! collection untouched.
//!
//! [`Collection`]: crate::Collection
//! [`ObservableCollection`]: crate::ObservableCollection
//! [`CollectionError::IndexOutOfBounds`]: crate::CollectionError::IndexOutOfBounds

use ftui_reactive::Event;

use crate::change::ListChange;
use crate::error::{CollectionResult, ensure_index, ensure_range};

/// An ordered, index-addressable, mutable sequence.
///
/// Every mutation returns exactly what it took out, so a wrapper can derive
/// the diff without re-reading the collection.
pub trait OrderedCollection<T> {
    /// Current contents in order.
    fn as_slice(&self) -> &[T];

    /// Append one item.
    fn add(&mut self, item: T);

    /// Append all `items`. Empty input is a no-op.
    fn add_range(&mut self, items: Vec<T>);

    /// Insert `item` before position `index` (`index <= len`).
    fn insert(&mut self, index: usize, item: T) -> CollectionResult<()>;

    /// Insert `items` before position `index` (`index <= len`).
    ///
    /// The index is validated even when `items` is empty.
    fn insert_range(&mut self, index: usize, items: Vec<T>) -> CollectionResult<()>;

    /// Remove the first item equal to `item`.
    ///
    /// Returns the position it was removed from, or `None` if absent.
    fn remove(&mut self, item: &T) -> Option<usize>
    where
        T: PartialEq;

    /// Remove the item at `index`, returned as a one-element `Vec`.
    fn remove_at(&mut self, index: usize) -> CollectionResult<Vec<T>>;

    /// Remove `count` items starting at `index`.
    ///
    /// `count == 0` (with a valid index) removes nothing and returns an
    /// empty `Vec`.
    fn remove_range(&mut self, index: usize, count: usize) -> CollectionResult<Vec<T>>;

    /// Remove everything, returning the previous contents.
    fn clear(&mut self) -> Vec<T>;

    /// Overwrite the item at `index`, returning the previous value.
    fn set(&mut self, index: usize, item: T) -> CollectionResult<T>;

    /// Replace `count` items at `index` with `items`, returning the removed
    /// ones. A no-op only when `count == 0` and `items` is empty.
    fn replace_range(
        &mut self,
        index: usize,
        count: usize,
        items: Vec<T>,
    ) -> CollectionResult<Vec<T>>;

    /// Replace the entire contents, returning the previous contents.
    fn set_items(&mut self, items: Vec<T>) -> Vec<T>;

    // -- Queries -------------------------------------------------------------

    #[must_use]
    fn count(&self) -> usize {
        self.as_slice().len()
    }

    #[must_use]
    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    #[must_use]
    fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(item).is_some()
    }

    /// Position of the first item equal to `item`.
    #[must_use]
    fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.as_slice().iter().position(|x| x == item)
    }

    /// Position of the last item equal to `item`.
    #[must_use]
    fn last_index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.as_slice().iter().rposition(|x| x == item)
    }

    /// Item at `index` (`index < len`).
    fn get(&self, index: usize) -> CollectionResult<&T> {
        let items = self.as_slice();
        ensure_index(index, items.len())?;
        Ok(&items[index])
    }

    /// `count` items starting at `index` (`index + count <= len`).
    fn get_range(&self, index: usize, count: usize) -> CollectionResult<&[T]> {
        let items = self.as_slice();
        ensure_range(index, count, items.len())?;
        Ok(&items[index..index + count])
    }

    /// Copy of the contents.
    #[must_use]
    fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.as_slice().to_vec()
    }

    #[must_use]
    fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    #[must_use]
    fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Call `f` on every item in index order.
    fn each(&self, f: impl FnMut(&T))
    where
        Self: Sized,
    {
        self.as_slice().iter().for_each(f);
    }

    /// `true` if `predicate` holds for every item. Stops at the first miss.
    fn every(&self, predicate: impl FnMut(&T) -> bool) -> bool
    where
        Self: Sized,
    {
        self.as_slice().iter().all(predicate)
    }

    /// First item matching `predicate`.
    fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<&T>
    where
        Self: Sized,
    {
        self.as_slice().iter().find(|item| predicate(item))
    }

    /// Transform every item in index order.
    fn map<U>(&self, f: impl FnMut(&T) -> U) -> Vec<U>
    where
        Self: Sized,
    {
        self.as_slice().iter().map(f).collect()
    }
}

/// An [`OrderedCollection`] that publishes a [`ListChange`] after every
/// mutation that altered at least one element.
pub trait ObservableOrderedCollection<T>: OrderedCollection<T> + Sized {
    /// Channel the change records are triggered on, with the collection
    /// itself as sender.
    fn changed(&self) -> &Event<Self, ListChange<T>>;
}

/// An allocator that hands out recycled instances before building new ones.
pub trait Recycler<T> {
    /// Take an instance: the most recently released one if any, otherwise a
    /// freshly constructed one.
    fn acquire(&mut self) -> T;

    /// Return an instance for later reuse.
    fn release(&mut self, item: T);
}
