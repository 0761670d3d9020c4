#![forbid(unsafe_code)]

//! Bounds-checked ordered collection.
//!
//! # Design
//!
//! [`Collection<T>`] is a thin owner of a `Vec<T>` that routes every
//! mutation through the index rules of [`OrderedCollection`]. Validation
//! always happens before the vector is touched, so an `Err` guarantees the
//! contents are unchanged.
//!
//! # Performance
//!
//! | Operation            | Complexity          |
//! |----------------------|---------------------|
//! | `add()`              | O(1) amortized      |
//! | `insert*()`          | O(n + k)            |
//! | `remove_at()`        | O(n)                |
//! | `remove_range()`     | O(n)                |
//! | `set()`              | O(1)                |
//! | `clear()`, `set_items()` | O(1), returns the old buffer |
//!
//! No-op mutations (`remove_range(i, 0)`, `clear()` on an empty collection,
//! ...) return a fresh empty `Vec`, which does not allocate.

use std::mem;

use crate::error::{CollectionResult, ensure_index, ensure_insert, ensure_range};
use crate::traits::OrderedCollection;

/// A resizable ordered sequence with bounds-checked mutation.
///
/// Mutations live on the [`OrderedCollection`] trait; bring it into scope
/// (or use [`crate::prelude`]) to call them.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Collection<T> {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create an empty collection with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Iterate over the items in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Remove the first item equal to `item`, returning its position and
    /// the element actually removed.
    pub(crate) fn remove_first(&mut self, item: &T) -> Option<(usize, T)>
    where
        T: PartialEq,
    {
        let index = self.items.iter().position(|x| x == item)?;
        Some((index, self.items.remove(index)))
    }

    /// Consume the collection and return its items.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Clone> Collection<T> {
    /// Create a collection holding a copy of `items`.
    #[must_use]
    pub fn from_slice(items: &[T]) -> Self {
        Self {
            items: items.to_vec(),
        }
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> OrderedCollection<T> for Collection<T> {
    fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn add(&mut self, item: T) {
        self.items.push(item);
    }

    fn add_range(&mut self, items: Vec<T>) {
        if !items.is_empty() {
            self.items.extend(items);
        }
    }

    fn insert(&mut self, index: usize, item: T) -> CollectionResult<()> {
        ensure_insert(index, self.items.len())?;
        self.items.insert(index, item);
        Ok(())
    }

    fn insert_range(&mut self, index: usize, items: Vec<T>) -> CollectionResult<()> {
        ensure_insert(index, self.items.len())?;
        if !items.is_empty() {
            self.items.splice(index..index, items);
        }
        Ok(())
    }

    fn remove(&mut self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.remove_first(item).map(|(index, _)| index)
    }

    fn remove_at(&mut self, index: usize) -> CollectionResult<Vec<T>> {
        ensure_index(index, self.items.len())?;
        Ok(vec![self.items.remove(index)])
    }

    fn remove_range(&mut self, index: usize, count: usize) -> CollectionResult<Vec<T>> {
        ensure_range(index, count, self.items.len())?;
        if count == 0 {
            return Ok(Vec::new());
        }
        Ok(self.items.drain(index..index + count).collect())
    }

    fn clear(&mut self) -> Vec<T> {
        mem::take(&mut self.items)
    }

    fn set(&mut self, index: usize, item: T) -> CollectionResult<T> {
        ensure_index(index, self.items.len())?;
        Ok(mem::replace(&mut self.items[index], item))
    }

    fn replace_range(
        &mut self,
        index: usize,
        count: usize,
        items: Vec<T>,
    ) -> CollectionResult<Vec<T>> {
        ensure_range(index, count, self.items.len())?;
        if count == 0 && items.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.items.splice(index..index + count, items).collect())
    }

    fn set_items(&mut self, items: Vec<T>) -> Vec<T> {
        if self.items.is_empty() && items.is_empty() {
            return Vec::new();
        }
        mem::replace(&mut self.items, items)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
