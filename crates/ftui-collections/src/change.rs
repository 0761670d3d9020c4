#![forbid(unsafe_code)]

//! Change records describing one collection mutation as a diff.
//!
//! A [`ListChange`] says: at `index`, the items in `removed` were taken out
//! and the items in `added` were put in their place. The [`ChangeAction`] is
//! derived from which sides are non-empty:
//!
//! | removed   | added     | action    |
//! |-----------|-----------|-----------|
//! | non-empty | non-empty | `Replace` |
//! | non-empty | empty     | `Remove`  |
//! | empty     | non-empty | `Add`     |
//! | empty     | empty     | no record |

use crate::error::{CollectionResult, ensure_range};

/// Kind of mutation a [`ListChange`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeAction {
    Add,
    Remove,
    Replace,
}

impl ChangeAction {
    /// Classify a diff from the number of removed and added items.
    ///
    /// Returns `None` for an empty diff.
    #[must_use]
    pub const fn classify(removed: usize, added: usize) -> Option<Self> {
        match (removed > 0, added > 0) {
            (true, true) => Some(Self::Replace),
            (true, false) => Some(Self::Remove),
            (false, true) => Some(Self::Add),
            (false, false) => None,
        }
    }

    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Replace => "replace",
        }
    }
}

/// An immutable description of one mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListChange<T> {
    action: ChangeAction,
    index: usize,
    removed: Vec<T>,
    added: Vec<T>,
}

impl<T> ListChange<T> {
    /// Build a change record, classifying the action from the two sides.
    ///
    /// Returns `None` when both `removed` and `added` are empty.
    #[must_use]
    pub fn new(index: usize, removed: Vec<T>, added: Vec<T>) -> Option<Self> {
        let action = ChangeAction::classify(removed.len(), added.len())?;
        Some(Self {
            action,
            index,
            removed,
            added,
        })
    }

    #[must_use]
    pub fn action(&self) -> ChangeAction {
        self.action
    }

    /// Position of the first affected element, at the time of the change.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Items taken out, in their former order.
    #[must_use]
    pub fn removed(&self) -> &[T] {
        &self.removed
    }

    /// Items put in, in their new order.
    #[must_use]
    pub fn added(&self) -> &[T] {
        &self.added
    }

    /// Decompose into `(action, index, removed, added)`.
    #[must_use]
    pub fn into_parts(self) -> (ChangeAction, usize, Vec<T>, Vec<T>) {
        (self.action, self.index, self.removed, self.added)
    }

    /// Convert the items on both sides, keeping action and index.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> ListChange<U> {
        ListChange {
            action: self.action,
            index: self.index,
            removed: self.removed.into_iter().map(&mut f).collect(),
            added: self.added.into_iter().map(&mut f).collect(),
        }
    }
}

impl<T: Clone> ListChange<T> {
    /// Replay this change on `target`: replace `removed().len()` items at
    /// `index()` with a copy of `added()`.
    ///
    /// Applying every change a collection emits, in order, to a mirror that
    /// started with the same contents keeps the mirror in sync.
    ///
    /// # Errors
    ///
    /// Returns [`IndexOutOfBounds`](crate::CollectionError::IndexOutOfBounds) if the removed range
    /// does not fit in `target`; `target` is left untouched.
    pub fn apply_to(&self, target: &mut Vec<T>) -> CollectionResult<()> {
        let count = self.removed.len();
        ensure_range(self.index, count, target.len())?;
        target.splice(self.index..self.index + count, self.added.iter().cloned());
        Ok(())
    }
}
