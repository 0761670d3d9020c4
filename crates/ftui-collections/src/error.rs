#![forbid(unsafe_code)]

//! Error type shared by every collection operation.

use std::fmt;

/// Result alias for fallible collection operations.
pub type CollectionResult<T> = Result<T, CollectionError>;

/// Errors from collection operations.
///
/// Every error is raised before any mutation, so the collection is left
/// exactly as it was and can be used again immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionError {
    /// An index or `index + count` range fell outside the valid bounds.
    ///
    /// `count` is 1 for single-element access and 0 for insertion points.
    IndexOutOfBounds {
        index: usize,
        count: usize,
        len: usize,
    },
}

impl CollectionError {
    pub(crate) fn out_of_bounds(index: usize, count: usize, len: usize) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(index, count, len, "collection: index out of bounds");

        Self::IndexOutOfBounds { index, count, len }
    }
}

/// Check a readable/updatable position: `index < len`.
pub(crate) fn ensure_index(index: usize, len: usize) -> CollectionResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(CollectionError::out_of_bounds(index, 1, len))
    }
}

/// Check an insertion point: `index <= len`.
pub(crate) fn ensure_insert(index: usize, len: usize) -> CollectionResult<()> {
    if index <= len {
        Ok(())
    } else {
        Err(CollectionError::out_of_bounds(index, 0, len))
    }
}

/// Check a range: `index + count <= len` without overflow.
pub(crate) fn ensure_range(index: usize, count: usize, len: usize) -> CollectionResult<()> {
    match index.checked_add(count) {
        Some(end) if end <= len => Ok(()),
        _ => Err(CollectionError::out_of_bounds(index, count, len)),
    }
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, count, len } => write!(
                f,
                "index out of bounds: index {index} with count {count} exceeds length {len}"
            ),
        }
    }
}

impl std::error::Error for CollectionError {}
