#![forbid(unsafe_code)]

//! Recycling pool for objects that are expensive to construct.
//!
//! # Design
//!
//! [`Pool<T, A>`] stores a constructor `Fn(&A) -> T`, the argument value it
//! is always called with, and a free list of released instances.
//! [`acquire`](Recycler::acquire) pops the most recently released instance
//! (LIFO) and only falls back to the constructor when the free list is
//! empty. Instances are handed back exactly as they were released; the pool
//! performs no reset step.
//!
//! Released items are moved into the pool, so an instance cannot be
//! released twice or used after release. Beyond that the pool does no
//! bookkeeping: it accepts instances it did not build and never bounds the
//! free list on its own (see [`Pool::shrink_to`]).
//!
//! # Usage
//!
//! ```
//! use ftui_collections::{Pool, Recycler};
//!
//! let mut pool = Pool::new(|capacity: &usize| Vec::<u8>::with_capacity(*capacity), 4096);
//! let mut buf = pool.acquire();
//! buf.extend_from_slice(b"frame");
//! buf.clear();
//! pool.release(buf);
//!
//! let again = pool.acquire();
//! assert!(again.capacity() >= 4096);
//! assert_eq!(pool.created(), 1);
//! ```

use std::fmt;
use std::mem;

#[cfg(feature = "tracing")]
use tracing::trace;

use crate::traits::Recycler;

type Constructor<T, A> = Box<dyn Fn(&A) -> T>;

/// Configuration for a [`Pool`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolConfig {
    /// Instances constructed eagerly when the pool is created.
    pub prefill: usize,
    /// Initial capacity reserved for the free list.
    pub free_list_capacity: usize,
}

impl PoolConfig {
    /// Set the number of eagerly constructed instances.
    #[must_use]
    pub fn with_prefill(mut self, prefill: usize) -> Self {
        self.prefill = prefill;
        self
    }

    /// Reserve room for `capacity` released instances.
    #[must_use]
    pub fn with_free_list_capacity(mut self, capacity: usize) -> Self {
        self.free_list_capacity = capacity;
        self
    }
}

/// A LIFO free list in front of a fixed constructor.
pub struct Pool<T, A = ()> {
    constructor: Constructor<T, A>,
    args: A,
    items: Vec<T>,
    created: u64,
}

impl<T, A: fmt::Debug> fmt::Debug for Pool<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("args", &self.args)
            .field("idle", &self.items.len())
            .field("created", &self.created)
            .finish_non_exhaustive()
    }
}

impl<T, A> Pool<T, A> {
    /// Create an empty pool that builds instances with `constructor(&args)`.
    #[must_use]
    pub fn new(constructor: impl Fn(&A) -> T + 'static, args: A) -> Self {
        Self::with_config(constructor, args, PoolConfig::default())
    }

    /// Create a pool from a [`PoolConfig`], prefilling it if requested.
    #[must_use]
    pub fn with_config(
        constructor: impl Fn(&A) -> T + 'static,
        args: A,
        config: PoolConfig,
    ) -> Self {
        let mut pool = Self {
            constructor: Box::new(constructor),
            args,
            items: Vec::with_capacity(config.free_list_capacity),
            created: 0,
        };
        pool.prefill(config.prefill);
        pool
    }

    /// Construct `count` instances and put them on the free list.
    pub fn prefill(&mut self, count: usize) {
        self.items.reserve(count);
        for _ in 0..count {
            let item = self.construct();
            self.items.push(item);
        }
    }

    /// Drop idle instances until at most `max_idle` remain.
    ///
    /// The most recently released instances are dropped first.
    pub fn shrink_to(&mut self, max_idle: usize) {
        self.items.truncate(max_idle);
    }

    /// Take every idle instance out of the pool.
    pub fn drain(&mut self) -> Vec<T> {
        mem::take(&mut self.items)
    }

    /// Number of instances waiting on the free list.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.items.len()
    }

    /// `true` if the next [`acquire`](Recycler::acquire) will construct.
    #[must_use]
    pub fn is_idle_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of instances built by the constructor so far.
    #[must_use]
    pub fn created(&self) -> u64 {
        self.created
    }

    /// The argument value passed to every construction.
    #[must_use]
    pub fn args(&self) -> &A {
        &self.args
    }

    fn construct(&mut self) -> T {
        self.created += 1;

        #[cfg(feature = "tracing")]
        trace!(created = self.created, "pool: construct");

        (self.constructor)(&self.args)
    }
}

impl<T: 'static> Pool<T, ()> {
    /// Create a pool around an argument-less constructor.
    #[must_use]
    pub fn from_fn(constructor: impl Fn() -> T + 'static) -> Self {
        Self::new(move |_: &()| constructor(), ())
    }
}

impl<T: Default + 'static> Pool<T, ()> {
    /// Create a pool that builds instances with `T::default()`.
    #[must_use]
    pub fn default_items() -> Self {
        Self::from_fn(T::default)
    }
}

impl<T, A> Recycler<T> for Pool<T, A> {
    fn acquire(&mut self) -> T {
        match self.items.pop() {
            Some(item) => item,
            None => self.construct(),
        }
    }

    fn release(&mut self, item: T) {
        self.items.push(item);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    struct Sprite {
        serial: u32,
        sheet: String,
    }

    fn sprite_pool() -> (Pool<Sprite, String>, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0u32));
        let calls_clone = Rc::clone(&calls);
        let pool = Pool::new(
            move |sheet: &String| {
                calls_clone.set(calls_clone.get() + 1);
                Sprite {
                    serial: calls_clone.get(),
                    sheet: sheet.clone(),
                }
            },
            "tiles.png".to_string(),
        );
        (pool, calls)
    }

    #[test]
    fn empty_pool_constructs_once_per_acquire() {
        let (mut pool, calls) = sprite_pool();
        let first = pool.acquire();
        let second = pool.acquire();

        assert_eq!(first.serial, 1);
        assert_eq!(second.serial, 2);
        assert_eq!(calls.get(), 2);
        assert_eq!(pool.created(), 2);
        assert_eq!(first.sheet, "tiles.png");
        assert_eq!(second.sheet, "tiles.png");
    }

    #[test]
    fn released_instance_is_reused_without_construction() {
        let (mut pool, calls) = sprite_pool();
        let first = pool.acquire();
        let _second = pool.acquire();

        pool.release(first);
        assert_eq!(pool.idle(), 1);

        let again = pool.acquire();
        assert_eq!(again.serial, 1);
        assert_eq!(calls.get(), 2);
        assert!(pool.is_idle_empty());
    }

    #[test]
    fn reuse_is_lifo() {
        let (mut pool, _) = sprite_pool();
        let a = pool.acquire();
        let b = pool.acquire();
        pool.release(a);
        pool.release(b);

        assert_eq!(pool.acquire().serial, 2);
        assert_eq!(pool.acquire().serial, 1);
        assert_eq!(pool.acquire().serial, 3);
    }

    #[test]
    fn reuse_returns_same_allocation() {
        let mut pool = Pool::from_fn(|| Box::new([0u8; 64]));
        let block = pool.acquire();
        let addr = std::ptr::from_ref::<[u8; 64]>(&*block).addr();
        pool.release(block);

        let again = pool.acquire();
        assert_eq!(std::ptr::from_ref::<[u8; 64]>(&*again).addr(), addr);
        assert_eq!(pool.created(), 1);
    }

    #[test]
    fn no_reset_on_reuse() {
        let mut pool: Pool<Vec<i32>> = Pool::default_items();
        let mut v = pool.acquire();
        v.push(42);
        pool.release(v);
        assert_eq!(pool.acquire(), vec![42]);
    }

    #[test]
    fn foreign_items_are_accepted() {
        let (mut pool, calls) = sprite_pool();
        pool.release(Sprite {
            serial: 99,
            sheet: "other.png".to_string(),
        });
        assert_eq!(pool.acquire().serial, 99);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn config_prefills_free_list() {
        let config = PoolConfig::default()
            .with_prefill(3)
            .with_free_list_capacity(8);
        let mut pool = Pool::with_config(|n: &u32| *n, 7, config);
        assert_eq!(pool.idle(), 3);
        assert_eq!(pool.created(), 3);

        for _ in 0..3 {
            assert_eq!(pool.acquire(), 7);
        }
        assert_eq!(pool.created(), 3);
        pool.acquire();
        assert_eq!(pool.created(), 4);
    }

    #[test]
    fn shrink_and_drain() {
        let (mut pool, _) = sprite_pool();
        pool.prefill(4);
        pool.shrink_to(2);
        assert_eq!(pool.idle(), 2);
        pool.shrink_to(5);
        assert_eq!(pool.idle(), 2);

        let drained = pool.drain();
        assert_eq!(
            drained.iter().map(|s| s.serial).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert!(pool.is_idle_empty());
        assert_eq!(pool.created(), 4);
    }

    #[test]
    fn args_are_fixed() {
        let (pool, _) = sprite_pool();
        assert_eq!(pool.args(), "tiles.png");
    }

    #[test]
    fn debug_format() {
        let pool = Pool::new(|n: &u8| *n, 1u8);
        let dbg = format!("{pool:?}");
        assert!(dbg.contains("Pool"));
        assert!(dbg.contains("idle: 0"));
    }
}
