// src/pool/mod.rs
//! A fixed-capacity, mutex-guarded object pool.
//!
//! A `Pool<T>` is a slab of up to `capacity` pre-built `T`s. `acquire` hands one out by
//! value; `release` gives it back. Slots are tracked as a LIFO stack under a single
//! `Mutex` — last released, first reused, which keeps whatever cache lines a value
//! touched while it was out still warm for the next acquirer. There is no growth path:
//! `acquire` on an empty pool returns [`PoolError::Exhausted`] rather than blocking or
//! allocating past capacity, the same contract a fixed-size slab gives in any language.
//!
//! This differs from the pointer-pool it's modeled on in one respect worth calling out:
//! because `acquire` moves a `T` out to the caller instead of handing back a pointer into
//! shared storage, there is nothing left in the pool for [`Pool::release_all`] to
//! invalidate out from under a caller — the caller already owns its copy outright. The
//! counters (`acquired`, `available`) still follow the original bookkeeping contract, so
//! a caller that calls `release` more times than it called `acquire` still observes
//! [`PoolError::Underflow`], and `release_all` still resets `acquired` to zero even if
//! values handed out before the reset are later released back in.

mod config;

pub use config::ObjectPoolConfig;

use std::sync::Mutex;

use crate::error::{PoolError, PoolResult};

struct Inner<T> {
    free: Vec<T>,
    capacity: usize,
    acquired: usize,
}

/// A fixed-capacity pool of reusable `T` values.
pub struct Pool<T> {
    inner: Mutex<Inner<T>>,
}

impl<T> Pool<T> {
    /// Builds a pool of `capacity` values, each produced by `factory`.
    pub fn new<F>(capacity: usize, factory: F) -> Self
    where
        F: Fn() -> T,
    {
        let free = (0..capacity).map(|_| factory()).collect();
        Self {
            inner: Mutex::new(Inner {
                free,
                capacity,
                acquired: 0,
            }),
        }
    }

    /// Builds a pool from a config struct, for callers that prefer naming the capacity
    /// up front rather than threading it through a constructor argument.
    pub fn with_config<F>(config: ObjectPoolConfig, factory: F) -> Self
    where
        F: Fn() -> T,
    {
        Self::new(config.capacity, factory)
    }

    /// Removes and returns one value from the free stack. Fails immediately, rather than
    /// blocking, when the pool is exhausted.
    pub fn acquire(&self) -> PoolResult<T> {
        let mut inner = self.inner.lock().unwrap();
        match inner.free.pop() {
            Some(value) => {
                inner.acquired += 1;
                Ok(value)
            }
            None => {
                tracing::warn!(capacity = inner.capacity, "pool exhausted on acquire");
                Err(PoolError::Exhausted)
            }
        }
    }

    /// Returns a value to the pool. Errs if nothing is currently recorded as acquired:
    /// the counter cannot go negative.
    pub fn release(&self, value: T) -> PoolResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.acquired == 0 {
            tracing::warn!("release called on pool with nothing acquired");
            return Err(PoolError::Underflow);
        }
        inner.acquired -= 1;
        inner.free.push(value);
        Ok(())
    }

    /// Rebuilds the free stack at full capacity and resets the acquired counter to zero.
    /// Values already handed out before this call remain owned by their callers and can
    /// still be released back in afterward, incrementing `acquired` from a clean zero.
    pub fn release_all<F>(&self, factory: F)
    where
        F: Fn() -> T,
    {
        let mut inner = self.inner.lock().unwrap();
        inner.free = (0..inner.capacity).map(|_| factory()).collect();
        inner.acquired = 0;
    }

    /// Total number of slots this pool was built with.
    pub fn capacity(&self) -> usize {
        self.inner.lock().unwrap().capacity
    }

    /// Number of values currently sitting in the free stack.
    pub fn available(&self) -> usize {
        self.inner.lock().unwrap().free.len()
    }

    /// Number of values currently checked out.
    pub fn acquired(&self) -> usize {
        self.inner.lock().unwrap().acquired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_acquire_release_roundtrip() {
        let pool = Pool::new(4, || 0usize);
        let v = pool.acquire().unwrap();
        assert_eq!(pool.available(), 3);
        assert_eq!(pool.acquired(), 1);
        pool.release(v).unwrap();
        assert_eq!(pool.available(), 4);
        assert_eq!(pool.acquired(), 0);
    }

    #[test]
    fn test_capacity_one_exhausts_then_recovers() {
        let pool = Pool::new(1, || Vec::<u8>::new());
        let slot = pool.acquire().unwrap();
        assert_eq!(pool.acquire().unwrap_err(), PoolError::Exhausted);
        pool.release(slot).unwrap();
        assert!(pool.acquire().is_ok());
    }

    #[test]
    fn test_release_underflow() {
        let pool: Pool<u8> = Pool::new(2, || 0);
        assert_eq!(pool.release(0).unwrap_err(), PoolError::Underflow);
    }

    #[test]
    fn test_release_all_resets_counters() {
        let pool = Pool::new(3, || 0usize);
        let _a = pool.acquire().unwrap();
        let _b = pool.acquire().unwrap();
        assert_eq!(pool.acquired(), 2);
        pool.release_all(|| 0usize);
        assert_eq!(pool.acquired(), 0);
        assert_eq!(pool.available(), 3);
    }

    #[test]
    fn test_concurrent_acquire_release_never_exceeds_capacity() {
        const CAPACITY: usize = 8;
        let pool = Arc::new(Pool::new(CAPACITY, || 0usize));
        let exhausted = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let pool = Arc::clone(&pool);
                let exhausted = Arc::clone(&exhausted);
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        match pool.acquire() {
                            Ok(v) => {
                                assert!(pool.acquired() <= CAPACITY);
                                pool.release(v).unwrap();
                            }
                            Err(PoolError::Exhausted) => {
                                exhausted.fetch_add(1, Ordering::SeqCst);
                            }
                            Err(e) => panic!("unexpected error: {e}"),
                        }
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(pool.available(), CAPACITY);
        assert_eq!(pool.acquired(), 0);
    }
}
