// src/lib.rs
//! # ctpool
//!
//! A reusable worker-pool runtime for CPU-bound parallel work: a mutex/condvar task
//! queue, a fixed-size thread pool built on it, a one-shot N-party barrier that rides
//! the same queue, and a fixed-capacity object pool for churn-heavy allocation.
//!
//! Not in scope: work stealing, task priorities or dependencies beyond the barrier,
//! producer fairness, dynamic pool resizing, NUMA awareness, per-worker local queues.
//! Those are deliberate simplicity choices, not gaps to be filled later.
//!
//! ```
//! use ctpool::{ThreadPool, Task};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let pool = ThreadPool::new(4).unwrap();
//! let sum = Arc::new(AtomicUsize::new(0));
//! for i in 0..100 {
//!     let sum = Arc::clone(&sum);
//!     pool.push_task(Task::new(move || {
//!         sum.fetch_add(i, Ordering::Relaxed);
//!     }));
//! }
//! pool.wait();
//! assert_eq!(sum.load(Ordering::Relaxed), (0..100).sum::<usize>());
//! pool.destroy().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod barrier;
pub mod config;
pub mod error;
pub mod fifo;
pub mod pool;
pub mod queue;
pub mod task;
pub mod threadpool;

pub use barrier::{Barrier, BarrierWaitResult};
pub use config::ThreadPoolConfig;
pub use error::{
    BarrierError, BarrierResult, PoolError, PoolResult, QueueError, QueueResult, ThreadPoolError,
    ThreadPoolResult,
};
pub use fifo::Fifo;
pub use pool::{ObjectPoolConfig, Pool};
pub use queue::TaskQueue;
pub use task::Task;
pub use threadpool::ThreadPool;

/// Commonly used imports.
pub mod prelude {
    pub use crate::barrier::{Barrier, BarrierWaitResult};
    pub use crate::config::ThreadPoolConfig;
    pub use crate::error::{
        BarrierError, BarrierResult, PoolError, PoolResult, QueueError, QueueResult,
        ThreadPoolError, ThreadPoolResult,
    };
    pub use crate::fifo::Fifo;
    pub use crate::pool::{ObjectPoolConfig, Pool};
    pub use crate::queue::TaskQueue;
    pub use crate::task::Task;
    pub use crate::threadpool::ThreadPool;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_end_to_end_parallel_sum() {
        let pool = ThreadPool::new(4).unwrap();
        let sum = Arc::new(AtomicUsize::new(0));
        for i in 1..=1000usize {
            let sum = Arc::clone(&sum);
            pool.push_task(Task::new(move || {
                sum.fetch_add(i, Ordering::Relaxed);
            }));
        }
        pool.wait();
        assert_eq!(sum.load(Ordering::Relaxed), (1..=1000usize).sum::<usize>());
        pool.destroy().unwrap();
    }

    #[test]
    fn test_object_pool_basic() {
        let pool: Pool<Vec<u8>> = Pool::new(2, Vec::new);
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        assert_eq!(pool.acquire().unwrap_err(), PoolError::Exhausted);
        pool.release(a).unwrap();
        pool.release(b).unwrap();
        assert_eq!(pool.available(), 2);
    }

    #[test]
    fn test_barrier_basic() {
        let barrier = Barrier::new(1).unwrap();
        let result = barrier.wait();
        assert!(result.is_serial() && result.is_final());
    }
}
