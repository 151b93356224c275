// src/error.rs
//! Error types for the pool, queue, and thread-pool modules.

use std::fmt;

/// Errors that can occur during [`crate::pool::Pool`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// `acquire` was called on a pool with no free slots.
    Exhausted,
    /// `release` was called on a pool with no outstanding handles.
    Underflow,
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted => write!(f, "pool is exhausted, no free slots"),
            Self::Underflow => write!(f, "released a slot into an empty pool"),
        }
    }
}

impl std::error::Error for PoolError {}

/// Converts to an `io::Error`, for embedders that want to report pool failures
/// through an `io::Result`-shaped API. `Exhausted` maps to `WouldBlock`: the pool
/// would be satisfiable if the caller waited for a release, same as a non-blocking
/// read on an empty pipe. `Underflow` is a caller bug (releasing more than was
/// acquired), so it maps to `InvalidInput`.
impl From<PoolError> for std::io::Error {
    fn from(err: PoolError) -> Self {
        use std::io::ErrorKind;
        let kind = match err {
            PoolError::Exhausted => ErrorKind::WouldBlock,
            PoolError::Underflow => ErrorKind::InvalidInput,
        };
        std::io::Error::new(kind, err)
    }
}

/// Errors that can occur during [`crate::queue::TaskQueue`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// `pop` was called on an empty queue.
    Empty,
    /// Initialization of the queue's mutex/condvar failed at the OS layer.
    InitFail,
    /// The queue is non-quiescent and cannot be destroyed (pending tasks).
    PendingTasks,
    /// The queue is non-quiescent and cannot be destroyed (running tasks).
    RunningTasks,
    /// `task_complete` was called with no running tasks.
    Underflow,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "queue is empty"),
            Self::InitFail => write!(f, "could not initialize queue synchronization primitives"),
            Self::PendingTasks => write!(f, "queue has pending tasks"),
            Self::RunningTasks => write!(f, "queue has running tasks"),
            Self::Underflow => write!(f, "task_complete called with no running tasks"),
        }
    }
}

impl std::error::Error for QueueError {}

/// Converts to an `io::Error`. `Empty` maps to `WouldBlock` (nothing to pop right now,
/// not a failure); `Underflow` to `InvalidInput` (caller bug); everything else falls
/// back to `Other`, same as the teacher crate's catch-all arm.
impl From<QueueError> for std::io::Error {
    fn from(err: QueueError) -> Self {
        use std::io::ErrorKind;
        let kind = match err {
            QueueError::Empty => ErrorKind::WouldBlock,
            QueueError::Underflow => ErrorKind::InvalidInput,
            QueueError::InitFail | QueueError::PendingTasks | QueueError::RunningTasks => {
                ErrorKind::Other
            }
        };
        std::io::Error::new(kind, err)
    }
}

/// Errors that can occur during [`crate::barrier::Barrier`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierError {
    /// `num_parties` was zero.
    InitFail,
}

impl fmt::Display for BarrierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitFail => write!(f, "barrier requires at least one party"),
        }
    }
}

impl std::error::Error for BarrierError {}

/// Converts to an `io::Error`. `InitFail` is a bad constructor argument, so it maps to
/// `InvalidInput`.
impl From<BarrierError> for std::io::Error {
    fn from(err: BarrierError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
    }
}

/// Errors that can occur during [`crate::threadpool::ThreadPool`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadPoolError {
    /// `num_threads` was zero.
    InitFail,
    /// The OS refused to spawn a worker thread.
    ThreadCreateFail,
    /// Destroy was attempted with pending tasks still queued.
    PendingTasks,
    /// Destroy was attempted with tasks still running.
    RunningTasks,
}

impl fmt::Display for ThreadPoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitFail => write!(f, "thread pool requires at least one thread"),
            Self::ThreadCreateFail => write!(f, "could not spawn worker thread"),
            Self::PendingTasks => write!(f, "thread pool has pending tasks"),
            Self::RunningTasks => write!(f, "thread pool has running tasks"),
        }
    }
}

impl std::error::Error for ThreadPoolError {}

impl From<QueueError> for ThreadPoolError {
    fn from(err: QueueError) -> Self {
        match err {
            QueueError::PendingTasks => Self::PendingTasks,
            QueueError::RunningTasks => Self::RunningTasks,
            QueueError::InitFail | QueueError::Empty | QueueError::Underflow => Self::InitFail,
        }
    }
}

/// Converts to an `io::Error`. `ThreadCreateFail` is an OS resource failure, so it maps
/// to `Other`; the rest are caller-preconditions, so they map to `InvalidInput`.
impl From<ThreadPoolError> for std::io::Error {
    fn from(err: ThreadPoolError) -> Self {
        use std::io::ErrorKind;
        let kind = match err {
            ThreadPoolError::ThreadCreateFail => ErrorKind::Other,
            ThreadPoolError::InitFail
            | ThreadPoolError::PendingTasks
            | ThreadPoolError::RunningTasks => ErrorKind::InvalidInput,
        };
        std::io::Error::new(kind, err)
    }
}

// ============================================================================
// ANYHOW CONVERSION - optional, gated behind the `anyhow` feature
// ============================================================================

#[cfg(feature = "anyhow")]
mod anyhow_conversions {
    use super::*;

    macro_rules! impl_into_anyhow {
        ($ty:ty) => {
            impl From<$ty> for anyhow::Error {
                fn from(err: $ty) -> Self {
                    anyhow::anyhow!("{err}")
                }
            }
        };
    }

    impl_into_anyhow!(PoolError);
    impl_into_anyhow!(QueueError);
    impl_into_anyhow!(BarrierError);
    impl_into_anyhow!(ThreadPoolError);
}

// ============================================================================
// RESULT TYPE ALIASES
// ============================================================================

/// Result type alias for [`crate::pool::Pool`] operations.
pub type PoolResult<T> = std::result::Result<T, PoolError>;
/// Result type alias for [`crate::queue::TaskQueue`] operations.
pub type QueueResult<T> = std::result::Result<T, QueueError>;
/// Result type alias for [`crate::barrier::Barrier`] operations.
pub type BarrierResult<T> = std::result::Result<T, BarrierError>;
/// Result type alias for [`crate::threadpool::ThreadPool`] operations.
pub type ThreadPoolResult<T> = std::result::Result<T, ThreadPoolError>;
