// src/task.rs
//! A one-shot unit of work and the ownership protocol around it.
//!
//! An entry function is paired with whatever data it closes over; the pairing is a
//! `Box<dyn FnOnce() + Send + 'static>`. Boxing a closure and handing it to the queue by
//! value already transfers ownership of every value it captured onto the heap — there is
//! no separate "freeze" step to perform, unlike a raw `(fn, *mut void, size_t)` triple
//! where the argument bytes must be explicitly copied before the caller's stack frame
//! goes away. [`Task::with_arg`] and [`Task::borrowing`] exist anyway, to give callers
//! porting code written against that triple an explicit choice between an owned copy and
//! a shared reference, mirroring the `arg_size == 0` escape hatch of the original API.

use std::sync::Arc;

/// A single unit of work to be run exactly once by a worker thread.
pub struct Task {
    job: Box<dyn FnOnce() + Send + 'static>,
}

impl Task {
    /// Wraps a closure that owns everything it needs.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self { job: Box::new(f) }
    }

    /// Builds a task from an entry function and an owned argument, mirroring the
    /// `arg`/`arg_size > 0` path of a copy-in task API: `arg` is moved into the closure,
    /// so the task queue is its sole owner from this call onward.
    pub fn with_arg<A, F>(arg: A, f: F) -> Self
    where
        A: Send + 'static,
        F: FnOnce(A) + Send + 'static,
    {
        Self::new(move || f(arg))
    }

    /// Builds a task that shares a reference-counted argument rather than copying it,
    /// mirroring the `arg_size == 0` path where the caller retains ownership and the
    /// task only borrows. Cloning the `Arc` is the Rust-safe substitute for handing out
    /// a raw pointer into caller-owned memory.
    pub fn borrowing<A, F>(arg: Arc<A>, f: F) -> Self
    where
        A: Send + Sync + 'static,
        F: FnOnce(&A) + Send + 'static,
    {
        Self::new(move || f(&arg))
    }

    /// Runs the task. Consumes it: a `Task` can be executed exactly once.
    pub fn execute(self) {
        (self.job)()
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_task_runs_once() {
        let ran = Arc::new(AtomicUsize::new(0));
        let ran2 = Arc::clone(&ran);
        let task = Task::new(move || {
            ran2.fetch_add(1, Ordering::SeqCst);
        });
        task.execute();
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_task_with_arg_moves_ownership() {
        let data = vec![1, 2, 3];
        let (tx, rx) = std::sync::mpsc::channel();
        let task = Task::with_arg(data, move |v| {
            tx.send(v.iter().sum::<i32>()).unwrap();
        });
        task.execute();
        assert_eq!(rx.recv().unwrap(), 6);
    }

    #[test]
    fn test_task_borrowing_shares_argument() {
        let shared = Arc::new(41);
        let shared_for_caller = Arc::clone(&shared);
        let (tx, rx) = std::sync::mpsc::channel();
        let task = Task::borrowing(shared, move |v: &i32| {
            tx.send(*v + 1).unwrap();
        });
        task.execute();
        assert_eq!(rx.recv().unwrap(), 42);
        assert_eq!(*shared_for_caller, 41);
    }
}
