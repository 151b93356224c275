// src/queue.rs
//! The mutex/condvar task queue at the center of the dispatch engine.
//!
//! One `Mutex` guards a FIFO of pending [`Task`]s plus two counters, `pending` and
//! `running`; one `Condvar` is broadcast on every state change a waiter might care
//! about. Workers block in [`TaskQueue::wait_for_work`] until a task is available or the
//! queue is asked to shut down; producers block in [`TaskQueue::wait_for_complete`] until
//! the queue goes quiescent (`pending == 0 && running == 0`). A single condvar means
//! every waiter wakes on every signal and re-checks its own predicate in a loop — more
//! wakeups than a per-purpose condvar pair, but one synchronization object to reason
//! about and no risk of signalling the wrong waiter.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard};

use crate::error::{QueueError, QueueResult};
use crate::fifo::Fifo;
use crate::task::Task;

struct Inner {
    tasks: Fifo<Task>,
    pending: usize,
    running: usize,
}

/// A FIFO of [`Task`]s shared between producers and a fixed set of worker threads.
pub struct TaskQueue {
    inner: Mutex<Inner>,
    cv: Condvar,
}

impl TaskQueue {
    /// Creates an empty, quiescent queue.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                tasks: Fifo::new(),
                pending: 0,
                running: 0,
            }),
            cv: Condvar::new(),
        }
    }

    /// Enqueues a single task and wakes any thread waiting for work.
    pub fn push(&self, task: Task) {
        let mut inner = self.inner.lock().unwrap();
        inner.tasks.push(task);
        inner.pending += 1;
        tracing::trace!(pending = inner.pending, "task pushed");
        drop(inner);
        self.cv.notify_all();
    }

    /// Enqueues a batch of tasks atomically: every task becomes visible to workers in the
    /// same critical section, and a single broadcast follows. Used for barrier releases,
    /// where a partial push could let some workers observe an incomplete cohort.
    pub fn push_n(&self, tasks: Vec<Task>) {
        if tasks.is_empty() {
            return;
        }
        let mut inner = self.inner.lock().unwrap();
        let n = tasks.len();
        for task in tasks {
            inner.tasks.push(task);
        }
        inner.pending += n;
        tracing::trace!(pending = inner.pending, batch = n, "task batch pushed");
        drop(inner);
        self.cv.notify_all();
    }

    /// Pops a task without affecting the `running` count. Returns `Err(Empty)` rather
    /// than blocking. Most callers want [`TaskQueue::wait_for_work`] instead.
    pub fn pop(&self) -> QueueResult<Task> {
        let mut inner = self.inner.lock().unwrap();
        Self::pop_locked(&mut inner)
    }

    fn pop_locked(inner: &mut Inner) -> QueueResult<Task> {
        match inner.tasks.pop() {
            Some(task) => {
                inner.pending -= 1;
                Ok(task)
            }
            None => Err(QueueError::Empty),
        }
    }

    /// Blocks until a task is available, then dequeues it and marks it running.
    pub fn wait_for_work(&self) -> Task {
        let mut inner = self.inner.lock().unwrap();
        loop {
            if let Ok(task) = Self::pop_locked(&mut inner) {
                inner.running += 1;
                return task;
            }
            inner = self.cv.wait(inner).unwrap();
        }
    }

    /// Blocks until a task is available or `shutdown` becomes true, whichever first.
    /// Returns `None` on shutdown with nothing left to hand out: the Rust-idiomatic
    /// substitute for cancelling a thread parked in a condvar wait, since there is no
    /// safe way to interrupt a blocked thread from the outside. A shutdown caller must
    /// set the flag and then broadcast the condvar for any parked worker to observe it.
    pub fn wait_for_work_or_shutdown(&self, shutdown: &AtomicBool) -> Option<Task> {
        let mut inner = self.inner.lock().unwrap();
        loop {
            if let Ok(task) = Self::pop_locked(&mut inner) {
                inner.running += 1;
                return Some(task);
            }
            if shutdown.load(Ordering::Acquire) {
                return None;
            }
            inner = self.cv.wait(inner).unwrap();
        }
    }

    /// Blocks until the queue is quiescent: no pending tasks, nothing running.
    pub fn wait_for_complete(&self) {
        let mut inner = self.inner.lock().unwrap();
        while inner.pending != 0 || inner.running != 0 {
            inner = self.cv.wait(inner).unwrap();
        }
    }

    /// Marks one running task as finished. Wakes anyone waiting for quiescence.
    pub fn task_complete(&self) -> QueueResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.running == 0 {
            return Err(QueueError::Underflow);
        }
        inner.running -= 1;
        tracing::trace!(running = inner.running, "task complete");
        drop(inner);
        self.cv.notify_all();
        Ok(())
    }

    /// Wakes every thread blocked on this queue's condvar without changing any state.
    /// Used by a thread pool to rouse workers parked on [`TaskQueue::wait_for_work_or_shutdown`]
    /// after it has raised the shutdown flag.
    pub fn notify(&self) {
        self.cv.notify_all();
    }

    /// Number of tasks currently queued (not yet picked up by a worker).
    pub fn count(&self) -> usize {
        self.inner.lock().unwrap().pending
    }

    /// Number of tasks currently executing.
    pub fn running(&self) -> usize {
        self.inner.lock().unwrap().running
    }

    /// Returns `Ok(())` if the queue has nothing pending and nothing running, the
    /// precondition for tearing it down. A caller that ignores the `Err` and destroys
    /// the queue anyway loses in-flight tasks; see [`crate::threadpool::ThreadPool::destroy`].
    pub fn check_quiescent(&self) -> QueueResult<()> {
        let inner: MutexGuard<'_, Inner> = self.inner.lock().unwrap();
        if inner.pending != 0 {
            return Err(QueueError::PendingTasks);
        }
        if inner.running != 0 {
            return Err(QueueError::RunningTasks);
        }
        Ok(())
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TaskQueue {
    fn drop(&mut self) {
        if let Err(err) = self.check_quiescent() {
            tracing::error!(%err, "task queue dropped while non-quiescent");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn test_push_pop_fifo_order() {
        let q = TaskQueue::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 0..5 {
            let order = Arc::clone(&order);
            q.push(Task::new(move || order.lock().unwrap().push(i)));
        }
        assert_eq!(q.count(), 5);
        for _ in 0..5 {
            q.wait_for_work().execute();
            q.task_complete().unwrap();
        }
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_pop_empty_is_err() {
        let q = TaskQueue::new();
        assert_eq!(q.pop().unwrap_err(), QueueError::Empty);
    }

    #[test]
    fn test_task_complete_underflow() {
        let q = TaskQueue::new();
        assert_eq!(q.task_complete().unwrap_err(), QueueError::Underflow);
    }

    #[test]
    fn test_wait_for_complete_blocks_until_quiescent() {
        let q = Arc::new(TaskQueue::new());
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..20 {
            let counter = Arc::clone(&counter);
            q.push(Task::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let q = Arc::clone(&q);
                std::thread::spawn(move || loop {
                    match q.pop() {
                        Ok(task) => {
                            // pop() here does not touch running; simulate manually.
                            task.execute();
                        }
                        Err(_) => break,
                    }
                })
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }

        assert_eq!(counter.load(Ordering::SeqCst), 20);
        assert_eq!(q.count(), 0);
    }

    #[test]
    fn test_check_quiescent() {
        let q = TaskQueue::new();
        assert!(q.check_quiescent().is_ok());
        q.push(Task::new(|| {}));
        assert_eq!(q.check_quiescent().unwrap_err(), QueueError::PendingTasks);
        let t = q.wait_for_work();
        assert_eq!(q.check_quiescent().unwrap_err(), QueueError::RunningTasks);
        t.execute();
        q.task_complete().unwrap();
        assert!(q.check_quiescent().is_ok());
    }

    #[test]
    fn test_wait_for_work_or_shutdown_wakes_on_shutdown() {
        let q = Arc::new(TaskQueue::new());
        let shutdown = Arc::new(AtomicBool::new(false));

        let q2 = Arc::clone(&q);
        let shutdown2 = Arc::clone(&shutdown);
        let handle = std::thread::spawn(move || q2.wait_for_work_or_shutdown(&shutdown2));

        std::thread::sleep(std::time::Duration::from_millis(20));
        shutdown.store(true, Ordering::Release);
        q.notify();

        assert!(handle.join().unwrap().is_none());
    }
}
