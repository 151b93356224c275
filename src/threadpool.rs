// src/threadpool.rs
//! A fixed-size worker pool driven by a [`TaskQueue`].
//!
//! `num_threads` workers are spawned once, at [`ThreadPool::new`], and run until
//! [`ThreadPool::destroy`] (or `Drop`) tears them down. Each worker loops: block in
//! `wait_for_work_or_shutdown`, run the task outside any lock, report `task_complete`,
//! repeat. `push_barrier` rides the same pipe as ordinary tasks: it builds one
//! [`Barrier`] shared by `num_threads` tiny shim tasks, pushes all of them as a single
//! batch via `push_n`, and lets ordinary scheduling fan them out across the workers —
//! there is no separate control channel for barriers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::barrier::Barrier;
use crate::config::ThreadPoolConfig;
use crate::error::{ThreadPoolError, ThreadPoolResult};
use crate::queue::TaskQueue;
use crate::task::Task;

/// A fixed set of worker threads pulling tasks off a shared [`TaskQueue`].
pub struct ThreadPool {
    queue: Arc<TaskQueue>,
    shutdown: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
    num_threads: usize,
}

impl ThreadPool {
    /// Spawns `num_threads` workers. Rejects `num_threads == 0`.
    pub fn new(num_threads: usize) -> ThreadPoolResult<Self> {
        if num_threads == 0 {
            return Err(ThreadPoolError::InitFail);
        }

        let queue = Arc::new(TaskQueue::new());
        let shutdown = Arc::new(AtomicBool::new(false));
        let mut workers = Vec::with_capacity(num_threads);

        for id in 0..num_threads {
            let queue = Arc::clone(&queue);
            let shutdown = Arc::clone(&shutdown);
            let handle = std::thread::Builder::new()
                .name(format!("ctpool-worker-{id}"))
                .spawn(move || worker_loop(id, queue, shutdown))
                .map_err(|_| ThreadPoolError::ThreadCreateFail)?;
            workers.push(handle);
        }

        tracing::debug!(num_threads, "thread pool started");

        Ok(Self {
            queue,
            shutdown,
            workers,
            num_threads,
        })
    }

    /// Builds a pool from a [`ThreadPoolConfig`].
    pub fn with_config(config: ThreadPoolConfig) -> ThreadPoolResult<Self> {
        Self::new(config.num_threads)
    }

    /// Enqueues a task for some worker to run.
    pub fn push_task(&self, task: Task) {
        self.queue.push(task);
    }

    /// Blocks every worker at a shared rendezvous point. Internally this allocates one
    /// [`Barrier`] for `num_threads` parties and pushes `num_threads` shim tasks, each of
    /// which calls `barrier.wait()` and then returns — so a barrier occupies exactly one
    /// worker-slot per thread, same as any other task, and needs no dedicated scheduling
    /// path. The barrier itself needs no explicit teardown: every shim task holds a
    /// clone of the `Arc<Barrier>`, and the last one to finish drops the final
    /// reference, freeing it through ordinary reference counting rather than a
    /// "last-thread-out frees it" convention.
    pub fn push_barrier(&self) {
        let barrier = Arc::new(
            Barrier::new(self.num_threads).expect("num_threads is nonzero, checked in new()"),
        );
        let tasks = (0..self.num_threads)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                Task::new(move || {
                    let result = barrier.wait();
                    if result.is_final() {
                        tracing::trace!("barrier released");
                    }
                })
            })
            .collect();
        self.queue.push_n(tasks);
    }

    /// Blocks until every currently enqueued task (including any barrier shims) has
    /// completed.
    pub fn wait(&self) {
        self.queue.wait_for_complete();
    }

    /// Wakes any worker parked waiting for work, without enqueuing anything.
    pub fn notify(&self) {
        self.queue.notify();
    }

    /// Number of worker threads in this pool.
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Number of tasks enqueued but not yet picked up by a worker.
    pub fn num_pending(&self) -> usize {
        self.queue.count()
    }

    /// Number of tasks currently executing.
    pub fn num_running(&self) -> usize {
        self.queue.running()
    }

    /// Shuts the pool down: errs if there is still pending or running work, otherwise
    /// signals every worker to exit and joins them all.
    pub fn destroy(mut self) -> ThreadPoolResult<()> {
        self.destroy_inner()
    }

    fn destroy_inner(&mut self) -> ThreadPoolResult<()> {
        self.queue.check_quiescent()?;

        self.shutdown.store(true, Ordering::Release);
        self.queue.notify();

        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }

        tracing::debug!("thread pool destroyed");
        Ok(())
    }
}

fn worker_loop(id: usize, queue: Arc<TaskQueue>, shutdown: Arc<AtomicBool>) {
    loop {
        match queue.wait_for_work_or_shutdown(&shutdown) {
            Some(task) => {
                task.execute();
                if let Err(err) = queue.task_complete() {
                    tracing::error!(worker = id, %err, "task_complete failed");
                }
            }
            None => {
                tracing::trace!(worker = id, "worker shutting down");
                break;
            }
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        if !self.workers.is_empty() {
            if let Err(err) = self.destroy_inner() {
                tracing::error!(%err, "thread pool dropped while non-quiescent; forcing shutdown");
                self.shutdown.store(true, Ordering::Release);
                self.queue.notify();
                for handle in self.workers.drain(..) {
                    let _ = handle.join();
                }
            }
        }
    }
}
