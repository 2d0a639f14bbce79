//! Bounded worker pool for connection handling
//!
//! A fixed set of named worker threads pulls jobs from a bounded FIFO
//! queue. Each job is one accepted connection handled synchronously to
//! completion; workers block on socket I/O and on the store lock. The
//! accept loop stays free: when the queue is full, `submit` fails instead
//! of blocking.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use thiserror::Error;

/// Error returned when the job queue is at capacity
#[derive(Debug, Error)]
#[error("worker pool queue is full")]
pub struct PoolFullError;

type Job = Box<dyn FnOnce() + Send>;

struct PoolInner {
    queue: Mutex<VecDeque<Job>>,
    work_ready: Condvar,
    shutdown: AtomicBool,
    max_queue_depth: usize,
}

/// Fixed-size pool of blocking worker threads with a bounded job queue
pub struct WorkerPool {
    inner: Arc<PoolInner>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkerPool {
    /// Spawn `num_threads` workers, named `pathdb-worker-0`, `-1`, ...
    pub fn new(num_threads: usize, max_queue_depth: usize) -> Self {
        let inner = Arc::new(PoolInner {
            queue: Mutex::new(VecDeque::new()),
            work_ready: Condvar::new(),
            shutdown: AtomicBool::new(false),
            max_queue_depth,
        });

        let mut workers = Vec::with_capacity(num_threads);
        for i in 0..num_threads {
            let inner = Arc::clone(&inner);
            let handle = std::thread::Builder::new()
                .name(format!("pathdb-worker-{}", i))
                .spawn(move || worker_loop(&inner))
                .expect("failed to spawn worker thread");
            workers.push(handle);
        }

        WorkerPool {
            inner,
            workers: Mutex::new(workers),
        }
    }

    /// Enqueue a job for the next free worker
    ///
    /// Fails if the queue is at capacity or the pool has been shut down.
    pub fn submit(&self, work: impl FnOnce() + Send + 'static) -> Result<(), PoolFullError> {
        // Reject after shutdown: workers are exiting, the job would never run
        if self.inner.shutdown.load(Ordering::Acquire) {
            return Err(PoolFullError);
        }
        {
            let mut queue = self.inner.queue.lock();
            if queue.len() >= self.inner.max_queue_depth {
                return Err(PoolFullError);
            }
            queue.push_back(Box::new(work));
        }
        self.inner.work_ready.notify_one();
        Ok(())
    }

    /// Signal workers to stop and join them
    ///
    /// Workers finish the job in hand and drain the remaining queue before
    /// exiting, so every accepted connection still gets its response.
    pub fn shutdown(&self) {
        self.inner.shutdown.store(true, Ordering::Release);

        // Lock the queue before notifying to prevent lost-wakeup: a worker
        // between its shutdown check and condvar wait holds this lock, so
        // acquiring it guarantees the worker either is already in wait()
        // (and our notify will wake it) or will re-check shutdown first.
        {
            let _queue = self.inner.queue.lock();
            self.inner.work_ready.notify_all();
        }

        let mut workers = self.workers.lock();
        for handle in workers.drain(..) {
            let _ = handle.join();
        }
    }
}

fn worker_loop(inner: &PoolInner) {
    loop {
        let job = {
            let mut queue = inner.queue.lock();
            loop {
                if let Some(job) = queue.pop_front() {
                    break Some(job);
                }
                if inner.shutdown.load(Ordering::Acquire) {
                    break None;
                }
                inner.work_ready.wait(&mut queue);
            }
        };
        match job {
            Some(job) => job(),
            None => return,
        }
    }
}
