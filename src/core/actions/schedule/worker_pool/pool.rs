use crate::core::actions::cancellation::KillSignal;
use crate::core::actions::schedule::worker_pool::errors::{JobError, PoolError};
use crate::core::actions::schedule::worker_pool::worker::Worker;
use crate::core::actions::schedule::worker_report::WorkerReport;
use std::collections::VecDeque;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info};

/// Upper bound on how long a waiter sleeps before re-checking the queue.
pub const DRAIN_RECHECK_INTERVAL: Duration = Duration::from_millis(20);

pub type Job = Box<dyn FnOnce(&KillSignal) -> Result<(), JobError> + Send + 'static>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PoolState {
    Running,
    Stopping,
    Killed,
}

impl fmt::Display for PoolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Stopping => write!(f, "stopping"),
            Self::Killed => write!(f, "killed"),
        }
    }
}

struct PoolQueue {
    state: PoolState,
    jobs: VecDeque<Job>,
    active: usize,
}

/// State shared between the pool handle and its worker threads.
pub(super) struct Shared {
    queue: Mutex<PoolQueue>,
    work_ready: Condvar,
    progress: Condvar,
    capacity: usize,
    kill: KillSignal,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, PoolQueue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn kill_signal(&self) -> &KillSignal {
        &self.kill
    }

    /// Blocks until there is a job to run, or returns `None` once the worker
    /// should exit: immediately after a kill, or when stopping and the queue
    /// has run dry.
    pub(super) fn next_job(&self) -> Option<Job> {
        let mut queue = self.lock();

        loop {
            if queue.state == PoolState::Killed {
                return None;
            }

            if let Some(job) = queue.jobs.pop_front() {
                queue.active += 1;
                if queue.jobs.is_empty() {
                    self.progress.notify_all();
                }
                return Some(job);
            }

            if queue.state == PoolState::Stopping {
                return None;
            }

            queue = self
                .work_ready
                .wait(queue)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    pub(super) fn finish_job(&self) {
        let mut queue = self.lock();
        queue.active = queue.active.saturating_sub(1);
        self.progress.notify_all();
    }
}

/// Fixed set of worker threads fed from a bounded FIFO queue.
///
/// The pool moves `Running -> Stopping -> Killed` and never back. Dropping
/// the pool kills it.
pub struct WorkerPool {
    shared: Arc<Shared>,
    workers: Vec<Worker>,
}

impl WorkerPool {
    pub fn new(worker_count: NonZeroUsize, capacity: NonZeroUsize) -> Result<Self, PoolError> {
        let shared = Arc::new(Shared {
            queue: Mutex::new(PoolQueue {
                state: PoolState::Running,
                jobs: VecDeque::with_capacity(capacity.get()),
                active: 0,
            }),
            work_ready: Condvar::new(),
            progress: Condvar::new(),
            capacity: capacity.get(),
            kill: KillSignal::new(),
        });

        let mut pool = Self {
            shared,
            workers: Vec::with_capacity(worker_count.get()),
        };

        for id in 0..worker_count.get() {
            let worker = Worker::spawn(id, Arc::clone(&pool.shared))
                .map_err(|source| PoolError::Spawn { worker: id, source })?;
            pool.workers.push(worker);
        }

        info!(
            workers = worker_count.get(),
            capacity = capacity.get(),
            "worker pool started"
        );

        Ok(pool)
    }

    /// Queues a job for the next free worker.
    ///
    /// The job receives the pool's kill signal and should poll it if it runs
    /// for long.
    pub fn submit<F>(&self, job: F) -> Result<(), PoolError>
    where
        F: FnOnce(&KillSignal) -> Result<(), JobError> + Send + 'static,
    {
        let mut queue = self.shared.lock();

        if queue.state != PoolState::Running {
            return Err(PoolError::Closed { state: queue.state });
        }

        if queue.jobs.len() >= self.shared.capacity {
            return Err(PoolError::QueueFull {
                capacity: self.shared.capacity,
            });
        }

        queue.jobs.push_back(Box::new(job));
        drop(queue);

        self.shared.work_ready.notify_one();
        Ok(())
    }

    /// Blocks until every queued job has been claimed by a worker.
    ///
    /// Claimed jobs may still be running when this returns; see
    /// [`WorkerPool::await_idle`].
    pub fn await_drained(&self) {
        let mut queue = self.shared.lock();

        while !queue.jobs.is_empty() {
            queue = self
                .shared
                .progress
                .wait_timeout(queue, DRAIN_RECHECK_INTERVAL)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    /// Blocks until the queue is empty and no job is executing.
    pub fn await_idle(&self) {
        let mut queue = self.shared.lock();

        while !queue.jobs.is_empty() || queue.active > 0 {
            queue = self
                .shared
                .progress
                .wait_timeout(queue, DRAIN_RECHECK_INTERVAL)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    /// Closes the pool to new jobs and lets the workers finish what is
    /// already queued. Blocks until every worker has exited.
    ///
    /// With `report_counts` set, the per-worker counts are logged and
    /// returned.
    pub fn stop(&mut self, report_counts: bool) -> Option<Vec<WorkerReport>> {
        {
            let mut queue = self.shared.lock();
            if queue.state == PoolState::Running {
                queue.state = PoolState::Stopping;
                info!(queued = queue.jobs.len(), "worker pool stopping");
            }
        }

        self.shared.work_ready.notify_all();
        self.join_workers();

        if !report_counts {
            return None;
        }

        let reports = self.worker_reports();
        for report in &reports {
            info!(
                worker = report.worker,
                completed = report.completed,
                failed = report.failed,
                interrupted = report.interrupted,
                "{report}"
            );
        }

        Some(reports)
    }

    /// Discards queued jobs, raises the kill signal and joins every worker.
    ///
    /// Calling it again is a no-op.
    pub fn kill(&mut self) {
        let discarded = {
            let mut queue = self.shared.lock();
            if queue.state == PoolState::Killed {
                return;
            }
            queue.state = PoolState::Killed;
            std::mem::take(&mut queue.jobs)
        };

        let discarded_count = discarded.len();
        drop(discarded);

        self.shared.kill.raise();
        self.shared.work_ready.notify_all();
        self.shared.progress.notify_all();
        self.join_workers();

        info!(discarded = discarded_count, "worker pool killed");
    }

    fn join_workers(&mut self) {
        for worker in &mut self.workers {
            worker.join();
        }
        debug!(workers = self.workers.len(), "worker threads joined");
    }

    #[must_use]
    pub fn state(&self) -> PoolState {
        self.shared.lock().state
    }

    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.shared.lock().jobs.len()
    }

    #[must_use]
    pub fn active_jobs(&self) -> usize {
        self.shared.lock().active
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    #[must_use]
    pub fn running_workers(&self) -> usize {
        self.workers.iter().filter(|worker| worker.is_running()).count()
    }

    #[must_use]
    pub fn worker_reports(&self) -> Vec<WorkerReport> {
        self.workers.iter().map(Worker::report).collect()
    }

    #[must_use]
    pub fn total_completed(&self) -> usize {
        self.workers.iter().map(Worker::completed).sum()
    }

    #[must_use]
    pub fn kill_signal(&self) -> KillSignal {
        self.shared.kill.clone()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.kill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_stop_runs_every_queued_job() {
        let mut pool = WorkerPool::new(nz(3), nz(64)).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..40 {
            let counter = Arc::clone(&counter);
            pool.submit(move |_| {
                counter.fetch_add(1, Ordering::Relaxed);
                Ok(())
            })
            .unwrap();
        }

        let reports = pool.stop(true).unwrap();

        assert_eq!(counter.load(Ordering::Relaxed), 40);
        assert_eq!(reports.len(), 3);
        assert_eq!(reports.iter().map(|r| r.completed).sum::<usize>(), 40);
        assert_eq!(pool.total_completed(), 40);
        assert_eq!(pool.running_workers(), 0);
        assert_eq!(pool.state(), PoolState::Stopping);
    }

    #[test]
    fn test_new_pool_reports_its_shape() {
        let mut pool = WorkerPool::new(nz(3), nz(5)).unwrap();

        assert_eq!(pool.worker_count(), 3);
        assert_eq!(pool.capacity(), 5);
        assert_eq!(pool.state(), PoolState::Running);
        assert_eq!(pool.queue_len(), 0);

        pool.kill();
        assert_eq!(pool.worker_count(), 3);
        assert_eq!(pool.running_workers(), 0);
    }

    #[test]
    fn test_stop_without_report_returns_none() {
        let mut pool = WorkerPool::new(nz(1), nz(1)).unwrap();

        assert!(pool.stop(false).is_none());
    }

    #[test]
    fn test_submit_rejects_when_queue_is_full() {
        let pool = WorkerPool::new(nz(1), nz(1)).unwrap();
        let (started_tx, started_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();

        pool.submit(move |_| {
            started_tx.send(()).unwrap();
            release_rx.recv().unwrap();
            Ok(())
        })
        .unwrap();
        started_rx.recv().unwrap();

        pool.submit(|_| Ok(())).unwrap();
        let result = pool.submit(|_| Ok(()));

        assert!(matches!(result, Err(PoolError::QueueFull { capacity: 1 })));
        release_tx.send(()).unwrap();
        pool.await_idle();
        assert_eq!(pool.total_completed(), 2);
    }

    #[test]
    fn test_failed_and_panicking_jobs_do_not_stop_the_worker() {
        let mut pool = WorkerPool::new(nz(1), nz(8)).unwrap();

        pool.submit(|_| Err(JobError::Failed("boom".into()))).unwrap();
        pool.submit(|_| panic!("job blew up")).unwrap();
        pool.submit(|_| Err(JobError::Interrupted)).unwrap();
        pool.submit(|_| Ok(())).unwrap();

        let reports = pool.stop(true).unwrap();

        assert_eq!(reports[0].completed, 1);
        assert_eq!(reports[0].failed, 2);
        assert_eq!(reports[0].interrupted, 1);
    }

    #[test]
    fn test_jobs_see_the_kill_signal() {
        let mut pool = WorkerPool::new(nz(1), nz(1)).unwrap();
        let (started_tx, started_rx) = mpsc::channel();

        pool.submit(move |kill: &KillSignal| {
            started_tx.send(()).unwrap();
            while !kill.is_raised() {
                std::thread::yield_now();
            }
            Err(JobError::Interrupted)
        })
        .unwrap();
        started_rx.recv().unwrap();

        pool.kill();

        assert!(pool.kill_signal().is_raised());
        assert_eq!(pool.worker_reports()[0].interrupted, 1);
        assert_eq!(pool.running_workers(), 0);
    }

    #[test]
    fn test_kill_is_idempotent() {
        let mut pool = WorkerPool::new(nz(2), nz(2)).unwrap();

        pool.kill();
        pool.kill();

        assert_eq!(pool.state(), PoolState::Killed);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(PoolState::Running.to_string(), "running");
        assert_eq!(PoolState::Stopping.to_string(), "stopping");
        assert_eq!(PoolState::Killed.to_string(), "killed");
    }
}
