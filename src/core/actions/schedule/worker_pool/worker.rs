use crate::core::actions::schedule::worker_pool::errors::JobError;
use crate::core::actions::schedule::worker_pool::pool::Shared;
use crate::core::actions::schedule::worker_report::WorkerReport;
use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

#[derive(Debug)]
struct WorkerStats {
    running: AtomicBool,
    completed: AtomicUsize,
    failed: AtomicUsize,
    interrupted: AtomicUsize,
    busy_nanos: AtomicU64,
}

impl WorkerStats {
    fn new() -> Self {
        Self {
            running: AtomicBool::new(true),
            completed: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            interrupted: AtomicUsize::new(0),
            busy_nanos: AtomicU64::new(0),
        }
    }
}

/// One long-lived pool thread and the counters it keeps.
pub(super) struct Worker {
    id: usize,
    stats: Arc<WorkerStats>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    pub(super) fn spawn(id: usize, shared: Arc<Shared>) -> io::Result<Self> {
        let stats = Arc::new(WorkerStats::new());
        let worker_stats = Arc::clone(&stats);

        let handle = thread::Builder::new()
            .name(format!("mandel-worker-{id}"))
            .spawn(move || {
                Self::run(id, &shared, &worker_stats);
            })?;

        Ok(Self {
            id,
            stats,
            handle: Some(handle),
        })
    }

    fn run(id: usize, shared: &Shared, stats: &WorkerStats) {
        debug!(worker = id, "worker started");

        while let Some(job) = shared.next_job() {
            let started = Instant::now();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| job(shared.kill_signal())));
            let busy = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);
            stats.busy_nanos.fetch_add(busy, Ordering::Relaxed);

            match outcome {
                Ok(Ok(())) => {
                    stats.completed.fetch_add(1, Ordering::Relaxed);
                }
                Ok(Err(JobError::Interrupted)) => {
                    debug!(worker = id, "job interrupted by kill");
                    stats.interrupted.fetch_add(1, Ordering::Relaxed);
                }
                Ok(Err(JobError::Failed(err))) => {
                    warn!(worker = id, error = %err, "job failed");
                    stats.failed.fetch_add(1, Ordering::Relaxed);
                }
                Err(payload) => {
                    error!(worker = id, panic = panic_message(payload.as_ref()), "job panicked");
                    stats.failed.fetch_add(1, Ordering::Relaxed);
                }
            }

            shared.finish_job();
        }

        stats.running.store(false, Ordering::Release);
        debug!(
            worker = id,
            completed = stats.completed.load(Ordering::Relaxed),
            "worker exiting"
        );
    }

    #[must_use]
    pub(super) fn is_running(&self) -> bool {
        self.stats.running.load(Ordering::Acquire)
    }

    #[must_use]
    pub(super) fn completed(&self) -> usize {
        self.stats.completed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub(super) fn report(&self) -> WorkerReport {
        WorkerReport {
            worker: self.id,
            completed: self.completed(),
            failed: self.stats.failed.load(Ordering::Relaxed),
            interrupted: self.stats.interrupted.load(Ordering::Relaxed),
            busy: Duration::from_nanos(self.stats.busy_nanos.load(Ordering::Relaxed)),
        }
    }

    pub(super) fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!(worker = self.id, "worker thread panicked outside a job");
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}
