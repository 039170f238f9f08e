use crate::core::actions::cancellation::KillSignal;
use crate::core::actions::compute_grid::compute_stripe::{StripeError, compute_stripe};
use crate::core::actions::compute_grid::ports::cell_kernel::CellKernel;
use crate::core::actions::schedule::completion_latch::CompletionLatch;
use crate::core::actions::schedule::scheduler::ScheduleError;
use crate::core::actions::schedule::worker_pool::errors::JobError;
use crate::core::actions::schedule::worker_pool::pool::WorkerPool;
use crate::core::actions::schedule::worker_report::WorkerReport;
use crate::core::data::grid::SharedGrid;
use crate::core::data::task::Task;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::debug;

impl From<StripeError> for JobError {
    fn from(err: StripeError) -> Self {
        match err {
            StripeError::Cancelled => Self::Interrupted,
            other => Self::Failed(Box::new(other)),
        }
    }
}

/// Runs `tasks` on a fresh [`WorkerPool`] and tears the pool down afterwards.
///
/// Every non-empty task becomes one job carrying a latch guard, so the
/// caller wakes once each job has finished, failed or been discarded.
pub fn run_dynamic_pool<K: CellKernel + 'static>(
    tasks: &[Task],
    kernel: Arc<K>,
    grid: &SharedGrid,
    workers: NonZeroUsize,
    report_worker_counts: bool,
) -> Result<Vec<WorkerReport>, ScheduleError> {
    let runnable: Vec<Task> = tasks.iter().copied().filter(|task| !task.is_empty()).collect();
    let capacity = NonZeroUsize::new(runnable.len()).unwrap_or(NonZeroUsize::MIN);
    let latch = Arc::new(CompletionLatch::new(runnable.len()));
    let mut pool = WorkerPool::new(workers, capacity)?;
    let size = grid.size();

    for task in runnable {
        let kernel = Arc::clone(&kernel);
        let writer = grid.stripe_writer(task);
        let done = latch.guard();

        pool.submit(move |kill: &KillSignal| {
            let _done = done;
            compute_stripe(size, &*kernel, &writer, kill)
                .map(|_| ())
                .map_err(JobError::from)
        })?;
    }

    pool.await_drained();
    debug!(pending = latch.remaining(), "queue drained");
    latch.wait();

    let reports = pool
        .stop(report_worker_counts)
        .unwrap_or_else(|| pool.worker_reports());
    pool.kill();

    Ok(reports)
}
