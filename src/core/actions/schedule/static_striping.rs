use crate::core::actions::cancellation::NeverCancel;
use crate::core::actions::compute_grid::compute_stripe::{StripeError, compute_stripe};
use crate::core::actions::compute_grid::ports::cell_kernel::CellKernel;
use crate::core::actions::schedule::scheduler::ScheduleError;
use crate::core::actions::schedule::worker_report::WorkerReport;
use crate::core::data::grid::SharedGrid;
use crate::core::data::task::Task;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::Instant;
use tracing::{debug, warn};

/// Runs `tasks` on `threads` workers with a fixed round-robin assignment.
///
/// Worker `k` takes tasks `k, k + T, k + 2T, ...` in order. The calling
/// thread is worker 0 and the rest are scoped threads, so the only
/// synchronisation is the final join.
pub fn run_static_striping<K: CellKernel + ?Sized>(
    tasks: &[Task],
    kernel: &K,
    grid: &SharedGrid,
    threads: NonZeroUsize,
) -> Result<Vec<WorkerReport>, ScheduleError> {
    let thread_count = threads.get();

    thread::scope(|scope| -> Result<Vec<WorkerReport>, ScheduleError> {
        let mut handles = Vec::with_capacity(thread_count - 1);

        for worker in 1..thread_count {
            let handle = thread::Builder::new()
                .name(format!("mandel-stripe-{worker}"))
                .spawn_scoped(scope, move || {
                    run_worker(worker, thread_count, tasks, kernel, grid)
                })
                .map_err(|source| ScheduleError::Spawn { worker, source })?;
            handles.push((worker, handle));
        }

        let first = panic::catch_unwind(AssertUnwindSafe(|| {
            run_worker(0, thread_count, tasks, kernel, grid)
        }))
        .map_err(|_| ScheduleError::WorkerPanicked { worker: 0 });

        let mut reports = Vec::with_capacity(thread_count);
        reports.push(first);
        for (worker, handle) in handles {
            reports.push(
                handle
                    .join()
                    .map_err(|_| ScheduleError::WorkerPanicked { worker }),
            );
        }

        reports.into_iter().collect()
    })
}

fn run_worker<K: CellKernel + ?Sized>(
    worker: usize,
    thread_count: usize,
    tasks: &[Task],
    kernel: &K,
    grid: &SharedGrid,
) -> WorkerReport {
    let started = Instant::now();
    let mut report = WorkerReport::new(worker);

    for task in tasks
        .iter()
        .skip(worker)
        .step_by(thread_count)
        .filter(|task| !task.is_empty())
    {
        let writer = grid.stripe_writer(*task);

        match compute_stripe(grid.size(), kernel, &writer, &NeverCancel) {
            Ok(_) => report.completed += 1,
            Err(StripeError::Cancelled) => {
                debug!(worker, %task, "stripe interrupted");
                report.interrupted += 1;
            }
            Err(err) => {
                warn!(worker, %task, error = %err, "stripe failed");
                report.failed += 1;
            }
        }
    }

    report.busy = started.elapsed();
    debug!(worker, completed = report.completed, "static worker finished");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::grid_size::GridSize;
    use crate::core::data::point::Point;
    use crate::core::data::task::Axis;
    use crate::core::util::partition_stripes::partition_by_count;
    use std::convert::Infallible;
    use std::sync::Mutex;

    /// Records which thread computed each row.
    struct ThreadRecorder {
        rows: Mutex<Vec<(u32, String)>>,
    }

    impl CellKernel for ThreadRecorder {
        type Failure = Infallible;

        fn cell_value(&self, point: Point) -> Result<u32, Self::Failure> {
            if point.x == 0 {
                let name = thread::current().name().unwrap_or("main").to_string();
                self.rows.lock().unwrap().push((point.y, name));
            }
            Ok(1)
        }
    }

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_round_robin_assignment() {
        let size = GridSize::new(2, 6).unwrap();
        let tasks = partition_by_count(size, nz(6), Axis::Row).unwrap();
        let grid = SharedGrid::new(size);
        let kernel = ThreadRecorder {
            rows: Mutex::new(Vec::new()),
        };

        let reports = run_static_striping(&tasks, &kernel, &grid, nz(3)).unwrap();

        assert_eq!(reports.iter().map(|r| r.worker).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(reports.iter().all(|r| r.completed == 2));

        let rows = kernel.rows.into_inner().unwrap();
        let caller = thread::current().name().unwrap_or("main").to_string();
        for (row, name) in rows {
            match row % 3 {
                0 => assert_eq!(name, caller),
                k => assert_eq!(name, format!("mandel-stripe-{k}")),
            }
        }
        assert!(grid.snapshot().is_complete());
    }

    #[test]
    fn test_empty_tasks_are_skipped() {
        let size = GridSize::new(10, 3).unwrap();
        let tasks = partition_by_count(size, nz(4), Axis::Row).unwrap();
        let grid = SharedGrid::new(size);
        let kernel = ThreadRecorder {
            rows: Mutex::new(Vec::new()),
        };

        let reports = run_static_striping(&tasks, &kernel, &grid, nz(4)).unwrap();

        assert_eq!(reports[3].tasks_seen(), 0);
        assert_eq!(reports.iter().map(|r| r.completed).sum::<usize>(), 3);
        assert!(grid.snapshot().is_complete());
    }

    #[test]
    fn test_more_threads_than_tasks() {
        let size = GridSize::new(4, 4).unwrap();
        let tasks = partition_by_count(size, nz(2), Axis::Column).unwrap();
        let grid = SharedGrid::new(size);
        let kernel = ThreadRecorder {
            rows: Mutex::new(Vec::new()),
        };

        let reports = run_static_striping(&tasks, &kernel, &grid, nz(5)).unwrap();

        assert_eq!(reports.len(), 5);
        assert!(grid.snapshot().is_complete());
    }

    struct PanicKernel;

    impl CellKernel for PanicKernel {
        type Failure = Infallible;

        fn cell_value(&self, point: Point) -> Result<u32, Self::Failure> {
            if point.y == 1 {
                panic!("kernel panicked");
            }
            Ok(1)
        }
    }

    #[test]
    fn test_worker_panic_is_reported() {
        let size = GridSize::new(2, 2).unwrap();
        let tasks = partition_by_count(size, nz(2), Axis::Row).unwrap();
        let grid = SharedGrid::new(size);

        let result = run_static_striping(&tasks, &PanicKernel, &grid, nz(2));

        assert!(matches!(result, Err(ScheduleError::WorkerPanicked { worker: 1 })));
    }
}
