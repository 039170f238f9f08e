use crate::core::actions::compute_grid::ports::cell_kernel::CellKernel;
use crate::core::actions::schedule::scheduler::{
    ScheduleError, ScheduleReport, Scheduler, Strategy,
};
use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::data::grid::{Grid, SharedGrid};
use crate::core::data::grid_size::GridSize;
use crate::core::data::task::Axis;
use crate::core::fractals::mandelbrot::errors::MandelbrotError;
use crate::core::fractals::mandelbrot::kernel::MandelbrotKernel;
use crate::core::util::partition_stripes::{PartitionError, partition_stripes};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

const DEFAULT_WIDTH: u32 = 3840;
const DEFAULT_HEIGHT: u32 = 2160;
const DEFAULT_MAX_ITERATIONS: u32 = 1024;

pub(crate) fn default_size() -> GridSize {
    GridSize::new(DEFAULT_WIDTH, DEFAULT_HEIGHT).expect("default grid size is valid")
}

pub(crate) fn default_rect() -> ComplexRect {
    ComplexRect::new(
        Complex {
            real: -0.6386,
            imag: 0.4456,
        },
        Complex {
            real: -0.5986,
            imag: 0.4686,
        },
    )
    .expect("default complex rect is valid")
}

#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("invalid kernel settings: {0}")]
    Kernel(#[from] MandelbrotError),
    #[error("invalid partition: {0}")]
    Partition(#[from] PartitionError),
    #[error("scheduling failed: {0}")]
    Schedule(#[from] ScheduleError),
}

/// How a grid is cut up and run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SchedulePlan {
    pub thread_count: NonZeroUsize,
    /// Tasks created per thread.
    pub granularity: NonZeroUsize,
    pub axis: Axis,
    pub strategy: Strategy,
    pub report_worker_counts: bool,
}

impl Default for SchedulePlan {
    fn default() -> Self {
        Self {
            thread_count: NonZeroUsize::MIN,
            granularity: NonZeroUsize::MIN,
            axis: Axis::default(),
            strategy: Strategy::default(),
            report_worker_counts: true,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ComputeConfig {
    pub size: GridSize,
    pub rect: ComplexRect,
    pub max_iterations: u32,
    pub plan: SchedulePlan,
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            rect: default_rect(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            plan: SchedulePlan::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ComputedGrid {
    grid: Grid,
    elapsed: Duration,
    report: ScheduleReport,
}

impl ComputedGrid {
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Wall-clock time spent scheduling and computing, excluding setup.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn elapsed_millis(&self) -> u128 {
        self.elapsed.as_millis()
    }

    #[must_use]
    pub fn report(&self) -> &ScheduleReport {
        &self.report
    }

    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

/// Computes the escape-time grid described by `config`.
pub fn compute_grid(config: &ComputeConfig) -> Result<ComputedGrid, ComputeError> {
    let kernel = MandelbrotKernel::new(config.size, config.rect, config.max_iterations)?;

    debug!(
        rect = %config.rect,
        max_iterations = config.max_iterations,
        "mandelbrot kernel ready"
    );

    compute_grid_with_kernel(config.size, Arc::new(kernel), &config.plan)
}

/// Partitions a `size` grid per `plan` and computes every cell with `kernel`.
pub fn compute_grid_with_kernel<K: CellKernel + 'static>(
    size: GridSize,
    kernel: Arc<K>,
    plan: &SchedulePlan,
) -> Result<ComputedGrid, ComputeError> {
    let tasks = partition_stripes(size, plan.thread_count, plan.granularity, plan.axis)?;
    let scheduler = Scheduler::new(plan.strategy, plan.thread_count);
    let shared = SharedGrid::new(size);

    info!(
        %size,
        strategy = %plan.strategy,
        threads = plan.thread_count.get(),
        tasks = tasks.len(),
        axis = %plan.axis,
        "computing grid"
    );

    let started = Instant::now();
    let report = scheduler.run(&tasks, kernel, &shared, plan.report_worker_counts)?;
    let elapsed = started.elapsed();

    if !report.is_clean() {
        warn!(
            failed = report.failed_tasks,
            interrupted = report.interrupted_tasks,
            "grid computed with incomplete stripes"
        );
    }

    info!(
        elapsed_ms = elapsed.as_millis() as u64,
        completed = report.completed_tasks(),
        "grid computed"
    );

    Ok(ComputedGrid {
        grid: shared.snapshot(),
        elapsed,
        report,
    })
}
