use crate::core::actions::compute_grid::ports::cell_kernel::CellKernel;
use crate::core::actions::schedule::dynamic_pool::run_dynamic_pool;
use crate::core::actions::schedule::static_striping::run_static_striping;
use crate::core::actions::schedule::worker_pool::errors::PoolError;
use crate::core::actions::schedule::worker_report::WorkerReport;
use crate::core::data::grid::SharedGrid;
use crate::core::data::task::Task;
use std::fmt;
use std::io;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("failed to spawn stripe worker {worker}: {source}")]
    Spawn {
        worker: usize,
        #[source]
        source: io::Error,
    },
    #[error("stripe worker {worker} panicked")]
    WorkerPanicked { worker: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy '{value}', expected 'dynamic' or 'static'")]
pub struct StrategyParseError {
    value: String,
}

/// How tasks reach worker threads.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Workers pull tasks from a shared queue.
    #[default]
    Dynamic,
    /// Tasks are dealt round-robin up front.
    Static,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dynamic => write!(f, "dynamic"),
            Self::Static => write!(f, "static"),
        }
    }
}

impl FromStr for Strategy {
    type Err = StrategyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dynamic" => Ok(Self::Dynamic),
            "static" => Ok(Self::Static),
            _ => Err(StrategyParseError {
                value: s.to_string(),
            }),
        }
    }
}

/// Outcome of one schedule run, summed over all workers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleReport {
    pub workers: Vec<WorkerReport>,
    pub failed_tasks: usize,
    pub interrupted_tasks: usize,
}

impl ScheduleReport {
    #[must_use]
    pub fn from_workers(workers: Vec<WorkerReport>) -> Self {
        let failed_tasks = workers.iter().map(|w| w.failed).sum();
        let interrupted_tasks = workers.iter().map(|w| w.interrupted).sum();

        Self {
            workers,
            failed_tasks,
            interrupted_tasks,
        }
    }

    #[must_use]
    pub fn completed_tasks(&self) -> usize {
        self.workers.iter().map(|w| w.completed).sum()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed_tasks == 0 && self.interrupted_tasks == 0
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Scheduler {
    Static { threads: NonZeroUsize },
    Dynamic { workers: NonZeroUsize },
}

impl Scheduler {
    #[must_use]
    pub fn new(strategy: Strategy, threads: NonZeroUsize) -> Self {
        match strategy {
            Strategy::Static => Self::Static { threads },
            Strategy::Dynamic => Self::Dynamic { workers: threads },
        }
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Static { .. } => Strategy::Static,
            Self::Dynamic { .. } => Strategy::Dynamic,
        }
    }

    #[must_use]
    pub fn threads(&self) -> NonZeroUsize {
        match *self {
            Self::Static { threads } => threads,
            Self::Dynamic { workers } => workers,
        }
    }

    /// Computes every task into `grid` and waits for all of them.
    ///
    /// Kernel failures do not abort the run; they show up in the returned
    /// report and leave their stripe partly unwritten.
    pub fn run<K: CellKernel + 'static>(
        &self,
        tasks: &[Task],
        kernel: Arc<K>,
        grid: &SharedGrid,
        report_worker_counts: bool,
    ) -> Result<ScheduleReport, ScheduleError> {
        let workers = match *self {
            Self::Static { threads } => {
                let reports = run_static_striping(tasks, &*kernel, grid, threads)?;
                if report_worker_counts {
                    for report in &reports {
                        info!(
                            worker = report.worker,
                            completed = report.completed,
                            failed = report.failed,
                            "{report}"
                        );
                    }
                }
                reports
            }
            Self::Dynamic { workers } => {
                run_dynamic_pool(tasks, kernel, grid, workers, report_worker_counts)?
            }
        };

        Ok(ScheduleReport::from_workers(workers))
    }
}
