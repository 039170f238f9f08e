pub mod controllers;
pub mod core;
pub mod logging;
pub mod presenters;

pub use crate::controllers::cli::args::CliArgs;
pub use crate::controllers::cli::errors::CliError;
pub use crate::controllers::cli::render::CliRenderController;
pub use crate::core::actions::compute_grid::compute_grid::{
    ComputeConfig, ComputeError, ComputedGrid, SchedulePlan, compute_grid, compute_grid_with_kernel,
};
pub use crate::core::actions::compute_grid::ports::cell_kernel::CellKernel;
pub use crate::core::actions::schedule::scheduler::{ScheduleReport, Scheduler, Strategy};
pub use crate::core::actions::schedule::worker_pool::pool::{PoolState, WorkerPool};
pub use crate::core::data::complex_rect::ComplexRect;
pub use crate::core::data::grid::{Grid, UNWRITTEN};
pub use crate::core::data::grid_size::GridSize;
pub use crate::core::data::task::{Axis, Task};
pub use crate::core::util::partition_stripes::{MAX_TASKS, PartitionError};
pub use crate::presenters::file::ppm::PpmFilePresenter;
