use crate::core::actions::compute_grid::compute_grid::{ComputeConfig, SchedulePlan};
use crate::core::actions::schedule::scheduler::Strategy;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::data::grid_size::GridSize;
use crate::core::data::task::Axis;
use crate::core::fractals::mandelbrot::colour_maps::kinds::MandelbrotColourMapKinds;
use crate::core::util::partition_stripes::MAX_TASKS;
use crate::logging::LogConfig;
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Render an escape-time fractal grid on a pool of worker threads.
#[derive(Debug, Clone, Parser)]
#[command(name = "mandel_world", version)]
pub struct CliArgs {
    /// Size of the image as WIDTHxHEIGHT
    #[arg(short = 's', long, default_value = "3840x2160")]
    pub size: GridSize,

    /// Area of the complex plane as reMin:reMax:imMin:imMax
    #[arg(
        short = 'r',
        long,
        default_value = "-0.6386:-0.5986:0.4456:0.4686",
        allow_hyphen_values = true
    )]
    pub rect: ComplexRect,

    /// Number of worker threads
    #[arg(short = 't', long, default_value_t = NonZeroUsize::MIN, value_parser = parse_task_factor)]
    pub threads: NonZeroUsize,

    /// Tasks created per thread
    #[arg(
        short = 'g',
        long,
        visible_alias = "gran",
        default_value_t = NonZeroUsize::MIN,
        value_parser = parse_task_factor
    )]
    pub granularity: NonZeroUsize,

    /// Cut the grid into column stripes instead of row stripes
    #[arg(short = 'c', long)]
    pub cols: bool,

    /// Output path of the PPM image
    #[arg(short = 'o', long, default_value = "mandel_world.ppm")]
    pub out: PathBuf,

    /// Only log warnings and skip the per-thread report
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Iteration cap of the escape-time kernel
    #[arg(short = 'm', long, default_value_t = 1024)]
    pub max_iterations: u32,

    /// How tasks are handed to threads: dynamic or static
    #[arg(long, default_value_t = Strategy::Dynamic)]
    pub strategy: Strategy,

    /// Palette for escaped cells: hsb or fire
    #[arg(long, default_value_t = MandelbrotColourMapKinds::default())]
    pub colour_map: MandelbrotColourMapKinds,
}

fn parse_task_factor(value: &str) -> Result<NonZeroUsize, String> {
    let parsed: NonZeroUsize = value.parse().map_err(|err| format!("{err}"))?;

    if parsed.get() > MAX_TASKS {
        return Err(format!("must be at most {MAX_TASKS}"));
    }

    Ok(parsed)
}

impl CliArgs {
    #[must_use]
    pub fn compute_config(&self) -> ComputeConfig {
        ComputeConfig {
            size: self.size,
            rect: self.rect,
            max_iterations: self.max_iterations,
            plan: SchedulePlan {
                thread_count: self.threads,
                granularity: self.granularity,
                axis: if self.cols { Axis::Column } else { Axis::Row },
                strategy: self.strategy,
                report_worker_counts: !self.quiet,
            },
        }
    }

    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        if self.quiet {
            LogConfig::quiet()
        } else {
            LogConfig::default()
        }
    }
}
