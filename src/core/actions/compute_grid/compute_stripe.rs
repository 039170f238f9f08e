use crate::core::actions::cancellation::{CANCEL_CHECK_INTERVAL_CELLS, CancelToken};
use crate::core::actions::compute_grid::ports::cell_kernel::CellKernel;
use crate::core::data::grid::{GridError, StripeWriter};
use crate::core::data::grid_size::GridSize;
use crate::core::data::point::Point;
use std::error::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StripeError {
    #[error("stripe interrupted before completion")]
    Cancelled,
    #[error("kernel failed at {point}: {source}")]
    Kernel {
        point: Point,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Runs the kernel over every cell of the writer's stripe.
///
/// Stops at the first failing cell; cells after it keep their unwritten
/// value. The token is polled every [`CANCEL_CHECK_INTERVAL_CELLS`] cells,
/// starting before the first one. Returns the number of cells written.
pub fn compute_stripe<K, C>(
    size: GridSize,
    kernel: &K,
    writer: &StripeWriter,
    cancel: &C,
) -> Result<usize, StripeError>
where
    K: CellKernel + ?Sized,
    C: CancelToken + ?Sized,
{
    let mut written = 0;

    for (index, point) in writer.task().points(size).enumerate() {
        if index % CANCEL_CHECK_INTERVAL_CELLS == 0 && cancel.is_cancelled() {
            return Err(StripeError::Cancelled);
        }

        let value = kernel
            .cell_value(point)
            .map_err(|source| StripeError::Kernel {
                point,
                source: Box::new(source),
            })?;

        writer.write(point, value)?;
        written += 1;
    }

    Ok(written)
}
