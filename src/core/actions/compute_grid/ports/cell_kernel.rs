use crate::core::data::point::Point;
use std::error::Error;

/// Per-cell computation run by every scheduler.
///
/// Implementations must be pure: the same point always yields the same value,
/// whichever thread asks and however often. A successful result is never
/// `0`, which the grid reserves for cells nobody has written.
pub trait CellKernel: Send + Sync {
    type Failure: Error + Send + Sync + 'static;

    fn cell_value(&self, point: Point) -> Result<u32, Self::Failure>;
}
