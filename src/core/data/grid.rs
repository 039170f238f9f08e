use crate::core::data::grid_size::GridSize;
use crate::core::data::point::Point;
use crate::core::data::task::Task;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use thiserror::Error;

/// Value of a cell no task has written yet.
pub const UNWRITTEN: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("point {point} lies outside the stripe {task}")]
    OutsideStripe { point: Point, task: Task },
    #[error("point {point} lies outside the {size} grid")]
    OutsideGrid { point: Point, size: GridSize },
}

/// A completed grid of iteration counts, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: GridSize,
    cells: Vec<u32>,
}

impl Grid {
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![UNWRITTEN; size.cell_count()],
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn get(&self, point: Point) -> Option<u32> {
        self.size.index_of(point).map(|index| self.cells[index])
    }

    #[must_use]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks(self.size.width() as usize)
    }

    /// Number of cells still holding [`UNWRITTEN`], e.g. after a failed stripe.
    #[must_use]
    pub fn unwritten_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == UNWRITTEN).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unwritten_count() == 0
    }
}

/// The grid while it is being computed.
///
/// Cells are atomics written with relaxed stores: no lock guards the data,
/// and tasks own disjoint stripes so no two writers ever touch the same cell.
/// Readers must wait for a join or latch before calling [`SharedGrid::snapshot`].
#[derive(Debug, Clone)]
pub struct SharedGrid {
    size: GridSize,
    cells: Arc<[AtomicU32]>,
}

impl SharedGrid {
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        let cells = (0..size.cell_count())
            .map(|_| AtomicU32::new(UNWRITTEN))
            .collect();

        Self { size, cells }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// A write handle limited to the cells of `task`.
    #[must_use]
    pub fn stripe_writer(&self, task: Task) -> StripeWriter {
        StripeWriter {
            grid: self.clone(),
            task,
        }
    }

    /// Copies the current cell values into an owned [`Grid`].
    #[must_use]
    pub fn snapshot(&self) -> Grid {
        Grid {
            size: self.size,
            cells: self
                .cells
                .iter()
                .map(|cell| cell.load(Ordering::Relaxed))
                .collect(),
        }
    }
}

/// Bounded view of a [`SharedGrid`] owned by exactly one task.
#[derive(Debug)]
pub struct StripeWriter {
    grid: SharedGrid,
    task: Task,
}

impl StripeWriter {
    #[must_use]
    pub fn task(&self) -> Task {
        self.task
    }

    pub fn write(&self, point: Point, value: u32) -> Result<(), GridError> {
        if !self.task.contains_point(point) {
            return Err(GridError::OutsideStripe {
                point,
                task: self.task,
            });
        }

        let index = self
            .grid
            .size
            .index_of(point)
            .ok_or(GridError::OutsideGrid {
                point,
                size: self.grid.size,
            })?;

        self.grid.cells[index].store(value, Ordering::Relaxed);
        Ok(())
    }
}
