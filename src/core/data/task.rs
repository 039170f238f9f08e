use crate::core::data::grid_size::GridSize;
use crate::core::data::point::Point;
use std::fmt;
use std::ops::Range;

/// Direction along which the grid is cut into stripes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Axis {
    /// Each stripe is a range of rows spanning every column.
    #[default]
    Row,
    /// Each stripe is a range of columns spanning every row.
    Column,
}

impl Axis {
    /// Length of the grid along this axis.
    #[must_use]
    pub fn extent(&self, size: GridSize) -> u32 {
        match self {
            Self::Row => size.height(),
            Self::Column => size.width(),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => write!(f, "rows"),
            Self::Column => write!(f, "columns"),
        }
    }
}

/// A contiguous stripe of the grid, computed as one unit of work.
///
/// A task covers `start..start + length` along its axis and the full extent of
/// the other axis. Tasks with `length == 0` are no-ops produced when a grid is
/// cut into more stripes than it has rows or columns.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Task {
    axis: Axis,
    start: u32,
    length: u32,
}

impl Task {
    #[must_use]
    pub fn new(axis: Axis, start: u32, length: u32) -> Self {
        Self {
            axis,
            start,
            length,
        }
    }

    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[must_use]
    pub fn start(&self) -> u32 {
        self.start
    }

    #[must_use]
    pub fn length(&self) -> u32 {
        self.length
    }

    #[must_use]
    pub fn end(&self) -> u32 {
        self.start + self.length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[must_use]
    pub fn range(&self) -> Range<u32> {
        self.start..self.end()
    }

    #[must_use]
    pub fn cell_count(&self, size: GridSize) -> usize {
        let across = match self.axis {
            Axis::Row => size.width(),
            Axis::Column => size.height(),
        };

        self.length as usize * across as usize
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        match self.axis {
            Axis::Row => self.range().contains(&point.y),
            Axis::Column => self.range().contains(&point.x),
        }
    }

    /// Every coordinate of the stripe.
    ///
    /// Row stripes walk each row left to right; column stripes walk each column
    /// top to bottom. Both orders yield plain `(x, y)` grid coordinates.
    pub fn points(&self, size: GridSize) -> impl Iterator<Item = Point> + use<> {
        let axis = self.axis;
        let (width, height) = (size.width(), size.height());

        self.range().flat_map(move |major| {
            let across = match axis {
                Axis::Row => width,
                Axis::Column => height,
            };

            (0..across).map(move |minor| match axis {
                Axis::Row => Point { x: minor, y: major },
                Axis::Column => Point { x: major, y: minor },
            })
        })
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {})", self.axis, self.start, self.end())
    }
}
