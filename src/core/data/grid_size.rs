use crate::core::data::point::Point;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridSizeError {
    #[error("grid size must be positive: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("could not parse grid size {value:?}, expected WIDTHxHEIGHT")]
    Malformed { value: String },
}

/// Width and height of the computation grid, in cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    pub fn new(width: u32, height: u32) -> Result<Self, GridSizeError> {
        if width == 0 || height == 0 {
            return Err(GridSizeError::InvalidSize { width, height });
        }

        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        point.x < self.width && point.y < self.height
    }

    /// Row-major offset of `point`, or `None` when it lies outside the grid.
    #[must_use]
    pub fn index_of(&self, point: Point) -> Option<usize> {
        self.contains_point(point)
            .then(|| point.y as usize * self.width as usize + point.x as usize)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for GridSize {
    type Err = GridSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || GridSizeError::Malformed {
            value: s.to_string(),
        };

        let (width, height) = s.split_once(['x', 'X']).ok_or_else(malformed)?;
        let width = width.trim().parse().map_err(|_| malformed())?;
        let height = height.trim().parse().map_err(|_| malformed())?;

        Self::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_size_dimensions() {
        let size = GridSize::new(121, 101).unwrap();

        assert_eq!(size.width(), 121);
        assert_eq!(size.height(), 101);
        assert_eq!(size.cell_count(), 12221);
    }

    #[test]
    fn test_grid_size_must_be_positive() {
        assert_eq!(
            GridSize::new(0, 10),
            Err(GridSizeError::InvalidSize {
                width: 0,
                height: 10
            })
        );
        assert_eq!(
            GridSize::new(10, 0),
            Err(GridSizeError::InvalidSize {
                width: 10,
                height: 0
            })
        );
    }

    #[test]
    fn test_single_cell_grid_is_valid() {
        let size = GridSize::new(1, 1).unwrap();

        assert_eq!(size.cell_count(), 1);
    }

    #[test]
    fn test_grid_size_contains_point() {
        let size = GridSize::new(100, 50).unwrap();

        assert!(size.contains_point(Point { x: 0, y: 0 }));
        assert!(size.contains_point(Point { x: 99, y: 49 }));
        assert!(!size.contains_point(Point { x: 100, y: 0 }));
        assert!(!size.contains_point(Point { x: 0, y: 50 }));
    }

    #[test]
    fn test_index_of_is_row_major() {
        let size = GridSize::new(10, 3).unwrap();

        assert_eq!(size.index_of(Point { x: 0, y: 0 }), Some(0));
        assert_eq!(size.index_of(Point { x: 9, y: 0 }), Some(9));
        assert_eq!(size.index_of(Point { x: 0, y: 1 }), Some(10));
        assert_eq!(size.index_of(Point { x: 9, y: 2 }), Some(29));
        assert_eq!(size.index_of(Point { x: 10, y: 2 }), None);
    }

    #[test]
    fn test_parse_width_by_height() {
        let size: GridSize = "3840x2160".parse().unwrap();

        assert_eq!(size, GridSize::new(3840, 2160).unwrap());
    }

    #[test]
    fn test_parse_rejects_malformed_size() {
        assert_eq!(
            "3840".parse::<GridSize>(),
            Err(GridSizeError::Malformed {
                value: "3840".to_string()
            })
        );
        assert!("axb".parse::<GridSize>().is_err());
        assert!("0x10".parse::<GridSize>().is_err());
    }
}
