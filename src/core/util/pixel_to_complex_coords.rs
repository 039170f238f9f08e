use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::data::grid_size::GridSize;
use crate::core::data::point::Point;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum PixelToComplexCoordsError {
    #[error("point {point} is outside the {size} grid")]
    PointOutsideGrid { point: Point, size: GridSize },
}

/// Maps a grid cell onto the complex plane.
///
/// `re = re_min + (x / width) * (re_max - re_min)` and likewise for `im` with
/// `y / height`, so cell `(0, 0)` lands exactly on the rect's minimum corner and
/// the maximum corner itself is never sampled.
pub fn pixel_to_complex_coords(
    point: Point,
    size: GridSize,
    complex_rect: ComplexRect,
) -> Result<Complex, PixelToComplexCoordsError> {
    if !size.contains_point(point) {
        return Err(PixelToComplexCoordsError::PointOutsideGrid { point, size });
    }

    let real = complex_rect.min().real
        + (point.x as f64 / size.width() as f64) * complex_rect.width();
    let imag = complex_rect.min().imag
        + (point.y as f64 / size.height() as f64) * complex_rect.height();

    Ok(Complex { real, imag })
}
