use crate::core::actions::compute_grid::ports::cell_kernel::CellKernel;
use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::data::grid_size::GridSize;
use crate::core::data::point::Point;
use crate::core::fractals::mandelbrot::errors::MandelbrotError;
use crate::core::util::pixel_to_complex_coords::{
    PixelToComplexCoordsError, pixel_to_complex_coords,
};

/// Escape-time iteration count for `c`.
///
/// Iterates `z = z² + c` from `z = 0` while `|z| <= 2` and fewer than
/// `max_iterations` steps have run. Points inside the set return
/// `max_iterations`.
#[must_use]
pub fn escape_time(c: Complex, max_iterations: u32) -> u32 {
    let mut z = Complex::ZERO;
    let mut iterations = 0;

    while z.magnitude_squared() <= 4.0 && iterations < max_iterations {
        z = z.square() + c;
        iterations += 1;
    }

    iterations
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MandelbrotKernel {
    size: GridSize,
    complex_rect: ComplexRect,
    max_iterations: u32,
}

impl MandelbrotKernel {
    pub fn new(
        size: GridSize,
        complex_rect: ComplexRect,
        max_iterations: u32,
    ) -> Result<Self, MandelbrotError> {
        if max_iterations == 0 {
            return Err(MandelbrotError::ZeroMaxIterations);
        }

        Ok(Self {
            size,
            complex_rect,
            max_iterations,
        })
    }
}

impl CellKernel for MandelbrotKernel {
    type Failure = PixelToComplexCoordsError;

    fn cell_value(&self, point: Point) -> Result<u32, Self::Failure> {
        let c = pixel_to_complex_coords(point, self.size, self.complex_rect)?;

        Ok(escape_time(c, self.max_iterations))
    }
}
