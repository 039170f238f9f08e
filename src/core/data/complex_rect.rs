use crate::core::data::complex::Complex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComplexRectError {
    #[error("complex rect size must be positive: {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
    #[error("expected 4 values as reMin:reMax:imMin:imMax, got {found}")]
    WrongValueCount { found: usize },
    #[error("could not parse rect bound {value:?}")]
    InvalidBound { value: String },
}

/// The target rectangle `[re_min, re_max] × [im_min, im_max]` on the complex plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ComplexRect {
    min: Complex,
    max: Complex,
}

impl ComplexRect {
    pub fn new(min: Complex, max: Complex) -> Result<Self, ComplexRectError> {
        let width = max.real - min.real;
        let height = max.imag - min.imag;

        // NaN bounds fail the comparison too
        if !(width > 0.0 && height > 0.0) {
            return Err(ComplexRectError::InvalidSize { width, height });
        }

        Ok(Self { min, max })
    }

    pub fn from_bounds(
        re_min: f64,
        re_max: f64,
        im_min: f64,
        im_max: f64,
    ) -> Result<Self, ComplexRectError> {
        Self::new(
            Complex {
                real: re_min,
                imag: im_min,
            },
            Complex {
                real: re_max,
                imag: im_max,
            },
        )
    }

    #[must_use]
    pub fn min(&self) -> Complex {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Complex {
        self.max
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.real - self.min.real
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.imag - self.min.imag
    }

    #[must_use]
    pub fn contains_point(&self, point: Complex) -> bool {
        self.min.real <= point.real
            && self.min.imag <= point.imag
            && self.max.real >= point.real
            && self.max.imag >= point.imag
    }
}

impl fmt::Display for ComplexRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.min.real, self.max.real, self.min.imag, self.max.imag
        )
    }
}

/// Parses `reMin:reMax:imMin:imMax`.
impl FromStr for ComplexRect {
    type Err = ComplexRectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bounds = s
            .split(':')
            .map(|value| {
                value
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| ComplexRectError::InvalidBound {
                        value: value.to_string(),
                    })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        match bounds[..] {
            [re_min, re_max, im_min, im_max] => Self::from_bounds(re_min, re_max, im_min, im_max),
            _ => Err(ComplexRectError::WrongValueCount {
                found: bounds.len(),
            }),
        }
    }
}
