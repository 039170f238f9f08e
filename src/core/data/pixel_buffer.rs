use crate::core::data::grid_size::GridSize;
use thiserror::Error;

pub const BYTES_PER_PIXEL: usize = 3;

fn grid_size_to_buffer_size(size: GridSize) -> usize {
    size.cell_count() * BYTES_PER_PIXEL
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PixelBufferError {
    #[error("image size {expected} does not match buffer size {buffer_size}")]
    BoundsMismatch { expected: usize, buffer_size: usize },
}

pub type PixelBufferData = Vec<u8>;

/// Packed RGB bytes, one pixel per grid cell, row-major.
#[derive(Debug)]
pub struct PixelBuffer {
    size: GridSize,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            buffer: vec![0; grid_size_to_buffer_size(size)],
        }
    }

    pub fn from_data(size: GridSize, buffer: PixelBufferData) -> Result<Self, PixelBufferError> {
        let expected = grid_size_to_buffer_size(size);

        if expected != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                expected,
                buffer_size: buffer.len(),
            });
        }

        Ok(Self { size, buffer })
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn buffer(&self) -> &PixelBufferData {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(width: u32, height: u32) -> GridSize {
        GridSize::new(width, height).unwrap()
    }

    #[test]
    fn test_new_creates_zeroed_buffer() {
        let buffer = PixelBuffer::new(size(10, 10));

        assert_eq!(buffer.buffer().len(), 300);
        assert!(buffer.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_from_data_valid() {
        let data: Vec<u8> = vec![
            255, 0, 0, // (0,0) red
            0, 255, 0, // (1,0) green
            0, 0, 255, // (0,1) blue
            255, 255, 0, // (1,1) yellow
        ];

        let buffer = PixelBuffer::from_data(size(2, 2), data.clone()).unwrap();

        assert_eq!(buffer.size(), size(2, 2));
        assert_eq!(buffer.buffer(), &data);
    }

    #[test]
    fn test_from_data_buffer_wrong_size() {
        let result = PixelBuffer::from_data(size(2, 2), vec![255, 0, 0]);

        assert_eq!(
            result.unwrap_err(),
            PixelBufferError::BoundsMismatch {
                expected: 12,
                buffer_size: 3
            }
        );
    }
}
