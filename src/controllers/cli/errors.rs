use crate::core::actions::compute_grid::compute_grid::ComputeError;
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::GeneratePixelBufferError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Compute(#[from] ComputeError),
    #[error(transparent)]
    Colour(#[from] GeneratePixelBufferError),
    #[error("failed to write image: {0}")]
    Io(#[from] io::Error),
    #[error("nothing has been rendered yet")]
    NothingRendered,
}
