use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::data::grid::Grid;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferData, PixelBufferError};
use rayon::prelude::*;
use std::error::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratePixelBufferError {
    #[error("colour map error: {0}")]
    ColourMap(#[source] Box<dyn Error + Send + Sync>),
    #[error("pixel buffer error: {0}")]
    PixelBuffer(#[from] PixelBufferError),
}

/// Colours every cell of a finished grid, in parallel.
pub fn generate_pixel_buffer<CMap: ColourMap>(
    grid: &Grid,
    mapper: &CMap,
) -> Result<PixelBuffer, GeneratePixelBufferError> {
    let colours = grid
        .cells()
        .par_iter()
        .map(|&iterations| mapper.map(iterations))
        .collect::<Result<Vec<Colour>, _>>()
        .map_err(|err| GeneratePixelBufferError::ColourMap(Box::new(err)))?;

    let buffer: PixelBufferData = colours
        .into_iter()
        .flat_map(|Colour { r, g, b }| [r, g, b])
        .collect();

    Ok(PixelBuffer::from_data(grid.size(), buffer)?)
}
