use crate::controllers::cli::errors::CliError;
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::actions::compute_grid::compute_grid::{ComputeConfig, ComputedGrid, compute_grid};
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::generate_pixel_buffer;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::fractals::mandelbrot::colour_maps::fire_gradient::MandelbrotFireGradient;
use crate::core::fractals::mandelbrot::colour_maps::hsb_gradient::MandelbrotHsbGradient;
use crate::core::fractals::mandelbrot::colour_maps::kinds::MandelbrotColourMapKinds;
use std::path::Path;
use tracing::info;

/// Computes a grid, colours it and hands the image to a file presenter.
pub struct CliRenderController<P: FilePresenterPort> {
    presenter: P,
    colour_map: MandelbrotColourMapKinds,
    rendered: Option<(ComputedGrid, PixelBuffer)>,
}

impl<P: FilePresenterPort> CliRenderController<P> {
    pub fn new(presenter: P) -> Self {
        Self {
            presenter,
            colour_map: MandelbrotColourMapKinds::default(),
            rendered: None,
        }
    }

    #[must_use]
    pub fn with_colour_map(mut self, colour_map: MandelbrotColourMapKinds) -> Self {
        self.colour_map = colour_map;
        self
    }

    pub fn generate(&mut self, config: &ComputeConfig) -> Result<&ComputedGrid, CliError> {
        let computed = compute_grid(config)?;
        let max_iterations = config.max_iterations;
        let buffer = match self.colour_map {
            MandelbrotColourMapKinds::HsbGradient => {
                generate_pixel_buffer(computed.grid(), &MandelbrotHsbGradient::new(max_iterations))?
            }
            MandelbrotColourMapKinds::FireGradient => {
                generate_pixel_buffer(computed.grid(), &MandelbrotFireGradient::new(max_iterations))?
            }
        };

        let (computed, _) = self.rendered.insert((computed, buffer));
        Ok(computed)
    }

    pub fn write(&self, filepath: impl AsRef<Path>) -> Result<(), CliError> {
        let (_, buffer) = self.rendered.as_ref().ok_or(CliError::NothingRendered)?;

        self.presenter.present(buffer, &filepath)?;
        info!(path = %filepath.as_ref().display(), "image saved");

        Ok(())
    }
}
