use crate::core::data::colour::Colour;
use std::error::Error;

pub trait ColourMap: Send + Sync {
    type Failure: Error + Send + Sync + 'static;

    fn map(&self, iterations: u32) -> Result<Colour, Self::Failure>;
}
