use crate::core::data::pixel_buffer::PixelBuffer;
use std::io;
use std::path::Path;

pub trait FilePresenterPort {
    fn present(&self, buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> io::Result<()>;
}
