use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Writes pixel buffers as binary PPM (`P6`) images.
#[derive(Debug, Default)]
pub struct PpmFilePresenter {}

impl PpmFilePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    pub fn encode<W: Write>(buffer: &PixelBuffer, mut out: W) -> io::Result<()> {
        // P6 means binary RGB, then width, height and max colour value
        writeln!(out, "P6")?;
        writeln!(out, "{} {}", buffer.size().width(), buffer.size().height())?;
        writeln!(out, "255")?;
        out.write_all(buffer.buffer())?;
        out.flush()
    }
}

impl FilePresenterPort for PpmFilePresenter {
    fn present(&self, buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> io::Result<()> {
        let filepath = filepath.as_ref();

        if let Some(parent) = filepath.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        Self::encode(buffer, BufWriter::new(File::create(filepath)?))?;
        debug!(path = %filepath.display(), bytes = buffer.buffer().len(), "ppm written");

        Ok(())
    }
}
