use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::colour_maps::errors::MandelbrotColourMapError;

const HUE_OFFSET: f32 = 100.0;
const HUE_STEP: f32 = 1.7;
const HUE_SCALE: f32 = 256.0;
const SATURATION: f32 = 0.77;
const BRIGHTNESS_KNEE: f32 = 2.5;

/// Hue cycles with the iteration count while brightness climbs from black
/// towards full; interior cells are black.
#[derive(Debug, Clone, Copy)]
pub struct MandelbrotHsbGradient {
    max_iterations: u32,
}

impl MandelbrotHsbGradient {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}

impl ColourMap for MandelbrotHsbGradient {
    type Failure = MandelbrotColourMapError;

    fn map(&self, iterations: u32) -> Result<Colour, Self::Failure> {
        if iterations > self.max_iterations {
            return Err(MandelbrotColourMapError::IterationsExceedMax {
                iterations,
                max_iterations: self.max_iterations,
            });
        }

        if iterations == self.max_iterations {
            return Ok(Colour::BLACK);
        }

        let i = iterations as f32;
        let hue = (HUE_OFFSET + HUE_STEP * i) / HUE_SCALE;
        let brightness = i / (i + BRIGHTNESS_KNEE);

        Ok(hsb_to_rgb(hue, SATURATION, brightness))
    }
}

/// Converts hue, saturation and brightness in `[0, 1]` to RGB. Only the
/// fractional part of `hue` is used, so hues wrap around the colour wheel.
fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> Colour {
    let channel = |value: f32| (value * 255.0 + 0.5) as u8;

    if saturation == 0.0 {
        let grey = channel(brightness);
        return Colour {
            r: grey,
            g: grey,
            b: grey,
        };
    }

    let sector = (hue - hue.floor()) * 6.0;
    let fraction = sector - sector.floor();
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * fraction);
    let t = brightness * (1.0 - saturation * (1.0 - fraction));

    let (r, g, b) = match sector as u32 {
        0 => (brightness, t, p),
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        _ => (brightness, p, q),
    };

    Colour {
        r: channel(r),
        g: channel(g),
        b: channel(b),
    }
}
