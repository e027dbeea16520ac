// THEORY:
// The sampler is the bridge between a decoded raster and the quantizer. It flattens
// the 2D grid into one `Vec<Color>` in row-major order (row 0 first, each row left to
// right), reading every pixel at 16-bit precision so that 8-bit and 16-bit sources go
// through the same downsampling path.

pub mod sampler {
    use crate::core_modules::color::color::Color;
    use crate::error::{ColorError, Result};
    use image::{DynamicImage, GenericImageView};

    /// Produces exactly `width * height` colors. Fails on a zero-sized image.
    pub fn sample_pixels(image: &DynamicImage) -> Result<Vec<Color>> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(ColorError::DegenerateInput { width, height });
        }

        let wide = image.to_rgba16();
        let pixels = wide
            .pixels()
            .map(|pixel| {
                let [red, green, blue, alpha] = pixel.0;
                Color::from_rgba16(red, green, blue, alpha)
            })
            .collect();

        Ok(pixels)
    }
}
