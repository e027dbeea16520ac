pub mod image_helper {
    use image::{DynamicImage, ImageFormat};
    use std::io::Cursor;

    /// Decodes bytes of any format the `image` crate can sniff.
    pub fn decode(bytes: &[u8]) -> Result<DynamicImage, image::error::ImageError> {
        image::load_from_memory(bytes)
    }

    /// Encodes an image as PNG, keeping its bit depth.
    pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, image::error::ImageError> {
        let mut output = Cursor::new(Vec::new());
        image.write_to(&mut output, ImageFormat::Png)?;

        Ok(output.into_inner())
    }
}
