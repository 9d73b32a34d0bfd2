use crate::core::framebuffer::FrameBuffer;
use image::{ImageBuffer, Rgb};
use log::info;
use std::path::Path;

/// Saves the color buffer to an image file; the format follows the extension.
///
/// Colors are clamped to [0, 1] and written without gamma correction.
pub fn save_framebuffer<P: AsRef<Path>>(fb: &FrameBuffer, path: P) -> Result<(), image::ImageError> {
    let mut img_buf = ImageBuffer::new(fb.width as u32, fb.height as u32);

    for (x, y, pixel) in img_buf.enumerate_pixels_mut() {
        if let Some(color) = fb.get_pixel(x as usize, y as usize) {
            *pixel = Rgb(color.to_rgb8());
        }
    }

    img_buf.save(path.as_ref())?;
    info!("Saved {}x{} image to '{}'", fb.width, fb.height, path.as_ref().display());
    Ok(())
}
