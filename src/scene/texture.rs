use crate::io::tga::{DecodedImage, TextureError, load_tga};
use log::debug;
use std::path::Path;

/// Opaque identifier the presentation layer assigns to an uploaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Vertical layout of the pixel rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrder {
    TopDown,
    BottomUp,
}

/// Pixel data moved out of a [`Texture`] for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureUpload {
    pub width: u32,
    pub height: u32,
    pub has_alpha: bool,
    pub row_order: RowOrder,
    pub pixels: Vec<u8>,
}

impl TextureUpload {
    pub fn channels(&self) -> usize {
        if self.has_alpha { 4 } else { 3 }
    }
}

/// A 2D texture owned by a mesh.
///
/// The texture owns its pixels until [`Texture::take_upload`] moves them out to
/// the presentation layer. Afterwards only the metadata and the bound handle remain.
#[derive(Debug, Clone)]
pub struct Texture {
    width: u32,
    height: u32,
    has_alpha: bool,
    row_order: RowOrder,
    pixels: Option<Vec<u8>>,
    handle: Option<TextureHandle>,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        Ok(Self::from_decoded(load_tga(path)?))
    }

    pub fn from_decoded(image: DecodedImage) -> Self {
        Self {
            width: image.width,
            height: image.height,
            has_alpha: image.has_alpha,
            row_order: RowOrder::TopDown,
            pixels: Some(image.pixels),
            handle: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    pub fn row_order(&self) -> RowOrder {
        self.row_order
    }

    pub fn handle(&self) -> Option<TextureHandle> {
        self.handle
    }

    /// Pixel bytes, or `None` once they have been released for upload.
    pub fn pixels(&self) -> Option<&[u8]> {
        self.pixels.as_deref()
    }

    /// Reverses the row order in place (e.g. for APIs expecting bottom-up rows).
    pub fn flip_rows(&mut self) -> Result<(), TextureError> {
        let pixels = self.pixels.as_mut().ok_or(TextureError::AlreadyReleased)?;
        let stride = self.width as usize * if self.has_alpha { 4 } else { 3 };

        if stride > 0 {
            let flipped: Vec<u8> = pixels.chunks_exact(stride).rev().flatten().copied().collect();
            *pixels = flipped;
        }

        self.row_order = match self.row_order {
            RowOrder::TopDown => RowOrder::BottomUp,
            RowOrder::BottomUp => RowOrder::TopDown,
        };
        Ok(())
    }

    /// Moves the pixel buffer out for upload. Fails if it was already taken.
    pub fn take_upload(&mut self) -> Result<TextureUpload, TextureError> {
        let pixels = self.pixels.take().ok_or(TextureError::AlreadyReleased)?;
        debug!(
            "Releasing {} texture bytes ({}x{}) for upload",
            pixels.len(),
            self.width,
            self.height
        );

        Ok(TextureUpload {
            width: self.width,
            height: self.height,
            has_alpha: self.has_alpha,
            row_order: self.row_order,
            pixels,
        })
    }

    pub fn bind(&mut self, handle: TextureHandle) {
        self.handle = Some(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_row_texture() -> Texture {
        Texture::from_decoded(DecodedImage {
            width: 1,
            height: 2,
            has_alpha: false,
            pixels: vec![1, 2, 3, 4, 5, 6],
        })
    }

    #[test]
    fn upload_moves_pixels_out_exactly_once() {
        let mut texture = two_row_texture();
        let upload = texture.take_upload().unwrap();

        assert_eq!(upload.pixels, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(upload.channels(), 3);
        assert_eq!(upload.row_order, RowOrder::TopDown);
        assert!(texture.pixels().is_none());
        assert!(matches!(
            texture.take_upload(),
            Err(TextureError::AlreadyReleased)
        ));

        // Metadata survives the release.
        assert_eq!((texture.width(), texture.height()), (1, 2));
        texture.bind(TextureHandle(7));
        assert_eq!(texture.handle(), Some(TextureHandle(7)));
    }

    #[test]
    fn flipping_reverses_rows() {
        let mut texture = two_row_texture();
        texture.flip_rows().unwrap();
        assert_eq!(texture.pixels(), Some(&[4, 5, 6, 1, 2, 3][..]));
        assert_eq!(texture.row_order(), RowOrder::BottomUp);

        texture.take_upload().unwrap();
        assert!(matches!(
            texture.flip_rows(),
            Err(TextureError::AlreadyReleased)
        ));
    }
}
