use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Seek};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to open texture '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode TGA image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("texture pixels were already handed to the presentation layer")]
    AlreadyReleased,
}

/// Pixel data of a decoded TGA file.
///
/// Rows run top to bottom. Channels are RGB, or RGBA when `has_alpha` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub has_alpha: bool,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn channels(&self) -> usize {
        if self.has_alpha { 4 } else { 3 }
    }
}

/// Decodes an uncompressed or RLE true-color TGA file.
pub fn load_tga<P: AsRef<Path>>(path: P) -> Result<DecodedImage, TextureError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TextureError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let decoded = decode_reader(BufReader::new(file))?;
    info!(
        "Loaded texture: {} ({}x{}, {} bytes, alpha: {})",
        path.display(),
        decoded.width,
        decoded.height,
        decoded.pixels.len(),
        decoded.has_alpha
    );
    Ok(decoded)
}

/// Decodes TGA data already held in memory.
pub fn decode_tga(bytes: &[u8]) -> Result<DecodedImage, TextureError> {
    decode_reader(Cursor::new(bytes))
}

fn decode_reader<R: BufRead + Seek>(reader: R) -> Result<DecodedImage, TextureError> {
    // The format is forced: TGA has no magic number to sniff.
    let image = ImageReader::with_format(reader, ImageFormat::Tga).decode()?;
    Ok(into_decoded(image))
}

fn into_decoded(image: DynamicImage) -> DecodedImage {
    let (width, height) = image.dimensions();
    let color = image.color();
    debug!("TGA color type: {color:?}");

    let has_alpha = color.has_alpha();
    let pixels = if has_alpha {
        image.into_rgba8().into_raw()
    } else {
        image.into_rgb8().into_raw()
    };

    DecodedImage {
        width,
        height,
        has_alpha,
        pixels,
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn decodes_uncompressed_24_bit() {
        let data = uncompressed_rgb(2, 1, &[[255, 0, 0], [0, 128, 255]]);
        let image = decode_tga(&data).unwrap();

        assert_eq!((image.width, image.height), (2, 1));
        assert!(!image.has_alpha);
        assert_eq!(image.channels(), 3);
        assert_eq!(image.pixels, vec![255, 0, 0, 0, 128, 255]);
    }

    #[test]
    fn decodes_rle_24_bit() {
        let mut data = header(10, 3, 1, 24);
        // One run packet repeating a single BGR pixel three times.
        data.extend_from_slice(&[0x82, 30, 20, 10]);

        let image = decode_tga(&data).unwrap();
        assert_eq!((image.width, image.height), (3, 1));
        assert_eq!(image.pixels, vec![10, 20, 30, 10, 20, 30, 10, 20, 30]);
    }

    #[test]
    fn decodes_32_bit_with_alpha() {
        let mut data = header(2, 1, 1, 32);
        data.extend_from_slice(&[1, 2, 3, 200]);

        let image = decode_tga(&data).unwrap();
        assert!(image.has_alpha);
        assert_eq!(image.channels(), 4);
        assert_eq!(image.pixels, vec![3, 2, 1, 200]);
    }

    #[test]
    fn bottom_left_origin_is_returned_top_down() {
        let mut data = header(2, 1, 2, 24);
        // Clear the top-left origin bit: rows are stored bottom row first.
        data[17] &= !0x20;
        // Bottom row red, top row blue (BGR).
        data.extend_from_slice(&[0, 0, 255, 255, 0, 0]);

        let image = decode_tga(&data).unwrap();
        assert_eq!((image.width, image.height), (1, 2));
        assert_eq!(image.pixels, vec![0, 0, 255, 255, 0, 0]);
    }

    #[test]
    fn truncated_data_fails_to_decode() {
        let mut data = header(2, 4, 4, 24);
        data.extend_from_slice(&[0, 0, 0]);
        assert!(matches!(decode_tga(&data), Err(TextureError::Decode(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_tga(dir.path().join("missing.tga")).unwrap_err();
        assert!(matches!(err, TextureError::Io { .. }));
    }
}
