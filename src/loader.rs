//! Page extraction and decoding.

use image::{DynamicImage, ImageFormat, RgbaImage};
use std::path::Path;

use crate::error::{Error, Result};
use crate::io::ReadAt;
use crate::zip::ZipArchive;

/// A decoded page: RGBA8, non-premultiplied, row-major.
#[derive(Debug, Clone)]
pub struct DecodedPage {
    image: RgbaImage,
}

impl DecodedPage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel bytes, 4 per pixel
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.image.into_raw()
    }

    /// Write the page to `path`: JPEG for a `.jpg`/`.jpeg` path, PNG otherwise.
    ///
    /// JPEG has no alpha channel, so the alpha is dropped for JPEG output.
    pub fn save(&self, path: &Path) -> image::ImageResult<()> {
        match ImageFormat::from_path(path) {
            Ok(ImageFormat::Jpeg) => DynamicImage::ImageRgba8(self.image.clone())
                .to_rgb8()
                .save_with_format(path, ImageFormat::Jpeg),
            _ => self.image.save_with_format(path, ImageFormat::Png),
        }
    }
}

/// Extract `name` from `archive` and decode it into RGBA.
///
/// The format comes from the data's signature, not the entry's extension.
/// Every call extracts and decodes afresh.
pub fn load_page<R: ReadAt>(archive: &ZipArchive<R>, name: &str) -> Result<DecodedPage> {
    let bytes = archive.read_entry(name)?;
    decode_page(name, &bytes)
}

/// Decode raw page bytes; `name` is only used for error reporting.
pub fn decode_page(name: &str, bytes: &[u8]) -> Result<DecodedPage> {
    let format = image::guess_format(bytes)
        .map_err(|_| Error::corrupt(name, "unrecognised image data"))?;
    if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
        return Err(Error::corrupt(
            name,
            format!("unsupported image format {format:?}"),
        ));
    }

    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| Error::corrupt(name, e))?;

    Ok(DecodedPage {
        image: decoded.into_rgba8(),
    })
}
