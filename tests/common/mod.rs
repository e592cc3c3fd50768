use anyhow::Result;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;

/// Encode a `width` x `height` PNG filled with a shade derived from `seed`.
pub fn png_page(width: u32, height: u32, seed: u8) -> Vec<u8> {
    let image = ImageBuffer::from_pixel(width, height, Rgb([seed, seed / 2, 255 - seed]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image)
        .write_to(&mut buf, ImageFormat::Png)
        .expect("encode png");
    buf.into_inner()
}

/// Write a deflate-compressed archive named `name` into `dir`.
pub fn write_archive(dir: &Path, name: &str, entries: &[(&str, Vec<u8>)]) -> Result<PathBuf> {
    let path = dir.join(name);
    let mut writer = zip::ZipWriter::new(std::fs::File::create(&path)?);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (entry, data) in entries {
        writer.start_file(*entry, options)?;
        writer.write_all(data)?;
    }
    writer.finish()?;
    Ok(path)
}
