use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImagingError {
    #[error("could not decode image bytes: {0}")]
    Decode(#[source] image::ImageError),
    #[error("could not encode image as PNG: {0}")]
    Encode(#[source] image::ImageError),
}

/// A bitmap normalized for transmission: 3-channel RGB, lossless PNG.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub fn detect_mime_type(data: &[u8]) -> Option<String> {
    infer::get(data).map(|kind| kind.mime_type().to_string())
}

/// Decode PNG or JPEG bytes, strip alpha/palette down to RGB8, and
/// re-encode as PNG. The backend accepts only plain 3-channel input, so
/// every upload and every response goes through here before it is used.
pub fn normalize_to_png(data: &[u8]) -> Result<NormalizedImage, ImagingError> {
    let decoded = image::load_from_memory(data).map_err(ImagingError::Decode)?;
    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());
    let mut png = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(ImagingError::Encode)?;
    Ok(NormalizedImage {
        png,
        width: rgb.width(),
        height: rgb.height(),
    })
}
