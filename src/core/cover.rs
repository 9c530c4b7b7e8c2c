//! Cover image preparation.
//!
//! Covers are scaled to fit within 500x500 (aspect kept, never upscaled).
//! Art picked from disk is stored as PNG; downloaded art keeps JPEG when it
//! arrived as JPEG.

use std::io::Cursor;
use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};

use super::error::{Error, Result};
use super::types::CoverArt;

pub const COVER_MAX_DIM: u32 = 500;

/// Image file extensions offered by the "Replace art" picker.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// MIME type from the first bytes of an image.
pub fn sniff_mime(data: &[u8]) -> &'static str {
    if data.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if data.starts_with(b"GIF8") {
        "image/gif"
    } else if data.starts_with(b"BM") {
        "image/bmp"
    } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "application/octet-stream"
    }
}

/// Load an image file, fit it to the cover box and encode as PNG.
pub fn prepare_cover_from_file(path: &Path) -> Result<CoverArt> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    let img = image::load_from_memory(&bytes)?;
    let img = fit(img);

    Ok(CoverArt {
        data: encode(&img, ImageFormat::Png)?,
        mime: "image/png".to_string(),
    })
}

/// Fit downloaded art into the cover box.
/// Art that already fits is returned untouched (no re-encode).
pub fn resize_cover(art: CoverArt) -> Result<CoverArt> {
    let img = image::load_from_memory(&art.data)?;
    let (w, h) = img.dimensions();
    if w <= COVER_MAX_DIM && h <= COVER_MAX_DIM {
        return Ok(art);
    }

    let img = fit(img);
    let (format, mime) = if sniff_mime(&art.data) == "image/jpeg" {
        (ImageFormat::Jpeg, "image/jpeg")
    } else {
        (ImageFormat::Png, "image/png")
    };

    Ok(CoverArt {
        data: encode(&img, format)?,
        mime: mime.to_string(),
    })
}

fn fit(img: DynamicImage) -> DynamicImage {
    let (w, h) = img.dimensions();
    if w <= COVER_MAX_DIM && h <= COVER_MAX_DIM {
        img
    } else {
        img.resize(COVER_MAX_DIM, COVER_MAX_DIM, FilterType::Lanczos3)
    }
}

fn encode(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    match format {
        // JPEG has no alpha channel.
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()).write_to(&mut out, format)?,
        _ => img.write_to(&mut out, format)?,
    }
    Ok(out.into_inner())
}
