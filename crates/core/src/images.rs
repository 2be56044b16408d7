//! Image post-processing for uploaded item pictures.
//!
//! Uploaded images are resized to fit within 800x600 (never enlarged) and
//! re-encoded as JPEG, and a 200x150 crop-to-fill thumbnail is produced
//! alongside. Processing is best-effort: if the bytes cannot be decoded or
//! re-encoded, the original upload is kept untouched.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

/// Maximum stored image width after processing.
pub const MAX_WIDTH: u32 = 800;
/// Maximum stored image height after processing.
pub const MAX_HEIGHT: u32 = 600;
/// JPEG quality for the main image.
const MAIN_QUALITY: u8 = 80;

/// Thumbnail dimensions (crop-to-fill).
pub const THUMB_WIDTH: u32 = 200;
pub const THUMB_HEIGHT: u32 = 150;
/// JPEG quality for the thumbnail.
const THUMB_QUALITY: u8 = 70;

/// Which path the pipeline took for a given upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOutcome {
    /// The image was decoded, resized, and re-encoded.
    Processed,
    /// Processing failed; the original bytes were kept verbatim.
    Fallback,
}

/// Result of running an upload through the image pipeline.
#[derive(Debug)]
pub struct ProcessedImage {
    /// Bytes to store as the item image.
    pub bytes: Vec<u8>,
    /// Thumbnail bytes, present only when processing succeeded.
    pub thumbnail: Option<Vec<u8>>,
    pub outcome: ImageOutcome,
}

/// Run an uploaded image through the resize/re-encode pipeline.
///
/// Never fails: any decode or encode error falls back to the original
/// bytes with [`ImageOutcome::Fallback`].
pub fn process(original: &[u8]) -> ProcessedImage {
    match try_process(original) {
        Ok((bytes, thumbnail)) => ProcessedImage {
            bytes,
            thumbnail: Some(thumbnail),
            outcome: ImageOutcome::Processed,
        },
        Err(err) => {
            tracing::warn!(error = %err, "Image processing failed, keeping original upload");
            ProcessedImage {
                bytes: original.to_vec(),
                thumbnail: None,
                outcome: ImageOutcome::Fallback,
            }
        }
    }
}

fn try_process(original: &[u8]) -> Result<(Vec<u8>, Vec<u8>), image::ImageError> {
    let decoded = image::load_from_memory(original)?;

    // Fit within the bounding box without enlarging smaller images.
    let main = if decoded.width() > MAX_WIDTH || decoded.height() > MAX_HEIGHT {
        decoded.resize(MAX_WIDTH, MAX_HEIGHT, FilterType::Lanczos3)
    } else {
        decoded.clone()
    };

    let thumb = decoded.resize_to_fill(THUMB_WIDTH, THUMB_HEIGHT, FilterType::Lanczos3);

    Ok((encode_jpeg(&main, MAIN_QUALITY)?, encode_jpeg(&thumb, THUMB_QUALITY)?))
}

/// Encode as JPEG at the given quality. JPEG has no alpha channel, so the
/// image is flattened to RGB first.
fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, image::ImageError> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut buf), quality);
    rgb.write_with_encoder(encoder)?;
    Ok(buf)
}
