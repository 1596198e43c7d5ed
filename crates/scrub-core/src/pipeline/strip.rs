//! Metadata stripping via pixel-only re-encoding.
//!
//! Rather than locating and excising metadata segments in place, the
//! stripper re-encodes the decoded pixel buffer from scratch: the encoders
//! below write only pixel data and mandatory container structure, so EXIF,
//! GPS, ICC, and XMP blocks are absent from the output, not zeroed.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ImageEncoder, RgbImage};

use crate::config::StripConfig;
use crate::error::{Result, ScrubError};

use super::decode::{DecodedImage, FormatTag};
use super::webp;

/// Produces pixel-equivalent re-encodings with all auxiliary metadata
/// segments removed.
pub struct MetadataStripper {
    config: StripConfig,
}

impl MetadataStripper {
    /// Create a stripper with the given re-encode settings.
    pub fn new(config: StripConfig) -> Self {
        Self { config }
    }

    /// Re-encode a decoded image into clean bytes in its original format.
    pub fn strip(&self, decoded: &DecodedImage) -> Result<Vec<u8>> {
        encode_clean(&decoded.pixels, decoded.format, self.config.jpeg_quality)
    }
}

/// Encode a pixel buffer to `format` with no metadata segments.
///
/// `jpeg_quality` applies only to JPEG; PNG and WebP are encoded lossless.
/// Shared by the strip stage and the identity-reset stage so every encode
/// in the pipeline goes through the same metadata-free path.
pub fn encode_clean(pixels: &RgbImage, format: FormatTag, jpeg_quality: u8) -> Result<Vec<u8>> {
    let (width, height) = pixels.dimensions();
    let mut buffer = Vec::new();

    match format {
        FormatTag::Jpeg => {
            JpegEncoder::new_with_quality(&mut buffer, jpeg_quality)
                .write_image(
                    pixels.as_raw(),
                    width,
                    height,
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| ScrubError::EncodingFailure(format!("jpeg encode: {e}")))?;
        }
        FormatTag::Png => {
            PngEncoder::new(&mut buffer)
                .write_image(
                    pixels.as_raw(),
                    width,
                    height,
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| ScrubError::EncodingFailure(format!("png encode: {e}")))?;
        }
        FormatTag::WebP => {
            WebPEncoder::new_lossless(&mut buffer)
                .write_image(
                    pixels.as_raw(),
                    width,
                    height,
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| ScrubError::EncodingFailure(format!("webp encode: {e}")))?;
            // Guard against the encoder emitting extended-format chunks
            buffer = webp::rewrap_minimal(&buffer);
        }
    }

    Ok(buffer)
}

/// Whether the raw input carries an EXIF block.
///
/// Reported to the caller so the audit record shows what was removed;
/// lenient by design — an unreadable EXIF block counts as absent.
pub fn has_exif(raw: &[u8]) -> bool {
    exif::Reader::new()
        .read_from_container(&mut Cursor::new(raw))
        .is_ok()
}
