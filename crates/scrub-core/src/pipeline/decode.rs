//! Decoding and validation of raw input bytes.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageReader, RgbImage, RgbaImage};

use crate::config::LimitsConfig;
use crate::error::{Result, ScrubError};

/// Container format of the input, preserved through to the output encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTag {
    /// JPEG (lossy)
    Jpeg,
    /// PNG (lossless)
    Png,
    /// WebP (encoded lossless by this pipeline)
    WebP,
}

impl FormatTag {
    /// Lowercase name as it appears in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatTag::Jpeg => "jpeg",
            FormatTag::Png => "png",
            FormatTag::WebP => "webp",
        }
    }

    /// Canonical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatTag::Jpeg => "jpg",
            FormatTag::Png => "png",
            FormatTag::WebP => "webp",
        }
    }

    fn to_image_format(self) -> ImageFormat {
        match self {
            FormatTag::Jpeg => ImageFormat::Jpeg,
            FormatTag::Png => ImageFormat::Png,
            FormatTag::WebP => ImageFormat::WebP,
        }
    }
}

/// Result of decoding raw bytes.
#[derive(Debug)]
pub struct DecodedImage {
    /// The decoded pixel buffer, alpha flattened over white
    pub pixels: RgbImage,
    /// Detected container format
    pub format: FormatTag,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Turns raw bytes into a pixel buffer, rejecting anything malformed
/// before a transform runs.
pub struct Decoder {
    limits: LimitsConfig,
}

impl Decoder {
    /// Create a decoder with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Decode and validate an in-memory byte buffer.
    ///
    /// Checks, in order: non-empty, size limit, recognized container
    /// signature, header dimensions within `[min_dimension, max_dimension]`
    /// on each axis, full decode. Every failure is `InvalidInput`; nothing
    /// is retained on failure.
    pub fn decode(&self, raw: &[u8]) -> Result<DecodedImage> {
        if raw.is_empty() {
            return Err(ScrubError::InvalidInput("empty input buffer".into()));
        }

        let max_bytes = self.limits.max_input_mb * 1024 * 1024;
        if raw.len() as u64 > max_bytes {
            return Err(ScrubError::InvalidInput(format!(
                "input is {} bytes, limit is {}MB",
                raw.len(),
                self.limits.max_input_mb
            )));
        }

        let format = sniff_format(raw).ok_or_else(|| {
            ScrubError::InvalidInput("unrecognized container signature".into())
        })?;

        // Dimensions come from the header alone, so absurdly large images
        // are rejected before any pixel allocation.
        let (width, height) = ImageReader::with_format(Cursor::new(raw), format.to_image_format())
            .into_dimensions()
            .map_err(|e| ScrubError::InvalidInput(format!("cannot read dimensions: {e}")))?;

        for (axis, dim) in [("width", width), ("height", height)] {
            if dim < self.limits.min_dimension {
                return Err(ScrubError::InvalidInput(format!(
                    "{axis} {dim} is below the minimum of {}",
                    self.limits.min_dimension
                )));
            }
            if dim > self.limits.max_dimension {
                return Err(ScrubError::InvalidInput(format!(
                    "{axis} {dim} exceeds the maximum of {}",
                    self.limits.max_dimension
                )));
            }
        }

        let image = image::load_from_memory_with_format(raw, format.to_image_format())
            .map_err(|e| ScrubError::InvalidInput(format!("decode failed: {e}")))?;

        Ok(DecodedImage {
            pixels: flatten_alpha(&image),
            format,
            width,
            height,
        })
    }
}

/// Detect the container format from magic bytes.
///
/// Only formats the pipeline can re-encode are recognized; anything else
/// is treated as unsupported input.
pub fn sniff_format(raw: &[u8]) -> Option<FormatTag> {
    if raw.len() < 4 {
        return None;
    }

    // JPEG: FF D8 FF
    if raw[0] == 0xFF && raw[1] == 0xD8 && raw[2] == 0xFF {
        return Some(FormatTag::Jpeg);
    }

    // PNG: 89 50 4E 47
    if raw[0] == 0x89 && raw[1] == b'P' && raw[2] == b'N' && raw[3] == b'G' {
        return Some(FormatTag::Png);
    }

    // WebP: RIFF....WEBP
    if raw.len() >= 12 && &raw[0..4] == b"RIFF" && &raw[8..12] == b"WEBP" {
        return Some(FormatTag::WebP);
    }

    None
}

/// Flatten any alpha channel by compositing onto white.
///
/// The pipeline works on RGB throughout; JPEG cannot carry alpha and the
/// redaction/resize stages don't need it.
fn flatten_alpha(image: &DynamicImage) -> RgbImage {
    match image {
        DynamicImage::ImageRgb8(rgb) => rgb.clone(),
        _ => {
            let rgba: RgbaImage = image.to_rgba8();
            let (width, height) = rgba.dimensions();
            let mut rgb = RgbImage::new(width, height);
            for (x, y, pixel) in rgba.enumerate_pixels() {
                let [r, g, b, a] = pixel.0;
                let alpha = a as f32 / 255.0;
                let inv = 1.0 - alpha;
                rgb.put_pixel(
                    x,
                    y,
                    image::Rgb([
                        (r as f32 * alpha + 255.0 * inv).round() as u8,
                        (g as f32 * alpha + 255.0 * inv).round() as u8,
                        (b as f32 * alpha + 255.0 * inv).round() as u8,
                    ]),
                );
            }
            rgb
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use image::codecs::png::PngEncoder;
    use image::ImageEncoder;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let mut img = RgbImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = image::Rgb([(x % 256) as u8, (y % 256) as u8, 128]);
        }
        let mut buffer = Vec::new();
        PngEncoder::new(&mut buffer)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
        buffer
    }

    fn decoder() -> Decoder {
        Decoder::new(LimitsConfig::default())
    }

    #[test]
    fn decodes_valid_png() {
        let decoded = decoder().decode(&encode_png(64, 48)).unwrap();
        assert_eq!(decoded.format, FormatTag::Png);
        assert_eq!((decoded.width, decoded.height), (64, 48));
        assert_eq!(decoded.pixels.dimensions(), (64, 48));
    }

    #[test]
    fn empty_input_is_invalid() {
        let err = decoder().decode(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn garbage_input_is_invalid() {
        let err = decoder().decode(b"definitely not an image").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn truncated_header_is_invalid() {
        let png = encode_png(64, 48);
        let err = decoder().decode(&png[..16]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn one_by_one_is_below_minimum() {
        // Pinned boundary: 1×1 fails the min_dimension floor of 8.
        let err = decoder().decode(&encode_png(1, 1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn oversized_dimensions_are_invalid() {
        let mut limits = LimitsConfig::default();
        limits.max_dimension = 32;
        let err = Decoder::new(limits).decode(&encode_png(64, 16)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn oversized_buffer_is_invalid() {
        let mut limits = LimitsConfig::default();
        limits.max_input_mb = 1;
        let blob = vec![0xFFu8; 2 * 1024 * 1024];
        let err = Decoder::new(limits).decode(&blob).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn sniff_recognizes_the_three_formats() {
        assert_eq!(sniff_format(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(FormatTag::Jpeg));
        assert_eq!(
            sniff_format(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
            Some(FormatTag::Png)
        );
        let webp = *b"RIFF\x00\x00\x00\x00WEBP";
        assert_eq!(sniff_format(&webp), Some(FormatTag::WebP));
        assert_eq!(sniff_format(b"GIF89a"), None);
    }

    #[test]
    fn flatten_composites_transparent_over_white() {
        let mut rgba = RgbaImage::new(1, 1);
        rgba.put_pixel(0, 0, image::Rgba([255, 0, 0, 0]));
        let rgb = flatten_alpha(&DynamicImage::ImageRgba8(rgba));
        assert_eq!(rgb.get_pixel(0, 0), &image::Rgb([255, 255, 255]));
    }

    #[test]
    fn flatten_keeps_opaque_pixels() {
        let mut rgba = RgbaImage::new(1, 1);
        rgba.put_pixel(0, 0, image::Rgba([10, 20, 30, 255]));
        let rgb = flatten_alpha(&DynamicImage::ImageRgba8(rgba));
        assert_eq!(rgb.get_pixel(0, 0), &image::Rgb([10, 20, 30]));
    }
}
