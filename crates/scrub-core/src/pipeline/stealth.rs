//! Identity-reset transform ("stealth mode").
//!
//! A fixed-ratio downscale plus a fresh encode pass, sized so the output
//! bytes can never reproduce the input: the geometry shrinks on every axis
//! of at least 2 pixels, and the JPEG quality differs from the strip
//! stage's, so even a face-free, metadata-free input re-encodes to
//! different bytes.

use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::config::StealthConfig;
use crate::error::Result;

use super::decode::FormatTag;
use super::strip;

/// Output of the identity-reset stage.
pub struct ResetImage {
    /// Final encoded bytes
    pub bytes: Vec<u8>,
    /// Output width after the downscale
    pub width: u32,
    /// Output height after the downscale
    pub height: u32,
}

/// Deterministic content-changing downscale + re-encode.
pub struct IdentityReset {
    config: StealthConfig,
}

impl IdentityReset {
    /// Create the transform with the given settings.
    ///
    /// `config.scale_ratio` must already be validated to lie in (0, 1].
    pub fn new(config: StealthConfig) -> Self {
        Self { config }
    }

    /// Downscale each axis to `floor(dim × scale_ratio)` (1-pixel floor,
    /// never upscaling) with Lanczos3, then encode in the input's format.
    pub fn apply(&self, pixels: &RgbImage, format: FormatTag) -> Result<ResetImage> {
        let (width, height) = pixels.dimensions();
        let new_width = self.scaled(width);
        let new_height = self.scaled(height);

        let resized = imageops::resize(pixels, new_width, new_height, FilterType::Lanczos3);
        let bytes = strip::encode_clean(&resized, format, self.config.jpeg_quality)?;

        Ok(ResetImage {
            bytes,
            width: new_width,
            height: new_height,
        })
    }

    fn scaled(&self, dim: u32) -> u32 {
        ((dim as f64 * self.config.scale_ratio).floor() as u32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint;

    fn gradient(width: u32, height: u32) -> RgbImage {
        let mut img = RgbImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = image::Rgb([(x % 256) as u8, (y % 256) as u8, 64]);
        }
        img
    }

    fn reset() -> IdentityReset {
        IdentityReset::new(StealthConfig::default())
    }

    #[test]
    fn dimensions_use_floor_rounding() {
        let out = reset().apply(&gradient(100, 200), FormatTag::Png).unwrap();
        assert_eq!((out.width, out.height), (99, 198));
    }

    #[test]
    fn every_axis_of_at_least_two_shrinks() {
        for dim in [2u32, 8, 50, 99, 100, 101] {
            let out = reset().apply(&gradient(dim, dim), FormatTag::Png).unwrap();
            assert!(out.width < dim, "width {dim} did not shrink");
            assert!(out.height < dim, "height {dim} did not shrink");
        }
    }

    #[test]
    fn never_reaches_zero() {
        let mut config = StealthConfig::default();
        config.scale_ratio = 0.1;
        let out = IdentityReset::new(config)
            .apply(&gradient(4, 4), FormatTag::Png)
            .unwrap();
        assert_eq!((out.width, out.height), (1, 1));
    }

    #[test]
    fn output_digest_differs_from_clean_encode() {
        // Even starting from this pipeline's own clean PNG encode, the
        // downscale forces different bytes.
        let img = gradient(64, 64);
        let clean = strip::encode_clean(&img, FormatTag::Png, 92).unwrap();
        let out = reset().apply(&img, FormatTag::Png).unwrap();
        assert_ne!(
            fingerprint::digest_hex(&clean),
            fingerprint::digest_hex(&out.bytes)
        );
    }

    #[test]
    fn transform_is_deterministic() {
        let img = gradient(48, 48);
        let a = reset().apply(&img, FormatTag::Jpeg).unwrap();
        let b = reset().apply(&img, FormatTag::Jpeg).unwrap();
        assert_eq!(a.bytes, b.bytes);
    }
}
