//! Irreversible face redaction.

use image::{imageops, RgbImage};

use crate::config::RedactionConfig;
use crate::detect::FaceRegion;
use crate::error::{Result, ScrubError};

/// Applies a heavy Gaussian blur to face regions in place.
pub struct FaceRedactor {
    config: RedactionConfig,
}

impl FaceRedactor {
    /// Create a redactor with the given blur settings.
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    /// Blur every region into the pixel buffer.
    ///
    /// Regions are clamped to the buffer first; a region with nothing left
    /// inside the buffer is an `Internal` error (the detector broke its
    /// contract). A coverage mask guarantees each pixel is written at most
    /// once, so overlapping regions don't compound the blur. Zero regions
    /// is a no-op; pixels outside every region are never touched.
    pub fn redact(&self, pixels: &mut RgbImage, regions: &[FaceRegion]) -> Result<()> {
        if regions.is_empty() {
            return Ok(());
        }

        let (width, height) = pixels.dimensions();
        let mut covered = vec![false; (width as usize) * (height as usize)];

        for region in regions {
            let clamped = region.clamp_to(width, height).ok_or_else(|| {
                ScrubError::Internal(format!(
                    "face region {}x{}+{}+{} lies outside the {}x{} buffer",
                    region.width, region.height, region.x, region.y, width, height
                ))
            })?;

            let sigma = self.sigma_for(&clamped);
            let crop = imageops::crop_imm(
                &*pixels,
                clamped.x,
                clamped.y,
                clamped.width,
                clamped.height,
            )
            .to_image();
            let blurred = imageops::blur(&crop, sigma);

            for (dx, dy, pixel) in blurred.enumerate_pixels() {
                let x = clamped.x + dx;
                let y = clamped.y + dy;
                let idx = (y as usize) * (width as usize) + (x as usize);
                if !covered[idx] {
                    pixels.put_pixel(x, y, *pixel);
                    covered[idx] = true;
                }
            }
        }

        Ok(())
    }

    /// Blur strength for a region: proportional to its larger side, with a
    /// floor so small faces still lose all recoverable detail.
    fn sigma_for(&self, region: &FaceRegion) -> f32 {
        let side = region.width.max(region.height) as f32;
        (side * self.config.sigma_ratio).max(self.config.min_sigma)
    }
}
