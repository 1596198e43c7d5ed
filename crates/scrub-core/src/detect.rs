//! Face detection contract and region geometry.

use image::GrayImage;

/// Error type a detector backend may return.
pub type DetectError = Box<dyn std::error::Error + Send + Sync>;

/// Axis-aligned face bounding box in pixel coordinates.
///
/// Produced by a [`FaceDetector`]; region order is whatever the backend
/// emitted and carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceRegion {
    /// X coordinate of the top-left corner.
    pub x: u32,
    /// Y coordinate of the top-left corner.
    pub y: u32,
    /// Region width in pixels.
    pub width: u32,
    /// Region height in pixels.
    pub height: u32,
    /// Detection confidence in `[0, 1]`.
    pub confidence: f32,
}

impl FaceRegion {
    /// Clamp this region to an image of `width` × `height` pixels.
    ///
    /// Returns `None` if nothing of the region remains inside the image —
    /// the pipeline treats that as an invariant violation on the backend's
    /// part. Confidence is clamped into `[0, 1]` at the same time.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<FaceRegion> {
        if self.x >= width || self.y >= height {
            return None;
        }
        let w = self.width.min(width - self.x);
        let h = self.height.min(height - self.y);
        if w == 0 || h == 0 {
            return None;
        }
        Some(FaceRegion {
            x: self.x,
            y: self.y,
            width: w,
            height: h,
            confidence: self.confidence.clamp(0.0, 1.0),
        })
    }
}

/// Pluggable face detection backend.
///
/// The pipeline depends only on this contract, not on any specific
/// algorithm. Implementations must be deterministic for a fixed input
/// buffer and fixed model state, and must return an empty vec (not an
/// error) when no faces are present.
pub trait FaceDetector: Send + Sync {
    /// Detect faces in a grayscale view of the pixel buffer.
    fn detect(&self, gray: &GrayImage) -> Result<Vec<FaceRegion>, DetectError>;
}

/// Detector that never finds a face.
///
/// Used when no model is configured; scrubbing still strips metadata and
/// resets the content hash.
pub struct NoopDetector;

impl FaceDetector for NoopDetector {
    fn detect(&self, _gray: &GrayImage) -> Result<Vec<FaceRegion>, DetectError> {
        Ok(Vec::new())
    }
}
