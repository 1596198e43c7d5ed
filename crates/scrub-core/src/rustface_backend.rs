//! Face detector backed by the `rustface` crate (SeetaFace engine).

use std::path::Path;

use image::GrayImage;

use crate::config::DetectorConfig;
use crate::detect::{DetectError, FaceDetector, FaceRegion};
use crate::error::ScrubError;

/// SeetaFace score above which a detection is treated as fully confident.
/// Scores are unbounded; this is an empirical saturation point.
const SCORE_SATURATION: f64 = 10.0;

/// Detector backed by a SeetaFace frontal-face model.
///
/// The model is loaded once at construction and shared read-only across
/// calls; each `detect` call instantiates its own detector state, so
/// concurrent invocations never race.
pub struct RustfaceDetector {
    model: rustface::Model,
    min_face_size: u32,
    score_threshold: f64,
}

impl std::fmt::Debug for RustfaceDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RustfaceDetector")
            .field("min_face_size", &self.min_face_size)
            .field("score_threshold", &self.score_threshold)
            .finish_non_exhaustive()
    }
}

impl RustfaceDetector {
    /// Load a SeetaFace model from disk.
    ///
    /// Fails with `DetectionFailure` if the file cannot be read or is not
    /// a valid model.
    pub fn from_model_file(path: &Path, config: &DetectorConfig) -> Result<Self, ScrubError> {
        let bytes = std::fs::read(path).map_err(|e| {
            ScrubError::DetectionFailure(format!("cannot read model {}: {e}", path.display()))
        })?;
        let model = rustface::read_model(std::io::Cursor::new(bytes)).map_err(|e| {
            ScrubError::DetectionFailure(format!("cannot parse model {}: {e}", path.display()))
        })?;
        Ok(Self {
            model,
            min_face_size: config.min_face_size,
            score_threshold: config.score_threshold,
        })
    }
}

impl FaceDetector for RustfaceDetector {
    fn detect(&self, gray: &GrayImage) -> Result<Vec<FaceRegion>, DetectError> {
        let (width, height) = gray.dimensions();
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(self.min_face_size);
        detector.set_score_thresh(self.score_threshold);
        detector.set_pyramid_scale_factor(0.8);
        detector.set_slide_window_step(4, 4);

        let faces = detector.detect(&rustface::ImageData::new(gray.as_raw(), width, height));

        let regions = faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                // SeetaFace may report boxes starting off-image; fold the
                // negative part away here, final clamping happens in the
                // pipeline against the buffer bounds.
                FaceRegion {
                    x: bbox.x().max(0) as u32,
                    y: bbox.y().max(0) as u32,
                    width: bbox.width(),
                    height: bbox.height(),
                    confidence: ((face.score() / SCORE_SATURATION).clamp(0.0, 1.0)) as f32,
                }
            })
            .collect();

        Ok(regions)
    }
}
