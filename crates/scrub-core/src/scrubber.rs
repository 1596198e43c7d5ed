//! Pipeline orchestration - wires the stages into one atomic operation.

use std::sync::Arc;
use std::time::Instant;

use image::{imageops, RgbImage};

use crate::config::Config;
use crate::detect::FaceDetector;
use crate::error::{ConfigError, Result, ScrubError};
use crate::fingerprint;
use crate::pipeline::{strip, Decoder, FaceRedactor, IdentityReset, MetadataStripper};
use crate::types::{ScrubOutput, ScrubReport, ScrubSummary};

/// The privacy scrubber: strips metadata, blurs faces, and resets the
/// content fingerprint of a single image, entirely in memory.
///
/// A `Scrubber` is stateless across calls and safe to share between
/// threads: every invocation builds its own pixel buffer and report, and
/// the one shared resource — the detector — is read-only after
/// construction. Nothing is ever written to persistent storage.
pub struct Scrubber {
    decoder: Decoder,
    stripper: MetadataStripper,
    redactor: FaceRedactor,
    stealth: IdentityReset,
    detector: Arc<dyn FaceDetector>,
}

impl Scrubber {
    /// Build a scrubber from a validated configuration and a detector.
    ///
    /// Configurations that would break pipeline invariants (an upscaling
    /// stealth ratio, a sub-2-pixel minimum dimension) are rejected here.
    pub fn new(config: Config, detector: Arc<dyn FaceDetector>) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            decoder: Decoder::new(config.limits.clone()),
            stripper: MetadataStripper::new(config.strip.clone()),
            redactor: FaceRedactor::new(config.redaction.clone()),
            stealth: IdentityReset::new(config.stealth.clone()),
            detector,
        })
    }

    /// Run the full pipeline on raw encoded image bytes.
    ///
    /// Strictly ordered: hash the raw input → decode + validate → strip
    /// metadata → detect faces on the clean content → redact → identity
    /// reset → hash the final bytes → assemble the report. If any step
    /// fails, the error is the only thing the caller observes — no bytes,
    /// no report, no partial state.
    pub fn process(&self, raw: &[u8]) -> Result<ScrubOutput> {
        let start = Instant::now();

        // Audit hash of the input as received, before any transform
        let original_hash = fingerprint::digest_hex(raw);
        let had_metadata = strip::has_exif(raw);

        let decoded = self.decoder.decode(raw)?;
        tracing::trace!(
            width = decoded.width,
            height = decoded.height,
            format = decoded.format.as_str(),
            "decoded input"
        );

        // Pixel-only re-encode; the original raw bytes are never read again
        let clean = self.stripper.strip(&decoded)?;

        // Detection and redaction operate on the clean content — for lossy
        // formats that is exactly what the output will carry
        let mut pixels = reload_clean(&clean)?;
        let gray = imageops::grayscale(&pixels);
        let regions = self
            .detector
            .detect(&gray)
            .map_err(|e| ScrubError::DetectionFailure(e.to_string()))?;
        let faces_detected = regions.len();
        tracing::trace!(faces = faces_detected, "detection complete");

        self.redactor.redact(&mut pixels, &regions)?;

        let reset = self.stealth.apply(&pixels, decoded.format)?;
        let new_hash = fingerprint::digest_hex(&reset.bytes);

        // Stealth-mode invariant: the output must never be byte-identical
        // to the input
        if new_hash == original_hash {
            return Err(ScrubError::Internal(
                "identity reset produced byte-identical output".into(),
            ));
        }

        let elapsed = start.elapsed();
        tracing::debug!(
            faces = faces_detected,
            in_bytes = raw.len(),
            out_bytes = reset.bytes.len(),
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "scrub complete"
        );

        let report = ScrubReport {
            faces_detected,
            original_hash,
            new_hash,
            original_size: raw.len(),
            new_size: reset.bytes.len(),
            width_before: decoded.width,
            height_before: decoded.height,
            width_after: reset.width,
            height_after: reset.height,
            format: decoded.format.as_str().to_string(),
            metadata_removed: had_metadata,
            processing_time_ms: elapsed.as_secs_f64() * 1000.0,
        };

        Ok(ScrubOutput {
            bytes: reset.bytes,
            report,
        })
    }

    /// Inspect an input without producing output bytes (dry-run path).
    ///
    /// Reports the face count, dimensions, format, and whether metadata is
    /// present; the input is never modified.
    pub fn summary(&self, raw: &[u8]) -> Result<ScrubSummary> {
        let has_metadata = strip::has_exif(raw);
        let decoded = self.decoder.decode(raw)?;
        let gray = imageops::grayscale(&decoded.pixels);
        let regions = self
            .detector
            .detect(&gray)
            .map_err(|e| ScrubError::DetectionFailure(e.to_string()))?;

        Ok(ScrubSummary {
            faces_detected: regions.len(),
            input_size: raw.len(),
            width: decoded.width,
            height: decoded.height,
            format: decoded.format.as_str().to_string(),
            has_metadata,
        })
    }
}

/// Re-decode the stripper's output into the buffer the detector and
/// redactor work on. The bytes were encoded by this pipeline, so any
/// failure here is an invariant violation, not bad input.
fn reload_clean(clean: &[u8]) -> Result<RgbImage> {
    Ok(image::load_from_memory(clean)
        .map_err(|e| ScrubError::Internal(format!("clean re-encode failed to decode: {e}")))?
        .to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{DetectError, FaceRegion, NoopDetector};
    use crate::error::ErrorKind;
    use image::codecs::png::PngEncoder;
    use image::{GrayImage, ImageEncoder};

    struct FixedDetector(Vec<FaceRegion>);

    impl FaceDetector for FixedDetector {
        fn detect(&self, _gray: &GrayImage) -> std::result::Result<Vec<FaceRegion>, DetectError> {
            Ok(self.0.clone())
        }
    }

    struct FailingDetector;

    impl FaceDetector for FailingDetector {
        fn detect(&self, _gray: &GrayImage) -> std::result::Result<Vec<FaceRegion>, DetectError> {
            Err("backend exploded".into())
        }
    }

    fn test_png(width: u32, height: u32) -> Vec<u8> {
        let mut img = image::RgbImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = image::Rgb([(x * 7 % 256) as u8, (y * 5 % 256) as u8, 200]);
        }
        let mut buffer = Vec::new();
        PngEncoder::new(&mut buffer)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
        buffer
    }

    fn scrubber_with(detector: Arc<dyn FaceDetector>) -> Scrubber {
        Scrubber::new(Config::default(), detector).unwrap()
    }

    #[test]
    fn process_changes_the_hash() {
        let scrubber = scrubber_with(Arc::new(NoopDetector));
        let out = scrubber.process(&test_png(64, 64)).unwrap();
        assert_ne!(out.report.original_hash, out.report.new_hash);
        assert_eq!(out.report.new_hash, fingerprint::digest_hex(&out.bytes));
    }

    #[test]
    fn report_counts_detected_faces() {
        let regions = vec![
            FaceRegion { x: 2, y: 2, width: 10, height: 10, confidence: 0.8 },
            FaceRegion { x: 30, y: 30, width: 12, height: 12, confidence: 0.9 },
        ];
        let scrubber = scrubber_with(Arc::new(FixedDetector(regions)));
        let out = scrubber.process(&test_png(64, 64)).unwrap();
        assert_eq!(out.report.faces_detected, 2);
    }

    #[test]
    fn report_dimensions_follow_the_downscale() {
        let scrubber = scrubber_with(Arc::new(NoopDetector));
        let out = scrubber.process(&test_png(100, 50)).unwrap();
        assert_eq!((out.report.width_before, out.report.height_before), (100, 50));
        assert_eq!((out.report.width_after, out.report.height_after), (99, 49));
    }

    #[test]
    fn detector_failure_is_wrapped() {
        let scrubber = scrubber_with(Arc::new(FailingDetector));
        let err = scrubber.process(&test_png(64, 64)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DetectionFailure);
    }

    #[test]
    fn invalid_input_yields_no_output() {
        let scrubber = scrubber_with(Arc::new(NoopDetector));
        let err = scrubber.process(b"truncated garbage").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let mut config = Config::default();
        config.stealth.scale_ratio = 2.0;
        assert!(Scrubber::new(config, Arc::new(NoopDetector)).is_err());
    }

    #[test]
    fn summary_reports_without_transforming() {
        let scrubber = scrubber_with(Arc::new(FixedDetector(vec![FaceRegion {
            x: 0,
            y: 0,
            width: 8,
            height: 8,
            confidence: 0.7,
        }])));
        let png = test_png(64, 48);
        let summary = scrubber.summary(&png).unwrap();
        assert_eq!(summary.faces_detected, 1);
        assert_eq!((summary.width, summary.height), (64, 48));
        assert_eq!(summary.format, "png");
        assert_eq!(summary.input_size, png.len());
        assert!(!summary.has_metadata);
    }

    #[test]
    fn process_is_deterministic() {
        let scrubber = scrubber_with(Arc::new(NoopDetector));
        let png = test_png(80, 60);
        let a = scrubber.process(&png).unwrap();
        let b = scrubber.process(&png).unwrap();
        assert_eq!(a.bytes, b.bytes);
        assert_eq!(a.report.faces_detected, b.report.faces_detected);
        assert_eq!(a.report.new_hash, b.report.new_hash);
    }
}
