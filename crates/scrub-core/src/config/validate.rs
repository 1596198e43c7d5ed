//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_input_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_input_mb must be > 0".into(),
            ));
        }
        if self.limits.min_dimension < 2 {
            return Err(ConfigError::ValidationError(
                "limits.min_dimension must be >= 2 (the identity reset cannot \
                 change the geometry of a 1-pixel axis)"
                    .into(),
            ));
        }
        if self.limits.max_dimension < self.limits.min_dimension {
            return Err(ConfigError::ValidationError(
                "limits.max_dimension must be >= limits.min_dimension".into(),
            ));
        }
        if !(self.stealth.scale_ratio > 0.0 && self.stealth.scale_ratio <= 1.0) {
            return Err(ConfigError::ValidationError(
                "stealth.scale_ratio must be in (0, 1] — the transform never upscales".into(),
            ));
        }
        if self.stealth.jpeg_quality == 0 || self.stealth.jpeg_quality > 100 {
            return Err(ConfigError::ValidationError(
                "stealth.jpeg_quality must be between 1 and 100".into(),
            ));
        }
        if self.strip.jpeg_quality == 0 || self.strip.jpeg_quality > 100 {
            return Err(ConfigError::ValidationError(
                "strip.jpeg_quality must be between 1 and 100".into(),
            ));
        }
        if !(self.redaction.sigma_ratio > 0.0) {
            return Err(ConfigError::ValidationError(
                "redaction.sigma_ratio must be > 0".into(),
            ));
        }
        if !(self.redaction.min_sigma > 0.0) {
            return Err(ConfigError::ValidationError(
                "redaction.min_sigma must be > 0".into(),
            ));
        }
        if self.detector.min_face_size == 0 {
            return Err(ConfigError::ValidationError(
                "detector.min_face_size must be > 0".into(),
            ));
        }
        Ok(())
    }
}
