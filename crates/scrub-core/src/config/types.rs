//! Sub-configuration structs with pipeline defaults.

use serde::{Deserialize, Serialize};

/// Input limits protecting the decoder against hostile or broken files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum input size in megabytes
    pub max_input_mb: u64,

    /// Maximum image dimension (width or height)
    pub max_dimension: u32,

    /// Minimum image dimension (width or height).
    /// The floor of 8 keeps the identity-reset downscale from degenerating:
    /// `floor(0.99 × d) < d` holds for every `d ≥ 2`, so anything past this
    /// gate is guaranteed a geometry change.
    pub min_dimension: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_mb: 50,
            max_dimension: 10_000,
            min_dimension: 8,
        }
    }
}

/// Metadata-strip re-encode settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    /// JPEG quality for the clean re-encode (1-100)
    pub jpeg_quality: u8,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self { jpeg_quality: 92 }
    }
}

/// Face redaction (blur) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedactionConfig {
    /// Gaussian sigma as a fraction of the larger region side
    pub sigma_ratio: f32,

    /// Lower bound on the blur sigma, so tiny regions still lose detail
    pub min_sigma: f32,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            sigma_ratio: 0.25,
            min_sigma: 6.0,
        }
    }
}

/// Identity-reset ("stealth") transform settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StealthConfig {
    /// Linear downscale ratio applied to each axis, in (0, 1]
    pub scale_ratio: f64,

    /// JPEG quality of the final encode (1-100).
    /// Deliberately different from `strip.jpeg_quality` so a face-free,
    /// metadata-free JPEG still re-encodes to different bytes.
    pub jpeg_quality: u8,
}

impl Default for StealthConfig {
    fn default() -> Self {
        Self {
            scale_ratio: 0.99,
            jpeg_quality: 85,
        }
    }
}

/// Face detector backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Path to the SeetaFace model file (~ is expanded).
    /// When unset, detection is disabled and zero faces are reported.
    pub model_path: Option<String>,

    /// Smallest face size in pixels the backend will look for
    pub min_face_size: u32,

    /// Backend score threshold below which candidates are discarded
    pub score_threshold: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            min_face_size: 20,
            score_threshold: 2.0,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
