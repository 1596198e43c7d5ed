//! Result types returned to callers.

use serde::Serialize;

/// Audit record for one completed scrub, immutable after construction.
#[derive(Debug, Clone, Serialize)]
pub struct ScrubReport {
    /// Number of faces found and blurred
    pub faces_detected: usize,

    /// BLAKE3 hex digest of the raw input bytes
    pub original_hash: String,

    /// BLAKE3 hex digest of the final output bytes
    pub new_hash: String,

    /// Input size in bytes
    pub original_size: usize,

    /// Output size in bytes
    pub new_size: usize,

    /// Input width in pixels
    pub width_before: u32,

    /// Input height in pixels
    pub height_before: u32,

    /// Output width in pixels
    pub width_after: u32,

    /// Output height in pixels
    pub height_after: u32,

    /// Container format ("jpeg", "png", "webp"), preserved input → output
    pub format: String,

    /// Whether the input carried an EXIF block that the strip removed
    pub metadata_removed: bool,

    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: f64,
}

/// The two-field result of a scrub: clean bytes plus the report.
#[derive(Debug, Clone)]
pub struct ScrubOutput {
    /// Sanitized encoded image bytes
    pub bytes: Vec<u8>,
    /// Audit record
    pub report: ScrubReport,
}

/// Read-only inspection of an input, produced without any transform.
#[derive(Debug, Clone, Serialize)]
pub struct ScrubSummary {
    /// Number of faces the detector reports
    pub faces_detected: usize,

    /// Input size in bytes
    pub input_size: usize,

    /// Input width in pixels
    pub width: u32,

    /// Input height in pixels
    pub height: u32,

    /// Container format
    pub format: String,

    /// Whether the input carries an EXIF block
    pub has_metadata: bool,
}
