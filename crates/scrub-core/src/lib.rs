//! Scrub Core - single-image privacy-scrubbing pipeline.
//!
//! Given raw encoded image bytes, the pipeline produces sanitized encoded
//! bytes plus an audit report: embedded metadata is removed, detected faces
//! are irreversibly blurred, and a deliberate downscale + re-encode
//! ("stealth mode") guarantees the output's content hash differs from the
//! input's. Everything happens in process memory; no stage touches disk.
//!
//! # Architecture
//!
//! ```text
//! bytes → Decode/Validate → Strip metadata → Detect faces → Redact
//!       → Identity reset → Fingerprint → (clean bytes, report)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use scrub_core::{Config, NoopDetector, Scrubber};
//!
//! let scrubber = Scrubber::new(Config::load()?, Arc::new(NoopDetector))?;
//! let raw = std::fs::read("photo.jpg")?;
//! let out = scrubber.process(&raw)?;
//! println!("faces blurred: {}", out.report.faces_detected);
//! ```
//!
//! Calls are independent: a `Scrubber` may be shared across threads, with
//! the loaded detector model as the only shared (read-only) resource.

// Module declarations
pub mod config;
pub mod detect;
pub mod error;
pub mod fingerprint;
pub mod pipeline;
#[cfg(feature = "rustface")]
pub mod rustface_backend;
pub mod scrubber;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use detect::{DetectError, FaceDetector, FaceRegion, NoopDetector};
pub use error::{ConfigError, ErrorKind, Result, ScrubError};
pub use pipeline::FormatTag;
#[cfg(feature = "rustface")]
pub use rustface_backend::RustfaceDetector;
pub use scrubber::Scrubber;
pub use types::{ScrubOutput, ScrubReport, ScrubSummary};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
